use crate::field::{FieldDefinitions, FieldSpec};
use crate::values::FieldValues;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Field validation layer, run by storage before the pre-save hook.
///
/// Most hosts use [`ConstraintValidator`]. Implement this to add checks
/// or to observe what reaches validation.
pub trait EntityValidator: Send + Sync {
    /// Validate a record's values against its field definitions.
    /// Return every violation found to reject the write.
    fn validate(&self, fields: &FieldDefinitions, values: &FieldValues) -> Result<(), Vec<Violation>>;
}

/// Checks required flags, value shapes and `max_length` settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintValidator;

impl ConstraintValidator {
    fn check(name: &str, spec: &FieldSpec, value: Option<&Value>, out: &mut Vec<Violation>) {
        let display_name = if spec.label.is_empty() { name } else { spec.label.as_str() };

        if is_empty(value) {
            if spec.required {
                out.push(Violation::new(name, format!("{display_name} field is required.")));
            }
            return;
        }
        let Some(value) = value else { return };

        if !spec.field_type.accepts(value) {
            out.push(Violation::new(
                name,
                format!("{display_name} is not a valid {:?} value.", spec.field_type),
            ));
            return;
        }

        if let (Some(max), Some(s)) = (spec.max_length(), text_of(value)) {
            let len = s.chars().count() as u64;
            if len > max {
                out.push(Violation::new(
                    name,
                    format!("{display_name} cannot be longer than {max} characters but is currently {len} characters long."),
                ));
            }
        }
    }
}

impl EntityValidator for ConstraintValidator {
    fn validate(&self, fields: &FieldDefinitions, values: &FieldValues) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        for (name, spec) in fields.iter() {
            Self::check(name, spec, values.get(name), &mut violations);
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn text_of(value: &Value) -> Option<&str> {
    value
        .as_str()
        .or_else(|| value.get("value").and_then(Value::as_str))
}

fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(v) => text_of(v).is_some_and(|s| s.is_empty()),
    }
}
