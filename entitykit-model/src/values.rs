//! Untyped field values, as handed to `create` and to validators.

use crate::error::{EntityError, EntityResult};
use entitykit_types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name → JSON value.
///
/// A key holding `null` is present but empty: it suppresses the field's
/// default on `create`, unlike a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(Map<String, Value>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds values from a JSON object.
    pub fn from_json(value: Value) -> EntityResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(EntityError::invalid(
                "*",
                format!("expected an object of field values, got {other}"),
            )),
        }
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-null value of `field`, if any.
    fn present(&self, field: &str) -> Option<&Value> {
        self.get(field).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, field: &str) -> EntityResult<Option<String>> {
        self.present(field)
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| EntityError::invalid(field, "expected a string"))
            })
            .transpose()
    }

    pub fn get_bool(&self, field: &str) -> EntityResult<Option<bool>> {
        self.present(field)
            .map(|v| {
                v.as_bool()
                    .ok_or_else(|| EntityError::invalid(field, "expected a boolean"))
            })
            .transpose()
    }

    pub fn get_timestamp(&self, field: &str) -> EntityResult<Option<Timestamp>> {
        self.present(field)
            .map(|v| {
                v.as_i64()
                    .map(Timestamp::from_secs)
                    .ok_or_else(|| EntityError::invalid(field, "expected seconds since the epoch"))
            })
            .transpose()
    }

    /// A user reference, given either as a bare id or as `{"target_id": id}`.
    pub fn get_user(&self, field: &str) -> EntityResult<Option<UserId>> {
        self.present(field)
            .map(|v| {
                v.as_u64()
                    .or_else(|| v.get("target_id").and_then(Value::as_u64))
                    .map(UserId::new)
                    .ok_or_else(|| EntityError::invalid(field, "expected a user id"))
            })
            .transpose()
    }

    /// Long text, given either as a bare string or as `{"value", "format"}`.
    pub fn get_text(&self, field: &str) -> EntityResult<Option<FormattedText>> {
        self.present(field)
            .map(|v| match v {
                Value::String(s) => Ok(FormattedText::plain(s)),
                other => serde_json::from_value(other.clone())
                    .map_err(|e| EntityError::invalid(field, e.to_string())),
            })
            .transpose()
    }
}

impl From<Map<String, Value>> for FieldValues {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Long-form text with an optional text-format id (`basic_html`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedText {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FormattedText {
    pub fn plain(value: &str) -> Self {
        Self {
            value: value.to_string(),
            format: None,
        }
    }

    pub fn with_format(value: &str, format: &str) -> Self {
        Self {
            value: value.to_string(),
            format: Some(format.to_string()),
        }
    }
}

impl From<FormattedText> for Value {
    fn from(text: FormattedText) -> Self {
        match text.format {
            Some(format) => serde_json::json!({ "value": text.value, "format": format }),
            None => serde_json::json!({ "value": text.value }),
        }
    }
}
