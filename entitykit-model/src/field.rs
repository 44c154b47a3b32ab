use crate::display::{DisplayContext, DisplayOptions, FieldDisplay};
use entitykit_types::{Timestamp, UserId};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Storage type tag of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Short, single-line text with a `max_length` setting.
    String,
    Boolean,
    /// Long-form text, optionally carrying a text format.
    TextLong,
    /// Reference to another entity, by integer id. Target in `target_type`.
    EntityReference,
    /// Seconds since the Unix epoch.
    Timestamp,
    Integer,
    Uuid,
}

impl FieldType {
    /// Returns true if `value` has a shape this field type can store.
    /// `null` is accepted by every type; required-ness is checked separately.
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        match self {
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::TextLong => {
                value.is_string() || value.get("value").is_some_and(Value::is_string)
            }
            Self::EntityReference => {
                value.is_u64() || value.get("target_id").is_some_and(Value::is_u64)
            }
            Self::Timestamp => value.is_i64(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Uuid => value
                .as_str()
                .is_some_and(|s| entitykit_types::EntityUuid::parse(s).is_ok()),
        }
    }
}

/// Type-specific storage settings (`max_length`, `target_type`, `on_label`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSettings(BTreeMap<String, Value>);

impl FieldSettings {
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Inputs available to a default-value provider when a record is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultContext {
    /// The user creating the record.
    pub account: UserId,
    /// Time of the request creating the record.
    pub request_time: Timestamp,
}

type Provider = Arc<dyn Fn(&DefaultContext) -> Value + Send + Sync>;

/// Default for a field on a freshly created record.
#[derive(Clone, Default)]
pub enum DefaultValue {
    #[default]
    None,
    Value(Value),
    /// Computed when the record is created.
    Provider(Provider),
}

impl DefaultValue {
    pub fn provider<F>(f: F) -> Self
    where
        F: Fn(&DefaultContext) -> Value + Send + Sync + 'static,
    {
        Self::Provider(Arc::new(f))
    }

    /// Resolves the default for a new record; `None` if the field has none.
    pub fn resolve(&self, ctx: &DefaultContext) -> Option<Value> {
        match self {
            Self::None => None,
            Self::Value(v) => Some(v.clone()),
            Self::Provider(f) => Some(f(ctx)),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DefaultValue", 2)?;
        match self {
            Self::None => {
                s.serialize_field("kind", "none")?;
                s.skip_field("value")?;
            }
            Self::Value(v) => {
                s.serialize_field("kind", "value")?;
                s.serialize_field("value", v)?;
            }
            Self::Provider(_) => {
                s.serialize_field("kind", "provider")?;
                s.skip_field("value")?;
            }
        }
        s.end()
    }
}

/// Declarative description of one field.
///
/// Built in a chain, starting from [`FieldSpec::create`]:
///
/// ```
/// use entitykit_model::{DisplayContext, DisplayOptions, FieldSpec, FieldType};
///
/// let label = FieldSpec::create(FieldType::String)
///     .label("Label")
///     .required(true)
///     .setting("max_length", 255)
///     .display(DisplayContext::Form, DisplayOptions::new("string_textfield", -5))
///     .display_configurable(DisplayContext::Form, true);
///
/// assert_eq!(label.max_length(), Some(255));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub read_only: bool,
    /// Overwritten with the save time on every mutating save.
    pub auto_update: bool,
    #[serde(skip_serializing_if = "DefaultValue::is_none")]
    pub default: DefaultValue,
    #[serde(skip_serializing_if = "FieldSettings::is_empty")]
    pub settings: FieldSettings,
    pub form: FieldDisplay,
    pub view: FieldDisplay,
}

impl FieldSpec {
    pub fn create(field_type: FieldType) -> Self {
        Self {
            field_type,
            label: String::new(),
            description: None,
            required: false,
            read_only: false,
            auto_update: false,
            default: DefaultValue::None,
            settings: FieldSettings::default(),
            form: FieldDisplay::default(),
            view: FieldDisplay::default(),
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.into();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn auto_update(mut self) -> Self {
        self.auto_update = true;
        self
    }

    pub fn setting(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.settings.set(key, value);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultValue::Value(value.into());
        self
    }

    pub fn default_provider<F>(mut self, f: F) -> Self
    where
        F: Fn(&DefaultContext) -> Value + Send + Sync + 'static,
    {
        self.default = DefaultValue::provider(f);
        self
    }

    pub fn display(mut self, context: DisplayContext, options: DisplayOptions) -> Self {
        self.display_mut(context).options = Some(options);
        self
    }

    pub fn display_configurable(mut self, context: DisplayContext, configurable: bool) -> Self {
        self.display_mut(context).configurable = configurable;
        self
    }

    fn display_mut(&mut self, context: DisplayContext) -> &mut FieldDisplay {
        match context {
            DisplayContext::Form => &mut self.form,
            DisplayContext::View => &mut self.view,
        }
    }

    /// The display block for `context`.
    pub fn display_for(&self, context: DisplayContext) -> &FieldDisplay {
        match context {
            DisplayContext::Form => &self.form,
            DisplayContext::View => &self.view,
        }
    }

    pub fn max_length(&self) -> Option<u64> {
        self.settings.get_u64("max_length")
    }

    pub fn target_type(&self) -> Option<&str> {
        self.settings.get_str("target_type")
    }
}

/// Ordered mapping from field name to [`FieldSpec`].
///
/// Iteration order is declaration order, which is also the column order of
/// the backing table.
#[derive(Debug, Clone, Default)]
pub struct FieldDefinitions {
    fields: Vec<(String, FieldSpec)>,
}

impl FieldDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, or replaces an existing one in place.
    pub fn insert(&mut self, name: &str, spec: FieldSpec) -> Option<FieldSpec> {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, spec)),
            None => {
                self.fields.push((name.to_string(), spec));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Appends every field of `other`, replacing same-named fields in place.
    pub fn merge(mut self, other: FieldDefinitions) -> Self {
        for (name, spec) in other.fields {
            self.insert(&name, spec);
        }
        self
    }
}

impl<'a> FromIterator<(&'a str, FieldSpec)> for FieldDefinitions {
    fn from_iter<I: IntoIterator<Item = (&'a str, FieldSpec)>>(iter: I) -> Self {
        let mut defs = Self::new();
        for (name, spec) in iter {
            defs.insert(name, spec);
        }
        defs
    }
}

impl Serialize for FieldDefinitions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, spec) in &self.fields {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}
