//! Presentation hints for the edit form and the read view.
//!
//! These are defaults only. Rendering belongs to the host; a display block
//! marked `configurable` may be overridden there without code changes.

use crate::field::FieldSettings;
use serde::{Deserialize, Serialize};

/// The two contexts a field declares presentation defaults for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayContext {
    Form,
    View,
}

/// Where a read view places the field's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelDisplay {
    Above,
    Inline,
    Hidden,
}

/// Widget (form) or renderer (view) choice for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Widget id in the form context, renderer id in the view context.
    #[serde(rename = "type")]
    pub kind: String,
    pub weight: i32,
    /// Label placement. Only meaningful in the view context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelDisplay>,
    #[serde(default, skip_serializing_if = "FieldSettings::is_empty")]
    pub settings: FieldSettings,
}

impl DisplayOptions {
    pub fn new(kind: &str, weight: i32) -> Self {
        Self {
            kind: kind.into(),
            weight,
            label: None,
            settings: FieldSettings::default(),
        }
    }

    pub fn with_label(mut self, label: LabelDisplay) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_setting(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.settings.set(key, value);
        self
    }
}

/// A field's display block for one context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDisplay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<DisplayOptions>,
    #[serde(default)]
    pub configurable: bool,
}
