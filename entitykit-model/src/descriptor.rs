//! Entity-type metadata, declared as a plain value.
//!
//! A descriptor names everything a host needs to wire an entity type up:
//! the backing table, which fields play the id/uuid/bundle/label/owner
//! roles, the identifiers of the external handlers (list UI, access
//! control, forms, route provider) and the URL templates of its pages.
//! Handlers are identifiers only; this crate implements none of them.

use crate::error::{EntityError, EntityResult};
use crate::field::{FieldDefinitions, FieldSpec, FieldType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTypeDescriptor {
    /// Stable machine name, e.g. `custom_entity_sample`.
    pub id: String,
    pub labels: EntityLabels,
    pub base_table: String,
    pub keys: EntityKeys,
    #[serde(default)]
    pub handlers: Handlers,
    #[serde(default)]
    pub links: LinkTemplates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_permission: Option<String>,
    /// Entity type whose records define this type's bundles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_ui_base_route: Option<String>,
}

impl EntityTypeDescriptor {
    /// Fields every record of this type has, derived from the entity keys.
    ///
    /// These come first in the backing table, ahead of the type's own
    /// fields.
    pub fn base_field_definitions(&self) -> FieldDefinitions {
        let mut fields = FieldDefinitions::new();

        fields.insert(
            &self.keys.id,
            FieldSpec::create(FieldType::Integer)
                .label("ID")
                .read_only(true)
                .setting("unsigned", true),
        );

        if let Some(uuid) = &self.keys.uuid {
            fields.insert(
                uuid,
                FieldSpec::create(FieldType::Uuid).label("UUID").read_only(true),
            );
        }

        if let Some(bundle) = &self.keys.bundle {
            let spec = match &self.bundle_entity_type {
                Some(target) => FieldSpec::create(FieldType::EntityReference)
                    .setting("target_type", target.as_str()),
                None => FieldSpec::create(FieldType::String).setting("max_length", 32),
            };
            fields.insert(
                bundle,
                spec.label(&self.labels.bundle_label)
                    .required(true)
                    .read_only(true),
            );
        }

        fields
    }

    /// Renders the link template `rel` for the given placeholder values.
    pub fn link_url(&self, rel: &str, params: &[(&str, &str)]) -> EntityResult<String> {
        self.links.render(rel, params)
    }
}

/// Human-readable names of an entity type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityLabels {
    pub label: String,
    pub collection: String,
    pub singular: String,
    pub plural: String,
    pub count: PluralLabel,
    pub bundle_label: String,
}

/// A count label with singular and plural forms, using `@count` as the
/// placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluralLabel {
    pub singular: String,
    pub plural: String,
}

impl PluralLabel {
    pub fn format(&self, count: usize) -> String {
        let template = if count == 1 { &self.singular } else { &self.plural };
        template.replace("@count", &count.to_string())
    }
}

/// Which field names play the standard roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityKeys {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Default for EntityKeys {
    fn default() -> Self {
        Self {
            id: "id".into(),
            uuid: None,
            bundle: None,
            label: None,
            owner: None,
        }
    }
}

/// Identifiers of the external collaborators serving an entity type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Handlers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_builder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    /// Form operation (`add`, `edit`, `delete`, ...) → form handler.
    #[serde(default)]
    pub forms: BTreeMap<String, String>,
    /// Route provider kind (`html`, ...) → provider.
    #[serde(default)]
    pub route_providers: BTreeMap<String, String>,
}

impl Handlers {
    pub fn form(&self, operation: &str) -> Option<&str> {
        self.forms.get(operation).map(String::as_str)
    }
}

/// Link relation (`canonical`, `edit-form`, ...) → path template.
///
/// Templates contain `{name}` placeholders, filled by [`LinkTemplates::render`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkTemplates(BTreeMap<String, String>);

impl LinkTemplates {
    pub fn insert(&mut self, rel: &str, template: &str) {
        self.0.insert(rel.to_string(), template.to_string());
    }

    pub fn get(&self, rel: &str) -> Option<&str> {
        self.0.get(rel).map(String::as_str)
    }

    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fills every `{name}` placeholder in template `rel`.
    ///
    /// Fails if the template is unknown or a placeholder has no value.
    /// Unused parameters are ignored.
    pub fn render(&self, rel: &str, params: &[(&str, &str)]) -> EntityResult<String> {
        let template = self
            .get(rel)
            .ok_or_else(|| EntityError::UnknownLinkTemplate(rel.to_string()))?;

        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                // Unbalanced brace: keep the remainder verbatim.
                out.push_str(&rest[start..]);
                return Ok(out);
            };
            let name = &after[..end];
            let value = params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| *v)
                .ok_or_else(|| EntityError::MissingLinkParameter {
                    rel: rel.to_string(),
                    param: name.to_string(),
                })?;
            out.push_str(value);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for LinkTemplates {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut links = Self::default();
        for (rel, template) in iter {
            links.insert(rel, template);
        }
        links
    }
}
