#![allow(dead_code)]

use entitykit_model::{
    ContentEntity, EntityBase, EntityError, EntityKeys, EntityLabels, EntityResult,
    EntityTypeDescriptor, FieldDefinitions, FieldSpec, FieldType, FieldValues, PersistableEntity,
    PluralLabel, SaveContext,
};
use serde_json::json;

/// Minimal entity type: a titled note with a pinned flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub base: EntityBase,
    pub title: String,
    pub pinned: bool,
    /// When set, `pre_save` fails with this message.
    pub fail_pre_save: Option<String>,
    /// Set by `pre_save`, to observe hook side effects.
    pub touched: bool,
}

impl PersistableEntity for Note {
    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }
}

impl ContentEntity for Note {
    const ENTITY_TYPE_ID: &'static str = "note";

    fn descriptor() -> EntityTypeDescriptor {
        EntityTypeDescriptor {
            id: "note".into(),
            labels: EntityLabels {
                label: "Note".into(),
                collection: "Notes".into(),
                singular: "note".into(),
                plural: "notes".into(),
                count: PluralLabel {
                    singular: "@count note".into(),
                    plural: "@count notes".into(),
                },
                bundle_label: "Note type".into(),
            },
            base_table: "note".into(),
            keys: EntityKeys {
                id: "id".into(),
                uuid: Some("uuid".into()),
                bundle: Some("bundle".into()),
                label: Some("title".into()),
                owner: None,
            },
            handlers: Default::default(),
            links: [("canonical", "/note/{note}")].into_iter().collect(),
            admin_permission: None,
            bundle_entity_type: None,
            field_ui_base_route: None,
        }
    }

    fn define_fields() -> FieldDefinitions {
        [
            (
                "title",
                FieldSpec::create(FieldType::String)
                    .label("Title")
                    .required(true)
                    .setting("max_length", 64),
            ),
            (
                "pinned",
                FieldSpec::create(FieldType::Boolean)
                    .label("Pinned")
                    .default_value(false),
            ),
            (
                "created",
                FieldSpec::create(FieldType::Timestamp)
                    .label("Created")
                    .default_provider(|ctx| json!(ctx.request_time.as_secs())),
            ),
            (
                "changed",
                FieldSpec::create(FieldType::Timestamp).label("Changed").auto_update(),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn from_values(mut base: EntityBase, values: &FieldValues) -> EntityResult<Self> {
        if let Some(created) = values.get_timestamp("created")? {
            base.set_created(created);
        }
        Ok(Self {
            base,
            title: values.get_str("title")?.unwrap_or_default(),
            pinned: values.get_bool("pinned")?.unwrap_or(false),
            fail_pre_save: None,
            touched: false,
        })
    }

    fn to_values(&self) -> FieldValues {
        FieldValues::new()
            .with("title", self.title.as_str())
            .with("pinned", self.pinned)
            .with("created", self.created().as_secs())
            .with("changed", self.changed().as_secs())
    }

    fn pre_save(&mut self, ctx: &SaveContext) -> EntityResult<()> {
        self.base.pre_save(Self::ENTITY_TYPE_ID, ctx)?;
        self.touched = true;
        match &self.fail_pre_save {
            Some(reason) => Err(EntityError::invalid("title", reason.as_str())),
            None => Ok(()),
        }
    }
}

pub fn note_values(title: &str) -> FieldValues {
    FieldValues::new().with("title", title)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
