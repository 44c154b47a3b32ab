use crate::{descriptor, fields};
use entitykit_model::{
    ContentEntity, EntityBase, EntityResult, EntityTypeDescriptor, FieldDefinitions, FieldValues,
    FormattedText, Owned, PersistableEntity, SaveContext,
};
use entitykit_types::UserId;
use serde_json::Value;
use tracing::debug;

/// One Custom Entity Sample record.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomEntitySample {
    base: EntityBase,
    label: String,
    status: bool,
    description: Option<FormattedText>,
    owner: Option<UserId>,
}

impl CustomEntitySample {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    /// True when the record is enabled.
    pub fn status(&self) -> bool {
        self.status
    }

    pub fn set_status(&mut self, status: bool) {
        self.status = status;
    }

    pub fn description(&self) -> Option<&FormattedText> {
        self.description.as_ref()
    }

    pub fn set_description(&mut self, description: Option<FormattedText>) {
        self.description = description;
    }

    /// Unsets the owner. The next save assigns the anonymous user.
    pub fn clear_owner(&mut self) {
        self.owner = None;
    }
}

impl PersistableEntity for CustomEntitySample {
    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }
}

impl Owned for CustomEntitySample {
    fn owner_id(&self) -> Option<UserId> {
        self.owner
    }

    fn set_owner_id(&mut self, uid: UserId) {
        self.owner = Some(uid);
    }
}

impl ContentEntity for CustomEntitySample {
    const ENTITY_TYPE_ID: &'static str = descriptor::ENTITY_TYPE_ID;

    fn descriptor() -> EntityTypeDescriptor {
        descriptor::descriptor()
    }

    fn define_fields() -> FieldDefinitions {
        fields::define_fields()
    }

    fn from_values(mut base: EntityBase, values: &FieldValues) -> EntityResult<Self> {
        if let Some(created) = values.get_timestamp("created")? {
            base.set_created(created);
        }
        Ok(Self {
            base,
            label: values.get_str("label")?.unwrap_or_default(),
            status: values.get_bool("status")?.unwrap_or(true),
            description: values.get_text("description")?,
            owner: values.get_user("uid")?,
        })
    }

    fn to_values(&self) -> FieldValues {
        FieldValues::new()
            .with("label", self.label.as_str())
            .with("status", self.status)
            .with("description", self.description.clone().map_or(Value::Null, Value::from))
            .with("uid", self.owner.map_or(Value::Null, |uid| Value::from(uid.get())))
            .with("created", self.created().as_secs())
            .with("changed", self.changed().as_secs())
    }

    fn pre_save(&mut self, ctx: &SaveContext) -> EntityResult<()> {
        self.base.pre_save(Self::ENTITY_TYPE_ID, ctx)?;
        if self.owner_id().is_none() {
            // No owner set explicitly: the anonymous user owns the record.
            debug!(uuid = %self.uuid(), "No owner set, assigning anonymous");
            self.set_owner_id(UserId::ANONYMOUS);
        }
        Ok(())
    }
}
