use crate::descriptor::EntityTypeDescriptor;
use crate::error::{EntityError, EntityResult};
use crate::field::FieldDefinitions;
use crate::values::FieldValues;
use entitykit_types::{EntityId, EntityUuid, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Bookkeeping every persisted record carries.
///
/// Entity types embed this struct rather than extending a base type. The
/// id is assigned by storage on first save; uuid, bundle and `created` are
/// fixed when the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBase {
    id: Option<EntityId>,
    uuid: EntityUuid,
    bundle: String,
    created: Timestamp,
    changed: Timestamp,
}

impl EntityBase {
    /// Starts a new, unsaved record.
    pub fn new(bundle: &str, created: Timestamp) -> Self {
        Self {
            id: None,
            uuid: EntityUuid::new(),
            bundle: bundle.to_string(),
            created,
            changed: created,
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn uuid(&self) -> EntityUuid {
        self.uuid
    }

    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    pub fn created(&self) -> Timestamp {
        self.created
    }

    pub fn changed(&self) -> Timestamp {
        self.changed
    }

    /// Overrides the creation time. Only honoured before the first save.
    pub fn set_created(&mut self, created: Timestamp) {
        if self.id.is_none() {
            self.created = created;
        }
    }

    pub fn set_changed(&mut self, changed: Timestamp) {
        self.changed = changed;
    }

    /// Assigns the storage id. Returns false, leaving the id untouched, if
    /// the record already has one.
    pub fn assign_id(&mut self, id: EntityId) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id);
        true
    }

    /// Base lifecycle hook, run at the start of every entity type's
    /// `pre_save`.
    pub fn pre_save(&mut self, entity_type: &str, _ctx: &SaveContext) -> EntityResult<()> {
        if self.bundle.trim().is_empty() {
            return Err(EntityError::MissingBundle(entity_type.to_string()));
        }
        Ok(())
    }
}

/// What storage knows about the save in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveContext {
    /// The user performing the save.
    pub account: UserId,
    pub request_time: Timestamp,
    /// True when the record has no id yet.
    pub is_new: bool,
}

/// A record storage can persist: id/uuid/bundle/timestamp bookkeeping.
pub trait PersistableEntity {
    fn base(&self) -> &EntityBase;

    fn base_mut(&mut self) -> &mut EntityBase;

    fn id(&self) -> Option<EntityId> {
        self.base().id()
    }

    fn uuid(&self) -> EntityUuid {
        self.base().uuid()
    }

    fn bundle(&self) -> &str {
        self.base().bundle()
    }

    fn created(&self) -> Timestamp {
        self.base().created()
    }

    fn changed(&self) -> Timestamp {
        self.base().changed()
    }

    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}

/// A record with an owning user.
///
/// `None` means no owner has been set yet.
pub trait Owned {
    fn owner_id(&self) -> Option<UserId>;

    fn set_owner_id(&mut self, uid: UserId);
}

/// An entity type: its declaration plus the conversion between the typed
/// record and untyped field values.
pub trait ContentEntity: PersistableEntity + Clone + Send + 'static {
    /// Machine name of the entity type; matches `descriptor().id`.
    const ENTITY_TYPE_ID: &'static str;

    fn descriptor() -> EntityTypeDescriptor;

    /// The type's own fields, in display and column order.
    ///
    /// Must be pure and return the same set on every call.
    fn define_fields() -> FieldDefinitions;

    /// Builds a record from field values. Keys not declared by
    /// [`ContentEntity::define_fields`] are ignored.
    fn from_values(base: EntityBase, values: &FieldValues) -> EntityResult<Self>;

    /// The current values of the type's own fields.
    fn to_values(&self) -> FieldValues;

    /// Runs immediately before every create or update.
    ///
    /// Overrides must call [`EntityBase::pre_save`] first. An error aborts
    /// the save.
    fn pre_save(&mut self, ctx: &SaveContext) -> EntityResult<()> {
        self.base_mut().pre_save(Self::ENTITY_TYPE_ID, ctx)
    }
}
