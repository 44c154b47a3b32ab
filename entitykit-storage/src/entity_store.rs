//! In-memory entity storage and its save pipeline.
//!
//! `save` runs, in order:
//! 1. the field validation layer (unless disabled in [`StorageConfig`]);
//! 2. the entity type's `pre_save` hook;
//! 3. `changed` bookkeeping: stamped on new records and on updates that
//!    change any field, left alone otherwise;
//! 4. id assignment for new records, then the write.
//!
//! The store lock is not held while steps 1 and 2 run, so validators and
//! hooks may read from the store. Any failure aborts the save and leaves the
//! caller's record as it was before the call.

use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use entitykit_model::{
    ConstraintValidator, ContentEntity, DefaultContext, EntityBase, EntityError,
    EntityTypeDescriptor, EntityValidator, FieldDefinitions, FieldValues, SaveContext,
};
use entitykit_types::{EntityId, EntityUuid, Timestamp, UserId};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Whether a save inserted or updated a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    New,
    Updated,
}

struct StoreState<E> {
    rows: BTreeMap<EntityId, E>,
    /// `None` once every id has been handed out.
    next_id: Option<EntityId>,
}

/// Storage for records of one entity type.
pub struct EntityStorage<E: ContentEntity> {
    config: StorageConfig,
    descriptor: EntityTypeDescriptor,
    fields: FieldDefinitions,
    validator: Box<dyn EntityValidator>,
    state: Mutex<StoreState<E>>,
}

impl<E: ContentEntity> EntityStorage<E> {
    /// Creates an empty store using [`ConstraintValidator`].
    pub fn new(config: StorageConfig) -> Self {
        let next_id = Some(EntityId::new(config.first_id));
        Self {
            config,
            descriptor: E::descriptor(),
            fields: E::define_fields(),
            validator: Box::new(ConstraintValidator),
            state: Mutex::new(StoreState {
                rows: BTreeMap::new(),
                next_id,
            }),
        }
    }

    /// Replaces the field validation layer.
    ///
    /// The validator runs without the store lock held.
    pub fn with_validator(mut self, validator: Box<dyn EntityValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn descriptor(&self) -> &EntityTypeDescriptor {
        &self.descriptor
    }

    pub fn field_definitions(&self) -> &FieldDefinitions {
        &self.fields
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, StoreState<E>>> {
        self.state.lock().map_err(|_| StorageError::LockPoisoned)
    }

    // ================================================================
    // Create / Save
    // ================================================================

    /// Creates a new, unsaved record.
    ///
    /// Fields absent from `values` take their declared defaults, computed
    /// for `account` at the current time. A field present as `null` keeps
    /// no value. The bundle comes from the bundle key in `values`, or the
    /// configured default bundle when that key is absent or `null`.
    pub fn create(&self, mut values: FieldValues, account: UserId) -> StorageResult<E> {
        let bundle = match &self.descriptor.keys.bundle {
            Some(key) => match values.remove(key) {
                Some(value) if !value.is_null() => match value.as_str() {
                    Some(name) => Some(name.to_string()),
                    None => {
                        return Err(EntityError::invalid(key, "expected a bundle machine name").into());
                    }
                },
                _ => None,
            },
            None => None,
        }
        .unwrap_or_else(|| self.config.default_bundle.clone());

        let ctx = DefaultContext {
            account,
            request_time: Timestamp::now(),
        };
        for (name, spec) in self.fields.iter() {
            if values.contains(name) {
                continue;
            }
            if let Some(default) = spec.default.resolve(&ctx) {
                values.set(name, default);
            }
        }

        let base = EntityBase::new(&bundle, ctx.request_time);
        let entity = E::from_values(base, &values)?;
        debug!(
            entity_type = E::ENTITY_TYPE_ID,
            bundle = %bundle,
            uuid = %entity.uuid(),
            "Entity created"
        );
        Ok(entity)
    }

    /// Saves `entity` on behalf of `account`, running the full pipeline.
    pub fn save(&self, entity: &mut E, account: UserId) -> StorageResult<SaveStatus> {
        let is_new = entity.is_new();
        self.check_writable(&*self.lock()?, entity)?;

        if self.config.validate_on_save {
            self.validator
                .validate(&self.fields, &entity.to_values())
                .map_err(StorageError::Validation)?;
        }

        let ctx = SaveContext {
            account,
            request_time: Timestamp::now(),
            is_new,
        };
        let snapshot = entity.clone();
        if let Err(e) = entity.pre_save(&ctx) {
            *entity = snapshot;
            return Err(e.into());
        }

        let result = self
            .lock()
            .and_then(|mut state| self.write(&mut state, entity, ctx.request_time));
        if result.is_err() {
            *entity = snapshot;
        }
        result
    }

    /// Returns the stored copy of an existing record. Fails if the record
    /// cannot be written: its row is gone, its uuid is taken, or no ids are
    /// left for a new record.
    fn check_writable(&self, state: &StoreState<E>, entity: &E) -> StorageResult<Option<E>> {
        if let Some(id) = entity.id() {
            return state
                .rows
                .get(&id)
                .cloned()
                .map(Some)
                .ok_or_else(|| StorageError::NotFound(format!("{}:{}", E::ENTITY_TYPE_ID, id)));
        }
        if state.next_id.is_none() {
            return Err(StorageError::IdsExhausted(E::ENTITY_TYPE_ID.to_string()));
        }
        let uuid = entity.uuid();
        if state.rows.values().any(|e| e.uuid() == uuid) {
            return Err(StorageError::DuplicateUuid {
                entity_type: E::ENTITY_TYPE_ID.to_string(),
                uuid: uuid.to_string(),
            });
        }
        Ok(None)
    }

    fn write(&self, state: &mut StoreState<E>, entity: &mut E, now: Timestamp) -> StorageResult<SaveStatus> {
        let original = self.check_writable(state, entity)?;

        let changed = match &original {
            None => now.max(entity.created()),
            Some(prev) if self.is_mutated(prev, entity) => prev.changed().tick(now),
            Some(prev) => prev.changed(),
        };
        entity.base_mut().set_changed(changed);

        let (id, status) = match (entity.id(), state.next_id) {
            (Some(id), _) => (id, SaveStatus::Updated),
            (None, Some(id)) => {
                state.next_id = id.checked_next();
                let assigned = entity.base_mut().assign_id(id);
                debug_assert!(assigned, "new record already carried an id");
                (id, SaveStatus::New)
            }
            (None, None) => return Err(StorageError::IdsExhausted(E::ENTITY_TYPE_ID.to_string())),
        };

        state.rows.insert(id, entity.clone());
        debug!(
            entity_type = E::ENTITY_TYPE_ID,
            entity_id = %id,
            status = ?status,
            changed = %changed,
            "Entity saved"
        );
        Ok(status)
    }

    /// True if any field other than the auto-updated ones differs.
    fn is_mutated(&self, original: &E, current: &E) -> bool {
        let strip = |mut values: FieldValues| {
            for (name, spec) in self.fields.iter() {
                if spec.auto_update {
                    values.remove(name);
                }
            }
            values
        };
        strip(original.to_values()) != strip(current.to_values())
    }

    // ================================================================
    // Load / Delete
    // ================================================================

    pub fn load(&self, id: EntityId) -> StorageResult<Option<E>> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    /// Loads the records that exist among `ids`, in id order.
    pub fn load_multiple(&self, ids: &[EntityId]) -> StorageResult<Vec<E>> {
        let state = self.lock()?;
        let mut ids = ids.to_vec();
        ids.sort();
        ids.dedup();
        Ok(ids.iter().filter_map(|id| state.rows.get(id).cloned()).collect())
    }

    pub fn load_all(&self) -> StorageResult<Vec<E>> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    pub fn load_by_uuid(&self, uuid: EntityUuid) -> StorageResult<Option<E>> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|e| e.uuid() == uuid)
            .cloned())
    }

    /// Deletes a record. Returns false if it did not exist.
    pub fn delete(&self, id: EntityId) -> StorageResult<bool> {
        let removed = self.lock()?.rows.remove(&id).is_some();
        debug!(entity_type = E::ENTITY_TYPE_ID, entity_id = %id, removed, "Entity deleted");
        Ok(removed)
    }

    pub fn count(&self) -> StorageResult<usize> {
        Ok(self.lock()?.rows.len())
    }
}
