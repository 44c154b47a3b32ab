//! The Custom Entity Sample content entity type.
//!
//! A labelled, owned record with an on/off status, an optional long-form
//! description and created/changed timestamps. Everything beyond the
//! declaration (storage, validation, rendering, access control) is left to
//! the host:
//!
//! - [`descriptor`] declares the type's table, keys, handlers and links
//! - [`define_fields`] declares its fields
//! - [`CustomEntitySample`] is the record, with the default-owner pre-save hook
//!
//! ```
//! use custom_entity_sample::CustomEntitySample;
//! use entitykit_model::{FieldValues, Owned};
//! use entitykit_storage::{EntityStorage, StorageConfig};
//! use entitykit_types::UserId;
//!
//! let storage: EntityStorage<CustomEntitySample> = EntityStorage::new(StorageConfig::default());
//! let mut record = storage
//!     .create(FieldValues::new().with("label", "Widget A"), UserId::ANONYMOUS)
//!     .unwrap();
//! storage.save(&mut record, UserId::ANONYMOUS).unwrap();
//! assert_eq!(record.owner_id(), Some(UserId::ANONYMOUS));
//! ```

mod descriptor;
mod entity;
mod fields;

pub use descriptor::{BUNDLE_ENTITY_TYPE, ENTITY_TYPE_ID, descriptor};
pub use entity::CustomEntitySample;
pub use fields::{LABEL_MAX_LENGTH, define_fields, get_default_entity_owner};

use entitykit_storage::{EntityTypeRegistry, StorageResult, TableSchema};

/// Registers the Custom Entity Sample type with `registry`.
pub fn register(registry: &mut EntityTypeRegistry) -> StorageResult<&TableSchema> {
    registry.register::<CustomEntitySample>()
}
