//! Host side of entitykit.
//!
//! Provides what an entity type plugs into:
//!
//! - [`EntityTypeRegistry`]: explicit registration of entity types, with a
//!   cache of their field definitions and the table schema built from them
//! - [`TableSchema`]: backing-table layout derived from field definitions
//! - [`EntityStorage`]: the save pipeline (validation, the type's pre-save
//!   hook, `changed` bookkeeping, id assignment, write)
//! - [`StorageConfig`]: TOML configuration for the storage
//!
//! # Architecture
//!
//! Records live in memory, keyed by id. Persistence engines, query planning
//! and rendering are out of scope; the pipeline exists to run entity
//! lifecycle hooks in the right order around the write.

mod config;
mod entity_store;
mod error;
mod registry;
mod schema;

pub use config::StorageConfig;
pub use entity_store::{EntityStorage, SaveStatus};
pub use error::{StorageError, StorageResult};
pub use registry::EntityTypeRegistry;
pub use schema::{Column, ColumnType, TableSchema};
