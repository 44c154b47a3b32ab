//! Explicit registration of entity types.
//!
//! Hosts call [`EntityTypeRegistry::register`] once per type at install
//! time. The registry validates the descriptor against the type's fields,
//! caches the field definitions and builds the table schema.

use crate::error::{StorageError, StorageResult};
use crate::schema::TableSchema;
use entitykit_model::{ContentEntity, EntityTypeDescriptor, FieldDefinitions};
use std::collections::BTreeMap;
use tracing::{debug, info};

struct RegisteredType {
    descriptor: EntityTypeDescriptor,
    define_fields: fn() -> FieldDefinitions,
    fields: FieldDefinitions,
    table: TableSchema,
}

impl RegisteredType {
    fn rebuild(&mut self) {
        self.fields = (self.define_fields)();
        self.table = TableSchema::build(&self.descriptor, &self.fields);
    }
}

#[derive(Default)]
pub struct EntityTypeRegistry {
    types: BTreeMap<String, RegisteredType>,
}

impl EntityTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers entity type `E` and builds its table schema.
    pub fn register<E: ContentEntity>(&mut self) -> StorageResult<&TableSchema> {
        let descriptor = E::descriptor();
        let entity_type = descriptor.id.clone();

        if entity_type != E::ENTITY_TYPE_ID {
            return Err(StorageError::InvalidDescriptor {
                entity_type,
                reason: format!("descriptor id does not match type id '{}'", E::ENTITY_TYPE_ID),
            });
        }
        if self.types.contains_key(&entity_type) {
            return Err(StorageError::AlreadyRegistered(entity_type));
        }

        let fields = E::define_fields();
        check_keys(&descriptor, &fields)?;
        let table = TableSchema::build(&descriptor, &fields);

        info!(
            entity_type = %entity_type,
            table = %table.table,
            fields = fields.len(),
            "Entity type registered"
        );
        let registered = self.types.entry(entity_type).or_insert(RegisteredType {
            descriptor,
            define_fields: E::define_fields,
            fields,
            table,
        });
        Ok(&registered.table)
    }

    pub fn is_registered(&self, entity_type: &str) -> bool {
        self.types.contains_key(entity_type)
    }

    pub fn entity_type_ids(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn descriptor(&self, entity_type: &str) -> StorageResult<&EntityTypeDescriptor> {
        self.get(entity_type).map(|t| &t.descriptor)
    }

    /// Cached field definitions declared by the type itself.
    pub fn definitions(&self, entity_type: &str) -> StorageResult<&FieldDefinitions> {
        self.get(entity_type).map(|t| &t.fields)
    }

    /// Base fields followed by the type's own fields.
    pub fn all_definitions(&self, entity_type: &str) -> StorageResult<FieldDefinitions> {
        let t = self.get(entity_type)?;
        Ok(t.descriptor.base_field_definitions().merge(t.fields.clone()))
    }

    pub fn table_schema(&self, entity_type: &str) -> StorageResult<&TableSchema> {
        self.get(entity_type).map(|t| &t.table)
    }

    /// Drops every cached field definition and recomputes it from its type.
    pub fn rebuild(&mut self) {
        for (entity_type, t) in self.types.iter_mut() {
            t.rebuild();
            debug!(entity_type = %entity_type, "Field definitions rebuilt");
        }
    }

    fn get(&self, entity_type: &str) -> StorageResult<&RegisteredType> {
        self.types
            .get(entity_type)
            .ok_or_else(|| StorageError::UnknownEntityType(entity_type.to_string()))
    }
}

/// Label and owner keys must name declared fields.
fn check_keys(descriptor: &EntityTypeDescriptor, fields: &FieldDefinitions) -> StorageResult<()> {
    let declared = [
        ("label", descriptor.keys.label.as_deref()),
        ("owner", descriptor.keys.owner.as_deref()),
    ];
    for (role, key) in declared {
        if let Some(name) = key {
            if !fields.contains(name) {
                return Err(StorageError::InvalidDescriptor {
                    entity_type: descriptor.id.clone(),
                    reason: format!("{role} key '{name}' is not a declared field"),
                });
            }
        }
    }
    Ok(())
}
