use custom_entity_sample::{
    BUNDLE_ENTITY_TYPE, CustomEntitySample, ENTITY_TYPE_ID, descriptor, register,
};
use entitykit_model::{ContentEntity, FieldType};
use entitykit_storage::{ColumnType, EntityTypeRegistry};
use pretty_assertions::assert_eq;

#[test]
fn identity_and_table() {
    let d = descriptor();
    assert_eq!(d.id, "custom_entity_sample");
    assert_eq!(d.id, ENTITY_TYPE_ID);
    assert_eq!(CustomEntitySample::ENTITY_TYPE_ID, ENTITY_TYPE_ID);
    assert_eq!(d.base_table, "custom_entity_sample");
    assert_eq!(d.bundle_entity_type.as_deref(), Some(BUNDLE_ENTITY_TYPE));
    assert_eq!(
        d.admin_permission.as_deref(),
        Some("administer custom_entity_sample types")
    );
    assert_eq!(
        d.field_ui_base_route.as_deref(),
        Some("entity.custom_entity_sample_type.edit_form")
    );
}

#[test]
fn entity_keys() {
    let keys = descriptor().keys;
    assert_eq!(keys.id, "id");
    assert_eq!(keys.uuid.as_deref(), Some("uuid"));
    assert_eq!(keys.bundle.as_deref(), Some("bundle"));
    assert_eq!(keys.label.as_deref(), Some("label"));
    assert_eq!(keys.owner.as_deref(), Some("uid"));
}

#[test]
fn labels() {
    let labels = descriptor().labels;
    assert_eq!(labels.label, "Custom Entity Sample");
    assert_eq!(labels.collection, "Custom Entity Samples");
    assert_eq!(labels.singular, "custom entity sample");
    assert_eq!(labels.plural, "custom entity samples");
    assert_eq!(labels.bundle_label, "Custom Entity Sample type");
    assert_eq!(labels.count.format(3), "3 custom entity samples");
}

#[test]
fn handlers_are_declared() {
    let handlers = descriptor().handlers;
    assert!(handlers.list_builder.is_some());
    assert!(handlers.views_data.is_some());
    assert!(handlers.access.is_some());
    assert_eq!(handlers.form("add"), handlers.form("edit"));
    for op in ["add", "edit", "delete", "delete-multiple-confirm"] {
        assert!(handlers.form(op).is_some(), "missing {op} form");
    }
    assert!(handlers.route_providers.contains_key("html"));
}

#[test]
fn link_templates() {
    let d = descriptor();
    assert_eq!(d.links.len(), 7);
    assert_eq!(
        d.link_url("canonical", &[("custom_entity_sample", "12")]).unwrap(),
        "/custom-entity-sample/12"
    );
    assert_eq!(
        d.link_url("edit-form", &[("custom_entity_sample", "12")]).unwrap(),
        "/custom-entity-sample/12/edit"
    );
    assert_eq!(
        d.link_url("delete-form", &[("custom_entity_sample", "12")]).unwrap(),
        "/custom-entity-sample/12/delete"
    );
    assert_eq!(
        d.link_url("add-form", &[("custom_entity_sample_type", "basic")]).unwrap(),
        "/custom-entity-sample/add/basic"
    );
    assert_eq!(d.link_url("add-page", &[]).unwrap(), "/custom-entity-sample/add");
    assert_eq!(
        d.link_url("collection", &[]).unwrap(),
        "/admin/content/custom-entity-sample"
    );
    assert_eq!(
        d.link_url("delete-multiple-form", &[]).unwrap(),
        "/admin/content/custom-entity-sample/delete-multiple"
    );
}

// ── Registration ─────────────────────────────────────────────────

#[test]
fn registers_with_host() {
    let mut registry = EntityTypeRegistry::new();
    let table = register(&mut registry).unwrap();
    let columns: Vec<_> = table.column_names().map(str::to_string).collect();
    assert_eq!(
        columns,
        vec![
            "id",
            "uuid",
            "bundle",
            "label",
            "status",
            "description__value",
            "description__format",
            "uid",
            "created",
            "changed",
        ]
    );
}

#[test]
fn backing_table_column_types() {
    let mut registry = EntityTypeRegistry::new();
    let table = register(&mut registry).unwrap().clone();
    assert_eq!(table.table, "custom_entity_sample");
    let label = table.column("label").unwrap();
    assert_eq!(label.column_type, ColumnType::Varchar(255));
    assert!(label.not_null);
    assert_eq!(table.column("uid").unwrap().column_type, ColumnType::Integer);
    assert_eq!(table.column("changed").unwrap().column_type, ColumnType::BigInt);
    assert!(table
        .to_create_sql()
        .contains("  label VARCHAR(255) NOT NULL"));
}

#[test]
fn bundle_base_field_references_bundle_type() {
    let mut registry = EntityTypeRegistry::new();
    register(&mut registry).unwrap();
    let all = registry.all_definitions(ENTITY_TYPE_ID).unwrap();
    let bundle = all.get("bundle").unwrap();
    assert_eq!(bundle.field_type, FieldType::EntityReference);
    assert_eq!(bundle.target_type(), Some(BUNDLE_ENTITY_TYPE));
    assert_eq!(all.len(), 9);
}

#[test]
fn double_registration_fails() {
    let mut registry = EntityTypeRegistry::new();
    register(&mut registry).unwrap();
    assert!(register(&mut registry).is_err());
}
