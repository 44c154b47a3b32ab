use entitykit_model::{EntityKeys, EntityLabels, EntityTypeDescriptor, Handlers, LinkTemplates, PluralLabel};
use std::collections::BTreeMap;

pub const ENTITY_TYPE_ID: &str = "custom_entity_sample";

/// Config entity type whose records are this type's bundles.
pub const BUNDLE_ENTITY_TYPE: &str = "custom_entity_sample_type";

/// The Custom Entity Sample entity type.
pub fn descriptor() -> EntityTypeDescriptor {
    EntityTypeDescriptor {
        id: ENTITY_TYPE_ID.into(),
        labels: EntityLabels {
            label: "Custom Entity Sample".into(),
            collection: "Custom Entity Samples".into(),
            singular: "custom entity sample".into(),
            plural: "custom entity samples".into(),
            count: PluralLabel {
                singular: "@count custom entity samples".into(),
                plural: "@count custom entity samples".into(),
            },
            bundle_label: "Custom Entity Sample type".into(),
        },
        base_table: ENTITY_TYPE_ID.into(),
        keys: EntityKeys {
            id: "id".into(),
            uuid: Some("uuid".into()),
            bundle: Some("bundle".into()),
            label: Some("label".into()),
            owner: Some("uid".into()),
        },
        handlers: handlers(),
        links: links(),
        admin_permission: Some("administer custom_entity_sample types".into()),
        bundle_entity_type: Some(BUNDLE_ENTITY_TYPE.into()),
        field_ui_base_route: Some("entity.custom_entity_sample_type.edit_form".into()),
    }
}

fn handlers() -> Handlers {
    let forms = [
        ("add", "custom_entity_sample.form"),
        ("edit", "custom_entity_sample.form"),
        ("delete", "entity.content_delete_form"),
        ("delete-multiple-confirm", "entity.delete_multiple_form"),
    ];
    Handlers {
        list_builder: Some("custom_entity_sample.list_builder".into()),
        views_data: Some("views.entity_views_data".into()),
        access: Some("custom_entity_sample.access_control".into()),
        forms: to_map(&forms),
        route_providers: to_map(&[("html", "entity.admin_html_route_provider")]),
    }
}

fn links() -> LinkTemplates {
    [
        ("collection", "/admin/content/custom-entity-sample"),
        ("add-form", "/custom-entity-sample/add/{custom_entity_sample_type}"),
        ("add-page", "/custom-entity-sample/add"),
        ("canonical", "/custom-entity-sample/{custom_entity_sample}"),
        ("edit-form", "/custom-entity-sample/{custom_entity_sample}/edit"),
        ("delete-form", "/custom-entity-sample/{custom_entity_sample}/delete"),
        ("delete-multiple-form", "/admin/content/custom-entity-sample/delete-multiple"),
    ]
    .into_iter()
    .collect()
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
