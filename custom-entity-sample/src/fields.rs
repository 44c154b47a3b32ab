use entitykit_model::{
    DefaultContext, DisplayContext, DisplayOptions, FieldDefinitions, FieldSpec, FieldType,
    LabelDisplay,
};
use serde_json::{Value, json};

pub const LABEL_MAX_LENGTH: u64 = 255;

/// Default owner of a new record: the user creating it.
pub fn get_default_entity_owner(ctx: &DefaultContext) -> Value {
    json!(ctx.account.get())
}

fn request_time(ctx: &DefaultContext) -> Value {
    json!(ctx.request_time.as_secs())
}

/// The fields of a Custom Entity Sample, in display order.
pub fn define_fields() -> FieldDefinitions {
    use DisplayContext::{Form, View};

    let mut fields = FieldDefinitions::new();

    fields.insert(
        "label",
        FieldSpec::create(FieldType::String)
            .label("Label")
            .required(true)
            .setting("max_length", LABEL_MAX_LENGTH)
            .display(Form, DisplayOptions::new("string_textfield", -5))
            .display_configurable(Form, true)
            .display(
                View,
                DisplayOptions::new("string", -5).with_label(LabelDisplay::Hidden),
            )
            .display_configurable(View, true),
    );

    fields.insert(
        "status",
        FieldSpec::create(FieldType::Boolean)
            .label("Status")
            .default_value(true)
            .setting("on_label", "Enabled")
            .display(
                Form,
                DisplayOptions::new("boolean_checkbox", 0).with_setting("display_label", false),
            )
            .display_configurable(Form, true)
            .display(
                View,
                DisplayOptions::new("boolean", 0)
                    .with_label(LabelDisplay::Above)
                    .with_setting("format", "enabled-disabled"),
            )
            .display_configurable(View, true),
    );

    fields.insert(
        "description",
        FieldSpec::create(FieldType::TextLong)
            .label("Description")
            .display(Form, DisplayOptions::new("text_textarea", 10))
            .display_configurable(Form, true)
            .display(
                View,
                DisplayOptions::new("text_default", 10).with_label(LabelDisplay::Above),
            )
            .display_configurable(View, true),
    );

    fields.insert(
        "uid",
        FieldSpec::create(FieldType::EntityReference)
            .label("Author")
            .setting("target_type", "user")
            .default_provider(get_default_entity_owner)
            .display(
                Form,
                DisplayOptions::new("entity_reference_autocomplete", 15)
                    .with_setting("match_operator", "CONTAINS")
                    .with_setting("size", 60)
                    .with_setting("placeholder", ""),
            )
            .display_configurable(Form, true)
            .display(
                View,
                DisplayOptions::new("author", 15).with_label(LabelDisplay::Above),
            )
            .display_configurable(View, true),
    );

    fields.insert(
        "created",
        FieldSpec::create(FieldType::Timestamp)
            .label("Authored on")
            .description("The time that the custom entity sample was created.")
            .default_provider(request_time)
            .display(Form, DisplayOptions::new("datetime_timestamp", 20))
            .display_configurable(Form, true)
            .display(
                View,
                DisplayOptions::new("timestamp", 20).with_label(LabelDisplay::Above),
            )
            .display_configurable(View, true),
    );

    fields.insert(
        "changed",
        FieldSpec::create(FieldType::Timestamp)
            .label("Changed")
            .description("The time that the custom entity sample was last edited.")
            .auto_update(),
    );

    fields
}
