//! Integration tests for the renderer registry and the form builder.

use kiln_forms::{
    build, FieldDescriptor, FieldRegistry, FormBuilder, FormDescriptor, FormError, FormHandle,
    AcceptAll, SubmitDescriptor,
};
use serde_json::json;

fn presets() -> Vec<(&'static str, FieldRegistry)> {
    vec![("basic", FieldRegistry::basic()), ("fancy", FieldRegistry::fancy())]
}

#[test]
fn every_registered_tag_renders_a_well_formed_descriptor() {
    for (preset, registry) in presets() {
        let handle = FormHandle::new(AcceptAll, json!({"field": "value"}));
        for tag in registry.tags() {
            let descriptor = FieldDescriptor::new("field", tag, "Label");
            let render = registry.resolve(tag).unwrap();
            let markup = render(&descriptor, &handle.field("field"));
            assert!(
                markup.contains(r#"name="field""#),
                "{preset}/{tag} did not render the input: {markup}"
            );
        }
    }
}

#[test]
fn unknown_tag_fails_before_any_markup() {
    let form = FormBuilder::new()
        .field(FieldDescriptor::text("username", "Username"))
        .field(FieldDescriptor::new("avatar", "file", "Avatar"))
        .field(FieldDescriptor::password("password", "Password"))
        .build();

    for (_, registry) in presets() {
        let handle = FormHandle::new(AcceptAll, json!({}));
        match build(&registry, &form, &handle) {
            Err(FormError::UnknownFieldType(tag)) => assert_eq!(tag, "file"),
            other => panic!("expected UnknownFieldType, got {other:?}"),
        }
    }
}

#[test]
fn custom_tag_is_one_registration() {
    let registry = FieldRegistry::basic().with_field("color", |d: &FieldDescriptor, f: &kiln_forms::FieldAccessor<'_>| {
        format!(r#"<input type="color" name="{}" value="{}">"#, d.name, f.text())
    });
    let form = FormBuilder::new()
        .field(FieldDescriptor::new("accent", "color", "Accent"))
        .build();
    let handle = FormHandle::new(AcceptAll, json!({"accent": "#ff0000"}));

    let rendered = build(&registry, &form, &handle).unwrap();
    assert_eq!(
        rendered.field("accent").unwrap().markup,
        r##"<input type="color" name="accent" value="#ff0000">"##
    );
}

#[test]
fn descriptors_load_from_json() {
    let form = FormDescriptor::from_json(
        r#"{
            "fields": [
                {"name": "name", "type": "text", "label": "Name", "required": true},
                {"name": "bio", "type": "textarea", "label": "Bio", "options": {"rows": 6}},
                {"name": "role", "type": "select", "label": "Role",
                 "options": {"choices": [["user", "User"], ["admin", "Admin"]]}}
            ],
            "submit": {"label": "Save", "allowDefaultValues": true}
        }"#,
    )
    .unwrap();
    let handle = FormHandle::new(AcceptAll, json!({"name": "", "bio": "", "role": "user"}));

    let rendered = build(&FieldRegistry::basic(), &form, &handle).unwrap();
    assert!(!rendered.submit_state.disabled);
    assert!(rendered.field("bio").unwrap().markup.contains(r#"rows="6""#));
    assert!(rendered.field("role").unwrap().markup.contains(r#"value="user" selected"#));
    assert!(rendered.submit.contains("Save"));
}

#[test]
fn build_does_not_touch_the_handle() {
    let form = FormBuilder::new()
        .field(FieldDescriptor::text("username", "Username"))
        .submit(SubmitDescriptor::new("Go"))
        .build();
    let handle = FormHandle::new(AcceptAll, json!({"username": "ada"}));
    let before = handle.values();

    build(&FieldRegistry::fancy(), &form, &handle).unwrap();

    assert_eq!(handle.values(), before);
    assert!(!handle.touched("username"));
    assert_eq!(handle.submit_attempts(), 0);
}
