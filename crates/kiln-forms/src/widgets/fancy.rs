//! Fancy preset: each field sits in its own bordered card.
//!
//! The card body holds the label, the description and the input; the footer
//! shows the first error or, when there is none, the field's info text.

use ironhtml::html;
use ironhtml_elements::Div;

use super::{bound_attrs, class_names, Checkbox, Input, Markup, PasswordInput, Widget};
use crate::descriptor::{FieldDescriptor, SubmitDescriptor};
use crate::registry::{FieldRegistry, SubmitState};
use crate::state::FieldAccessor;

/// Classes applied to the `<form>` element.
pub const FORM_CLASS: &str = "space-y-6 lg:max-w-lg";

/// Returns a registry with the fancy renderers.
pub fn registry() -> FieldRegistry {
    FieldRegistry::new()
        .with_field("text", text_input)
        .with_field("password", password_input)
        .with_field("checkbox", checkbox)
        .with_submit(submit_button)
        .with_form_class(FORM_CLASS)
}

fn description_html(descriptor: &FieldDescriptor) -> Markup {
    let text = descriptor.description.clone().unwrap_or_default();
    html! {
        p.class("text-sm text-muted-foreground") { #text }
    }
    .render()
}

fn label_html(descriptor: &FieldDescriptor, class: &str) -> Markup {
    let id = descriptor.dom_id();
    let label_text = descriptor.label.clone();
    let class = class_names([Some("form-label"), Some(class)]);
    html! {
        label.for_(#id).class(#class) { #label_text }
    }
    .render()
}

/// The footer line: first error, else the info placeholder.
fn info_html(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let errors = field.errors();
    match errors.first() {
        Some(error) => {
            let error = error.clone();
            html! {
                p.class("text-sm font-medium text-destructive") { #error }
            }
            .attr("role", "alert")
            .render()
        }
        None => {
            let info = descriptor.help_text.clone().unwrap_or_default();
            html! {
                p.class("text-sm text-muted-foreground") { #info }
            }
            .render()
        }
    }
}

fn card(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>, body: &str) -> Markup {
    let class = class_names([Some("rounded-md border"), descriptor.option_str("cardClass")]);
    let footer = info_html(descriptor, field);

    html! { div.class(#class) }
        .child::<Div, _>(|b| b.class("space-y-4 p-6").raw(body))
        .child::<Div, _>(|f| f.class("border-t px-6 py-4").raw(&footer))
        .render()
}

fn input_card(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>, widget: &dyn Widget) -> Markup {
    let attrs = bound_attrs(descriptor, field);
    let value = field.text();
    let body = [
        label_html(descriptor, ""),
        description_html(descriptor),
        widget.render(&descriptor.name, Some(&value), &attrs),
    ]
    .concat();
    card(descriptor, field, &body)
}

/// Renders a `text` field card.
pub fn text_input(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let widget = Input::new().placeholder(descriptor.option_str("placeholder"));
    input_card(descriptor, field, &widget)
}

/// Renders a `password` field card.
pub fn password_input(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let mut widget = PasswordInput::new();
    if let Some(label) = descriptor.option_str("toggleLabel") {
        widget = widget.toggle_label(label);
    }
    input_card(descriptor, field, &widget)
}

/// Renders a `checkbox` field card; the description reads as the box label.
pub fn checkbox(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let attrs = bound_attrs(descriptor, field);
    let value = if field.checked() { "true" } else { "false" };
    let input = Checkbox::new().render(&descriptor.name, Some(value), &attrs);
    let row = html! { div.class("flex flex-row-reverse items-center justify-end gap-3") }
        .raw(description_html(descriptor))
        .raw(&input)
        .render();
    let body = [label_html(descriptor, "text-xl font-semibold"), row].concat();
    card(descriptor, field, &body)
}

/// Renders the full-width submit button.
pub fn submit_button(submit: &SubmitDescriptor, state: SubmitState) -> Markup {
    let class = class_names([Some("btn btn-primary w-full"), submit.class.as_deref()]);
    let label = submit.label.clone();

    html! {
        button.type_("submit").class(#class) { #label }
    }
    .when(state.disabled, |b| b.attr("disabled", "disabled"))
    .when(state.pending, |b| b.attr("aria-busy", "true"))
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AcceptAll, FieldRule, ObjectSchema};
    use crate::state::FormHandle;
    use serde_json::json;

    #[test]
    fn test_text_card_layout() {
        let form = FormHandle::new(AcceptAll, json!({"name": "Ada"}));
        let descriptor = FieldDescriptor::text("name", "Display name")
            .description("This is how others see you")
            .help_text("Max 64 characters")
            .option("cardClass", "mt-4");

        let html = text_input(&descriptor, &form.field("name"));
        assert!(html.contains("rounded-md border mt-4"));
        assert!(html.contains("space-y-4 p-6"));
        assert!(html.contains("border-t px-6 py-4"));
        assert!(html.contains("This is how others see you"));
        assert!(html.contains("Max 64 characters"));
        assert!(html.contains(r#"value="Ada""#));
    }

    #[test]
    fn test_footer_shows_first_error_instead_of_info() {
        let form = FormHandle::new(
            ObjectSchema::new().field("currentPassword", FieldRule::string()),
            json!({}),
        );
        assert!(form.validate().is_err());
        let descriptor = FieldDescriptor::password("currentPassword", "Current password")
            .help_text("Enter your current password");

        let html = password_input(&descriptor, &form.field("currentPassword"));
        assert!(html.contains("text-destructive"));
        assert!(html.contains("This field is required."));
        assert!(!html.contains("Enter your current password"));
    }

    #[test]
    fn test_checkbox_card() {
        let form = FormHandle::new(AcceptAll, json!({"revokeOtherSessions": true}));
        let descriptor = FieldDescriptor::checkbox("revokeOtherSessions", "Sessions")
            .description("Sign out of all other devices");

        let html = checkbox(&descriptor, &form.field("revokeOtherSessions"));
        assert!(html.contains("text-xl font-semibold"));
        assert!(html.contains("flex-row-reverse"));
        assert!(html.contains(" checked"));
    }

    #[test]
    fn test_registry_tags() {
        let registry = registry();
        assert_eq!(registry.tags(), ["checkbox", "password", "text"]);
        assert_eq!(registry.form_class(), FORM_CLASS);
    }
}
