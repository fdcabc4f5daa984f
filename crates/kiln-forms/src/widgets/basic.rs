//! Basic preset: Bootstrap 5 stacked fields.
//!
//! Each field renders as label, optional description, input, invalid
//! feedback and help text inside a `mb-3` wrapper.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::Div;

use super::{
    bound_attrs, class_names, Checkbox, HiddenInput, Input, Markup, PasswordInput, Select,
    Textarea, Widget, WidgetAttrs,
};
use crate::descriptor::{FieldDescriptor, SubmitDescriptor};
use crate::registry::{FieldRegistry, SubmitState};
use crate::state::FieldAccessor;

/// Returns a registry with the basic renderers.
pub fn registry() -> FieldRegistry {
    FieldRegistry::new()
        .with_field("text", text_input)
        .with_field("email", email_input)
        .with_field("password", password_input)
        .with_field("textarea", textarea)
        .with_field("select", select)
        .with_field("checkbox", checkbox)
        .with_field("hidden", hidden)
        .with_submit(submit_button)
}

fn field_shell(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>, input_html: &str) -> Markup {
    let id = descriptor.dom_id();
    let errors = field.errors();

    let required_marker = if descriptor.required { " *" } else { "" };
    let label_text = format!("{}{}", descriptor.label, required_marker);
    let label_el = html! {
        label.for_(#id).class("form-label") { #label_text }
    };

    let description = descriptor.description.clone();
    let help_text = descriptor.help_text.clone();
    let show_help = help_text.is_some() && errors.is_empty();

    html! { div.class("mb-3") }
        .raw(label_el.render())
        .when(description.is_some(), |d| {
            d.child::<Div, _>(|p| {
                p.class("form-text mt-0 mb-2")
                    .text(description.as_deref().unwrap_or(""))
            })
        })
        .raw(input_html)
        .children(&errors, |error, div: Element<Div>| {
            div.class("invalid-feedback d-block").text(error)
        })
        .when(show_help, |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .text(help_text.as_deref().unwrap_or(""))
            })
        })
        .render()
}

fn render_with(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>, widget: &dyn Widget) -> Markup {
    let attrs = bound_attrs(descriptor, field);
    let value = field.text();
    let input_html = widget.render(&descriptor.name, Some(&value), &attrs);
    field_shell(descriptor, field, &input_html)
}

/// Renders a `text` field.
pub fn text_input(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let widget = Input::new().placeholder(descriptor.option_str("placeholder"));
    render_with(descriptor, field, &widget)
}

/// Renders an `email` field.
pub fn email_input(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let widget = Input::email().placeholder(descriptor.option_str("placeholder"));
    render_with(descriptor, field, &widget)
}

/// Renders a `password` field with a reveal toggle.
pub fn password_input(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let mut widget = PasswordInput::new();
    if let Some(label) = descriptor.option_str("toggleLabel") {
        widget = widget.toggle_label(label);
    }
    render_with(descriptor, field, &widget)
}

/// Renders a `textarea` field.
pub fn textarea(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let widget = Textarea::new(descriptor.option_u64("rows").unwrap_or(4));
    render_with(descriptor, field, &widget)
}

/// Renders a `select` field from the `choices` option.
pub fn select(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let mut widget = Select::new(descriptor.choices());
    if descriptor.option_bool("noBlank") {
        widget = widget.no_blank();
    }
    render_with(descriptor, field, &widget)
}

/// Renders a `checkbox` field; the label sits next to the box.
pub fn checkbox(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let id = descriptor.dom_id();
    let attrs = bound_attrs(descriptor, field);
    let widget = if descriptor.option_bool("switch") {
        Checkbox::switch()
    } else {
        Checkbox::new()
    };
    let value = if field.checked() { "true" } else { "false" };
    let input_html = widget.render(&descriptor.name, Some(value), &attrs);

    let wrapper_class = class_names([
        Some("form-check mb-3"),
        descriptor.option_bool("switch").then_some("form-switch"),
    ]);
    let label_text = descriptor.label.clone();
    let label_el = html! {
        label.for_(#id).class("form-check-label") { #label_text }
    };
    let errors = field.errors();
    let help_text = descriptor.help_text.clone();
    let show_help = help_text.is_some() && errors.is_empty();

    html! { div.class(#wrapper_class) }
        .raw(&input_html)
        .raw(label_el.render())
        .children(&errors, |error, div: Element<Div>| {
            div.class("invalid-feedback d-block").text(error)
        })
        .when(show_help, |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .text(help_text.as_deref().unwrap_or(""))
            })
        })
        .render()
}

/// Renders a `hidden` field without any layout.
pub fn hidden(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> Markup {
    let value = field.text();
    HiddenInput.render(&descriptor.name, Some(&value), &WidgetAttrs::new())
}

/// Renders the submit button.
pub fn submit_button(submit: &SubmitDescriptor, state: SubmitState) -> Markup {
    let class = class_names([Some("btn btn-primary"), submit.class.as_deref()]);
    let label = submit.label.clone();

    html! {
        button.type_("submit").class(#class) { #label }
    }
    .when(state.disabled, |b| b.attr("disabled", "disabled"))
    .when(state.pending, |b| b.attr("aria-busy", "true"))
    .render()
}
