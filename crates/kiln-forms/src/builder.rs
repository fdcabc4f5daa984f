//! Form builder: descriptors + registry + handle -> rendered form.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Li, Ul};
use tracing::{debug, warn};

use crate::descriptor::FormDescriptor;
use crate::error::Result;
use crate::registry::{FieldRegistry, RenderFn, SubmitState};
use crate::state::FormHandle;
use crate::widgets::Markup;

/// One rendered field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    /// Field path.
    pub name: String,
    /// Renderer tag the field was resolved through.
    pub field_type: String,
    /// Field markup.
    pub markup: Markup,
}

/// The rendered fields of a form, in declaration order, plus the submit
/// control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedForm {
    /// Rendered fields.
    pub fields: Vec<RenderedField>,
    /// Submit control markup.
    pub submit: Markup,
    /// Submit control state.
    pub submit_state: SubmitState,
    /// Errors not tied to a field.
    pub non_field_errors: Vec<String>,
    /// Classes of the `<form>` element.
    pub form_class: String,
}

impl RenderedForm {
    /// Returns the rendered field with the given name.
    pub fn field(&self, name: &str) -> Option<&RenderedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Renders the complete `<form>` element.
    pub fn render(&self, action: &str, method: &str) -> String {
        let mut form = html! {
            form.action(#action).method(#method)
        };

        if !self.form_class.is_empty() {
            form = form.class(&self.form_class);
        }

        if !self.non_field_errors.is_empty() {
            form = form.child::<Div, _>(|d| {
                d.class("alert alert-danger")
                    .attr("role", "alert")
                    .child::<Ul, _>(|ul| {
                        ul.class("mb-0").children(
                            self.non_field_errors.iter(),
                            |e, li: Element<Li>| li.text(e),
                        )
                    })
            });
        }

        for field in &self.fields {
            form = form.child::<Div, _>(|d| d.raw(&field.markup));
        }

        form = form.child::<Div, _>(|d| d.raw(&self.submit));

        form.render()
    }
}

/// Builds the UI for `form`, binding every field to `handle`.
///
/// Every tag is resolved before anything is rendered, so an unknown tag
/// fails the whole build. The handle is only read.
pub fn build(
    registry: &FieldRegistry,
    form: &FormDescriptor,
    handle: &FormHandle,
) -> Result<RenderedForm> {
    let renderers: Vec<&RenderFn> = form
        .fields
        .iter()
        .map(|field| {
            registry.resolve(&field.field_type).inspect_err(|_| {
                warn!(
                    field = %field.name,
                    field_type = %field.field_type,
                    "no renderer registered for field type"
                );
            })
        })
        .collect::<Result<_>>()?;

    let fields = form
        .fields
        .iter()
        .zip(renderers)
        .map(|(descriptor, render)| RenderedField {
            name: descriptor.name.clone(),
            field_type: descriptor.field_type.clone(),
            markup: render(descriptor, &handle.field(&descriptor.name)),
        })
        .collect();

    let pending = handle.is_submitting();
    let submit_state = SubmitState {
        disabled: pending || (!form.submit.allow_default_values && handle.is_default()),
        pending,
    };
    let submit = (registry.submit_renderer())(&form.submit, submit_state);

    debug!(fields = form.fields.len(), ?submit_state, "form built");

    Ok(RenderedForm {
        fields,
        submit,
        submit_state,
        non_field_errors: handle.non_field_errors(),
        form_class: registry.form_class().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor, FormBuilder, SubmitDescriptor};
    use crate::error::FormError;
    use crate::schema::AcceptAll;
    use serde_json::json;

    fn sign_in_form(allow_defaults: bool) -> FormDescriptor {
        FormBuilder::new()
            .field(FieldDescriptor::text("username", "Username"))
            .field(FieldDescriptor::password("password", "Password"))
            .submit(SubmitDescriptor::new("Sign in").allow_default_values(allow_defaults))
            .build()
    }

    #[test]
    fn test_fields_render_in_order() {
        let handle = FormHandle::new(AcceptAll, json!({"username": "", "password": ""}));
        let rendered = build(&FieldRegistry::basic(), &sign_in_form(false), &handle).unwrap();
        let names: Vec<_> = rendered.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["username", "password"]);
        assert!(rendered.field("password").unwrap().markup.contains(r#"type="password""#));
    }

    #[test]
    fn test_unknown_tag_fails_build() {
        let form = FormBuilder::new()
            .field(FieldDescriptor::text("username", "Username"))
            .field(FieldDescriptor::new("color", "color-picker", "Colour"))
            .build();
        let handle = FormHandle::new(AcceptAll, json!({}));

        let err = build(&FieldRegistry::basic(), &form, &handle).unwrap_err();
        assert!(matches!(err, FormError::UnknownFieldType(tag) if tag == "color-picker"));
    }

    #[test]
    fn test_fancy_rejects_basic_only_tags() {
        let form = FormBuilder::new()
            .field(FieldDescriptor::email("email", "Email"))
            .build();
        let handle = FormHandle::new(AcceptAll, json!({}));
        assert!(build(&FieldRegistry::fancy(), &form, &handle).is_err());
    }

    #[test]
    fn test_submit_disabled_while_values_are_defaults() {
        let handle = FormHandle::new(AcceptAll, json!({"username": "", "password": ""}));
        let registry = FieldRegistry::basic();

        let rendered = build(&registry, &sign_in_form(false), &handle).unwrap();
        assert!(rendered.submit_state.disabled);

        let rendered = build(&registry, &sign_in_form(true), &handle).unwrap();
        assert!(!rendered.submit_state.disabled);

        handle.set_value("username", "ada");
        let rendered = build(&registry, &sign_in_form(false), &handle).unwrap();
        assert!(!rendered.submit_state.disabled);
        assert!(!rendered.submit.contains("disabled"));
    }

    #[test]
    fn test_render_full_form() {
        let handle = FormHandle::new(AcceptAll, json!({"username": "ada"}));
        handle.set_non_field_errors(vec!["Invalid username or password".to_string()]);
        let rendered = build(&FieldRegistry::fancy(), &sign_in_form(false), &handle).unwrap();

        let html = rendered.render("/auth/sign-in", "post");
        assert!(html.contains(r#"action="/auth/sign-in""#));
        assert!(html.contains("space-y-6 lg:max-w-lg"));
        assert!(html.contains("alert alert-danger"));
        assert!(html.contains("Invalid username or password"));
        assert!(html.find("username").unwrap() < html.find("Sign in").unwrap());
    }
}
