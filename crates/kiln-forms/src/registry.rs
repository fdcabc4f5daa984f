//! Field renderer registry.
//!
//! A flat map from field-type tag to render function. Adding a field type is
//! one [`FieldRegistry::register`] call.

use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::{FieldDescriptor, SubmitDescriptor};
use crate::error::{FormError, Result};
use crate::state::FieldAccessor;
use crate::widgets::{self, Markup};

/// Renders one field bound to a form handle.
pub type RenderFn = Arc<dyn Fn(&FieldDescriptor, &FieldAccessor<'_>) -> Markup + Send + Sync>;

/// Renders the submit control.
pub type SubmitRenderFn = Arc<dyn Fn(&SubmitDescriptor, SubmitState) -> Markup + Send + Sync>;

/// State of the submit control at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitState {
    /// The control cannot be used.
    pub disabled: bool,
    /// A submission is in flight.
    pub pending: bool,
}

/// Tag -> renderer mapping plus the form wrapper class and submit renderer.
#[derive(Clone)]
pub struct FieldRegistry {
    renderers: HashMap<String, RenderFn>,
    submit: SubmitRenderFn,
    form_class: String,
}

impl std::fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("tags", &self.tags())
            .field("form_class", &self.form_class)
            .finish_non_exhaustive()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRegistry {
    /// Creates a registry with no field renderers and the basic submit button.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
            submit: Arc::new(widgets::basic::submit_button),
            form_class: String::new(),
        }
    }

    /// The basic Bootstrap preset.
    pub fn basic() -> Self {
        widgets::basic::registry()
    }

    /// The card-style preset.
    pub fn fancy() -> Self {
        widgets::fancy::registry()
    }

    /// Associates `tag` with `render`, returning the renderer it replaces.
    pub fn register<F>(&mut self, tag: impl Into<String>, render: F) -> Option<RenderFn>
    where
        F: Fn(&FieldDescriptor, &FieldAccessor<'_>) -> Markup + Send + Sync + 'static,
    {
        self.renderers.insert(tag.into(), Arc::new(render))
    }

    /// Builder form of [`FieldRegistry::register`].
    #[must_use]
    pub fn with_field<F>(mut self, tag: impl Into<String>, render: F) -> Self
    where
        F: Fn(&FieldDescriptor, &FieldAccessor<'_>) -> Markup + Send + Sync + 'static,
    {
        self.register(tag, render);
        self
    }

    /// Replaces the submit renderer.
    #[must_use]
    pub fn with_submit<F>(mut self, render: F) -> Self
    where
        F: Fn(&SubmitDescriptor, SubmitState) -> Markup + Send + Sync + 'static,
    {
        self.submit = Arc::new(render);
        self
    }

    /// Sets the classes of the `<form>` element.
    #[must_use]
    pub fn with_form_class(mut self, class: impl Into<String>) -> Self {
        self.form_class = class.into();
        self
    }

    /// Returns the renderer registered for `tag`.
    pub fn resolve(&self, tag: &str) -> Result<&RenderFn> {
        self.renderers
            .get(tag)
            .ok_or_else(|| FormError::UnknownFieldType(tag.to_string()))
    }

    /// Returns whether `tag` is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.renderers.contains_key(tag)
    }

    /// Returns the registered tags in sorted order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Returns the submit renderer.
    pub fn submit_renderer(&self) -> &SubmitRenderFn {
        &self.submit
    }

    /// Returns the form wrapper classes.
    pub fn form_class(&self) -> &str {
        &self.form_class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AcceptAll;
    use crate::state::FormHandle;
    use serde_json::json;

    #[test]
    fn test_resolve_unknown_tag() {
        let registry = FieldRegistry::new();
        let err = registry.resolve("color").err().unwrap();
        assert!(matches!(err, FormError::UnknownFieldType(tag) if tag == "color"));
    }

    #[test]
    fn test_register_custom_tag() {
        let mut registry = FieldRegistry::new();
        assert!(registry
            .register("badge", |d: &FieldDescriptor, f: &FieldAccessor<'_>| {
                format!("<span>{}={}</span>", d.label, f.text())
            })
            .is_none());

        let form = FormHandle::new(AcceptAll, json!({"plan": "pro"}));
        let descriptor = FieldDescriptor::new("plan", "badge", "Plan");
        let render = registry.resolve("badge").unwrap();
        assert_eq!(render(&descriptor, &form.field("plan")), "<span>Plan=pro</span>");
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = FieldRegistry::basic();
        let previous = registry.register("text", |_: &FieldDescriptor, _: &FieldAccessor<'_>| String::new());
        assert!(previous.is_some());
    }

    #[test]
    fn test_basic_tags() {
        assert_eq!(
            FieldRegistry::basic().tags(),
            ["checkbox", "email", "hidden", "password", "select", "text", "textarea"]
        );
    }
}
