//! Input widgets and the stock field presets.
//!
//! Widgets render a single input element. Presets ([`basic`], [`fancy`])
//! wrap widgets in a field layout and register the result under a tag.

pub mod basic;
pub mod fancy;
mod inputs;

pub use inputs::{Checkbox, HiddenInput, Input, PasswordInput, Select, Textarea};

use std::collections::BTreeMap;

use crate::descriptor::FieldDescriptor;
use crate::state::FieldAccessor;

/// Rendered HTML.
pub type Markup = String;

/// Attributes that can be applied to a widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttrs {
    /// HTML attributes, rendered in key order.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self {
            attrs: BTreeMap::new(),
        }
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Renders every attribute except `skip` as ` key="value"` pairs.
    pub fn to_html_except(&self, skip: &[&str]) -> String {
        self.attrs
            .iter()
            .filter(|(k, _)| !skip.contains(&k.as_str()))
            .map(|(k, v)| format!(r#" {k}="{}""#, html_escape(v)))
            .collect()
    }
}

/// Trait for widgets that render one HTML input.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The field name (used for the name attribute)
    /// * `value` - The current value (if any)
    /// * `attrs` - Additional HTML attributes
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Joins the present, non-blank class fragments with single spaces.
pub fn class_names<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the attributes shared by every bound input.
///
/// The input is disabled when the descriptor, its `disabled` option or the
/// form state says so.
pub fn bound_attrs(descriptor: &FieldDescriptor, field: &FieldAccessor<'_>) -> WidgetAttrs {
    let has_errors = field.has_errors();
    let mut attrs = WidgetAttrs::new().with("id", descriptor.dom_id());

    let class = class_names([
        descriptor.option_str("class"),
        has_errors.then_some("is-invalid"),
    ]);
    if !class.is_empty() {
        attrs.set("class", class);
    }
    if descriptor.disabled || descriptor.option_bool("disabled") || field.disabled() {
        attrs.set("disabled", "disabled");
    }
    if descriptor.required {
        attrs.set("required", "required");
    }
    if has_errors {
        attrs.set("aria-invalid", "true");
    }
    if let Some(autocomplete) = descriptor.option_str("autocomplete") {
        attrs.set("autocomplete", autocomplete);
    }
    attrs
}
