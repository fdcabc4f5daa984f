//! Declarative field and form descriptors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Declarative description of one form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Dotted path into the form values.
    pub name: String,
    /// Renderer tag, resolved through a [`crate::FieldRegistry`].
    #[serde(rename = "type")]
    pub field_type: String,
    /// Field label.
    #[serde(default)]
    pub label: String,
    /// Longer description shown with the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Help text; shown where errors would otherwise appear.
    #[serde(default, alias = "info", skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Whether the field is marked as required in the UI.
    #[serde(default)]
    pub required: bool,
    /// Whether the field is disabled.
    #[serde(default)]
    pub disabled: bool,
    /// Renderer-specific options, forwarded untouched.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl FieldDescriptor {
    /// Creates a descriptor with the given renderer tag.
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            label: label.into(),
            description: None,
            help_text: None,
            required: false,
            disabled: false,
            options: Map::new(),
        }
    }

    /// A single-line text input.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, "text", label)
    }

    /// An email input.
    pub fn email(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, "email", label)
    }

    /// A password input with a reveal toggle.
    pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, "password", label)
    }

    /// A checkbox.
    pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, "checkbox", label)
    }

    /// A multi-line text input.
    pub fn textarea(name: impl Into<String>, label: impl Into<String>, rows: u64) -> Self {
        Self::new(name, "textarea", label).option("rows", rows)
    }

    /// A select with `(value, label)` choices.
    pub fn select<V, L>(
        name: impl Into<String>,
        label: impl Into<String>,
        choices: impl IntoIterator<Item = (V, L)>,
    ) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        let choices: Vec<Value> = choices
            .into_iter()
            .map(|(value, label)| Value::Array(vec![Value::String(value.into()), Value::String(label.into())]))
            .collect();
        Self::new(name, "select", label).option("choices", choices)
    }

    /// A hidden input.
    pub fn hidden(name: impl Into<String>) -> Self {
        Self::new(name, "hidden", "")
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Disables the field.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Sets a renderer option.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns a string option.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(Value::as_str)
    }

    /// Returns a boolean option, `false` when absent.
    pub fn option_bool(&self, key: &str) -> bool {
        self.options
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Returns an unsigned integer option.
    pub fn option_u64(&self, key: &str) -> Option<u64> {
        self.options.get(key).and_then(Value::as_u64)
    }

    /// Returns `(value, label)` choices from the `choices` option.
    ///
    /// Accepts `[value, label]` pairs, `{"value", "label"}` objects, or bare
    /// strings used as both.
    pub fn choices(&self) -> Vec<(String, String)> {
        let Some(Value::Array(items)) = self.options.get("choices") else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some((s.clone(), s.clone())),
                Value::Array(pair) => match pair.as_slice() {
                    [Value::String(v), Value::String(l)] => Some((v.clone(), l.clone())),
                    _ => None,
                },
                Value::Object(obj) => {
                    let value = obj.get("value")?.as_str()?;
                    let label = obj.get("label").and_then(Value::as_str).unwrap_or(value);
                    Some((value.to_string(), label.to_string()))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns the DOM id derived from the field path.
    pub fn dom_id(&self) -> String {
        format!("id_{}", self.name.replace('.', "_"))
    }
}

/// Options for the submit control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDescriptor {
    /// Button text.
    #[serde(default = "default_submit_label")]
    pub label: String,
    /// Extra classes for the button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Whether the form may be submitted with untouched default values.
    #[serde(default)]
    pub allow_default_values: bool,
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

impl Default for SubmitDescriptor {
    fn default() -> Self {
        Self {
            label: default_submit_label(),
            class: None,
            allow_default_values: false,
        }
    }
}

impl SubmitDescriptor {
    /// Creates submit options with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Allows submitting default values.
    #[must_use]
    pub fn allow_default_values(mut self, allow: bool) -> Self {
        self.allow_default_values = allow;
        self
    }

    /// Sets extra button classes.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// Ordered fields plus submit options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDescriptor {
    /// Fields in rendering order.
    pub fields: Vec<FieldDescriptor>,
    /// Submit control options.
    #[serde(default)]
    pub submit: SubmitDescriptor,
}

impl FormDescriptor {
    /// Parses a descriptor from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the field with the given name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A simple form builder for assembling descriptors in code.
#[derive(Debug, Default)]
pub struct FormBuilder {
    fields: Vec<FieldDescriptor>,
    submit: SubmitDescriptor,
}

impl FormBuilder {
    /// Creates a new form builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the form.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the submit options.
    #[must_use]
    pub fn submit(mut self, submit: SubmitDescriptor) -> Self {
        self.submit = submit;
        self
    }

    /// Returns the form descriptor.
    pub fn build(self) -> FormDescriptor {
        FormDescriptor {
            fields: self.fields,
            submit: self.submit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_builder() {
        let field = FieldDescriptor::text("username", "Username")
            .required()
            .help_text("Choose a unique username")
            .option("placeholder", "ada");

        assert_eq!(field.name, "username");
        assert_eq!(field.field_type, "text");
        assert!(field.required);
        assert_eq!(field.option_str("placeholder"), Some("ada"));
        assert_eq!(field.help_text.as_deref(), Some("Choose a unique username"));
    }

    #[test]
    fn test_form_builder_keeps_order() {
        let form = FormBuilder::new()
            .field(FieldDescriptor::text("username", "Username"))
            .field(FieldDescriptor::password("password", "Password"))
            .submit(SubmitDescriptor::new("Sign in"))
            .build();

        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.fields[0].name, "username");
        assert_eq!(form.fields[1].name, "password");
        assert_eq!(form.submit.label, "Sign in");
    }

    #[test]
    fn test_descriptor_from_json() {
        let form = FormDescriptor::from_json(
            r#"{
                "fields": [
                    {"type": "text", "name": "username", "label": "Username"},
                    {"type": "checkbox", "name": "rememberMe", "label": "Remember me",
                     "info": "Stay signed in on this device"}
                ],
                "submit": {"label": "Sign in", "allowDefaultValues": true}
            }"#,
        )
        .unwrap();

        assert_eq!(form.fields[1].field_type, "checkbox");
        assert_eq!(
            form.fields[1].help_text.as_deref(),
            Some("Stay signed in on this device")
        );
        assert!(form.submit.allow_default_values);
        assert!(form.field("username").is_some());
    }

    #[test]
    fn test_submit_defaults_when_omitted() {
        let form = FormDescriptor::from_json(r#"{"fields": []}"#).unwrap();
        assert_eq!(form.submit.label, "Submit");
        assert!(!form.submit.allow_default_values);
    }

    #[test]
    fn test_choices_shapes() {
        let field = FieldDescriptor::select("role", "Role", [("user", "User"), ("admin", "Admin")]);
        assert_eq!(
            field.choices(),
            vec![
                ("user".to_string(), "User".to_string()),
                ("admin".to_string(), "Admin".to_string())
            ]
        );

        let field = FieldDescriptor::new("lang", "select", "Language").option(
            "choices",
            serde_json::json!(["en", {"value": "fr", "label": "Français"}]),
        );
        assert_eq!(field.choices()[0], ("en".to_string(), "en".to_string()));
        assert_eq!(field.choices()[1].1, "Français");
    }

    #[test]
    fn test_dom_id_replaces_dots() {
        assert_eq!(FieldDescriptor::text("profile.name", "Name").dom_id(), "id_profile_name");
    }
}
