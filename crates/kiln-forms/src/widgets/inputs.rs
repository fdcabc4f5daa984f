//! Input widgets.

use super::{class_names, html_escape, Widget, WidgetAttrs};

/// The escaped `id` attribute value.
fn dom_id(name: &str, attrs: &WidgetAttrs) -> String {
    let id = attrs
        .get("id")
        .cloned()
        .unwrap_or_else(|| format!("id_{}", name.replace('.', "_")));
    html_escape(&id)
}

/// Single-line input (`text`, `email`, `password`, `number`, ...).
#[derive(Debug, Clone)]
pub struct Input {
    /// The HTML input type.
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            placeholder: None,
        }
    }
}

impl Input {
    /// Creates a text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input of the given type.
    pub fn of_type(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
            ..Self::default()
        }
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self::of_type("email")
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: Option<impl Into<String>>) -> Self {
        self.placeholder = text.map(Into::into);
        self
    }
}

impl Widget for Input {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .filter(|v| !v.is_empty())
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        let class = class_names([Some("form-control"), attrs.get("class").map(String::as_str)]);
        let extra_attrs = attrs.to_html_except(&["class", "id"]);

        format!(
            r#"<input type="{}" class="{class}" id="{}" name="{}"{value_attr}{placeholder_attr}{extra_attrs}>"#,
            self.input_type,
            dom_id(name, attrs),
            html_escape(name),
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Password input with a show/hide toggle button.
#[derive(Debug, Clone)]
pub struct PasswordInput {
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Accessible label of the toggle button.
    pub toggle_label: String,
}

impl PasswordInput {
    /// Creates a password input.
    pub fn new() -> Self {
        Self {
            placeholder: None,
            toggle_label: "Show password".to_string(),
        }
    }

    /// Sets the toggle button label.
    #[must_use]
    pub fn toggle_label(mut self, label: impl Into<String>) -> Self {
        self.toggle_label = label.into();
        self
    }
}

impl Default for PasswordInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for PasswordInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let id = dom_id(name, attrs);
        let input = Input {
            input_type: "password".to_string(),
            placeholder: self.placeholder.clone(),
        }
        .render(name, value, attrs);
        let disabled = if attrs.get("disabled").is_some() {
            " disabled"
        } else {
            ""
        };

        format!(
            r#"<div class="input-group">{input}<button type="button" class="btn btn-outline-secondary" data-toggle-password="{id}" aria-label="{}"{disabled}>&#128065;</button></div>"#,
            html_escape(&self.toggle_label)
        )
    }

    fn input_type(&self) -> &str {
        "password"
    }
}

/// Multi-line text input.
#[derive(Debug, Clone)]
pub struct Textarea {
    /// Number of rows.
    pub rows: u64,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for Textarea {
    fn default() -> Self {
        Self {
            rows: 4,
            placeholder: None,
        }
    }
}

impl Textarea {
    /// Creates a new textarea with the specified rows.
    pub fn new(rows: u64) -> Self {
        Self {
            rows,
            placeholder: None,
        }
    }
}

impl Widget for Textarea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let content = value.map(html_escape).unwrap_or_default();
        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();
        let class = class_names([Some("form-control"), attrs.get("class").map(String::as_str)]);
        let extra_attrs = attrs.to_html_except(&["class", "id"]);

        format!(
            r#"<textarea class="{class}" id="{}" name="{}" rows="{}"{placeholder_attr}{extra_attrs}>{content}</textarea>"#,
            dom_id(name, attrs),
            html_escape(name),
            self.rows,
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Dropdown select.
#[derive(Debug, Clone)]
pub struct Select {
    /// Available choices (value, label).
    pub choices: Vec<(String, String)>,
    /// Whether to include an empty option.
    pub include_blank: bool,
    /// Label for blank option.
    pub blank_label: String,
}

impl Select {
    /// Creates a new select with the given choices.
    pub fn new(choices: Vec<(String, String)>) -> Self {
        Self {
            choices,
            include_blank: true,
            blank_label: "---------".to_string(),
        }
    }

    /// Disables the blank option.
    #[must_use]
    pub fn no_blank(mut self) -> Self {
        self.include_blank = false;
        self
    }
}

impl Widget for Select {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let class = class_names([Some("form-select"), attrs.get("class").map(String::as_str)]);
        let extra_attrs = attrs.to_html_except(&["class", "id", "required"]);

        let blank = self
            .include_blank
            .then(|| format!(r#"<option value="">{}</option>"#, html_escape(&self.blank_label)));
        let options: String = blank
            .into_iter()
            .chain(self.choices.iter().map(|(opt_value, label)| {
                let selected = if value == Some(opt_value.as_str()) {
                    " selected"
                } else {
                    ""
                };
                format!(
                    r#"<option value="{}"{selected}>{}</option>"#,
                    html_escape(opt_value),
                    html_escape(label)
                )
            }))
            .collect();

        format!(
            r#"<select class="{class}" id="{}" name="{}"{extra_attrs}>{options}</select>"#,
            dom_id(name, attrs),
            html_escape(name),
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Checkbox input. The label is drawn by the surrounding layout.
#[derive(Debug, Clone, Default)]
pub struct Checkbox {
    /// Whether to use switch style.
    pub is_switch: bool,
}

impl Checkbox {
    /// Creates a new checkbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a switch-style checkbox.
    pub fn switch() -> Self {
        Self { is_switch: true }
    }
}

impl Widget for Checkbox {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let checked = value.is_some_and(|v| v == "true" || v == "on" || v == "1");
        let checked_attr = if checked { " checked" } else { "" };
        let class = class_names([Some("form-check-input"), attrs.get("class").map(String::as_str)]);
        let role_attr = if self.is_switch { r#" role="switch""# } else { "" };
        let extra_attrs = attrs.to_html_except(&["class", "id", "required"]);

        format!(
            r#"<input class="{class}" type="checkbox" id="{}" name="{}" value="true"{role_attr}{checked_attr}{extra_attrs}>"#,
            dom_id(name, attrs),
            html_escape(name),
        )
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

/// A hidden input widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenInput;

impl Widget for HiddenInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();
        let extra_attrs = attrs.to_html_except(&["class", "required", "aria-invalid"]);
        format!(
            r#"<input type="hidden" name="{}"{value_attr}{extra_attrs}>"#,
            html_escape(name)
        )
    }

    fn input_type(&self) -> &str {
        "hidden"
    }
}
