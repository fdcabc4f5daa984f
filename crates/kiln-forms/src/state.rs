//! Live form state and the handle fields bind to.
//!
//! A [`FormHandle`] owns the values of one form instance together with the
//! per-field error, touched and disabled flags. Forms are driven from a single
//! UI thread, so the state sits in a `RefCell`; no borrow is held across an
//! await point.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use serde_json::Value;
use tracing::debug;

use crate::error::{ValidationErrors, NON_FIELD_ERRORS};
use crate::schema::Schema;
use crate::value::{get_path, set_path, value_as_text, value_is_checked};

/// Per-field UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// Current error messages.
    pub errors: Vec<String>,
    /// Whether the user has interacted with the field.
    pub touched: bool,
    /// Whether the field is disabled by the form.
    pub disabled: bool,
}

#[derive(Debug)]
struct FormState {
    values: Value,
    defaults: Value,
    fields: HashMap<String, FieldState>,
    non_field_errors: Vec<String>,
    submitting: bool,
    submit_attempts: u32,
}

impl FormState {
    fn apply_errors(&mut self, errors: &ValidationErrors) {
        for state in self.fields.values_mut() {
            state.errors.clear();
        }
        for (path, messages) in &errors.errors {
            if path == NON_FIELD_ERRORS {
                self.non_field_errors.clone_from(messages);
            } else {
                self.fields.entry(path.clone()).or_default().errors.clone_from(messages);
            }
        }
    }
}

/// Result of [`FormHandle::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    /// Validation failed; errors were stored on the handle.
    Invalid(ValidationErrors),
    /// Another submission is still pending; nothing was done.
    Busy,
    /// The submit callback ran to completion.
    Completed(T),
}

/// The live state of one form instance.
pub struct FormHandle {
    schema: Box<dyn Schema>,
    state: RefCell<FormState>,
}

impl std::fmt::Debug for FormHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormHandle")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl FormHandle {
    /// Creates a handle validated by `schema`, starting from `defaults`.
    pub fn new(schema: impl Schema + 'static, defaults: Value) -> Self {
        Self {
            schema: Box::new(schema),
            state: RefCell::new(FormState {
                values: defaults.clone(),
                defaults,
                fields: HashMap::new(),
                non_field_errors: Vec::new(),
                submitting: false,
                submit_attempts: 0,
            }),
        }
    }

    /// Returns a snapshot of all values.
    pub fn values(&self) -> Value {
        self.state.borrow().values.clone()
    }

    /// Returns the value at `path`.
    pub fn value(&self, path: &str) -> Option<Value> {
        get_path(&self.state.borrow().values, path).cloned()
    }

    /// Sets the value at `path`.
    ///
    /// Once the field was touched, or after the first submit attempt, the
    /// schema is re-run and this field's errors are refreshed, together with
    /// those of every field that is already showing errors.
    pub fn set_value(&self, path: &str, value: impl Into<Value>) {
        let revalidate = {
            let mut state = self.state.borrow_mut();
            set_path(&mut state.values, path, value.into());
            state.submit_attempts > 0 || state.fields.get(path).is_some_and(|f| f.touched)
        };
        if revalidate {
            self.revalidate_field(path);
        }
    }

    /// Returns whether the field was touched.
    pub fn touched(&self, path: &str) -> bool {
        self.state
            .borrow()
            .fields
            .get(path)
            .is_some_and(|f| f.touched)
    }

    /// Marks the field as touched or untouched.
    pub fn set_touched(&self, path: &str, touched: bool) {
        self.state
            .borrow_mut()
            .fields
            .entry(path.to_string())
            .or_default()
            .touched = touched;
    }

    /// Returns the field's current error messages.
    pub fn errors(&self, path: &str) -> Vec<String> {
        self.state
            .borrow()
            .fields
            .get(path)
            .map(|f| f.errors.clone())
            .unwrap_or_default()
    }

    /// Returns errors not tied to a single field.
    pub fn non_field_errors(&self) -> Vec<String> {
        self.state.borrow().non_field_errors.clone()
    }

    /// Replaces the errors not tied to a single field.
    pub fn set_non_field_errors(&self, errors: Vec<String>) {
        self.state.borrow_mut().non_field_errors = errors;
    }

    /// Returns the state of a field.
    pub fn field_state(&self, path: &str) -> FieldState {
        self.state
            .borrow()
            .fields
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    /// Disables or enables a field.
    pub fn set_disabled(&self, path: &str, disabled: bool) {
        self.state
            .borrow_mut()
            .fields
            .entry(path.to_string())
            .or_default()
            .disabled = disabled;
    }

    /// Returns whether a field is disabled.
    ///
    /// Every field is disabled while a submission is pending.
    pub fn is_disabled(&self, path: &str) -> bool {
        let state = self.state.borrow();
        state.submitting || state.fields.get(path).is_some_and(|f| f.disabled)
    }

    /// Returns whether a submission is pending.
    pub fn is_submitting(&self) -> bool {
        self.state.borrow().submitting
    }

    /// Returns how many times submit was attempted.
    pub fn submit_attempts(&self) -> u32 {
        self.state.borrow().submit_attempts
    }

    /// Returns whether the values still equal the defaults.
    pub fn is_default(&self) -> bool {
        let state = self.state.borrow();
        state.values == state.defaults
    }

    /// Returns an accessor bound to one field.
    pub fn field<'a>(&'a self, path: &'a str) -> FieldAccessor<'a> {
        FieldAccessor { handle: self, path }
    }

    /// Runs the schema over the current values and stores the errors.
    pub fn validate(&self) -> Result<Value, ValidationErrors> {
        let result = self.schema.validate(&self.state.borrow().values);
        let mut state = self.state.borrow_mut();
        match &result {
            Ok(_) => state.apply_errors(&ValidationErrors::new()),
            Err(errors) => state.apply_errors(errors),
        }
        if result.is_ok() {
            state.non_field_errors.clear();
        }
        result
    }

    /// Re-runs the schema and refreshes the errors of `path` and of every
    /// field that currently has errors.
    ///
    /// Fields without errors other than `path` stay clean, so an edit never
    /// reveals errors on inputs the user has not reached yet.
    pub fn revalidate_field(&self, path: &str) {
        let errors = self
            .schema
            .validate(&self.state.borrow().values)
            .err()
            .unwrap_or_default();

        let mut state = self.state.borrow_mut();
        for (name, field) in &mut state.fields {
            if name != path && !field.errors.is_empty() {
                field.errors = errors.get(name).cloned().unwrap_or_default();
            }
        }
        state.fields.entry(path.to_string()).or_default().errors =
            errors.get(path).cloned().unwrap_or_default();
    }

    /// Validates and, when valid, runs `on_submit` with the accepted values.
    ///
    /// A call made while an earlier submission is still pending returns
    /// [`Submission::Busy`] without validating or calling `on_submit`.
    pub async fn submit<F, Fut, T>(&self, on_submit: F) -> Submission<T>
    where
        F: FnOnce(Value) -> Fut,
        Fut: Future<Output = T>,
    {
        {
            let mut state = self.state.borrow_mut();
            if state.submitting {
                debug!("submit ignored, a submission is pending");
                return Submission::Busy;
            }
            state.submit_attempts += 1;
        }

        let data = match self.validate() {
            Ok(data) => data,
            Err(errors) => {
                debug!(fields = errors.len(), "submit rejected by validation");
                return Submission::Invalid(errors);
            }
        };

        self.state.borrow_mut().submitting = true;
        let _pending = PendingGuard(&self.state);
        Submission::Completed(on_submit(data).await)
    }

    /// Restores the default values and clears all field state.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.values = state.defaults.clone();
        state.fields.clear();
        state.non_field_errors.clear();
        state.submit_attempts = 0;
    }
}

/// Clears the pending flag when a submission settles or is dropped.
struct PendingGuard<'a>(&'a RefCell<FormState>);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.borrow_mut().submitting = false;
    }
}

/// A view of one field of a [`FormHandle`].
#[derive(Debug, Clone, Copy)]
pub struct FieldAccessor<'a> {
    handle: &'a FormHandle,
    path: &'a str,
}

impl<'a> FieldAccessor<'a> {
    /// Returns the field path.
    pub fn path(&self) -> &'a str {
        self.path
    }

    /// Returns the handle this accessor is bound to.
    pub fn handle(&self) -> &'a FormHandle {
        self.handle
    }

    /// Returns the raw value.
    pub fn value(&self) -> Option<Value> {
        self.handle.value(self.path)
    }

    /// Returns the value as input text, empty when unset.
    pub fn text(&self) -> String {
        self.value()
            .as_ref()
            .and_then(value_as_text)
            .unwrap_or_default()
    }

    /// Returns the value as a checkbox state.
    pub fn checked(&self) -> bool {
        self.value().as_ref().is_some_and(value_is_checked)
    }

    /// Sets the value.
    pub fn set_value(&self, value: impl Into<Value>) {
        self.handle.set_value(self.path, value);
    }

    /// Returns whether the field was touched.
    pub fn touched(&self) -> bool {
        self.handle.touched(self.path)
    }

    /// Marks the field as touched or untouched.
    pub fn set_touched(&self, touched: bool) {
        self.handle.set_touched(self.path, touched);
    }

    /// Returns the current error messages.
    pub fn errors(&self) -> Vec<String> {
        self.handle.errors(self.path)
    }

    /// Returns whether the field has errors.
    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// Returns whether the form disables this field.
    pub fn disabled(&self) -> bool {
        self.handle.is_disabled(self.path)
    }
}
