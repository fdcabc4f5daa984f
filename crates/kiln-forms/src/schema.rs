//! Declarative validation schemas.
//!
//! An [`ObjectSchema`] is a list of field rules plus a list of refinements.
//! Field rules run first, in declaration order. Refinements are cross-field
//! checks that run afterwards over the raw values and attach their message to
//! one designated path, so the error shows up next to the relevant input.

use serde_json::{Map, Value};

use crate::error::ValidationErrors;
use crate::validation::Validator;
use crate::value::{get_path, set_path};

/// Outcome of running a schema: the accepted values or per-field errors.
pub type Validated = std::result::Result<Value, ValidationErrors>;

/// A pure function from raw form values to accepted values or errors.
pub trait Schema: Send + Sync {
    /// Validates `values`.
    fn validate(&self, values: &Value) -> Validated;
}

/// Schema that accepts any value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Schema for AcceptAll {
    fn validate(&self, values: &Value) -> Validated {
        Ok(values.clone())
    }
}

/// Expected JSON type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string, checked by the rule's validator chain.
    String,
    /// A boolean flag.
    Boolean,
}

/// Rule for a single field.
pub struct FieldRule {
    kind: FieldKind,
    optional: bool,
    required_message: String,
    type_message: String,
    validators: Vec<Box<dyn Validator>>,
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("kind", &self.kind)
            .field("optional", &self.optional)
            .field("required_message", &self.required_message)
            .field("validators", &self.validators.len())
            .finish_non_exhaustive()
    }
}

impl FieldRule {
    /// A required string field.
    pub fn string() -> Self {
        Self {
            kind: FieldKind::String,
            optional: false,
            required_message: "This field is required.".to_string(),
            type_message: "Expected text.".to_string(),
            validators: Vec::new(),
        }
    }

    /// A required boolean field.
    pub fn boolean() -> Self {
        Self {
            kind: FieldKind::Boolean,
            optional: false,
            required_message: "This field is required.".to_string(),
            type_message: "Expected true or false.".to_string(),
            validators: Vec::new(),
        }
    }

    /// Allows the field to be absent or `null`.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the message reported when a required field is missing.
    #[must_use]
    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = message.into();
        self
    }

    /// Sets the message reported when the value has the wrong JSON type.
    #[must_use]
    pub fn type_message(mut self, message: impl Into<String>) -> Self {
        self.type_message = message.into();
        self
    }

    /// Appends a validator to the chain. String fields only.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Returns the field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns whether the field may be absent.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Checks one value. `None` means the field is absent.
    ///
    /// Returns the first failing message; later validators are not run.
    pub fn check(&self, value: Option<&Value>) -> Result<(), String> {
        self.check_value(value).map_err(|issue| issue.message)
    }

    fn check_value(&self, value: Option<&Value>) -> Result<(), Issue> {
        let value = match value {
            None | Some(Value::Null) if self.optional => return Ok(()),
            None | Some(Value::Null) => return Err(Issue::structural(&self.required_message)),
            Some(value) => value,
        };

        match (self.kind, value) {
            (FieldKind::Boolean, Value::Bool(_)) => Ok(()),
            (FieldKind::String, Value::String(text)) => self
                .validators
                .iter()
                .try_for_each(|validator| validator.validate(text))
                .map_err(|message| Issue {
                    message,
                    structural: false,
                }),
            _ => Err(Issue::structural(&self.type_message)),
        }
    }
}

/// A failed field rule. Structural issues (missing value, wrong type) leave
/// the object in a shape refinements cannot be evaluated against.
struct Issue {
    message: String,
    structural: bool,
}

impl Issue {
    fn structural(message: &str) -> Self {
        Self {
            message: message.to_string(),
            structural: true,
        }
    }
}

type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// A cross-field check attached to one path.
pub struct Refinement {
    path: String,
    message: String,
    predicate: Predicate,
}

impl std::fmt::Debug for Refinement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refinement")
            .field("path", &self.path)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Schema over a JSON object.
#[derive(Debug, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, FieldRule)>,
    refinements: Vec<Refinement>,
}

impl ObjectSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field rule at `path`. A later rule for the same path replaces
    /// the earlier one.
    #[must_use]
    pub fn field(mut self, path: impl Into<String>, rule: FieldRule) -> Self {
        let path = path.into();
        if let Some(slot) = self.fields.iter_mut().find(|(p, _)| *p == path) {
            slot.1 = rule;
        } else {
            self.fields.push((path, rule));
        }
        self
    }

    /// Adds every field and refinement of `other`.
    #[must_use]
    pub fn extend(self, other: Self) -> Self {
        let mut schema = other
            .fields
            .into_iter()
            .fold(self, |schema, (path, rule)| schema.field(path, rule));
        schema.refinements.extend(other.refinements);
        schema
    }

    /// Adds a cross-field rule. When `predicate` returns false, `message` is
    /// appended to the errors of `path`.
    ///
    /// Refinements run after every field rule, unless some field is missing
    /// or has the wrong type.
    #[must_use]
    pub fn refine<F>(mut self, path: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.refinements.push(Refinement {
            path: path.into(),
            message: message.into(),
            predicate: Box::new(predicate),
        });
        self
    }

    /// Returns the declared field paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(path, _)| path.as_str())
    }

    /// Returns the rule for `path`.
    pub fn rule(&self, path: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, rule)| rule)
    }
}

impl Schema for ObjectSchema {
    fn validate(&self, values: &Value) -> Validated {
        let mut errors = ValidationErrors::new();
        let mut accepted = Value::Object(Map::new());
        let mut structural = false;

        for (path, rule) in &self.fields {
            let value = get_path(values, path);
            match rule.check_value(value) {
                Ok(()) => {
                    if let Some(value) = value.filter(|v| !v.is_null()) {
                        set_path(&mut accepted, path, value.clone());
                    }
                }
                Err(issue) => {
                    structural |= issue.structural;
                    errors.add(path, issue.message);
                }
            }
        }

        if !structural {
            for refinement in &self.refinements {
                if !(refinement.predicate)(values) {
                    errors.add(&refinement.path, refinement.message.clone());
                }
            }
        }

        if errors.is_empty() {
            Ok(accepted)
        } else {
            Err(errors)
        }
    }
}

/// Returns a predicate that holds when the strings at `a` and `b` are equal.
pub fn fields_equal(a: &str, b: &str) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    let (a, b) = (a.to_string(), b.to_string());
    move |values| get_path(values, &a) == get_path(values, &b)
}

/// Returns a predicate that holds when the values at `a` and `b` differ.
pub fn fields_differ(a: &str, b: &str) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    let (a, b) = (a.to_string(), b.to_string());
    move |values| get_path(values, &a) != get_path(values, &b)
}
