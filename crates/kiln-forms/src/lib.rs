//! # kiln-forms
//!
//! Declarative forms: descriptors in, bound and validated markup out.
//!
//! This crate provides:
//! - Field and form descriptors, deserializable from JSON
//! - A field renderer registry with `basic` (Bootstrap 5) and `fancy` (card) presets
//! - A form builder binding descriptors to a live [`FormHandle`]
//! - Object schemas with field rules and cross-field refinements
//! - Ready-made authentication schemas
//! - Message catalogs for translated validation messages
//!
//! ## Quick Start
//!
//! ```rust
//! use kiln_forms::{build, FieldDescriptor, FieldRegistry, FormBuilder, FormHandle, SubmitDescriptor};
//! use kiln_forms::auth_schema::{sign_in_schema, PasswordPolicy};
//! use kiln_forms::i18n::KeyTranslator;
//! use serde_json::json;
//!
//! let form = FormBuilder::new()
//!     .field(FieldDescriptor::text("username", "Username").required())
//!     .field(FieldDescriptor::password("password", "Password").required())
//!     .submit(SubmitDescriptor::new("Sign in"))
//!     .build();
//!
//! let schema = sign_in_schema(&KeyTranslator, &PasswordPolicy::default());
//! let handle = FormHandle::new(schema, json!({"username": "", "password": ""}));
//!
//! let rendered = build(&FieldRegistry::basic(), &form, &handle).unwrap();
//! assert_eq!(rendered.fields.len(), 2);
//! assert!(rendered.submit_state.disabled);
//!
//! let html = rendered.render("/auth/sign-in", "post");
//! assert!(html.contains("Sign in"));
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use kiln_forms::{FieldRule, ObjectSchema, Schema};
//! use kiln_forms::validation::MinLengthValidator;
//! use serde_json::json;
//!
//! let schema = ObjectSchema::new()
//!     .field("password", FieldRule::string().validator(MinLengthValidator::new(8)))
//!     .field("confirm", FieldRule::string())
//!     .refine("confirm", "Passwords do not match", kiln_forms::fields_equal("password", "confirm"));
//!
//! let errors = schema
//!     .validate(&json!({"password": "long enough", "confirm": "different"}))
//!     .unwrap_err();
//! assert_eq!(errors.first("confirm"), Some("Passwords do not match"));
//! ```
//!
//! ## Field types
//!
//! | tag        | basic | fancy |
//! |------------|-------|-------|
//! | `text`     | yes   | yes   |
//! | `email`    | yes   |       |
//! | `password` | yes   | yes   |
//! | `textarea` | yes   |       |
//! | `select`   | yes   |       |
//! | `checkbox` | yes   | yes   |
//! | `hidden`   | yes   |       |

pub mod auth_schema;
mod builder;
mod descriptor;
mod error;
pub mod i18n;
mod registry;
mod schema;
mod state;
pub mod validation;
pub mod value;
pub mod widgets;

pub use builder::{build, RenderedField, RenderedForm};
pub use descriptor::{FieldDescriptor, FormBuilder, FormDescriptor, SubmitDescriptor};
pub use error::{FormError, Result, ValidationErrors, NON_FIELD_ERRORS};
pub use registry::{FieldRegistry, RenderFn, SubmitRenderFn, SubmitState};
pub use schema::{
    fields_differ, fields_equal, AcceptAll, FieldKind, FieldRule, ObjectSchema, Refinement, Schema,
    Validated,
};
pub use state::{FieldAccessor, FieldState, FormHandle, Submission};
