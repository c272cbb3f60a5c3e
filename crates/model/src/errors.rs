//! Error and retry-policy types for the REST/JSON binding domain.
//!
//! The binding distinguishes recoverable "could not identify" outcomes, which
//! are expressed as `None` by the identifying functions, from hard failures:
//!
//! - [`DiscriminatorError`]: a polymorphic document whose concrete shape
//!   cannot be determined. Always surfaced to the caller.
//! - [`TraitError`]: malformed protocol metadata found while loading a model.
//! - [`ShapeIdError`]: text that is not a valid shape id.
//!
//! [`CallError`] is the value handed back to callers for failed responses that
//! do not correspond to any modeled error shape.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ShapeId, ShapeType};

// ---------------------------------------------------------------------------
// Model errors
// ---------------------------------------------------------------------------

/// A string could not be parsed as a [`ShapeId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeIdError {
    /// The id has no `#` separating namespace from name.
    #[error("Invalid shape id '{id}': expected a namespace followed by '#'")]
    MissingNamespace {
        /// The offending text.
        id: String,
    },

    /// The namespace, name, or member part is empty or contains a separator.
    #[error("Invalid shape id '{id}': namespace, name, and member must be non-empty")]
    EmptyPart {
        /// The offending text.
        id: String,
    },
}

// ---------------------------------------------------------------------------

/// The concrete shape of a document could not be determined.
///
/// Raised at discriminator-access time. Callers must not guess a type when
/// this occurs; structural decoding would continue against the wrong schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to parse discriminator for {shape_type} document.")]
pub struct DiscriminatorError {
    /// Shape type of the document whose discriminator could not be resolved.
    pub shape_type: ShapeType,
}

impl DiscriminatorError {
    /// Creates an error for a document of the given shape type.
    pub fn new(shape_type: ShapeType) -> Self {
        Self { shape_type }
    }
}

// ---------------------------------------------------------------------------

/// A trait value found in the model does not have the required structure.
///
/// Trait values originate from generated models, so these errors are fatal at
/// model-load time and are not expected at request time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraitError {
    /// The trait value must be a string-keyed mapping.
    #[error("Trait {trait_id} must be a mapping, found {found}")]
    NotAMapping {
        /// Id of the trait being constructed.
        trait_id: ShapeId,
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// A required field is absent.
    #[error("Trait {trait_id} is missing required field '{field}'")]
    MissingField {
        /// Id of the trait being constructed.
        trait_id: ShapeId,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A field is present but has the wrong type.
    #[error("Trait {trait_id} field '{field}' must be {expected}, found {found}")]
    InvalidField {
        /// Id of the trait being constructed.
        trait_id: ShapeId,
        /// Name (or `name[index]` path) of the offending field.
        field: String,
        /// Human-readable description of the expected type.
        expected: &'static str,
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// A dynamic trait was converted into a typed trait with a different id.
    #[error("Cannot build trait {expected} from a value registered as {found}")]
    IdMismatch {
        /// Id of the typed trait.
        expected: ShapeId,
        /// Id carried by the dynamic trait.
        found: ShapeId,
    },

    /// A schema was required to carry a trait but does not.
    #[error("Shape {shape} does not have trait {trait_id}")]
    Missing {
        /// Id of the shape that was inspected.
        shape: ShapeId,
        /// Id of the trait that was expected.
        trait_id: ShapeId,
    },
}

/// Returns the JSON type name of a value, for error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Call errors
// ---------------------------------------------------------------------------

/// The party at fault for a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fault {
    /// The request was invalid (4xx).
    Client,
    /// The service failed to handle a valid request (5xx).
    Server,
}

/// Whether a failed call is safe to retry and, if so, after what delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The call may be retried.
    Retryable {
        /// Minimum back-off before the next attempt. `None` means apply the
        /// caller's own back-off schedule.
        after: Option<Duration>,
    },
    /// Not enough information is available to decide.
    Undetermined,
}

/// A failed call that does not correspond to any modeled error shape.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct CallError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Which side of the call is at fault.
    pub fault: Fault,
    /// Retry guidance for the caller.
    pub retry: RetryPolicy,
    /// Whether the service signalled throttling.
    pub is_throttling_error: bool,
}
