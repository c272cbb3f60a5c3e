//! Trait values attached to shapes.
//!
//! A model carries trait values as loosely-typed documents. [`DynamicTrait`]
//! holds such a value exactly as loaded; types implementing [`Trait`] validate
//! it once and expose strongly-typed, immutable accessors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TraitError;
use crate::ShapeId;

/// A validated, typed trait.
///
/// Implementations are built once at model-load time and are immutable
/// afterwards. Construction never panics: malformed values yield a
/// [`TraitError`].
pub trait Trait: Sized + std::fmt::Debug + Send + Sync {
    /// The id under which this trait is attached to shapes.
    const ID: ShapeId;

    /// Validates a raw trait value. `None` means the trait was applied
    /// without a value.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError`] if the value does not have the required shape.
    fn from_document(value: Option<Value>) -> Result<Self, TraitError>;

    /// The raw value this trait was built from.
    fn document_value(&self) -> &Value;

    /// Validates a [`DynamicTrait`] registered under this trait's id.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::IdMismatch`] if `dynamic` carries a different id,
    /// otherwise any error from [`Trait::from_document`].
    fn from_dynamic(dynamic: &DynamicTrait) -> Result<Self, TraitError> {
        if dynamic.id() != &Self::ID {
            return Err(TraitError::IdMismatch {
                expected: Self::ID,
                found: dynamic.id().clone(),
            });
        }
        Self::from_document(Some(dynamic.document_value().clone()))
    }
}

/// A trait value with no typed representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicTrait {
    id: ShapeId,
    document_value: Value,
}

impl DynamicTrait {
    /// Creates a dynamic trait from its id and raw value.
    pub fn new(id: ShapeId, document_value: Value) -> Self {
        Self { id, document_value }
    }

    /// The trait id.
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// The raw trait value.
    pub fn document_value(&self) -> &Value {
        &self.document_value
    }
}
