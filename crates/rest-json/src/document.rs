//! JSON documents that resolve AWS type tags.

use std::sync::{Arc, OnceLock};

use json_codec::{DocumentClass, JsonDocument, JsonSettings};
use model::{
    Discriminated, DiscriminatorError, Document, DocumentValue, Schema, ShapeId, ShapeType,
};
use tracing::debug;

use crate::parse_document_discriminator;

/// A JSON document whose discriminator is read from its `__type` / `code`
/// tag when its schema is not a plain structure.
///
/// The discriminator is computed on first use and cached for the lifetime of
/// the document; the decoded value never changes, so every call returns the
/// same result.
#[derive(Debug, Clone)]
pub struct AwsJsonDocument {
    json: JsonDocument,
    discriminator: OnceLock<Result<ShapeId, DiscriminatorError>>,
}

impl AwsJsonDocument {
    /// Wraps a decoded value.
    pub fn new(value: DocumentValue, schema: Arc<Schema>, settings: Arc<JsonSettings>) -> Self {
        Self::from_json(JsonDocument::new(value, schema, settings))
    }

    /// The underlying schema-aware document.
    pub fn document(&self) -> &Document {
        self.json.document()
    }

    /// The shape type, inferred from the value for `document` schemas.
    pub fn shape_type(&self) -> ShapeType {
        self.json.shape_type()
    }

    /// Child entry `key`.
    pub fn get(&self, key: &str) -> Option<AwsJsonDocument> {
        self.json.get(key).map(Self::from_json)
    }

    /// Array element `index`.
    pub fn index(&self, index: usize) -> Option<AwsJsonDocument> {
        self.json.index(index).map(Self::from_json)
    }

    fn resolve(&self) -> Result<ShapeId, DiscriminatorError> {
        let shape_type = self.shape_type();
        if shape_type == ShapeType::Structure {
            return Ok(self.json.schema().id().clone());
        }

        let namespace = self.json.settings().default_namespace();
        parse_document_discriminator(self.document(), namespace).ok_or_else(|| {
            debug!(%shape_type, schema = %self.json.schema().id(), "no usable type tag");
            DiscriminatorError::new(shape_type)
        })
    }
}

impl Discriminated for AwsJsonDocument {
    fn discriminator(&self) -> Result<ShapeId, DiscriminatorError> {
        self.discriminator.get_or_init(|| self.resolve()).clone()
    }
}

impl DocumentClass for AwsJsonDocument {
    fn from_json(json: JsonDocument) -> Self {
        Self {
            json,
            discriminator: OnceLock::new(),
        }
    }
}

impl PartialEq for AwsJsonDocument {
    fn eq(&self, other: &Self) -> bool {
        self.json == other.json
    }
}
