//! Schema-aware JSON documents.

use std::sync::Arc;

use model::{Discriminated, DiscriminatorError, Document, DocumentValue, Schema, ShapeId, ShapeType};

use crate::JsonSettings;

// ---------------------------------------------------------------------------
// Document classes
// ---------------------------------------------------------------------------

/// A document type a [`crate::JsonCodec`] can produce.
///
/// Protocols that need extra behaviour on decoded documents (most commonly a
/// different discriminator strategy) wrap [`JsonDocument`] and implement this
/// trait; the codec is then instantiated with that type.
pub trait DocumentClass: Discriminated + Send + Sync + Sized {
    /// Builds the protocol document from a plain JSON document.
    fn from_json(document: JsonDocument) -> Self;
}

// ---------------------------------------------------------------------------
// JsonDocument
// ---------------------------------------------------------------------------

/// A decoded JSON value with its schema and the codec settings it was
/// decoded under.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument {
    document: Document,
    settings: Arc<JsonSettings>,
}

impl JsonDocument {
    /// Wraps a decoded value.
    pub fn new(value: DocumentValue, schema: Arc<Schema>, settings: Arc<JsonSettings>) -> Self {
        Self {
            document: Document::new(value, schema),
            settings,
        }
    }

    /// The underlying schema-aware document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The settings this document was decoded with.
    pub fn settings(&self) -> &JsonSettings {
        &self.settings
    }

    /// The decoded value.
    pub fn value(&self) -> &DocumentValue {
        self.document.value()
    }

    /// The statically assigned schema.
    pub fn schema(&self) -> &Arc<Schema> {
        self.document.schema()
    }

    /// The shape type, inferred from the value for `document` schemas.
    pub fn shape_type(&self) -> ShapeType {
        self.document.shape_type()
    }

    /// Child entry `key`, decoded under the same settings.
    pub fn get(&self, key: &str) -> Option<JsonDocument> {
        self.document.get(key).map(|document| self.child(document))
    }

    /// Array element `index`, decoded under the same settings.
    pub fn index(&self, index: usize) -> Option<JsonDocument> {
        self.document.index(index).map(|document| self.child(document))
    }

    fn child(&self, document: Document) -> JsonDocument {
        JsonDocument {
            document,
            settings: Arc::clone(&self.settings),
        }
    }
}

impl Discriminated for JsonDocument {
    fn discriminator(&self) -> Result<ShapeId, DiscriminatorError> {
        self.document.discriminator()
    }
}

impl DocumentClass for JsonDocument {
    fn from_json(document: JsonDocument) -> Self {
        document
    }
}
