//! The JSON payload codec.

use std::marker::PhantomData;
use std::sync::Arc;

use model::{Document, PayloadCodec, Schema};
use tracing::trace;

use crate::{DocumentClass, JsonCodecError, JsonDocument, JsonSettings};

/// Media type of JSON payloads.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Reads and writes JSON payloads, producing documents of class `D`.
pub struct JsonCodec<D = JsonDocument> {
    settings: Arc<JsonSettings>,
    _class: PhantomData<fn() -> D>,
}

impl<D> JsonCodec<D> {
    /// Creates a codec with the given settings.
    pub fn new(settings: JsonSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            _class: PhantomData,
        }
    }

    /// The settings attached to every document this codec produces.
    pub fn settings(&self) -> &JsonSettings {
        &self.settings
    }
}

impl<D> Default for JsonCodec<D> {
    fn default() -> Self {
        Self::new(JsonSettings::default())
    }
}

impl<D> Clone for JsonCodec<D> {
    fn clone(&self) -> Self {
        Self {
            settings: Arc::clone(&self.settings),
            _class: PhantomData,
        }
    }
}

impl<D> std::fmt::Debug for JsonCodec<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCodec")
            .field("settings", &self.settings)
            .field("document_class", &std::any::type_name::<D>())
            .finish()
    }
}

impl<D: DocumentClass> PayloadCodec for JsonCodec<D> {
    type Document = D;
    type Error = JsonCodecError;

    fn media_type(&self) -> &str {
        JSON_MEDIA_TYPE
    }

    fn read_document(&self, source: &[u8], schema: Arc<Schema>) -> Result<D, JsonCodecError> {
        let value = serde_json::from_slice(source).map_err(JsonCodecError::Decode)?;
        trace!(schema = %schema.id(), bytes = source.len(), "decoded JSON document");
        Ok(D::from_json(JsonDocument::new(
            value,
            schema,
            Arc::clone(&self.settings),
        )))
    }

    fn write_document(&self, document: &Document) -> Result<Vec<u8>, JsonCodecError> {
        serde_json::to_vec(document.value()).map_err(JsonCodecError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use model::{Discriminated, ShapeId, ShapeType};
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_documents_with_codec_settings() {
        let codec: JsonCodec = JsonCodec::new(JsonSettings::new().with_default_namespace("ns"));
        let doc = codec
            .read_document(br#"{"a": [1, 2]}"#, model::document_schema())
            .unwrap();
        assert_eq!(doc.value(), &json!({"a": [1, 2]}));
        assert_eq!(doc.settings().default_namespace(), Some("ns"));
        assert_eq!(codec.media_type(), "application/json");
    }

    #[test]
    fn rejects_invalid_json() {
        let codec: JsonCodec = JsonCodec::default();
        let err = codec.read_document(b"{not json", model::document_schema()).unwrap_err();
        assert!(matches!(err, JsonCodecError::Decode(_)));
        assert!(codec.read_document(b"", model::document_schema()).is_err());
    }

    #[test]
    fn structure_schema_is_kept_on_read() {
        let schema = Arc::new(Schema::new(
            ShapeId::parse("com.example#Widget").unwrap(),
            ShapeType::Structure,
        ));
        let codec: JsonCodec = JsonCodec::default();
        let doc = codec.read_document(b"{}", schema).unwrap();
        assert_eq!(doc.discriminator().unwrap().to_string(), "com.example#Widget");
    }

    #[test]
    fn writes_the_document_value() {
        let codec: JsonCodec = JsonCodec::default();
        let bytes = codec
            .write_document(&Document::untyped(json!({"k": "v"})))
            .unwrap();
        assert_eq!(bytes, br#"{"k":"v"}"#);
    }
}
