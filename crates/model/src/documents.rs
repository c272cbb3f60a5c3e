//! Decoded documents and discriminator resolution.
//!
//! A [`Document`] pairs a decoded, dynamically-typed value with the schema
//! expected at its position in the payload. It is built once by a codec and
//! is read-only afterwards.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::DiscriminatorError;
use crate::types::{document_schema, Schema};
use crate::{ShapeId, ShapeType};

/// A decoded value, as produced by a payload codec.
pub type DocumentValue = Value;

// ---------------------------------------------------------------------------
// Discriminated
// ---------------------------------------------------------------------------

/// Resolves which concrete shape a document represents.
///
/// Codecs call this whenever the schema at the current position is
/// polymorphic. Implementations must fail rather than guess.
pub trait Discriminated {
    /// Returns the concrete shape id of this document.
    ///
    /// # Errors
    ///
    /// Returns [`DiscriminatorError`] if the concrete shape cannot be
    /// determined.
    fn discriminator(&self) -> Result<ShapeId, DiscriminatorError>;
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A decoded value together with its statically assigned schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    value: DocumentValue,
    schema: Arc<Schema>,
}

impl Document {
    /// Wraps `value` with the given schema.
    pub fn new(value: DocumentValue, schema: Arc<Schema>) -> Self {
        Self { value, schema }
    }

    /// Wraps `value` with the prelude `Document` schema.
    pub fn untyped(value: DocumentValue) -> Self {
        Self::new(value, document_schema())
    }

    /// The decoded value.
    pub fn value(&self) -> &DocumentValue {
        &self.value
    }

    /// The statically assigned schema.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The shape type of this document.
    ///
    /// Taken from the schema, except for `document` schemas where it is
    /// inferred from the value.
    pub fn shape_type(&self) -> ShapeType {
        match self.schema.shape_type() {
            ShapeType::Document => infer_shape_type(&self.value),
            other => other,
        }
    }

    /// The value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Returns the entry `key` of an object value, wrapped with the schema
    /// for that position.
    ///
    /// Structures and unions only expose declared members; maps use their
    /// `value` member schema; anything else falls back to the prelude
    /// `Document` schema.
    pub fn get(&self, key: &str) -> Option<Document> {
        let value = self.value.as_object()?.get(key)?;
        let schema = match self.schema.shape_type() {
            t if t.is_named_aggregate() => Arc::clone(self.schema.member(key)?),
            ShapeType::Map => self.member_or_document("value"),
            _ => document_schema(),
        };
        Some(Document::new(value.clone(), schema))
    }

    /// Returns element `index` of an array value, wrapped with the list's
    /// `member` schema (or the prelude `Document` schema).
    pub fn index(&self, index: usize) -> Option<Document> {
        let value = self.value.as_array()?.get(index)?;
        Some(Document::new(value.clone(), self.member_or_document("member")))
    }

    fn member_or_document(&self, name: &str) -> Arc<Schema> {
        self.schema
            .member(name)
            .map(Arc::clone)
            .unwrap_or_else(document_schema)
    }
}

/// Structures are their own discriminator; no other shape type can be
/// resolved without protocol-specific knowledge.
impl Discriminated for Document {
    fn discriminator(&self) -> Result<ShapeId, DiscriminatorError> {
        match self.shape_type() {
            ShapeType::Structure => Ok(self.schema.id().clone()),
            other => Err(DiscriminatorError::new(other)),
        }
    }
}

fn infer_shape_type(value: &Value) -> ShapeType {
    match value {
        Value::Null => ShapeType::Document,
        Value::Bool(_) => ShapeType::Boolean,
        Value::Number(n) if n.is_i64() || n.is_u64() => ShapeType::Long,
        Value::Number(_) => ShapeType::Double,
        Value::String(_) => ShapeType::String,
        Value::Array(_) => ShapeType::List,
        Value::Object(_) => ShapeType::Map,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn id(s: &str) -> ShapeId {
        ShapeId::parse(s).unwrap()
    }

    fn widget_schema() -> Arc<Schema> {
        let string = Schema::new(id("smithy.api#String"), ShapeType::String);
        Arc::new(
            Schema::new(id("com.example#Widget"), ShapeType::Structure)
                .with_member("name", &string)
                .unwrap(),
        )
    }

    #[test]
    fn shape_type_is_inferred_for_untyped_values() {
        let cases = [
            (json!(true), ShapeType::Boolean),
            (json!("foo"), ShapeType::String),
            (json!(1), ShapeType::Long),
            (json!(1.1), ShapeType::Double),
            (json!(["foo"]), ShapeType::List),
            (json!({"foo": "bar"}), ShapeType::Map),
            (Value::Null, ShapeType::Document),
        ];
        for (value, expected) in cases {
            assert_eq!(Document::untyped(value.clone()).shape_type(), expected, "{value}");
        }
    }

    #[test]
    fn shape_type_is_inherited_from_schema() {
        let short = Arc::new(Schema::new(id("smithy.api#Short"), ShapeType::Short));
        assert_eq!(Document::new(json!(1), short).shape_type(), ShapeType::Short);
    }

    #[test]
    fn structure_members_carry_member_schemas() {
        let doc = Document::new(json!({"name": "bolt", "extra": 1}), widget_schema());
        let name = doc.get("name").unwrap();
        assert_eq!(name.schema().id(), &id("com.example#Widget$name"));
        assert_eq!(name.as_str(), Some("bolt"));
        assert!(doc.get("extra").is_none());
        assert!(doc.get("missing").is_none());
    }

    #[test]
    fn untyped_children_are_documents() {
        let doc = Document::untyped(json!({"a": [1, "x"]}));
        let list = doc.get("a").unwrap();
        assert_eq!(list.shape_type(), ShapeType::List);
        assert_eq!(list.index(1).unwrap().shape_type(), ShapeType::String);
        assert!(list.index(2).is_none());
    }

    #[test]
    fn untyped_document_has_no_discriminator() {
        let err = Document::untyped(Value::Null).discriminator().unwrap_err();
        assert_eq!(err.shape_type, ShapeType::Document);
    }

    #[test]
    fn structure_document_is_its_own_discriminator() {
        let doc = Document::new(json!({"name": "bolt"}), widget_schema());
        assert_eq!(doc.discriminator().unwrap(), id("com.example#Widget"));
    }
}
