//! Shape kinds, schemas, and operation descriptions.
//!
//! A [`Schema`] is the static description of a shape at a given position in a
//! payload: its id, its [`ShapeType`], its members, and the raw traits
//! attached to it. Schemas are built once when a client is generated and are
//! read-only afterwards.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::errors::{ShapeIdError, TraitError};
use crate::traits::{DynamicTrait, Trait};
use crate::ShapeId;

// ---------------------------------------------------------------------------
// Shape types
// ---------------------------------------------------------------------------

/// The kind of a modeled shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeType {
    /// Uninterpreted binary data.
    Blob,
    /// `true` or `false`.
    Boolean,
    /// UTF-8 text.
    String,
    /// A point in time.
    Timestamp,
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// Single-precision float.
    Float,
    /// Double-precision float.
    Double,
    /// Arbitrary-precision integer.
    BigInteger,
    /// Arbitrary-precision decimal.
    BigDecimal,
    /// Untyped, protocol-agnostic data.
    Document,
    /// A string restricted to a fixed set of values.
    Enum,
    /// An integer restricted to a fixed set of values.
    IntEnum,
    /// An ordered collection of one member type.
    List,
    /// String keys mapped to one value type.
    Map,
    /// A fixed set of named, heterogeneous members.
    Structure,
    /// Exactly one of a set of named members.
    Union,
    /// A named member of an aggregate shape.
    Member,
    /// The entry point of an API.
    Service,
    /// An entity with an identity and lifecycle operations.
    Resource,
    /// A single request/response interaction.
    Operation,
}

impl ShapeType {
    const ALL: [ShapeType; 23] = [
        ShapeType::Blob,
        ShapeType::Boolean,
        ShapeType::String,
        ShapeType::Timestamp,
        ShapeType::Byte,
        ShapeType::Short,
        ShapeType::Integer,
        ShapeType::Long,
        ShapeType::Float,
        ShapeType::Double,
        ShapeType::BigInteger,
        ShapeType::BigDecimal,
        ShapeType::Document,
        ShapeType::Enum,
        ShapeType::IntEnum,
        ShapeType::List,
        ShapeType::Map,
        ShapeType::Structure,
        ShapeType::Union,
        ShapeType::Member,
        ShapeType::Service,
        ShapeType::Resource,
        ShapeType::Operation,
    ];

    /// The Smithy IDL name of this shape type (e.g. `"bigInteger"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeType::Blob => "blob",
            ShapeType::Boolean => "boolean",
            ShapeType::String => "string",
            ShapeType::Timestamp => "timestamp",
            ShapeType::Byte => "byte",
            ShapeType::Short => "short",
            ShapeType::Integer => "integer",
            ShapeType::Long => "long",
            ShapeType::Float => "float",
            ShapeType::Double => "double",
            ShapeType::BigInteger => "bigInteger",
            ShapeType::BigDecimal => "bigDecimal",
            ShapeType::Document => "document",
            ShapeType::Enum => "enum",
            ShapeType::IntEnum => "intEnum",
            ShapeType::List => "list",
            ShapeType::Map => "map",
            ShapeType::Structure => "structure",
            ShapeType::Union => "union",
            ShapeType::Member => "member",
            ShapeType::Service => "service",
            ShapeType::Resource => "resource",
            ShapeType::Operation => "operation",
        }
    }

    /// Returns `true` for shapes whose members are addressed by name
    /// (structures and unions).
    pub fn is_named_aggregate(self) -> bool {
        matches!(self, ShapeType::Structure | ShapeType::Union)
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShapeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown shape type '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

/// Static description of a shape.
///
/// Member schemas carry the member id (`ns#Container$member`) and the shape
/// type of the member's target.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    id: ShapeId,
    shape_type: ShapeType,
    members: Vec<Arc<Schema>>,
    traits: BTreeMap<ShapeId, DynamicTrait>,
}

impl Schema {
    /// Creates a schema with no members and no traits.
    pub fn new(id: ShapeId, shape_type: ShapeType) -> Self {
        Self {
            id,
            shape_type,
            members: Vec::new(),
            traits: BTreeMap::new(),
        }
    }

    /// Adds a member named `name` that targets `target`.
    ///
    /// The member schema takes the target's shape type, members, and traits.
    /// Adding a member with an existing name replaces it in place.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeIdError`] if `name` is empty.
    pub fn with_member(mut self, name: &str, target: &Schema) -> Result<Self, ShapeIdError> {
        let member = Arc::new(Schema {
            id: self.id.with_member(name)?,
            shape_type: target.shape_type,
            members: target.members.clone(),
            traits: target.traits.clone(),
        });
        match self.members.iter_mut().find(|m| m.id.member() == Some(name)) {
            Some(existing) => *existing = member,
            None => self.members.push(member),
        }
        Ok(self)
    }

    /// Attaches a raw trait value, replacing any trait with the same id.
    pub fn with_trait(mut self, value: DynamicTrait) -> Self {
        self.traits.insert(value.id().clone(), value);
        self
    }

    /// The shape id this schema describes.
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// The kind of shape.
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// Members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &Arc<Schema>> {
        self.members.iter()
    }

    /// Looks up a member schema by member name.
    pub fn member(&self, name: &str) -> Option<&Arc<Schema>> {
        self.members.iter().find(|m| m.id.member() == Some(name))
    }

    /// Returns the raw trait registered under `id`, if any.
    pub fn dynamic_trait(&self, id: &ShapeId) -> Option<&DynamicTrait> {
        self.traits.get(id)
    }

    /// Returns `true` if a trait with the given id is attached.
    pub fn has_trait(&self, id: &ShapeId) -> bool {
        self.traits.contains_key(id)
    }

    /// Parses the attached trait `T`, if present.
    ///
    /// Returns `None` when the trait is absent and `Some(Err(..))` when it is
    /// present but malformed.
    pub fn get_trait<T: Trait>(&self) -> Option<Result<T, TraitError>> {
        self.traits.get(&T::ID).map(T::from_dynamic)
    }

    /// Parses the attached trait `T`, treating its absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::Missing`] if the trait is not attached, or the
    /// trait's own validation error if its value is malformed.
    pub fn expect_trait<T: Trait>(&self) -> Result<T, TraitError> {
        self.get_trait::<T>().unwrap_or_else(|| {
            Err(TraitError::Missing {
                shape: self.id.clone(),
                trait_id: T::ID,
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Id of the prelude `Document` shape.
pub const DOCUMENT_ID: ShapeId = ShapeId::from_static("smithy.api", "Document");

static DOCUMENT: LazyLock<Arc<Schema>> =
    LazyLock::new(|| Arc::new(Schema::new(DOCUMENT_ID, ShapeType::Document)));

/// The schema used for documents with no statically known shape.
pub fn document_schema() -> Arc<Schema> {
    Arc::clone(&DOCUMENT)
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Static description of an API operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiOperation {
    schema: Arc<Schema>,
}

impl ApiOperation {
    /// Wraps an operation schema.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    /// The operation's schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The namespace used to qualify unqualified error codes.
    pub fn namespace(&self) -> &str {
        self.schema.id().namespace()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn id(s: &str) -> ShapeId {
        ShapeId::parse(s).unwrap()
    }

    #[test]
    fn shape_type_names_round_trip_through_from_str() {
        for t in ShapeType::ALL {
            assert_eq!(t.as_str().parse::<ShapeType>().unwrap(), t);
        }
        assert!("widget".parse::<ShapeType>().is_err());
        assert_eq!("STRUCTURE".parse::<ShapeType>().unwrap(), ShapeType::Structure);
    }

    #[test]
    fn shape_type_serde_uses_idl_names() {
        let json = serde_json::to_string(&ShapeType::BigInteger).unwrap();
        assert_eq!(json, "\"bigInteger\"");
    }

    #[test]
    fn members_are_looked_up_by_name_in_order() {
        let string = Schema::new(id("smithy.api#String"), ShapeType::String);
        let integer = Schema::new(id("smithy.api#Integer"), ShapeType::Integer);
        let widget = Schema::new(id("com.example#Widget"), ShapeType::Structure)
            .with_member("name", &string)
            .unwrap()
            .with_member("size", &integer)
            .unwrap();

        let names: Vec<_> = widget.members().filter_map(|m| m.id().member()).collect();
        assert_eq!(names, ["name", "size"]);

        let size = widget.member("size").unwrap();
        assert_eq!(size.id(), &id("com.example#Widget$size"));
        assert_eq!(size.shape_type(), ShapeType::Integer);
        assert!(widget.member("colour").is_none());
    }

    #[test]
    fn replacing_a_member_keeps_its_position() {
        let string = Schema::new(id("smithy.api#String"), ShapeType::String);
        let long = Schema::new(id("smithy.api#Long"), ShapeType::Long);
        let widget = Schema::new(id("com.example#Widget"), ShapeType::Structure)
            .with_member("a", &string)
            .unwrap()
            .with_member("b", &string)
            .unwrap()
            .with_member("a", &long)
            .unwrap();
        let first = widget.members().next().unwrap();
        assert_eq!(first.id().member(), Some("a"));
        assert_eq!(first.shape_type(), ShapeType::Long);
        assert_eq!(widget.members().count(), 2);
    }

    #[test]
    fn dynamic_traits_are_keyed_by_id() {
        let trait_id = id("com.example#tagged");
        let schema = Schema::new(id("com.example#Widget"), ShapeType::Structure)
            .with_trait(DynamicTrait::new(trait_id.clone(), json!({"a": 1})));
        assert!(schema.has_trait(&trait_id));
        assert_eq!(
            schema.dynamic_trait(&trait_id).unwrap().document_value(),
            &json!({"a": 1})
        );
    }

    #[test]
    fn operation_namespace_comes_from_its_id() {
        let op = ApiOperation::new(Arc::new(Schema::new(
            id("com.example#GetWidget"),
            ShapeType::Operation,
        )));
        assert_eq!(op.namespace(), "com.example");
    }

    #[test]
    fn prelude_document_schema() {
        let doc = document_schema();
        assert_eq!(doc.id().to_string(), "smithy.api#Document");
        assert_eq!(doc.shape_type(), ShapeType::Document);
    }
}
