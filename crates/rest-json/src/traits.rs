//! Protocol and auth traits used by REST/JSON services.
//!
//! Both traits are validated once, when the model is loaded. The raw value is
//! kept as the trait's identity; everything else is derived from it.

use std::hash::{Hash, Hasher};

use model::{json_type_name, ShapeId, Trait, TraitError};
use serde_json::{Map, Value};

/// HTTP version assumed when `restJson1` does not list any.
pub const DEFAULT_HTTP_VERSION: &str = "http/1.1";

// ---------------------------------------------------------------------------
// restJson1
// ---------------------------------------------------------------------------

/// The `aws.protocols#restJson1` protocol trait.
///
/// `http` and `event_stream_http` are descriptive: equality, hashing, and
/// `Debug` output only consider the raw trait value.
#[derive(Clone)]
pub struct RestJson1Trait {
    document_value: Value,
    http: Vec<String>,
    event_stream_http: Vec<String>,
}

impl RestJson1Trait {
    /// Validates a raw `restJson1` value. `None` and JSON `null` are treated
    /// as an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError`] if the value is not a mapping, or if `http` or
    /// `eventStreamHttp` is not a list of strings. An explicit `"http": null`
    /// is rejected; `"eventStreamHttp": null` inherits `http`.
    pub fn new(value: Option<Value>) -> Result<Self, TraitError> {
        let document_value = match value {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(value) => value,
        };
        let Value::Object(fields) = &document_value else {
            return Err(TraitError::NotAMapping {
                trait_id: Self::ID,
                found: json_type_name(&document_value),
            });
        };

        let http = match fields.get("http") {
            None => Vec::new(),
            Some(value) => string_list(value, "http")?,
        };
        let http = if http.is_empty() {
            vec![DEFAULT_HTTP_VERSION.to_owned()]
        } else {
            http
        };

        let event_stream_http = match fields.get("eventStreamHttp") {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => string_list(value, "eventStreamHttp")?,
        };
        let event_stream_http = inherit_if_empty(event_stream_http, &http);

        Ok(Self {
            document_value,
            http,
            event_stream_http,
        })
    }

    /// Supported HTTP protocol versions, in priority order. Never empty.
    pub fn http(&self) -> &[String] {
        &self.http
    }

    /// HTTP protocol versions for event streaming operations, in priority
    /// order. Equal to [`RestJson1Trait::http`] unless set explicitly.
    pub fn event_stream_http(&self) -> &[String] {
        &self.event_stream_http
    }
}

/// `eventStreamHttp` is exactly the resolved `http` list when not given.
fn inherit_if_empty(versions: Vec<String>, http: &[String]) -> Vec<String> {
    if versions.is_empty() {
        http.to_vec()
    } else {
        versions
    }
}

fn string_list(value: &Value, field: &'static str) -> Result<Vec<String>, TraitError> {
    let invalid = |path: String, found: &Value| TraitError::InvalidField {
        trait_id: RestJson1Trait::ID,
        field: path,
        expected: "a list of strings",
        found: json_type_name(found),
    };

    let Value::Array(items) = value else {
        return Err(invalid(field.to_owned(), value));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(invalid(format!("{field}[{i}]"), other)),
        })
        .collect()
}

impl Default for RestJson1Trait {
    fn default() -> Self {
        let http = vec![DEFAULT_HTTP_VERSION.to_owned()];
        Self {
            document_value: Value::Object(Map::new()),
            event_stream_http: http.clone(),
            http,
        }
    }
}

impl Trait for RestJson1Trait {
    const ID: ShapeId = ShapeId::from_static("aws.protocols", "restJson1");

    fn from_document(value: Option<Value>) -> Result<Self, TraitError> {
        Self::new(value)
    }

    fn document_value(&self) -> &Value {
        &self.document_value
    }
}

impl PartialEq for RestJson1Trait {
    fn eq(&self, other: &Self) -> bool {
        self.document_value == other.document_value
    }
}

impl Eq for RestJson1Trait {}

impl Hash for RestJson1Trait {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.document_value.to_string().hash(state);
    }
}

impl std::fmt::Debug for RestJson1Trait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestJson1Trait")
            .field("document_value", &self.document_value)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// sigv4
// ---------------------------------------------------------------------------

/// The `aws.auth#sigv4` auth trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigV4Trait {
    document_value: Value,
}

impl SigV4Trait {
    /// Validates a raw `sigv4` value.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError`] unless `value` is a mapping with a string
    /// `name` entry.
    pub fn new(value: Value) -> Result<Self, TraitError> {
        let Value::Object(fields) = &value else {
            return Err(TraitError::NotAMapping {
                trait_id: Self::ID,
                found: json_type_name(&value),
            });
        };
        match fields.get("name") {
            Some(Value::String(_)) => Ok(Self {
                document_value: value,
            }),
            Some(other) => Err(TraitError::InvalidField {
                trait_id: Self::ID,
                field: "name".to_owned(),
                expected: "a string",
                found: json_type_name(other),
            }),
            None => Err(TraitError::MissingField {
                trait_id: Self::ID,
                field: "name",
            }),
        }
    }

    /// The signing name of the service.
    pub fn name(&self) -> &str {
        // Checked in `new`; the value is never mutated afterwards.
        self.document_value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

impl Trait for SigV4Trait {
    const ID: ShapeId = ShapeId::from_static("aws.auth", "sigv4");

    fn from_document(value: Option<Value>) -> Result<Self, TraitError> {
        Self::new(value.unwrap_or(Value::Null))
    }

    fn document_value(&self) -> &Value {
        &self.document_value
    }
}

impl Hash for SigV4Trait {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.document_value.to_string().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use model::DynamicTrait;
    use serde_json::json;

    use super::*;

    #[test]
    fn rest_json1_defaults_when_value_is_absent() {
        for value in [None, Some(Value::Null), Some(json!({}))] {
            let t = RestJson1Trait::new(value).unwrap();
            assert_eq!(t.http(), ["http/1.1"]);
            assert_eq!(t.event_stream_http(), ["http/1.1"]);
        }
        assert_eq!(RestJson1Trait::default(), RestJson1Trait::new(None).unwrap());
    }

    #[test]
    fn rest_json1_reads_both_lists_in_order() {
        let t = RestJson1Trait::new(Some(json!({
            "http": ["h2", "http/1.1"],
            "eventStreamHttp": ["h2c"],
        })))
        .unwrap();
        assert_eq!(t.http(), ["h2", "http/1.1"]);
        assert_eq!(t.event_stream_http(), ["h2c"]);
    }

    #[test]
    fn event_stream_http_inherits_resolved_http() {
        let t = RestJson1Trait::new(Some(json!({"http": ["h2"]}))).unwrap();
        assert_eq!(t.event_stream_http(), t.http());

        let t = RestJson1Trait::new(Some(json!({"http": ["h2"], "eventStreamHttp": []}))).unwrap();
        assert_eq!(t.event_stream_http(), ["h2"]);

        let t = RestJson1Trait::new(Some(json!({"eventStreamHttp": null}))).unwrap();
        assert_eq!(t.event_stream_http(), ["http/1.1"]);
    }

    #[test]
    fn rest_json1_rejects_malformed_values() {
        let err = RestJson1Trait::new(Some(json!("h2"))).unwrap_err();
        assert!(matches!(err, TraitError::NotAMapping { found: "string", .. }));

        let err = RestJson1Trait::new(Some(json!({"http": "h2"}))).unwrap_err();
        assert!(matches!(err, TraitError::InvalidField { ref field, .. } if field == "http"));

        let err = RestJson1Trait::new(Some(json!({"http": ["h2", 2]}))).unwrap_err();
        assert!(matches!(
            err,
            TraitError::InvalidField { ref field, found: "number", .. } if field == "http[1]"
        ));

        let err = RestJson1Trait::new(Some(json!({"http": null}))).unwrap_err();
        assert!(matches!(
            err,
            TraitError::InvalidField { ref field, found: "null", .. } if field == "http"
        ));

        let err = RestJson1Trait::new(Some(json!({"eventStreamHttp": [true]}))).unwrap_err();
        assert!(matches!(
            err,
            TraitError::InvalidField { ref field, .. } if field == "eventStreamHttp[0]"
        ));
    }

    #[test]
    fn rest_json1_identity_ignores_derived_fields() {
        let a = RestJson1Trait::new(Some(json!({"http": ["h2"]}))).unwrap();
        let b = RestJson1Trait::new(Some(json!({"http": ["h2"]}))).unwrap();
        let c = RestJson1Trait::new(Some(json!({"http": ["h2"], "eventStreamHttp": ["h2"]})))
            .unwrap();
        assert_eq!(a, b);
        // Same derived lists, different raw value.
        assert_eq!(a.event_stream_http(), c.event_stream_http());
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);

        let debug = format!("{:?}", RestJson1Trait::default());
        assert!(!debug.contains("http/1.1"), "{debug}");
    }

    #[test]
    fn sigv4_exposes_name() {
        let t = SigV4Trait::new(json!({"name": "service"})).unwrap();
        assert_eq!(t.name(), "service");
    }

    #[test]
    fn sigv4_rejects_malformed_values() {
        assert!(matches!(
            SigV4Trait::new(json!({})),
            Err(TraitError::MissingField { field: "name", .. })
        ));
        assert!(matches!(
            SigV4Trait::new(json!("not-a-mapping")),
            Err(TraitError::NotAMapping { .. })
        ));
        assert!(matches!(
            SigV4Trait::new(json!({"name": 5})),
            Err(TraitError::InvalidField { .. })
        ));
        assert!(SigV4Trait::from_document(None).is_err());
    }

    #[test]
    fn typed_traits_are_built_from_matching_dynamic_traits() {
        let dynamic = DynamicTrait::new(SigV4Trait::ID, json!({"name": "svc"}));
        assert_eq!(SigV4Trait::from_dynamic(&dynamic).unwrap().name(), "svc");

        let err = RestJson1Trait::from_dynamic(&dynamic).unwrap_err();
        assert!(matches!(err, TraitError::IdMismatch { .. }));
    }

    #[test]
    fn trait_ids() {
        assert_eq!(RestJson1Trait::ID.to_string(), "aws.protocols#restJson1");
        assert_eq!(SigV4Trait::ID.to_string(), "aws.auth#sigv4");
    }
}
