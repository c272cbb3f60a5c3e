//! Read-only view of a received HTTP response.
//!
//! The binding never performs I/O; it only inspects responses that the HTTP
//! client framework has already received and buffered.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// A single header (or trailer) field and all of its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    name: String,
    values: Vec<String>,
}

impl Field {
    /// Creates a field with the given values, in order.
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// The field name as first received.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All values, in the order received. May be empty.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Ordered collection of fields with case-insensitive name lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fields {
    entries: Vec<Field>,
}

impl Fields {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds fields from `(name, value)` pairs.
    ///
    /// Repeated names (compared case-insensitively) are grouped into one
    /// field whose position is that of the first occurrence.
    pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let mut fields = Self::new();
        for (name, value) in pairs {
            fields.append(name, value);
        }
        fields
    }

    /// Appends a value to the field `name`, creating the field if needed.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.entries[i].values.push(value.into()),
            None => self.entries.push(Field::new(name, vec![value.into()])),
        }
    }

    /// Inserts a field, replacing any existing field with the same name.
    pub fn insert(&mut self, field: Field) {
        match self.position(&field.name) {
            Some(i) => self.entries[i] = field,
            None => self.entries.push(field),
        }
    }

    /// Looks up a field by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.position(name).map(|i| &self.entries[i])
    }

    /// Returns `true` if a field with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.entries.iter()
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// A fully received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Reason phrase, when the transport provides one.
    #[serde(default)]
    pub reason: Option<String>,
    /// Header fields.
    #[serde(default)]
    pub fields: Fields,
    /// Buffered body bytes.
    #[serde(default)]
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with no reason phrase and an empty body.
    pub fn new(status: u16, fields: Fields) -> Self {
        Self {
            status,
            reason: None,
            fields,
            body: Vec::new(),
        }
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the reason phrase.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
