//! Shape identifiers.
//!
//! Every modeled shape is named by a [`ShapeId`] of the form
//! `namespace#Name`, optionally followed by `$member` when the id refers to a
//! member of an aggregate shape. Ids are compared structurally, so two ids
//! parsed from the same text are always equal.

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ShapeIdError;

// ---------------------------------------------------------------------------
// ShapeId
// ---------------------------------------------------------------------------

/// A globally unique, namespaced identifier for a modeled shape.
///
/// Serialised as its canonical string form (`"com.example#Widget"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeId {
    namespace: Cow<'static, str>,
    name: Cow<'static, str>,
    member: Option<Cow<'static, str>>,
}

/// Returns `true` if `part` is non-empty and free of the `#`/`$` separators.
const fn is_valid_static_part(part: &str) -> bool {
    let bytes = part.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'#' || bytes[i] == b'$' {
            return false;
        }
        i += 1;
    }
    true
}

impl ShapeId {
    /// Creates a shape id from compile-time constant parts.
    ///
    /// Intended for well-known ids (prelude shapes, protocol and trait ids).
    ///
    /// # Panics
    ///
    /// Panics if either part is empty or contains `#` or `$`. In a `const`
    /// context this is a compile error rather than a runtime panic.
    pub const fn from_static(namespace: &'static str, name: &'static str) -> Self {
        assert!(
            is_valid_static_part(namespace) && is_valid_static_part(name),
            "invalid static shape id"
        );
        Self {
            namespace: Cow::Borrowed(namespace),
            name: Cow::Borrowed(name),
            member: None,
        }
    }

    /// Parses an absolute shape id such as `com.example#Widget` or
    /// `com.example#Widget$size`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeIdError`] if the `#` separator is missing or if the
    /// namespace, name, or member part is empty.
    pub fn parse(id: &str) -> Result<Self, ShapeIdError> {
        let Some((namespace, rest)) = id.split_once('#') else {
            return Err(ShapeIdError::MissingNamespace { id: id.to_owned() });
        };
        let (name, member) = match rest.split_once('$') {
            Some((name, member)) => (name, Some(member)),
            None => (rest, None),
        };

        if namespace.is_empty() || name.is_empty() || member.is_some_and(str::is_empty) {
            return Err(ShapeIdError::EmptyPart { id: id.to_owned() });
        }

        Ok(Self {
            namespace: Cow::Owned(namespace.to_owned()),
            name: Cow::Owned(name.to_owned()),
            member: member.map(|m| Cow::Owned(m.to_owned())),
        })
    }

    /// Builds a shape id from a namespace and a shape name.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeIdError::EmptyPart`] if either part is empty, or if the
    /// parts would produce an ambiguous id (they contain `#` or `$`).
    pub fn from_parts(namespace: &str, name: &str) -> Result<Self, ShapeIdError> {
        let reserved = |s: &str| s.contains('#') || s.contains('$');
        if namespace.is_empty() || name.is_empty() || reserved(namespace) || reserved(name) {
            return Err(ShapeIdError::EmptyPart {
                id: format!("{namespace}#{name}"),
            });
        }
        Ok(Self {
            namespace: Cow::Owned(namespace.to_owned()),
            name: Cow::Owned(name.to_owned()),
            member: None,
        })
    }

    /// Returns a copy of this id that refers to `member` of this shape.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeIdError::EmptyPart`] if `member` is empty.
    pub fn with_member(&self, member: &str) -> Result<Self, ShapeIdError> {
        if member.is_empty() {
            return Err(ShapeIdError::EmptyPart {
                id: format!("{self}$"),
            });
        }
        Ok(Self {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            member: Some(Cow::Owned(member.to_owned())),
        })
    }

    /// The namespace part (before `#`).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The shape name (between `#` and `$`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member name, if this id refers to a member.
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)?;
        if let Some(member) = &self.member {
            write!(f, "${member}")?;
        }
        Ok(())
    }
}

impl FromStr for ShapeId {
    type Err = ShapeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShapeId {
    type Error = ShapeIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShapeId> for String {
    fn from(id: ShapeId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespace_and_name() {
        let id = ShapeId::parse("com.example#Widget").unwrap();
        assert_eq!(id.namespace(), "com.example");
        assert_eq!(id.name(), "Widget");
        assert_eq!(id.member(), None);
        assert_eq!(id.to_string(), "com.example#Widget");
    }

    #[test]
    fn parses_member() {
        let id: ShapeId = "com.example#Widget$size".parse().unwrap();
        assert_eq!(id.member(), Some("size"));
        assert_eq!(id.to_string(), "com.example#Widget$size");
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["Widget", "#Widget", "com.example#", "com.example#Widget$", ""] {
            assert!(ShapeId::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn from_parts_matches_parse() {
        let built = ShapeId::from_parts("com.example", "Widget").unwrap();
        assert_eq!(built, ShapeId::parse("com.example#Widget").unwrap());
        assert!(ShapeId::from_parts("", "Widget").is_err());
        assert!(ShapeId::from_parts("com.example", "a#b").is_err());
    }

    #[test]
    fn static_ids_equal_parsed_ids() {
        const WIDGET: ShapeId = ShapeId::from_static("com.example", "Widget");
        assert_eq!(WIDGET, ShapeId::parse("com.example#Widget").unwrap());
    }

    #[test]
    fn with_member_keeps_the_container() {
        let id = ShapeId::parse("com.example#Widget").unwrap();
        let member = id.with_member("size").unwrap();
        assert_eq!(member.name(), "Widget");
        assert_eq!(member.member(), Some("size"));
        assert!(id.with_member("").is_err());
    }

    #[test]
    fn serialises_as_string() {
        let id = ShapeId::parse("com.example#Widget").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"com.example#Widget\"");
        let back: ShapeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ShapeId>("\"nope\"").is_err());
    }
}
