//! Error-code and discriminator parsing for AWS JSON protocols.
//!
//! Services report error types as bare names (`FooError`), absolute shape ids
//! (`com.example#FooError`), or either of those followed by a `:` and a URI
//! that only has meaning to the service. All three resolve to the same id.

use model::{Document, ShapeId};

/// Keys that may carry a type tag in a JSON body, in lookup order.
const DISCRIMINATOR_KEYS: [&str; 2] = ["__type", "code"];

/// Resolves an error code to a shape id.
///
/// Anything after the first `:` is discarded. Unqualified names are placed in
/// `default_namespace`. Returns `None` if nothing usable remains, if an
/// unqualified name has no namespace to go into, or if a qualified code is not
/// a valid shape id.
pub fn parse_error_code(code: &str, default_namespace: Option<&str>) -> Option<ShapeId> {
    let code = code.split(':').next().unwrap_or_default();
    if code.is_empty() {
        return None;
    }
    if code.contains('#') {
        return ShapeId::parse(code).ok();
    }
    ShapeId::from_parts(default_namespace?, code).ok()
}

/// Reads the type tag of a JSON object document.
///
/// `__type` is preferred; `code` is consulted only when `__type` is absent.
/// The tag must be a string and is resolved with [`parse_error_code`].
/// Non-object documents have no tag.
pub fn parse_document_discriminator(
    document: &Document,
    default_namespace: Option<&str>,
) -> Option<ShapeId> {
    let object = document.value().as_object()?;
    let tag = DISCRIMINATOR_KEYS.iter().find_map(|key| object.get(*key))?;
    parse_error_code(tag.as_str()?, default_namespace)
}
