//! Error identification from response headers.

use model::{ApiOperation, HttpErrorIdentifier, HttpResponse, ShapeId};
use tracing::{debug, trace};

use crate::parse_error_code;

/// Header naming the modeled error a response carries.
pub const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// Identifies errors from the `x-amzn-errortype` header.
///
/// Unqualified codes are resolved against the operation's namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AwsErrorIdentifier;

impl AwsErrorIdentifier {
    /// Creates an identifier.
    pub fn new() -> Self {
        Self
    }
}

impl HttpErrorIdentifier for AwsErrorIdentifier {
    fn identify(&self, operation: &ApiOperation, response: &HttpResponse) -> Option<ShapeId> {
        let Some(field) = response.fields.get(ERROR_TYPE_HEADER) else {
            trace!(status = response.status, "no error type header");
            return None;
        };
        let code = field.values().first()?;
        let id = parse_error_code(code, Some(operation.namespace()));
        if id.is_none() {
            debug!(
                code = %code,
                namespace = operation.namespace(),
                "unresolvable error type header"
            );
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use model::{Field, Fields, Schema, ShapeType};

    use super::*;

    fn operation() -> ApiOperation {
        ApiOperation::new(Arc::new(Schema::new(
            ShapeId::parse("com.test#TestOperation").unwrap(),
            ShapeType::Operation,
        )))
    }

    fn identify(fields: Fields) -> Option<ShapeId> {
        AwsErrorIdentifier::new().identify(&operation(), &HttpResponse::new(500, fields))
    }

    #[test]
    fn identifies_from_header() {
        let cases = [
            ("FooError", Some("com.test#FooError")),
            (
                "FooError:http://internal.amazon.com/coral/com.amazon.coral.validate/",
                Some("com.test#FooError"),
            ),
            (
                "com.test#FooError:http://internal.amazon.com/coral/com.amazon.coral.validate",
                Some("com.test#FooError"),
            ),
            ("", None),
        ];
        for (header, expected) in cases {
            let expected = expected.map(|s| ShapeId::parse(s).unwrap());
            let actual = identify(Fields::from_pairs([(ERROR_TYPE_HEADER, header)]));
            assert_eq!(actual, expected, "{header:?}");
        }
    }

    #[test]
    fn missing_header_is_unknown() {
        assert_eq!(identify(Fields::new()), None);
    }

    #[test]
    fn header_without_values_is_unknown() {
        let mut fields = Fields::new();
        fields.insert(Field::new(ERROR_TYPE_HEADER, Vec::new()));
        assert_eq!(identify(fields), None);
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let actual = identify(Fields::from_pairs([("X-Amzn-ErrorType", "ValidationException")]));
        assert_eq!(actual.unwrap().to_string(), "com.test#ValidationException");
    }

    #[test]
    fn only_the_first_value_is_used() {
        let actual = identify(Fields::from_pairs([
            (ERROR_TYPE_HEADER, "FooError"),
            (ERROR_TYPE_HEADER, "BarError"),
        ]));
        assert_eq!(actual.unwrap().name(), "FooError");
    }
}
