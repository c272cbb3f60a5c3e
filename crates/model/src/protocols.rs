//! Port traits between the protocol binding and the HTTP client framework.
//!
//! The framework owns transport and member binding; a protocol supplies the
//! pieces defined here. [`HttpBindingClientProtocol::resolve_error`] ties them
//! together for failed responses.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::documents::{Discriminated, Document};
use crate::errors::{CallError, Fault, RetryPolicy};
use crate::http::HttpResponse;
use crate::types::{document_schema, ApiOperation, Schema};
use crate::ShapeId;

// ---------------------------------------------------------------------------
// Error identification
// ---------------------------------------------------------------------------

/// Identifies the modeled error shape a failed response represents.
pub trait HttpErrorIdentifier: std::fmt::Debug + Send + Sync {
    /// Returns the error shape id, or `None` if the response does not name one.
    ///
    /// `None` is an expected outcome: callers fall back to generic error
    /// handling.
    fn identify(&self, operation: &ApiOperation, response: &HttpResponse) -> Option<ShapeId>;
}

/// The set of error shapes a caller knows how to decode.
pub trait ErrorRegistry {
    /// Returns `true` if `id` names a registered error shape.
    fn contains(&self, id: &ShapeId) -> bool;
}

impl<S: BuildHasher> ErrorRegistry for HashSet<ShapeId, S> {
    fn contains(&self, id: &ShapeId) -> bool {
        HashSet::contains(self, id)
    }
}

impl ErrorRegistry for BTreeSet<ShapeId> {
    fn contains(&self, id: &ShapeId) -> bool {
        BTreeSet::contains(self, id)
    }
}

impl ErrorRegistry for [ShapeId] {
    fn contains(&self, id: &ShapeId) -> bool {
        self.iter().any(|known| known == id)
    }
}

// ---------------------------------------------------------------------------
// Payload codec
// ---------------------------------------------------------------------------

/// Serialises and deserialises HTTP payloads.
pub trait PayloadCodec: Send + Sync {
    /// The document type produced by [`PayloadCodec::read_document`].
    type Document: Discriminated;

    /// Failure type for malformed payloads.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The media type this codec reads and writes.
    fn media_type(&self) -> &str;

    /// Decodes `source` into a document with the given schema.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadCodec::Error`] if `source` is not a valid payload.
    fn read_document(&self, source: &[u8], schema: Arc<Schema>)
        -> Result<Self::Document, Self::Error>;

    /// Encodes a document.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadCodec::Error`] if the value cannot be encoded.
    fn write_document(&self, document: &Document) -> Result<Vec<u8>, Self::Error>;
}

// ---------------------------------------------------------------------------
// Protocol
// ---------------------------------------------------------------------------

/// Outcome of inspecting a failed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorResolution {
    /// The response is a registered error shape; decode it with that shape.
    Modeled(ShapeId),
    /// No registered error shape matched.
    Unmodeled(CallError),
}

/// An HTTP protocol that binds operation members to the message with HTTP
/// binding traits and serialises payloads with a codec.
pub trait HttpBindingClientProtocol: Send + Sync {
    /// Codec used for input and output payloads.
    type Codec: PayloadCodec;

    /// Shape id of the protocol trait.
    fn id(&self) -> &ShapeId;

    /// The payload codec.
    fn payload_codec(&self) -> &Self::Codec;

    /// Media type of the HTTP payload.
    fn content_type(&self) -> &str;

    /// Identifies error shapes from response metadata.
    fn error_identifier(&self) -> &dyn HttpErrorIdentifier;

    /// Returns `true` if `response` is a success for `operation`.
    fn is_success(&self, _operation: &ApiOperation, response: &HttpResponse) -> bool {
        (200..300).contains(&response.status)
    }

    /// Works out which error a failed response represents.
    ///
    /// The error identifier is consulted first. If it finds nothing, the body
    /// is decoded as an untyped document and its discriminator is used when
    /// the registry knows it. Body decoding problems are not errors here;
    /// they simply leave the response unidentified.
    fn resolve_error<R>(
        &self,
        operation: &ApiOperation,
        response: &HttpResponse,
        registry: &R,
    ) -> ErrorResolution
    where
        R: ErrorRegistry + ?Sized,
    {
        let mut error_id = self.error_identifier().identify(operation, response);

        if error_id.is_none() && !response.body.is_empty() {
            error_id = self.discriminate_body(&response.body, registry);
        }

        if let Some(id) = error_id.as_ref().filter(|id| registry.contains(id)) {
            debug!(operation = %operation.schema().id(), error = %id, "identified modeled error");
            return ErrorResolution::Modeled(id.clone());
        }

        let status = response.status;
        let is_throttle = status == 429;
        let mut message = format!(
            "Unknown error for operation {} - status: {status}",
            operation.schema().id()
        );
        if let Some(id) = &error_id {
            message.push_str(&format!(" - id: {id}"));
        }
        if let Some(reason) = &response.reason {
            message.push_str(&format!(" - reason: {reason}"));
        }
        debug!(operation = %operation.schema().id(), status, "unmodeled error response");

        ErrorResolution::Unmodeled(CallError {
            message,
            fault: if status < 500 { Fault::Client } else { Fault::Server },
            retry: if is_throttle {
                RetryPolicy::Retryable { after: None }
            } else {
                RetryPolicy::Undetermined
            },
            is_throttling_error: is_throttle,
        })
    }

    #[doc(hidden)]
    fn discriminate_body<R>(&self, body: &[u8], registry: &R) -> Option<ShapeId>
    where
        R: ErrorRegistry + ?Sized,
    {
        let document = match self.payload_codec().read_document(body, document_schema()) {
            Ok(document) => document,
            Err(error) => {
                debug!(%error, "error body is not a readable document");
                return None;
            }
        };
        match document.discriminator() {
            Ok(id) if registry.contains(&id) => Some(id),
            Ok(id) => {
                trace!(%id, "body discriminator is not a registered error");
                None
            }
            Err(error) => {
                trace!(%error, "error body has no discriminator");
                None
            }
        }
    }
}
