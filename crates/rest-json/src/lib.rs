//! `aws.protocols#restJson1` client protocol binding.
//!
//! Implements the [`model::HttpBindingClientProtocol`] trait for REST/JSON
//! services:
//!
//! - [`AwsErrorIdentifier`]: reads the `x-amzn-errortype` header of a failed
//!   response and resolves it to a modeled error shape id.
//! - [`AwsJsonDocument`]: a JSON document that resolves the concrete shape
//!   of polymorphic payloads from their `__type` / `code` tag.
//! - [`RestJson1Trait`], [`SigV4Trait`]: validated protocol and auth
//!   configuration, built once when the model is loaded.
//! - [`RestJsonClientProtocol`]: the façade handed to the HTTP client
//!   framework.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Nothing here performs I/O; transport, retries, and
//! member binding belong to the HTTP client framework. The [`model`] crate
//! sees only its own port traits.

mod document;
mod identifier;
mod parsing;
mod protocol;
mod traits;

pub use document::AwsJsonDocument;
pub use identifier::{AwsErrorIdentifier, ERROR_TYPE_HEADER};
pub use parsing::{parse_document_discriminator, parse_error_code};
pub use protocol::RestJsonClientProtocol;
pub use traits::{RestJson1Trait, SigV4Trait, DEFAULT_HTTP_VERSION};
