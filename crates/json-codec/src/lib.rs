//! JSON payload codec.
//!
//! Implements the [`model::PayloadCodec`] trait over `serde_json`. Decoded
//! payloads become [`JsonDocument`]s carrying their schema and the codec's
//! [`JsonSettings`]. Protocols customise document behaviour by supplying
//! their own [`DocumentClass`] to [`JsonCodec`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Byte-level JSON parsing and encoding live here. The
//! [`model`] crate sees only [`model::PayloadCodec`].

mod codec;
mod document;
mod errors;
mod settings;

pub use codec::{JsonCodec, JSON_MEDIA_TYPE};
pub use document::{DocumentClass, JsonDocument};
pub use errors::JsonCodecError;
pub use settings::JsonSettings;
