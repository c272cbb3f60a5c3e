//! Core domain for the REST/JSON protocol binding.
//!
//! This crate contains the shape model, decoded documents, trait values, the
//! HTTP response view, and the error types shared by every binding crate.
//! Protocol crates implement the port traits defined here; they never add
//! model rules.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies. It
//! defines *what* a protocol must supply; protocol crates define *how*.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | [`ShapeId`] parsing and formatting |
//! | [`types`] | [`ShapeType`], [`Schema`], [`ApiOperation`], prelude schemas |
//! | [`documents`] | [`Document`] and the [`Discriminated`] port |
//! | [`traits`] | The [`Trait`] contract and raw [`DynamicTrait`] values |
//! | [`http`] | Read-only [`HttpResponse`] and case-insensitive [`Fields`] |
//! | [`protocols`] | Port traits consumed by the HTTP client framework |
//! | [`errors`] | Discriminator, trait, shape-id, and call errors |

pub mod documents;
pub mod errors;
pub mod http;
pub mod identifiers;
pub mod protocols;
pub mod traits;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use documents::{Discriminated, Document, DocumentValue};
pub use errors::{
    json_type_name, CallError, DiscriminatorError, Fault, RetryPolicy, ShapeIdError, TraitError,
};
pub use http::{Field, Fields, HttpResponse};
pub use identifiers::ShapeId;
pub use protocols::{
    ErrorRegistry, ErrorResolution, HttpBindingClientProtocol, HttpErrorIdentifier, PayloadCodec,
};
pub use traits::{DynamicTrait, Trait};
pub use types::{document_schema, ApiOperation, Schema, ShapeType, DOCUMENT_ID};
