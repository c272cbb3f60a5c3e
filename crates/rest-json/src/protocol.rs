//! The `aws.protocols#restJson1` client protocol.

use json_codec::{JsonCodec, JsonSettings, JSON_MEDIA_TYPE};
use model::{HttpBindingClientProtocol, HttpErrorIdentifier, Schema, ShapeId, Trait, TraitError};
use tracing::debug;

use crate::{AwsErrorIdentifier, AwsJsonDocument, RestJson1Trait};

/// An implementation of the `aws.protocols#restJson1` protocol.
///
/// Holds only fixed associations; one instance serves every request made to
/// a service.
#[derive(Debug, Clone)]
pub struct RestJsonClientProtocol {
    id: ShapeId,
    codec: JsonCodec<AwsJsonDocument>,
    error_identifier: AwsErrorIdentifier,
    protocol_trait: RestJson1Trait,
}

impl RestJsonClientProtocol {
    /// Creates the protocol with default `restJson1` settings.
    pub fn new(settings: JsonSettings) -> Self {
        Self::with_trait(settings, RestJson1Trait::default())
    }

    /// Creates the protocol for a service whose schema carries the
    /// `restJson1` trait.
    ///
    /// Document discriminators are qualified with the service namespace.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError`] if the service has no `restJson1` trait or the
    /// trait value is malformed.
    pub fn for_service(service: &Schema) -> Result<Self, TraitError> {
        let protocol_trait = service.expect_trait::<RestJson1Trait>()?;
        debug!(
            service = %service.id(),
            http = ?protocol_trait.http(),
            event_stream_http = ?protocol_trait.event_stream_http(),
            "loaded restJson1 protocol"
        );
        let settings = JsonSettings::new().with_default_namespace(service.id().namespace());
        Ok(Self::with_trait(settings, protocol_trait))
    }

    fn with_trait(settings: JsonSettings, protocol_trait: RestJson1Trait) -> Self {
        Self {
            id: RestJson1Trait::ID,
            codec: JsonCodec::new(settings),
            error_identifier: AwsErrorIdentifier::new(),
            protocol_trait,
        }
    }

    /// The validated protocol trait this instance was configured with.
    pub fn protocol_trait(&self) -> &RestJson1Trait {
        &self.protocol_trait
    }
}

impl Default for RestJsonClientProtocol {
    fn default() -> Self {
        Self::new(JsonSettings::default())
    }
}

impl HttpBindingClientProtocol for RestJsonClientProtocol {
    type Codec = JsonCodec<AwsJsonDocument>;

    fn id(&self) -> &ShapeId {
        &self.id
    }

    fn payload_codec(&self) -> &Self::Codec {
        &self.codec
    }

    fn content_type(&self) -> &str {
        JSON_MEDIA_TYPE
    }

    fn error_identifier(&self) -> &dyn HttpErrorIdentifier {
        &self.error_identifier
    }
}
