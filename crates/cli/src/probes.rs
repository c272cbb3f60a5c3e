//! Probe implementations. Each returns the text to print on success.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::ValueEnum;
use json_codec::JsonSettings;
use model::{
    ApiOperation, Discriminated, ErrorResolution, Fields, HttpBindingClientProtocol,
    HttpResponse, PayloadCodec, Schema, ShapeId, ShapeType,
};
use rest_json::{RestJson1Trait, RestJsonClientProtocol, SigV4Trait};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// On-disk description of a received response.
///
/// A string `body` is used verbatim; any other JSON value is re-encoded.
#[derive(Debug, Deserialize)]
struct ResponseFixture {
    status: u16,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    headers: Vec<(String, String)>,
    #[serde(default)]
    body: Option<Value>,
}

impl ResponseFixture {
    fn into_response(self) -> anyhow::Result<HttpResponse> {
        let body = match self.body {
            None => Vec::new(),
            Some(Value::String(raw)) => raw.into_bytes(),
            Some(value) => serde_json::to_vec(&value).context("re-encoding fixture body")?,
        };
        let mut response = HttpResponse::new(self.status, Fields::from_pairs(self.headers))
            .with_body(body);
        response.reason = self.reason;
        Ok(response)
    }
}

fn read_response(path: &Path) -> anyhow::Result<HttpResponse> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading response fixture {}", path.display()))?;
    let fixture: ResponseFixture = serde_json::from_str(&text)
        .with_context(|| format!("parsing response fixture {}", path.display()))?;
    fixture.into_response()
}

// ---------------------------------------------------------------------------
// identify
// ---------------------------------------------------------------------------

pub fn identify(
    operation: ShapeId,
    response: &Path,
    known: Vec<ShapeId>,
) -> anyhow::Result<String> {
    let response = read_response(response)?;
    let operation = ApiOperation::new(Arc::new(Schema::new(operation, ShapeType::Operation)));
    let protocol = RestJsonClientProtocol::new(
        JsonSettings::new().with_default_namespace(operation.namespace()),
    );
    let registry: BTreeSet<ShapeId> = known.into_iter().collect();
    info!(operation = %operation.schema().id(), status = response.status, "identifying response");

    let mut out = String::new();
    if protocol.is_success(&operation, &response) {
        writeln!(out, "status {} is a success; nothing to identify", response.status)?;
        return Ok(out);
    }

    match protocol.error_identifier().identify(&operation, &response) {
        Some(id) => writeln!(out, "error-type: {id}")?,
        None => writeln!(out, "error-type: unknown")?,
    }
    match protocol.resolve_error(&operation, &response, &registry) {
        ErrorResolution::Modeled(id) => writeln!(out, "resolution: modeled {id}")?,
        ErrorResolution::Unmodeled(error) => writeln!(
            out,
            "resolution: unmodeled fault={:?} throttling={} retry={:?}\nmessage: {}",
            error.fault, error.is_throttling_error, error.retry, error.message
        )?,
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// discriminate
// ---------------------------------------------------------------------------

pub fn discriminate(
    schema: ShapeId,
    shape_type: ShapeType,
    namespace: Option<String>,
    body: &Path,
) -> anyhow::Result<String> {
    let payload =
        std::fs::read(body).with_context(|| format!("reading payload {}", body.display()))?;
    let settings = match namespace {
        Some(ns) => JsonSettings::new().with_default_namespace(ns),
        None => JsonSettings::new(),
    };
    let protocol = RestJsonClientProtocol::new(settings);
    let schema = Arc::new(Schema::new(schema, shape_type));

    let document = protocol
        .payload_codec()
        .read_document(&payload, schema)
        .with_context(|| format!("decoding payload {}", body.display()))?;
    let id = document.discriminator()?;
    Ok(format!("discriminator: {id}\n"))
}

// ---------------------------------------------------------------------------
// trait
// ---------------------------------------------------------------------------

/// Traits the probe knows how to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TraitKind {
    /// `aws.protocols#restJson1`
    RestJson1,
    /// `aws.auth#sigv4`
    Sigv4,
}

pub fn parse_trait(kind: TraitKind, value: Option<&str>) -> anyhow::Result<String> {
    let value: Option<Value> = value
        .map(serde_json::from_str)
        .transpose()
        .context("trait value is not valid JSON")?;

    let mut out = String::new();
    match kind {
        TraitKind::RestJson1 => {
            let parsed = RestJson1Trait::new(value)?;
            writeln!(out, "http: {}", parsed.http().join(", "))?;
            writeln!(out, "event-stream-http: {}", parsed.event_stream_http().join(", "))?;
        }
        TraitKind::Sigv4 => {
            let parsed = SigV4Trait::new(value.unwrap_or(Value::Null))?;
            writeln!(out, "name: {}", parsed.name())?;
        }
    }
    Ok(out)
}
