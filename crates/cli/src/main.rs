//! `restjson-probe` entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse arguments**: `clap` derive; see [`Command`] for the probes.
//! 2. **Wire observability**: configure `tracing-subscriber` with either a
//!    human-readable or a JSON layer, filtered by `RUST_LOG`. All `tracing`
//!    events emitted by the library crates flow through this layer to stderr.
//! 3. **Construct the protocol**: build a [`rest_json::RestJsonClientProtocol`]
//!    and run the selected probe against fixture files.
//!
//! Probe results go to stdout; a failed probe exits non-zero.

mod probes;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use model::{ShapeId, ShapeType};
use tracing_subscriber::EnvFilter;

/// Inspect how the restJson1 binding interprets responses, payloads, and
/// protocol traits.
#[derive(Debug, Parser)]
#[command(name = "restjson-probe", version)]
struct Cli {
    /// Log output format (logs are written to stderr).
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Identify the error shape of a failed response fixture.
    Identify {
        /// Operation the response belongs to (e.g. `com.example#GetWidget`).
        #[arg(long)]
        operation: ShapeId,
        /// Response fixture file (JSON: status, reason, headers, body).
        #[arg(long)]
        response: PathBuf,
        /// Error shapes the caller can decode. Repeatable.
        #[arg(long = "known")]
        known: Vec<ShapeId>,
    },

    /// Resolve the discriminator of a JSON payload.
    Discriminate {
        /// Shape id statically assigned to the payload.
        #[arg(long)]
        schema: ShapeId,
        /// Shape type of the assigned shape (e.g. `union`, `structure`).
        #[arg(long, default_value = "document")]
        shape_type: ShapeType,
        /// Namespace for unqualified type tags.
        #[arg(long)]
        namespace: Option<String>,
        /// JSON payload file.
        #[arg(long)]
        body: PathBuf,
    },

    /// Validate a protocol or auth trait value and print its normalized form.
    Trait {
        /// Which trait to build.
        #[arg(long, value_enum)]
        kind: probes::TraitKind,
        /// Raw trait value as JSON. Omit for a trait applied without a value.
        #[arg(long)]
        value: Option<String>,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let output = match cli.command {
        Command::Identify {
            operation,
            response,
            known,
        } => probes::identify(operation, &response, known)?,
        Command::Discriminate {
            schema,
            shape_type,
            namespace,
            body,
        } => probes::discriminate(schema, shape_type, namespace, &body)?,
        Command::Trait { kind, value } => probes::parse_trait(kind, value.as_deref())?,
    };
    print!("{output}");
    Ok(())
}
