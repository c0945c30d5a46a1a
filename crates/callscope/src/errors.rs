//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use callscope_graph::GraphError;
use callscope_taglist::TaglistError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("unsupported encoding '{0}': only utf-8 offsets are accepted")]
    UnsupportedEncoding(String),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("call hierarchy failed: {0}")]
    Graph(#[from] GraphError),
    #[error("tag listing failed: {0}")]
    Taglist(#[from] TaglistError),
    #[error("failed to serialise response: {0}")]
    SerialiseResponse(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
