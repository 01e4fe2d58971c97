//! Decision document generation.
//!
//! Turns a [`DecisionRecord`] into a finished "Stewards Decision" PDF:
//! - `normalize` - record to fully-defaulted [`DecisionView`]
//! - `layout` / `fonts` - width measurement and greedy wrapping
//! - `direct` - in-process A4 rendering through `canvas`
//! - `template` / `converter` - template fill plus external conversion
//! - `filename` - attachment name policy
//! - `service` - strategy selection and the `generate` entry point

pub mod canvas;
pub mod converter;
pub mod direct;
pub mod filename;
pub mod fonts;
pub mod handlers;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod service;
pub mod template;
pub mod traits;

pub use direct::DirectRenderer;
pub use model::{DecisionRecord, DecisionView, EventKind};
pub use service::{DecisionService, RenderStrategy};
pub use template::TemplateRenderer;
pub use traits::DecisionRenderer;

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that abort a single generation request.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("decision template not found at {0}")]
    TemplateNotFound(PathBuf),
    #[error("failed to load decision template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("failed to prepare scratch directory: {0}")]
    Workspace(#[source] std::io::Error),
    #[error("failed to write filled template: {0}")]
    WriteFilled(#[source] std::io::Error),
    #[error("document converter could not be started: {0}")]
    ConverterUnavailable(#[source] std::io::Error),
    #[error("failed waiting for document converter: {0}")]
    ConverterWait(#[source] std::io::Error),
    #[error("document converter exited with status {}: {stderr}", exit_label(.code))]
    ConversionFailed { code: Option<i32>, stderr: String },
    #[error("document converter did not finish within {0:?}")]
    ConversionTimeout(Duration),
    #[error("failed to read converted document: {0}")]
    ReadOutput(#[source] std::io::Error),
    #[error("failed to render decision document: {0}")]
    RenderFault(String),
}

impl GeneratorError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorError::TemplateNotFound(_) => "TemplateNotFound",
            GeneratorError::TemplateIo(_) => "TemplateIo",
            GeneratorError::Workspace(_) | GeneratorError::WriteFilled(_) => "WorkspaceError",
            GeneratorError::ConverterUnavailable(_) => "ConverterUnavailable",
            GeneratorError::ConverterWait(_) | GeneratorError::ConversionFailed { .. } => {
                "ConversionFailed"
            }
            GeneratorError::ConversionTimeout(_) => "ConversionTimeout",
            GeneratorError::ReadOutput(_) => "ConversionOutputMissing",
            GeneratorError::RenderFault(_) => "RenderFault",
        }
    }

    /// Message safe to show to untrusted callers: no paths, no converter output.
    pub fn public_message(&self) -> &'static str {
        match self {
            GeneratorError::TemplateNotFound(_) | GeneratorError::TemplateIo(_) => {
                "Decision template is unavailable"
            }
            GeneratorError::Workspace(_) | GeneratorError::WriteFilled(_) => {
                "Failed to prepare document workspace"
            }
            GeneratorError::ConverterUnavailable(_) => "Document converter is unavailable",
            GeneratorError::ConverterWait(_)
            | GeneratorError::ConversionFailed { .. }
            | GeneratorError::ReadOutput(_) => "Document conversion failed",
            GeneratorError::ConversionTimeout(_) => "Document conversion timed out",
            GeneratorError::RenderFault(_) => "Failed to render decision document",
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "signal".to_string(),
    }
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    /// Attachment name including the `.pdf` extension.
    pub filename: String,
    pub pdf: Vec<u8>,
    pub view: DecisionView,
}
