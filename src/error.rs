//! Error taxonomy for the generation pipeline.
//!
//! Loader and extractor errors are fatal to their job; the orchestrator
//! reports them and moves on to the next job. Emission-level schema
//! surprises never reach this enum — they degrade to the unconstrained
//! type during normalization instead.

use std::path::PathBuf;

/// Fatal errors a generation job can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A local spec path does not exist.
    #[error("OpenAPI spec file not found: {path}")]
    SpecNotFound { path: PathBuf },

    /// A remote spec fetch failed (transport error or non-success status).
    #[error("failed to fetch OpenAPI spec from {url}: {detail}")]
    SpecFetch { url: String, detail: String },

    /// Spec content is neither valid JSON nor valid YAML, or does not
    /// deserialize into an OpenAPI document.
    #[error("failed to parse OpenAPI spec from {source_name}: {detail}")]
    SpecParse { source_name: String, detail: String },

    /// An operation lacks the `operationId` that emitted symbol names
    /// are derived from. Fatal: there is no naming fallback.
    #[error("missing operationId for {method} {path}")]
    MissingOperationId { method: String, path: String },

    /// Job configuration failed schema validation.
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    /// A generated file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Build an `InvalidConfig` error enumerating missing mandatory fields.
    pub fn missing_config_fields(missing: &[&str]) -> Self {
        Error::InvalidConfig {
            message: format!("missing required field(s): {}", missing.join(", ")),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn spec_parse(source_name: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Error::SpecParse {
            source_name: source_name.into(),
            detail: detail.to_string(),
        }
    }
}
