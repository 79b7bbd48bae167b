//! Error taxonomy for the dehazing pipeline.
//!
//! All failures are deterministic functions of input and configuration and
//! surface immediately with enough context (stage, offending value) to
//! diagnose. There is no partial-result mode: either the full pipeline
//! completes or it aborts with no output written.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DehazeError {
    /// Zero-dimension or otherwise unusable input; detected before any stage.
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    /// An atmospheric-light channel resolved to a non-positive value, so the
    /// channel-wise division in transmission estimation is undefined.
    #[error("atmospheric light channel {channel} resolved to {value}; transmission is undefined")]
    DegenerateAtmosphericLight { channel: usize, value: f32 },

    /// A tunable parameter failed validation before pipeline execution.
    #[error("parameter `{name}` = {value} out of range: must be {constraint}")]
    ParameterOutOfRange {
        name: &'static str,
        value: f32,
        constraint: &'static str,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
