// SPDX-License-Identifier: MPL-2.0
//! Neural style transfer: the inference port and its errors.
//!
//! The application talks to the model through the [`StyleTransfer`] trait so
//! that state-machine tests can substitute a scripted implementation. The
//! real ONNX-backed implementation lives in [`onnx`].

pub mod onnx;

pub use onnx::OnnxStyleTransfer;

use crate::error::Error;
use crate::media::image::NormalizedImage;

/// Result type for style transfer operations.
pub type StylizeResult<T> = Result<T, StylizeError>;

/// Which network variant to run.
///
/// The fast variant trades quality for latency and is used for per-frame
/// filtering during recording. When no fast model is available the full
/// network is used for both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionMode {
    /// Full-quality network, used for still-image combination.
    Full,
    /// Low-latency network, used for live camera frames.
    Fast,
}

/// Errors that can occur during style transfer inference.
#[derive(Debug, Clone)]
pub enum StylizeError {
    /// Model file not found at the expected path.
    ModelNotFound(String),
    /// Model session not initialized.
    SessionNotInitialized,
    /// ONNX inference failed.
    InferenceFailed(String),
    /// Image preprocessing failed.
    PreprocessingFailed(String),
    /// Image postprocessing failed.
    PostprocessingFailed(String),
}

impl std::fmt::Display for StylizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StylizeError::ModelNotFound(path) => write!(f, "Model file not found: {path}"),
            StylizeError::SessionNotInitialized => write!(f, "ONNX session not initialized"),
            StylizeError::InferenceFailed(msg) => write!(f, "Inference failed: {msg}"),
            StylizeError::PreprocessingFailed(msg) => write!(f, "Preprocessing failed: {msg}"),
            StylizeError::PostprocessingFailed(msg) => write!(f, "Postprocessing failed: {msg}"),
        }
    }
}

impl std::error::Error for StylizeError {}

impl From<StylizeError> for Error {
    fn from(err: StylizeError) -> Self {
        Error::ModelInference(err.to_string())
    }
}

/// The inference seam between the application and the network.
///
/// Both inputs are canonical-size normalized images; the output has the same
/// shape. Implementations may keep mutable session state.
pub trait StyleTransfer {
    /// Transfers the style of `style` onto `content`.
    ///
    /// # Errors
    ///
    /// Returns a [`StylizeError`] if the session is missing or inference
    /// fails.
    fn predict(
        &mut self,
        style: &NormalizedImage,
        content: &NormalizedImage,
        mode: PredictionMode,
    ) -> StylizeResult<NormalizedImage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StylizeError::SessionNotInitialized;
        assert_eq!(err.to_string(), "ONNX session not initialized");

        let err = StylizeError::InferenceFailed("bad shape".to_string());
        assert_eq!(err.to_string(), "Inference failed: bad shape");
    }

    #[test]
    fn stylize_error_converts_to_model_inference() {
        let err: Error = StylizeError::ModelNotFound("model.onnx".to_string()).into();
        match err {
            Error::ModelInference(msg) => assert!(msg.contains("model.onnx")),
            other => panic!("unexpected error kind: {other:?}"),
        }
    }
}
