// SPDX-License-Identifier: MPL-2.0
//! ONNX-backed style transfer.
//!
//! Loads the full-quality network and, when present, a low-latency variant
//! for per-frame filtering. Images cross the boundary as NCHW float tensors
//! in the 0-1 range, matching how the networks were exported.

use super::{PredictionMode, StyleTransfer, StylizeError, StylizeResult};
use crate::media::image::{NormalizedImage, IMAGE_SIZE};
use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::{Path, PathBuf};

/// Filename of the full-quality network inside the model directory.
const MODEL_FILENAME: &str = "style_transfer.onnx";

/// Filename of the optional low-latency network.
const FAST_MODEL_FILENAME: &str = "style_transfer_fast.onnx";

/// Style transfer backed by ONNX Runtime sessions.
pub struct OnnxStyleTransfer {
    model_path: PathBuf,
    session: Option<Session>,
    fast_session: Option<Session>,
}

impl std::fmt::Debug for OnnxStyleTransfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxStyleTransfer")
            .field("model_path", &self.model_path)
            .field("session", &self.session.is_some())
            .field("fast_session", &self.fast_session.is_some())
            .finish()
    }
}

impl OnnxStyleTransfer {
    /// Creates an instance pointed at `model_dir` without loading anything.
    #[must_use]
    pub fn new(model_dir: &Path) -> Self {
        Self {
            model_path: model_dir.join(MODEL_FILENAME),
            session: None,
            fast_session: None,
        }
    }

    /// Loads the sessions from disk.
    ///
    /// The full-quality model is required; the fast variant is picked up
    /// when its file exists next to it and silently skipped otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the full model file is missing or either ONNX
    /// session fails to initialize.
    pub fn load_sessions(&mut self) -> StylizeResult<()> {
        if !self.model_path.exists() {
            return Err(StylizeError::ModelNotFound(
                self.model_path.display().to_string(),
            ));
        }
        self.session = Some(build_session(&self.model_path)?);

        let fast_path = self.model_path.with_file_name(FAST_MODEL_FILENAME);
        if fast_path.exists() {
            self.fast_session = Some(build_session(&fast_path)?);
        }
        Ok(())
    }

    /// Checks if the full-quality session is loaded and ready.
    #[must_use]
    pub fn is_session_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Checks if the dedicated low-latency session is loaded.
    #[must_use]
    pub fn has_fast_session(&self) -> bool {
        self.fast_session.is_some()
    }
}

impl StyleTransfer for OnnxStyleTransfer {
    fn predict(
        &mut self,
        style: &NormalizedImage,
        content: &NormalizedImage,
        mode: PredictionMode,
    ) -> StylizeResult<NormalizedImage> {
        // Fast mode falls back to the full network when no fast variant
        // was found at load time.
        let session = match mode {
            PredictionMode::Fast if self.fast_session.is_some() => self.fast_session.as_mut(),
            _ => self.session.as_mut(),
        }
        .ok_or(StylizeError::SessionNotInitialized)?;

        let style_tensor = to_nchw(style).as_standard_layout().into_owned();
        let content_tensor = to_nchw(content).as_standard_layout().into_owned();

        // The exported networks take the style image first and the content
        // image second; use the model's own input names when present.
        let style_name = session
            .inputs
            .first()
            .map_or_else(|| "style".to_string(), |i| i.name.clone());
        let content_name = session
            .inputs
            .get(1)
            .map_or_else(|| "content".to_string(), |i| i.name.clone());

        let style_ref = ort::value::TensorRef::from_array_view(&style_tensor)
            .map_err(|e| StylizeError::InferenceFailed(e.to_string()))?;
        let content_ref = ort::value::TensorRef::from_array_view(&content_tensor)
            .map_err(|e| StylizeError::InferenceFailed(e.to_string()))?;

        let outputs = session
            .run(ort::inputs![
                style_name.as_str() => style_ref,
                content_name.as_str() => content_ref,
            ])
            .map_err(|e| StylizeError::InferenceFailed(e.to_string()))?;

        from_nchw(&outputs)
    }
}

fn build_session(path: &Path) -> StylizeResult<Session> {
    Session::builder()
        .map_err(|e| StylizeError::InferenceFailed(e.to_string()))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| StylizeError::InferenceFailed(e.to_string()))?
        .commit_from_file(path)
        .map_err(|e| StylizeError::InferenceFailed(e.to_string()))
}

/// Lays a canonical HWC float buffer out as an NCHW tensor.
fn to_nchw(image: &NormalizedImage) -> Array4<f32> {
    let side = IMAGE_SIZE as usize;
    let pixels = image.pixels();
    let mut tensor = Array4::<f32>::zeros((1, 3, side, side));
    for y in 0..side {
        for x in 0..side {
            let base = (y * side + x) * 3;
            tensor[[0, 0, y, x]] = pixels[base];
            tensor[[0, 1, y, x]] = pixels[base + 1];
            tensor[[0, 2, y, x]] = pixels[base + 2];
        }
    }
    tensor
}

/// Converts the network output back into a canonical normalized image.
fn from_nchw(outputs: &ort::session::SessionOutputs<'_>) -> StylizeResult<NormalizedImage> {
    let (_, output) = outputs
        .iter()
        .next()
        .ok_or_else(|| StylizeError::PostprocessingFailed("No output tensor".to_string()))?;

    let (shape, data) = output
        .try_extract_tensor::<f32>()
        .map_err(|e: ort::Error| StylizeError::PostprocessingFailed(e.to_string()))?;

    let pixels = interleave_channels(shape, data)?;
    NormalizedImage::from_pixels(pixels)
        .map_err(|e| StylizeError::PostprocessingFailed(e.to_string()))
}

/// Reassembles interleaved RGB pixels from a planar NCHW buffer,
/// rejecting any output that is not a single canonical-size RGB image.
fn interleave_channels(shape: &[i64], data: &[f32]) -> StylizeResult<Vec<f32>> {
    // Shape is NCHW: [batch, channels, height, width]
    if shape.len() != 4 {
        return Err(StylizeError::PostprocessingFailed(format!(
            "Expected 4D tensor, got {}D",
            shape.len()
        )));
    }
    if shape[0] != 1 {
        return Err(StylizeError::PostprocessingFailed(format!(
            "Unexpected batch size: {}",
            shape[0]
        )));
    }
    if shape[1] != 3 {
        return Err(StylizeError::PostprocessingFailed(format!(
            "Expected 3 output channels, got {}",
            shape[1]
        )));
    }

    let height = usize::try_from(shape[2])
        .map_err(|_| StylizeError::PostprocessingFailed("Invalid tensor height".to_string()))?;
    let width = usize::try_from(shape[3])
        .map_err(|_| StylizeError::PostprocessingFailed("Invalid tensor width".to_string()))?;
    let side = IMAGE_SIZE as usize;
    if height != side || width != side {
        return Err(StylizeError::PostprocessingFailed(format!(
            "Unexpected output size: {width}x{height}, expected {side}x{side}"
        )));
    }

    let channel_size = height * width;
    if data.len() != channel_size * 3 {
        return Err(StylizeError::PostprocessingFailed(format!(
            "Output buffer holds {} values, expected {}",
            data.len(),
            channel_size * 3
        )));
    }

    let mut pixels = Vec::with_capacity(channel_size * 3);
    for idx in 0..channel_size {
        pixels.push(data[idx]);
        pixels.push(data[channel_size + idx]);
        pixels.push(data[2 * channel_size + idx]);
    }
    Ok(pixels)
}
