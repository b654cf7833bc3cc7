// SPDX-License-Identifier: MPL-2.0
//! Capture state machine and the result slot.
//!
//! `CaptureState` carries the live feed only while recording, so releasing
//! the camera is a matter of dropping the state. `ResultImage` records where
//! the result came from, which decides how it is displayed and saved.

use crate::error::Result;
use crate::media::camera::FrameSource;
use crate::media::image::{NormalizedImage, RawFrame};
use iced::widget::image;
use std::fmt;
use std::path::Path;

/// Whether the webcam is running, and whether frames are being stylized.
pub enum CaptureState {
    /// No camera open; still-image workflow.
    Idle,
    /// Camera open and producing frames.
    Recording {
        /// Style transfer applied to each displayed frame.
        filtering: bool,
        /// The live feed; dropped when recording stops.
        feed: Box<dyn FrameSource>,
    },
}

impl fmt::Debug for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Idle => write!(f, "Idle"),
            CaptureState::Recording { filtering, .. } => f
                .debug_struct("Recording")
                .field("filtering", filtering)
                .finish_non_exhaustive(),
        }
    }
}

impl CaptureState {
    #[must_use]
    pub fn is_recording(&self) -> bool {
        matches!(self, CaptureState::Recording { .. })
    }

    #[must_use]
    pub fn is_filtering(&self) -> bool {
        matches!(
            self,
            CaptureState::Recording {
                filtering: true,
                ..
            }
        )
    }
}

/// The image currently shown in the result panel.
#[derive(Debug, Clone)]
pub enum ResultImage {
    /// Output of a full-quality combine, or a filtered camera frame.
    Stylized(NormalizedImage),
    /// A raw camera frame shown as-is.
    Live(RawFrame),
}

impl ResultImage {
    /// Display handle for the result panel.
    #[must_use]
    pub fn handle(&self) -> image::Handle {
        match self {
            ResultImage::Stylized(image) => image.handle(),
            ResultImage::Live(frame) => frame.to_handle(),
        }
    }

    /// Writes the result as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Write`] if encoding or writing fails.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        match self {
            ResultImage::Stylized(image) => image.save_png(path),
            ResultImage::Live(frame) => frame.save_png(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::image::{ColorOrder, IMAGE_SIZE};

    struct NoFrames;

    impl FrameSource for NoFrames {
        fn latest_frame(&mut self) -> Option<Result<RawFrame>> {
            None
        }
    }

    #[test]
    fn idle_is_not_recording() {
        let state = CaptureState::Idle;
        assert!(!state.is_recording());
        assert!(!state.is_filtering());
    }

    #[test]
    fn recording_reports_filtering_flag() {
        let state = CaptureState::Recording {
            filtering: true,
            feed: Box::new(NoFrames),
        };
        assert!(state.is_recording());
        assert!(state.is_filtering());

        let state = CaptureState::Recording {
            filtering: false,
            feed: Box::new(NoFrames),
        };
        assert!(state.is_recording());
        assert!(!state.is_filtering());
    }

    #[test]
    fn live_result_round_trips_through_png() {
        let side = IMAGE_SIZE as usize;
        let frame = RawFrame::new(
            IMAGE_SIZE,
            IMAGE_SIZE,
            ColorOrder::Rgb,
            vec![40; side * side * 3],
        )
        .expect("canonical frame");

        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("live.png");
        ResultImage::Live(frame).save_png(&path).expect("save should succeed");
        assert!(path.exists());
    }
}
