// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::notifications;
use crate::ui::template_strip;
use iced::window;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    /// Open the file dialog for the content image.
    ChooseContent,
    /// Open the file dialog for the style image.
    ChooseStyle,
    /// The content file dialog closed, `None` when cancelled.
    ContentFileChosen(Option<PathBuf>),
    /// The style file dialog closed, `None` when cancelled.
    StyleFileChosen(Option<PathBuf>),
    /// Run full-quality style transfer on the loaded images.
    Combine,
    /// Open the save dialog for the current result.
    Save,
    /// The save dialog closed, `None` when cancelled.
    SaveFileChosen(Option<PathBuf>),
    /// Start or stop the camera feed.
    ToggleCamera,
    /// Enable or disable per-frame filtering while recording.
    ToggleFilter,
    /// Pager and template selection events from the strip.
    TemplateStrip(template_strip::Message),
    /// Periodic poll of the camera feed while recording.
    CameraTick(Instant),
    /// Periodic check of notification auto-dismiss timers.
    Tick(Instant),
    Notification(notifications::NotificationMessage),
    WindowCloseRequested(window::Id),
}

/// Launch options parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Overrides the configured templates directory.
    pub templates_dir: Option<PathBuf>,
    /// Overrides the configured model directory.
    pub model_dir: Option<PathBuf>,
    /// Overrides the configured camera device index.
    pub camera_index: Option<u32>,
}
