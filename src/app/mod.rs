// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires together the template catalog, the style transfer
//! model, and the camera capture state, and translates messages into side
//! effects like inference runs or file dialogs. Policy decisions (window
//! size, validation wording, when the camera is released) stay close to the
//! update loop so user-facing behavior is easy to audit.

mod message;
mod state;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use state::{CaptureState, ResultImage};

use crate::catalog::TemplateCatalog;
use crate::config;
use crate::media::image::NormalizedImage;
use crate::stylize::{OnnxStyleTransfer, StyleTransfer};
use crate::ui::notifications::{self, Notification};
use iced::{window, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: u32 = 820;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;

/// Root Iced application state.
pub struct App {
    /// Loaded style templates, immutable after startup.
    catalog: TemplateCatalog,
    /// Current 1-indexed template page.
    page: usize,
    /// The loaded content image, canonical size.
    content: Option<NormalizedImage>,
    /// The selected style image, canonical size.
    style: Option<NormalizedImage>,
    /// Whatever the result panel currently shows.
    result: Option<ResultImage>,
    /// Camera state machine; holds the feed while recording.
    capture: CaptureState,
    /// Camera device index used when recording starts.
    camera_index: u32,
    /// One camera or filter fault toast per recording session.
    capture_fault_reported: bool,
    /// The style transfer network behind its inference seam.
    model: Box<dyn StyleTransfer>,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("page", &self.page)
            .field("has_content", &self.content.is_some())
            .field("has_style", &self.style.is_some())
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            catalog: TemplateCatalog::default(),
            page: 1,
            content: None,
            style: None,
            result: None,
            capture: CaptureState::Idle,
            camera_index: config::DEFAULT_CAMERA_INDEX,
            capture_fault_reported: false,
            model: Box::new(OnnxStyleTransfer::new(std::path::Path::new(
                config::DEFAULT_MODEL_DIR,
            ))),
            notifications: notifications::Manager::new(),
        }
    }
}

/// Builds the window settings.
fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from config and launch flags.
    ///
    /// Missing templates or model files degrade to warnings so the still
    /// workflow stays usable as far as possible.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let mut app = Self::default();

        let mut config = match config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                app.notifications
                    .push(Notification::warning("Settings could not be read, using defaults"));
                config::Config::default()
            }
        };

        // Launch flags become the new settings, so the next plain launch
        // picks up where this one left off.
        if apply_flag_overrides(&mut config, flags) {
            if let Err(e) = config::save(&config) {
                eprintln!("Failed to save settings: {e}");
            }
        }

        let templates_dir: PathBuf = config.templates_dir();
        match TemplateCatalog::load(&templates_dir, config.page_size()) {
            Ok(catalog) => app.catalog = catalog,
            Err(e) => {
                eprintln!("Failed to load templates: {e}");
                app.notifications.push(Notification::warning(format!(
                    "No templates found in {}",
                    templates_dir.display()
                )));
                app.catalog = TemplateCatalog::from_images(Vec::new(), config.page_size());
            }
        }

        let model_dir: PathBuf = config.model_dir();
        let mut model = OnnxStyleTransfer::new(&model_dir);
        if let Err(e) = model.load_sessions() {
            eprintln!("Failed to load model: {e}");
            app.notifications
                .push(Notification::warning("Style transfer model is not available"));
        }
        app.model = Box::new(model);

        app.camera_index = config.camera_index();

        (app, Task::none())
    }

    fn title(&self) -> String {
        "Art generation".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_camera_subscription(self.capture.is_recording()),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }
}

/// Folds launch flags into the loaded settings. Returns whether a value
/// actually changed and needs writing back.
fn apply_flag_overrides(config: &mut config::Config, flags: Flags) -> bool {
    let mut changed = false;
    if let Some(dir) = flags.templates_dir {
        if config.templates_dir.as_ref() != Some(&dir) {
            config.templates_dir = Some(dir);
            changed = true;
        }
    }
    if let Some(dir) = flags.model_dir {
        if config.model_dir.as_ref() != Some(&dir) {
            config.model_dir = Some(dir);
            changed = true;
        }
    }
    if let Some(index) = flags.camera_index {
        if config.camera_index != Some(index) {
            config.camera_index = Some(index);
            changed = true;
        }
    }
    changed
}
