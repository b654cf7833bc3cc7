// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! This module contains the main `update` function and all specialized
//! message handlers. Validation failures surface as toasts with the same
//! wording the rest of the app uses, and every failure site also logs to
//! stderr for terminal users.

use super::state::{CaptureState, ResultImage};
use super::{App, Message};
use crate::error::Error;
use crate::media::camera::CameraFeed;
use crate::media::image::decode_and_resize;
use crate::media::IMAGE_EXTENSIONS;
use crate::stylize::PredictionMode;
use crate::ui::notifications::Notification;
use crate::ui::template_strip;
use iced::{window, Task};
use std::path::PathBuf;

impl App {
    /// Routes a message to its handler.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChooseContent => pick_image_dialog(Message::ContentFileChosen),
            Message::ChooseStyle => pick_image_dialog(Message::StyleFileChosen),
            Message::ContentFileChosen(path) => {
                self.handle_content_chosen(path);
                Task::none()
            }
            Message::StyleFileChosen(path) => {
                self.handle_style_chosen(path);
                Task::none()
            }
            Message::Combine => {
                self.handle_combine();
                Task::none()
            }
            Message::Save => self.handle_save(),
            Message::SaveFileChosen(path) => {
                self.handle_save_file_chosen(path);
                Task::none()
            }
            Message::ToggleCamera => {
                self.handle_toggle_camera();
                Task::none()
            }
            Message::ToggleFilter => {
                self.handle_toggle_filter();
                Task::none()
            }
            Message::TemplateStrip(strip_message) => {
                self.handle_template_strip(strip_message);
                Task::none()
            }
            Message::CameraTick(_) => {
                self.handle_camera_tick();
                Task::none()
            }
            Message::Tick(_) => {
                self.notifications.tick();
                Task::none()
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::WindowCloseRequested(id) => {
                // Release the camera before the window goes away.
                self.capture = CaptureState::Idle;
                window::close(id)
            }
        }
    }

    /// Blocks an operation on a missing input. The message is shown to the
    /// user verbatim.
    fn reject(&mut self, message: &str) {
        let error = Error::Validation(message.to_string());
        self.notifications.push(Notification::error(error.to_string()));
    }

    fn handle_content_chosen(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else { return };
        match decode_and_resize(&path) {
            Ok(image) => self.content = Some(image),
            Err(e) => {
                eprintln!("Failed to load content image {}: {e}", path.display());
                self.notifications.push(Notification::error(e.to_string()));
            }
        }
    }

    fn handle_style_chosen(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else { return };
        match decode_and_resize(&path) {
            Ok(image) => self.style = Some(image),
            Err(e) => {
                eprintln!("Failed to load style image {}: {e}", path.display());
                self.notifications.push(Notification::error(e.to_string()));
            }
        }
    }

    fn handle_combine(&mut self) {
        // The combine button is disabled while recording; the guard makes
        // the handler safe against stale messages.
        if self.capture.is_recording() {
            return;
        }

        let Some(content) = &self.content else {
            self.reject("Image is empty!");
            return;
        };
        let Some(style) = &self.style else {
            self.reject("Style is empty!");
            return;
        };

        match self.model.predict(style, content, PredictionMode::Full) {
            Ok(result) => self.result = Some(ResultImage::Stylized(result)),
            Err(e) => {
                eprintln!("Style transfer failed: {e}");
                self.notifications.push(Notification::error(e.to_string()));
            }
        }
    }

    fn handle_save(&mut self) -> Task<Message> {
        if self.result.is_none() {
            self.reject("Result is empty!");
            return Task::none();
        }

        Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .set_title("Save Image As")
                    .set_file_name("result.png")
                    .add_filter("PNG File", &["png"])
                    .save_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            Message::SaveFileChosen,
        )
    }

    fn handle_save_file_chosen(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else { return };
        // The result may have been cleared while the dialog was open, for
        // example by toggling the camera.
        let Some(result) = &self.result else {
            self.reject("Result is empty!");
            return;
        };

        let path = if path.extension().is_some() {
            path
        } else {
            path.with_extension("png")
        };

        match result.save_png(&path) {
            Ok(()) => {
                self.notifications
                    .push(Notification::success("Image saved successfully"));
            }
            Err(e) => {
                eprintln!("Failed to save {}: {e}", path.display());
                self.notifications.push(Notification::error(e.to_string()));
            }
        }
    }

    fn handle_toggle_camera(&mut self) {
        // The result panel belongs to whichever mode is active, so it is
        // cleared on every transition.
        self.result = None;

        if self.capture.is_recording() {
            // Dropping the feed joins the capture thread and releases the
            // device.
            self.capture = CaptureState::Idle;
            return;
        }

        match CameraFeed::open(self.camera_index) {
            Ok(feed) => {
                self.capture = CaptureState::Recording {
                    filtering: false,
                    feed: Box::new(feed),
                };
                self.capture_fault_reported = false;
            }
            Err(e) => {
                eprintln!("Failed to open camera {}: {e}", self.camera_index);
                self.notifications.push(Notification::error(e.to_string()));
            }
        }
    }

    fn handle_toggle_filter(&mut self) {
        if !self.capture.is_recording() {
            return;
        }
        // Turning the filter on needs a style; turning it off never does.
        if !self.capture.is_filtering() && self.style.is_none() {
            self.reject("Style is empty!");
            return;
        }
        if let CaptureState::Recording { filtering, .. } = &mut self.capture {
            *filtering = !*filtering;
        }
    }

    fn handle_template_strip(&mut self, message: template_strip::Message) {
        match message {
            template_strip::Message::PageBack => {
                if self.page > 1 {
                    self.page -= 1;
                }
            }
            template_strip::Message::PageForward => {
                if self.page < self.catalog.max_page() {
                    self.page += 1;
                }
            }
            template_strip::Message::TemplatePicked(index) => {
                if let Some(template) = self.catalog.get(index) {
                    self.style = Some(template.image().clone());
                }
            }
        }
    }

    fn handle_camera_tick(&mut self) {
        let CaptureState::Recording { filtering, feed } = &mut self.capture else {
            return;
        };

        let frame = match feed.latest_frame() {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                // One toast per recording session; the tick keeps firing.
                if !self.capture_fault_reported {
                    eprintln!("Camera read failed: {e}");
                    self.notifications.push(Notification::error(e.to_string()));
                    self.capture_fault_reported = true;
                }
                return;
            }
            None => return,
        };

        if *filtering {
            let Some(style) = &self.style else {
                // Filtering without a style cannot happen through the UI;
                // fall back to the raw frame.
                self.result = Some(ResultImage::Live(frame));
                return;
            };

            let stylized = frame.to_normalized().and_then(|normalized| {
                self.model
                    .predict(style, &normalized, PredictionMode::Fast)
                    .map_err(Error::from)
            });

            match stylized {
                Ok(result) => self.result = Some(ResultImage::Stylized(result)),
                Err(e) => {
                    if !self.capture_fault_reported {
                        eprintln!("Frame filtering failed: {e}");
                        self.notifications.push(Notification::error(e.to_string()));
                        self.capture_fault_reported = true;
                    }
                }
            }
        } else {
            self.result = Some(ResultImage::Live(frame));
        }
    }
}

/// Opens an image picker and maps the chosen path into `on_chosen`.
fn pick_image_dialog(on_chosen: fn(Option<PathBuf>) -> Message) -> Task<Message> {
    Task::perform(
        async {
            rfd::AsyncFileDialog::new()
                .set_title("Choose Image")
                .add_filter("Images", &IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        on_chosen,
    )
}
