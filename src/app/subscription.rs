// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window close requests are always watched so the camera can be released
//! before exit. The periodic subscriptions only run while they have work:
//! the camera poll while recording, the notification tick while toasts are
//! on screen.

use super::Message;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Interval between camera feed polls while recording (roughly 30 fps).
const CAMERA_POLL_MILLIS: u64 = 33;

/// Interval between notification auto-dismiss checks.
const NOTIFICATION_TICK_MILLIS: u64 = 100;

/// Creates the native event subscription.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| {
        if let event::Event::Window(iced::window::Event::CloseRequested) = &event {
            return Some(Message::WindowCloseRequested(window_id));
        }
        None
    })
}

/// Creates the camera poll subscription, active only while recording.
pub fn create_camera_subscription(recording: bool) -> Subscription<Message> {
    if recording {
        time::every(Duration::from_millis(CAMERA_POLL_MILLIS)).map(Message::CameraTick)
    } else {
        Subscription::none()
    }
}

/// Creates the periodic tick subscription for notification auto-dismiss.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(NOTIFICATION_TICK_MILLIS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
