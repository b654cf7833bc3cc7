// SPDX-License-Identifier: MPL-2.0
//! Image representations and camera capture.

pub mod camera;
pub mod image;

pub use camera::{CameraFeed, FrameSource};
pub use image::{
    decode_and_resize, placeholder_handle, ColorOrder, NormalizedImage, RawFrame, IMAGE_SIZE,
    THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH,
};

/// File extensions accepted by the open-image dialog.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
