// SPDX-License-Identifier: MPL-2.0
//! The two image representations used throughout the application.
//!
//! Static images and model input/output use [`NormalizedImage`]: f32 RGB
//! channels in `[0, 1]` at the canonical size. Live camera frames use
//! [`RawFrame`]: u8 bytes tagged with an explicit [`ColorOrder`]. Moving
//! between the two is always an explicit method call, so an untagged buffer
//! can never reach the display or the model in the wrong color order.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::imageops::FilterType;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Canonical edge length for content, style, and result images.
pub const IMAGE_SIZE: u32 = 224;
/// Template thumbnail dimensions shown in the catalog strip.
pub const THUMBNAIL_WIDTH: u32 = 78;
pub const THUMBNAIL_HEIGHT: u32 = 54;

/// Gray used for empty image panels and disabled template slots.
const PLACEHOLDER_GRAY: u8 = 128;

/// Channel order of a raw byte frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOrder {
    Rgb,
    Bgr,
}

/// A canonical-size image in normalized float form: RGB, `[0, 1]`.
///
/// The display handle is built once at construction so rendering never
/// re-converts the pixel data.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pixels: Arc<Vec<f32>>,
    handle: image::Handle,
}

impl NormalizedImage {
    /// Creates a normalized image from canonical-size RGB float pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the buffer length does not match the
    /// canonical dimensions.
    pub fn from_pixels(pixels: Vec<f32>) -> Result<Self> {
        let expected = (IMAGE_SIZE * IMAGE_SIZE * 3) as usize;
        if pixels.len() != expected {
            return Err(Error::Decode(format!(
                "expected {expected} float pixels, got {}",
                pixels.len()
            )));
        }
        let handle = handle_from_rgb_floats(&pixels, IMAGE_SIZE, IMAGE_SIZE);
        Ok(Self {
            pixels: Arc::new(pixels),
            handle,
        })
    }

    /// Returns the RGB float pixels, row-major, interleaved.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Display handle for the canonical-size image.
    pub fn handle(&self) -> image::Handle {
        self.handle.clone()
    }

    /// Converts to 8-bit RGB bytes (0-255).
    pub fn to_rgb8_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .map(|v| (v * 255.0).clamp(0.0, 255.0).round() as u8)
            .collect()
    }

    /// Derives a thumbnail display handle at the catalog strip size.
    pub fn thumbnail_handle(&self) -> image::Handle {
        let rgb = image_rs::RgbImage::from_raw(IMAGE_SIZE, IMAGE_SIZE, self.to_rgb8_bytes())
            .unwrap_or_else(|| image_rs::RgbImage::new(IMAGE_SIZE, IMAGE_SIZE));
        let small = image_rs::DynamicImage::ImageRgb8(rgb).resize_exact(
            THUMBNAIL_WIDTH,
            THUMBNAIL_HEIGHT,
            FilterType::Triangle,
        );
        handle_from_rgb8(small.to_rgb8().as_raw(), THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT)
    }

    /// Writes the image as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if encoding or the file write fails.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let rgb = image_rs::RgbImage::from_raw(IMAGE_SIZE, IMAGE_SIZE, self.to_rgb8_bytes())
            .ok_or_else(|| Error::Write("pixel buffer has wrong length".into()))?;
        rgb.save(path.as_ref())
            .map_err(|e| Error::Write(e.to_string()))
    }
}

/// A raw byte frame, typically straight from the camera.
#[derive(Debug, Clone)]
pub struct RawFrame {
    width: u32,
    height: u32,
    order: ColorOrder,
    bytes: Vec<u8>,
}

impl RawFrame {
    /// Creates a raw frame from tightly packed 3-channel bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CameraRead`] if the buffer length does not match the
    /// given dimensions.
    pub fn new(width: u32, height: u32, order: ColorOrder, bytes: Vec<u8>) -> Result<Self> {
        let expected = (width * height * 3) as usize;
        if bytes.len() != expected {
            return Err(Error::CameraRead(format!(
                "frame buffer is {} bytes, expected {expected}",
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            order,
            bytes,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn order(&self) -> ColorOrder {
        self.order
    }

    /// Returns the frame bytes in RGB order, swapping channels if needed.
    fn rgb_bytes(&self) -> Vec<u8> {
        match self.order {
            ColorOrder::Rgb => self.bytes.clone(),
            ColorOrder::Bgr => self
                .bytes
                .chunks_exact(3)
                .flat_map(|px| [px[2], px[1], px[0]])
                .collect(),
        }
    }

    /// Converts the frame to the normalized float form, resizing to the
    /// canonical dimensions if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the frame bytes cannot form an image.
    pub fn to_normalized(&self) -> Result<NormalizedImage> {
        let rgb = image_rs::RgbImage::from_raw(self.width, self.height, self.rgb_bytes())
            .ok_or_else(|| Error::Decode("frame buffer has wrong length".into()))?;
        let canonical = if self.width == IMAGE_SIZE && self.height == IMAGE_SIZE {
            rgb
        } else {
            image_rs::DynamicImage::ImageRgb8(rgb)
                .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Triangle)
                .to_rgb8()
        };
        let pixels = canonical.as_raw().iter().map(|&b| f32::from(b) / 255.0).collect();
        NormalizedImage::from_pixels(pixels)
    }

    /// Color-correct display handle for the result panel.
    pub fn to_handle(&self) -> image::Handle {
        handle_from_rgb8(&self.rgb_bytes(), self.width, self.height)
    }

    /// Writes the frame as a PNG file, color-correcting first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if encoding or the file write fails.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let rgb = image_rs::RgbImage::from_raw(self.width, self.height, self.rgb_bytes())
            .ok_or_else(|| Error::Write("frame buffer has wrong length".into()))?;
        rgb.save(path.as_ref())
            .map_err(|e| Error::Write(e.to_string()))
    }
}

/// Decodes an image file and resizes it to the canonical size.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the file cannot be read or is not a valid
/// image.
pub fn decode_and_resize<P: AsRef<Path>>(path: P) -> Result<NormalizedImage> {
    let bytes = fs::read(path.as_ref()).map_err(|e| Error::Decode(e.to_string()))?;
    let img = image_rs::load_from_memory(&bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let rgb = img
        .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Triangle)
        .to_rgb8();
    let pixels = rgb.as_raw().iter().map(|&b| f32::from(b) / 255.0).collect();
    NormalizedImage::from_pixels(pixels)
}

/// Neutral gray handle shown in empty panels while no image is loaded.
pub fn placeholder_handle(width: u32, height: u32) -> image::Handle {
    let gray = vec![PLACEHOLDER_GRAY; (width * height * 3) as usize];
    handle_from_rgb8(&gray, width, height)
}

fn handle_from_rgb8(rgb: &[u8], width: u32, height: u32) -> image::Handle {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for px in rgb.chunks_exact(3) {
        rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
    image::Handle::from_rgba(width, height, rgba)
}

fn handle_from_rgb_floats(pixels: &[f32], width: u32, height: u32) -> image::Handle {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for px in pixels.chunks_exact(3) {
        rgba.extend_from_slice(&[
            (px[0] * 255.0).clamp(0.0, 255.0).round() as u8,
            (px[1] * 255.0).clamp(0.0, 255.0).round() as u8,
            (px[2] * 255.0).clamp(0.0, 255.0).round() as u8,
            255,
        ]);
    }
    image::Handle::from_rgba(width, height, rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn solid_normalized(r: f32, g: f32, b: f32) -> NormalizedImage {
        let mut pixels = Vec::with_capacity((IMAGE_SIZE * IMAGE_SIZE * 3) as usize);
        for _ in 0..IMAGE_SIZE * IMAGE_SIZE {
            pixels.extend_from_slice(&[r, g, b]);
        }
        NormalizedImage::from_pixels(pixels).expect("canonical buffer")
    }

    #[test]
    fn from_pixels_rejects_wrong_length() {
        match NormalizedImage::from_pixels(vec![0.0; 7]) {
            Err(Error::Decode(_)) => {}
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn to_rgb8_bytes_denormalizes_and_clamps() {
        let image = solid_normalized(1.0, 0.5, -0.2);
        let bytes = image.to_rgb8_bytes();
        assert_eq!(bytes[0], 255);
        assert_eq!(bytes[1], 128);
        assert_eq!(bytes[2], 0);
    }

    #[test]
    fn decode_and_resize_produces_canonical_dimensions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("sample.png");
        let img = RgbImage::from_pixel(40, 30, Rgb([200, 10, 10]));
        img.save(&path).expect("failed to write png");

        let decoded = decode_and_resize(&path).expect("png should decode");
        assert_eq!(
            decoded.pixels().len(),
            (IMAGE_SIZE * IMAGE_SIZE * 3) as usize
        );
        // A solid image stays solid after resize.
        assert!((decoded.pixels()[0] - 200.0 / 255.0).abs() < 0.02);
    }

    #[test]
    fn decode_missing_file_returns_decode_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        match decode_and_resize(temp_dir.path().join("missing.png")) {
            Err(Error::Decode(_)) => {}
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn decode_invalid_bytes_returns_decode_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("invalid.png");
        std::fs::write(&path, b"not a png").expect("failed to write file");

        match decode_and_resize(&path) {
            Err(Error::Decode(message)) => assert!(!message.is_empty()),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn bgr_frame_is_swapped_before_display_and_save() {
        // A single blue pixel in BGR byte order: B=255, G=0, R=0.
        let frame = RawFrame::new(1, 1, ColorOrder::Bgr, vec![255, 0, 0]).expect("valid frame");
        assert_eq!(frame.rgb_bytes(), vec![0, 0, 255]);
    }

    #[test]
    fn rgb_frame_passes_through_unchanged() {
        let frame = RawFrame::new(1, 1, ColorOrder::Rgb, vec![10, 20, 30]).expect("valid frame");
        assert_eq!(frame.rgb_bytes(), vec![10, 20, 30]);
    }

    #[test]
    fn raw_frame_rejects_wrong_length() {
        match RawFrame::new(2, 2, ColorOrder::Rgb, vec![0; 5]) {
            Err(Error::CameraRead(_)) => {}
            other => panic!("expected CameraRead error, got {other:?}"),
        }
    }

    #[test]
    fn to_normalized_resizes_to_canonical_size() {
        let bytes = vec![64u8; 8 * 4 * 3];
        let frame = RawFrame::new(8, 4, ColorOrder::Rgb, bytes).expect("valid frame");
        let normalized = frame.to_normalized().expect("conversion should work");
        assert_eq!(
            normalized.pixels().len(),
            (IMAGE_SIZE * IMAGE_SIZE * 3) as usize
        );
        assert!((normalized.pixels()[0] - 64.0 / 255.0).abs() < 0.02);
    }

    #[test]
    fn save_png_round_trips_stylized_result() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("result.png");
        let image = solid_normalized(0.8, 0.2, 0.1);

        image.save_png(&path).expect("save should succeed");

        let reloaded = image_rs::open(&path).expect("saved png should reload");
        assert_eq!(reloaded.width(), IMAGE_SIZE);
        assert_eq!(reloaded.height(), IMAGE_SIZE);
    }
}
