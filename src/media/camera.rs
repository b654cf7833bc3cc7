// SPDX-License-Identifier: MPL-2.0
//! Camera capture behind a worker thread.
//!
//! The device is owned by a dedicated thread so a slow or hung read can
//! never stall the UI loop. Frames are resized to the canonical size on the
//! worker and shipped over a bounded channel; the UI side only ever takes
//! the newest pending frame. Dropping the feed signals the worker and joins
//! it, which releases the device exactly once.

use crate::error::{Error, Result};
use crate::media::image::{ColorOrder, RawFrame, IMAGE_SIZE};
use image_rs::imageops::FilterType;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Source of live frames for the result panel.
///
/// The production implementation is [`CameraFeed`]; tests substitute a
/// scripted source.
pub trait FrameSource: Send {
    /// Takes the newest pending frame, if any. Older queued frames are
    /// discarded. `None` means no frame has arrived since the last call.
    fn latest_frame(&mut self) -> Option<Result<RawFrame>>;
}

/// Live camera feed backed by a capture thread.
pub struct CameraFeed {
    receiver: Receiver<Result<RawFrame>>,
    stop: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for CameraFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraFeed")
            .field("running", &self.thread_handle.is_some())
            .finish()
    }
}

impl CameraFeed {
    /// Opens the camera at `index` and starts the capture thread.
    ///
    /// Blocks until the device reports open success or failure, so the
    /// caller can stay in `Idle` when no camera is available.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CameraRead`] if the device cannot be opened.
    pub fn open(index: u32) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let (frame_tx, frame_rx) = mpsc::sync_channel(1);
        let (open_tx, open_rx) = mpsc::channel();

        let worker_stop = Arc::clone(&stop);
        let thread_handle = thread::spawn(move || {
            capture_loop(index, &open_tx, &frame_tx, &worker_stop);
        });

        // Handshake: the worker reports whether the device opened.
        match open_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                receiver: frame_rx,
                stop,
                thread_handle: Some(thread_handle),
            }),
            Ok(Err(e)) => {
                let _ = thread_handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread_handle.join();
                Err(Error::CameraRead("capture thread exited during open".into()))
            }
        }
    }
}

impl FrameSource for CameraFeed {
    fn latest_frame(&mut self) -> Option<Result<RawFrame>> {
        let mut latest = None;
        loop {
            match self.receiver.try_recv() {
                Ok(frame) => latest = Some(frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return latest.or_else(|| {
                        Some(Err(Error::CameraRead("capture thread stopped".into())))
                    });
                }
            }
        }
        latest
    }
}

impl Drop for CameraFeed {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

/// Body of the capture thread. Owns the device for its whole lifetime.
fn capture_loop(
    index: u32,
    open_tx: &mpsc::Sender<Result<()>>,
    frame_tx: &SyncSender<Result<RawFrame>>,
    stop: &AtomicBool,
) {
    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
    let mut camera = match Camera::new(CameraIndex::Index(index), requested) {
        Ok(camera) => camera,
        Err(e) => {
            let _ = open_tx.send(Err(Error::CameraRead(e.to_string())));
            return;
        }
    };
    if let Err(e) = camera.open_stream() {
        let _ = open_tx.send(Err(Error::CameraRead(e.to_string())));
        return;
    }
    let _ = open_tx.send(Ok(()));

    while !stop.load(Ordering::SeqCst) {
        let frame = read_canonical_frame(&mut camera);
        let failed = frame.is_err();
        // Full channel means the UI has not consumed the previous frame yet;
        // dropping this one keeps reads flowing without backing up.
        let _ = frame_tx.try_send(frame);
        if failed {
            // Back off so a faulty device does not spin the thread.
            thread::sleep(Duration::from_millis(100));
        }
    }
    // Dropping `camera` here releases the device.
}

/// Reads one frame and resizes it to the canonical dimensions.
fn read_canonical_frame(camera: &mut Camera) -> Result<RawFrame> {
    let buffer = camera
        .frame()
        .map_err(|e| Error::CameraRead(e.to_string()))?;
    let decoded = buffer
        .decode_image::<RgbFormat>()
        .map_err(|e| Error::CameraRead(e.to_string()))?;
    let (width, height) = decoded.dimensions();
    let bytes = decoded.into_raw();

    let rgb = image_rs::RgbImage::from_raw(width, height, bytes)
        .ok_or_else(|| Error::CameraRead("camera returned a malformed buffer".into()))?;
    let canonical = image_rs::DynamicImage::ImageRgb8(rgb)
        .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Triangle)
        .to_rgb8();
    RawFrame::new(IMAGE_SIZE, IMAGE_SIZE, ColorOrder::Rgb, canonical.into_raw())
}
