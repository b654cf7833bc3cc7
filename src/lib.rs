// SPDX-License-Identifier: MPL-2.0
//! `style_lens` is a desktop neural style transfer studio built with the
//! Iced GUI framework.
//!
//! It combines a content image with a style image through an ONNX network,
//! ships a paginated catalog of preset style templates, and can apply the
//! style as a live filter over a webcam feed.

#![doc(html_root_url = "https://docs.rs/style_lens/0.1.0")]

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod stylize;
pub mod ui;
