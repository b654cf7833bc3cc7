// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Application-wide error type. Every failure a handler can encounter maps
/// to one of these kinds; all of them surface as notifications rather than
/// crashing the process.
#[derive(Debug, Clone)]
pub enum Error {
    /// An image file could not be read or decoded.
    Decode(String),
    /// The style-transfer model failed to load or infer.
    ModelInference(String),
    /// The camera returned no frame or could not be opened.
    CameraRead(String),
    /// A required input was missing before an operation could run.
    Validation(String),
    /// Writing the result image to disk failed.
    Write(String),
    /// The settings file could not be parsed or written.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decode(e) => write!(f, "Decode error: {e}"),
            Error::ModelInference(e) => write!(f, "Model inference error: {e}"),
            Error::CameraRead(e) => write!(f, "Camera error: {e}"),
            Error::Validation(e) => write!(f, "{e}"),
            Error::Write(e) => write!(f, "Write error: {e}"),
            Error::Config(e) => write!(f, "Config error: {e}"),
        }
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_decode_error() {
        let err = Error::Decode("bad magic bytes".to_string());
        assert_eq!(format!("{}", err), "Decode error: bad magic bytes");
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = Error::Validation("Style is empty!".to_string());
        assert_eq!(format!("{}", err), "Style is empty!");
    }

    #[test]
    fn from_image_error_produces_decode_variant() {
        let io_error = std::io::Error::other("truncated file");
        let image_error = image_rs::ImageError::IoError(io_error);
        let err: Error = image_error.into();
        match err {
            Error::Decode(message) => assert!(message.contains("truncated file")),
            other => panic!("expected Decode variant, got {other:?}"),
        }
    }

    #[test]
    fn camera_error_formats_properly() {
        let err = Error::CameraRead("device busy".into());
        assert_eq!(format!("{}", err), "Camera error: device busy");
    }
}
