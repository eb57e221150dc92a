//! Camera device seam
//!
//! The camera is a singleton exclusive resource owned by the environment.
//! This module abstracts it behind two traits so the capture session can
//! hold an open stream without knowing where frames come from, and so
//! tests can count live streams.
//!
//! Releasing the device is tied to ownership: dropping the
//! `CameraStream` box releases it. There is deliberately no `close()`
//! method to forget to call.

use image::DynamicImage;
use std::path::PathBuf;
use thiserror::Error;

/// Camera acquisition/read errors
#[derive(Debug, Error)]
pub enum CameraError {
    /// The environment refused to hand over the device
    #[error("Could not access camera: {0}")]
    AccessDenied(String),

    /// The stream is open but a frame could not be produced
    #[error("Could not read camera frame: {0}")]
    FrameFailed(String),
}

/// A camera that can be opened into an exclusive stream
pub trait CameraDevice: Send + Sync {
    /// Request the device
    ///
    /// # Errors
    ///
    /// Returns `CameraError::AccessDenied` if the environment refuses;
    /// no resource is held in that case.
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError>;
}

/// An open, exclusive camera stream
///
/// Dropping the stream releases the device.
pub trait CameraStream {
    /// Grab the current frame
    ///
    /// # Errors
    ///
    /// Returns `CameraError::FrameFailed` if a frame cannot be read.
    fn frame(&mut self) -> Result<DynamicImage, CameraError>;
}

/// Development stand-in that serves a still image as every frame
///
/// Configured via the `camera` setting; lets the whole capture workflow
/// run on machines without a camera.
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CameraDevice for FileCamera {
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError> {
        if !self.path.exists() {
            return Err(CameraError::AccessDenied(format!(
                "frame source {} does not exist",
                self.path.display()
            )));
        }
        Ok(Box::new(FileStream {
            path: self.path.clone(),
        }))
    }
}

struct FileStream {
    path: PathBuf,
}

impl CameraStream for FileStream {
    fn frame(&mut self) -> Result<DynamicImage, CameraError> {
        image::open(&self.path).map_err(|e| CameraError::FrameFailed(e.to_string()))
    }
}

/// The device used when no camera is configured: every open is denied
pub struct DisabledCamera;

impl CameraDevice for DisabledCamera {
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError> {
        Err(CameraError::AccessDenied(
            "no camera configured; set `camera` in the configuration".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_camera_always_denies() {
        let device = DisabledCamera;
        assert!(matches!(
            device.open(),
            Err(CameraError::AccessDenied(_))
        ));
    }

    #[test]
    fn test_file_camera_denies_on_missing_file() {
        let device = FileCamera::new("/nonexistent/frame.png");
        assert!(matches!(
            device.open(),
            Err(CameraError::AccessDenied(_))
        ));
    }

    #[test]
    fn test_file_camera_serves_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        crate::testing::write_test_png(&path, 8, 6);

        let device = FileCamera::new(&path);
        let mut stream = device.open().unwrap();
        let frame = stream.frame().unwrap();

        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 6);
    }
}
