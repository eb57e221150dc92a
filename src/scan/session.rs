//! The capture session state machine
//!
//! One `CaptureSession` is alive per scan-mode activation. It owns the
//! camera stream while one is open, so every transition out of
//! `CameraActive` releases the device by dropping the handle; there is no
//! code path that can leak it.
//!
//! Transitions called in the wrong state return `ScanError::NotAvailable`
//! and change nothing.

use crate::api::{ApiError, Creature};
use crate::scan::camera::{CameraDevice, CameraError, CameraStream};
use crate::scan::image::{crop_centered_square, encode_png};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Capture session error type
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors from capture session operations
#[derive(Debug, Error)]
pub enum ScanError {
    /// The operation is not valid in the current state
    #[error("{operation} is not available while {state:?}")]
    NotAvailable {
        operation: &'static str,
        state: ScanState,
    },

    /// Camera acquisition or frame grab failed
    #[error(transparent)]
    Camera(#[from] CameraError),

    /// The image could not be decoded or encoded
    #[error("Could not process image: {0}")]
    Image(String),
}

/// Where the session is in the capture workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Nothing captured, no camera held
    Idle,
    /// Camera grant pending
    CameraRequesting,
    /// Live stream held, waiting for capture
    CameraActive,
    /// An image is buffered, ready to analyze
    ImageReady,
    /// Identify request in flight
    Analyzing,
    /// Identify failed; buffer retained, message dismissible
    Error,
}

/// The buffered image awaiting submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// Encoded PNG payload for the multipart upload
    pub png: Vec<u8>,
    /// File name sent with the upload
    pub file_name: String,
    /// Square side length in pixels
    pub side: u32,
}

/// State machine governing camera, upload, and identify
pub struct CaptureSession {
    state: ScanState,
    image: Option<CapturedImage>,
    stream: Option<Box<dyn CameraStream>>,
    error: Option<String>,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            image: None,
            stream: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// The buffered image, if one has been captured or uploaded
    #[must_use]
    pub fn image(&self) -> Option<&CapturedImage> {
        self.image.as_ref()
    }

    /// The identify failure message, if in the `Error` state
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a camera stream is currently held
    #[must_use]
    pub const fn holds_camera(&self) -> bool {
        self.stream.is_some()
    }

    /// Request the camera and start the live stream
    ///
    /// Only valid from `Idle`. On denial the session returns to `Idle`
    /// holding nothing, and the error is returned for the caller to
    /// surface as a blocking alert.
    ///
    /// # Errors
    ///
    /// `ScanError::NotAvailable` outside `Idle`; `ScanError::Camera` if
    /// the device refuses.
    pub fn open_camera(&mut self, device: &dyn CameraDevice) -> Result<()> {
        self.require(ScanState::Idle, "open_camera")?;

        self.state = ScanState::CameraRequesting;
        match device.open() {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = ScanState::CameraActive;
                Ok(())
            }
            Err(e) => {
                self.state = ScanState::Idle;
                Err(ScanError::Camera(e))
            }
        }
    }

    /// Load an image from disk into the buffer
    ///
    /// Only valid from `Idle`; an active camera must be cancelled first.
    /// The image is cropped to the largest centered square and
    /// re-encoded.
    ///
    /// # Errors
    ///
    /// `ScanError::NotAvailable` outside `Idle`; `ScanError::Image` if
    /// the file cannot be decoded.
    pub fn upload_file(&mut self, path: &Path) -> Result<()> {
        self.require(ScanState::Idle, "upload_file")?;

        let decoded = image::open(path).map_err(|e| ScanError::Image(e.to_string()))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload.png".to_string(), |n| n.to_string_lossy().into_owned());

        self.buffer_image(&decoded, file_name)?;
        self.state = ScanState::ImageReady;
        Ok(())
    }

    /// Take the current frame and stop the stream
    ///
    /// Only valid from `CameraActive`. The camera is released whether or
    /// not the frame converts cleanly; a failed frame grab keeps the
    /// stream so the user can try again or cancel.
    ///
    /// # Errors
    ///
    /// `ScanError::NotAvailable` outside `CameraActive`;
    /// `ScanError::Camera` if the frame grab fails.
    pub fn capture(&mut self) -> Result<()> {
        self.require(ScanState::CameraActive, "capture")?;

        let stream = self
            .stream
            .as_mut()
            .ok_or(CameraError::FrameFailed("stream already closed".to_string()))?;
        let frame = stream.frame()?;

        // Frame in hand; release the device before the (fallible) encode
        // so no error path below can leak it.
        self.stream = None;

        match self.buffer_image(&frame, "camera.png".to_string()) {
            Ok(()) => {
                self.state = ScanState::ImageReady;
                Ok(())
            }
            Err(e) => {
                self.state = ScanState::Idle;
                Err(e)
            }
        }
    }

    /// Stop the live stream without capturing
    ///
    /// # Errors
    ///
    /// `ScanError::NotAvailable` outside `CameraActive`.
    pub fn cancel_camera(&mut self) -> Result<()> {
        self.require(ScanState::CameraActive, "cancel_camera")?;
        self.stream = None;
        self.state = ScanState::Idle;
        Ok(())
    }

    /// Discard the buffered image and start over
    ///
    /// # Errors
    ///
    /// `ScanError::NotAvailable` outside `ImageReady`.
    pub fn retake(&mut self) -> Result<()> {
        self.require(ScanState::ImageReady, "retake")?;
        self.image = None;
        self.state = ScanState::Idle;
        Ok(())
    }

    /// Enter `Analyzing` and hand out the payload for submission
    ///
    /// The buffer stays in the session so an identify failure can be
    /// retried without recapturing.
    ///
    /// # Errors
    ///
    /// `ScanError::NotAvailable` outside `ImageReady`.
    pub fn begin_analyze(&mut self) -> Result<CapturedImage> {
        self.require(ScanState::ImageReady, "analyze")?;

        let payload = self
            .image
            .clone()
            .ok_or(ScanError::Image("no image buffered".to_string()))?;
        self.state = ScanState::Analyzing;
        Ok(payload)
    }

    /// Apply the settled identify result
    ///
    /// On success the session resets to `Idle` and the identified entry
    /// is returned for the controller to select. On failure the session
    /// enters `Error` with the buffer retained.
    ///
    /// A result settling after the session left `Analyzing` (scan mode
    /// was closed mid-flight) is ignored.
    pub fn finish_analyze(&mut self, result: std::result::Result<Creature, ApiError>) -> Option<Creature> {
        if self.state != ScanState::Analyzing {
            debug!(state = ?self.state, "ignoring identify result settled after session left Analyzing");
            return None;
        }

        match result {
            Ok(creature) => {
                self.image = None;
                self.error = None;
                self.state = ScanState::Idle;
                Some(creature)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.state = ScanState::Error;
                None
            }
        }
    }

    /// Dismiss the identify failure
    ///
    /// Returns to `ImageReady` with the buffer retained so the same
    /// image can be analyzed again.
    ///
    /// # Errors
    ///
    /// `ScanError::NotAvailable` outside `Error`.
    pub fn dismiss_error(&mut self) -> Result<()> {
        self.require(ScanState::Error, "dismiss_error")?;
        self.error = None;
        self.state = ScanState::ImageReady;
        Ok(())
    }

    /// Tear the session down, from any state
    ///
    /// Releases the camera if held, discards the buffer, clears any
    /// error. This is the only transition reachable from every state.
    pub fn close(&mut self) {
        self.stream = None;
        self.image = None;
        self.error = None;
        self.state = ScanState::Idle;
    }

    fn require(&self, expected: ScanState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ScanError::NotAvailable {
                operation,
                state: self.state,
            })
        }
    }

    fn buffer_image(&mut self, decoded: &image::DynamicImage, file_name: String) -> Result<()> {
        let square = crop_centered_square(decoded);
        let png = encode_png(&square).map_err(ScanError::Image)?;

        self.image = Some(CapturedImage {
            png,
            file_name,
            side: square.width(),
        });
        Ok(())
    }
}
