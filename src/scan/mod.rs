//! Capture-and-identify workflow
//!
//! Scan mode replaces the preview pane with capture controls. The pieces:
//!
//! - **`camera`**: the `CameraDevice`/`CameraStream` seam and the shipped
//!   device implementations
//! - **`image`**: decode, centered-square crop, PNG encode
//! - **`session`**: `CaptureSession`, the state machine from `Idle`
//!   through camera/upload, analysis, and error recovery
//!
//! # State machine
//!
//! ```text
//! Idle ──openCamera──▶ CameraRequesting ──grant──▶ CameraActive
//!  │ ▲                        │ denied                │  │
//!  │ └────────────────────────┘ ◀──cancelCamera───────┘  │capture
//!  │ upload                                              ▼
//!  └───────────────────────▶ ImageReady ◀────────────────┘
//!        retake ▲                │ analyze
//!               └── Idle ◀─ok── Analyzing ──err──▶ Error ──dismiss──▶ ImageReady
//! ```
//!
//! `close()` is reachable from every state and is the only transition
//! that is; it releases the camera, drops the buffer, and lands in
//! `Idle`.

pub mod camera;
pub mod image;
pub mod session;

pub use camera::{CameraDevice, CameraError, CameraStream, DisabledCamera, FileCamera};
pub use session::{CaptureSession, CapturedImage, ScanError, ScanState};
