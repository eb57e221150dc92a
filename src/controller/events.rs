//! User events and host commands
//!
//! `UiEvent` is everything the UI adapter can tell the controller;
//! `Command` is the small named-operation surface an embedding host uses
//! (the scan button in the chrome, deep links, post-identify refresh).

use crate::query::{Bound, SearchField};
use std::path::PathBuf;

/// One user interaction, as translated by the UI adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Pointer moved onto an entry's row
    PointerEnter(i64),
    /// Pointer left the entry list
    PointerLeave,
    /// An entry's row was clicked
    ClickEntry(i64),
    /// Pointer went down outside the preview region
    OutsideClick,

    /// The scan button: open scan mode if closed, close it if open
    ToggleScan,
    OpenCamera,
    Capture,
    CancelCamera,
    /// An image file was chosen for upload
    UploadFile(PathBuf),
    Retake,
    Analyze,
    /// Dismiss the identify failure message
    DismissScanError,

    /// Dismiss the list error banner
    DismissBanner,
    /// Dismiss the blocking alert
    DismissAlert,

    /// Toggle a search field on or off
    ToggleField(SearchField),
    /// Store raw text against a field
    SetScalar(SearchField, String),
    /// Store one bound of a range field
    SetBound(SearchField, Bound, String),
    /// Build the query and run the search
    SubmitSearch,
}

/// Named operations an embedding host may invoke on the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Resynchronize the entry list with the service
    Refresh,
    /// Open or close scan mode
    ShowScan(bool),
    /// Select and show the entry with the given identifier
    ShowCreature(i64),
}
