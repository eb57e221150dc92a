//! Faunadex - a terminal field guide for a remote creature catalog
//!
//! This library provides the interaction core of the field guide: the
//! entry list store, hover/selection state, the capture-and-identify
//! state machine, and the search query builder, composed by a controller
//! that a thin terminal UI (or any embedding host) drives through events
//! and named commands.

use thiserror::Error;

pub mod api;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod query;
pub mod scan;
pub mod ui;

// Doubles for the two external collaborators; used by unit tests,
// integration tests, and the bundled demo.
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum FaunadexError {
    /// Catalog service error
    #[error("Service error: {0}")]
    Api(#[from] api::ApiError),
    /// Capture workflow error
    #[error("Scan error: {0}")]
    Scan(#[from] scan::ScanError),
    /// Camera error
    #[error("Camera error: {0}")]
    Camera(#[from] scan::CameraError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
