//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when faunadex is run for the first time.

use super::{DEFAULT_BASE_URL, FaunadexConfig};
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::PathBuf;

/// Interactive first-time setup - prompts for the service location
///
/// Guides the user through the initial configuration:
/// 1. Prompts for the catalog service base URL
/// 2. Prompts for an optional camera frame source (empty = no camera)
/// 3. Creates and saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the
/// configuration cannot be saved.
pub fn first_time_setup() -> Result<FaunadexConfig, ConfigError> {
    println!("Welcome to faunadex! Let's point it at your catalog service.\n");

    let base_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Catalog service base URL")
        .default(DEFAULT_BASE_URL.to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let camera_frame: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Camera frame source (image path, empty for none)")
        .allow_empty(true)
        .default(String::new())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let mut config = FaunadexConfig::default();
    config.base_url = base_url.trim_end_matches('/').to_string();
    config.camera_frame = if camera_frame.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(camera_frame.trim()))
    };

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
