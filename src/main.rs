//! Faunadex CLI application entry point
//!
//! This is the main executable for the faunadex field guide. It browses
//! a remote creature catalog, searches it by field, and identifies new
//! creatures from photographs.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog interactively (default command)
//! faunadex
//! faunadex browse
//!
//! # Print the catalog
//! faunadex list
//!
//! # Search by field (ranges take either bound alone)
//! faunadex search --kingdom Animalia --height-min 1.0 --height-max 2.5
//!
//! # Identify a creature from an image
//! faunadex identify photo.png
//!
//! # Point at a different service for one invocation
//! faunadex --base-url http://dex.example.org/api/v1 list
//!
//! # Quiet mode (only output results)
//! faunadex -q search --name Koala
//! ```
//!
//! # Configuration
//!
//! On first run, faunadex will prompt for the service location.
//! Configuration is stored in the user's config directory
//! (`~/.config/faunadex/config.toml` on Linux).

use faunadex::{
    FaunadexError,
    api::HttpCatalogClient,
    cli::{Cli, Commands, ConfigCommands},
    commands::{handle_identify_command, handle_list_command, handle_search_command},
    config::FaunadexConfig,
    controller::Controller,
    ui,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, FaunadexError>;

/// Handle the config command - manage application settings
///
/// # Errors
///
/// Returns `FaunadexError` if the configuration key is invalid, value
/// parsing fails, or configuration save fails.
fn handle_config_command(
    mut config: FaunadexConfig,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let parts: Vec<&str> = setting.splitn(2, '=').collect();
            if parts.len() != 2 {
                return Err(FaunadexError::InvalidInput(
                    "Invalid format. Use: faunadex config set key=value".into(),
                ));
            }

            let key = parts[0].trim();
            let value = parts[1].trim();

            match key {
                "base_url" => {
                    config.base_url = value.trim_end_matches('/').to_string();
                }
                "quiet" => {
                    config.quiet = value.parse::<bool>().map_err(|_| {
                        FaunadexError::InvalidInput(format!(
                            "Invalid value for quiet: '{value}'. Use 'true' or 'false'"
                        ))
                    })?;
                }
                "request_timeout_secs" => {
                    config.request_timeout_secs = value.parse::<u64>().map_err(|_| {
                        FaunadexError::InvalidInput(format!(
                            "Invalid value for request_timeout_secs: '{value}'"
                        ))
                    })?;
                }
                "camera_frame" => {
                    config.camera_frame = if value.is_empty() {
                        None
                    } else {
                        Some(value.into())
                    };
                }
                _ => {
                    return Err(FaunadexError::InvalidInput(format!(
                        "Unknown configuration key: '{key}'. Available keys: base_url, quiet, request_timeout_secs, camera_frame"
                    )));
                }
            }

            config.save()?;
            if !quiet {
                println!("Set {key} = {value}");
            }
        }
        ConfigCommands::Get { key } => match key.as_str() {
            "base_url" => println!("{}", config.base_url),
            "quiet" => println!("{}", config.quiet),
            "request_timeout_secs" => println!("{}", config.request_timeout_secs),
            "camera_frame" => println!(
                "{}",
                config
                    .camera_frame
                    .as_deref()
                    .map_or(String::new(), |p| p.display().to_string())
            ),
            _ => {
                return Err(FaunadexError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: base_url, quiet, request_timeout_secs, camera_frame"
                )));
            }
        },
    }
    Ok(())
}

/// Main entry point for the faunadex application
///
/// Loads configuration, parses command-line arguments, and dispatches
/// to the appropriate command handler.
///
/// # Errors
///
/// Returns `FaunadexError` if configuration loading fails, the client
/// cannot be built, or any command handler returns an error.
fn main() -> Result<()> {
    let config = FaunadexConfig::load_or_setup()?;

    let cli = Cli::parse_args();

    let quiet = cli.quiet || config.quiet;
    let base_url = cli
        .base_url
        .clone()
        .unwrap_or_else(|| config.base_url.clone());

    let command = cli.command();

    if let Commands::Config { command } = &command {
        return handle_config_command(config, command, quiet);
    }

    // The interactive browser owns the terminal; logging to stderr would
    // tear up the screen, so the subscriber is only installed for the
    // one-shot commands.
    if !matches!(command, Commands::Browse) {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let client = Arc::new(HttpCatalogClient::new(&base_url, config.request_timeout())?);

    match &command {
        Commands::Browse => {
            let mut controller = Controller::new(client, config.camera_device());
            ui::run(&mut controller)?;
        }
        Commands::List => {
            handle_list_command(client.as_ref(), quiet)?;
        }
        Commands::Search(args) => {
            handle_search_command(client.as_ref(), args, quiet)?;
        }
        Commands::Identify { image } => {
            handle_identify_command(client.as_ref(), image, quiet)?;
        }
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}
