//! Command-line interface definitions
//!
//! The default command is `browse`, the interactive browser. The
//! non-interactive commands (`list`, `search`, `identify`) talk to the
//! service directly and print results; they exist for scripting and for
//! poking at a service without entering the TUI.

use crate::query::{Bound, QueryBuilder, SearchField};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// A terminal field guide for a remote creature catalog
#[derive(Debug, Parser)]
#[command(name = "faunadex", version, about)]
pub struct Cli {
    /// Override the configured service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Only output results (suppress informational output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse the process arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The requested command, defaulting to `browse`
    #[must_use]
    pub fn command(self) -> Commands {
        self.command.unwrap_or(Commands::Browse)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse the catalog interactively (default)
    Browse,

    /// Print the full catalog
    List,

    /// Search the catalog by field
    Search(SearchArgs),

    /// Identify a creature from an image file
    Identify {
        /// Image to submit
        image: PathBuf,
    },

    /// Manage application settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Set a configuration value (key=value)
    Set { setting: String },
    /// Print a configuration value
    Get { key: String },
}

/// Search field flags
///
/// Height, weight and gender ratio are ranges; either bound may be given
/// alone. Everything else matches exactly.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Entry number
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub scientific_name: Option<String>,

    #[arg(long)]
    pub kingdom: Option<String>,

    #[arg(long)]
    pub classification: Option<String>,

    #[arg(long)]
    pub family: Option<String>,

    #[arg(long)]
    pub body_shape: Option<String>,

    #[arg(long)]
    pub height_min: Option<String>,
    #[arg(long)]
    pub height_max: Option<String>,

    #[arg(long)]
    pub weight_min: Option<String>,
    #[arg(long)]
    pub weight_max: Option<String>,

    #[arg(long)]
    pub gender_ratio_min: Option<String>,
    #[arg(long)]
    pub gender_ratio_max: Option<String>,
}

impl SearchArgs {
    /// Feed the given flags into a query builder
    ///
    /// Each present flag activates its field; values go through the same
    /// parse-on-build rules as the interactive search panel, so a flag
    /// that does not parse is dropped rather than rejected.
    #[must_use]
    pub fn to_query_builder(&self) -> QueryBuilder {
        let mut builder = QueryBuilder::new();

        let scalars = [
            (SearchField::Id, &self.id),
            (SearchField::Name, &self.name),
            (SearchField::ScientificName, &self.scientific_name),
            (SearchField::Kingdom, &self.kingdom),
            (SearchField::Classification, &self.classification),
            (SearchField::Family, &self.family),
            (SearchField::BodyShape, &self.body_shape),
        ];
        for (field, value) in scalars {
            if let Some(raw) = value {
                builder.toggle(field);
                builder.set_scalar(field, raw.clone());
            }
        }

        let ranges = [
            (SearchField::Height, &self.height_min, &self.height_max),
            (SearchField::Weight, &self.weight_min, &self.weight_max),
            (
                SearchField::GenderRatio,
                &self.gender_ratio_min,
                &self.gender_ratio_max,
            ),
        ];
        for (field, min, max) in ranges {
            if min.is_some() || max.is_some() {
                builder.toggle(field);
                if let Some(raw) = min {
                    builder.set_bound(field, Bound::Min, raw.clone());
                }
                if let Some(raw) = max {
                    builder.set_bound(field, Bound::Max, raw.clone());
                }
            }
        }

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::parse_from(["faunadex"]);
        assert!(matches!(cli.command(), Commands::Browse));
    }

    #[test]
    fn test_search_flags_build_query() {
        let cli = Cli::parse_from([
            "faunadex",
            "search",
            "--kingdom",
            "Animalia",
            "--height-min",
            "1.0",
            "--height-max",
            "2.5",
        ]);

        let Commands::Search(args) = cli.command() else {
            panic!("expected search command");
        };

        let params = args.to_query_builder().build();
        assert_eq!(params.get("kingdom"), Some("Animalia"));
        assert_eq!(params.get("height_min"), Some("1.0"));
        assert_eq!(params.get("height_max"), Some("2.5"));
    }

    #[test]
    fn test_search_min_only_range() {
        let cli = Cli::parse_from(["faunadex", "search", "--weight-min", "10"]);

        let Commands::Search(args) = cli.command() else {
            panic!("expected search command");
        };

        let params = args.to_query_builder().build();
        assert_eq!(params.get("weight_min"), Some("10"));
        assert_eq!(params.get("weight_max"), None);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["faunadex", "--quiet", "--base-url", "http://x/api", "list"]);
        assert!(cli.quiet);
        assert_eq!(cli.base_url.as_deref(), Some("http://x/api"));
    }
}
