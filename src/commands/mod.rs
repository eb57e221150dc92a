//! Non-interactive command handlers
//!
//! These talk to the service through the same `CatalogClient` the
//! interactive browser uses and print to stdout. With `--quiet` only the
//! bare results are printed, one per line, for scripting.

mod identify;
mod list;
mod search;

pub use identify::handle_identify_command;
pub use list::handle_list_command;
pub use search::handle_search_command;

use crate::api::Creature;
use colored::Colorize;

/// Print one entry as a result line
pub(crate) fn print_entry(entry: &Creature, quiet: bool) {
    if quiet {
        println!("{}\t{}", entry.id, entry.name);
    } else {
        println!(
            "  {} {} ({})",
            entry.display_number().bold(),
            entry.name.red().bold(),
            entry.scientific_name.italic()
        );
    }
}

/// Print an entry's full record
pub(crate) fn print_entry_details(entry: &Creature, quiet: bool) {
    if quiet {
        println!("{}\t{}", entry.id, entry.name);
        return;
    }

    println!("{} {}", entry.display_number().bold(), entry.name.red().bold());
    println!("  {}", entry.scientific_name.italic());
    println!("  {}", entry.description);
    println!("  Kingdom:        {}", entry.kingdom);
    println!("  Classification: {}", entry.classification);
    println!("  Family:         {}", entry.family);
    println!("  Body shape:     {}", entry.body_shape);
    println!("  Gender ratio:   {}", entry.gender_ratio);
    println!("  Height:         {} m", entry.height);
    println!("  Weight:         {} kg", entry.weight);
}
