//! Handle the list command - print the full catalog

use super::print_entry;
use crate::FaunadexError;
use crate::api::CatalogClient;

/// Fetch and print the unfiltered catalog
///
/// # Errors
///
/// Returns `FaunadexError` if the service call fails.
pub fn handle_list_command(client: &dyn CatalogClient, quiet: bool) -> Result<(), FaunadexError> {
    let entries = client.list()?;

    if entries.is_empty() {
        if !quiet {
            println!("The catalog is empty.");
        }
        return Ok(());
    }

    if !quiet {
        println!("{} entr{} in the catalog:", entries.len(), plural_y(entries.len()));
    }
    for entry in &entries {
        print_entry(entry, quiet);
    }

    Ok(())
}

const fn plural_y(n: usize) -> &'static str {
    if n == 1 { "y" } else { "ies" }
}
