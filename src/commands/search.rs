//! Handle the search command - field-filtered catalog query

use super::print_entry;
use crate::FaunadexError;
use crate::api::CatalogClient;
use crate::cli::SearchArgs;

/// Build a query from the given flags, run it, and print the results
///
/// Flags that do not parse are dropped, same as the interactive search
/// panel; with no usable flags at all this prints the unfiltered list.
///
/// # Errors
///
/// Returns `FaunadexError` if the service call fails.
pub fn handle_search_command(
    client: &dyn CatalogClient,
    args: &SearchArgs,
    quiet: bool,
) -> Result<(), FaunadexError> {
    let builder = args.to_query_builder();
    let params = builder.build();

    if !quiet && !params.is_empty() {
        println!("{builder}");
    }

    let entries = client.search(&params)?;

    if entries.is_empty() {
        if !quiet {
            println!("No entries matched.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Found {} matching entr{}:", entries.len(), if entries.len() == 1 { "y" } else { "ies" });
    }
    for entry in &entries {
        print_entry(entry, quiet);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCatalog, creature};

    #[test]
    fn test_search_command_with_name_flag() {
        let catalog = MockCatalog::with_entries(vec![creature(1, "Koala"), creature(2, "Emu")]);
        let args = SearchArgs {
            name: Some("Koala".to_string()),
            ..SearchArgs::default()
        };

        handle_search_command(&catalog, &args, true).unwrap();
    }

    #[test]
    fn test_search_command_no_flags_is_unfiltered() {
        let catalog = MockCatalog::with_entries(vec![creature(1, "Koala")]);
        handle_search_command(&catalog, &SearchArgs::default(), true).unwrap();
    }
}
