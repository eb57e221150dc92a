//! Handle the identify command - submit an image file

use super::print_entry_details;
use crate::FaunadexError;
use crate::api::CatalogClient;
use crate::scan::image::{crop_centered_square, encode_png};
use std::path::Path;

/// Submit an image for identification and print the identified entry
///
/// The image goes through the same preparation as the interactive scan:
/// cropped to the largest centered square and re-encoded as PNG.
///
/// # Errors
///
/// Returns `FaunadexError` if the image cannot be read or the service
/// rejects it.
pub fn handle_identify_command(
    client: &dyn CatalogClient,
    image_path: &Path,
    quiet: bool,
) -> Result<(), FaunadexError> {
    let decoded = image::open(image_path)
        .map_err(|e| FaunadexError::InvalidInput(format!(
            "Cannot read image '{}': {e}",
            image_path.display()
        )))?;

    let square = crop_centered_square(&decoded);
    let png = encode_png(&square).map_err(FaunadexError::InvalidInput)?;
    let file_name = image_path
        .file_name()
        .map_or_else(|| "upload.png".to_string(), |n| n.to_string_lossy().into_owned());

    if !quiet {
        println!("Analyzing {}...", image_path.display());
    }

    let entry = client.identify(png, &file_name)?;

    if !quiet {
        println!("Identified:");
    }
    print_entry_details(&entry, quiet);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCatalog, creature, write_test_png};

    #[test]
    fn test_identify_command_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        write_test_png(&path, 10, 6);

        let catalog = MockCatalog::with_entries(vec![]);
        catalog.identify_as(creature(7, "Quokka"));

        handle_identify_command(&catalog, &path, true).unwrap();
        assert!(catalog.entries().iter().any(|c| c.id == 7));
    }

    #[test]
    fn test_identify_command_rejects_unreadable_file() {
        let catalog = MockCatalog::with_entries(vec![]);
        let result = handle_identify_command(&catalog, Path::new("/nonexistent.png"), true);
        assert!(matches!(result, Err(FaunadexError::InvalidInput(_))));
    }
}
