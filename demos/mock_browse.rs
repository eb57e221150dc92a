//! Demo: drive the controller against an in-memory service
//!
//! Walks the full interaction surface without a network or a camera
//! device, printing the render model after each step. Run with:
//!
//! ```bash
//! cargo run --example mock_browse
//! ```

use faunadex::api::CatalogClient;
use faunadex::controller::{Controller, LeftPane, UiEvent};
use faunadex::query::SearchField;
use faunadex::scan::CameraDevice;
use faunadex::testing::{MockCamera, MockCatalog, creature, write_test_png};
use std::sync::Arc;
use std::time::Duration;

fn describe(controller: &Controller, step: &str) {
    let model = controller.render_model();
    let pane = match &model.left_pane {
        LeftPane::Empty => "empty".to_string(),
        LeftPane::Detail(c) => format!("detail: {} {}", c.display_number(), c.name),
        LeftPane::Scan(pane) => format!("scan: {:?}", pane.state),
    };
    println!(
        "{step}\n  entries: {}  pane: {pane}  query: {}",
        model.entries.len(),
        model.query_preview
    );
}

fn main() {
    let dir = tempfile::tempdir().expect("tempdir");
    let photo = dir.path().join("photo.png");
    write_test_png(&photo, 320, 240);

    let catalog = Arc::new(MockCatalog::with_entries(vec![
        creature(1, "Koala"),
        creature(2, "Emu"),
        creature(3, "Quokka"),
    ]));
    let camera = Arc::new(MockCamera::new());

    let mut controller = Controller::new(
        Arc::clone(&catalog) as Arc<dyn CatalogClient>,
        camera as Arc<dyn CameraDevice>,
    );

    controller.start();
    controller.pump_one(Duration::from_secs(2));
    describe(&controller, "loaded the catalog");

    controller.handle_event(UiEvent::PointerEnter(2));
    describe(&controller, "hovered entry #002");

    controller.handle_event(UiEvent::ClickEntry(2));
    describe(&controller, "selected entry #002");

    controller.handle_event(UiEvent::ToggleField(SearchField::Name));
    controller.handle_event(UiEvent::SetScalar(SearchField::Name, "Quokka".to_string()));
    controller.handle_event(UiEvent::SubmitSearch);
    controller.pump_one(Duration::from_secs(2));
    describe(&controller, "searched by name");

    controller.handle_event(UiEvent::ToggleScan);
    controller.handle_event(UiEvent::UploadFile(photo));
    controller.handle_event(UiEvent::Analyze);
    controller.pump_one(Duration::from_secs(2));
    controller.pump_one(Duration::from_secs(2));
    describe(&controller, "scanned and identified");
}
