//! Integration tests for the faunadex interaction core
//!
//! These tests verify end-to-end workflows by wiring the real controller
//! against the in-memory service and camera doubles and walking through
//! complete user scenarios: browse, search, scan-and-identify, and the
//! recovery paths.

use faunadex::api::{CatalogClient, Creature};
use faunadex::controller::{Command, Controller, LeftPane, UiEvent};
use faunadex::query::SearchField;
use faunadex::scan::{CameraDevice, ScanState};
use faunadex::testing::{MockCamera, MockCatalog, creature, write_test_png};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const TICK: Duration = Duration::from_secs(2);

struct Harness {
    controller: Controller,
    catalog: Arc<MockCatalog>,
    camera: Arc<MockCamera>,
    _dir: tempfile::TempDir,
    photo: PathBuf,
}

/// Spin up a controller over a seeded service, with the initial load
/// already settled and a photo on disk ready to upload.
fn harness(entries: Vec<Creature>) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("photo.png");
    write_test_png(&photo, 320, 240);

    let catalog = Arc::new(MockCatalog::with_entries(entries));
    let camera = Arc::new(MockCamera::new());
    let mut controller = Controller::new(
        Arc::clone(&catalog) as Arc<dyn CatalogClient>,
        Arc::clone(&camera) as Arc<dyn CameraDevice>,
    );

    controller.start();
    assert!(controller.pump_one(TICK), "initial load must settle");

    Harness {
        controller,
        catalog,
        camera,
        _dir: dir,
        photo,
    }
}

#[test]
fn test_browse_hover_select_and_outside_click() {
    let mut h = harness(vec![creature(1, "Koala"), creature(2, "Emu")]);

    // Hover previews without selecting.
    h.controller.handle_event(UiEvent::PointerEnter(2));
    let model = h.controller.render_model();
    assert!(matches!(model.left_pane, LeftPane::Detail(c) if c.id == 2));
    assert_eq!(model.selected_id, None);

    // Click pins the selection; hover elsewhere no longer changes the pane.
    h.controller.handle_event(UiEvent::ClickEntry(2));
    h.controller.handle_event(UiEvent::PointerEnter(1));
    let model = h.controller.render_model();
    assert!(matches!(model.left_pane, LeftPane::Detail(c) if c.id == 2));

    // Pointer-leave then outside click empties the pane.
    h.controller.handle_event(UiEvent::PointerLeave);
    h.controller.handle_event(UiEvent::OutsideClick);
    let model = h.controller.render_model();
    assert!(matches!(model.left_pane, LeftPane::Empty));
}

#[test]
fn test_full_scan_identify_workflow_with_camera() {
    let mut h = harness(vec![creature(1, "Koala")]);
    h.catalog.identify_as(creature(2, "Quokka"));

    h.controller.handle_event(UiEvent::ToggleScan);
    h.controller.handle_event(UiEvent::OpenCamera);
    assert_eq!(h.camera.live_streams(), 1);

    h.controller.handle_event(UiEvent::Capture);
    assert_eq!(h.camera.live_streams(), 0, "capture releases the camera");
    assert_eq!(h.controller.session().state(), ScanState::ImageReady);

    h.controller.handle_event(UiEvent::Analyze);
    assert_eq!(h.controller.session().state(), ScanState::Analyzing);

    // Identify settles, then the post-identify refresh settles.
    assert!(h.controller.pump_one(TICK));
    assert!(h.controller.pump_one(TICK));

    assert!(!h.controller.scan_mode());
    assert_eq!(h.controller.selection().selected().map(|c| c.id), Some(2));
    assert!(h.controller.store().entries().iter().any(|c| c.id == 2));
    assert_eq!(h.controller.session().state(), ScanState::Idle);
}

#[test]
fn test_upload_identify_failure_dismiss_and_retry() {
    let mut h = harness(vec![]);

    h.controller.handle_event(UiEvent::ToggleScan);
    h.controller.handle_event(UiEvent::UploadFile(h.photo.clone()));
    assert_eq!(h.controller.session().state(), ScanState::ImageReady);

    // First attempt fails; the image must survive.
    h.catalog.fail_next("no creature detected");
    h.controller.handle_event(UiEvent::Analyze);
    assert!(h.controller.pump_one(TICK));
    assert_eq!(h.controller.session().state(), ScanState::Error);
    assert!(h.controller.session().image().is_some());

    // Dismiss and retry the same image, no recapture.
    h.controller.handle_event(UiEvent::DismissScanError);
    assert_eq!(h.controller.session().state(), ScanState::ImageReady);

    h.catalog.identify_as(creature(9, "Quokka"));
    h.controller.handle_event(UiEvent::Analyze);
    assert!(h.controller.pump_one(TICK));
    assert!(h.controller.pump_one(TICK));

    assert_eq!(h.controller.selection().selected().map(|c| c.id), Some(9));
    assert!(!h.controller.scan_mode());
}

#[test]
fn test_scan_mode_close_releases_camera_and_restarts_idle() {
    let mut h = harness(vec![]);
    h.controller.handle_event(UiEvent::ToggleScan);
    h.controller.handle_event(UiEvent::OpenCamera);
    assert_eq!(h.camera.live_streams(), 1);

    h.controller.handle_event(UiEvent::ToggleScan);
    assert_eq!(h.camera.live_streams(), 0);
    assert_eq!(h.controller.session().state(), ScanState::Idle);

    // Re-entering scan mode always starts from Idle.
    h.controller.handle_event(UiEvent::ToggleScan);
    assert_eq!(h.controller.session().state(), ScanState::Idle);
    assert!(h.controller.session().image().is_none());
}

#[test]
fn test_camera_denial_leaves_idle_and_alerts() {
    let catalog = Arc::new(MockCatalog::with_entries(vec![]));
    let camera = Arc::new(MockCamera::denying());
    let mut controller = Controller::new(
        Arc::clone(&catalog) as Arc<dyn CatalogClient>,
        Arc::clone(&camera) as Arc<dyn CameraDevice>,
    );

    controller.handle_event(UiEvent::ToggleScan);
    controller.handle_event(UiEvent::OpenCamera);

    assert_eq!(controller.session().state(), ScanState::Idle);
    assert!(controller.session().image().is_none());
    assert!(controller.alert().is_some());
    assert_eq!(camera.live_streams(), 0);
}

#[test]
fn test_search_round_trip_with_range_fields() {
    let mut tall = creature(1, "Emu");
    tall.height = 1.9;
    let mut mid = creature(2, "Quokka");
    mid.height = 1.2;
    let mut short = creature(3, "Koala");
    short.height = 0.7;

    let mut h = harness(vec![tall, mid, short]);

    h.controller.handle_event(UiEvent::ToggleField(SearchField::Height));
    h.controller.handle_event(UiEvent::SetBound(
        SearchField::Height,
        faunadex::query::Bound::Min,
        "1.0".to_string(),
    ));
    h.controller.handle_event(UiEvent::SetBound(
        SearchField::Height,
        faunadex::query::Bound::Max,
        "1.5".to_string(),
    ));
    h.controller.handle_event(UiEvent::SubmitSearch);
    assert!(h.controller.pump_one(TICK));

    let names: Vec<_> = h
        .controller
        .store()
        .entries()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Quokka"]);

    // Toggling the field off and searching again resets to unfiltered.
    h.controller.handle_event(UiEvent::ToggleField(SearchField::Height));
    h.controller.handle_event(UiEvent::SubmitSearch);
    assert!(h.controller.pump_one(TICK));
    assert_eq!(h.controller.store().entries().len(), 3);
}

#[test]
fn test_failed_load_preserves_list_and_is_dismissible() {
    let mut h = harness(vec![creature(1, "Koala")]);

    h.catalog.fail_next("service unavailable");
    h.controller.execute(Command::Refresh);
    assert!(h.controller.pump_one(TICK));

    let model = h.controller.render_model();
    assert_eq!(model.entries.len(), 1, "previous list is kept on failure");
    assert_eq!(model.banner, Some("service unavailable"));

    h.controller.handle_event(UiEvent::DismissBanner);
    assert!(h.controller.render_model().banner.is_none());
}

#[test]
fn test_host_commands() {
    let mut h = harness(vec![creature(1, "Koala"), creature(2, "Emu")]);

    h.controller.execute(Command::ShowScan(true));
    assert!(h.controller.scan_mode());

    h.controller.execute(Command::ShowCreature(2));
    assert!(!h.controller.scan_mode());
    assert_eq!(h.controller.selection().selected().map(|c| c.id), Some(2));

    h.controller.execute(Command::ShowScan(false));
    assert!(!h.controller.scan_mode());
}
