//! The composition root
//!
//! `Controller` owns the four state holders (store, selection, capture
//! session, query builder) and is the single place user events and
//! settled network calls are applied. The UI adapter translates terminal
//! input into [`UiEvent`]s and renders whatever
//! [`Controller::render_model`] projects; it never touches the state
//! holders directly.
//!
//! Embedding hosts drive the controller through the [`Command`]
//! interface: a small set of named operations (`Refresh`, `ShowScan`,
//! `ShowCreature`) rather than shared mutable references.
//!
//! # Mode invariant
//!
//! At most one of {normal browsing, scan mode} is active. Entering scan
//! mode clears the selection; selecting an entry (by click or by a
//! successful identify) closes the capture session and leaves scan mode.

pub mod events;
pub mod project;

pub use events::{Command, UiEvent};
pub use project::{LeftPane, RenderModel, ScanPane};

use crate::api::CatalogClient;
use crate::catalog::{CatalogStore, NetResponse, SelectionModel};
use crate::query::QueryBuilder;
use crate::scan::{CameraDevice, CaptureSession};
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Wires user events to the state holders and the catalog service
pub struct Controller {
    store: CatalogStore,
    selection: SelectionModel,
    session: CaptureSession,
    query: QueryBuilder,
    scan_mode: bool,
    /// Blocking alert (camera/image failures); dismissed by the user
    alert: Option<String>,
    client: Arc<dyn CatalogClient>,
    camera: Arc<dyn CameraDevice>,
    responses_tx: Sender<NetResponse>,
    responses_rx: Receiver<NetResponse>,
}

impl Controller {
    /// Create a controller over the given service client and camera
    #[must_use]
    pub fn new(client: Arc<dyn CatalogClient>, camera: Arc<dyn CameraDevice>) -> Self {
        let (tx, rx) = unbounded();
        let store = CatalogStore::new(Arc::clone(&client), tx.clone());

        Self {
            store,
            selection: SelectionModel::new(),
            session: CaptureSession::new(),
            query: QueryBuilder::new(),
            scan_mode: false,
            alert: None,
            client,
            camera,
            responses_tx: tx,
            responses_rx: rx,
        }
    }

    /// Issue the initial unfiltered load
    pub fn start(&mut self) {
        self.store.load();
    }

    #[must_use]
    pub const fn scan_mode(&self) -> bool {
        self.scan_mode
    }

    #[must_use]
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[must_use]
    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    #[must_use]
    pub fn query(&self) -> &QueryBuilder {
        &self.query
    }

    #[must_use]
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Execute a named command
    ///
    /// This is the surface an embedding host uses instead of reaching
    /// into the state holders.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Refresh => self.store.refresh(),
            Command::ShowScan(open) => {
                if open {
                    self.enter_scan_mode();
                } else {
                    self.leave_scan_mode();
                }
            }
            Command::ShowCreature(id) => {
                if let Some(entry) = self.store.entry(id).cloned() {
                    self.leave_scan_mode();
                    self.selection.select(entry);
                }
            }
        }
    }

    /// Apply one user event
    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::PointerEnter(id) => {
                if let Some(entry) = self.store.entry(id).cloned() {
                    self.selection.pointer_enter(entry);
                }
            }
            UiEvent::PointerLeave => self.selection.pointer_leave(),
            UiEvent::ClickEntry(id) => {
                if let Some(entry) = self.store.entry(id).cloned() {
                    // Selecting implicitly exits scan mode.
                    self.leave_scan_mode();
                    self.selection.select(entry);
                }
            }
            UiEvent::OutsideClick => self.selection.clear_selected(),
            UiEvent::ToggleScan => {
                let open = !self.scan_mode;
                self.execute(Command::ShowScan(open));
            }
            UiEvent::OpenCamera => {
                if !self.scan_mode {
                    return;
                }
                if let Err(e) = self.session.open_camera(self.camera.as_ref()) {
                    self.alert = Some(e.to_string());
                }
            }
            UiEvent::Capture => {
                if let Err(e) = self.session.capture() {
                    self.surface_scan_failure(&e);
                }
            }
            UiEvent::CancelCamera => {
                if let Err(e) = self.session.cancel_camera() {
                    self.surface_scan_failure(&e);
                }
            }
            UiEvent::UploadFile(path) => {
                if !self.scan_mode {
                    return;
                }
                if let Err(e) = self.session.upload_file(&path) {
                    self.surface_scan_failure(&e);
                }
            }
            UiEvent::Retake => {
                if let Err(e) = self.session.retake() {
                    self.surface_scan_failure(&e);
                }
            }
            UiEvent::Analyze => self.submit_analyze(),
            UiEvent::DismissScanError => {
                if let Err(e) = self.session.dismiss_error() {
                    self.surface_scan_failure(&e);
                }
            }
            UiEvent::DismissBanner => self.store.dismiss_error(),
            UiEvent::DismissAlert => self.alert = None,
            UiEvent::ToggleField(field) => {
                self.query.toggle(field);
            }
            UiEvent::SetScalar(field, raw) => self.query.set_scalar(field, raw),
            UiEvent::SetBound(field, bound, raw) => self.query.set_bound(field, bound, raw),
            UiEvent::SubmitSearch => self.store.search(self.query.build()),
        }
    }

    /// Apply one settled network call
    pub fn handle_response(&mut self, response: NetResponse) {
        match response {
            NetResponse::List { seq, result } => self.store.apply_list(seq, result),
            NetResponse::Identified(result) => {
                if let Some(entry) = self.session.finish_analyze(result) {
                    self.leave_scan_mode();
                    self.selection.select(entry);
                    self.store.refresh();
                }
            }
        }
    }

    /// Drain every settled response without blocking
    pub fn pump(&mut self) {
        while let Ok(response) = self.responses_rx.try_recv() {
            self.handle_response(response);
        }
    }

    /// Wait up to `timeout` for one settled response and apply it
    ///
    /// Returns false if nothing settled in time. Used by tests and the
    /// demo loop; the interactive loop uses [`Controller::pump`] between
    /// input polls.
    pub fn pump_one(&mut self, timeout: Duration) -> bool {
        match self.responses_rx.recv_timeout(timeout) {
            Ok(response) => {
                self.handle_response(response);
                true
            }
            Err(_) => false,
        }
    }

    /// Project the current state into a render model
    #[must_use]
    pub fn render_model(&self) -> RenderModel<'_> {
        project::project(
            &self.store,
            &self.selection,
            &self.session,
            &self.query,
            self.scan_mode,
            self.alert.as_deref(),
        )
    }

    fn enter_scan_mode(&mut self) {
        if self.scan_mode {
            return;
        }
        // Scan replaces the preview pane; a lingering selection would
        // fight it for the detail view.
        self.selection.clear_selected();
        self.session = CaptureSession::new();
        self.scan_mode = true;
    }

    fn leave_scan_mode(&mut self) {
        if !self.scan_mode {
            return;
        }
        self.session.close();
        self.scan_mode = false;
    }

    fn submit_analyze(&mut self) {
        let payload = match self.session.begin_analyze() {
            Ok(payload) => payload,
            Err(e) => {
                debug!(error = %e, "analyze not started");
                return;
            }
        };

        let client = Arc::clone(&self.client);
        let tx = self.responses_tx.clone();
        thread::spawn(move || {
            let result = client.identify(payload.png, &payload.file_name);
            let _ = tx.send(NetResponse::Identified(result));
        });
    }

    fn surface_scan_failure(&mut self, error: &crate::scan::ScanError) {
        use crate::scan::ScanError;
        match error {
            // Wrong-state operations are no-ops; the UI simply didn't
            // know the state changed under it.
            ScanError::NotAvailable { .. } => {
                debug!(error = %error, "scan operation ignored");
            }
            ScanError::Camera(_) | ScanError::Image(_) => {
                self.alert = Some(error.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchField;
    use crate::scan::ScanState;
    use crate::testing::{MockCamera, MockCatalog, creature, write_test_png};

    const TICK: Duration = Duration::from_secs(2);

    struct Rig {
        controller: Controller,
        catalog: Arc<MockCatalog>,
        camera: Arc<MockCamera>,
    }

    fn rig(entries: Vec<crate::api::Creature>) -> Rig {
        let catalog = Arc::new(MockCatalog::with_entries(entries));
        let camera = Arc::new(MockCamera::new());
        let controller = Controller::new(
            Arc::clone(&catalog) as Arc<dyn CatalogClient>,
            Arc::clone(&camera) as Arc<dyn CameraDevice>,
        );
        Rig {
            controller,
            catalog,
            camera,
        }
    }

    fn loaded_rig(entries: Vec<crate::api::Creature>) -> Rig {
        let mut r = rig(entries);
        r.controller.start();
        assert!(r.controller.pump_one(TICK));
        r
    }

    #[test]
    fn test_start_loads_entries() {
        let r = loaded_rig(vec![creature(1, "Koala"), creature(2, "Emu")]);
        assert_eq!(r.controller.store().entries().len(), 2);
    }

    #[test]
    fn test_click_selects_entry() {
        let mut r = loaded_rig(vec![creature(1, "Koala")]);

        r.controller.handle_event(UiEvent::ClickEntry(1));

        assert_eq!(r.controller.selection().selected().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_entering_scan_mode_clears_selection() {
        let mut r = loaded_rig(vec![creature(1, "Koala")]);
        r.controller.handle_event(UiEvent::ClickEntry(1));

        r.controller.handle_event(UiEvent::ToggleScan);

        assert!(r.controller.scan_mode());
        assert!(r.controller.selection().selected().is_none());
    }

    #[test]
    fn test_selecting_entry_exits_scan_mode() {
        let mut r = loaded_rig(vec![creature(1, "Koala")]);
        r.controller.handle_event(UiEvent::ToggleScan);
        r.controller.handle_event(UiEvent::OpenCamera);
        assert_eq!(r.camera.live_streams(), 1);

        r.controller.handle_event(UiEvent::ClickEntry(1));

        assert!(!r.controller.scan_mode());
        assert_eq!(r.controller.session().state(), ScanState::Idle);
        assert_eq!(r.camera.live_streams(), 0, "camera must be released");
        assert_eq!(r.controller.selection().selected().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_scan_open_close_always_releases_camera() {
        let mut r = loaded_rig(vec![]);

        r.controller.handle_event(UiEvent::ToggleScan);
        r.controller.handle_event(UiEvent::OpenCamera);
        assert_eq!(r.camera.live_streams(), 1);

        r.controller.handle_event(UiEvent::ToggleScan);

        assert!(!r.controller.scan_mode());
        assert_eq!(r.controller.session().state(), ScanState::Idle);
        assert_eq!(r.camera.live_streams(), 0);
    }

    #[test]
    fn test_camera_denial_surfaces_alert() {
        let catalog = Arc::new(MockCatalog::with_entries(vec![]));
        let camera = Arc::new(MockCamera::denying());
        let mut controller = Controller::new(
            Arc::clone(&catalog) as Arc<dyn CatalogClient>,
            Arc::clone(&camera) as Arc<dyn CameraDevice>,
        );

        controller.handle_event(UiEvent::ToggleScan);
        controller.handle_event(UiEvent::OpenCamera);

        assert_eq!(controller.session().state(), ScanState::Idle);
        assert!(controller.alert().is_some());
        assert!(controller.session().image().is_none());

        controller.handle_event(UiEvent::DismissAlert);
        assert!(controller.alert().is_none());
    }

    #[test]
    fn test_capture_outside_camera_active_is_ignored() {
        let mut r = loaded_rig(vec![]);
        r.controller.handle_event(UiEvent::ToggleScan);

        r.controller.handle_event(UiEvent::Capture);

        assert_eq!(r.controller.session().state(), ScanState::Idle);
        assert!(r.controller.alert().is_none());
    }

    #[test]
    fn test_successful_identify_selects_refreshes_and_exits_scan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        write_test_png(&path, 8, 8);

        let mut r = loaded_rig(vec![creature(1, "Koala")]);
        r.catalog.identify_as(creature(42, "Quokka"));

        r.controller.handle_event(UiEvent::ToggleScan);
        r.controller.handle_event(UiEvent::UploadFile(path));
        r.controller.handle_event(UiEvent::Analyze);
        assert_eq!(r.controller.session().state(), ScanState::Analyzing);

        // Identify settles, then the triggered refresh settles.
        assert!(r.controller.pump_one(TICK));
        assert!(r.controller.pump_one(TICK));

        assert!(!r.controller.scan_mode());
        assert_eq!(r.controller.selection().selected().map(|c| c.id), Some(42));
        assert!(
            r.controller.store().entries().iter().any(|c| c.id == 42),
            "refreshed list must contain the identified entry"
        );
        assert_eq!(r.controller.session().state(), ScanState::Idle);
    }

    #[test]
    fn test_failed_identify_enters_error_and_keeps_scan_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        write_test_png(&path, 8, 8);

        let mut r = loaded_rig(vec![]);
        r.controller.handle_event(UiEvent::ToggleScan);
        r.controller.handle_event(UiEvent::UploadFile(path));
        r.catalog.fail_next("no creature detected");
        r.controller.handle_event(UiEvent::Analyze);

        assert!(r.controller.pump_one(TICK));

        assert!(r.controller.scan_mode());
        assert_eq!(r.controller.session().state(), ScanState::Error);
        assert_eq!(
            r.controller.session().error_message(),
            Some("no creature detected")
        );
    }

    #[test]
    fn test_identify_settling_after_scan_close_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        write_test_png(&path, 8, 8);

        let mut r = loaded_rig(vec![]);
        r.controller.handle_event(UiEvent::ToggleScan);
        r.controller.handle_event(UiEvent::UploadFile(path));
        r.controller.handle_event(UiEvent::Analyze);

        // User closes scan mode before the request settles.
        r.controller.handle_event(UiEvent::ToggleScan);
        assert!(r.controller.pump_one(TICK));

        assert!(r.controller.selection().selected().is_none());
        assert_eq!(r.controller.session().state(), ScanState::Idle);
    }

    #[test]
    fn test_search_submit_filters_list() {
        let mut r = loaded_rig(vec![creature(1, "Koala"), creature(2, "Emu")]);

        r.controller.handle_event(UiEvent::ToggleField(SearchField::Name));
        r.controller
            .handle_event(UiEvent::SetScalar(SearchField::Name, "Emu".to_string()));
        r.controller.handle_event(UiEvent::SubmitSearch);
        assert!(r.controller.pump_one(TICK));

        assert_eq!(r.controller.store().entries().len(), 1);
        assert_eq!(r.controller.store().entries()[0].name, "Emu");
    }

    #[test]
    fn test_empty_search_resets_to_unfiltered() {
        let mut r = loaded_rig(vec![creature(1, "Koala"), creature(2, "Emu")]);

        r.controller.handle_event(UiEvent::ToggleField(SearchField::Name));
        r.controller
            .handle_event(UiEvent::SetScalar(SearchField::Name, "Emu".to_string()));
        r.controller.handle_event(UiEvent::SubmitSearch);
        assert!(r.controller.pump_one(TICK));
        assert_eq!(r.controller.store().entries().len(), 1);

        r.controller.handle_event(UiEvent::ToggleField(SearchField::Name));
        r.controller.handle_event(UiEvent::SubmitSearch);
        assert!(r.controller.pump_one(TICK));

        assert_eq!(r.controller.store().entries().len(), 2);
    }

    #[test]
    fn test_show_creature_command_selects_and_exits_scan() {
        let mut r = loaded_rig(vec![creature(1, "Koala")]);
        r.controller.handle_event(UiEvent::ToggleScan);

        r.controller.execute(Command::ShowCreature(1));

        assert!(!r.controller.scan_mode());
        assert_eq!(r.controller.selection().selected().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_refresh_command_reloads() {
        let mut r = loaded_rig(vec![creature(1, "Koala")]);
        r.catalog.identify_as(creature(2, "Emu"));
        r.catalog.identify(vec![1], "x.png").unwrap();

        r.controller.execute(Command::Refresh);
        assert!(r.controller.pump_one(TICK));

        assert_eq!(r.controller.store().entries().len(), 2);
    }

    #[test]
    fn test_outside_click_clears_selection_only() {
        let mut r = loaded_rig(vec![creature(1, "Koala"), creature(2, "Emu")]);
        r.controller.handle_event(UiEvent::ClickEntry(1));
        r.controller.handle_event(UiEvent::PointerEnter(2));

        r.controller.handle_event(UiEvent::OutsideClick);

        assert!(r.controller.selection().selected().is_none());
        assert_eq!(r.controller.selection().hovered().map(|c| c.id), Some(2));
    }

    #[test]
    fn test_upload_ignored_outside_scan_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        write_test_png(&path, 4, 4);

        let mut r = loaded_rig(vec![]);
        r.controller.handle_event(UiEvent::UploadFile(path));

        assert_eq!(r.controller.session().state(), ScanState::Idle);
    }
}
