//! Pure projection from controller state to a render model
//!
//! The UI renders `RenderModel` and nothing else. The projection is a
//! plain function of the state holders; no caching, no side effects, so
//! it can be called every frame and asserted against in tests.

use crate::api::Creature;
use crate::catalog::{CatalogStore, SelectionModel};
use crate::query::{FieldValue, QueryBuilder, SearchField};
use crate::scan::{CaptureSession, ScanState};

/// Everything the UI needs for one frame
#[derive(Debug)]
pub struct RenderModel<'a> {
    /// The entry list, in service order
    pub entries: &'a [Creature],
    /// A list/search request is in flight
    pub loading: bool,
    /// Dismissible list error banner
    pub banner: Option<&'a str>,
    /// Blocking alert (camera/image failures)
    pub alert: Option<&'a str>,
    /// What the left pane shows
    pub left_pane: LeftPane<'a>,
    /// Row highlight
    pub selected_id: Option<i64>,
    pub hovered_id: Option<i64>,
    /// Scan mode is active (affects chrome, e.g. the scan button label)
    pub scan_mode: bool,
    /// Search panel rows, one per field
    pub search_fields: Vec<SearchFieldView>,
    /// CLI-style preview of the current query
    pub query_preview: String,
}

/// The left pane replaces the detail/preview view with capture controls
/// while scan mode is active
#[derive(Debug, PartialEq)]
pub enum LeftPane<'a> {
    /// Nothing hovered or selected
    Empty,
    /// Detail view of the selected (else hovered) entry
    Detail(&'a Creature),
    /// Scan mode capture controls
    Scan(ScanPane<'a>),
}

/// Scan pane contents
#[derive(Debug, PartialEq, Eq)]
pub struct ScanPane<'a> {
    pub state: ScanState,
    /// An image is buffered (show the preview + analyze/retake controls)
    pub has_image: bool,
    /// Identify failure message, if in the error state
    pub error: Option<&'a str>,
}

/// One search panel row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFieldView {
    pub field: SearchField,
    pub active: bool,
    pub focused: bool,
    /// Raw stored text: scalar, or (min, max) for range fields
    pub value: Option<FieldValue>,
}

/// Project the state holders into a render model
#[must_use]
pub fn project<'a>(
    store: &'a CatalogStore,
    selection: &'a SelectionModel,
    session: &'a CaptureSession,
    query: &'a QueryBuilder,
    scan_mode: bool,
    alert: Option<&'a str>,
) -> RenderModel<'a> {
    let left_pane = if scan_mode {
        LeftPane::Scan(ScanPane {
            state: session.state(),
            has_image: session.image().is_some(),
            error: session.error_message(),
        })
    } else {
        match selection.preview() {
            Some(entry) => LeftPane::Detail(entry),
            None => LeftPane::Empty,
        }
    };

    let search_fields = SearchField::ALL
        .iter()
        .map(|&field| SearchFieldView {
            field,
            active: query.is_active(field),
            focused: query.focused() == Some(field),
            value: query.value(field).cloned(),
        })
        .collect();

    RenderModel {
        entries: store.entries(),
        loading: store.is_loading(),
        banner: store.error(),
        alert,
        left_pane,
        selected_id: selection.selected().map(|c| c.id),
        hovered_id: selection.hovered().map(|c| c.id),
        scan_mode,
        search_fields,
        query_preview: query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CatalogClient;
    use crate::testing::{MockCatalog, creature};
    use crossbeam_channel::unbounded;
    use std::sync::Arc;

    fn empty_store() -> CatalogStore {
        let (tx, _rx) = unbounded();
        CatalogStore::new(
            Arc::new(MockCatalog::with_entries(vec![])) as Arc<dyn CatalogClient>,
            tx,
        )
    }

    #[test]
    fn test_empty_state_projects_empty_pane() {
        let store = empty_store();
        let selection = SelectionModel::new();
        let session = CaptureSession::new();
        let query = QueryBuilder::new();

        let model = project(&store, &selection, &session, &query, false, None);

        assert_eq!(model.left_pane, LeftPane::Empty);
        assert!(!model.scan_mode);
        assert!(model.banner.is_none());
        assert_eq!(model.search_fields.len(), SearchField::ALL.len());
    }

    #[test]
    fn test_hover_projects_detail_pane() {
        let store = empty_store();
        let mut selection = SelectionModel::new();
        selection.pointer_enter(creature(3, "Koala"));
        let session = CaptureSession::new();
        let query = QueryBuilder::new();

        let model = project(&store, &selection, &session, &query, false, None);

        match model.left_pane {
            LeftPane::Detail(entry) => assert_eq!(entry.id, 3),
            _ => panic!("expected detail pane"),
        }
        assert_eq!(model.hovered_id, Some(3));
        assert_eq!(model.selected_id, None);
    }

    #[test]
    fn test_scan_mode_replaces_detail_pane() {
        let store = empty_store();
        let mut selection = SelectionModel::new();
        selection.pointer_enter(creature(3, "Koala"));
        let session = CaptureSession::new();
        let query = QueryBuilder::new();

        let model = project(&store, &selection, &session, &query, true, None);

        match model.left_pane {
            LeftPane::Scan(ref pane) => {
                assert_eq!(pane.state, ScanState::Idle);
                assert!(!pane.has_image);
            }
            _ => panic!("expected scan pane"),
        }
    }

    #[test]
    fn test_focused_field_marked() {
        let store = empty_store();
        let selection = SelectionModel::new();
        let session = CaptureSession::new();
        let mut query = QueryBuilder::new();
        query.toggle(SearchField::Kingdom);
        query.toggle(SearchField::Height);

        let model = project(&store, &selection, &session, &query, false, None);

        let focused: Vec<_> = model
            .search_fields
            .iter()
            .filter(|v| v.focused)
            .map(|v| v.field)
            .collect();
        assert_eq!(focused, vec![SearchField::Height]);

        let active = model
            .search_fields
            .iter()
            .filter(|v| v.active)
            .count();
        assert_eq!(active, 2);
    }
}
