//! Input mapping for the terminal adapter
//!
//! Keyboard and mouse events become [`UiEvent`]s (or a host
//! [`Command`]); the only state kept here is presentation-local: which
//! input mode is active, which search row the cursor is on, and the
//! path-prompt buffer.

use super::render::Regions;
use crate::controller::{Command, LeftPane, RenderModel, UiEvent};
use crate::query::{Bound, FieldKind, FieldValue, SearchField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use std::path::PathBuf;

/// What a terminal event amounts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exit the browser
    Quit,
    /// Forward to the controller
    Event(UiEvent),
    /// Execute a host command
    Command(Command),
    /// Presentation-only (or nothing at all)
    Nothing,
}

/// Which surface has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The entry list
    Browse,
    /// The search panel
    Search,
    /// Typing a file path for upload
    PathPrompt,
}

/// Presentation-local state
#[derive(Debug)]
pub struct UiState {
    pub mode: Mode,
    /// Cursor row in the search panel (index into `SearchField::ALL`)
    pub search_cursor: usize,
    /// Which bound typing edits on a range field
    pub editing_bound: Bound,
    /// Path prompt buffer
    pub path_input: String,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: Mode::Browse,
            search_cursor: 0,
            editing_bound: Bound::Min,
            path_input: String::new(),
        }
    }

    fn cursor_field(&self) -> SearchField {
        SearchField::ALL[self.search_cursor]
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate one key event
pub fn map_key(ui: &mut UiState, model: &RenderModel<'_>, key: KeyEvent) -> Outcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Outcome::Quit;
    }

    // A blocking alert swallows everything else until dismissed.
    if model.alert.is_some() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Outcome::Event(UiEvent::DismissAlert),
            _ => Outcome::Nothing,
        };
    }

    match ui.mode {
        Mode::PathPrompt => map_path_prompt_key(ui, key),
        Mode::Search => map_search_key(ui, model, key),
        Mode::Browse => map_browse_key(ui, model, key),
    }
}

fn map_path_prompt_key(ui: &mut UiState, key: KeyEvent) -> Outcome {
    match key.code {
        KeyCode::Esc => {
            ui.mode = Mode::Browse;
            ui.path_input.clear();
            Outcome::Nothing
        }
        KeyCode::Enter => {
            ui.mode = Mode::Browse;
            let path = PathBuf::from(std::mem::take(&mut ui.path_input));
            Outcome::Event(UiEvent::UploadFile(path))
        }
        KeyCode::Backspace => {
            ui.path_input.pop();
            Outcome::Nothing
        }
        KeyCode::Char(c) => {
            ui.path_input.push(c);
            Outcome::Nothing
        }
        _ => Outcome::Nothing,
    }
}

fn map_search_key(ui: &mut UiState, model: &RenderModel<'_>, key: KeyEvent) -> Outcome {
    let field = ui.cursor_field();

    match key.code {
        KeyCode::Esc => {
            ui.mode = Mode::Browse;
            Outcome::Nothing
        }
        KeyCode::Enter => {
            ui.mode = Mode::Browse;
            Outcome::Event(UiEvent::SubmitSearch)
        }
        KeyCode::Up => {
            ui.search_cursor = ui.search_cursor.saturating_sub(1);
            Outcome::Nothing
        }
        KeyCode::Down => {
            if ui.search_cursor + 1 < SearchField::ALL.len() {
                ui.search_cursor += 1;
            }
            Outcome::Nothing
        }
        KeyCode::Tab => Outcome::Event(UiEvent::ToggleField(field)),
        KeyCode::Left => {
            ui.editing_bound = Bound::Min;
            Outcome::Nothing
        }
        KeyCode::Right => {
            ui.editing_bound = Bound::Max;
            Outcome::Nothing
        }
        KeyCode::Backspace => edit_field(ui, model, field, Edit::DeleteLast),
        KeyCode::Char(c) => edit_field(ui, model, field, Edit::Append(c)),
        _ => Outcome::Nothing,
    }
}

enum Edit {
    Append(char),
    DeleteLast,
}

/// Apply an edit to the cursor field's raw text
///
/// Editing an inactive field is ignored; the user toggles it on first.
fn edit_field(ui: &UiState, model: &RenderModel<'_>, field: SearchField, edit: Edit) -> Outcome {
    let view = model
        .search_fields
        .iter()
        .find(|v| v.field == field)
        .expect("every field has a view");
    if !view.active {
        return Outcome::Nothing;
    }

    if field.kind() == FieldKind::Range {
        let (min, max) = match &view.value {
            Some(FieldValue::Range { min, max }) => (min.clone(), max.clone()),
            Some(FieldValue::Scalar(s)) => (s.clone(), String::new()),
            None => (String::new(), String::new()),
        };
        let mut text = match ui.editing_bound {
            Bound::Min => min,
            Bound::Max => max,
        };
        apply_edit(&mut text, &edit);
        Outcome::Event(UiEvent::SetBound(field, ui.editing_bound, text))
    } else {
        let mut text = match &view.value {
            Some(FieldValue::Scalar(s)) => s.clone(),
            _ => String::new(),
        };
        apply_edit(&mut text, &edit);
        Outcome::Event(UiEvent::SetScalar(field, text))
    }
}

fn apply_edit(text: &mut String, edit: &Edit) {
    match edit {
        Edit::Append(c) => text.push(*c),
        Edit::DeleteLast => {
            text.pop();
        }
    }
}

fn map_browse_key(ui: &mut UiState, model: &RenderModel<'_>, key: KeyEvent) -> Outcome {
    // Scan-mode keys take precedence over list navigation.
    if model.scan_mode {
        let scan_error = matches!(&model.left_pane, LeftPane::Scan(pane) if pane.error.is_some());
        match key.code {
            KeyCode::Char('c') => return Outcome::Event(UiEvent::OpenCamera),
            KeyCode::Char(' ') => return Outcome::Event(UiEvent::Capture),
            KeyCode::Char('x') => return Outcome::Event(UiEvent::CancelCamera),
            KeyCode::Char('a') => return Outcome::Event(UiEvent::Analyze),
            KeyCode::Char('r') => return Outcome::Event(UiEvent::Retake),
            KeyCode::Char('u') => {
                ui.mode = Mode::PathPrompt;
                ui.path_input.clear();
                return Outcome::Nothing;
            }
            KeyCode::Char('d') => return Outcome::Event(UiEvent::DismissScanError),
            KeyCode::Esc if scan_error => return Outcome::Event(UiEvent::DismissScanError),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('q') => Outcome::Quit,
        KeyCode::Char('s') => Outcome::Event(UiEvent::ToggleScan),
        KeyCode::Char('g') => Outcome::Command(Command::Refresh),
        KeyCode::Char('/') | KeyCode::Char('f') => {
            ui.mode = Mode::Search;
            Outcome::Nothing
        }
        KeyCode::Esc => {
            if model.banner.is_some() {
                Outcome::Event(UiEvent::DismissBanner)
            } else if model.selected_id.is_some() {
                // Keyboard equivalent of clicking outside the preview.
                Outcome::Event(UiEvent::OutsideClick)
            } else {
                Outcome::Nothing
            }
        }
        KeyCode::Up => hover_step(model, -1),
        KeyCode::Down => hover_step(model, 1),
        KeyCode::Enter => match model.hovered_id {
            Some(id) => Outcome::Event(UiEvent::ClickEntry(id)),
            None => Outcome::Nothing,
        },
        _ => Outcome::Nothing,
    }
}

/// Move the keyboard "pointer" through the list
fn hover_step(model: &RenderModel<'_>, delta: isize) -> Outcome {
    if model.entries.is_empty() {
        return Outcome::Nothing;
    }

    let current = model
        .hovered_id
        .and_then(|id| model.entries.iter().position(|c| c.id == id));
    let next = match current {
        Some(idx) => idx
            .saturating_add_signed(delta)
            .min(model.entries.len() - 1),
        None if delta > 0 => 0,
        None => model.entries.len() - 1,
    };

    Outcome::Event(UiEvent::PointerEnter(model.entries[next].id))
}

/// Translate one mouse event against the last rendered regions
pub fn map_mouse(regions: &Regions, mouse: MouseEvent) -> Outcome {
    let pos = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Moved => {
            for (id, rect) in &regions.rows {
                if rect.contains(pos) {
                    return Outcome::Event(UiEvent::PointerEnter(*id));
                }
            }
            Outcome::Event(UiEvent::PointerLeave)
        }
        MouseEventKind::Down(MouseButton::Left) => {
            for (id, rect) in &regions.rows {
                if rect.contains(pos) {
                    return Outcome::Event(UiEvent::ClickEntry(*id));
                }
            }
            // The preview pane and search panel are "inside"; anywhere
            // else counts as an outside click.
            if regions.preview.contains(pos) || regions.search.contains(pos) {
                Outcome::Nothing
            } else {
                Outcome::Event(UiEvent::OutsideClick)
            }
        }
        _ => Outcome::Nothing,
    }
}
