//! Frame rendering
//!
//! Pure view code: renders the controller's `RenderModel` and reports
//! the screen regions input mapping needs for hit-testing. Layout is a
//! two-pane split (preview/scan on the left, entry list on the right)
//! over a search panel and a status line, echoing the original device
//! chrome.

use super::events::{Mode, UiState};
use crate::controller::{LeftPane, RenderModel, ScanPane};
use crate::query::{Bound, FieldKind, FieldValue};
use crate::scan::ScanState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

/// Screen regions needed for mouse hit-testing
#[derive(Debug, Clone, Default)]
pub struct Regions {
    /// The preview/scan pane (clicks inside never clear the selection)
    pub preview: Rect,
    /// The search panel
    pub search: Rect,
    /// Visible entry rows: (entry id, row rect)
    pub rows: Vec<(i64, Rect)>,
}

const ACCENT: Color = Color::Red;

/// Draw one frame and report the hit-test regions
pub fn draw(frame: &mut Frame<'_>, model: &RenderModel<'_>, ui: &UiState) -> Regions {
    let [title_area, main_area, search_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(SEARCH_PANEL_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    let [preview_area, list_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .areas(main_area);

    draw_title(frame, title_area, model);
    match &model.left_pane {
        LeftPane::Empty => draw_empty_preview(frame, preview_area),
        LeftPane::Detail(entry) => draw_detail(frame, preview_area, entry),
        LeftPane::Scan(pane) => draw_scan(frame, preview_area, pane),
    }
    let rows = draw_list(frame, list_area, model);
    draw_search_panel(frame, search_area, model, ui);
    draw_status(frame, status_area, model, ui);

    if let Some(alert) = model.alert {
        draw_alert(frame, alert);
    }

    Regions {
        preview: preview_area,
        search: search_area,
        rows,
    }
}

/// Search panel: one row per field plus the border
const SEARCH_PANEL_HEIGHT: u16 = 12;

fn draw_title(frame: &mut Frame<'_>, area: Rect, model: &RenderModel<'_>) {
    let mut spans = vec![Span::styled(
        " FAUNADEX ",
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD),
    )];
    if model.loading {
        spans.push(Span::styled("  fetching...", Style::default().fg(Color::Yellow)));
    }
    if let Some(banner) = model.banner {
        spans.push(Span::styled(
            format!("  {banner} (Esc to dismiss)"),
            Style::default().fg(Color::White).bg(Color::Red),
        ));
    }
    frame.render_widget(Line::from(spans), area);
}

fn draw_empty_preview(frame: &mut Frame<'_>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Preview ");
    let text = Paragraph::new("Select an entry")
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}

fn draw_detail(frame: &mut Frame<'_>, area: Rect, entry: &crate::api::Creature) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", entry.display_number()));

    let lines = vec![
        Line::from(Span::styled(
            entry.name.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            entry.scientific_name.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(entry.description.clone()),
        Line::from(""),
        field_line("Kingdom", &entry.kingdom),
        field_line("Classification", &entry.classification),
        field_line("Family", &entry.family),
        field_line("Body shape", &entry.body_shape),
        field_line("Gender ratio", &entry.gender_ratio.to_string()),
        field_line("Height", &format!("{} m", entry.height)),
        field_line("Weight", &format!("{} kg", entry.weight)),
    ];

    let text = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(text, area);
}

fn field_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:>15}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn draw_scan(frame: &mut Frame<'_>, area: Rect, pane: &ScanPane<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Scan a Creature ")
        .border_style(Style::default().fg(ACCENT));

    let mut lines = vec![Line::from("")];
    match pane.state {
        ScanState::Idle => {
            lines.push(Line::from("  u  upload an image"));
            lines.push(Line::from("  c  use the camera"));
        }
        ScanState::CameraRequesting => {
            lines.push(Line::from("  requesting camera..."));
        }
        ScanState::CameraActive => {
            lines.push(Line::from(Span::styled(
                "  [ live ]",
                Style::default().fg(Color::Green),
            )));
            lines.push(Line::from("  space  capture"));
            lines.push(Line::from("  x      cancel"));
        }
        ScanState::ImageReady => {
            lines.push(Line::from("  image ready"));
            lines.push(Line::from("  a  analyze"));
            lines.push(Line::from("  r  retake"));
        }
        ScanState::Analyzing => {
            lines.push(Line::from(Span::styled(
                "  Analyzing...",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )));
        }
        ScanState::Error => {
            if let Some(error) = pane.error {
                lines.push(Line::from(Span::styled(
                    format!("  {error}"),
                    Style::default().fg(Color::Red),
                )));
            }
            lines.push(Line::from("  d  dismiss and retry"));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  s  close scan mode",
        Style::default().fg(Color::DarkGray),
    )));

    let text = Paragraph::new(lines).block(block);
    frame.render_widget(text, area);
}

fn draw_list(frame: &mut Frame<'_>, area: Rect, model: &RenderModel<'_>) -> Vec<(i64, Rect)> {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Entries ({}) ", model.entries.len()));
    let inner = block.inner(area);

    // Keep the hovered (else selected) row visible.
    let visible = inner.height as usize;
    let anchor = model
        .hovered_id
        .or(model.selected_id)
        .and_then(|id| model.entries.iter().position(|c| c.id == id))
        .unwrap_or(0);
    let offset = anchor.saturating_sub(visible.saturating_sub(1));

    let items: Vec<ListItem<'_>> = model
        .entries
        .iter()
        .skip(offset)
        .take(visible)
        .map(|entry| {
            let mut style = Style::default();
            if model.selected_id == Some(entry.id) {
                style = style.fg(ACCENT).add_modifier(Modifier::BOLD);
            } else if model.hovered_id == Some(entry.id) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", entry.display_number()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.name.clone(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);

    model
        .entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, entry)| {
            let y = inner.y + (i - offset) as u16;
            (entry.id, Rect::new(inner.x, y, inner.width, 1))
        })
        .collect()
}

fn draw_search_panel(frame: &mut Frame<'_>, area: Rect, model: &RenderModel<'_>, ui: &UiState) {
    let searching = ui.mode == Mode::Search;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(if searching {
            " Search (Tab toggle, Enter run, Esc back) "
        } else {
            " Search (/ to edit) "
        })
        .border_style(if searching {
            Style::default().fg(ACCENT)
        } else {
            Style::default()
        });

    let lines: Vec<Line<'_>> = model
        .search_fields
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let marker = if view.active { "[x]" } else { "[ ]" };
            let value = render_value(view.value.as_ref(), view.field.kind(), ui);
            let mut style = Style::default();
            if searching && i == ui.search_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            } else if view.active {
                style = style.fg(ACCENT);
            }
            Line::from(Span::styled(
                format!(" {marker} {:<16} {value}", view.field.label()),
                style,
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_value(value: Option<&FieldValue>, kind: FieldKind, ui: &UiState) -> String {
    match (kind, value) {
        (FieldKind::Range, Some(FieldValue::Range { min, max })) => {
            format_range(min, max, ui)
        }
        (FieldKind::Range, Some(FieldValue::Scalar(s))) => format_range(s, s, ui),
        (FieldKind::Range, None) => format_range("", "", ui),
        (_, Some(FieldValue::Scalar(s))) => s.clone(),
        _ => String::new(),
    }
}

fn format_range(min: &str, max: &str, ui: &UiState) -> String {
    if ui.mode == Mode::Search {
        match ui.editing_bound {
            Bound::Min => format!("[{min}] .. {max}"),
            Bound::Max => format!("{min} .. [{max}]"),
        }
    } else {
        format!("{min} .. {max}")
    }
}

fn draw_status(frame: &mut Frame<'_>, area: Rect, model: &RenderModel<'_>, ui: &UiState) {
    let line = match ui.mode {
        Mode::PathPrompt => Line::from(vec![
            Span::styled("image path: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(ui.path_input.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        _ => {
            let hints = if model.scan_mode {
                "s close scan | q quit"
            } else {
                "s scan | / search | g refresh | q quit"
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", model.query_preview),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  "),
                Span::styled(hints, Style::default().fg(Color::DarkGray)),
            ])
        }
    };
    frame.render_widget(line, area);
}

fn draw_alert(frame: &mut Frame<'_>, alert: &str) {
    let area = frame.area();
    let width = (alert.len() as u16 + 6).min(area.width.saturating_sub(4)).max(20);
    let rect = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + area.height / 3,
        width,
        5,
    );

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Alert ")
        .border_style(Style::default().fg(Color::Red));
    let text = Paragraph::new(vec![
        Line::from(alert.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/Esc to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(text, rect);
}
