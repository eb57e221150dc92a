//! Terminal adapter for the interactive browser
//!
//! A deliberately thin layer: it renders whatever the controller
//! projects and translates terminal input into [`crate::controller::UiEvent`]s.
//! All interaction rules live in the controller; nothing here mutates
//! the state holders directly.
//!
//! The adapter owns the terminal lifecycle, including the single
//! process-wide mouse subscription used for hover and outside-click
//! detection: mouse capture is enabled on mount and disabled on
//! teardown, alongside raw mode and the alternate screen.

mod events;
mod render;

pub use events::{Mode, Outcome, UiState};

use crate::FaunadexError;
use crate::controller::Controller;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;

/// How long to wait for input before pumping network responses
const TICK: Duration = Duration::from_millis(50);

/// Run the interactive browser until the user quits
///
/// # Errors
///
/// Returns `FaunadexError` on terminal I/O failures.
pub fn run(controller: &mut Controller) -> Result<(), FaunadexError> {
    let mut terminal = setup_terminal()?;
    controller.start();

    let result = event_loop(controller, &mut terminal);

    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, FaunadexError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), FaunadexError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(
    controller: &mut Controller,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), FaunadexError> {
    let mut ui = UiState::new();

    loop {
        controller.pump();

        let model = controller.render_model();
        let mut regions = render::Regions::default();
        terminal.draw(|frame| {
            regions = render::draw(frame, &model, &ui);
        })?;

        if !event::poll(TICK)? {
            continue;
        }

        let outcome = match event::read()? {
            Event::Key(key) => {
                let model = controller.render_model();
                events::map_key(&mut ui, &model, key)
            }
            Event::Mouse(mouse) => events::map_mouse(&regions, mouse),
            _ => Outcome::Nothing,
        };

        match outcome {
            Outcome::Quit => return Ok(()),
            Outcome::Event(ui_event) => controller.handle_event(ui_event),
            Outcome::Command(command) => controller.execute(command),
            Outcome::Nothing => {}
        }
    }
}
