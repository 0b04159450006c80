//! Terminal User Interface using ratatui

mod keymap;
pub mod screens;
mod sprite_view;
pub mod theme;
mod ui;

pub use keymap::action_for_key;

use crate::app::App;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// TUI application wrapper
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Tui {
    /// Create a new TUI instance
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Set up the terminal
    fn setup(&mut self) -> Result<()> {
        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        Ok(())
    }

    /// Restore the terminal
    fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI main loop
    pub async fn run(&mut self, app: &mut App) -> Result<()> {
        restore_on_error(self.setup(), || self.restore())?;

        let result = self.event_loop(app).await;

        self.restore()?;
        result
    }

    /// Main event loop
    ///
    /// Each action is awaited to completion before the next event is read.
    async fn event_loop(&mut self, app: &mut App) -> Result<()> {
        loop {
            // Draw UI
            self.terminal.draw(|f| ui::draw(f, app))?;

            // Check for quit
            if app.state.should_quit {
                break;
            }

            // Poll for events
            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = action_for_key(&app.state, key) {
                            app.dispatch(action).await;
                        }
                    }
                    _ => {}
                }
            }
        }

        tracing::info!("Leaving TUI");
        Ok(())
    }
}

/// Run `restore` when `result` is an error, keeping the original error.
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    if result.is_err() {
        if let Err(e) = restore() {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
    result
}
