use crate::config::Config;
use crate::state::AppState;
use crate::types::Screen;
use crate::ui;
use crate::ui::draw;
use color_eyre::Result;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
    config: Config,
}

impl Default for App {
    fn default() -> Self {
        let config = Config::load().unwrap_or_default();

        let mut state = AppState::default();
        if let Some(url) = &config.general.default_url {
            state.url.set_content(url.clone());
        }

        Self {
            state: Arc::new(RwLock::new(state)),
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
            config,
        }
    }
}

impl App {
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            // A dispatched URL becomes the next startup default
            if let Some(url) = self.event_handler.handle_events(&self.state)? {
                if self.config.general.default_url.as_deref() != Some(url.as_str()) {
                    self.config.set_default_url(url)?;
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let state = self.state.read().unwrap();

        // Create main layout: Navbar, Body, Footer
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        draw::render_navbar(frame, chunks[0], &state);

        match state.screen {
            Screen::Explorer => {
                draw::render_explorer(frame, chunks[1], &state, self.spinner_index)
            }
            Screen::Docs => draw::render_docs(frame, chunks[1]),
            Screen::About => draw::render_about(frame, chunks[1]),
        }

        draw::render_footer(frame, chunks[2], &state);

        // Menu drop-down renders last, above everything else
        if state.navbar.menu_open {
            draw::render_menu_overlay(frame, &state.navbar);
        }
    }
}
