use crate::request::{plan_request, send_request_background};
use crate::state::AppState;
use crate::types::{FormFocus, ResponseData, Screen};
use crate::utils::log_debug;

use arboard::Clipboard;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

#[derive(Debug)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self { should_quit: false }
    }

    /// Poll and dispatch one input event.
    /// Returns the dispatched URL when a request went out, so the caller
    /// can persist it as the startup default.
    pub fn handle_events(&mut self, state: &Arc<RwLock<AppState>>) -> Result<Option<String>> {
        if !event::poll(std::time::Duration::from_millis(50))? {
            return Ok(None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };

        // Ctrl+C quits from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(None);
        }

        let (screen, menu_open) = {
            let s = state.read().unwrap();
            (s.screen, s.navbar.menu_open)
        };

        if menu_open {
            self.handle_menu_key(key, state);
            return Ok(None);
        }

        match screen {
            Screen::Explorer => self.handle_explorer_key(key, state),
            Screen::Docs | Screen::About => {
                self.handle_static_screen_key(key, state);
                Ok(None)
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent, state: &Arc<RwLock<AppState>>) {
        let mut s = state.write().unwrap();
        match key.code {
            KeyCode::Esc | KeyCode::F(2) => s.navbar.close_menu(),
            KeyCode::Up | KeyCode::Char('k') => s.navbar.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => s.navbar.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                s.screen = s.navbar.activate();
                log_debug(&format!("Switched to {:?} screen", s.screen));
            }
            _ => {}
        }
    }

    fn handle_static_screen_key(&mut self, key: KeyEvent, state: &Arc<RwLock<AppState>>) {
        let mut s = state.write().unwrap();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::F(2) => s.navbar.toggle_menu(),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => s.screen = Screen::Explorer,
            _ => {}
        }
    }

    fn handle_explorer_key(
        &mut self,
        key: KeyEvent,
        state: &Arc<RwLock<AppState>>,
    ) -> Result<Option<String>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Send paths first: they manage their own locking around the
        // spawned task
        if (ctrl && key.code == KeyCode::Char('s')) || key.code == KeyCode::F(5) {
            return self.handle_send(state);
        }
        if key.code == KeyCode::Enter {
            let body_focused = state.read().unwrap().focus == FormFocus::Body;
            if !body_focused {
                return self.handle_send(state);
            }
        }

        let mut s = state.write().unwrap();

        if s.is_loading {
            // Only passive keys while a request is outstanding
            match key.code {
                KeyCode::F(2) => s.navbar.toggle_menu(),
                KeyCode::Char('d') if ctrl => {
                    s.response_scroll = s.response_scroll.saturating_add(5);
                }
                KeyCode::Char('u') if ctrl => {
                    s.response_scroll = s.response_scroll.saturating_sub(5);
                }
                _ => log_debug("Ignoring input while request is in flight"),
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::F(2) => s.navbar.toggle_menu(),
            KeyCode::Tab => s.focus_next(),
            KeyCode::BackTab => s.focus_prev(),
            KeyCode::Up => s.focus_prev(),
            KeyCode::Down => s.focus_next(),
            KeyCode::Char('l') if ctrl => {
                s.clear_form();
                log_debug("Form cleared");
            }
            KeyCode::Char('n') if ctrl => s.add_header_row(),
            KeyCode::Char('x') if ctrl => {
                s.remove_focused_header_row();
            }
            KeyCode::Char('d') if ctrl => {
                s.response_scroll = s.response_scroll.saturating_add(5);
            }
            KeyCode::Char('u') if ctrl => {
                s.response_scroll = s.response_scroll.saturating_sub(5);
            }
            KeyCode::Char('y') if ctrl => {
                let response = s.current_response.clone();
                drop(s);
                yank_response(response);
            }
            KeyCode::Char('f') if ctrl => {
                if s.focus == FormFocus::Body {
                    if let Err(e) = s.body.format_json() {
                        log_debug(&format!("Cannot format body: {}", e));
                    }
                }
            }
            // Only reached with the body focused; elsewhere Enter sends
            KeyCode::Enter => s.body.insert_char('\n'),
            _ => dispatch_to_focused(&mut s, key),
        }

        Ok(None)
    }

    /// Snapshot the form, validate, and dispatch.
    /// Validation failures become the current response without any
    /// network activity.
    fn handle_send(&self, state: &Arc<RwLock<AppState>>) -> Result<Option<String>> {
        let snapshot = {
            let s = state.read().unwrap();
            if s.is_loading {
                log_debug("Request already in flight, ignoring send");
                return Ok(None);
            }
            s.snapshot()
        };

        match plan_request(&snapshot) {
            Ok(plan) => {
                let url = plan.url.clone();
                log_debug(&format!("Dispatching {} {}", plan.method.as_str(), plan.url));
                send_request_background(Arc::clone(state), plan);
                Ok(Some(url))
            }
            Err(message) => {
                log_debug(&format!("Validation failed: {}", message));
                let mut s = state.write().unwrap();
                s.current_response = Some(ResponseData::error(message));
                Ok(None)
            }
        }
    }
}

/// Route a key to the focused field: the method selector cycles,
/// text fields edit
fn dispatch_to_focused(s: &mut AppState, key: KeyEvent) {
    if s.focus == FormFocus::Method {
        match key.code {
            KeyCode::Left => {
                s.method = s.method.prev();
                s.ensure_focus_visible();
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                s.method = s.method.next();
                s.ensure_focus_visible();
            }
            _ => {}
        }
        return;
    }

    let Some(editor) = s.focused_editor_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            editor.handle_paste_batch(c);
        }
        _ => {
            editor.handle_key_event(key);
        }
    }
}

/// Copy the formatted response body to the system clipboard
fn yank_response(response: Option<ResponseData>) {
    let Some(response) = response else {
        log_debug("No response to yank");
        return;
    };
    if response.is_error {
        log_debug("Cannot yank from error response");
        return;
    }

    let text = response.body.to_display_string();
    match Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text) {
            Ok(()) => log_debug("Response body copied to clipboard"),
            Err(e) => log_debug(&format!("Clipboard write failed: {}", e)),
        },
        Err(e) => log_debug(&format!("Clipboard unavailable: {}", e)),
    }
}
