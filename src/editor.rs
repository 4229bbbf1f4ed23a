//! Field editor module
//!
//! A cursor-addressable text buffer backing every editable form field
//! (URL, id, header keys/values, request body). Handles UTF-8 boundaries,
//! terminal paste batching, and JSON prettification for the body field.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

/// A text editor for a single form field
#[derive(Debug, Clone, Default)]
pub struct FieldEditor {
    /// The content being edited
    content: String,

    /// Cursor position (byte offset in content)
    cursor: usize,
}

impl FieldEditor {
    /// Create a new empty editor
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new editor with initial content, cursor at the end
    pub fn with_content(content: String) -> Self {
        let cursor = content.len();
        Self { content, cursor }
    }

    /// Get the current content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Clear all content and reset the cursor
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Replace all content, cursor moves to the end
    pub fn set_content(&mut self, content: String) {
        self.cursor = content.len();
        self.content = content;
    }

    /// Insert a character at the current cursor position
    pub fn insert_char(&mut self, c: char) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
    }

    /// Insert a string at the current cursor position
    pub fn insert_str(&mut self, s: &str) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, s);
        self.cursor = cursor + s.len();
    }

    /// Insert a string with smart quote normalization (useful for JSON)
    /// Converts curly quotes to straight quotes for JSON compatibility
    pub fn insert_str_normalized(&mut self, s: &str) {
        let normalized = s
            .replace('\u{201C}', "\"") // Left double quote
            .replace('\u{201D}', "\"") // Right double quote
            .replace('\u{2018}', "'") // Left single quote
            .replace('\u{2019}', "'"); // Right single quote

        self.insert_str(&normalized);
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_char_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        // Find the previous character boundary
        let mut cursor = self.cursor;
        while cursor > 0 && !self.content.is_char_boundary(cursor - 1) {
            cursor -= 1;
        }
        if cursor > 0 {
            cursor -= 1;
        }

        self.content.remove(cursor);
        self.cursor = cursor;
        true
    }

    /// Delete the character after the cursor (delete key)
    pub fn delete_char_after_cursor(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }

        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.remove(cursor);
        true
    }

    /// Move cursor to the left by one character
    pub fn move_cursor_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        let mut new_cursor = self.cursor - 1;
        while new_cursor > 0 && !self.content.is_char_boundary(new_cursor) {
            new_cursor -= 1;
        }

        self.cursor = new_cursor;
        true
    }

    /// Move cursor to the right by one character
    pub fn move_cursor_right(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }

        let mut new_cursor = self.cursor + 1;
        while new_cursor < self.content.len() && !self.content.is_char_boundary(new_cursor) {
            new_cursor += 1;
        }

        self.cursor = new_cursor.min(self.content.len());
        true
    }

    /// Move cursor to start of content
    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end of content
    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Format content as JSON (prettify)
    /// Returns Ok(()) if formatting succeeded, Err with the parse error if invalid JSON
    pub fn format_json(&mut self) -> Result<(), String> {
        match serde_json::from_str::<Value>(&self.content) {
            Ok(json) => {
                self.content =
                    serde_json::to_string_pretty(&json).unwrap_or_else(|_| self.content.clone());
                self.cursor = self.content.len();
                Ok(())
            }
            Err(e) => Err(format!("Invalid JSON: {e}")),
        }
    }

    /// Handle a key event - returns true if the event was handled
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::End => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }

    /// Handle paste batching - collects multiple character events in quick succession
    ///
    /// Terminal paste delivers characters as rapid individual key events; draining
    /// them here keeps pastes atomic. Smart quotes are normalized on the way in.
    /// Returns the number of characters inserted.
    pub fn handle_paste_batch(&mut self, initial_char: char) -> usize {
        let mut chars = vec![initial_char];

        // Drain any immediately available character events
        loop {
            match crossterm::event::poll(std::time::Duration::from_millis(0)) {
                Ok(true) => {
                    if let Ok(Event::Key(next_key)) = crossterm::event::read() {
                        match next_key.code {
                            KeyCode::Char(next_c)
                                if !next_key.modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                chars.push(next_c);
                            }
                            _ => {
                                // Non-character or control key, stop batching
                                break;
                            }
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }

        let count = chars.len();
        let batch_str: String = chars.into_iter().collect();

        self.insert_str_normalized(&batch_str);
        count
    }

    /// Clamp cursor to valid UTF-8 character boundary
    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}
