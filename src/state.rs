use crate::editor::FieldEditor;
use crate::navbar::Navbar;
use crate::request::FormSnapshot;
use crate::types::{FormFocus, HeaderPair, Method, ResponseData, Screen};

/// One editable header row (key and value are independent editors)
#[derive(Debug, Clone, Default)]
pub struct HeaderRow {
    pub key: FieldEditor,
    pub value: FieldEditor,
}

impl HeaderRow {
    pub fn pair(&self) -> HeaderPair {
        HeaderPair {
            key: self.key.content().to_string(),
            value: self.value.content().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub navbar: Navbar,

    pub method: Method,
    pub url: FieldEditor,
    /// Record id, used only for PUT/PATCH URL and payload construction
    pub id: FieldEditor,
    pub body: FieldEditor,
    pub headers: Vec<HeaderRow>,

    pub focus: FormFocus,

    /// Advisory flag gating the send key while a request is outstanding
    pub is_loading: bool,

    /// Result of the last send, error or response
    pub current_response: Option<ResponseData>,

    /// Scroll offset for the response panel (lines)
    pub response_scroll: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Explorer,
            navbar: Navbar::default(),
            method: Method::Get,
            url: FieldEditor::new(),
            id: FieldEditor::new(),
            body: FieldEditor::new(),
            headers: vec![HeaderRow::default()],
            focus: FormFocus::Url,
            is_loading: false,
            current_response: None,
            response_scroll: 0,
        }
    }
}

impl AppState {
    /// Reset the form to its initial values and discard the response
    pub fn clear_form(&mut self) {
        self.method = Method::Get;
        self.url.clear();
        self.id.clear();
        self.body.clear();
        self.headers = vec![HeaderRow::default()];
        self.focus = FormFocus::Url;
        self.current_response = None;
        self.response_scroll = 0;
    }

    /// Capture the form contents for request planning
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            method: self.method,
            url: self.url.content().to_string(),
            id: self.id.content().to_string(),
            body: self.body.content().to_string(),
            headers: self.headers.iter().map(HeaderRow::pair).collect(),
        }
    }

    /// Fields reachable by focus cycling, in tab order.
    /// The id field only exists for PUT/PATCH, the body only for
    /// body-carrying methods — mirroring which inputs the form shows.
    pub fn visible_fields(&self) -> Vec<FormFocus> {
        let mut fields = vec![FormFocus::Method, FormFocus::Url];
        if self.method.takes_id() {
            fields.push(FormFocus::Id);
        }
        for index in 0..self.headers.len() {
            fields.push(FormFocus::HeaderKey(index));
            fields.push(FormFocus::HeaderValue(index));
        }
        if self.method.has_body() {
            fields.push(FormFocus::Body);
        }
        fields
    }

    pub fn focus_next(&mut self) {
        let fields = self.visible_fields();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = self.visible_fields();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + fields.len() - 1) % fields.len()];
    }

    /// Snap focus back to the URL field when the focused input no longer
    /// exists (method switched away from PUT/PATCH, header row removed)
    pub fn ensure_focus_visible(&mut self) {
        if !self.visible_fields().contains(&self.focus) {
            self.focus = FormFocus::Url;
        }
    }

    /// The editor behind the focused field, if it is a text field
    pub fn focused_editor_mut(&mut self) -> Option<&mut FieldEditor> {
        match self.focus {
            FormFocus::Method => None,
            FormFocus::Url => Some(&mut self.url),
            FormFocus::Id => Some(&mut self.id),
            FormFocus::Body => Some(&mut self.body),
            FormFocus::HeaderKey(index) => self.headers.get_mut(index).map(|row| &mut row.key),
            FormFocus::HeaderValue(index) => {
                self.headers.get_mut(index).map(|row| &mut row.value)
            }
        }
    }

    /// Append an empty header row and focus its key field
    pub fn add_header_row(&mut self) {
        self.headers.push(HeaderRow::default());
        self.focus = FormFocus::HeaderKey(self.headers.len() - 1);
    }

    /// Remove the focused header row; the last remaining row is cleared
    /// instead so the form always shows at least one pair
    pub fn remove_focused_header_row(&mut self) {
        let index = match self.focus {
            FormFocus::HeaderKey(index) | FormFocus::HeaderValue(index) => index,
            _ => return,
        };
        if index >= self.headers.len() {
            return;
        }

        if self.headers.len() == 1 {
            self.headers[0] = HeaderRow::default();
        } else {
            self.headers.remove(index);
        }
        self.focus = FormFocus::HeaderKey(index.min(self.headers.len() - 1));
    }
}
