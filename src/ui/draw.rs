use crate::navbar::{Navbar, NAV_LINKS};
use crate::state::AppState;
use crate::types::{FormFocus, Method, Screen};
use crate::viewer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_navbar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled(
            "API Explorer",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " - Your Ultimate Endpoint Playground",
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  |  "),
    ];

    for (index, link) in NAV_LINKS.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if link.screen == state.screen {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(link.label, style));
    }

    let navbar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(navbar, area);
}

/// Drop-down menu, rendered last so it sits above everything else
pub fn render_menu_overlay(frame: &mut Frame, navbar: &Navbar) {
    let area = frame.area();

    let modal_width = 24.min(area.width);
    let modal_height = (NAV_LINKS.len() as u16 + 2).min(area.height.saturating_sub(3));
    let modal_area = Rect {
        x: area.width.saturating_sub(modal_width + 1),
        y: 3.min(area.height.saturating_sub(modal_height)),
        width: modal_width,
        height: modal_height,
    };

    // Clear the background behind the menu
    frame.render_widget(Clear, modal_area);

    let items: Vec<ListItem> = NAV_LINKS
        .iter()
        .enumerate()
        .map(|(index, link)| {
            let style = if index == navbar.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(link.label, style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Menu ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, modal_area);
}

pub fn render_explorer(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let headers_height = (state.headers.len() as u16) * 3;

    let mut constraints = vec![
        Constraint::Length(3),              // method + url (+ id)
        Constraint::Length(headers_height), // header rows
    ];
    if state.method.has_body() {
        constraints.push(Constraint::Length(8)); // body editor
    }
    constraints.push(Constraint::Length(3)); // status banner
    constraints.push(Constraint::Min(0)); // response

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_request_line(frame, chunks[0], state);
    render_header_rows(frame, chunks[1], state);

    let mut next = 2;
    if state.method.has_body() {
        render_body_editor(frame, chunks[next], state);
        next += 1;
    }
    render_status_banner(frame, chunks[next], state, spinner_index);
    render_response_panel(frame, chunks[next + 1], state);
}

fn render_request_line(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut constraints = vec![Constraint::Length(10), Constraint::Min(0)];
    if state.method.takes_id() {
        constraints.push(Constraint::Length(12));
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let method = Paragraph::new(Span::styled(
        state.method.as_str(),
        Style::default()
            .fg(get_method_color(state.method))
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title("Method")
            .borders(Borders::ALL)
            .border_style(border_style(state.focus == FormFocus::Method)),
    );
    frame.render_widget(method, chunks[0]);

    render_input(
        frame,
        chunks[1],
        "URL",
        state.url.content(),
        state.focus == FormFocus::Url,
    );

    if state.method.takes_id() {
        render_input(
            frame,
            chunks[2],
            "ID",
            state.id.content(),
            state.focus == FormFocus::Id,
        );
    }
}

fn render_header_rows(frame: &mut Frame, area: Rect, state: &AppState) {
    let constraints: Vec<Constraint> = state
        .headers
        .iter()
        .map(|_| Constraint::Length(3))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (index, row) in state.headers.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[index]);

        render_input(
            frame,
            cols[0],
            "Header Key",
            row.key.content(),
            state.focus == FormFocus::HeaderKey(index),
        );
        render_input(
            frame,
            cols[1],
            "Header Value",
            row.value.content(),
            state.focus == FormFocus::HeaderValue(index),
        );
    }
}

fn render_body_editor(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title("Request Body (JSON)")
        .borders(Borders::ALL)
        .border_style(border_style(state.focus == FormFocus::Body));

    if state.body.is_empty() {
        let mut lines = vec![Line::from(Span::styled(
            r#"{"example": "data"}"#,
            Style::default().fg(Color::DarkGray),
        ))];
        if state.method == Method::Patch {
            lines.push(Line::from(Span::styled(
                "PATCH updates a resource partially. Include only the fields to modify.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    } else {
        let body = Paragraph::new(state.body.content().to_string())
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(body, area);
    }
}

fn render_status_banner(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

    let (text, color) = if state.is_loading {
        (
            format!("{} Sending...", SPINNER[spinner_index % SPINNER.len()]),
            Color::Yellow,
        )
    } else if let Some(response) = &state.current_response {
        viewer::status_banner(response)
    } else {
        (
            "Fill the form and press Ctrl+S to send".to_string(),
            Color::DarkGray,
        )
    };

    let banner = Paragraph::new(Span::styled(text, Style::default().fg(color)))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, area);
}

fn render_response_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Response").borders(Borders::ALL);

    match &state.current_response {
        Some(response) => {
            let content = Paragraph::new(viewer::response_lines(response))
                .wrap(Wrap { trim: false })
                .scroll((state.response_scroll as u16, 0))
                .block(block);
            frame.render_widget(content, area);
        }
        None => {
            let hint = if state.is_loading {
                "⏳ Executing request..."
            } else {
                "No response yet"
            };
            let empty = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
                .block(block);
            frame.render_widget(empty, area);
        }
    }
}

pub fn render_docs(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Sending a request",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Pick a method with Left/Right on the Method field, type a URL,"),
        Line::from("  add headers as needed, and press Ctrl+S. The response status,"),
        Line::from("  headers and body appear in the panel below the form."),
        Line::from(""),
        Line::from("  POST, PUT and PATCH require a JSON body. PUT and PATCH also"),
        Line::from("  require a numeric ID; it is appended to the URL when missing."),
        Line::from(""),
        Line::from("  A successful POST probes the collection for the highest id and"),
        Line::from("  assigns the next one, then switches the form to PUT so the"),
        Line::from("  created record can be edited right away."),
        Line::from(""),
        Line::from(Span::styled(
            "Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Tab / Shift+Tab   move between fields"),
        Line::from("  Ctrl+S            send the request"),
        Line::from("  Ctrl+L            clear the form"),
        Line::from("  Ctrl+N / Ctrl+X   add / remove a header row"),
        Line::from("  Ctrl+F            pretty-print the body"),
        Line::from("  Ctrl+Y            copy the response body"),
        Line::from("  Ctrl+D / Ctrl+U   scroll the response"),
    ];

    let docs = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Docs").borders(Borders::ALL));
    frame.render_widget(docs, area);
}

pub fn render_about(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            concat!("api-explorer-tui ", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("A fast terminal UI for ad-hoc HTTP API exploration."),
        Line::from(""),
        Line::from("Fire a single request with the method, URL, headers and body of"),
        Line::from("your choice and inspect the raw response. Nothing is persisted"),
        Line::from("beyond an optional default URL."),
    ];

    let about = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("About").borders(Borders::ALL));
    frame.render_widget(about, area);
}

pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer_text = if state.navbar.menu_open {
        "j/k:Navigate Enter:Open Esc:Close"
    } else {
        match state.screen {
            Screen::Explorer => {
                "Tab:Field Ctrl+S:Send Ctrl+L:Clear Ctrl+N:+Header Ctrl+X:-Header Ctrl+F:Format Ctrl+Y:Yank Ctrl+D/U:Scroll F2:Menu Ctrl+C:Quit"
            }
            Screen::Docs | Screen::About => "Esc:Back F2:Menu q:Quit",
        }
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));
    frame.render_widget(footer, area);
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, content: &str, focused: bool) {
    let input = Paragraph::new(content.to_string()).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style(focused)),
    );
    frame.render_widget(input, area);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    }
}

fn get_method_color(method: Method) -> Color {
    match method {
        Method::Get => Color::Green,
        Method::Post => Color::Blue,
        Method::Put => Color::Yellow,
        Method::Delete => Color::Red,
        Method::Patch => Color::Cyan,
    }
}
