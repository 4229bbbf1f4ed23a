//! Response viewer
//!
//! Pure rendering of a [`ResponseData`] into display lines: the error
//! message when the error path is populated, otherwise status, the sorted
//! header map, and the body (pretty-printed JSON or the raw text verbatim).
//! Scrolling is the caller's concern.

use crate::types::ResponseData;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// One-line summary strip above the response, mirroring the status class
pub fn status_banner(response: &ResponseData) -> (String, Color) {
    if response.is_error {
        let message = response
            .error_message
            .clone()
            .unwrap_or_else(|| "Failed to send request".to_string());
        return (format!("Error: {}", message), Color::Red);
    }

    match response.status {
        200 => (
            format!("Request successful (Status: {})", response.status),
            Color::Green,
        ),
        status if (400..500).contains(&status) => {
            (format!("Client error (Status: {})", status), Color::Yellow)
        }
        status if status >= 500 => (format!("Server error (Status: {})", status), Color::Red),
        status => (format!("Response received (Status: {})", status), Color::Blue),
    }
}

/// Render a response into display lines
pub fn response_lines(response: &ResponseData) -> Vec<Line<'static>> {
    if response.is_error {
        let message = response
            .error_message
            .clone()
            .unwrap_or_else(|| "Failed to send request".to_string());
        return vec![Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(Color::Red),
        ))];
    }

    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Status: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "{} {} ({}ms)",
            response.status,
            response.status_text,
            response.duration.as_millis()
        )),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Headers:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if response.headers.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (none)",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let mut header_vec: Vec<_> = response.headers.iter().collect();
        header_vec.sort_by_key(|(key, _)| key.as_str());

        for (key, value) in header_vec {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{}: ", key), Style::default().fg(Color::Cyan)),
                Span::raw(value.clone()),
            ]));
        }
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Body:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for line in response.body.to_display_string().lines() {
        lines.push(Line::from(vec![Span::raw("  "), Span::raw(line.to_string())]));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResponseBody;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn response(status: u16, body: ResponseBody) -> ResponseData {
        ResponseData {
            status,
            status_text: "OK".to_string(),
            headers: HashMap::new(),
            body,
            duration: Duration::from_millis(42),
            is_error: false,
            error_message: None,
        }
    }

    fn flatten(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_error_renders_single_line() {
        let lines = response_lines(&ResponseData::error("URL is required".to_string()));
        assert_eq!(flatten(&lines), vec!["Error: URL is required".to_string()]);
    }

    #[test]
    fn test_raw_text_body_is_unchanged() {
        let body = ResponseBody::Text("<html>not json</html>".to_string());
        let lines = flatten(&response_lines(&response(200, body)));
        assert!(lines.contains(&"  <html>not json</html>".to_string()));
    }

    #[test]
    fn test_json_body_is_pretty_printed() {
        let body = ResponseBody::Json(json!({"b": 1, "a": 2}));
        let lines = flatten(&response_lines(&response(200, body)));
        assert!(lines.iter().any(|line| line.contains("\"a\": 2")));
    }

    #[test]
    fn test_headers_are_sorted() {
        let mut resp = response(200, ResponseBody::Text(String::new()));
        resp.headers
            .insert("x-later".to_string(), "2".to_string());
        resp.headers
            .insert("content-type".to_string(), "text/plain".to_string());

        let lines = flatten(&response_lines(&resp));
        let content_type = lines
            .iter()
            .position(|line| line.starts_with("  content-type"))
            .unwrap();
        let later = lines
            .iter()
            .position(|line| line.starts_with("  x-later"))
            .unwrap();
        assert!(content_type < later);
    }

    #[test]
    fn test_status_banner_classes() {
        let (text, color) = status_banner(&response(200, ResponseBody::Text(String::new())));
        assert_eq!(text, "Request successful (Status: 200)");
        assert_eq!(color, Color::Green);

        let (text, color) = status_banner(&response(404, ResponseBody::Text(String::new())));
        assert_eq!(text, "Client error (Status: 404)");
        assert_eq!(color, Color::Yellow);

        let (text, color) = status_banner(&response(500, ResponseBody::Text(String::new())));
        assert_eq!(text, "Server error (Status: 500)");
        assert_eq!(color, Color::Red);

        let (text, color) = status_banner(&response(301, ResponseBody::Text(String::new())));
        assert_eq!(text, "Response received (Status: 301)");
        assert_eq!(color, Color::Blue);
    }

    #[test]
    fn test_status_banner_error_path() {
        let (text, color) = status_banner(&ResponseData::error("Request failed: boom".to_string()));
        assert_eq!(text, "Error: Request failed: boom");
        assert_eq!(color, Color::Red);
    }
}
