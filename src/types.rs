use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP methods selectable in the request form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Check if this method carries a request body (POST/PUT/PATCH)
    pub fn has_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    /// Check if this method uses the numeric id field (PUT/PATCH)
    pub fn takes_id(&self) -> bool {
        matches!(self, Method::Put | Method::Patch)
    }

    /// Cycle to the next method in the selector
    pub fn next(&self) -> Method {
        let index = Method::ALL.iter().position(|m| m == self).unwrap_or(0);
        Method::ALL[(index + 1) % Method::ALL.len()]
    }

    /// Cycle to the previous method in the selector
    pub fn prev(&self) -> Method {
        let index = Method::ALL.iter().position(|m| m == self).unwrap_or(0);
        Method::ALL[(index + Method::ALL.len() - 1) % Method::ALL.len()]
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One header row as the user typed it.
/// Pairs with an empty key or value are dropped at send time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderPair {
    pub key: String,
    pub value: String,
}

/// Response body: parsed JSON when the payload is valid JSON,
/// otherwise the raw text untouched
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Attempt a JSON parse, keeping the raw text on failure
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(json) => ResponseBody::Json(json),
            Err(_) => ResponseBody::Text(text.to_string()),
        }
    }

    /// Pretty-printed JSON, or the raw text unchanged
    pub fn to_display_string(&self) -> String {
        match self {
            ResponseBody::Json(json) => {
                serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string())
            }
            ResponseBody::Text(text) => text.clone(),
        }
    }
}

/// Result of one outbound request
#[derive(Debug, Clone)]
pub struct ResponseData {
    /// HTTP status code (200, 404, etc.)
    pub status: u16,

    /// Human-readable status text ("OK", "Not Found", etc.)
    pub status_text: String,

    /// Response headers as key-value pairs (keys normalized to lowercase)
    pub headers: HashMap<String, String>,

    /// Response body, JSON-parsed when possible
    pub body: ResponseBody,

    /// Time taken to complete the request
    pub duration: Duration,

    /// True for validation and network-level failures.
    /// False when an HTTP response came back (even 4xx/5xx).
    pub is_error: bool,

    /// Error message, only set when is_error = true
    pub error_message: Option<String>,
}

impl ResponseData {
    /// Creates an error response with the given error message
    pub fn error(error_message: String) -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            headers: HashMap::new(),
            body: ResponseBody::Text(String::new()),
            duration: Duration::from_secs(0),
            is_error: true,
            error_message: Some(error_message),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.is_error && (200..300).contains(&self.status)
    }
}

/// The screens reachable from the navbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Explorer,
    Docs,
    About,
}

/// Which form field currently receives input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Method,
    Url,
    Id,
    HeaderKey(usize),
    HeaderValue(usize),
    Body,
}
