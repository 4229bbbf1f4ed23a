use serde_json::Value;
use url::Url;

use crate::state::AppState;
use crate::types::{HeaderPair, Method, ResponseBody, ResponseData};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Form contents captured at the moment the user hits send
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    pub method: Method,
    pub url: String,
    pub id: String,
    pub body: String,
    pub headers: Vec<HeaderPair>,
}

/// Body to ship with the outbound request
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedBody {
    /// POST payload: the id is assigned after probing the collection
    AutoId(Value),
    /// PUT/PATCH payload: already serialized with its id set
    Ready(String),
}

/// A fully validated outbound request, ready to dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPlan {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<PlannedBody>,
}

/// Build the outbound header set from the editable rows.
/// Pairs with an empty key or value are dropped, the rest are trimmed;
/// insertion order is preserved.
pub fn collect_headers(pairs: &[HeaderPair]) -> Vec<(String, String)> {
    pairs
        .iter()
        .filter_map(|pair| {
            let key = pair.key.trim();
            let value = pair.value.trim();
            if key.is_empty() || value.is_empty() {
                None
            } else {
                Some((key.to_string(), value.to_string()))
            }
        })
        .collect()
}

/// Validate the form and shape the outbound request.
/// Returns a user-facing error string on the first failed check;
/// nothing touches the network until a plan comes back Ok.
pub fn plan_request(form: &FormSnapshot) -> Result<RequestPlan, String> {
    let url = form.url.trim();
    if url.is_empty() {
        return Err("URL is required".to_string());
    }
    if Url::parse(url).is_err() {
        return Err("Invalid URL format".to_string());
    }

    let mut headers = collect_headers(&form.headers);
    let mut request_url = url.to_string();

    let body = if !form.method.has_body() {
        None
    } else {
        let text = form.body.trim();
        if text.is_empty() {
            return Err(format!(
                "Body is required for {} requests",
                form.method.as_str()
            ));
        }

        let parsed: Value =
            serde_json::from_str(text).map_err(|_| "Invalid JSON body".to_string())?;

        if form.method == Method::Post {
            Some(PlannedBody::AutoId(parsed))
        } else {
            // PUT / PATCH
            let id_text = form.id.trim();
            if id_text.is_empty() {
                return Err("ID is required for PUT/PATCH requests".to_string());
            }
            let id: i64 = id_text
                .parse()
                .map_err(|_| "ID must be a valid number".to_string())?;

            let mut record = parsed;
            if let Value::Object(fields) = &mut record {
                fields.insert("id".to_string(), Value::from(id));
            }

            request_url = append_id_to_url(url, id);
            Some(PlannedBody::Ready(record.to_string()))
        }
    };

    if body.is_some() && !has_content_type(&headers) {
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
    }

    Ok(RequestPlan {
        method: form.method,
        url: request_url,
        headers,
        body,
    })
}

fn has_content_type(headers: &[(String, String)]) -> bool {
    headers
        .iter()
        .any(|(key, _)| key.eq_ignore_ascii_case("content-type"))
}

/// Append `/{id}` to the URL unless it already ends with it
pub fn append_id_to_url(url: &str, id: i64) -> String {
    let suffix = format!("/{}", id);
    if url.ends_with(&suffix) {
        return url.to_string();
    }
    format!("{}{}", url.trim_end_matches('/'), suffix)
}

/// Next id for a collection-style endpoint: max(numeric ids, 0) + 1.
/// Non-arrays and records without a numeric id count as 0.
pub fn next_record_id(collection: &Value) -> i64 {
    let last = collection
        .as_array()
        .map(|records| {
            records
                .iter()
                .map(|record| record.get("id").and_then(Value::as_i64).unwrap_or(0))
                .fold(0, i64::max)
        })
        .unwrap_or(0);
    last + 1
}

/// Id extracted from a created record, as the form's id field shows it.
/// Absent, null, zero and empty-string ids do not count.
pub fn record_id_text(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// After a successful POST whose response carries an id, switch the form
/// into PUT mode pre-populated with that id and the returned record,
/// so the user can immediately edit the just-created resource.
pub fn apply_post_followup(state: &mut AppState, response: &ResponseData) {
    let ResponseBody::Json(record) = &response.body else {
        return;
    };
    let Some(new_id) = record_id_text(record) else {
        return;
    };

    state.method = Method::Put;
    state.id.set_content(new_id);
    let pretty =
        serde_json::to_string_pretty(record).unwrap_or_else(|_| record.to_string());
    state.body.set_content(pretty);
}

/// Dispatch a planned request on a background task.
/// The loading flag gates re-entry from the UI until the result lands.
pub fn send_request_background(state: Arc<RwLock<AppState>>, plan: RequestPlan) {
    {
        let mut s = state.write().unwrap();
        s.is_loading = true;
        s.current_response = None;
    }

    tokio::spawn(async move {
        let response = execute_plan(&plan).await;

        let mut s = state.write().unwrap();
        if plan.method == Method::Post && response.is_success() {
            apply_post_followup(&mut s, &response);
        }
        s.current_response = Some(response);
        s.response_scroll = 0;
        s.is_loading = false;
    });
}

async fn execute_plan(plan: &RequestPlan) -> ResponseData {
    let client = reqwest::Client::new();

    let body_text = match &plan.body {
        None => None,
        Some(PlannedBody::Ready(text)) => Some(text.clone()),
        Some(PlannedBody::AutoId(template)) => {
            // Best-effort probe of the collection for the next id;
            // any failure falls back to id 1
            let next_id = probe_collection(&client, &plan.url)
                .await
                .map(|collection| next_record_id(&collection))
                .unwrap_or(1);

            let mut record = template.clone();
            if let Value::Object(fields) = &mut record {
                fields.insert("id".to_string(), Value::from(next_id));
            }
            Some(record.to_string())
        }
    };

    let mut builder = client.request(plan.method.to_reqwest(), &plan.url);
    for (key, value) in &plan.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    if let Some(text) = body_text {
        builder = builder.body(text);
    }

    let start = std::time::Instant::now();

    match builder.send().await {
        Ok(response) => {
            let duration = start.elapsed();

            let status = response.status().as_u16();
            let status_text = response
                .status()
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string();

            // Flatten headers (normalize keys to lowercase for consistency)
            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(key, value)| {
                    (
                        key.as_str().to_lowercase(),
                        value.to_str().unwrap_or("").to_string(),
                    )
                })
                .collect();

            match response.text().await {
                Ok(text) => ResponseData {
                    status,
                    status_text,
                    headers,
                    body: ResponseBody::from_text(&text),
                    duration,
                    is_error: false,
                    error_message: None,
                },
                Err(e) => ResponseData::error(format!("Failed to read response body: {}", e)),
            }
        }
        Err(e) => ResponseData::error(format!("Request failed: {}", e)),
    }
}

async fn probe_collection(client: &reqwest::Client, url: &str) -> Option<Value> {
    let response = client.get(url).send().await.ok()?;
    response.json::<Value>().await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn pair(key: &str, value: &str) -> HeaderPair {
        HeaderPair {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    fn form(method: Method, url: &str) -> FormSnapshot {
        FormSnapshot {
            method,
            url: url.to_string(),
            id: String::new(),
            body: String::new(),
            headers: vec![HeaderPair::default()],
        }
    }

    #[test]
    fn test_collect_headers_drops_incomplete_pairs() {
        let pairs = vec![
            pair("Accept", "application/json"),
            pair("", "orphan-value"),
            pair("orphan-key", ""),
            pair("   ", "whitespace-key"),
            pair("X-Token", "   "),
            pair("Authorization", "Bearer abc"),
        ];

        let headers = collect_headers(&pairs);
        assert_eq!(
            headers,
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), "Bearer abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_collect_headers_trims_and_keeps_order() {
        let pairs = vec![pair("  B  ", "  2  "), pair("A", "1")];
        let headers = collect_headers(&pairs);
        assert_eq!(
            headers,
            vec![
                ("B".to_string(), "2".to_string()),
                ("A".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_plan_empty_url() {
        let snapshot = form(Method::Get, "   ");
        assert_eq!(
            plan_request(&snapshot).unwrap_err(),
            "URL is required".to_string()
        );
    }

    #[test]
    fn test_plan_malformed_url() {
        let snapshot = form(Method::Get, "not a url");
        assert_eq!(
            plan_request(&snapshot).unwrap_err(),
            "Invalid URL format".to_string()
        );
    }

    #[test]
    fn test_plan_get_has_no_body() {
        let snapshot = form(Method::Get, "https://api.example.com/items");
        let plan = plan_request(&snapshot).unwrap();
        assert_eq!(plan.method, Method::Get);
        assert_eq!(plan.url, "https://api.example.com/items");
        assert!(plan.body.is_none());
        assert!(plan.headers.is_empty());
    }

    #[test]
    fn test_plan_post_requires_body() {
        let snapshot = form(Method::Post, "https://api.example.com/items");
        assert_eq!(
            plan_request(&snapshot).unwrap_err(),
            "Body is required for POST requests".to_string()
        );
    }

    #[test]
    fn test_plan_rejects_invalid_json_body() {
        let mut snapshot = form(Method::Post, "https://api.example.com/items");
        snapshot.body = "{not json".to_string();
        assert_eq!(
            plan_request(&snapshot).unwrap_err(),
            "Invalid JSON body".to_string()
        );
    }

    #[test]
    fn test_plan_put_requires_id() {
        let mut snapshot = form(Method::Put, "https://api.example.com/items");
        snapshot.body = r#"{"name":"x"}"#.to_string();
        assert_eq!(
            plan_request(&snapshot).unwrap_err(),
            "ID is required for PUT/PATCH requests".to_string()
        );
    }

    #[test]
    fn test_plan_put_rejects_non_numeric_id() {
        let mut snapshot = form(Method::Put, "https://api.example.com/items");
        snapshot.body = r#"{"name":"x"}"#.to_string();
        snapshot.id = "abc".to_string();
        assert_eq!(
            plan_request(&snapshot).unwrap_err(),
            "ID must be a valid number".to_string()
        );
    }

    #[test]
    fn test_plan_put_appends_id_to_url() {
        let mut snapshot = form(Method::Put, "https://x/items");
        snapshot.body = r#"{"name":"x"}"#.to_string();
        snapshot.id = "5".to_string();
        let plan = plan_request(&snapshot).unwrap();
        assert_eq!(plan.url, "https://x/items/5");
    }

    #[test]
    fn test_plan_put_does_not_double_append_id() {
        let mut snapshot = form(Method::Put, "https://x/items/5");
        snapshot.body = r#"{"name":"x"}"#.to_string();
        snapshot.id = "5".to_string();
        let plan = plan_request(&snapshot).unwrap();
        assert_eq!(plan.url, "https://x/items/5");
    }

    #[test]
    fn test_plan_put_sets_id_in_payload() {
        let mut snapshot = form(Method::Patch, "https://x/items");
        snapshot.body = r#"{"name":"x","id":99}"#.to_string();
        snapshot.id = "7".to_string();
        let plan = plan_request(&snapshot).unwrap();
        match plan.body {
            Some(PlannedBody::Ready(text)) => {
                let value: Value = serde_json::from_str(&text).unwrap();
                assert_eq!(value, json!({"name": "x", "id": 7}));
            }
            other => panic!("expected ready body, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_post_defers_id_assignment() {
        let mut snapshot = form(Method::Post, "https://x/items");
        snapshot.body = r#"{"name":"x"}"#.to_string();
        let plan = plan_request(&snapshot).unwrap();
        assert_eq!(plan.body, Some(PlannedBody::AutoId(json!({"name": "x"}))));
    }

    #[test]
    fn test_plan_defaults_content_type_for_body() {
        let mut snapshot = form(Method::Post, "https://x/items");
        snapshot.body = r#"{"name":"x"}"#.to_string();
        let plan = plan_request(&snapshot).unwrap();
        assert_eq!(
            plan.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn test_plan_keeps_user_content_type() {
        let mut snapshot = form(Method::Post, "https://x/items");
        snapshot.body = r#"{"name":"x"}"#.to_string();
        snapshot.headers = vec![pair("content-type", "application/vnd.api+json")];
        let plan = plan_request(&snapshot).unwrap();
        assert_eq!(
            plan.headers,
            vec![(
                "content-type".to_string(),
                "application/vnd.api+json".to_string()
            )]
        );
    }

    #[test]
    fn test_plan_no_content_type_without_body() {
        let snapshot = form(Method::Delete, "https://x/items/3");
        let plan = plan_request(&snapshot).unwrap();
        assert!(plan.headers.is_empty());
    }

    #[test]
    fn test_append_id_handles_trailing_slash() {
        assert_eq!(append_id_to_url("https://x/items/", 5), "https://x/items/5");
        assert_eq!(append_id_to_url("https://x/items", 5), "https://x/items/5");
        assert_eq!(append_id_to_url("https://x/items/5", 5), "https://x/items/5");
    }

    #[test]
    fn test_next_record_id_over_collection() {
        let collection = json!([{"id": 3}, {"id": 7}, {"id": 5}]);
        assert_eq!(next_record_id(&collection), 8);
    }

    #[test]
    fn test_next_record_id_empty_collection() {
        assert_eq!(next_record_id(&json!([])), 1);
    }

    #[test]
    fn test_next_record_id_non_array() {
        assert_eq!(next_record_id(&json!({"id": 9})), 1);
        assert_eq!(next_record_id(&json!("nope")), 1);
    }

    #[test]
    fn test_next_record_id_ignores_non_numeric_ids() {
        let collection = json!([{"id": "a"}, {"name": "no-id"}, {"id": 2}]);
        assert_eq!(next_record_id(&collection), 3);
    }

    #[test]
    fn test_next_record_id_floors_negatives_at_zero() {
        let collection = json!([{"id": -4}]);
        assert_eq!(next_record_id(&collection), 1);
    }

    #[test]
    fn test_record_id_text() {
        assert_eq!(record_id_text(&json!({"id": 7})), Some("7".to_string()));
        assert_eq!(record_id_text(&json!({"id": "9"})), Some("9".to_string()));
        assert_eq!(record_id_text(&json!({"id": 0})), None);
        assert_eq!(record_id_text(&json!({"id": null})), None);
        assert_eq!(record_id_text(&json!({"id": ""})), None);
        assert_eq!(record_id_text(&json!({"name": "x"})), None);
        assert_eq!(record_id_text(&json!([1, 2])), None);
    }

    #[test]
    fn test_post_followup_switches_form_to_put() {
        let mut state = AppState::default();
        state.method = Method::Post;
        state.body.set_content(r#"{"name":"x"}"#.to_string());

        let response = ResponseData {
            status: 201,
            status_text: "Created".to_string(),
            headers: HashMap::new(),
            body: ResponseBody::Json(json!({"id": 7, "name": "x"})),
            duration: Duration::from_millis(12),
            is_error: false,
            error_message: None,
        };

        apply_post_followup(&mut state, &response);

        assert_eq!(state.method, Method::Put);
        assert_eq!(state.id.content(), "7");
        let body: Value = serde_json::from_str(state.body.content()).unwrap();
        assert_eq!(body, json!({"id": 7, "name": "x"}));
    }

    #[test]
    fn test_post_followup_ignores_bodies_without_id() {
        let mut state = AppState::default();
        state.method = Method::Post;
        state.body.set_content(r#"{"name":"x"}"#.to_string());

        let response = ResponseData {
            status: 201,
            status_text: "Created".to_string(),
            headers: HashMap::new(),
            body: ResponseBody::Text("created".to_string()),
            duration: Duration::from_millis(12),
            is_error: false,
            error_message: None,
        };

        apply_post_followup(&mut state, &response);

        assert_eq!(state.method, Method::Post);
        assert_eq!(state.body.content(), r#"{"name":"x"}"#);
        assert!(state.id.is_empty());
    }
}
