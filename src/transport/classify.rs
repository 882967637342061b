//! Pure response classification.
//!
//! Given a fully buffered response, decide which of the handled
//! conditions applies and emit the matching notification. Nothing in
//! here performs I/O, so every branch is unit-testable with a capture
//! sink.

use log::{debug, warn};
use regex::Regex;
use serde_json::Value;

use super::interceptor::{InterceptedResponse, Termination};
use super::sink::{ChildAppError, DiagnosticsSink, ErrorKind, FrameMessage, ToolAuthRequired};

/// Requests whose path contains this marker are agent invocations and
/// are inspected for the tool-authentication signal.
pub(crate) const AGENT_ENDPOINT_MARKER: &str = "/api/agent";

/// Substring that marks a body as carrying a tool-auth condition.
const TOOL_AUTH_SIGNAL: &str = "tool_auth";

pub(crate) fn is_agent_endpoint(url: &str) -> bool {
    url.contains(AGENT_ENDPOINT_MARKER)
}

/// Detects a redirected exchange. The backend redirects when the hosting
/// session has expired; the caller must hand control back to the shell
/// rather than interpret the redirected body.
pub(crate) fn redirect_target(requested: &str, final_url: &str, status: u16) -> Option<String> {
    if (300..400).contains(&status) {
        return Some(final_url.to_string());
    }
    // reqwest follows redirects transparently; a changed final URL is the
    // only trace left. Trailing-slash normalization is not a redirect.
    if requested.trim_end_matches('/') != final_url.trim_end_matches('/') {
        return Some(final_url.to_string());
    }
    None
}

/// Classifies a buffered response, emitting notifications as a side
/// effect. Returns a termination when the response must not reach the
/// caller (backend-rendered fallback page); in every other handled case
/// the caller still receives the response unmodified.
pub(crate) fn classify(
    response: &InterceptedResponse,
    sink: &dyn DiagnosticsSink,
) -> Option<Termination> {
    if is_agent_endpoint(&response.url) && response.is_json() {
        if let Some(auth) = tool_auth_signal(&response.body) {
            debug!(
                "tool auth required on {} (partial: {})",
                response.url, auth.partial
            );
            sink.emit(FrameMessage::tool_auth(auth));
        }
    }

    if response.status == 404 {
        if response.is_html() {
            // Backend-rendered fallback page replaces the current view.
            return Some(Termination::FallbackPage {
                html: response.body.clone(),
            });
        }
        warn!("backend returned 404 for {}", response.url);
        sink.emit(FrameMessage::error(ChildAppError::new(
            ErrorKind::NetworkError,
            format!("Backend returned 404 Not Found for {}", response.url),
            &response.url,
            Some(404),
        )));
        return None;
    }

    if response.status >= 500 {
        warn!("backend returned {} for {}", response.status, response.url);
        sink.emit(FrameMessage::error(ChildAppError::new(
            ErrorKind::ApiError,
            format!(
                "Backend returned {} error for {}",
                response.status, response.url
            ),
            &response.url,
            Some(response.status),
        )));
    }

    None
}

/// Parses the body and, when it carries the tool-auth signal, extracts
/// the notification payload. A body that is not JSON is ignored.
fn tool_auth_signal(body: &str) -> Option<ToolAuthRequired> {
    let value: Value = serde_json::from_str(body).ok()?;
    if !body.contains(TOOL_AUTH_SIGNAL) {
        return None;
    }
    Some(extract_tool_auth(&value))
}

/// Two-tier extraction of the tool-auth fields.
///
/// The proxy reports the condition as a structured `detail` object
/// (HTTP 401), but the async task path wraps the same information inside
/// a stringified error. Structured access wins; the string scan is a
/// fallback whose results are flagged as partial.
pub fn extract_tool_auth(value: &Value) -> ToolAuthRequired {
    let detail = value.get("detail").filter(|d| d.is_object());
    let error_text = value
        .get("error")
        .and_then(Value::as_str)
        .or_else(|| value.pointer("/response/message").and_then(Value::as_str))
        .unwrap_or("");

    let mut partial = false;
    let mut field = |name: &str| -> Option<String> {
        if let Some(text) = detail.and_then(|d| d.get(name)).and_then(Value::as_str) {
            return Some(text.to_string());
        }
        let scanned = scan_quoted_field(error_text, name);
        if scanned.is_some() {
            partial = true;
        }
        scanned
    };

    let tool_name = field("tool_name");
    let tool_source = field("tool_source");
    let reason = field("reason");

    let action_names = match detail.and_then(|d| d.get("action_names")).and_then(Value::as_array) {
        Some(items) => {
            let names: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            (!names.is_empty()).then_some(names)
        }
        None => {
            let scanned = scan_action_names(error_text);
            if scanned.is_some() {
                partial = true;
            }
            scanned
        }
    };

    // Signal present but nothing recovered: still worth surfacing, but
    // only as a partial result.
    if tool_name.is_none() && tool_source.is_none() && reason.is_none() && action_names.is_none() {
        partial = true;
    }

    ToolAuthRequired {
        tool_name,
        tool_source,
        action_names,
        reason,
        partial,
    }
}

/// Scans a stringified error for `'field': 'value'` / `"field": "value"`.
fn scan_quoted_field(error_text: &str, name: &str) -> Option<String> {
    if error_text.is_empty() {
        return None;
    }
    let pattern = format!(r#"['"]{name}['"]:\s*['"]([^'"]+)['"]"#);
    let re = Regex::new(&pattern).ok()?;
    re.captures(error_text)
        .and_then(|c| c.get(1).map(|m| m.as_str().to_string()))
}

/// Scans a stringified error for an `action_names` list.
fn scan_action_names(error_text: &str) -> Option<Vec<String>> {
    if error_text.is_empty() {
        return None;
    }
    let list = Regex::new(r#"['"]action_names['"]:\s*\[([^\]]+)\]"#).ok()?;
    let raw = list
        .captures(error_text)
        .and_then(|c| c.get(1).map(|m| m.as_str().to_string()))?;
    let item = Regex::new(r#"['"]([^'"]+)['"]"#).ok()?;
    let names: Vec<String> = item
        .captures_iter(&raw)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect();
    (!names.is_empty()).then_some(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::sink::{CaptureSink, FramePayload};

    fn response(url: &str, status: u16, content_type: &str, body: &str) -> InterceptedResponse {
        InterceptedResponse {
            url: url.to_string(),
            status,
            content_type: content_type.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn server_error_emits_api_error_and_returns_response() {
        let sink = CaptureSink::new();
        let resp = response(
            "http://localhost:8000/api/agent/invoke",
            503,
            "application/json",
            r#"{"success":false}"#,
        );

        let termination = classify(&resp, &sink);
        assert!(termination.is_none());

        let messages = sink.take();
        assert_eq!(messages.len(), 1);
        match &messages[0].payload {
            FramePayload::ChildAppError(err) => {
                assert_eq!(err.kind, ErrorKind::ApiError);
                assert_eq!(err.status, Some(503));
                assert_eq!(err.url, "http://localhost:8000/api/agent/invoke");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn not_found_html_terminates_with_fallback_page() {
        let sink = CaptureSink::new();
        let resp = response(
            "http://localhost:8000/api/prs",
            404,
            "text/html; charset=utf-8",
            "<html><body>gone</body></html>",
        );

        match classify(&resp, &sink) {
            Some(Termination::FallbackPage { html }) => assert!(html.contains("gone")),
            other => panic!("expected fallback page, got {other:?}"),
        }
        assert!(sink.take().is_empty());
    }

    #[test]
    fn not_found_json_emits_network_error_and_returns_response() {
        let sink = CaptureSink::new();
        let resp = response(
            "http://localhost:8000/api/prs",
            404,
            "application/json",
            r#"{"detail":"missing"}"#,
        );

        assert!(classify(&resp, &sink).is_none());
        let messages = sink.take();
        assert_eq!(messages.len(), 1);
        match &messages[0].payload {
            FramePayload::ChildAppError(err) => {
                assert_eq!(err.kind, ErrorKind::NetworkError);
                assert_eq!(err.status, Some(404));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn success_response_emits_nothing() {
        let sink = CaptureSink::new();
        let resp = response(
            "http://localhost:8000/api/agent/invoke",
            200,
            "application/json",
            r#"{"success":true,"response":{"result":{}}}"#,
        );
        assert!(classify(&resp, &sink).is_none());
        assert!(sink.take().is_empty());
    }

    #[test]
    fn structured_tool_auth_emits_exactly_one_notification() {
        let sink = CaptureSink::new();
        let body = r#"{"detail":{"error":"tool_auth_required","tool_name":"github_connector","tool_source":"composio","reason":"token expired","action_names":["GITHUB_CREATE_PR","GITHUB_PUSH"]}}"#;
        let resp = response(
            "http://localhost:8000/api/agent/invoke",
            401,
            "application/json",
            body,
        );

        assert!(classify(&resp, &sink).is_none());
        let messages = sink.take();
        assert_eq!(messages.len(), 1);
        match &messages[0].payload {
            FramePayload::ToolAuthRequired(auth) => {
                assert_eq!(auth.tool_name.as_deref(), Some("github_connector"));
                assert_eq!(auth.tool_source.as_deref(), Some("composio"));
                assert_eq!(auth.reason.as_deref(), Some("token expired"));
                assert_eq!(
                    auth.action_names.as_deref(),
                    Some(&["GITHUB_CREATE_PR".to_string(), "GITHUB_PUSH".to_string()][..])
                );
                assert!(!auth.partial);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn tool_auth_ignored_off_the_agent_endpoint() {
        let sink = CaptureSink::new();
        let body = r#"{"detail":{"error":"tool_auth_required","tool_name":"github_connector"}}"#;
        let resp = response("http://localhost:8000/api/prs", 200, "application/json", body);

        assert!(classify(&resp, &sink).is_none());
        assert!(sink.take().is_empty());
    }

    #[test]
    fn stringified_tool_auth_falls_back_to_scanning() {
        let value: Value = serde_json::from_str(
            r#"{"error":"task failed: {'error': 'tool_auth_required', 'tool_name': 'github_connector', 'reason': 'no token', 'action_names': ['GITHUB_CREATE_PR']}"}"#,
        )
        .unwrap();

        let auth = extract_tool_auth(&value);
        assert_eq!(auth.tool_name.as_deref(), Some("github_connector"));
        assert_eq!(auth.reason.as_deref(), Some("no token"));
        assert_eq!(
            auth.action_names.as_deref(),
            Some(&["GITHUB_CREATE_PR".to_string()][..])
        );
        assert!(auth.partial);
    }

    #[test]
    fn stringified_error_under_response_message_is_scanned() {
        let value: Value = serde_json::from_str(
            r#"{"response":{"message":"{'error': 'tool_auth_required', 'tool_source': 'composio'}"}}"#,
        )
        .unwrap();

        let auth = extract_tool_auth(&value);
        assert_eq!(auth.tool_source.as_deref(), Some("composio"));
        assert!(auth.tool_name.is_none());
        assert!(auth.partial);
    }

    #[test]
    fn unrecoverable_signal_is_partial_with_no_fields() {
        let value: Value = serde_json::from_str(r#"{"error":"tool_auth_required"}"#).unwrap();

        let auth = extract_tool_auth(&value);
        assert!(auth.tool_name.is_none());
        assert!(auth.tool_source.is_none());
        assert!(auth.action_names.is_none());
        assert!(auth.reason.is_none());
        assert!(auth.partial);
    }

    #[test]
    fn redirects_are_detected_by_status_or_moved_url() {
        assert_eq!(
            redirect_target("http://app/api/prs", "http://app/login", 200),
            Some("http://app/login".to_string())
        );
        assert_eq!(
            redirect_target("http://app/api/prs", "http://app/api/prs", 302),
            Some("http://app/api/prs".to_string())
        );
        assert_eq!(redirect_target("http://app/api/prs", "http://app/api/prs/", 200), None);
        assert_eq!(redirect_target("http://app/api/prs", "http://app/api/prs", 200), None);
    }
}
