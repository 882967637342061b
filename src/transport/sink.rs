//! Diagnostics sink: how transport classifications reach the hosting
//! shell.
//!
//! The interceptor only decides *what* happened; delivery is behind the
//! `DiagnosticsSink` trait so the same classification logic serves a
//! hosted deployment (channel to the parent shell), a headless one (log
//! stream), and the test suite (capture). Emission must never fail the
//! request path: every sink swallows its own delivery errors.

use std::sync::Mutex;

use jiff::Timestamp;
use log::warn;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Identifies this application in every outbound message.
pub const FRAME_SOURCE: &str = "architect-child-app";

/// Error class carried by a `CHILD_APP_ERROR` notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ApiError,
    NetworkError,
}

/// Payload of a `CHILD_APP_ERROR` notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildAppError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    pub timestamp: String,
    pub url: String,
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ChildAppError {
    /// Builds an error payload for a failing request URL, stamping the
    /// current time. `url` carries the full request URL; `endpoint` its
    /// path component.
    pub fn new(kind: ErrorKind, message: impl Into<String>, url: &str, status: Option<u16>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: Timestamp::now().to_string(),
            url: url.to_string(),
            endpoint: endpoint_path(url),
            status,
        }
    }
}

/// Strips scheme and host from a URL, leaving the request path.
fn endpoint_path(url: &str) -> String {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    match rest.find('/') {
        Some(idx) => rest[idx..].to_string(),
        None => String::from("/"),
    }
}

/// Payload of a `TOOL_AUTH_REQUIRED` notification.
///
/// Any of the fields may be absent; `partial` is true when the fields
/// had to be recovered from a stringified error instead of the
/// structured `detail` object, or when the signal was present but
/// nothing could be recovered.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ToolAuthRequired {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub partial: bool,
}

/// One typed cross-frame notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum FramePayload {
    #[serde(rename = "CHILD_APP_ERROR")]
    ChildAppError(ChildAppError),
    #[serde(rename = "TOOL_AUTH_REQUIRED")]
    ToolAuthRequired(ToolAuthRequired),
}

/// The full message envelope sent to the hosting shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameMessage {
    pub source: &'static str,
    #[serde(flatten)]
    pub payload: FramePayload,
}

impl FrameMessage {
    pub fn error(payload: ChildAppError) -> Self {
        Self {
            source: FRAME_SOURCE,
            payload: FramePayload::ChildAppError(payload),
        }
    }

    pub fn tool_auth(payload: ToolAuthRequired) -> Self {
        Self {
            source: FRAME_SOURCE,
            payload: FramePayload::ToolAuthRequired(payload),
        }
    }
}

/// Delivery mechanism for transport notifications.
pub trait DiagnosticsSink: Send + Sync {
    /// Delivers one message. Implementations must not panic and must not
    /// block the caller.
    fn emit(&self, message: FrameMessage);
}

/// Sink for the non-hosted case: every message is dropped.
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn emit(&self, _message: FrameMessage) {}
}

/// Writes each message to the log stream at warn level.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn emit(&self, message: FrameMessage) {
        match serde_json::to_string(&message) {
            Ok(serialized) => warn!("diagnostics: {serialized}"),
            Err(_) => warn!("diagnostics: {message:?}"),
        }
    }
}

/// Forwards messages over a channel to the hosting shell's event loop.
pub struct ChannelSink {
    tx: UnboundedSender<FrameMessage>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<FrameMessage>) -> Self {
        Self { tx }
    }
}

impl DiagnosticsSink for ChannelSink {
    fn emit(&self, message: FrameMessage) {
        // A closed receiver means the shell went away; nothing to do.
        let _ = self.tx.send(message);
    }
}

/// Test sink that records every emitted message.
#[derive(Debug, Default)]
pub struct CaptureSink {
    messages: Mutex<Vec<FrameMessage>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn messages(&self) -> Vec<FrameMessage> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Drains and returns everything emitted so far.
    pub fn take(&self) -> Vec<FrameMessage> {
        self.messages.lock().map(|mut m| std::mem::take(&mut *m)).unwrap_or_default()
    }
}

impl DiagnosticsSink for CaptureSink {
    fn emit(&self, message: FrameMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_app_error_serializes_with_protocol_tags() {
        let message = FrameMessage::error(ChildAppError::new(
            ErrorKind::ApiError,
            "Backend returned 503 error for http://localhost/api/agent/invoke",
            "http://localhost/api/agent/invoke",
            Some(503),
        ));
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["source"], "architect-child-app");
        assert_eq!(value["type"], "CHILD_APP_ERROR");
        assert_eq!(value["payload"]["type"], "api_error");
        assert_eq!(value["payload"]["status"], 503);
        assert_eq!(value["payload"]["endpoint"], "/api/agent/invoke");
        assert!(value["payload"]["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn tool_auth_serializes_without_absent_fields() {
        let message = FrameMessage::tool_auth(ToolAuthRequired {
            tool_name: Some("github_connector".into()),
            ..ToolAuthRequired::default()
        });
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["type"], "TOOL_AUTH_REQUIRED");
        assert_eq!(value["payload"]["tool_name"], "github_connector");
        assert!(value["payload"].get("tool_source").is_none());
    }

    #[test]
    fn capture_sink_records_in_order() {
        let sink = CaptureSink::new();
        sink.emit(FrameMessage::tool_auth(ToolAuthRequired::default()));
        sink.emit(FrameMessage::error(ChildAppError::new(
            ErrorKind::NetworkError,
            "down",
            "http://localhost/api/prs",
            None,
        )));

        let messages = sink.take();
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0].payload, FramePayload::ToolAuthRequired(_)));
        assert!(matches!(messages[1].payload, FramePayload::ChildAppError(_)));
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn endpoint_path_handles_bare_hosts() {
        assert_eq!(endpoint_path("http://localhost:3000"), "/");
        assert_eq!(endpoint_path("http://localhost:3000/api/agent"), "/api/agent");
    }
}
