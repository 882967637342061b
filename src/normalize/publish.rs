//! Normalizer for the publisher agent's payload.

use serde_json::Value;

use crate::model::PublishResult;

use super::value::{count_or_zero, member, string_or, string_sequence};
use super::Normalized;

/// Builds a strict `PublishResult` from the raw `response.result` value
/// of a publisher invocation. The publisher sometimes nests its fields
/// under `publish_result` and sometimes returns them at the top level;
/// both shapes are accepted.
pub fn publish(raw: Option<&Value>) -> Normalized<PublishResult> {
    let mut warnings = Vec::new();

    let source = match member(raw, "publish_result") {
        Some(nested) if nested.is_object() => Some(nested),
        _ => raw,
    };

    let value = PublishResult {
        status: string_or(source, "status", "success", "publish_result", &mut warnings),
        branch_name: string_or(source, "branch_name", "", "publish_result", &mut warnings),
        pr_url: string_or(source, "pr_url", "", "publish_result", &mut warnings),
        pr_number: count_or_zero(source, "pr_number", "publish_result", &mut warnings),
        commit_message: string_or(source, "commit_message", "", "publish_result", &mut warnings),
        files_updated: string_sequence(source, "files_updated", "publish_result", &mut warnings),
    };

    Normalized { value, warnings }
}
