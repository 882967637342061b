//! Normalizer for the onboarding agent's payload.

use serde_json::Value;

use crate::model::{OnboardingConfig, OnboardingDocs, OnboardingResult};

use super::value::{member, string_or};
use super::Normalized;

/// Builds a strict `OnboardingResult`. The documentation sections come
/// from the payload (nested under `onboarding_docs` or at the top
/// level); run metadata comes from the configuration that started the
/// run, not from the agent.
pub fn onboarding(
    raw: Option<&Value>,
    config: &OnboardingConfig,
    analyzed_at: String,
) -> Normalized<OnboardingResult> {
    let mut warnings = Vec::new();

    let source = match member(raw, "onboarding_docs") {
        Some(nested) if nested.is_object() => Some(nested),
        _ => raw,
    };

    let mut section =
        |key: &str| -> String { string_or(source, key, "", "onboarding_docs", &mut warnings) };

    let docs = OnboardingDocs {
        project_overview: section("project_overview"),
        technology_stack: section("technology_stack"),
        api_reference: section("api_reference"),
        setup_guide: section("setup_guide"),
        development_patterns: section("development_patterns"),
        changelog_summary: section("changelog_summary"),
        full_readme: section("full_readme"),
    };

    Normalized {
        value: OnboardingResult {
            docs,
            analyzed_at,
            prs_analyzed: config.pr_count,
            repo_url: config.repo_url.clone(),
            source_mode: config.source_mode,
        },
        warnings,
    }
}
