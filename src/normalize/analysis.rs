//! Normalizer for the coordinator agent's analysis payload.

use serde_json::Value;

use crate::model::{AnalysisResult, ChangeCategories, ChangeItem, ChangeReport, Documentation, PrRef};

use super::value::{count_or_zero, member, sequence, string_or};
use super::Normalized;

/// Builds a strict `AnalysisResult` from the raw `response.result`
/// value of a coordinator invocation. The PR reference and timestamp
/// come from the controller, not the payload.
pub fn analysis(raw: Option<&Value>, pr: PrRef, analyzed_at: String) -> Normalized<AnalysisResult> {
    let mut warnings = Vec::new();

    let report = member(raw, "change_report");
    let categories = member(report, "categories");
    let change_report = ChangeReport {
        summary: string_or(report, "summary", "Analysis complete", "change_report", &mut warnings),
        total_changes: count_or_zero(report, "total_changes", "change_report", &mut warnings),
        categories: ChangeCategories {
            api_endpoints: items(categories, "api_endpoints", &mut warnings),
            schemas: items(categories, "schemas", &mut warnings),
            configs: items(categories, "configs", &mut warnings),
            dependencies: items(categories, "dependencies", &mut warnings),
            code_patterns: items(categories, "code_patterns", &mut warnings),
        },
    };

    let docs = member(raw, "documentation");
    let documentation = Documentation {
        api_docs: string_or(docs, "api_docs", "", "documentation", &mut warnings),
        readme_sections: string_or(docs, "readme_sections", "", "documentation", &mut warnings),
        changelog_entry: string_or(docs, "changelog_entry", "", "documentation", &mut warnings),
        summary: string_or(docs, "summary", "", "documentation", &mut warnings),
    };

    Normalized {
        value: AnalysisResult {
            change_report,
            documentation,
            pr,
            analyzed_at,
        },
        warnings,
    }
}

fn items(categories: Option<&Value>, key: &str, warnings: &mut Vec<String>) -> Vec<ChangeItem> {
    const PATH: &str = "change_report.categories";
    match sequence(categories, key, PATH, warnings) {
        Some(raw_items) => raw_items
            .iter()
            .enumerate()
            .map(|(idx, item)| change_item(item, &format!("{PATH}.{key}[{idx}]"), warnings))
            .collect(),
        None => Vec::new(),
    }
}

fn change_item(value: &Value, path: &str, warnings: &mut Vec<String>) -> ChangeItem {
    let item = Some(value);
    ChangeItem {
        file_path: string_or(item, "file_path", "", path, warnings),
        change_type: string_or(item, "change_type", "", path, warnings),
        description: string_or(item, "description", "", path, warnings),
        impact: string_or(item, "impact", "", path, warnings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pr_487() -> PrRef {
        PrRef {
            id: "1".into(),
            title: "Add user authentication middleware".into(),
            pr_number: 487,
            author: "sarah.chen".into(),
            branch: "main".into(),
        }
    }

    #[test]
    fn partial_payload_keeps_counts_and_defaults_documentation() {
        let raw = json!({
            "change_report": {"total_changes": 5}
        });

        let normalized = analysis(Some(&raw), pr_487(), "2026-02-27 10:00".into());
        let result = normalized.value;

        assert_eq!(result.change_report.total_changes, 5);
        assert_eq!(result.documentation.api_docs, "");
        assert_eq!(result.pr.pr_number, 487);
        assert!(!normalized.warnings.is_empty());
    }

    #[test]
    fn absent_payload_yields_fully_defaulted_result() {
        let normalized = analysis(None, pr_487(), "2026-02-27 10:00".into());
        let result = normalized.value;

        assert_eq!(result.change_report.summary, "Analysis complete");
        assert_eq!(result.change_report.total_changes, 0);
        assert!(result.change_report.categories.api_endpoints.is_empty());
        assert!(result.change_report.categories.code_patterns.is_empty());
        assert_eq!(result.documentation.summary, "");
        assert_eq!(result.analyzed_at, "2026-02-27 10:00");
    }

    #[test]
    fn complete_payload_produces_no_warnings() {
        let raw = json!({
            "change_report": {
                "summary": "Two endpoints changed",
                "total_changes": 2,
                "categories": {
                    "api_endpoints": [{
                        "file_path": "src/auth.rs",
                        "change_type": "added",
                        "description": "New login endpoint",
                        "impact": "high"
                    }],
                    "schemas": [],
                    "configs": [],
                    "dependencies": [],
                    "code_patterns": []
                }
            },
            "documentation": {
                "api_docs": "## Auth",
                "readme_sections": "### Setup",
                "changelog_entry": "- auth added",
                "summary": "Auth docs"
            }
        });

        let normalized = analysis(Some(&raw), pr_487(), "2026-02-27 10:00".into());
        assert!(normalized.is_clean(), "warnings: {:?}", normalized.warnings);
        let result = normalized.value;
        assert_eq!(result.change_report.categories.api_endpoints.len(), 1);
        assert_eq!(
            result.change_report.categories.api_endpoints[0].file_path,
            "src/auth.rs"
        );
    }

    #[test]
    fn non_sequence_category_is_treated_as_empty() {
        let raw = json!({
            "change_report": {
                "categories": {"api_endpoints": "nope"}
            }
        });

        let normalized = analysis(Some(&raw), pr_487(), "now".into());
        assert!(normalized.value.change_report.categories.api_endpoints.is_empty());
        assert!(normalized
            .warnings
            .iter()
            .any(|w| w.contains("api_endpoints") && w.contains("not a sequence")));
    }

    #[test]
    fn malformed_items_are_defaulted_field_by_field() {
        let raw = json!({
            "change_report": {
                "categories": {
                    "schemas": [{"file_path": "db/users.sql"}, 42]
                }
            }
        });

        let normalized = analysis(Some(&raw), pr_487(), "now".into());
        let schemas = &normalized.value.change_report.categories.schemas;
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0].file_path, "db/users.sql");
        assert_eq!(schemas[0].change_type, "");
        assert_eq!(schemas[1].file_path, "");
    }
}
