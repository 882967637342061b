use serde::{Deserialize, Serialize};

/// The strict result of one coordinator-agent invocation.
///
/// Produced by the normalizer, never by hand. A new analysis for the
/// same PR supersedes the previous result wholesale; the two are never
/// merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub change_report: ChangeReport,
    pub documentation: Documentation,
    pub pr: PrRef,
    pub analyzed_at: String,
}

/// The coordinator's summary of what changed in the PR.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeReport {
    pub summary: String,
    pub total_changes: u32,
    pub categories: ChangeCategories,
}

/// Detected changes bucketed by kind. Every list may be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeCategories {
    #[serde(default)]
    pub api_endpoints: Vec<ChangeItem>,
    #[serde(default)]
    pub schemas: Vec<ChangeItem>,
    #[serde(default)]
    pub configs: Vec<ChangeItem>,
    #[serde(default)]
    pub dependencies: Vec<ChangeItem>,
    #[serde(default)]
    pub code_patterns: Vec<ChangeItem>,
}

/// One detected change inside a category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeItem {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub change_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: String,
}

/// The generated documentation sections, editable before publishing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Documentation {
    pub api_docs: String,
    pub readme_sections: String,
    pub changelog_entry: String,
    pub summary: String,
}

/// The slice of PR metadata the analysis result keeps for itself, so the
/// review screen stays coherent even if the dashboard selection moves on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrRef {
    pub id: String,
    pub title: String,
    pub pr_number: u32,
    pub author: String,
    pub branch: String,
}

impl PrRef {
    pub fn from_pr(pr: &super::MergedPR) -> Self {
        Self {
            id: pr.id.clone(),
            title: pr.title.clone(),
            pr_number: pr.pr_number,
            author: pr.author.clone(),
            branch: pr.branch.clone(),
        }
    }
}
