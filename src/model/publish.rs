use serde::{Deserialize, Serialize};

/// The strict result of one publisher-agent invocation.
///
/// Exactly one `PublishResult` is live at a time; the controller rejects
/// a second publish attempt while one exists for the current analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PublishResult {
    pub status: String,
    pub branch_name: String,
    pub pr_url: String,
    pub pr_number: u32,
    pub commit_message: String,
    #[serde(default)]
    pub files_updated: Vec<String>,
}
