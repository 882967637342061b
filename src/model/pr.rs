use serde::{Deserialize, Serialize};

/// A merged pull request as surfaced by the dashboard.
///
/// This is the input to the analyze transition. The controller never
/// fabricates these; the embedding application supplies them (from its
/// own repository integration) and the controller only reads the
/// metadata fields when composing the analysis prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedPR {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub author_avatar: String,
    pub merge_date: String,
    pub branch: String,
    pub files_changed: u32,
    pub additions: u32,
    pub deletions: u32,
    #[serde(default)]
    pub categories: Vec<String>,
    pub pr_number: u32,
    #[serde(default)]
    pub status: PrStatus,
}

/// Review lifecycle of a pull request on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrStatus {
    #[default]
    Pending,
    Analyzed,
    Committed,
}
