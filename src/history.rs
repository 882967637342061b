//! Client-local ledger of past analysis and publish outcomes.
//!
//! The ledger is append-only from the controller's point of view: new
//! entries are prepended by the publish completion handler and existing
//! entries are never edited. The presentation layer only reads it.

use serde::{Deserialize, Serialize};

/// Outcome recorded for one analyzed PR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Pending,
    Committed,
    Discarded,
}

/// One immutable ledger row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub pr_name: String,
    pub pr_number: u32,
    pub date_analyzed: String,
    pub changes_detected: u32,
    pub status: HistoryStatus,
    pub github_pr_url: String,
    pub change_summary: String,
}

/// A ledger row before the ledger has assigned it an id.
#[derive(Debug, Clone)]
pub struct HistoryDraft {
    pub pr_name: String,
    pub pr_number: u32,
    pub date_analyzed: String,
    pub changes_detected: u32,
    pub status: HistoryStatus,
    pub github_pr_url: String,
    pub change_summary: String,
}

/// In-memory, session-scoped history store.
///
/// Ids are `h-<n>` with a monotonically increasing counter, so entries
/// stay unique without consulting a clock.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger pre-populated with existing rows, newest first.
    /// Seeded rows keep their ids; the counter continues past them.
    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        let next_id = entries.len() as u64;
        Self { entries, next_id }
    }

    /// Prepends one entry and returns a reference to the stored row.
    pub fn record(&mut self, draft: HistoryDraft) -> &HistoryEntry {
        self.next_id += 1;
        let entry = HistoryEntry {
            id: format!("h-{}", self.next_id),
            pr_name: draft.pr_name,
            pr_number: draft.pr_number,
            date_analyzed: draft.date_analyzed,
            changes_detected: draft.changes_detected,
            status: draft.status,
            github_pr_url: draft.github_pr_url,
            change_summary: draft.change_summary,
        };
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    /// All rows, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft(pr_number: u32) -> HistoryDraft {
        HistoryDraft {
            pr_name: format!("PR number {pr_number}"),
            pr_number,
            date_analyzed: "2026-02-27".into(),
            changes_detected: 5,
            status: HistoryStatus::Committed,
            github_pr_url: String::new(),
            change_summary: "Summary".into(),
        }
    }

    #[test]
    fn record_prepends_newest_first() {
        let mut ledger = HistoryLedger::new();
        ledger.record(sample_draft(1));
        ledger.record(sample_draft(2));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].pr_number, 2);
        assert_eq!(ledger.entries()[1].pr_number, 1);
    }

    #[test]
    fn record_assigns_unique_ids() {
        let mut ledger = HistoryLedger::new();
        let first = ledger.record(sample_draft(1)).id.clone();
        let second = ledger.record(sample_draft(2)).id.clone();

        assert_eq!(first, "h-1");
        assert_eq!(second, "h-2");
    }

    #[test]
    fn record_leaves_prior_entries_untouched() {
        let mut ledger = HistoryLedger::new();
        ledger.record(sample_draft(1));
        let before = ledger.entries()[0].clone();

        ledger.record(sample_draft(2));
        assert_eq!(ledger.entries()[1], before);
    }

    #[test]
    fn seeded_ledger_continues_id_sequence() {
        let seeded = HistoryEntry {
            id: "h-1".into(),
            pr_name: "Seeded".into(),
            pr_number: 480,
            date_analyzed: "2026-02-20".into(),
            changes_detected: 3,
            status: HistoryStatus::Pending,
            github_pr_url: String::new(),
            change_summary: String::new(),
        };
        let mut ledger = HistoryLedger::with_entries(vec![seeded]);
        let id = ledger.record(sample_draft(2)).id.clone();
        assert_eq!(id, "h-2");
        assert_eq!(ledger.len(), 2);
    }
}
