//! The review-and-publish workflow: analyze, commit & push, regenerate,
//! discard.

use log::{info, warn};

use crate::agent::{AgentInvocationEnvelope, AgentRole};
use crate::history::{HistoryDraft, HistoryStatus};
use crate::model::{Documentation, MergedPR, PrRef};
use crate::normalize;

use super::prompts;
use super::state::{current_date, current_timestamp, log_warnings, InvocationTicket};
use super::{App, Screen};

impl App {
    /// `dashboard --analyze(PR)--> review`.
    ///
    /// Moves to the review screen immediately and resolves the analysis
    /// when the coordinator settles. A failed invocation leaves any
    /// prior result in place and surfaces one error banner.
    pub async fn analyze_pr(&mut self, pr: MergedPR) {
        let prompt = prompts::analysis_prompt(&pr);
        let ticket = self.begin_analysis(pr);
        let envelope = self.invoke(AgentRole::Coordinator, &prompt).await;
        self.complete_analysis(ticket, envelope);
    }

    /// Starts an analysis invocation: clears stale publish state and
    /// errors, selects the PR, and switches to the review screen.
    pub(crate) fn begin_analysis(&mut self, pr: MergedPR) -> InvocationTicket {
        info!("analyzing PR #{} ({})", pr.pr_number, pr.title);
        self.selected_pr = Some(pr);
        self.agent_error = None;
        self.publish = None;
        self.publish_error = None;
        self.screen = Screen::Review;
        self.begin(AgentRole::Coordinator)
    }

    /// Applies a settled analysis invocation. Stale tickets are dropped.
    pub(crate) fn complete_analysis(
        &mut self,
        ticket: InvocationTicket,
        envelope: AgentInvocationEnvelope,
    ) {
        if !self.settle(ticket) {
            return;
        }
        if envelope.success {
            let pr = self
                .selected_pr
                .as_ref()
                .map(PrRef::from_pr)
                .unwrap_or_default();
            let normalized = normalize::analysis(envelope.result(), pr, current_timestamp());
            log_warnings("analysis", &normalized.warnings);
            self.analysis = Some(normalized.into_value());
        } else {
            self.agent_error = Some(envelope.error_message("Analysis failed"));
        }
    }

    /// `review --commit&push(docs)--> review`.
    ///
    /// Requires a live analysis; a second attempt while a publish result
    /// already exists is rejected (the action is disabled in the UI once
    /// a result is present, this guard backs that contract).
    pub async fn commit_and_push(&mut self, documentation: Documentation) {
        let Some(analysis) = self.analysis.clone() else {
            warn!("commit requested without an analysis result");
            return;
        };
        if self.publish.is_some() {
            warn!("commit requested while a publish result is already live");
            return;
        }

        let prompt = prompts::publish_prompt(&self.settings.repo_url, &analysis, &documentation);
        let ticket = self.begin_publish();
        let envelope = self.invoke(AgentRole::Publisher, &prompt).await;
        self.complete_publish(ticket, envelope);
    }

    pub(crate) fn begin_publish(&mut self) -> InvocationTicket {
        self.publish_error = None;
        self.begin(AgentRole::Publisher)
    }

    /// Applies a settled publish invocation. On success the ledger gets
    /// exactly one new entry derived from the triggering analysis; on
    /// failure the ledger is untouched.
    pub(crate) fn complete_publish(
        &mut self,
        ticket: InvocationTicket,
        envelope: AgentInvocationEnvelope,
    ) {
        if !self.settle(ticket) {
            return;
        }
        if envelope.success {
            let normalized = normalize::publish(envelope.result());
            log_warnings("publish", &normalized.warnings);
            let publish = normalized.into_value();

            if let Some(analysis) = self.analysis.as_ref() {
                self.ledger.record(HistoryDraft {
                    pr_name: analysis.pr.title.clone(),
                    pr_number: analysis.pr.pr_number,
                    date_analyzed: current_date(),
                    changes_detected: analysis.change_report.total_changes,
                    status: HistoryStatus::Committed,
                    github_pr_url: publish.pr_url.clone(),
                    change_summary: analysis.change_report.summary.clone(),
                });
                info!(
                    "documentation for PR #{} committed on {}",
                    analysis.pr.pr_number, publish.branch_name
                );
            }
            self.publish = Some(publish);
        } else {
            self.publish_error = Some(envelope.error_message("Publish failed"));
        }
    }

    /// `review --regenerate--> review`: re-runs the analysis for the
    /// selected PR. The new result replaces the old one wholesale.
    pub async fn regenerate(&mut self) {
        let Some(pr) = self.selected_pr.clone() else {
            warn!("regenerate requested without a selected PR");
            return;
        };
        self.analyze_pr(pr).await;
    }

    /// `review --discard--> dashboard`: drops the review state.
    pub fn discard_review(&mut self) {
        self.analysis = None;
        self.publish = None;
        self.publish_error = None;
        self.screen = Screen::Dashboard;
    }
}
