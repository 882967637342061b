//! The onboarding-and-publish workflow.

use log::{info, warn};

use crate::agent::{AgentInvocationEnvelope, AgentRole};
use crate::model::{OnboardingConfig, OnboardingDocs};
use crate::normalize;

use super::prompts;
use super::state::{current_timestamp, log_warnings, InvocationTicket};
use super::App;

impl App {
    /// `onboarding --start(config)--> onboarding`.
    ///
    /// Needs a repository URL and at least one branch; the UI disables
    /// the action otherwise, and the controller refuses it as well.
    pub async fn start_onboarding(&mut self, config: OnboardingConfig) {
        if config.repo_url.trim().is_empty() || config.branches.is_empty() {
            warn!("onboarding rejected: missing repository URL or branches");
            self.agent_error = Some(String::from(
                "A repository URL and at least one branch are required",
            ));
            return;
        }

        info!(
            "onboarding analysis for {} ({} {:?})",
            config.repo_url, config.pr_count, config.source_mode
        );
        let prompt = prompts::onboarding_prompt(&config);
        let ticket = self.begin_onboarding();
        let envelope = self.invoke(AgentRole::Onboarding, &prompt).await;
        self.complete_onboarding(ticket, envelope, config);
    }

    pub(crate) fn begin_onboarding(&mut self) -> InvocationTicket {
        self.agent_error = None;
        self.begin(AgentRole::Onboarding)
    }

    pub(crate) fn complete_onboarding(
        &mut self,
        ticket: InvocationTicket,
        envelope: AgentInvocationEnvelope,
        config: OnboardingConfig,
    ) {
        if !self.settle(ticket) {
            return;
        }
        if envelope.success {
            let normalized =
                normalize::onboarding(envelope.result(), &config, current_timestamp());
            log_warnings("onboarding", &normalized.warnings);
            self.onboarding = Some(normalized.into_value());
        } else {
            self.agent_error = Some(envelope.error_message("Onboarding analysis failed"));
        }
    }

    /// `onboarding --commit docs--> onboarding`.
    ///
    /// Commits all seven documentation sections to the fixed onboarding
    /// branch. Unlike the review commit this never touches the history
    /// ledger.
    pub async fn commit_onboarding_docs(&mut self, docs: OnboardingDocs) {
        if self.onboarding.is_none() {
            warn!("onboarding commit requested without a result");
            return;
        }

        let prompt = prompts::onboarding_publish_prompt(&self.settings.repo_url, &docs);
        let ticket = self.begin_onboarding_publish();
        let envelope = self.invoke(AgentRole::Publisher, &prompt).await;
        self.complete_onboarding_publish(ticket, envelope);
    }

    /// Unlike the review publish, a fresh onboarding commit also drops
    /// any publish result left over from an earlier attempt.
    pub(crate) fn begin_onboarding_publish(&mut self) -> InvocationTicket {
        self.publish_error = None;
        self.publish = None;
        self.begin(AgentRole::Publisher)
    }

    pub(crate) fn complete_onboarding_publish(
        &mut self,
        ticket: InvocationTicket,
        envelope: AgentInvocationEnvelope,
    ) {
        if !self.settle(ticket) {
            return;
        }
        if envelope.success {
            let normalized = normalize::publish(envelope.result());
            log_warnings("onboarding publish", &normalized.warnings);
            self.publish = Some(normalized.into_value());
        } else {
            self.publish_error = Some(envelope.error_message("Publish failed"));
        }
    }
}
