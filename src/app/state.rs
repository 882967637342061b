//! Core state for the workflow controller.
//!
//! This module contains the central `App` struct that owns the active
//! screen, the single in-flight agent invocation, and every derived
//! piece of state (analysis/publish/onboarding results, errors,
//! settings, history). All mutation happens through the named
//! transitions in the sibling modules, so each transition is
//! unit-testable without a presentation layer.

use jiff::{Timestamp, Zoned};
use log::{debug, warn};

use crate::agent::{agents, AgentClient, AgentDescriptor, AgentInvocationEnvelope, AgentRole};
use crate::history::HistoryLedger;
use crate::model::{AnalysisResult, AppSettings, MergedPR, OnboardingResult, PublishResult};

/// The five top-level screens. Exactly one is active at a time and the
/// controller owns it exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Review,
    History,
    Settings,
    Onboarding,
}

/// Identifies one invocation within its workflow.
///
/// Completions carry the ticket back; a ticket whose generation has
/// been superseded is stale and its result is dropped instead of being
/// applied to state the user has already moved past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationTicket {
    pub(crate) role: AgentRole,
    pub(crate) generation: u64,
}

/// Per-role generation counters backing the tickets.
#[derive(Debug, Default)]
struct Generations {
    coordinator: u64,
    publisher: u64,
    onboarding: u64,
}

impl Generations {
    fn bump(&mut self, role: AgentRole) -> u64 {
        let slot = self.slot_mut(role);
        *slot += 1;
        *slot
    }

    fn current(&self, role: AgentRole) -> u64 {
        match role {
            AgentRole::Coordinator => self.coordinator,
            AgentRole::Publisher => self.publisher,
            AgentRole::Onboarding => self.onboarding,
        }
    }

    fn slot_mut(&mut self, role: AgentRole) -> &mut u64 {
        match role {
            AgentRole::Coordinator => &mut self.coordinator,
            AgentRole::Publisher => &mut self.publisher,
            AgentRole::Onboarding => &mut self.onboarding,
        }
    }
}

/// The workflow controller.
///
/// Owns the screen, the active-agent slot, the results of the three
/// workflows and the history ledger. The presentation layer reads
/// through the accessors and triggers the async operations; it must
/// disable an action while the matching invocation is in flight (the
/// controller records but does not lock against concurrent calls).
pub struct App {
    client: AgentClient,

    // --- Screen & selection ---
    pub(crate) screen: Screen,
    pub(crate) selected_pr: Option<MergedPR>,

    // --- Workflow results ---
    pub(crate) analysis: Option<AnalysisResult>,
    pub(crate) publish: Option<PublishResult>,
    pub(crate) onboarding: Option<OnboardingResult>,

    // --- Per-stage errors, shown as dismissible banners ---
    pub(crate) agent_error: Option<String>,
    pub(crate) publish_error: Option<String>,

    // --- Derived collections ---
    pub(crate) settings: AppSettings,
    pub(crate) ledger: HistoryLedger,

    // --- Invocation tracking ---
    pub(crate) active_agent: Option<AgentRole>,
    generations: Generations,
}

impl App {
    pub fn new(client: AgentClient) -> Self {
        Self::with_settings(client, AppSettings::default())
    }

    pub fn with_settings(client: AgentClient, settings: AppSettings) -> Self {
        Self {
            client,
            screen: Screen::Dashboard,
            selected_pr: None,
            analysis: None,
            publish: None,
            onboarding: None,
            agent_error: None,
            publish_error: None,
            settings,
            ledger: HistoryLedger::new(),
            active_agent: None,
            generations: Generations::default(),
        }
    }

    // --- Read access for the presentation layer ---

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_pr(&self) -> Option<&MergedPR> {
        self.selected_pr.as_ref()
    }

    pub fn analysis_result(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn publish_result(&self) -> Option<&PublishResult> {
        self.publish.as_ref()
    }

    pub fn onboarding_result(&self) -> Option<&OnboardingResult> {
        self.onboarding.as_ref()
    }

    pub fn agent_error(&self) -> Option<&str> {
        self.agent_error.as_deref()
    }

    pub fn publish_error(&self) -> Option<&str> {
        self.publish_error.as_deref()
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn history(&self) -> &[crate::history::HistoryEntry] {
        self.ledger.entries()
    }

    /// The agent with an outstanding invocation, if any.
    pub fn active_agent(&self) -> Option<AgentRole> {
        self.active_agent
    }

    pub fn is_analyzing(&self) -> bool {
        self.active_agent == Some(AgentRole::Coordinator)
    }

    pub fn is_publishing(&self) -> bool {
        self.active_agent == Some(AgentRole::Publisher)
    }

    pub fn is_onboarding(&self) -> bool {
        self.active_agent == Some(AgentRole::Onboarding)
    }

    /// The static agent registry, for the sidebar listing.
    pub fn agents(&self) -> &'static [AgentDescriptor] {
        agents()
    }

    // --- Invocation plumbing shared by the workflow transitions ---

    /// Marks `role` as in flight and hands out the ticket its completion
    /// must present.
    pub(crate) fn begin(&mut self, role: AgentRole) -> InvocationTicket {
        let generation = self.generations.bump(role);
        self.active_agent = Some(role);
        debug!("invocation started: {} (generation {generation})", role.name());
        InvocationTicket { role, generation }
    }

    /// Validates a completion ticket. A current ticket releases the
    /// active-agent slot before any result handling, so the controller
    /// can never stay busy because a later step failed. A stale ticket
    /// leaves state alone entirely.
    pub(crate) fn settle(&mut self, ticket: InvocationTicket) -> bool {
        if self.generations.current(ticket.role) != ticket.generation {
            warn!(
                "dropping stale {} completion (generation {} superseded)",
                ticket.role.name(),
                ticket.generation
            );
            return false;
        }
        self.active_agent = None;
        debug!("invocation settled: {}", ticket.role.name());
        true
    }

    /// Single exchange with the remote agent for `role`.
    pub(crate) async fn invoke(&self, role: AgentRole, message: &str) -> AgentInvocationEnvelope {
        self.client.invoke(message, role.id()).await
    }
}

/// Timestamp attached to results, ISO-8601.
pub(crate) fn current_timestamp() -> String {
    Timestamp::now().to_string()
}

/// Civil date attached to history rows (`YYYY-MM-DD`).
pub(crate) fn current_date() -> String {
    Zoned::now().date().to_string()
}

/// Logs every default substitution a normalization had to make.
pub(crate) fn log_warnings(stage: &str, warnings: &[String]) {
    for warning in warnings {
        debug!("{stage} normalization: {warning}");
    }
}
