use serde::{Deserialize, Serialize};

/// Where the onboarding agent should read repository history from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    #[default]
    PullRequests,
    Commits,
}

impl SourceMode {
    /// Human-facing label used when composing the onboarding prompt.
    pub fn label(self) -> &'static str {
        match self {
            SourceMode::PullRequests => "closed PRs",
            SourceMode::Commits => "commits",
        }
    }
}

/// User-chosen configuration for one onboarding run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingConfig {
    pub repo_url: String,
    pub pr_count: u32,
    pub branches: Vec<String>,
    pub source_mode: SourceMode,
    pub include_options: IncludeOptions,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            repo_url: String::new(),
            pr_count: 20,
            branches: vec![String::from("main")],
            source_mode: SourceMode::default(),
            include_options: IncludeOptions::default(),
        }
    }
}

/// Which documentation areas the onboarding run should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeOptions {
    pub architecture: bool,
    pub api_reference: bool,
    pub setup_guide: bool,
    pub tech_stack: bool,
    pub dev_patterns: bool,
    pub changelog: bool,
}

impl Default for IncludeOptions {
    fn default() -> Self {
        Self {
            architecture: true,
            api_reference: true,
            setup_guide: true,
            tech_stack: true,
            dev_patterns: true,
            changelog: true,
        }
    }
}

impl IncludeOptions {
    /// Enabled options under the wire names the agent services expect.
    pub fn enabled_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.architecture {
            labels.push("architecture");
        }
        if self.api_reference {
            labels.push("apiReference");
        }
        if self.setup_guide {
            labels.push("setupGuide");
        }
        if self.tech_stack {
            labels.push("techStack");
        }
        if self.dev_patterns {
            labels.push("devPatterns");
        }
        if self.changelog {
            labels.push("changelog");
        }
        labels
    }
}

/// The strict result of one onboarding-agent invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingResult {
    pub docs: OnboardingDocs,
    pub analyzed_at: String,
    pub prs_analyzed: u32,
    pub repo_url: String,
    pub source_mode: SourceMode,
}

/// The seven generated documentation sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnboardingDocs {
    pub project_overview: String,
    pub technology_stack: String,
    pub api_reference: String,
    pub setup_guide: String,
    pub development_patterns: String,
    pub changelog_summary: String,
    pub full_readme: String,
}
