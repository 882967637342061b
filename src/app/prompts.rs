//! Prompt composition for the three agents.
//!
//! The agents receive a single text prompt per invocation; everything
//! they need is rendered into it here. Keeping the assembly in one
//! place makes the exact wire text testable.

use crate::model::{AnalysisResult, Documentation, MergedPR, OnboardingConfig, OnboardingDocs, SourceMode};

/// Fixed branch targeted by the onboarding documentation commit.
pub(crate) const ONBOARDING_BRANCH: &str = "docs/onboarding-docs";

/// Branch synthesized for a per-PR documentation update.
pub(crate) fn update_branch(pr_number: u32) -> String {
    format!("docs/update-pr-{pr_number}")
}

/// Prompt for the coordinator: PR metadata only, never diff content.
pub(crate) fn analysis_prompt(pr: &MergedPR) -> String {
    format!(
        "Analyze this PR diff and generate documentation updates:\n\n\
         PR Title: {title}\n\
         PR Author: {author}\n\
         PR Number: #{number}\n\
         Branch: {branch}\n\
         Files Changed: {files_changed}\n\
         Additions: +{additions}\n\
         Deletions: -{deletions}\n\
         Categories: {categories}\n\n\
         Diff Content:\n\
         No diff content available - analyze based on PR metadata",
        title = pr.title,
        author = pr.author,
        number = pr.pr_number,
        branch = pr.branch,
        files_changed = pr.files_changed,
        additions = pr.additions,
        deletions = pr.deletions,
        categories = pr.categories.join(", "),
    )
}

/// Prompt for the publisher when committing a review's documentation.
pub(crate) fn publish_prompt(
    repo_url: &str,
    analysis: &AnalysisResult,
    documentation: &Documentation,
) -> String {
    format!(
        "Commit these documentation updates to the repository:\n\n\
         Repository: {repo_url}\n\
         Branch: {branch}\n\
         PR: #{number} - {title}\n\n\
         Documentation Content:\n{content}",
        branch = update_branch(analysis.pr.pr_number),
        number = analysis.pr.pr_number,
        title = analysis.pr.title,
        content = render_json(documentation),
    )
}

/// Prompt for the onboarding agent.
pub(crate) fn onboarding_prompt(config: &OnboardingConfig) -> String {
    let include_list = config.include_options.enabled_labels().join(", ");
    let source_instruction = match config.source_mode {
        SourceMode::Commits => format!(
            "Source Mode: commits\n\
             IMPORTANT: This repository may have no pull requests. Read the recent commit \
             history directly instead. Analyze commit messages, changed files, and patterns \
             in the last {count} commits to build documentation.\n\n\
             Number of recent commits to analyze: {count}",
            count = config.pr_count,
        ),
        SourceMode::PullRequests => format!(
            "Source Mode: pull_requests\n\
             Number of recent closed PRs to analyze: {count}",
            count = config.pr_count,
        ),
    };

    format!(
        "Analyze the repository and generate comprehensive project documentation for onboarding.\n\n\
         Repository: {repo}\n\
         Branches: {branches}\n\
         {source_instruction}\n\
         Include: {include_list}\n\n\
         Please analyze the recent {source_label} from this repository and generate \
         comprehensive documentation covering: project overview, technology stack, API \
         reference, setup guide, development patterns, and changelog summary.",
        repo = config.repo_url,
        branches = config.branches.join(", "),
        source_label = config.source_mode.label(),
    )
}

/// Prompt for the publisher when committing the full onboarding set.
pub(crate) fn onboarding_publish_prompt(repo_url: &str, docs: &OnboardingDocs) -> String {
    format!(
        "Commit these comprehensive project documentation files to the repository:\n\n\
         Repository: {repo_url}\n\
         Branch: {ONBOARDING_BRANCH}\n\n\
         Documentation Content:\n{content}\n\n\
         Please create a PR with all the generated documentation files including README.md, \
         docs/architecture.md, docs/api-reference.md, docs/setup-guide.md, \
         docs/development-patterns.md, and CHANGELOG.md.",
        content = render_json(docs),
    )
}

fn render_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| String::from("{}"))
}
