//! Strict view-model shapes shared between the workflow controller, the
//! response normalizer, and the presentation layer.
//!
//! Everything in here is fully owned data with serde derives. Fields that
//! upstream payloads may omit carry `#[serde(default)]` so a partially
//! populated document still deserializes; the normalizer is responsible
//! for making sure no consumer ever sees an absent field.

pub mod analysis;
pub mod onboarding;
pub mod pr;
pub mod publish;
pub mod settings;

pub use analysis::{AnalysisResult, ChangeCategories, ChangeItem, ChangeReport, Documentation, PrRef};
pub use onboarding::{
    IncludeOptions, OnboardingConfig, OnboardingDocs, OnboardingResult, SourceMode,
};
pub use pr::{MergedPR, PrStatus};
pub use publish::PublishResult;
pub use settings::{AppSettings, DocPreferences, OutputFormat};
