//! Screen navigation, error dismissal, and settings replacement.

use log::{debug, info};

use crate::model::AppSettings;

use super::{App, Screen};

impl App {
    /// Direct navigation between the top-level screens.
    ///
    /// Navigation carries no other side effect, with one exception:
    /// leaving the onboarding screen for the dashboard resets the
    /// onboarding result so a fresh run starts clean.
    pub fn navigate(&mut self, screen: Screen) {
        if self.screen == Screen::Onboarding && screen == Screen::Dashboard {
            self.onboarding = None;
        }
        if self.screen != screen {
            debug!("screen: {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
    }

    /// Dismisses the analysis/onboarding error banner.
    pub fn dismiss_agent_error(&mut self) {
        self.agent_error = None;
    }

    /// Dismisses the publish error banner.
    pub fn dismiss_publish_error(&mut self) {
        self.publish_error = None;
    }

    /// `settings --save--> settings`: the live settings instance is
    /// replaced wholesale, never field-merged.
    pub fn save_settings(&mut self, settings: AppSettings) {
        info!("settings saved for {}", settings.repo_url);
        self.settings = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{analysis_envelope, app_with, onboarding_envelope, sample_pr};
    use super::*;
    use crate::model::OnboardingConfig;

    #[tokio::test]
    async fn navigation_switches_screens_without_side_effects() {
        let (mut app, _) = app_with(vec![analysis_envelope(2)]);
        app.analyze_pr(sample_pr()).await;

        app.navigate(Screen::History);
        assert_eq!(app.screen(), Screen::History);
        // Review state survives plain navigation.
        assert!(app.analysis_result().is_some());

        app.navigate(Screen::Dashboard);
        assert!(app.analysis_result().is_some());
    }

    #[tokio::test]
    async fn leaving_onboarding_for_dashboard_resets_the_result() {
        let (mut app, _) = app_with(vec![onboarding_envelope()]);
        app.navigate(Screen::Onboarding);
        app.start_onboarding(OnboardingConfig {
            repo_url: "https://github.com/acme/backend-api".into(),
            ..OnboardingConfig::default()
        })
        .await;
        assert!(app.onboarding_result().is_some());

        app.navigate(Screen::Settings);
        assert!(app.onboarding_result().is_some());

        app.navigate(Screen::Onboarding);
        app.navigate(Screen::Dashboard);
        assert!(app.onboarding_result().is_none());
    }

    #[tokio::test]
    async fn save_settings_replaces_wholesale() {
        let (mut app, _) = app_with(vec![]);
        let mut settings = AppSettings::default();
        settings.repo_url = String::from("https://github.com/acme/frontend");
        settings.monitored_branches = vec![String::from("release")];

        app.save_settings(settings.clone());
        assert_eq!(app.settings(), &settings);
    }

    #[tokio::test]
    async fn error_banners_are_dismissible() {
        let (mut app, _) = app_with(vec![]);
        app.agent_error = Some("boom".into());
        app.publish_error = Some("push".into());

        app.dismiss_agent_error();
        app.dismiss_publish_error();
        assert!(app.agent_error().is_none());
        assert!(app.publish_error().is_none());
    }
}
