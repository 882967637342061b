use serde::{Deserialize, Serialize};

/// Application-wide documentation settings.
///
/// There is a single live instance owned by the controller; saving
/// replaces it wholesale. These are session-local and are not persisted
/// anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub repo_url: String,
    pub monitored_branches: Vec<String>,
    pub doc_paths: Vec<String>,
    pub preferences: DocPreferences,
    pub output_format: OutputFormat,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            repo_url: String::from("https://github.com/acme/backend-api"),
            monitored_branches: vec![String::from("main"), String::from("develop")],
            doc_paths: vec![
                String::from("docs/"),
                String::from("README.md"),
                String::from("CHANGELOG.md"),
            ],
            preferences: DocPreferences::default(),
            output_format: OutputFormat::default(),
        }
    }
}

/// Which change categories the user wants documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocPreferences {
    pub api_endpoints: bool,
    pub schemas: bool,
    pub configs: bool,
    pub dependencies: bool,
    pub code_examples: bool,
}

impl Default for DocPreferences {
    fn default() -> Self {
        Self {
            api_endpoints: true,
            schemas: true,
            configs: true,
            dependencies: true,
            code_examples: true,
        }
    }
}

/// Output markup for generated documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Rst,
}
