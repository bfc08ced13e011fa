//! Configurable sanitize rules.

use serde::Deserialize;

/// What the sanitizer strips and neutralizes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SanitizeRules {
    /// Literal background colors rewritten to `transparent`
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,

    /// Phrases marking an attribution block (e.g. "Created by")
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,

    /// Author identifiers whose links are removed
    #[serde(default = "default_authors")]
    pub authors: Vec<String>,
}

fn default_colors() -> Vec<String> {
    ["#030303", "#000", "#0a0a0a", "#020202", "#050505"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_markers() -> Vec<String> {
    vec!["Created by".to_string()]
}

fn default_authors() -> Vec<String> {
    vec!["Jinuk".to_string()]
}

impl Default for SanitizeRules {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            markers: default_markers(),
            authors: default_authors(),
        }
    }
}
