//! Configuration file loading (vitrine.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use vitrine_sanitize::SanitizeRules;
use vitrine_static::templates::DEFAULT_PLACEHOLDER;
use vitrine_static::{default_components, ComponentEntry, LayoutSettings, ShowcaseConfig};

/// Configuration file structure (vitrine.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    site: SiteConfig,
    #[serde(default)]
    sanitize: SanitizeRules,
    #[serde(default)]
    layout: LayoutSettings,
    /// Ordered component list; the built-in list when absent
    components: Option<Vec<ComponentEntry>>,
}

#[derive(Debug, Deserialize)]
struct SiteConfig {
    #[serde(default = "default_root")]
    root: PathBuf,
    template: Option<PathBuf>,
    #[serde(default = "default_output")]
    output: PathBuf,
    #[serde(default = "default_placeholder")]
    placeholder: String,
    #[serde(default)]
    discover: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            template: None,
            output: default_output(),
            placeholder: default_placeholder(),
            discover: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_output() -> PathBuf {
    PathBuf::from("index.html")
}

impl SiteConfig {
    /// Make relative paths relative to the directory holding the config file.
    fn anchor(&mut self, dir: &Path) {
        if dir.as_os_str().is_empty() {
            return;
        }
        self.root = dir.join(&self.root);
        self.output = dir.join(&self.output);
        if let Some(template) = &self.template {
            self.template = Some(dir.join(template));
        }
    }
}
fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct BuildOverrides {
    pub output: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub root: Option<PathBuf>,
}

impl ConfigFile {
    /// Resolve into a builder configuration.
    pub fn into_showcase(self, overrides: BuildOverrides) -> ShowcaseConfig {
        // An explicit component list always wins over discovery.
        let discover = self.site.discover && self.components.is_none();

        ShowcaseConfig {
            root: overrides.root.unwrap_or(self.site.root),
            template: overrides.template.or(self.site.template),
            output: overrides.output.unwrap_or(self.site.output),
            placeholder: self.site.placeholder,
            components: self.components.unwrap_or_else(default_components),
            discover,
            sanitize: self.sanitize,
            layout: self.layout,
        }
    }
}

/// Load configuration if the file exists.
/// Returns an error if the config file exists but is malformed.
///
/// Relative paths in the file are resolved against the file's directory;
/// command-line overrides stay relative to the working directory.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.site.anchor(path.parent().unwrap_or(Path::new("")));
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(ConfigFile::default())
}
