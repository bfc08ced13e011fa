//! Initialize a showcase next to its config file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use vitrine_static::templates::DEFAULT_PAGE;

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing vitrine...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    let dir = config_path.parent().unwrap_or(Path::new(""));
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    // Base template the config points at, beside the config
    let template_path = dir.join("template.html");
    if !template_path.exists() || yes {
        fs::write(&template_path, DEFAULT_PAGE)
            .with_context(|| format!("Failed to write {}", template_path.display()))?;
        tracing::info!("Created {}", template_path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Add one folder per component, then run 'vitrine build'.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r##"# Vitrine Configuration

[site]
# Directory holding one folder per component
root = "."

# Base page; cards replace the placeholder below
template = "template.html"
placeholder = "<!-- COMPONENT_GRID_PLACEHOLDER -->"

# Generated page
output = "index.html"

# Find component folders automatically when no [[components]] are listed
discover = false

[sanitize]
# Background colors rewritten to transparent
colors = ["#030303", "#000", "#0a0a0a", "#020202", "#050505"]

# Blocks containing these phrases are removed
markers = ["Created by"]

# Links mentioning these authors are removed
authors = ["Jinuk"]

[layout]
# Preview scale; frames are enlarged by 1/scale to fill their card
scale = 0.75

[layout.overrides]
Fieldset = 0.55

[[components]]
name = "Buttons"
file = "one.html"

[[components]]
name = "Disclosure"
file = "index.html"

[[components]]
name = "Fieldset"
file = "one.html"
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::config::{load_config, BuildOverrides, ConfigFile};
    use tempfile::tempdir;

    #[test]
    fn starter_config_parses() {
        let config: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();
        let showcase = config.into_showcase(BuildOverrides::default());

        assert_eq!(showcase.components.len(), 3);
        assert_eq!(showcase.layout.overrides.get("Fieldset"), Some(&0.55));
        assert!(showcase.template.is_some());
    }

    #[test]
    fn writes_template_beside_config() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("site").join("vitrine.toml");

        run(&config_path, false).unwrap();

        let template = temp.path().join("site").join("template.html");
        assert_eq!(fs::read_to_string(&template).unwrap(), DEFAULT_PAGE);

        let showcase = load_config(&config_path)
            .unwrap()
            .into_showcase(BuildOverrides::default());
        assert_eq!(showcase.template, Some(template));
        assert_eq!(showcase.root, temp.path().join("site").join("."));
    }

    #[test]
    fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("vitrine.toml");
        fs::write(&config_path, "[site]\n").unwrap();

        run(&config_path, false).unwrap();

        assert_eq!(fs::read_to_string(&config_path).unwrap(), "[site]\n");
        assert!(!temp.path().join("template.html").exists());
    }
}
