//! List configured components.

use std::path::Path;

use anyhow::Result;
use vitrine_static::{LayoutResolver, ShowcaseBuilder};

use super::config::{load_config, BuildOverrides};

/// Run the list command.
pub fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?.into_showcase(BuildOverrides::default());
    let layouts = LayoutResolver::from_settings(&config.layout)?;
    let root = config.root.clone();

    let entries = ShowcaseBuilder::new(config)?.entries()?;

    for entry in &entries {
        let path = entry.fragment_path(&root);
        let layout = layouts.resolve(&entry.name);
        let status = if path.is_file() { "ok" } else { "missing" };

        tracing::info!(
            "{:<14} {:<8} scale {:<5} {}",
            entry.name,
            status,
            layout.scale_factor,
            path.display()
        );
    }

    tracing::info!("{} components", entries.len());

    Ok(())
}
