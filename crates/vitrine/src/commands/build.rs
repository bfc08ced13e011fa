//! Showcase build command.

use std::path::Path;

use anyhow::Result;
use vitrine_static::ShowcaseBuilder;

use super::config::{load_config, BuildOverrides};

/// Run the build command.
pub fn run(config_path: &Path, overrides: BuildOverrides) -> Result<()> {
    tracing::info!("Building showcase...");

    let config = load_config(config_path)?.into_showcase(overrides);
    let result = ShowcaseBuilder::new(config)?.build()?;

    tracing::info!(
        "Built showcase with {} cards ({} skipped) in {}ms",
        result.cards,
        result.skipped.len(),
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output.display());

    Ok(())
}
