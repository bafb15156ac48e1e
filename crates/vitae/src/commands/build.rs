//! Site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use vitae_static::{Markdown, SiteBuilder};

use crate::config::ConfigFile;

/// Run the build command.
pub fn run(root: &Path, config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building résumé in {}...", root.display());

    let file_config = ConfigFile::load(&root.join(config_path))?;
    let config = file_config.into_build_config(root, output);

    let markdown = Markdown::new();
    let result = SiteBuilder::with_markdown(config, &markdown)
        .build()
        .context("Build failed")?;

    tracing::info!(
        "Rendered {} sections and copied {} resource files in {}ms",
        result.sections,
        result.resources,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
