//! Site emitter: renders the page and lays out the output directory.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use vitae_content::Content;

use crate::markdown::Markdown;
use crate::templates::{PageConfig, PageRenderer};

/// Name of the generated entry page.
pub const INDEX_FILE: &str = "index.html";

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content root holding GeneralData and Sections/
    pub content_dir: PathBuf,

    /// Output directory, cleared on every run
    pub output_dir: PathBuf,

    /// Directories copied verbatim into the output
    pub resource_dirs: Vec<PathBuf>,

    /// Page-level settings
    pub page: PageConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("Contents"),
            output_dir: PathBuf::from("Output"),
            resource_dirs: vec![PathBuf::from("Resources")],
            page: PageConfig::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of sections that had records
    pub sections: usize,

    /// Number of resource files copied
    pub resources: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to prepare output directory {}: {source}", .path.display())]
    CleanError { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError { path: PathBuf, source: io::Error },

    #[error("Resource directory not found: {}", .0.display())]
    MissingResource(PathBuf),

    #[error("Failed to copy {}: {source}", .path.display())]
    CopyError { path: PathBuf, source: io::Error },

    #[error(
        "Resource directories {} and {} would both be copied to {}",
        .first.display(),
        .second.display(),
        .name.to_string_lossy()
    )]
    DuplicateResource {
        name: OsString,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(
        "Output directory {} overlaps input directory {}; refusing to clear it",
        .output.display(),
        .input.display()
    )]
    UnsafeOutputDir { output: PathBuf, input: PathBuf },

    #[error(
        "Output directory {} is not empty and holds no index.html; refusing to clear it",
        .0.display()
    )]
    ForeignOutputDir(PathBuf),
}

/// Builds the résumé site: one page plus copied resources.
pub struct SiteBuilder {
    config: BuildConfig,
    renderer: PageRenderer,
}

impl SiteBuilder {
    /// Create a builder with the default markdown settings.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_markdown(config, &Markdown::new())
    }

    pub fn with_markdown(config: BuildConfig, markdown: &Markdown) -> Self {
        let renderer = PageRenderer::new(markdown, config.page.clone());
        Self { config, renderer }
    }

    /// Run one full generation pass.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let resource_names = self.check_resource_dirs()?;
        self.check_output_dir()?;

        let content = Content::load(&self.config.content_dir);
        let html = self
            .renderer
            .render(&content)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        self.prepare_output_dir()?;

        let index_path = self.config.output_dir.join(INDEX_FILE);
        fs::write(&index_path, html).map_err(|source| BuildError::WriteError {
            path: index_path.clone(),
            source,
        })?;
        tracing::debug!("Wrote {}", index_path.display());

        let mut resources = 0;
        for (name, dir) in &resource_names {
            resources += self.copy_resource_dir(dir, name)?;
        }

        Ok(BuildResult {
            sections: content.populated_sections(),
            resources,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Map every resource directory to the name it gets in the output.
    ///
    /// Runs before anything is cleared so a bad list leaves the previous
    /// output in place.
    fn check_resource_dirs(&self) -> Result<Vec<(OsString, PathBuf)>, BuildError> {
        let mut seen: BTreeMap<OsString, &PathBuf> = BTreeMap::new();
        let mut named = Vec::with_capacity(self.config.resource_dirs.len());

        for dir in &self.config.resource_dirs {
            let name = match dir.file_name() {
                Some(name) if dir.is_dir() => name.to_os_string(),
                _ => return Err(BuildError::MissingResource(dir.clone())),
            };
            if let Some(first) = seen.insert(name.clone(), dir) {
                return Err(BuildError::DuplicateResource {
                    name,
                    first: first.clone(),
                    second: dir.clone(),
                });
            }
            named.push((name, dir.clone()));
        }

        Ok(named)
    }

    /// Refuse output directories whose clearing would delete inputs.
    fn check_output_dir(&self) -> Result<(), BuildError> {
        let Ok(output) = fs::canonicalize(&self.config.output_dir) else {
            // Nothing to clear yet.
            return Ok(());
        };

        let inputs = std::iter::once(&self.config.content_dir).chain(&self.config.resource_dirs);
        for input in inputs {
            let Ok(resolved) = fs::canonicalize(input) else {
                continue;
            };
            if resolved.starts_with(&output) || output.starts_with(&resolved) {
                return Err(BuildError::UnsafeOutputDir {
                    output: self.config.output_dir.clone(),
                    input: input.clone(),
                });
            }
        }

        let mut existing = fs::read_dir(&output).map_err(|source| BuildError::CleanError {
            path: self.config.output_dir.clone(),
            source,
        })?;
        if existing.next().is_some() && !output.join(INDEX_FILE).is_file() {
            return Err(BuildError::ForeignOutputDir(self.config.output_dir.clone()));
        }

        Ok(())
    }

    /// Create the output directory and remove everything inside it.
    fn prepare_output_dir(&self) -> Result<(), BuildError> {
        let output = &self.config.output_dir;
        let clean_error = |source: io::Error| BuildError::CleanError {
            path: output.clone(),
            source,
        };

        fs::create_dir_all(output).map_err(clean_error)?;

        for entry in fs::read_dir(output).map_err(clean_error)? {
            let entry = entry.map_err(clean_error)?;
            let path = entry.path();
            let removed = if entry.file_type().map_err(clean_error)?.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|source| BuildError::CleanError { path, source })?;
        }

        Ok(())
    }

    /// Copy a resource directory into the output under `name`.
    fn copy_resource_dir(&self, source_dir: &Path, name: &OsString) -> Result<usize, BuildError> {
        let target_root = self.config.output_dir.join(name);

        let mut copied = 0;
        for entry in WalkDir::new(source_dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| BuildError::CopyError {
                path: source_dir.to_path_buf(),
                source: e.into(),
            })?;
            let path = entry.path();
            let relative = path.strip_prefix(source_dir).unwrap_or(path);
            let target = target_root.join(relative);

            let result = if entry.file_type().is_dir() {
                fs::create_dir_all(&target)
            } else {
                fs::copy(path, &target).map(|_| copied += 1)
            };
            result.map_err(|source| BuildError::CopyError {
                path: path.to_path_buf(),
                source,
            })?;
        }

        tracing::info!("Copied {} files from {}", copied, source_dir.display());

        Ok(copied)
    }
}
