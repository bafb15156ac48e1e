//! Project configuration (vitae.toml) and project root discovery.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use vitae_static::{BuildConfig, PageConfig};

/// Default config file name.
pub const CONFIG_FILE: &str = "vitae.toml";

/// Content root used when discovering the project root.
const DEFAULT_CONTENT_DIR: &str = "Contents";

/// Configuration file structure (vitae.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub page: PageSettings,
}

#[derive(Debug, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_content")]
    pub content: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_resources")]
    pub resources: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageSettings {
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub copyright: String,
    #[serde(default)]
    pub source_url: String,
}

fn default_content() -> String {
    DEFAULT_CONTENT_DIR.to_string()
}
fn default_output() -> String {
    "Output".to_string()
}
fn default_resources() -> Vec<String> {
    vec!["Resources".to_string()]
}
fn default_lang() -> String {
    "en".to_string()
}
fn default_description() -> String {
    "Resume".to_string()
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            content: default_content(),
            output: default_output(),
            resources: default_resources(),
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            description: default_description(),
            copyright: String::new(),
            source_url: String::new(),
        }
    }
}

impl ConfigFile {
    /// Load configuration if the file exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Resolve configured paths against the project root.
    ///
    /// An explicit output directory replaces `site.output` as given.
    pub fn into_build_config(self, root: &Path, output: Option<PathBuf>) -> BuildConfig {
        BuildConfig {
            content_dir: root.join(&self.site.content),
            output_dir: output.unwrap_or_else(|| root.join(&self.site.output)),
            resource_dirs: self.site.resources.iter().map(|r| root.join(r)).collect(),
            page: PageConfig {
                lang: self.page.lang,
                description: self.page.description,
                copyright: self.page.copyright,
                source_url: self.page.source_url,
            },
        }
    }
}

/// Find the project root.
///
/// An explicit root must exist. Otherwise the current directory and its
/// ancestors are searched for a config file or a content directory. An
/// absolute config path names no project, so only the content directory
/// marks the root then.
pub fn resolve_project_root(explicit: Option<&Path>, config_file: &Path) -> Result<PathBuf> {
    if let Some(root) = explicit {
        if !root.is_dir() {
            bail!("Could not resolve project root: {} is not a directory", root.display());
        }
        return Ok(root.to_path_buf());
    }

    let cwd = env::current_dir().context("Could not resolve project root")?;
    find_project_root(&cwd, config_file).with_context(|| {
        format!(
            "Could not resolve project root: no {} or {}/ found in {} or its parents",
            config_file.display(),
            DEFAULT_CONTENT_DIR,
            cwd.display()
        )
    })
}

fn find_project_root(start: &Path, config_file: &Path) -> Option<PathBuf> {
    let relative_config = config_file.is_relative();
    start
        .ancestors()
        .find(|dir| {
            (relative_config && dir.join(config_file).is_file())
                || dir.join(DEFAULT_CONTENT_DIR).is_dir()
        })
        .map(Path::to_path_buf)
}
