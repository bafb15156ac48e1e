//! Lenient loading of content files.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::record::{GeneralData, Record};
use crate::section::{Section, SectionKind};

/// File stem of the page-wide data file.
pub const GENERAL_DATA_STEM: &str = "GeneralData";

/// Subdirectory of the content root holding one file per section.
pub const SECTIONS_DIR: &str = "Sections";

/// Accepted extensions, in lookup order.
const EXTENSIONS: [&str; 2] = ["yml", "yaml"];

static EMPTY_SECTION: Section = Section::new();

/// Why a file produced no data. Only ever logged.
#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("{} not found", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Invalid YAML in {}: {source}", .path.display())]
    InvalidYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Unexpected shape in {}: expected {expected}", .path.display())]
    Shape {
        path: PathBuf,
        expected: &'static str,
    },
}

impl LoadError {
    fn log(&self) {
        match self {
            LoadError::Missing(_) => tracing::debug!("{}", self),
            _ => tracing::warn!("{}; using empty data", self),
        }
    }
}

/// All content for one page: general data plus every section.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub general: GeneralData,
    sections: BTreeMap<SectionKind, Section>,
}

impl Content {
    pub fn new(general: GeneralData) -> Self {
        Self {
            general,
            sections: BTreeMap::new(),
        }
    }

    /// Load general data and every section from a content root.
    ///
    /// Never fails; unreadable files leave their part of the content empty.
    pub fn load(content_dir: &Path) -> Self {
        let general = load_general_data(&resolve_file(content_dir, GENERAL_DATA_STEM));

        let sections_dir = content_dir.join(SECTIONS_DIR);
        let sections = SectionKind::ALL
            .into_iter()
            .map(|kind| {
                let path = resolve_file(&sections_dir, kind.file_stem());
                (kind, load_section(&path, kind))
            })
            .collect();

        Self { general, sections }
    }

    /// Replace one section.
    pub fn with_section(mut self, kind: SectionKind, section: impl Into<Section>) -> Self {
        self.sections.insert(kind, section.into());
        self
    }

    /// The records of a section, empty when nothing was loaded.
    pub fn section(&self, kind: SectionKind) -> &Section {
        self.sections.get(&kind).unwrap_or(&EMPTY_SECTION)
    }

    /// Number of sections with at least one record.
    pub fn populated_sections(&self) -> usize {
        self.sections.values().filter(|s| !s.is_empty()).count()
    }
}

/// Read the page-wide data file.
///
/// Only string-valued entries are kept. A missing, unreadable or non-mapping
/// file yields empty data.
pub fn load_general_data(path: &Path) -> GeneralData {
    let parsed = read_yaml(path).and_then(|value| match value {
        Value::Mapping(mapping) => Ok(Record::from_mapping(&mapping)),
        Value::Null => Ok(Record::new()),
        _ => Err(LoadError::Shape {
            path: path.to_path_buf(),
            expected: "a mapping",
        }),
    });

    match parsed {
        Ok(record) => {
            tracing::debug!("Loaded {} general fields from {}", record.len(), path.display());
            record.into()
        }
        Err(e) => {
            e.log();
            GeneralData::default()
        }
    }
}

/// Read one section file.
///
/// The file must hold a sequence of mappings; any other shape yields an
/// empty section.
pub fn load_section(path: &Path, kind: SectionKind) -> Section {
    let parsed = read_yaml(path).and_then(|value| match value {
        Value::Sequence(items) => items
            .iter()
            .map(|item| match item {
                Value::Mapping(mapping) => Ok(Record::from_mapping(mapping)),
                _ => Err(LoadError::Shape {
                    path: path.to_path_buf(),
                    expected: "every list entry to be a mapping",
                }),
            })
            .collect::<Result<Section, _>>(),
        Value::Null => Ok(Section::new()),
        _ => Err(LoadError::Shape {
            path: path.to_path_buf(),
            expected: "a list of mappings",
        }),
    });

    match parsed {
        Ok(section) => {
            tracing::debug!("Loaded {} {} records", section.len(), kind);
            section
        }
        Err(e) => {
            e.log();
            Section::new()
        }
    }
}

fn read_yaml(path: &Path) -> Result<Value, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::Missing(path.to_path_buf())
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_yaml::from_str(&content).map_err(|source| LoadError::InvalidYaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Pick the first existing `<stem>.<ext>`, defaulting to `.yml`.
fn resolve_file(dir: &Path, stem: &str) -> PathBuf {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.is_file())
        .unwrap_or_else(|| dir.join(format!("{}.{}", stem, EXTENSIONS[0])))
}
