//! Repeated résumé sections.

use std::fmt;
use std::slice;

use crate::record::Record;

/// The fixed set of repeated sections, in canonical page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Education,
    Languages,
    Interests,
    Experience,
    Projects,
    Skills,
}

impl SectionKind {
    /// Every section kind in canonical order.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Education,
        SectionKind::Languages,
        SectionKind::Interests,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Skills,
    ];

    /// File stem of the section file inside `Sections/`.
    pub fn file_stem(self) -> &'static str {
        match self {
            SectionKind::Education => "Education",
            SectionKind::Languages => "Languages",
            SectionKind::Interests => "Interests",
            SectionKind::Experience => "Experience",
            SectionKind::Projects => "Projects",
            SectionKind::Skills => "Skills",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// An ordered list of records for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    records: Vec<Record>,
}

impl Section {
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for Section {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for Section {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
