//! String-keyed content records.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

/// One string-keyed set of fields, e.g. a single job entry.
///
/// Only string values survive loading, so a field is either present with
/// text or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field, returning `None` when it is absent.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Coerce a YAML mapping, keeping entries whose key and value are both strings.
    pub(crate) fn from_mapping(mapping: &Mapping) -> Self {
        mapping
            .iter()
            .filter_map(|(key, value)| Some((key.as_str()?, string_value(value)?)))
            .collect()
    }
}

/// Plain or tagged string scalars count as strings; everything else is dropped.
fn string_value(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Tagged(tagged) => string_value(&tagged.value),
        _ => None,
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Page-wide fields: name, tagline, summary and contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralData {
    record: Record,
}

impl GeneralData {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.record.field(key)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

impl From<Record> for GeneralData {
    fn from(record: Record) -> Self {
        Self { record }
    }
}

impl<K, V> FromIterator<(K, V)> for GeneralData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record::from_iter(iter).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn keeps_only_string_values() {
        let record = Record::from_mapping(&mapping(
            r#"
name: Ada
age: 36
active: true
missing: ~
tags: [a, b]
nested:
  key: value
"#,
        ));

        assert_eq!(record.len(), 1);
        assert_eq!(record.field("name"), Some("Ada"));
        assert_eq!(record.field("age"), None);
        assert_eq!(record.field("nested"), None);
    }

    #[test]
    fn drops_non_string_keys() {
        let record = Record::from_mapping(&mapping("1: one\ntwo: two\n"));

        assert_eq!(record.field("two"), Some("two"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn quoted_numbers_are_strings() {
        let record = Record::from_mapping(&mapping("phone: \"+1 555 0100\"\nzip: 12345\n"));

        assert_eq!(record.field("phone"), Some("+1 555 0100"));
        assert_eq!(record.field("zip"), None);
    }

    #[test]
    fn absent_field_is_none() {
        let general: GeneralData = [("name", "Ada")].into_iter().collect();

        assert_eq!(general.field("name"), Some("Ada"));
        assert_eq!(general.field("summary"), None);
    }
}
