use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Well-known metadata keys.
pub const CITATION: &str = "citation";
pub const LANGUAGE: &str = "language";
pub const ISO_639_3: &str = "iso-639-3";
pub const JUDGMENT: &str = "judgment";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MetadataItem {
    key: String,
    value: String,
}

/// Append-only metadata extracted from an instance.
///
/// Keys can repeat (an instance can have several citations), and insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Metadata(Vec<MetadataItem>);

impl Metadata {
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(MetadataItem {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Append every item of `other`, keeping its order.
    pub fn extend(&mut self, other: Metadata) {
        self.0.extend(other.0);
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.value.as_str())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |item| item.key == key)
            .map(|item| item.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_keep_order() {
        let mut m = Metadata::default();
        m.add(CITATION, "Smith 1999");
        m.add(JUDGMENT, "*");
        m.add(CITATION, "Doe 2001: 4");

        assert_eq!(m.get(CITATION), Some("Smith 1999"));
        assert_eq!(
            m.get_all(CITATION).collect::<Vec<_>>(),
            vec!["Smith 1999", "Doe 2001: 4"]
        );
        assert_eq!(m.len(), 3);
        assert_eq!(m.get("missing"), None);
    }

    #[test]
    fn get_outlives_key() {
        let mut m = Metadata::default();
        m.add(LANGUAGE, "Japanese");
        let value = {
            let key = String::from(LANGUAGE);
            m.get(&key)
        };
        assert_eq!(value, Some("Japanese"));
    }
}
