//! ODIN line tags.
//!
//! A tag is a primary tag (`L`, `G`, `T`, their combinations, `M`, `B` or `C`)
//! optionally followed by `+`-separated secondary tags (`L+CR`, `T+LT`, `M+AC+LN`).
//!
//! Parsing never fails: unknown components are kept verbatim so that they
//! can be written back as they were read.
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Data tiers a primary tag can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Lexical,
    Gloss,
    Translation,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primary {
    Lexical,
    Gloss,
    Translation,
    LexicalGloss,
    LexicalTranslation,
    GlossTranslation,
    LexicalGlossTranslation,
    Metadata,
    Blank,
    Comment,
    /// Unrecognized primary tag, kept as-is.
    Other(String),
}

impl Primary {
    /// Data kinds covered by this primary tag. Empty for non-data tags.
    pub fn kinds(&self) -> &'static [Kind] {
        match self {
            Primary::Lexical => &[Kind::Lexical],
            Primary::Gloss => &[Kind::Gloss],
            Primary::Translation => &[Kind::Translation],
            Primary::LexicalGloss => &[Kind::Lexical, Kind::Gloss],
            Primary::LexicalTranslation => &[Kind::Lexical, Kind::Translation],
            Primary::GlossTranslation => &[Kind::Gloss, Kind::Translation],
            Primary::LexicalGlossTranslation => &[Kind::Lexical, Kind::Gloss, Kind::Translation],
            _ => &[],
        }
    }

    pub fn has(&self, kind: Kind) -> bool {
        self.kinds().contains(&kind)
    }

    /// true if both primaries cover at least one common data kind.
    pub fn shares_kind(&self, other: &Primary) -> bool {
        self.kinds().iter().any(|k| other.has(*k))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Primary::Lexical => "L",
            Primary::Gloss => "G",
            Primary::Translation => "T",
            Primary::LexicalGloss => "L-G",
            Primary::LexicalTranslation => "L-T",
            Primary::GlossTranslation => "G-T",
            Primary::LexicalGlossTranslation => "L-G-T",
            Primary::Metadata => "M",
            Primary::Blank => "B",
            Primary::Comment => "C",
            Primary::Other(s) => s,
        }
    }
}

impl From<&str> for Primary {
    fn from(s: &str) -> Self {
        match s {
            "L" => Primary::Lexical,
            "G" => Primary::Gloss,
            "T" => Primary::Translation,
            "L-G" => Primary::LexicalGloss,
            "L-T" => Primary::LexicalTranslation,
            "G-T" => Primary::GlossTranslation,
            "L-G-T" => Primary::LexicalGlossTranslation,
            "M" => Primary::Metadata,
            "B" => Primary::Blank,
            "C" => Primary::Comment,
            other => Primary::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Secondary {
    /// author and citation
    Ac,
    /// alternation
    Al,
    /// construction name
    Cn,
    /// corrupted line, continued from a previous one
    Cr,
    /// double column
    Db,
    /// extra line
    Ex,
    /// language name
    Ln,
    /// literal translation
    Lt,
    /// syntax
    Sy,
    Other(String),
}

impl Secondary {
    pub fn as_str(&self) -> &str {
        match self {
            Secondary::Ac => "AC",
            Secondary::Al => "AL",
            Secondary::Cn => "CN",
            Secondary::Cr => "CR",
            Secondary::Db => "DB",
            Secondary::Ex => "EX",
            Secondary::Ln => "LN",
            Secondary::Lt => "LT",
            Secondary::Sy => "SY",
            Secondary::Other(s) => s,
        }
    }
}

impl From<&str> for Secondary {
    fn from(s: &str) -> Self {
        match s {
            "AC" => Secondary::Ac,
            "AL" => Secondary::Al,
            "CN" => Secondary::Cn,
            "CR" => Secondary::Cr,
            "DB" => Secondary::Db,
            "EX" => Secondary::Ex,
            "LN" => Secondary::Ln,
            "LT" => Secondary::Lt,
            "SY" => Secondary::Sy,
            other => Secondary::Other(other.to_string()),
        }
    }
}

/// Line tag.
///
/// Serialized as its ODIN string form (`L+CR`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Tag {
    primary: Primary,
    secondary: Vec<Secondary>,
}

impl Tag {
    pub fn new(primary: Primary) -> Self {
        Self {
            primary,
            secondary: Vec::new(),
        }
    }

    pub fn with_secondary(mut self, secondary: Secondary) -> Self {
        self.add_secondary(secondary);
        self
    }

    pub fn lexical() -> Self {
        Self::new(Primary::Lexical)
    }

    pub fn gloss() -> Self {
        Self::new(Primary::Gloss)
    }

    pub fn translation() -> Self {
        Self::new(Primary::Translation)
    }

    pub fn metadata() -> Self {
        Self::new(Primary::Metadata)
    }

    pub fn blank() -> Self {
        Self::new(Primary::Blank)
    }

    pub fn comment() -> Self {
        Self::new(Primary::Comment)
    }

    pub fn other() -> Self {
        Self::new(Primary::Other(String::new()))
    }

    /// Get a reference to the tag's primary.
    pub fn primary(&self) -> &Primary {
        &self.primary
    }

    /// Get a reference to the tag's secondary tags.
    pub fn secondary(&self) -> &[Secondary] {
        &self.secondary
    }

    pub fn has_secondary(&self, secondary: &Secondary) -> bool {
        self.secondary.contains(secondary)
    }

    /// Add a secondary tag, keeping each one once.
    pub fn add_secondary(&mut self, secondary: Secondary) {
        if !self.has_secondary(&secondary) {
            self.secondary.push(secondary);
        }
    }

    pub fn remove_secondary(&mut self, secondary: &Secondary) {
        self.secondary.retain(|s| s != secondary);
    }

    pub fn is_continuation(&self) -> bool {
        self.has_secondary(&Secondary::Cr)
    }

    pub fn is_lexical(&self) -> bool {
        self.primary.has(Kind::Lexical)
    }

    pub fn is_gloss(&self) -> bool {
        self.primary.has(Kind::Gloss)
    }

    pub fn is_translation(&self) -> bool {
        self.primary.has(Kind::Translation)
    }

    /// L, G or T (or a combination of them).
    pub fn is_data(&self) -> bool {
        !self.primary.kinds().is_empty()
    }

    pub fn is_metadata(&self) -> bool {
        self.primary == Primary::Metadata
    }

    pub fn is_blank(&self) -> bool {
        self.primary == Primary::Blank
    }

    pub fn is_comment(&self) -> bool {
        self.primary == Primary::Comment
    }

    pub fn is_other(&self) -> bool {
        matches!(self.primary, Primary::Other(_))
    }

    /// true if both tags share a data kind (ignoring secondary tags).
    pub fn shares_kind(&self, other: &Tag) -> bool {
        self.primary.shares_kind(&other.primary)
    }

    /// Union of secondary tags, keeping `self`'s primary.
    pub fn merge(&mut self, other: &Tag) {
        for s in &other.secondary {
            self.add_secondary(s.clone());
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary.as_str())?;
        for s in &self.secondary {
            write!(f, "+{}", s.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for Tag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('+');
        let primary = Primary::from(parts.next().unwrap_or_default());
        let mut tag = Tag::new(primary);
        for part in parts.filter(|p| !p.is_empty()) {
            tag.add_secondary(Secondary::from(part));
        }
        Ok(tag)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(tag) => tag,
            Err(never) => match never {},
        }
    }
}

impl From<Tag> for String {
    fn from(t: Tag) -> Self {
        t.to_string()
    }
}

impl JsonSchema for Tag {
    fn schema_name() -> String {
        "Tag".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let tag: Tag = "L-G+CR+AC".parse().unwrap();
        assert_eq!(tag.primary(), &Primary::LexicalGloss);
        assert!(tag.is_continuation());
        assert!(tag.has_secondary(&Secondary::Ac));
        assert_eq!(tag.to_string(), "L-G+CR+AC");
    }

    #[test]
    fn unknown_parts_are_kept() {
        let tag: Tag = "Q+ZZ".parse().unwrap();
        assert!(tag.is_other());
        assert_eq!(tag.to_string(), "Q+ZZ");
    }

    #[test]
    fn shares_kind() {
        let lg: Tag = "L-G".parse().unwrap();
        let g: Tag = "G+CR".parse().unwrap();
        let t: Tag = "T".parse().unwrap();
        assert!(lg.shares_kind(&g));
        assert!(!g.shares_kind(&t));
        assert!(!Tag::metadata().shares_kind(&Tag::metadata()));
    }

    #[test]
    fn serde_as_string() {
        let tag: Tag = "T+LT".parse().unwrap();
        let s = serde_json::to_string(&tag).unwrap();
        assert_eq!(s, "\"T+LT\"");
        let back: Tag = serde_json::from_str(&s).unwrap();
        assert_eq!(back, tag);
    }
}
