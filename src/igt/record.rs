use std::collections::BTreeMap;

use log::warn;
use oxilangtag::LanguageTag;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::{Line, Metadata, Tier, TierState};

/// Language name and ISO-639-3 code pair, as supplied by ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Language {
    name: String,
    code: String,
}

impl Language {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// Placeholder used when no language could be found.
    pub fn undetermined() -> Self {
        Self::new("(Undetermined)", "und")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_undetermined(&self) -> bool {
        self.code == "und"
    }

    /// Parse the code as a language tag, ensuring it is well-formed.
    pub fn tag(&self) -> Result<LanguageTag<String>, Error> {
        Ok(LanguageTag::parse(self.code.clone())?)
    }
}

/// An IGT instance.
///
/// Tiers are only ever added: [Igt::add_tier] refuses to replace an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Igt {
    doc_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    igt_id: Option<String>,
    /// first and last source lines, as written in the ODIN header (`"12 15"`).
    #[serde(default)]
    line_range: String,
    #[serde(default)]
    line_types: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<Language>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    header_lines: Vec<String>,
    tiers: BTreeMap<TierState, Tier>,
    #[serde(default)]
    metadata: Metadata,
}

impl Igt {
    /// Create an instance holding only a raw tier.
    pub fn new(doc_id: impl Into<String>, raw: Vec<Line>) -> Self {
        let mut tiers = BTreeMap::new();
        tiers.insert(TierState::Raw, Tier::new(TierState::Raw, raw));
        Self {
            doc_id: doc_id.into(),
            igt_id: None,
            line_range: String::new(),
            line_types: String::new(),
            language: None,
            header_lines: Vec::new(),
            tiers,
            metadata: Metadata::default(),
        }
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    pub fn igt_id(&self) -> Option<&str> {
        self.igt_id.as_deref()
    }

    pub fn set_igt_id(&mut self, igt_id: impl Into<String>) {
        self.igt_id = Some(igt_id.into());
    }

    pub fn line_range(&self) -> &str {
        &self.line_range
    }

    pub fn line_types(&self) -> &str {
        &self.line_types
    }

    pub fn set_span(&mut self, line_range: impl Into<String>, line_types: impl Into<String>) {
        self.line_range = line_range.into();
        self.line_types = line_types.into();
    }

    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }

    pub fn set_language(&mut self, language: Language) {
        if let Err(e) = language.tag() {
            warn!(
                "doc_id={} lines={}: language code {:?} is not well-formed ({})",
                self.doc_id,
                self.line_range,
                language.code(),
                e
            );
        }
        self.language = Some(language);
    }

    pub fn header_lines(&self) -> &[String] {
        &self.header_lines
    }

    pub fn set_header_lines(&mut self, header_lines: Vec<String>) {
        self.header_lines = header_lines;
    }

    /// Get a reference to a tier.
    pub fn tier(&self, state: TierState) -> Option<&Tier> {
        self.tiers.get(&state)
    }

    pub fn has_tier(&self, state: TierState) -> bool {
        self.tiers.contains_key(&state)
    }

    /// Tier used as a normalization base: cleaned if present, raw otherwise.
    pub fn base_tier(&self) -> Option<&Tier> {
        self.tier(TierState::Cleaned)
            .or_else(|| self.tier(TierState::Raw))
    }

    /// Add a tier, returning `false` (and leaving the instance untouched)
    /// if a tier of the same state already exists.
    pub fn add_tier(&mut self, tier: Tier) -> bool {
        if self.tiers.contains_key(&tier.state()) {
            return false;
        }
        self.tiers.insert(tier.state(), tier);
        true
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
