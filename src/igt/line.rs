use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::columns;
use super::Tag;

/// A physical line of an IGT instance.
///
/// `text` keeps its original indentation: columns are meaningful for
/// the alignment of lexical and gloss lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Line {
    /// Source document line numbers. Merged lines hold more than one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    source_lines: Vec<usize>,
    tag: Tag,
    text: String,
    /// Index (in the same tier) of the line this one continues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    continues: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    judgment: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    secondary: bool,
}

impl Line {
    pub fn new(tag: Tag, text: impl Into<String>) -> Self {
        Self {
            source_lines: Vec::new(),
            tag,
            text: text.into(),
            continues: None,
            judgment: None,
            secondary: false,
        }
    }

    pub fn with_source_line(mut self, line_no: usize) -> Self {
        self.source_lines.push(line_no);
        self
    }

    /// Get a reference to the line's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Get a reference to the line's tag.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut Tag {
        &mut self.tag
    }

    pub fn source_lines(&self) -> &[usize] {
        &self.source_lines
    }

    pub fn add_source_lines(&mut self, lines: &[usize]) {
        self.source_lines.extend_from_slice(lines);
    }

    pub fn continues(&self) -> Option<usize> {
        self.continues
    }

    pub fn set_continues(&mut self, continues: Option<usize>) {
        self.continues = continues;
    }

    pub fn judgment(&self) -> Option<&str> {
        self.judgment.as_deref()
    }

    pub fn set_judgment(&mut self, judgment: impl Into<String>) {
        self.judgment = Some(judgment.into());
    }

    pub fn is_secondary(&self) -> bool {
        self.secondary
    }

    pub fn set_secondary(&mut self, secondary: bool) {
        self.secondary = secondary;
    }

    /// true if the line has no visible content, whatever its tag.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Leading whitespace width, in columns.
    pub fn indent(&self) -> usize {
        columns::indent(&self.text)
    }

    pub fn tokens(&self) -> Vec<columns::Token> {
        columns::tokens(&self.text)
    }
}
