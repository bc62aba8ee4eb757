//! Hyphenated gram rejoining.
//!
//! Morphemes split by spaces around a hyphen (`dog- NOM`, `dog -s`, `dog - s`) are
//! glued back together on lexical and gloss lines. The joined token keeps the column
//! of its first part, and the following tokens keep theirs: the removed spaces are
//! given back after the joined token, so the paired tier stays aligned.
use crate::igt::columns::{layout, tokens};
use crate::igt::{Language, Line};

use super::{LineRule, Rewrite, Stage};

#[derive(Default)]
pub struct RejoinHyphens;

/// Rejoin hyphen-split tokens of `text`, keeping token columns.
pub fn rejoin(text: &str) -> String {
    let tokens = tokens(text);
    let mut groups: Vec<(usize, String)> = Vec::with_capacity(tokens.len());
    for token in &tokens {
        match groups.last_mut() {
            Some((_, joined)) if joined.ends_with('-') || token.text.starts_with('-') => {
                joined.push_str(token.text)
            }
            _ => groups.push((token.start, token.text.to_string())),
        }
    }
    if groups.len() == tokens.len() {
        return text.to_string();
    }
    layout(groups.iter().map(|(start, text)| (*start, text.as_str())))
}

impl LineRule for RejoinHyphens {
    fn name(&self) -> &'static str {
        "rejoin-hyphens"
    }

    fn stage(&self) -> Stage {
        Stage::RejoinHyphens
    }

    fn rewrite(&self, mut line: Line, _language: Option<&Language>) -> Rewrite {
        if line.tag().is_lexical() || line.tag().is_gloss() {
            let rejoined = rejoin(line.text());
            line.set_text(rejoined);
        }
        Rewrite::keep(line)
    }
}
