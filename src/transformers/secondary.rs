//! Secondary (literal) translation splitting.
//!
//! `'the dog is hungry' (lit. 'the dog has hunger')` becomes two translation lines:
//! the primary one, then a `T+LT` line flagged as secondary.
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::igt::{Language, Line, Secondary};

use super::{LineRule, Rewrite, Stage};

lazy_static! {
    static ref PAREN_LIT_RE: Regex = Regex::new(
        r"(?i)^(?P<primary>.*?\S)\s*[(\[]\s*lit(?:erally\b|\.|\b)\s*[:,]?\s*(?P<literal>[^)\]]*?\S)\s*[)\]]\s*$"
    )
    .unwrap();
    static ref BARE_LIT_RE: Regex = Regex::new(
        r"(?i)^(?P<primary>.*?\S)\s*[,;]?\s+lit\.\s*:?\s*(?P<literal>.*?\S)\s*$"
    )
    .unwrap();
}

#[derive(Default)]
pub struct SplitTranslations;

impl SplitTranslations {
    fn split(text: &str) -> Option<(String, String)> {
        let caps = PAREN_LIT_RE
            .captures(text)
            .or_else(|| BARE_LIT_RE.captures(text))?;
        Some((caps["primary"].to_string(), caps["literal"].to_string()))
    }
}

impl LineRule for SplitTranslations {
    fn name(&self) -> &'static str {
        "split-translations"
    }

    fn stage(&self) -> Stage {
        Stage::SplitTranslations
    }

    fn rewrite(&self, mut line: Line, _language: Option<&Language>) -> Rewrite {
        if !line.tag().is_translation() || line.is_secondary() {
            return Rewrite::keep(line);
        }
        let (primary, literal) = match Self::split(line.text()) {
            Some(split) => split,
            None => return Rewrite::keep(line),
        };
        trace!("literal translation {:?} split from {:?}", literal, primary);

        let indent = &primary[..primary.len() - primary.trim_start().len()];
        let mut tag = line.tag().clone();
        tag.add_secondary(Secondary::Lt);
        let mut secondary = Line::new(tag, format!("{}{}", indent, literal));
        secondary.add_source_lines(line.source_lines());
        secondary.set_secondary(true);

        line.set_text(primary);
        Rewrite {
            lines: vec![line, secondary],
            metadata: Vec::new(),
        }
    }
}
