//! Citation extraction.
//!
//! Parenthesized citations such as `(Smith & Jones 1999: 23-25)` or `(p. 12)`
//! are moved out of data lines into `M+AC` lines, and recorded as `citation` metadata.
//! Matches are leftmost-first and non-overlapping; parentheses that do not look like
//! a citation stay where they are.
//!
//! On lexical and gloss lines the citation is blanked out so that columns do not move.
//! On translation lines it is removed.
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::config::Config;
use crate::error::Error;
use crate::igt::columns::{blank_out, column_at};
use crate::igt::metadata::CITATION;
use crate::igt::{Language, Line, Secondary, Tag};

use super::{LineRule, Rewrite, Stage};

lazy_static! {
    static ref CITATION_RE: Regex = Regex::new(
        r"(?x)
        \(\s*
        (?P<citation>
            [\p{Lu}][\p{L}'.\-]+                          # first author
            (?:,?\s+(?:&|and|et\ al\.?|[\p{Lu}][\p{L}'.\-]+))*  # co-authors
            ,?\s+(?:1[5-9]|20)\d{2}[a-z]?                 # year
            (?:\s*[:,]\s*(?:pp?\.\s*)?\d+(?:\s*[-–]\s*\d+)?)?   # pages
          |
            pp?\.\s*\d+(?:\s*[-–]\s*\d+)?
        )
        \s*\)"
    )
    .unwrap();
}

pub struct ExtractCitations {
    pattern: Regex,
}

impl Default for ExtractCitations {
    fn default() -> Self {
        Self {
            pattern: CITATION_RE.clone(),
        }
    }
}

impl ExtractCitations {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        match &config.citation_pattern {
            Some(pattern) => Ok(Self {
                pattern: Regex::new(pattern)?,
            }),
            None => Ok(Self::default()),
        }
    }
}

impl LineRule for ExtractCitations {
    fn name(&self) -> &'static str {
        "extract-citations"
    }

    fn stage(&self) -> Stage {
        Stage::ExtractCitations
    }

    fn rewrite(&self, mut line: Line, _language: Option<&Language>) -> Rewrite {
        if !line.tag().is_data() {
            return Rewrite::keep(line);
        }

        let text = line.text().to_string();
        let mut citations = Vec::new();
        let mut spans = Vec::new();
        for caps in self.pattern.captures_iter(&text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let citation = caps
                .name("citation")
                .map(|m| m.as_str())
                .unwrap_or_else(|| whole.as_str().trim_matches(|c: char| c == '(' || c == ')'))
                .trim()
                .to_string();
            spans.push((whole.start(), whole.end()));
            citations.push(citation);
        }

        if citations.is_empty() {
            trace!("no citation in {:?}", text);
            return Rewrite::keep(line);
        }

        let column_sensitive = line.tag().is_lexical() || line.tag().is_gloss();
        let rewritten = if column_sensitive {
            spans.iter().rev().fold(text.clone(), |acc, (start, end)| {
                blank_out(&acc, column_at(&text, *start), column_at(&text, *end))
            })
        } else {
            remove_spans(&text, &spans)
        };
        line.set_text(rewritten.trim_end());

        let mut lines = Vec::with_capacity(citations.len() + 1);
        let source_lines = line.source_lines().to_vec();
        lines.push(line);
        let mut metadata = Vec::with_capacity(citations.len());
        for citation in citations {
            let mut meta = Line::new(Tag::metadata().with_secondary(Secondary::Ac), &citation);
            meta.add_source_lines(&source_lines);
            lines.push(meta);
            metadata.push((CITATION.to_string(), citation));
        }
        Rewrite { lines, metadata }
    }
}

/// Cut byte spans out of `text`, leaving a single space where they were.
fn remove_spans(text: &str, spans: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, end) in spans {
        let before = &text[last..*start];
        out.push_str(before.trim_end());
        if !out.trim().is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
        last = *end;
    }
    let rest = text[last..].trim_start();
    if rest.is_empty() {
        out.truncate(out.trim_end().len());
    }
    out.push_str(rest);
    out
}
