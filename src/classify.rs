//! Line classification.
//!
//! Assigns a [Tag] to each physical line of an instance, from (in that order):
//! - structural tags written by ingestion (`tag=L+CR:content`),
//! - tier markers at the start of the line (`L: content`, `G+CR: content`),
//!   a bare `CR:` (or `+CR:`) marker continuing the kind of the previous line,
//! - annotator comments (`comments: ...`),
//! - blank lines.
//!
//! Anything else is tagged `other` and kept unchanged. Classification never fails.
use lazy_static::lazy_static;
use log::{debug, info, trace};
use regex::Regex;

use crate::config::Config;
use crate::igt::{Line, Primary, Secondary, Tag};

lazy_static! {
    static ref STRUCTURAL_RE: Regex = Regex::new(r"^tag=(?P<tag>[^:\s]+):(?P<content>.*)$").unwrap();
    static ref MARKER_RE: Regex = Regex::new(
        r"^\s*(?P<tag>(?:L-G-T|L-G|L-T|G-T|L|G|T|M|B|C|\+?CR)(?:\+[A-Z]{2})*):(?P<content>.*)$"
    )
    .unwrap();
    static ref HEADER_KEY_RE: Regex = Regex::new(r"^(?P<key>[A-Za-z0-9_]+)\s*:").unwrap();
}

/// Result of classifying a single line: its tag, and the content once markers are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub tag: Tag,
    pub text: String,
}

pub struct Classifier<'a> {
    config: &'a Config,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Classify `line`, knowing the tag of the line preceding it (if any).
    pub fn classify(&self, line: &str, previous: Option<&Tag>) -> Classified {
        if let Some(caps) = STRUCTURAL_RE.captures(line) {
            let tag = resolve_bare_continuation(&caps["tag"], previous);
            return Self::finish(tag, caps["content"].to_string());
        }

        if let Some(caps) = MARKER_RE.captures(line) {
            let tag = resolve_bare_continuation(&caps["tag"], previous);
            return Self::finish(tag, caps["content"].to_string());
        }

        if line.trim().is_empty() {
            return Classified {
                tag: Tag::blank(),
                text: line.to_string(),
            };
        }

        if let Some(caps) = HEADER_KEY_RE.captures(line) {
            if self.config.is_comment_key(&caps["key"]) {
                self.report_comment(line);
                return Classified {
                    tag: Tag::comment(),
                    text: line.to_string(),
                };
            }
        }

        trace!("unrecognized line kept as other: {:?}", line);
        Classified {
            tag: Tag::other(),
            text: line.to_string(),
        }
    }

    fn finish(tag: Tag, text: String) -> Classified {
        if text.trim().is_empty() && !tag.is_blank() {
            // content-less lines are blanks, whatever their marker says
            let mut blank = Tag::blank();
            blank.merge(&tag);
            return Classified { tag: blank, text };
        }
        Classified { tag, text }
    }

    fn report_comment(&self, line: &str) {
        match self.config.comment_verbosity {
            0 => (),
            1 => info!("annotator comment found"),
            _ => info!("annotator comment: {}", line.trim()),
        }
    }

    /// Classify a sequence of lines, chaining tags and linking continuations.
    pub fn classify_lines<'s>(&self, lines: impl IntoIterator<Item = &'s str>) -> Vec<Line> {
        let mut out: Vec<Line> = Vec::new();
        for text in lines {
            let classified = self.classify(text, out.last().map(|l| l.tag()));
            out.push(Line::new(classified.tag, classified.text));
        }
        link_continuations(&mut out);
        out
    }
}

/// `CR` alone (or `+CR`) continues whatever kind the previous line was.
fn resolve_bare_continuation(raw: &str, previous: Option<&Tag>) -> Tag {
    let raw = raw.trim_start_matches('+');
    let tag: Tag = raw.to_string().into();
    match tag.primary() {
        Primary::Other(p) if p == "CR" => {
            let primary = previous
                .map(|p| p.primary().clone())
                .filter(|p| !p.kinds().is_empty())
                .unwrap_or_else(|| Primary::Other(String::new()));
            let mut resolved = Tag::new(primary).with_secondary(Secondary::Cr);
            resolved.merge(&tag);
            resolved
        }
        _ => tag,
    }
}

/// Point each continuation line to the closest preceding non-continuation line of the same kind.
pub fn link_continuations(lines: &mut [Line]) {
    for i in 0..lines.len() {
        if !lines[i].tag().is_continuation() {
            continue;
        }
        let target = (0..i).rev().find(|&j| {
            let candidate = lines[j].tag();
            !candidate.is_continuation() && candidate.shares_kind(lines[i].tag())
        });
        if target.is_none() {
            debug!("continuation line {} has nothing to continue", i);
        }
        lines[i].set_continues(target);
    }
}
