//! Example number removal.
//!
//! Strips IGT-initial numbers and labels from lexical and translation lines:
//! `(1)`, `( 12a )`, `(iv):`, `1.`, `5a.`, `10.1a)`, `b:` and one- or two-word
//! speaker labels (`speaker A:`). A label is only removed when followed by whitespace.
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::igt::columns::{blank_out, column_at};
use crate::igt::{Language, Line};

use super::{LineRule, Rewrite, Stage};

lazy_static! {
    static ref PAREN_NUM_RE: Regex =
        Regex::new(r"^\s*(?P<label>\(\s*(?:[\d.]+\w?|\w|[ivxlc]+)['.:]*\s*\)[.:]*)\s").unwrap();
    static ref NUM_RE: Regex =
        Regex::new(r"^\s*(?P<label>(?:[\d.]+\w?|\w|[ivxlc]+)['.):]+)\s").unwrap();
    static ref SPEAKER_RE: Regex = Regex::new(r"^\s*(?P<label>\w+(?:\s\w+)?\s*:)\s").unwrap();
}

#[derive(Default)]
pub struct StripExampleNumbers;

impl StripExampleNumbers {
    fn strip(re: &Regex, line: &mut Line, column_sensitive: bool) -> bool {
        let text = line.text().to_string();
        let label = match re.captures(&text).and_then(|caps| caps.name("label")) {
            Some(label) => label,
            None => return false,
        };
        trace!("removing example label {:?}", label.as_str());
        if column_sensitive {
            line.set_text(blank_out(
                &text,
                column_at(&text, label.start()),
                column_at(&text, label.end()),
            ));
        } else {
            let rest = text[label.end()..].trim_start();
            line.set_text(format!("{}{}", &text[..label.start()], rest));
        }
        true
    }
}

impl LineRule for StripExampleNumbers {
    fn name(&self) -> &'static str {
        "strip-example-numbers"
    }

    fn stage(&self) -> Stage {
        Stage::StripExampleNumbers
    }

    fn rewrite(&self, mut line: Line, _language: Option<&Language>) -> Rewrite {
        let tag = line.tag();
        if !(tag.is_lexical() || tag.is_translation()) {
            return Rewrite::keep(line);
        }
        let column_sensitive = tag.is_lexical() || tag.is_gloss();

        if !Self::strip(&PAREN_NUM_RE, &mut line, column_sensitive) {
            Self::strip(&NUM_RE, &mut line, column_sensitive);
        }
        Self::strip(&SPEAKER_RE, &mut line, column_sensitive);
        Rewrite::keep(line)
    }
}
