//! Language identification from ODIN headers.
//!
//! ODIN instances carry their language in several header fields, filled at different
//! stages of the ODIN construction. They are looked at in order of preference:
//!
//! 1. `language: Name (code)`
//! 2. `stage3_lang_chosen: Name (code)`
//! 3. `stage2_lang_chosen: Name (code)`
//! 4. `stage2_LN_lang_code: Name (x, code)`, first `||`-separated alternative
//! 5. `lang_code: A (a)||B (b)` indexed by `lang_chosen_idx=N` in the `note:` field.
//!
use std::collections::HashMap;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::config::Config;
use crate::igt::Language;

lazy_static! {
    static ref LANG_CHOSEN_RE: Regex = Regex::new(r"(?P<name>.*) \((?P<code>[^)]+)\)\s*$").unwrap();
    static ref STAGE2_LN_RE: Regex =
        Regex::new(r"^\s*(?P<name>.*) \([^,]+, (?P<code>[^)]+)\)").unwrap();
    static ref CHOSEN_IDX_RE: Regex = Regex::new(r"lang_chosen_idx=(?P<idx>-?[0-9]+)").unwrap();
}

/// Header keys holding a `Name (code)` pair, by order of preference.
const CHOSEN_KEYS: [&str; 3] = ["language", "stage3_lang_chosen", "stage2_lang_chosen"];

/// Split `key: value` header lines. The last occurrence of a key wins.
fn header_fields<'a>(lines: &'a [String]) -> HashMap<&'a str, &'a str> {
    lines
        .iter()
        .filter_map(|line| line.split_once(':'))
        .collect()
}

/// Capitalize the first letter of each word, lowercase the others.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

fn from_captures(name: &str, code: &str) -> Language {
    Language::new(title_case(name.trim()), code.trim().to_lowercase())
}

fn chosen(fields: &HashMap<&str, &str>) -> Option<Language> {
    CHOSEN_KEYS.iter().find_map(|key| {
        fields
            .get(key)
            .and_then(|value| LANG_CHOSEN_RE.captures(value))
            .map(|caps| from_captures(&caps["name"], &caps["code"]))
    })
}

fn stage2_ln(fields: &HashMap<&str, &str>) -> Option<Language> {
    let value = fields.get("stage2_LN_lang_code")?;
    let first = value.split("||").next()?;
    STAGE2_LN_RE
        .captures(first)
        .map(|caps| from_captures(&caps["name"], &caps["code"]))
}

fn indexed(fields: &HashMap<&str, &str>) -> Option<Language> {
    let codes = fields.get("lang_code")?;
    let note = fields.get("note")?;
    let idx: i64 = CHOSEN_IDX_RE.captures(note)?["idx"].parse().ok()?;
    if idx < 0 {
        return None;
    }
    let alternative = codes.split("||").nth(idx as usize)?;
    LANG_CHOSEN_RE
        .captures(alternative.trim_start())
        .map(|caps| from_captures(&caps["name"], &caps["code"]))
}

/// Best language match among the header lines of an instance.
///
/// Returns the undetermined language when no field gives one.
pub fn best_match(header_lines: &[String]) -> Language {
    let fields = header_fields(header_lines);
    if let Some(language) = chosen(&fields) {
        return language;
    }
    // the note index is only looked at when there is no stage2 LN field
    let fallback = if fields.contains_key("stage2_LN_lang_code") {
        stage2_ln(&fields)
    } else {
        indexed(&fields)
    };
    fallback.unwrap_or_else(Language::undetermined)
}

/// Log annotator comments found in the header lines of an instance.
pub fn log_comments(config: &Config, doc_id: &str, line_range: &str, header_lines: &[String]) {
    let comments: Vec<&str> = header_lines
        .iter()
        .filter_map(|line| {
            line.split_once(':')
                .filter(|(key, _)| config.is_comment_key(key))
                .map(|_| line.as_str())
        })
        .collect();
    if comments.is_empty() {
        return;
    }
    match config.comment_verbosity {
        0 => debug!(
            "doc_id={} lines={} has {} annotator comments",
            doc_id,
            line_range,
            comments.len()
        ),
        1 => info!(
            "doc_id={} lines={} has {} annotator comments",
            doc_id,
            line_range,
            comments.len()
        ),
        _ => info!(
            "doc_id={} lines={} has annotator comments:\n  {}",
            doc_id,
            line_range,
            comments.join("\n  ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn language_field_first() {
        let header = lines(&[
            "stage2_lang_chosen: french (fra)",
            "language: JAPANESE (JPN)",
        ]);
        assert_eq!(best_match(&header), Language::new("Japanese", "jpn"));
    }

    #[test]
    fn stage_fields() {
        let header = lines(&["stage3_lang_chosen: old english (ang)"]);
        assert_eq!(best_match(&header), Language::new("Old English", "ang"));

        let header = lines(&["stage2_LN_lang_code: mandarin (cmn, cmn)||chinese (zho, zho)"]);
        assert_eq!(best_match(&header), Language::new("Mandarin", "cmn"));
    }

    #[test]
    fn chosen_index() {
        let header = lines(&[
            "lang_code: german (deu)||dutch (nld)",
            "note: lang_chosen_idx=1",
        ]);
        assert_eq!(best_match(&header), Language::new("Dutch", "nld"));

        let header = lines(&[
            "lang_code: german (deu)||dutch (nld)",
            "note: lang_chosen_idx=-1",
        ]);
        assert!(best_match(&header).is_undetermined());
    }

    #[test]
    fn no_language() {
        assert_eq!(best_match(&[]), Language::undetermined());
        let header = lines(&["language: unknown"]);
        assert_eq!(best_match(&header), Language::undetermined());
    }

    #[test]
    fn title_casing() {
        assert_eq!(title_case("NORTHERN sami"), "Northern Sami");
        assert_eq!(title_case("ge'ez"), "Ge'Ez");
    }
}
