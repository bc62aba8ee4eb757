//! Language name extraction.
//!
//! When ingestion supplied a language for the instance, it is recorded as an `M+LN` line
//! and as `language`/`iso-639-3` metadata. Data lines tagged `+LN` also lose a leading
//! language-name label (`Japanese: inu ga hashiru`).
//! Instances without a language, or with an undetermined one, are left alone.
use log::trace;

use crate::igt::columns::{blank_out, column_at};
use crate::igt::metadata::{ISO_639_3, LANGUAGE};
use crate::igt::{Language, Line, Secondary, Tag};

use super::{Context, Pass, Stage};

#[derive(Default)]
pub struct ExtractLanguage;

impl Pass for ExtractLanguage {
    fn name(&self) -> &'static str {
        "extract-language"
    }

    fn stage(&self) -> Stage {
        Stage::ExtractLanguage
    }

    fn apply(&self, lines: Vec<Line>, ctx: &mut Context) -> Vec<Line> {
        let language = match ctx.language {
            Some(language) if !language.is_undetermined() => language,
            _ => {
                trace!("no language to extract");
                return lines;
            }
        };

        let mut out: Vec<Line> = lines
            .into_iter()
            .map(|line| strip_language_label(line, language))
            .collect();

        let text = format!("{} ({})", language.name(), language.code());
        out.push(Line::new(Tag::metadata().with_secondary(Secondary::Ln), text));
        ctx.metadata.add(LANGUAGE, language.name());
        ctx.metadata.add(ISO_639_3, language.code());
        out
    }
}

fn strip_language_label(mut line: Line, language: &Language) -> Line {
    if !(line.tag().is_data() && line.tag().has_secondary(&Secondary::Ln)) {
        return line;
    }

    let text = line.text().to_string();
    let start = text.len() - text.trim_start().len();
    let name = language.name();
    let matches = text[start..]
        .get(..name.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(name));
    if !matches {
        return line;
    }

    // the label ends after the name and its punctuation
    let rest = &text[start + name.len()..];
    let punctuation = rest.len()
        - rest
            .trim_start_matches(|c: char| c == ':' || c == '.' || c == ' ')
            .len();
    let label_end = start + name.len() + punctuation;

    let column_sensitive = line.tag().is_lexical() || line.tag().is_gloss();
    if column_sensitive {
        line.set_text(blank_out(
            &text,
            column_at(&text, start),
            column_at(&text, label_end),
        ));
    } else {
        line.set_text(format!("{}{}", &text[..start], &text[label_end..]));
    }
    line
}
