//! Rejoins translations wrapped over several physical lines.
//!
//! A `T+CR` line that the cleaner could not merge is appended to the translation
//! line preceding it (blank lines in-between are skipped), with a single space at the join.
use log::trace;

use crate::igt::{Line, Secondary};

use super::{Context, Pass, Stage};

#[derive(Default)]
pub struct RejoinWrapped;

impl Pass for RejoinWrapped {
    fn name(&self) -> &'static str {
        "rejoin-wrapped"
    }

    fn stage(&self) -> Stage {
        Stage::RejoinWrapped
    }

    fn apply(&self, lines: Vec<Line>, _ctx: &mut Context) -> Vec<Line> {
        let mut out: Vec<Line> = Vec::with_capacity(lines.len());
        for line in lines {
            let is_wrapped = line.tag().is_translation() && line.tag().is_continuation();
            let target = out
                .iter()
                .rposition(|l| !(l.tag().is_blank() || l.is_empty()))
                .filter(|&idx| out[idx].tag().is_translation());

            match target {
                Some(idx) if is_wrapped => {
                    let target = &mut out[idx];
                    trace!("rejoining {:?} to {:?}", line.text(), target.text());
                    let joined = format!("{} {}", target.text().trim_end(), line.text().trim());
                    target.set_text(joined);
                    target.tag_mut().merge(line.tag());
                    target.tag_mut().remove_secondary(&Secondary::Cr);
                    target.add_source_lines(line.source_lines());
                }
                _ => out.push(line),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::igt::{Line, Metadata};

    use super::*;

    fn run(lines: Vec<Line>) -> Vec<Line> {
        let mut metadata = Metadata::default();
        let mut ctx = Context {
            language: None,
            metadata: &mut metadata,
        };
        RejoinWrapped.apply(lines, &mut ctx)
    }

    fn line(tag: &str, text: &str) -> Line {
        Line::new(tag.to_string().into(), text)
    }

    #[test]
    fn wrapped_translation() {
        let out = run(vec![
            line("L", "inu ga hashiru"),
            line("T", "  'the dog   "),
            line("B", ""),
            line("T+CR", "     runs'"),
        ]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].text(), "  'the dog runs'");
        assert_eq!(out[1].tag().to_string(), "T");
    }

    #[test]
    fn orphan_continuation_is_kept() {
        let out = run(vec![line("L", "inu"), line("T+CR", "dog")]);
        assert_eq!(out.len(), 2);
        assert!(out[1].tag().is_continuation());
    }

    #[test]
    fn unwrapped_lines_untouched() {
        let lines = vec![line("T", "'a dog'  "), line("T", "'another'")];
        assert_eq!(run(lines.clone()), lines);
    }
}
