//! Tier de-indentation.
//!
//! Shifts every data, comment and unclassified line left by the tier's minimum indentation,
//! keeping relative indentation (hence column alignment) intact.
//! Metadata lines are trimmed instead, and blank lines do not count.
use crate::igt::columns::drop_columns;
use crate::igt::Line;

use super::{Context, Pass, Stage};

#[derive(Default)]
pub struct Deindent;

fn is_shifted(line: &Line) -> bool {
    let tag = line.tag();
    !(tag.is_metadata() || tag.is_blank())
}

/// Minimum indentation over the lines that get shifted, ignoring empty ones.
pub fn min_indent(lines: &[Line]) -> usize {
    lines
        .iter()
        .filter(|line| is_shifted(line) && !line.is_empty())
        .map(Line::indent)
        .min()
        .unwrap_or(0)
}

impl Pass for Deindent {
    fn name(&self) -> &'static str {
        "deindent"
    }

    fn stage(&self) -> Stage {
        Stage::Deindent
    }

    fn apply(&self, mut lines: Vec<Line>, _ctx: &mut Context) -> Vec<Line> {
        let shift = min_indent(&lines);
        for line in lines.iter_mut() {
            if line.tag().is_metadata() {
                let trimmed = line.text().trim().to_string();
                line.set_text(trimmed);
            } else if shift > 0 && is_shifted(line) {
                let shifted = drop_columns(line.text(), shift);
                line.set_text(shifted);
            }
        }
        lines
    }
}
