//! Blank line removal.
use log::trace;

use crate::igt::Line;

use super::{Context, Pass, Stage};

/// Drops blank lines, and lines left without content by earlier passes.
///
/// Has to be the last pass: every column-sensitive pass must have run first.
#[derive(Default)]
pub struct RemoveBlanks;

impl Pass for RemoveBlanks {
    fn name(&self) -> &'static str {
        "remove-blanks"
    }

    fn stage(&self) -> Stage {
        Stage::RemoveBlanks
    }

    fn apply(&self, lines: Vec<Line>, _ctx: &mut Context) -> Vec<Line> {
        let before = lines.len();
        let lines: Vec<Line> = lines
            .into_iter()
            .filter(|line| !(line.tag().is_blank() || line.is_empty()))
            .collect();
        trace!("removed {} blank lines", before - lines.len());
        lines
    }
}
