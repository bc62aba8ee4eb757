//! Lexical/gloss dewrapping.
//!
//! Long examples are often hard-wrapped by the source document, giving
//!
//! ```text
//! inu ga
//! dog NOM
//! hashiru
//! run
//! ```
//!
//! instead of a single lexical and a single gloss line. A run of consecutive lexical and
//! gloss lines is cut into blocks, each starting where the first line's tag repeats.
//! When every block has the same tag sequence and the same indentation, the blocks
//! are wraps of the first one and are joined back onto it, column-aligned.
//! Anything else (different shapes or indentations) is left as it is.
use log::debug;

use crate::igt::columns::{drop_columns, width};
use crate::igt::{Line, Primary};

use super::{Context, Pass, Stage};

#[derive(Default)]
pub struct Dewrap;

fn is_wrappable(line: &Line) -> bool {
    let tag = line.tag();
    (tag.is_lexical() || tag.is_gloss()) && !tag.is_translation() && !line.is_empty()
}

/// Cut a run into blocks starting at each repetition of the first line's primary tag.
fn blocks(run: &[Line]) -> Vec<&[Line]> {
    let first = run[0].tag().primary();
    let mut starts: Vec<usize> = run
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| line.tag().primary() == first)
        .map(|(idx, _)| idx)
        .collect();
    starts.insert(0, 0);
    starts.push(run.len());
    starts
        .windows(2)
        .map(|bounds| &run[bounds[0]..bounds[1]])
        .collect()
}

fn shape(block: &[Line]) -> Vec<&Primary> {
    block.iter().map(|line| line.tag().primary()).collect()
}

fn min_indent(block: &[Line]) -> usize {
    block.iter().map(Line::indent).min().unwrap_or(0)
}

/// Join the wrapped blocks of `run`, or return `None` when they are not wraps.
fn dewrap_run(run: &[Line]) -> Option<Vec<Line>> {
    let blocks = blocks(run);
    if blocks.len() < 2 || blocks[0].len() < 2 {
        return None;
    }
    let first_shape = shape(blocks[0]);
    let indent = min_indent(blocks[0]);
    if blocks
        .iter()
        .skip(1)
        .any(|block| shape(block) != first_shape || min_indent(block) != indent)
    {
        debug!("lexical/gloss blocks differ, not dewrapping");
        return None;
    }

    let mut joined: Vec<Line> = blocks[0].to_vec();
    for block in &blocks[1..] {
        let column = joined.iter().map(|line| width(line.text())).max().unwrap_or(0) + 1;
        for (target, line) in joined.iter_mut().zip(block.iter()) {
            let mut text = target.text().to_string();
            let pad = column - width(&text);
            text.extend(std::iter::repeat(' ').take(pad));
            text.push_str(&drop_columns(line.text(), indent));
            target.set_text(text);
            target.tag_mut().merge(line.tag());
            target.add_source_lines(line.source_lines());
        }
    }
    Some(joined)
}

impl Pass for Dewrap {
    fn name(&self) -> &'static str {
        "dewrap"
    }

    fn stage(&self) -> Stage {
        Stage::Dewrap
    }

    fn apply(&self, lines: Vec<Line>, _ctx: &mut Context) -> Vec<Line> {
        let mut out = Vec::with_capacity(lines.len());
        let mut idx = 0;
        while idx < lines.len() {
            let end = lines[idx..]
                .iter()
                .position(|line| !is_wrappable(line))
                .map_or(lines.len(), |len| idx + len);
            if end == idx {
                out.push(lines[idx].clone());
                idx += 1;
                continue;
            }
            match dewrap_run(&lines[idx..end]) {
                Some(joined) => out.extend(joined),
                None => out.extend_from_slice(&lines[idx..end]),
            }
            idx = end;
        }
        out
    }
}
