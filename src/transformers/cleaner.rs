/*! Cleaned tier construction.

Corrupted lines (tagged `+CR`) are merged back into the line they continue
when both are aligned (see [crate::filtering::Alignment]):

```text
L:     Taro-     hon-
L+CR:  ga        o
```

becomes

```text
L:     Taro-ga   hon-o
```

Merging is token-wise: each continuation token is appended to the token it overlaps,
and tokens keep their columns unless a grown token would touch the next one.
Lines that do not align are kept as they are, and so are wrapped translations (`T+CR`),
which are free text rather than columns.
!*/
use log::{debug, info, warn};

use crate::classify::link_continuations;
use crate::config::Config;
use crate::filtering::{Alignment, Filter};
use crate::igt::columns::{self, is_space};
use crate::igt::{Igt, Line, Secondary, Tier, TierState};

use super::Transform;

pub struct Cleaner {
    alignment: Alignment,
    interleave_merge: bool,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self {
            alignment: Alignment::default(),
            interleave_merge: false,
        }
    }
}

impl Cleaner {
    pub fn from_config(config: &Config) -> Self {
        Self {
            alignment: Alignment::with_min_overlap(config.min_overlap),
            interleave_merge: config.interleave_merge,
        }
    }

    /// Add a cleaned tier to `igt`.
    ///
    /// Returns `false` if there was nothing to do: no raw tier, or a cleaned tier already there.
    pub fn clean(&self, igt: &mut Igt) -> bool {
        if igt.has_tier(TierState::Cleaned) {
            warn!("Cleaned tier already found for IGT {}", igt_label(igt));
            return false;
        }
        let raw = match igt.tier(TierState::Raw) {
            Some(raw) => raw,
            None => {
                info!("No raw tier found for cleaning for IGT {}", igt_label(igt));
                return false;
            }
        };
        let lines = self.clean_lines(raw.lines());
        igt.add_tier(Tier::derived(TierState::Cleaned, TierState::Raw, lines))
    }

    /// Merge continuation lines into their predecessors when aligned.
    pub fn clean_lines(&self, raw: &[Line]) -> Vec<Line> {
        let mut lines = raw.to_vec();
        link_continuations(&mut lines);

        let mut out: Vec<Line> = Vec::with_capacity(lines.len());
        // position of each raw line in `out`
        let mut positions: Vec<usize> = Vec::with_capacity(lines.len());

        for (idx, mut line) in lines.into_iter().enumerate() {
            let target = line.continues().map(|raw_idx| positions[raw_idx]);

            if let Some(target) = target {
                if let Some(merged) = self.merge(&out[target], &line) {
                    debug!("merged line {} into line {}", idx, target);
                    out[target] = merged;
                    positions.push(target);
                    continue;
                }
                debug!(
                    "continuation line {} not aligned with line {}, kept apart",
                    idx, target
                );
            }

            line.set_continues(target);
            positions.push(out.len());
            out.push(line);
        }
        out
    }

    fn merge(&self, target: &Line, continuation: &Line) -> Option<Line> {
        if !is_columnar(continuation) {
            return None;
        }
        let text = if self.alignment.detect((target, continuation)) {
            merge_tokens(target.text(), continuation.text())
        } else if self.interleave_merge {
            overlay(target.text(), continuation.text())?
        } else {
            return None;
        };

        let mut merged = target.clone();
        merged.set_text(text);
        merged.tag_mut().merge(continuation.tag());
        merged.tag_mut().remove_secondary(&Secondary::Cr);
        merged.add_source_lines(continuation.source_lines());
        Some(merged)
    }
}

impl Transform for Cleaner {
    fn transform_own(&self, mut igt: Igt) -> Igt {
        self.clean(&mut igt);
        igt
    }
}

/// Lexical and gloss lines are laid out in columns, translation-only lines are not.
fn is_columnar(line: &Line) -> bool {
    let tag = line.tag();
    !tag.is_translation() || tag.is_lexical() || tag.is_gloss()
}

/// Concatenate aligned tokens pairwise. Each merged token starts at the leftmost
/// column of the pair.
fn merge_tokens(a: &str, b: &str) -> String {
    let merged: Vec<(usize, String)> = columns::tokens(a)
        .iter()
        .zip(columns::tokens(b).iter())
        .map(|(ta, tb)| (ta.start.min(tb.start), format!("{}{}", ta.text, tb.text)))
        .collect();
    columns::layout(merged.iter().map(|(start, text)| (*start, text.as_str())))
}

/// Overlay two lines column by column. Fails if both lines have content on a same column.
fn overlay(a: &str, b: &str) -> Option<String> {
    let (ga, gb) = (columns::graphemes(a), columns::graphemes(b));
    let len = ga.len().max(gb.len());
    let mut out = String::with_capacity(a.len() + b.len());
    for col in 0..len {
        let ca = ga.get(col).copied().unwrap_or(" ");
        let cb = gb.get(col).copied().unwrap_or(" ");
        match (is_space(ca), is_space(cb)) {
            (false, false) => return None,
            (true, false) => out.push_str(cb),
            _ => out.push_str(ca),
        }
    }
    Some(out.trim_end().to_string())
}

pub(crate) fn igt_label(igt: &Igt) -> String {
    match igt.igt_id() {
        Some(id) => format!("with id: {}", id),
        None => format!("doc_id={} lines={}", igt.doc_id(), igt.line_range()),
    }
}
