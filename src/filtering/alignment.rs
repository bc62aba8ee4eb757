//! Token alignment between two lines.
//!
//! Two lines are aligned when:
//! - they share a data kind (an `L+CR` line can align with `L` or `L-G`, not with `G`),
//! - they have the same, non-zero, number of whitespace-separated tokens,
//! - each token pair shares at least `min_overlap` columns.
//!
//! Exact span equality is not required, so that a few columns of drift
//! introduced by text extraction are tolerated.
use itertools::Itertools;
use log::debug;

use crate::igt::Line;

use super::Filter;

pub struct Alignment {
    min_overlap: usize,
}

impl Alignment {
    /// specify a minimum overlap (in columns)
    pub fn with_min_overlap(min_overlap: usize) -> Self {
        Self {
            min_overlap: min_overlap.max(1),
        }
    }
}

impl Default for Alignment {
    /// Tokens need to share a single column by default.
    fn default() -> Self {
        Self { min_overlap: 1 }
    }
}

impl Filter<(&Line, &Line)> for Alignment {
    fn detect(&self, (a, b): (&Line, &Line)) -> bool {
        if !a.tag().shares_kind(b.tag()) {
            return false;
        }

        let (tokens_a, tokens_b) = (a.tokens(), b.tokens());
        if tokens_a.is_empty() || tokens_a.len() != tokens_b.len() {
            debug!(
                "token count mismatch ({} vs {}): {:?} / {:?}",
                tokens_a.len(),
                tokens_b.len(),
                a.text(),
                b.text()
            );
            return false;
        }

        let misaligned = tokens_a
            .iter()
            .zip_eq(tokens_b.iter())
            .find(|(ta, tb)| ta.overlap(tb) < self.min_overlap);
        if let Some((ta, tb)) = misaligned {
            debug!(
                "tokens {:?} [{}, {}) and {:?} [{}, {}) do not overlap",
                ta.text, ta.start, ta.end, tb.text, tb.start, tb.end
            );
            return false;
        }
        true
    }
}

/// Convenience function for the default [Alignment].
pub fn aligned(a: &Line, b: &Line) -> bool {
    Alignment::default().detect((a, b))
}

#[cfg(test)]
mod tests {
    use crate::igt::{Line, Tag};

    use super::*;

    fn line(tag: &str, text: &str) -> Line {
        Line::new(tag.to_string().into(), text)
    }

    #[test]
    fn identical_spans_align() {
        assert!(aligned(&line("L", "the  dog"), &line("L+CR", "abc  xyz")));
    }

    #[test]
    fn drift_is_tolerated() {
        assert!(aligned(&line("G", "  dog-PL  run"), &line("G+CR", "dog     runs")));
    }

    #[test]
    fn count_mismatch() {
        assert!(!aligned(&line("L", "the  dog"), &line("L+CR", "runs")));
    }

    #[test]
    fn disjoint_tokens() {
        assert!(!aligned(&line("L", "ab    cd"), &line("L+CR", "   x    y")));
    }

    #[test]
    fn different_kinds() {
        assert!(!aligned(&line("L", "the dog"), &line("G+CR", "the dog")));
    }

    #[test]
    fn blank_never_aligns() {
        assert!(!aligned(&line("B", "   "), &line("B", "")));
        assert!(!aligned(&Line::new(Tag::lexical(), ""), &line("L+CR", "")));
    }

    #[test]
    fn min_overlap() {
        let a = line("L", "abcd");
        let b = line("L+CR", "   xy");
        assert!(Alignment::default().detect((&a, &b)));
        assert!(!Alignment::with_min_overlap(2).detect((&a, &b)));
    }
}
