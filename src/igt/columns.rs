//! Column arithmetic on lines.
//!
//! Columns are counted in extended grapheme clusters, so that a base character and
//! its combining diacritics occupy a single column, the way they do on a printed page.
use unicode_segmentation::UnicodeSegmentation;

/// A run of non-whitespace graphemes and its column span `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    /// number of columns shared with `other`.
    pub fn overlap(&self, other: &Token) -> usize {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.saturating_sub(start)
    }
}

pub fn graphemes(s: &str) -> Vec<&str> {
    s.graphemes(true).collect()
}

#[inline]
pub fn is_space(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Width of a line, in columns.
pub fn width(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Leading whitespace width, in columns.
pub fn indent(s: &str) -> usize {
    s.graphemes(true).take_while(|g| is_space(g)).count()
}

/// Whitespace-separated tokens along with their column spans.
pub fn tokens(s: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    let mut col = 0;
    for (byte_idx, g) in s.grapheme_indices(true) {
        if is_space(g) {
            if let Some((byte_start, start)) = current.take() {
                tokens.push(Token {
                    text: &s[byte_start..byte_idx],
                    start,
                    end: col,
                });
            }
        } else if current.is_none() {
            current = Some((byte_idx, col));
        }
        col += 1;
    }
    if let Some((byte_start, start)) = current {
        tokens.push(Token {
            text: &s[byte_start..],
            start,
            end: col,
        });
    }
    tokens
}

/// Replace columns `[start, end)` by spaces, leaving every other column in place.
pub fn blank_out(s: &str, start: usize, end: usize) -> String {
    s.graphemes(true)
        .enumerate()
        .map(|(col, g)| if col >= start && col < end { " " } else { g })
        .collect()
}

/// Remove the first `n` columns.
pub fn drop_columns(s: &str, n: usize) -> String {
    s.graphemes(true).skip(n).collect()
}

/// Column of the grapheme starting at `byte_idx`.
pub fn column_at(s: &str, byte_idx: usize) -> usize {
    s.grapheme_indices(true)
        .take_while(|(b, _)| *b < byte_idx)
        .count()
}

/// Lay `tokens` out on a line, each at its requested column when possible.
///
/// A token that would touch the previous one is pushed right, leaving a single space.
pub fn layout<'a>(tokens: impl IntoIterator<Item = (usize, &'a str)>) -> String {
    let mut line = String::new();
    let mut col = 0;
    for (start, text) in tokens {
        let target = if col == 0 && line.is_empty() {
            start
        } else {
            start.max(col + 1)
        };
        line.extend(std::iter::repeat(' ').take(target - col));
        line.push_str(text);
        col = target + width(text);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_spans() {
        let t = tokens("  the  dog ");
        assert_eq!(
            t,
            vec![
                Token {
                    text: "the",
                    start: 2,
                    end: 5
                },
                Token {
                    text: "dog",
                    start: 7,
                    end: 10
                },
            ]
        );
    }

    #[test]
    fn combining_marks_take_one_column() {
        // e + combining acute accent
        let s = "e\u{301}a b";
        assert_eq!(width(s), 4);
        let t = tokens(s);
        assert_eq!(t[0].end, 2);
        assert_eq!(t[1].start, 3);
    }

    #[test]
    fn indent_and_drop() {
        assert_eq!(indent("   x"), 3);
        assert_eq!(indent(""), 0);
        assert_eq!(drop_columns("   x y", 2), " x y");
    }

    #[test]
    fn blank_out_keeps_columns() {
        assert_eq!(blank_out("(1) dog", 0, 3), "    dog");
    }

    #[test]
    fn layout_pushes_colliding_tokens() {
        assert_eq!(layout(vec![(0, "Taro-ga"), (5, "hon-o")]), "Taro-ga hon-o");
        assert_eq!(layout(vec![(2, "a"), (6, "b")]), "  a   b");
    }
}
