//! Translation unquoting.
use log::trace;

use crate::igt::{Language, Line};

use super::{LineRule, Rewrite, Stage};

/// Opening and closing quote pairs.
const QUOTES: [(char, char); 8] = [
    ('\'', '\''),
    ('"', '"'),
    ('`', '\''),
    ('`', '`'),
    ('‘', '’'),
    ('“', '”'),
    ('«', '»'),
    ('„', '“'),
];

#[derive(Default)]
pub struct Unquote;

/// Strip one pair of parentheses around `text`, when the opening one is closed at the end.
///
/// `(abc (def))` loses its outer pair, `(abc) (def)` is left as it is.
fn strip_parens(content: &str) -> Option<&str> {
    let inner = content.strip_prefix('(')?.strip_suffix(')')?;
    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            _ => (),
        }
    }
    (depth == 0).then(|| inner.trim())
}

/// Strip one matching quote pair from `content`.
///
/// Texts looking like two quoted segments (`'yes' or 'no'`) are left as they are.
fn strip_quotes(content: &str) -> Option<&str> {
    let mut chars = content.chars();
    let open = chars.next()?;
    let close = chars.next_back()?;

    if !QUOTES.contains(&(open, close)) {
        return None;
    }
    let inner = &content[open.len_utf8()..content.len() - close.len_utf8()];
    let closing = format!("{} ", close);
    let opening = format!(" {}", open);
    let closed_then_opened = inner
        .find(&closing)
        .map_or(false, |pos| inner[pos + closing.len()..].contains(&opening));
    if closed_then_opened {
        trace!("{:?} holds several quoted segments", content);
        return None;
    }
    Some(inner.trim())
}

/// Strip surrounding parentheses, then one matching quote pair around `text`,
/// keeping its indentation.
///
/// Returns `None` if neither was found.
pub fn unquote(text: &str) -> Option<String> {
    let indent = &text[..text.len() - text.trim_start().len()];
    let content = text.trim();
    let (content, parens) = match strip_parens(content) {
        Some(inner) => (inner, true),
        None => (content, false),
    };
    match strip_quotes(content) {
        Some(inner) => Some(format!("{}{}", indent, inner)),
        None if parens => Some(format!("{}{}", indent, content)),
        None => None,
    }
}

impl LineRule for Unquote {
    fn name(&self) -> &'static str {
        "unquote"
    }

    fn stage(&self) -> Stage {
        Stage::Unquote
    }

    fn rewrite(&self, mut line: Line, _language: Option<&Language>) -> Rewrite {
        if line.tag().is_translation() {
            if let Some(text) = unquote(line.text()) {
                line.set_text(text);
            }
        }
        Rewrite::keep(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_pairs() {
        assert_eq!(unquote("'the dog runs'").as_deref(), Some("the dog runs"));
        assert_eq!(unquote("  \"the dog\"  ").as_deref(), Some("  the dog"));
        assert_eq!(unquote("“the dog”").as_deref(), Some("the dog"));
        assert_eq!(unquote("`the dog'").as_deref(), Some("the dog"));
    }

    #[test]
    fn unmatched_quotes() {
        assert_eq!(unquote("'the dog runs"), None);
        assert_eq!(unquote("the dog runs'"), None);
        assert_eq!(unquote("'the dog\""), None);
        assert_eq!(unquote("'"), None);
        assert_eq!(unquote(""), None);
    }

    #[test]
    fn apostrophes_inside() {
        assert_eq!(
            unquote("'the dogs' bone isn't here'").as_deref(),
            Some("the dogs' bone isn't here")
        );
    }

    #[test]
    fn several_segments() {
        assert_eq!(unquote("'yes' or 'no'"), None);
    }

    #[test]
    fn surrounding_parens() {
        assert_eq!(unquote("('the dog runs')").as_deref(), Some("the dog runs"));
        assert_eq!(unquote("  ( 'the dog' )").as_deref(), Some("  the dog"));
        assert_eq!(unquote("(the dog (a puppy))").as_deref(), Some("the dog (a puppy)"));
        assert_eq!(unquote("(a dog) (a cat)"), None);
        assert_eq!(unquote("'the dog' (a puppy)"), None);
    }

    #[test]
    fn only_translations() {
        let line = Line::new("L".to_string().into(), "'inu'");
        assert_eq!(Unquote.rewrite(line.clone(), None), Rewrite::keep(line));
    }
}
