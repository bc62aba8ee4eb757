//! Grammaticality judgment extraction.
//!
//! A leading `*`, `?`, `#` (or a combination such as `??` or `*?`) on a lexical
//! line is moved to the line's judgment field and recorded as `judgment` metadata.
//! Lines with an alternation (`/`) keep their marker, since it may apply to a single
//! alternative only.
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::igt::metadata::JUDGMENT;
use crate::igt::{Language, Line};

use super::{LineRule, Rewrite, Stage};

lazy_static! {
    static ref JUDGMENT_RE: Regex =
        Regex::new(r"^(?P<indent>\s*)(?P<judgment>[*?#]+)\s*(?P<rest>.*)$").unwrap();
}

#[derive(Default)]
pub struct ExtractJudgments;

impl LineRule for ExtractJudgments {
    fn name(&self) -> &'static str {
        "extract-judgments"
    }

    fn stage(&self) -> Stage {
        Stage::ExtractJudgments
    }

    fn rewrite(&self, mut line: Line, _language: Option<&Language>) -> Rewrite {
        if !line.tag().is_lexical() || line.tag().is_continuation() {
            return Rewrite::keep(line);
        }

        let original = line.text().to_string();
        let (text, judgment) = match JUDGMENT_RE.captures(&original) {
            Some(caps) => {
                let rest = &caps["rest"];
                if rest.trim().is_empty() || rest.contains('/') {
                    return Rewrite::keep(line);
                }
                (
                    format!("{}{}", &caps["indent"], rest),
                    caps["judgment"].to_string(),
                )
            }
            None => return Rewrite::keep(line),
        };

        trace!("judgment {:?} found on {:?}", judgment, original);
        line.set_text(text);
        line.set_judgment(judgment.clone());
        Rewrite {
            lines: vec![line],
            metadata: vec![(JUDGMENT.to_string(), judgment)],
        }
    }
}
