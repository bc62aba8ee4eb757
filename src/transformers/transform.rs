//! Transform and pass traits.
use crate::igt::{Igt, Language, Line, Metadata};

/// Record-level transformation.
pub trait Transform {
    /// Takes ownership of [Igt] and returns it.
    fn transform_own(&self, igt: Igt) -> Igt;
}

/// Position of a normalization pass in the pipeline.
///
/// Passes are column-sensitive and order-dependent: a normalizer only accepts
/// passes in strictly increasing stage order, so blank removal is always last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    RejoinWrapped,
    ExtractCitations,
    ExtractLanguage,
    StripExampleNumbers,
    RejoinHyphens,
    ExtractJudgments,
    SplitTranslations,
    Dewrap,
    Unquote,
    Deindent,
    RemoveBlanks,
}

/// What a pass can see of the instance it works on.
pub struct Context<'a> {
    pub language: Option<&'a Language>,
    /// Metadata extracted so far by this normalization run.
    pub metadata: &'a mut Metadata,
}

/// Tier-level normalization pass.
pub trait Pass: Send + Sync {
    fn name(&self) -> &'static str;
    fn stage(&self) -> Stage;
    fn apply(&self, lines: Vec<Line>, ctx: &mut Context) -> Vec<Line>;
}

/// Result of rewriting a single line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub lines: Vec<Line>,
    pub metadata: Vec<(String, String)>,
}

impl Rewrite {
    /// Line passes through untouched.
    pub fn keep(line: Line) -> Self {
        Self {
            lines: vec![line],
            metadata: Vec::new(),
        }
    }
}

/// Pure line-local rule: a line (and the instance language) in, line(s) and metadata out.
pub trait LineRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn stage(&self) -> Stage;
    fn rewrite(&self, line: Line, language: Option<&Language>) -> Rewrite;
}

/// Runs a [LineRule] over every line of a tier.
pub struct PerLine<R>(pub R);

impl<R: LineRule> Pass for PerLine<R> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn stage(&self) -> Stage {
        self.0.stage()
    }

    fn apply(&self, lines: Vec<Line>, ctx: &mut Context) -> Vec<Line> {
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let rewrite = self.0.rewrite(line, ctx.language);
            out.extend(rewrite.lines);
            for (key, value) in rewrite.metadata {
                ctx.metadata.add(key, value);
            }
        }
        out
    }
}
