/*! IGT transformers.

Transforms instances by adding tiers: [Cleaner] builds the cleaned tier from the raw one,
[Normalizer] builds the normalized tier by running ordered [Pass]es on the cleaned (or raw) tier.

Passes that only look at one line at a time are written as [LineRule]s
and run through [PerLine].
!*/

mod blank;
mod citation;
mod cleaner;
mod deindent;
mod dewrap;
mod example_number;
mod hyphen;
mod judgment;
mod language;
mod normalizer;
mod rejoin;
mod secondary;
mod transform;
mod unquote;

pub use blank::RemoveBlanks;
pub use citation::ExtractCitations;
pub use cleaner::Cleaner;
pub use deindent::Deindent;
pub use dewrap::Dewrap;
pub use example_number::StripExampleNumbers;
pub use hyphen::RejoinHyphens;
pub use judgment::ExtractJudgments;
pub use language::ExtractLanguage;
pub use normalizer::Normalizer;
pub use rejoin::RejoinWrapped;
pub use secondary::SplitTranslations;
pub use transform::{Context, LineRule, Pass, PerLine, Rewrite, Stage, Transform};
pub use unquote::Unquote;

