/*! Normalized tier construction.

The normalizer runs an ordered list of [Pass]es over a copy of the instance's base tier
(cleaned if there is one, raw otherwise) and stores the result as the normalized tier.
Metadata extracted by the passes is appended to the instance's metadata.

Passes are column-sensitive, so their order matters: a normalizer can only be built
from passes in strictly increasing [Stage] order.
!*/
use log::{debug, info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::igt::{Igt, Metadata, Tier, TierState};

use super::blank::RemoveBlanks;
use super::citation::ExtractCitations;
use super::cleaner::igt_label;
use super::deindent::Deindent;
use super::dewrap::Dewrap;
use super::example_number::StripExampleNumbers;
use super::hyphen::RejoinHyphens;
use super::judgment::ExtractJudgments;
use super::language::ExtractLanguage;
use super::rejoin::RejoinWrapped;
use super::secondary::SplitTranslations;
use super::unquote::Unquote;
use super::{Context, Pass, PerLine, Transform};

pub struct Normalizer {
    passes: Vec<Box<dyn Pass>>,
}

impl Normalizer {
    /// Build a normalizer from a custom list of passes.
    ///
    /// Fails if the passes are not in strictly increasing stage order.
    pub fn new(passes: Vec<Box<dyn Pass>>) -> Result<Self, Error> {
        for pair in passes.windows(2) {
            if pair[0].stage() >= pair[1].stage() {
                return Err(Error::PassOrder(format!(
                    "{} ({:?}) cannot run before {} ({:?})",
                    pair[0].name(),
                    pair[0].stage(),
                    pair[1].name(),
                    pair[1].stage()
                )));
            }
        }
        Ok(Self { passes })
    }

    /// Full normalization, with configurable citation extraction.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(all_passes(ExtractCitations::from_config(config)?))
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Add a normalized tier to `igt`.
    ///
    /// Returns `false` if there was nothing to do: no base tier, or a normalized tier already there.
    pub fn normalize(&self, igt: &mut Igt) -> bool {
        if igt.has_tier(TierState::Normalized) {
            warn!("Normalized tier already found for IGT {}", igt_label(igt));
            return false;
        }
        let base = match igt.base_tier() {
            Some(base) => base,
            None => {
                info!(
                    "No cleaned or raw tier found for normalizing for IGT {}",
                    igt_label(igt)
                );
                return false;
            }
        };
        let from = base.state();
        let mut lines = base.lines().to_vec();
        // continuation links point into the base tier
        for line in lines.iter_mut() {
            line.set_continues(None);
        }

        let language = igt.language().cloned();
        let mut metadata = Metadata::default();
        let mut ctx = Context {
            language: language.as_ref(),
            metadata: &mut metadata,
        };
        for pass in &self.passes {
            lines = pass.apply(lines, &mut ctx);
            debug!("{}: {} lines after {}", igt_label(igt), lines.len(), pass.name());
        }

        igt.metadata_mut().extend(metadata);
        igt.add_tier(Tier::derived(TierState::Normalized, from, lines))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            passes: all_passes(ExtractCitations::default()),
        }
    }
}

/// Every pass, in stage order.
fn all_passes(citations: ExtractCitations) -> Vec<Box<dyn Pass>> {
    vec![
        Box::new(RejoinWrapped),
        Box::new(PerLine(citations)),
        Box::new(ExtractLanguage),
        Box::new(PerLine(StripExampleNumbers)),
        Box::new(PerLine(RejoinHyphens)),
        Box::new(PerLine(ExtractJudgments)),
        Box::new(PerLine(SplitTranslations)),
        Box::new(Dewrap),
        Box::new(PerLine(Unquote)),
        Box::new(Deindent),
        Box::new(RemoveBlanks),
    ]
}

impl Transform for Normalizer {
    fn transform_own(&self, mut igt: Igt) -> Igt {
        self.normalize(&mut igt);
        igt
    }
}

#[cfg(test)]
mod tests {
    use crate::filtering::Alignment;
    use crate::filtering::Filter;
    use crate::igt::columns;
    use crate::igt::metadata::{CITATION, ISO_639_3, JUDGMENT};
    use crate::igt::{Language, Line, TierState};
    use crate::transformers::Cleaner;

    use super::*;

    fn line(tag: &str, text: &str, no: usize) -> Line {
        Line::new(tag.to_string().into(), text).with_source_line(no)
    }

    fn sample() -> Igt {
        let mut igt = Igt::new(
            "397",
            vec![
                line("L", "(1) * inu -ga  hashiru (Smith 1999: 12)", 1),
                line("G", "    dog -NOM run", 2),
                line("B", "", 3),
                line("T", "    'the dog runs' (lit. 'dog runs')", 4),
            ],
        );
        igt.set_language(Language::new("Japanese", "jpn"));
        igt
    }

    #[test]
    fn full_normalization() {
        let mut igt = sample();
        assert!(Normalizer::default().normalize(&mut igt));

        let normalized = igt.tier(TierState::Normalized).unwrap();
        assert_eq!(normalized.alignment(), Some(TierState::Raw));
        let texts: Vec<&str> = normalized.lines().iter().map(Line::text).collect();
        assert_eq!(
            texts,
            vec![
                "inu-ga   hashiru",
                "Smith 1999: 12",
                "dog-NOM  run",
                "the dog runs",
                "dog runs",
                "Japanese (jpn)",
            ]
        );
        assert_eq!(normalized.lines()[0].judgment(), Some("*"));
        assert!(normalized.lines()[4].is_secondary());

        assert_eq!(igt.metadata().get(CITATION), Some("Smith 1999: 12"));
        assert_eq!(igt.metadata().get(JUDGMENT), Some("*"));
        assert_eq!(igt.metadata().get(ISO_639_3), Some("jpn"));
    }

    #[test]
    fn lexical_and_gloss_stay_aligned() {
        let mut igt = sample();
        Normalizer::default().normalize(&mut igt);
        let lines = igt.tier(TierState::Normalized).unwrap().lines();
        let (lexical, gloss) = (&lines[0], &lines[2]);
        let starts = |l: &Line| -> Vec<usize> {
            columns::tokens(l.text()).iter().map(|t| t.start).collect()
        };
        assert_eq!(starts(lexical), starts(gloss));
    }

    #[test]
    fn normalization_is_idempotent() {
        let normalizer = Normalizer::default();
        let mut igt = sample();
        assert!(normalizer.normalize(&mut igt));
        let first = igt.clone();
        assert!(!normalizer.normalize(&mut igt));
        assert_eq!(igt, first);
    }

    #[test]
    fn cleaned_tier_is_preferred() {
        let mut igt = Igt::new(
            "1",
            vec![
                line("L", "  Taro-     hon-", 1),
                line("L+CR", "  ga        o", 2),
            ],
        );
        Cleaner::default().clean(&mut igt);
        Normalizer::default().normalize(&mut igt);
        let normalized = igt.tier(TierState::Normalized).unwrap();
        assert_eq!(normalized.alignment(), Some(TierState::Cleaned));
        assert_eq!(normalized.lines()[0].text(), "Taro-ga   hon-o");
    }

    #[test]
    fn deindented_tier_is_flush() {
        let mut igt = sample();
        Normalizer::default().normalize(&mut igt);
        let lines = igt.tier(TierState::Normalized).unwrap().lines();
        assert_eq!(lines.iter().map(Line::indent).min(), Some(0));
    }

    #[test]
    fn blank_removal_must_be_last() {
        let passes: Vec<Box<dyn Pass>> = vec![Box::new(RemoveBlanks), Box::new(Dewrap)];
        assert!(matches!(Normalizer::new(passes), Err(Error::PassOrder(_))));

        let passes: Vec<Box<dyn Pass>> = vec![Box::new(Dewrap), Box::new(Dewrap)];
        assert!(matches!(Normalizer::new(passes), Err(Error::PassOrder(_))));

        let passes: Vec<Box<dyn Pass>> = vec![Box::new(Dewrap), Box::new(RemoveBlanks)];
        let normalizer = Normalizer::new(passes).unwrap();
        assert_eq!(normalizer.pass_names(), vec!["dewrap", "remove-blanks"]);
    }

    #[test]
    fn alignment_is_checked_before_blanks_go() {
        // the continuation is separated from its line by a blank line: it is
        // still merged by the cleaner, which runs on the raw tier with its blanks
        let mut igt = Igt::new(
            "1",
            vec![
                line("L", "ab   cd", 1),
                line("B", "", 2),
                line("L+CR", "xy   zw", 3),
            ],
        );
        assert!(Alignment::default().detect((
            &igt.tier(TierState::Raw).unwrap().lines()[0],
            &igt.tier(TierState::Raw).unwrap().lines()[2]
        )));
        Cleaner::default().clean(&mut igt);
        Normalizer::default().normalize(&mut igt);
        let lines = igt.tier(TierState::Normalized).unwrap().lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "abxy cdzw");
    }

    #[test]
    fn config_with_invalid_pattern() {
        let config = Config {
            citation_pattern: Some("(unclosed".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Normalizer::from_config(&config),
            Err(Error::Regex(_))
        ));
        assert_eq!(
            Normalizer::from_config(&Config::default())
                .unwrap()
                .pass_names()
                .len(),
            11
        );
    }
}
