//! Pipeline configuration.
//!
//! A [Config] is built once (from defaults, an optional JSON file and command line flags)
//! and handed by reference to every stage.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Header keys holding annotator comments in ODIN text files.
pub const COMMENT_KEYS: [&str; 3] = ["comments", "stage2_comment", "not_an_IGT"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 0: annotator comments are not reported,
    /// 1: their presence is reported,
    /// 2: they are reported in full.
    pub comment_verbosity: u8,
    pub comment_keys: Vec<String>,
    /// Minimum number of shared columns for two tokens to be aligned.
    pub min_overlap: usize,
    /// Let the cleaner overlay a continuation line onto its predecessor when their
    /// tokens only fall in each other's whitespace.
    pub interleave_merge: bool,
    /// Replaces the default citation pattern. Must be a parenthesized span.
    pub citation_pattern: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comment_verbosity: 1,
            comment_keys: COMMENT_KEYS.iter().map(|k| k.to_string()).collect(),
            min_overlap: 1,
            interleave_merge: false,
            citation_pattern: None,
        }
    }
}

impl Config {
    /// Load a JSON configuration file. Missing fields take their default value.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let f = File::open(path)?;
        let config: Config = serde_json::from_reader(BufReader::new(f))?;
        config.validate()?;
        debug!("loaded configuration from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Check that user-provided patterns compile.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(pattern) = &self.citation_pattern {
            Regex::new(pattern)?;
        }
        if self.min_overlap == 0 {
            return Err(Error::Custom(
                "min_overlap must be at least 1 column".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_comment_key(&self, key: &str) -> bool {
        self.comment_keys.iter().any(|k| k == key)
    }
}
