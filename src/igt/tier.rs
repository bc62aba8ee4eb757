use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Line;

/// Processing state of a tier.
///
/// Ordering follows derivation: `Raw < Cleaned < Normalized`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TierState {
    Raw,
    Cleaned,
    Normalized,
}

impl fmt::Display for TierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TierState::Raw => "raw",
            TierState::Cleaned => "cleaned",
            TierState::Normalized => "normalized",
        };
        write!(f, "{}", s)
    }
}

/// Ordered lines of a given state. Line order is source document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Tier {
    state: TierState,
    /// State of the tier this one was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alignment: Option<TierState>,
    lines: Vec<Line>,
}

impl Tier {
    pub fn new(state: TierState, lines: Vec<Line>) -> Self {
        Self {
            state,
            alignment: None,
            lines,
        }
    }

    pub fn derived(state: TierState, from: TierState, lines: Vec<Line>) -> Self {
        Self {
            state,
            alignment: Some(from),
            lines,
        }
    }

    pub fn state(&self) -> TierState {
        self.state
    }

    pub fn alignment(&self) -> Option<TierState> {
        self.alignment
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
