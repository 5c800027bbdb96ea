//! tbstudy-instruments
//!
//! Health literacy questionnaire definitions and scoring. Pure data, no
//! I/O. Each instrument fixes its item count, response domain and reverse
//! scoring, plus which items count toward the total and how it is banded.

pub mod error;
pub mod instruments;
pub mod responses;
pub mod scoring;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use error::InstrumentError;
use scoring::{InstrumentSpec, ItemBreakdown};

/// Trait implemented by each literacy instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier (e.g., "dhli", "eheals").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Items, domain, scoring rules and bands.
    fn spec(&self) -> &InstrumentSpec;

    /// Check a full list of raw responses without recording them.
    fn validate_responses(&self, raw: &[u8]) -> Vec<InstrumentError> {
        let spec = self.spec();
        if raw.len() != spec.item_count() {
            return vec![InstrumentError::ResponseCount {
                expected: spec.item_count(),
                actual: raw.len(),
            }];
        }
        raw.iter()
            .enumerate()
            .filter_map(|(index, value)| spec.score_item(index, *value).err())
            .collect()
    }

    /// Format a per-item table as plain text for the review screen.
    fn to_structured_input(&self, breakdown: &[ItemBreakdown]) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for row in breakdown {
            let mut notes = Vec::new();
            if !row.scored {
                notes.push("supplementary");
            }
            if row.reverse_scored {
                notes.push("reverse-scored");
            }
            let suffix = if notes.is_empty() {
                String::new()
            } else {
                format!(" ({})", notes.join(", "))
            };
            output.push_str(&format!(
                "- Q{}: {} = {} ({}){}\n",
                row.item_number, row.prompt, row.score, row.answer, suffix
            ));
        }
        output
    }
}

/// Which instrument a deployment collects. Exactly one is active per
/// configuration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InstrumentKind {
    /// Binary 10-item digital health literacy instrument.
    #[default]
    Dhli,
    /// eHealth literacy scale: 10 five-point items, 8 scored.
    Eheals,
}

impl InstrumentKind {
    pub fn id(self) -> &'static str {
        match self {
            InstrumentKind::Dhli => "dhli",
            InstrumentKind::Eheals => "eheals",
        }
    }

    pub fn spec(self) -> &'static InstrumentSpec {
        match self {
            InstrumentKind::Dhli => instruments::dhli::spec(),
            InstrumentKind::Eheals => instruments::eheals::spec(),
        }
    }

    pub fn instrument(self) -> Box<dyn Instrument> {
        match self {
            InstrumentKind::Dhli => Box::new(instruments::dhli::Dhli),
            InstrumentKind::Eheals => Box::new(instruments::eheals::Eheals),
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for InstrumentKind {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dhli" => Ok(InstrumentKind::Dhli),
            "eheals" => Ok(InstrumentKind::Eheals),
            other => Err(InstrumentError::UnknownInstrument(other.to_string())),
        }
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::dhli::Dhli),
        Box::new(instruments::eheals::Eheals),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
