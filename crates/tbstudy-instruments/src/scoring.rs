use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InstrumentError;

/// Inclusive range of values a single questionnaire item accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemDomain {
    pub min: u8,
    pub max: u8,
}

impl ItemDomain {
    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Invert polarity: `(max + min) - value`. Only meaningful for values
    /// inside the domain, which map back onto the domain.
    pub fn reverse(&self, value: u8) -> u8 {
        (u16::from(self.max) + u16::from(self.min) - u16::from(value)) as u8
    }
}

/// Ordinal interpretation of a literacy total. Ordered `Low < Moderate < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Band {
    Low,
    Moderate,
    High,
}

impl Band {
    pub fn label(&self) -> &'static str {
        match self {
            Band::Low => "Low",
            Band::Moderate => "Moderate",
            Band::High => "High",
        }
    }

    /// Anything short of High is flagged for extra support with digital
    /// TB care tools.
    pub fn needs_support(&self) -> bool {
        *self != Band::High
    }

    pub fn interpretation(&self) -> &'static str {
        if self.needs_support() {
            "May need extra support with digital TB care tools"
        } else {
            "Can likely use digital TB care tools effectively"
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower bound (inclusive) of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BandThreshold {
    pub min_total: u32,
    pub band: Band,
}

/// A single questionnaire item as presented to the participant.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemPrompt {
    pub id: String,
    pub prompt: String,
    /// Labels for each response option, indexed from `domain.min`.
    pub options: Vec<String>,
}

/// Fixed description of one instrument variant.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstrumentSpec {
    /// Column prefix used on export, e.g. `DHLI` gives `DHLI_Q1`.
    pub column_prefix: String,
    pub domain: ItemDomain,
    pub items: Vec<ItemPrompt>,
    /// Zero-based item indices summed into the formal total.
    pub scored_items: Vec<usize>,
    /// Zero-based item indices whose polarity is inverted at write time.
    pub reverse_scored: Vec<usize>,
    /// Ordered from the highest band down.
    pub bands: Vec<BandThreshold>,
}

impl InstrumentSpec {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_scored(&self, item_index: usize) -> bool {
        self.scored_items.contains(&item_index)
    }

    pub fn is_reverse_scored(&self, item_index: usize) -> bool {
        self.reverse_scored.contains(&item_index)
    }

    /// Value an item holds before the participant answers it.
    pub fn default_value(&self) -> u8 {
        self.domain.min
    }

    /// Theoretical `[min, max]` of the formal total.
    pub fn total_range(&self) -> (u32, u32) {
        let n = self.scored_items.len() as u32;
        (
            u32::from(self.domain.min) * n,
            u32::from(self.domain.max) * n,
        )
    }

    /// Check a raw response and return the value to store for it.
    pub fn score_item(&self, item_index: usize, raw_value: u8) -> Result<u8, InstrumentError> {
        if item_index >= self.item_count() {
            return Err(InstrumentError::UnknownItem {
                item_index,
                item_count: self.item_count(),
            });
        }
        self.check_value(item_index, raw_value)?;
        if self.is_reverse_scored(item_index) {
            Ok(self.domain.reverse(raw_value))
        } else {
            Ok(raw_value)
        }
    }

    pub(crate) fn check_value(&self, item_index: usize, value: u8) -> Result<(), InstrumentError> {
        if self.domain.contains(value) {
            Ok(())
        } else {
            Err(InstrumentError::OutOfRange {
                item_index,
                value,
                min: self.domain.min,
                max: self.domain.max,
            })
        }
    }

    /// Option label of the answer behind a stored score. Reverse-scored
    /// items are flipped back to the raw answer first.
    pub fn answer_label(&self, item_index: usize, stored: u8) -> Option<&str> {
        let raw = if self.is_reverse_scored(item_index) {
            self.domain.reverse(stored)
        } else {
            stored
        };
        let offset = usize::from(raw.checked_sub(self.domain.min)?);
        self.items
            .get(item_index)?
            .options
            .get(offset)
            .map(String::as_str)
    }

    /// Map a total onto its band, walking thresholds from the highest.
    pub fn classify(&self, total: u32) -> Result<Band, InstrumentError> {
        let (min, max) = self.total_range();
        let invalid = InstrumentError::InvalidScore { total, min, max };
        if total < min || total > max {
            return Err(invalid);
        }
        self.bands
            .iter()
            .find(|t| total >= t.min_total)
            .map(|t| t.band)
            .ok_or(invalid)
    }
}

/// One row of the per-item score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemBreakdown {
    /// One-based, as shown to the operator.
    pub item_number: usize,
    pub item_id: String,
    pub prompt: String,
    /// Label of the option the participant chose.
    pub answer: String,
    pub score: u8,
    pub scored: bool,
    pub reverse_scored: bool,
}
