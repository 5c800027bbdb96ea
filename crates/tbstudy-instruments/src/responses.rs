use serde::{Deserialize, Serialize};

use crate::error::InstrumentError;
use crate::scoring::{Band, InstrumentSpec, ItemBreakdown};
use crate::InstrumentKind;

/// Stored item scores for one participant on one instrument.
///
/// Values are polarity-corrected when recorded, so the total is always a
/// plain sum over the instrument's scored items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredResponses", into = "StoredResponses")]
pub struct ResponseSet {
    instrument: InstrumentKind,
    values: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredResponses {
    instrument: InstrumentKind,
    values: Vec<u8>,
}

impl ResponseSet {
    /// Every item starts at the domain minimum.
    pub fn new(instrument: InstrumentKind) -> Self {
        let spec = instrument.spec();
        Self {
            instrument,
            values: vec![spec.default_value(); spec.item_count()],
        }
    }

    /// Record a complete list of raw responses in item order.
    pub fn from_raw(instrument: InstrumentKind, raw: &[u8]) -> Result<Self, InstrumentError> {
        let mut set = Self::new(instrument);
        if raw.len() != set.values.len() {
            return Err(InstrumentError::ResponseCount {
                expected: set.values.len(),
                actual: raw.len(),
            });
        }
        for (index, value) in raw.iter().enumerate() {
            set.record_response(index, *value)?;
        }
        Ok(set)
    }

    pub fn instrument(&self) -> InstrumentKind {
        self.instrument
    }

    pub fn spec(&self) -> &'static InstrumentSpec {
        self.instrument.spec()
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn value(&self, item_index: usize) -> Option<u8> {
        self.values.get(item_index).copied()
    }

    /// Store the score for one item and return it. Reverse-scored items
    /// store the transformed value. Other items are untouched.
    pub fn record_response(
        &mut self,
        item_index: usize,
        raw_value: u8,
    ) -> Result<u8, InstrumentError> {
        let score = self.spec().score_item(item_index, raw_value)?;
        self.values[item_index] = score;
        Ok(score)
    }

    pub fn total_score(&self) -> u32 {
        self.spec()
            .scored_items
            .iter()
            .filter_map(|&i| self.values.get(i))
            .map(|&v| u32::from(v))
            .sum()
    }

    pub fn band(&self) -> Result<Band, InstrumentError> {
        self.spec().classify(self.total_score())
    }

    pub fn breakdown(&self) -> Vec<ItemBreakdown> {
        let spec = self.spec();
        spec.items
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(index, (item, &score))| ItemBreakdown {
                item_number: index + 1,
                item_id: item.id.clone(),
                prompt: item.prompt.clone(),
                answer: spec
                    .answer_label(index, score)
                    .unwrap_or_default()
                    .to_string(),
                score,
                scored: spec.is_scored(index),
                reverse_scored: spec.is_reverse_scored(index),
            })
            .collect()
    }
}

impl TryFrom<StoredResponses> for ResponseSet {
    type Error = InstrumentError;

    fn try_from(stored: StoredResponses) -> Result<Self, Self::Error> {
        let spec = stored.instrument.spec();
        if stored.values.len() != spec.item_count() {
            return Err(InstrumentError::ResponseCount {
                expected: spec.item_count(),
                actual: stored.values.len(),
            });
        }
        for (index, value) in stored.values.iter().enumerate() {
            spec.check_value(index, *value)?;
        }
        Ok(Self {
            instrument: stored.instrument,
            values: stored.values,
        })
    }
}

impl From<ResponseSet> for StoredResponses {
    fn from(set: ResponseSet) -> Self {
        Self {
            instrument: set.instrument,
            values: set.values,
        }
    }
}
