use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use tbstudy_instruments::error::InstrumentError;
use tbstudy_instruments::responses::ResponseSet;
use tbstudy_instruments::scoring::Band;
use tbstudy_instruments::InstrumentKind;

use super::demographics::Demographics;
use super::questionnaire::{DelayReasons, Questionnaire};
use crate::columns;
use crate::pathway::{DurationSet, Milestone, PathwayDates, SequenceError, SequencePolicy};

/// Check against medical records, filled in at the end of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Verification {
    pub verified: bool,
    pub notes: String,
}

/// Completion state of each data-collection section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Progress {
    pub demographics: bool,
    pub dates: bool,
    pub delays: bool,
    pub literacy: bool,
    pub verified: bool,
}

/// Everything collected about one participant during one session.
///
/// Milestone dates and literacy responses are only changed through the
/// mutators below so the derived delays and stored scores cannot drift from
/// their inputs.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantRecord {
    pub participant_id: String,
    pub name_initials: String,
    pub demographics: Demographics,
    pathway: PathwayDates,
    durations: Option<DurationSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sequence_error: Option<SequenceError>,
    pub delay_reasons: DelayReasons,
    pub questionnaire: Questionnaire,
    literacy: ResponseSet,
    pub verification: Verification,
}

impl ParticipantRecord {
    pub fn new(instrument: InstrumentKind) -> Self {
        Self {
            participant_id: String::new(),
            name_initials: String::new(),
            demographics: Demographics::default(),
            pathway: PathwayDates::default(),
            durations: None,
            sequence_error: None,
            delay_reasons: DelayReasons::default(),
            questionnaire: Questionnaire::default(),
            literacy: ResponseSet::new(instrument),
            verification: Verification::default(),
        }
    }

    /// Discard every field and start over on the same instrument.
    pub fn reset(&mut self) {
        *self = Self::new(self.literacy.instrument());
    }

    pub fn pathway(&self) -> &PathwayDates {
        &self.pathway
    }

    /// `None` while a date is missing or the sequence is out of order.
    pub fn durations(&self) -> Option<&DurationSet> {
        self.durations.as_ref()
    }

    /// Ordering problem found by the last recompute. Set exactly when the
    /// delays are withheld for an out-of-order sequence.
    pub fn sequence_error(&self) -> Option<&SequenceError> {
        self.sequence_error.as_ref()
    }

    /// Store one milestone date and recompute the delays. The date is kept
    /// even when the sequence becomes invalid; the delays are withheld until
    /// it is corrected.
    pub fn set_milestone(
        &mut self,
        milestone: Milestone,
        date: Option<Date>,
        policy: SequencePolicy,
    ) -> Result<Option<DurationSet>, SequenceError> {
        self.pathway.set(milestone, date);
        self.recompute_durations(policy)
    }

    /// Replace all four dates at once.
    pub fn set_pathway(
        &mut self,
        pathway: PathwayDates,
        policy: SequencePolicy,
    ) -> Result<Option<DurationSet>, SequenceError> {
        self.pathway = pathway;
        self.recompute_durations(policy)
    }

    pub fn recompute_durations(
        &mut self,
        policy: SequencePolicy,
    ) -> Result<Option<DurationSet>, SequenceError> {
        match self.pathway.durations(policy) {
            Ok(durations) => {
                self.durations = durations;
                self.sequence_error = None;
                Ok(durations)
            }
            Err(e) => {
                self.durations = None;
                self.sequence_error = Some(e);
                Err(e)
            }
        }
    }

    pub fn literacy(&self) -> &ResponseSet {
        &self.literacy
    }

    pub fn instrument(&self) -> InstrumentKind {
        self.literacy.instrument()
    }

    pub fn record_literacy_response(
        &mut self,
        item_index: usize,
        raw_value: u8,
    ) -> Result<u8, InstrumentError> {
        self.literacy.record_response(item_index, raw_value)
    }

    pub fn literacy_total(&self) -> u32 {
        self.literacy.total_score()
    }

    pub fn literacy_band(&self) -> Result<Band, InstrumentError> {
        self.literacy.band()
    }

    /// Column names of the essential fields still empty. Export is blocked
    /// until this is empty.
    pub fn missing_essential_fields(&self) -> Vec<&'static str> {
        let filled = [
            !self.participant_id.trim().is_empty(),
            self.demographics.age > 0,
            !self.demographics.gender.trim().is_empty(),
            !self.demographics.tb_type.trim().is_empty(),
        ];
        columns::ESSENTIAL
            .iter()
            .zip(filled)
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn is_export_ready(&self) -> bool {
        self.missing_essential_fields().is_empty()
    }

    /// Literacy counts as done once the total rises above the instrument's
    /// floor; an all-minimum answer sheet reads as not started.
    pub fn progress(&self) -> Progress {
        let (floor, _) = self.literacy.spec().total_range();
        Progress {
            demographics: !self.participant_id.trim().is_empty(),
            dates: self.pathway.symptom_onset.is_some(),
            delays: self.durations.is_some(),
            literacy: self.literacy_total() > floor,
            verified: self.verification.verified,
        }
    }
}

/// Short participant code: the first eight hex digits of a v4 UUID, upper
/// case.
pub fn generate_participant_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    simple[..8].to_uppercase()
}
