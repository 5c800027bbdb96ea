use std::path::Path;

use serde::Deserialize;

use tbstudy_core::error::CoreError;
use tbstudy_core::models::demographics::Demographics;
use tbstudy_core::models::participant::{ParticipantRecord, Verification};
use tbstudy_core::models::questionnaire::{DelayReasons, Questionnaire};
use tbstudy_core::pathway::{PathwayDates, SequenceError, SequencePolicy};
use tbstudy_instruments::InstrumentKind;

/// One participant's answers as captured by the data-entry form. Every
/// section is optional; dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntakeForm {
    pub participant_id: String,
    pub name_initials: String,
    pub demographics: Demographics,
    pub dates: PathwayDates,
    pub delay_reasons: DelayReasons,
    pub questionnaire: Questionnaire,
    /// Raw answers in item order, before reverse scoring. Empty leaves the
    /// instrument at its defaults.
    pub literacy_responses: Vec<u8>,
    pub verification: Verification,
}

/// A record built from a form. The sequence error, if any, is reported
/// alongside instead of failing the load so the dates can still be shown
/// and corrected.
#[derive(Debug, Clone)]
pub struct Intake {
    pub record: ParticipantRecord,
    pub sequence_error: Option<SequenceError>,
}

impl IntakeForm {
    pub fn into_record(
        self,
        instrument: InstrumentKind,
        policy: SequencePolicy,
    ) -> Result<Intake, CoreError> {
        let mut record = ParticipantRecord::new(instrument);
        record.participant_id = self.participant_id.trim().to_string();
        record.name_initials = self.name_initials;
        record.demographics = self.demographics;
        record.delay_reasons = self.delay_reasons;
        record.questionnaire = self.questionnaire;
        record.verification = self.verification;

        if !self.literacy_responses.is_empty() {
            let problems = instrument
                .instrument()
                .validate_responses(&self.literacy_responses);
            if let Some(first) = problems.into_iter().next() {
                return Err(first.into());
            }
            for (index, raw) in self.literacy_responses.into_iter().enumerate() {
                record.record_literacy_response(index, raw)?;
            }
        }

        let sequence_error = record.set_pathway(self.dates, policy).err();
        Ok(Intake {
            record,
            sequence_error,
        })
    }
}

pub fn load_intake(path: &Path) -> eyre::Result<IntakeForm> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read intake at {}: {e}", path.display()))?;
    let form: IntakeForm = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("invalid intake {}: {e}", path.display()))?;
    Ok(form)
}
