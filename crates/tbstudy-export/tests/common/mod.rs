use jiff::civil::date;

use tbstudy_core::models::participant::ParticipantRecord;
use tbstudy_core::pathway::{PathwayDates, SequencePolicy};
use tbstudy_instruments::InstrumentKind;

pub fn record(id: &str, gender: &str, gaps: Option<[i16; 3]>) -> ParticipantRecord {
    let mut record = ParticipantRecord::new(InstrumentKind::Dhli);
    record.participant_id = id.to_string();
    record.name_initials = "R.K.".to_string();
    record.demographics.age = 35;
    record.demographics.gender = gender.to_string();
    record.demographics.tb_type = "Pulmonary".to_string();

    if let Some([a, b, c]) = gaps {
        let onset = date(2024, 4, 1);
        let first = onset.checked_add(jiff::Span::new().days(a)).unwrap();
        let diagnosis = first.checked_add(jiff::Span::new().days(b)).unwrap();
        let treatment = diagnosis.checked_add(jiff::Span::new().days(c)).unwrap();
        record
            .set_pathway(
                PathwayDates::new([Some(onset), Some(first), Some(diagnosis), Some(treatment)]),
                SequencePolicy::AdjacentPresent,
            )
            .unwrap();
    }
    record
}
