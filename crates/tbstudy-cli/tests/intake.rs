use std::path::PathBuf;

use jiff::civil::date;

use tbstudy_cli::intake::{load_intake, IntakeForm};
use tbstudy_core::error::CoreError;
use tbstudy_core::pathway::{Milestone, SequencePolicy};
use tbstudy_instruments::error::InstrumentError;
use tbstudy_instruments::InstrumentKind;

const FORM: &str = r#"{
    "participant_id": " TB001 ",
    "name_initials": "S.M.",
    "demographics": { "age": 42, "gender": "Female", "tb_type": "Pulmonary" },
    "dates": {
        "symptom_onset": "2024-04-01",
        "first_visit": "2024-04-10",
        "diagnosis": "2024-04-20",
        "treatment_start": "2024-04-25"
    },
    "delay_reasons": { "patient": "Financial constraints" },
    "questionnaire": { "symptoms_nature": ["Cough", "Weight loss"] },
    "literacy_responses": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
}"#;

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn form_builds_a_scored_record() {
    let dir = tempfile::tempdir().unwrap();
    let form = load_intake(&write(&dir, "tb001.json", FORM)).unwrap();
    let intake = form
        .into_record(InstrumentKind::Dhli, SequencePolicy::AdjacentPresent)
        .unwrap();
    let record = &intake.record;

    assert!(intake.sequence_error.is_none());
    assert_eq!(record.participant_id, "TB001");
    assert_eq!(record.delay_reasons.patient, "Financial constraints");
    let d = record.durations().unwrap();
    assert_eq!(
        (d.patient_delay, d.provider_delay, d.treatment_delay, d.total_delay),
        (9, 10, 5, 24)
    );
    // Item 9 is reverse-scored, so an all-yes sheet totals 9.
    assert_eq!(record.literacy().value(8), Some(0));
    assert_eq!(record.literacy_total(), 9);
    assert!(record.is_export_ready());
}

#[test]
fn out_of_order_dates_are_kept_and_reported() {
    let form: IntakeForm = serde_json::from_str(
        r#"{"dates": {"symptom_onset": "2024-05-01", "first_visit": "2024-04-01"}}"#,
    )
    .unwrap();
    let intake = form
        .into_record(InstrumentKind::Dhli, SequencePolicy::AdjacentPresent)
        .unwrap();

    let error = intake.sequence_error.unwrap();
    assert_eq!(error.earlier, Milestone::SymptomOnset);
    assert_eq!(error.later, Milestone::FirstVisit);
    assert_eq!(
        intake.record.pathway().get(Milestone::SymptomOnset),
        Some(date(2024, 5, 1))
    );
    assert!(intake.record.durations().is_none());
}

#[test]
fn policy_from_config_is_applied() {
    let form: IntakeForm = serde_json::from_str(
        r#"{"dates": {"symptom_onset": "2024-05-01", "diagnosis": "2024-04-01"}}"#,
    )
    .unwrap();

    let lenient = form
        .clone()
        .into_record(InstrumentKind::Dhli, SequencePolicy::AdjacentPresent)
        .unwrap();
    assert!(lenient.sequence_error.is_none());

    let strict = form
        .into_record(InstrumentKind::Dhli, SequencePolicy::AllPresent)
        .unwrap();
    assert!(strict.sequence_error.is_some());
}

#[test]
fn wrong_response_count_is_rejected() {
    let form = IntakeForm {
        literacy_responses: vec![1, 0, 1],
        ..IntakeForm::default()
    };
    let err = form
        .into_record(InstrumentKind::Dhli, SequencePolicy::AdjacentPresent)
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Instrument(InstrumentError::ResponseCount {
            expected: 10,
            actual: 3
        })
    ));
}

#[test]
fn out_of_range_response_is_rejected() {
    let form = IntakeForm {
        literacy_responses: vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 6],
        ..IntakeForm::default()
    };
    let err = form
        .into_record(InstrumentKind::Eheals, SequencePolicy::AdjacentPresent)
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Instrument(InstrumentError::OutOfRange { item_index: 9, .. })
    ));
}

#[test]
fn empty_form_uses_instrument_defaults() {
    let form: IntakeForm = serde_json::from_str("{}").unwrap();
    let intake = form
        .into_record(InstrumentKind::Eheals, SequencePolicy::AdjacentPresent)
        .unwrap();
    assert_eq!(intake.record.literacy_total(), 8);
    assert_eq!(
        intake.record.missing_essential_fields(),
        vec!["Participant_ID", "Age", "Gender", "TB_Type"]
    );
}

#[test]
fn malformed_date_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "bad.json", r#"{"dates": {"diagnosis": "20/04/2024"}}"#);
    let err = load_intake(&path).unwrap_err();
    assert!(err.to_string().contains("bad.json"));
}
