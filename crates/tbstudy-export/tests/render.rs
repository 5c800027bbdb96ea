mod common;

use jiff::civil::date;

use tbstudy_core::models::participant::ParticipantRecord;
use tbstudy_core::pathway::{Milestone, SequencePolicy};
use tbstudy_export::render::{render_summary, render_template, SummaryView};
use tbstudy_instruments::InstrumentKind;

#[test]
fn summary_lists_timeline_delays_and_literacy() {
    let mut record = common::record("TB001", "Female", Some([9, 10, 5]));
    record.verification.notes = "Matched against TB register".to_string();
    for index in 0..7 {
        record.record_literacy_response(index, 1).unwrap();
    }
    record.record_literacy_response(8, 1).unwrap();

    let text = render_summary(&record).unwrap();
    assert!(text.contains("- ID: TB001"));
    assert!(text.contains("- Symptom Onset: 2024-04-01"));
    assert!(text.contains("- Treatment Start: 2024-04-25"));
    assert!(text.contains("- Total Delay: 24 days"));
    assert!(text.contains("- TB Unit (TU): 10 days"));
    assert!(text.contains("- Delay Category: Low Delay"));
    assert!(text.contains("- Total Score: 7/10"));
    assert!(text.contains("- Literacy Level: High"));
    assert!(text.contains("- Data Verified: no"));
    assert!(text.contains("- Notes: Matched against TB register"));
    assert!(!text.contains("Missing before export"));
}

#[test]
fn summary_explains_missing_delays() {
    let record = common::record("TB002", "Male", None);
    let text = render_summary(&record).unwrap();
    assert!(text.contains("- Not available: enter all four dates"));
    assert!(!text.contains("Symptom Onset:"));
    assert!(text.contains("- Literacy Level: Low"));
    assert!(text.contains("May need extra support"));
}

#[test]
fn summary_names_the_out_of_order_pair() {
    let mut record = common::record("TB005", "Female", None);
    record
        .set_milestone(
            Milestone::SymptomOnset,
            Some(date(2024, 2, 10)),
            SequencePolicy::AdjacentPresent,
        )
        .unwrap();
    record
        .set_milestone(
            Milestone::FirstVisit,
            Some(date(2024, 2, 5)),
            SequencePolicy::AdjacentPresent,
        )
        .unwrap_err();

    let text = render_summary(&record).unwrap();
    assert!(text.contains("- First Visit: 2024-02-05"));
    assert!(text.contains(
        "- Not available: Date sequence error: Symptom Onset cannot be after First Visit"
    ));
    assert!(!text.contains("enter all four dates"));
}

#[test]
fn summary_lists_fields_blocking_export() {
    let record = ParticipantRecord::new(InstrumentKind::Eheals);
    let text = render_summary(&record).unwrap();
    assert!(text.contains("eHealth Literacy Scale (eHEALS)"));
    assert!(text.contains("- Total Score: 8/40"));
    assert!(text.contains("- Missing before export: Participant_ID, Age, Gender, TB_Type"));
}

#[test]
fn custom_template_sees_view_fields() {
    let record = common::record("TB003", "Male", Some([0, 0, 0]));
    let view = SummaryView::from_record(&record).unwrap();
    let text = render_template(
        "custom.txt",
        "{{ participant_id }}:{{ delays.no_delay }}:{{ literacy.level }}",
        &view,
    )
    .unwrap();
    assert_eq!(text, "TB003:true:Low");
}

#[test]
fn malformed_template_is_a_parse_error() {
    let record = common::record("TB004", "Male", None);
    let view = SummaryView::from_record(&record).unwrap();
    let err = render_template("broken.txt", "{% if %}", &view).unwrap_err();
    assert!(matches!(
        err,
        tbstudy_export::error::ExportError::TemplateParse(_)
    ));
}
