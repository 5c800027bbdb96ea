mod common;

use jiff::civil::date;

use tbstudy_core::pathway::{Milestone, SequencePolicy};
use tbstudy_export::error::ExportError;
use tbstudy_export::row::to_row;

#[test]
fn incomplete_record_is_refused() {
    let mut record = common::record("TB001", "Male", None);
    record.demographics.tb_type.clear();
    record.demographics.age = 0;

    match to_row(&record, date(2024, 10, 1)) {
        Err(ExportError::Incomplete { missing }) => {
            assert_eq!(missing, vec!["Age", "TB_Type"]);
        }
        other => panic!("expected Incomplete, got {other:?}"),
    }
}

#[test]
fn columns_follow_study_order() {
    let record = common::record("TB001", "Male", Some([9, 10, 5]));
    let row = to_row(&record, date(2024, 10, 1)).unwrap();
    let columns: Vec<&str> = row.columns().collect();

    assert_eq!(&columns[..3], &["Participant_ID", "Name_Initials", "Data_Collection_Date"]);
    let onset = columns.iter().position(|c| *c == "Date_Symptom_Onset").unwrap();
    assert_eq!(
        &columns[onset..onset + 11],
        &[
            "Date_Symptom_Onset",
            "Date_First_Visit",
            "Date_Diagnosis",
            "Date_Treatment_Start",
            "Patient_Delay",
            "Healthcare_Provider_Related_Delay",
            "Treatment_Delay",
            "Total_Delay",
            "TB_Unit_TU",
            "Healthcare_Providers",
            "No_Delay",
        ]
    );
    let q1 = columns.iter().position(|c| *c == "DHLI_Q1").unwrap();
    assert_eq!(columns[q1 + 9], "DHLI_Q10");
    assert_eq!(columns[q1 + 10], "DHLI_Total_Score");
    assert_eq!(columns[q1 + 11], "DHLI_Level");
    assert_eq!(
        &columns[columns.len() - 2..],
        &["Data_Verified", "Verification_Notes"]
    );
}

#[test]
fn derived_values_are_flattened() {
    let mut record = common::record("TB002", "Female", Some([9, 10, 5]));
    for (index, raw) in [1, 1, 1, 1, 1, 1, 1, 1, 0, 1].into_iter().enumerate() {
        record.record_literacy_response(index, raw).unwrap();
    }
    record.verification.verified = true;

    let row = to_row(&record, date(2024, 10, 1)).unwrap();
    assert_eq!(row.get("Data_Collection_Date"), Some("2024-10-01"));
    assert_eq!(row.get("Date_Symptom_Onset"), Some("2024-04-01"));
    assert_eq!(row.get("Date_First_Visit"), Some("2024-04-10"));
    assert_eq!(row.get("Patient_Delay"), Some("9"));
    assert_eq!(row.get("Healthcare_Provider_Related_Delay"), Some("10"));
    assert_eq!(row.get("TB_Unit_TU"), Some("10"));
    assert_eq!(row.get("Healthcare_Providers"), Some("10"));
    assert_eq!(row.get("Total_Delay"), Some("24"));
    assert_eq!(row.get("No_Delay"), Some("False"));
    assert_eq!(row.get("DHLI_Q9"), Some("1"));
    assert_eq!(row.get("DHLI_Total_Score"), Some("10"));
    assert_eq!(row.get("DHLI_Level"), Some("High"));
    assert_eq!(row.get("Data_Verified"), Some("True"));
}

#[test]
fn withheld_delays_are_blank() {
    let mut record = common::record("TB003", "Male", Some([3, 3, 3]));
    record
        .set_milestone(
            Milestone::TreatmentStart,
            Some(date(2024, 1, 1)),
            SequencePolicy::AdjacentPresent,
        )
        .unwrap_err();

    let row = to_row(&record, date(2024, 10, 1)).unwrap();
    assert_eq!(row.get("Date_Treatment_Start"), Some("2024-01-01"));
    assert_eq!(row.get("Total_Delay"), Some(""));
    assert_eq!(row.get("No_Delay"), Some(""));
}

#[test]
fn list_answers_are_joined() {
    let mut record = common::record("TB004", "Male", None);
    record.questionnaire.symptoms_nature = vec!["Cough".to_string(), "Fever".to_string()];
    record.questionnaire.additional_support_needed = vec!["Nutrition".to_string()];

    let row = to_row(&record, date(2024, 10, 1)).unwrap();
    assert_eq!(row.get("Symptoms_Nature"), Some("Cough; Fever"));
    assert_eq!(row.get("Additional_Support_Needed"), Some("Nutrition"));
    assert_eq!(row.get("Diagnostic_Tests"), Some(""));
}

#[test]
fn eheals_record_uses_its_own_prefix() {
    let mut record = tbstudy_core::models::participant::ParticipantRecord::new(
        tbstudy_instruments::InstrumentKind::Eheals,
    );
    record.participant_id = "TB005".to_string();
    record.demographics.age = 50;
    record.demographics.gender = "Male".to_string();
    record.demographics.tb_type = "DR-TB".to_string();
    for index in 2..10 {
        record.record_literacy_response(index, 3).unwrap();
    }

    let row = to_row(&record, date(2024, 10, 1)).unwrap();
    assert_eq!(row.get("EHEALS_Q1"), Some("1"));
    assert_eq!(row.get("EHEALS_Total_Score"), Some("24"));
    assert_eq!(row.get("EHEALS_Level"), Some("Moderate"));
    assert!(row.get("DHLI_Q1").is_none());
}
