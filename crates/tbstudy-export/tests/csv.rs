mod common;

use jiff::civil::date;

use tbstudy_export::csv::{export_filename, to_csv_string, write_csv_file};
use tbstudy_export::error::ExportError;
use tbstudy_export::row::to_row;

#[test]
fn header_then_one_line_per_record() {
    let rows = vec![
        to_row(&common::record("TB001", "Male", Some([1, 2, 3])), date(2024, 10, 1)).unwrap(),
        to_row(&common::record("TB002", "Female", None), date(2024, 10, 1)).unwrap(),
    ];
    let csv = to_csv_string(&rows).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Participant_ID,Name_Initials,Data_Collection_Date,Age,"));
    assert!(lines[1].starts_with("TB001,R.K.,2024-10-01,35,Male,"));
    assert!(lines[2].starts_with("TB002,R.K.,2024-10-01,35,Female,"));
    assert_eq!(
        lines[0].split(',').count(),
        rows[0].len(),
        "header should not need quoting"
    );
}

#[test]
fn fields_with_separators_are_quoted() {
    let mut record = common::record("TB003", "Male", None);
    record.demographics.address = "12, Anna Salai, Chennai".to_string();
    record.verification.notes = "Checked \"OPD card\"\nsecond line".to_string();

    let rows = vec![to_row(&record, date(2024, 10, 1)).unwrap()];
    let csv = to_csv_string(&rows).unwrap();
    assert!(csv.contains(",\"12, Anna Salai, Chennai\","));
    assert!(csv.ends_with("\"Checked \"\"OPD card\"\"\nsecond line\"\n"));
}

#[test]
fn mixed_instruments_cannot_share_a_file() {
    let dhli = common::record("TB004", "Male", None);
    let mut eheals = tbstudy_core::models::participant::ParticipantRecord::new(
        tbstudy_instruments::InstrumentKind::Eheals,
    );
    eheals.participant_id = "TB005".to_string();
    eheals.demographics = dhli.demographics.clone();

    let rows = vec![
        to_row(&dhli, date(2024, 10, 1)).unwrap(),
        to_row(&eheals, date(2024, 10, 1)).unwrap(),
    ];
    assert!(matches!(
        to_csv_string(&rows),
        Err(ExportError::ColumnMismatch { row: 1 })
    ));
}

#[test]
fn empty_export_is_an_error() {
    assert!(matches!(to_csv_string(&[]), Err(ExportError::Empty)));
}

#[test]
fn file_write_replaces_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exports").join("out.csv");
    let rows = vec![to_row(&common::record("TB006", "Male", None), date(2024, 10, 1)).unwrap()];

    write_csv_file(&path, &rows).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, to_csv_string(&rows).unwrap());
    assert!(!dir.path().join("exports").join("out.csv.tmp").exists());
}

#[test]
fn filename_uses_participant_and_timestamp() {
    let at = date(2025, 10, 3).at(14, 5, 9, 0);
    assert_eq!(
        export_filename("TB001", at),
        "tb_study_data_TB001_20251003_140509.csv"
    );
    assert_eq!(
        export_filename("", at),
        "tb_study_data_UNKNOWN_20251003_140509.csv"
    );
    assert_eq!(
        export_filename("a/b c", at),
        "tb_study_data_a_b_c_20251003_140509.csv"
    );
}
