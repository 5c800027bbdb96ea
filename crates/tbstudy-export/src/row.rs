use jiff::civil::Date;
use serde::Serialize;

use tbstudy_core::columns;
use tbstudy_core::models::participant::ParticipantRecord;
use tbstudy_core::pathway::{DurationSet, Milestone};

use crate::error::ExportError;

/// One flattened participant: ordered `(column, value)` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    cells: Vec<(String, String)>,
}

impl ExportRow {
    fn push(&mut self, column: impl Into<String>, value: impl ToString) {
        self.cells.push((column.into(), value.to_string()));
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Booleans are written the way the study's existing spreadsheets hold them.
fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn joined(values: &[String]) -> String {
    values.join(columns::LIST_SEPARATOR)
}

/// Flatten a record into the study's column set. Refuses records whose
/// essential fields are still empty. Delay columns are blank while the
/// delays are withheld.
pub fn to_row(record: &ParticipantRecord, collection_date: Date) -> Result<ExportRow, ExportError> {
    let missing = record.missing_essential_fields();
    if !missing.is_empty() {
        return Err(ExportError::Incomplete { missing });
    }

    let mut row = ExportRow::default();
    let demo = &record.demographics;

    row.push(columns::PARTICIPANT_ID, &record.participant_id);
    row.push(columns::NAME_INITIALS, &record.name_initials);
    row.push(columns::DATA_COLLECTION_DATE, collection_date);

    row.push(columns::AGE, demo.age);
    row.push(columns::GENDER, &demo.gender);
    row.push(columns::ADDRESS, &demo.address);
    row.push(columns::OCCUPATION, &demo.occupation);
    row.push(columns::EDUCATION, &demo.education);
    row.push(columns::MONTHLY_INCOME, &demo.monthly_income);
    row.push(columns::MARITAL_STATUS, &demo.marital_status);
    row.push(columns::RESIDENCE_TYPE, &demo.residence_type);
    row.push(columns::COMORBIDITIES, &demo.comorbidities);
    row.push(columns::COMORBIDITIES_DETAILS, &demo.comorbidities_details);
    row.push(columns::TB_TYPE, &demo.tb_type);
    row.push(columns::ADDICTIVE_SUBSTANCES, &demo.addictive_substances);
    row.push(
        columns::ADDICTIVE_SUBSTANCES_DETAILS,
        &demo.addictive_substances_details,
    );

    for milestone in Milestone::ALL {
        let value = record
            .pathway()
            .get(milestone)
            .map(|d| d.to_string())
            .unwrap_or_default();
        row.push(columns::milestone_date(milestone), value);
    }

    let delays = record.durations();
    let days = |f: fn(&DurationSet) -> i32| {
        delays.map(|d| f(d).to_string()).unwrap_or_default()
    };
    row.push(columns::PATIENT_DELAY, days(|d| d.patient_delay));
    row.push(columns::PROVIDER_DELAY, days(|d| d.provider_delay));
    row.push(columns::TREATMENT_DELAY, days(|d| d.treatment_delay));
    row.push(columns::TOTAL_DELAY, days(|d| d.total_delay));
    row.push(columns::TB_UNIT_DELAY, days(|d| d.tb_unit_delay()));
    row.push(
        columns::HEALTHCARE_PROVIDERS_DELAY,
        days(|d| d.healthcare_providers_delay()),
    );
    row.push(
        columns::NO_DELAY,
        delays.map(|d| flag(d.no_delay)).unwrap_or_default(),
    );

    let reasons = &record.delay_reasons;
    row.push(columns::PATIENT_DELAY_REASON_SPECIFIC, &reasons.patient);
    row.push(columns::PROVIDER_DELAY_REASON_SPECIFIC, &reasons.provider);
    row.push(columns::TREATMENT_DELAY_REASON_SPECIFIC, &reasons.treatment);

    let q = &record.questionnaire;
    row.push(columns::SYMPTOMS_NATURE, joined(&q.symptoms_nature));
    row.push(columns::FIRST_CARE_LOCATION, &q.first_care_location);
    row.push(columns::PATIENT_DELAY_REASON, joined(&q.patient_delay_reason));
    row.push(columns::HEALTHCARE_VISITS_COUNT, q.healthcare_visits_count);
    row.push(columns::DIAGNOSTIC_TESTS, joined(&q.diagnostic_tests));
    row.push(
        columns::TREATMENT_DELAY_EXPERIENCED,
        &q.treatment_delay_experienced,
    );
    row.push(columns::TREATMENT_DELAY_REASON, joined(&q.treatment_delay_reason));
    row.push(columns::PROVIDER_AWARENESS, &q.provider_awareness);
    row.push(columns::PROVIDER_EXPLANATION, &q.provider_explanation);
    row.push(columns::PROVIDER_DIFFICULTIES, &q.provider_difficulties);
    row.push(
        columns::PROVIDER_DIFFICULTIES_DETAILS,
        joined(&q.provider_difficulties_details),
    );
    row.push(columns::TREATMENT_SATISFACTION, &q.treatment_satisfaction);
    row.push(columns::TB_STIGMA, &q.tb_stigma);
    row.push(columns::FAMILY_HISTORY, &q.family_history);
    row.push(columns::FAMILY_HISTORY_YEAR, &q.family_history_year);
    row.push(
        columns::ADDITIONAL_SUPPORT_NEEDED,
        joined(&q.additional_support_needed),
    );

    let literacy = record.literacy();
    let prefix = &literacy.spec().column_prefix;
    for (index, value) in literacy.values().iter().enumerate() {
        row.push(columns::literacy_item(prefix, index + 1), value);
    }
    row.push(columns::literacy_total(prefix), literacy.total_score());
    row.push(columns::literacy_level(prefix), literacy.band()?);

    row.push(columns::DATA_VERIFIED, flag(record.verification.verified));
    row.push(columns::VERIFICATION_NOTES, &record.verification.notes);

    tracing::debug!(
        participant_id = %record.participant_id,
        columns = row.len(),
        "flattened participant record"
    );
    Ok(row)
}
