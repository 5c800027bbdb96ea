//! Export column naming conventions.
//!
//! Pure string constants and functions. These define the column set of the
//! flat per-participant row the study's analysis scripts read.

use crate::pathway::Milestone;

pub const PARTICIPANT_ID: &str = "Participant_ID";
pub const NAME_INITIALS: &str = "Name_Initials";
pub const DATA_COLLECTION_DATE: &str = "Data_Collection_Date";

pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const ADDRESS: &str = "Address";
pub const OCCUPATION: &str = "Occupation";
pub const EDUCATION: &str = "Education";
pub const MONTHLY_INCOME: &str = "Monthly_Income";
pub const MARITAL_STATUS: &str = "Marital_Status";
pub const RESIDENCE_TYPE: &str = "Residence_Type";
pub const COMORBIDITIES: &str = "Comorbidities";
pub const COMORBIDITIES_DETAILS: &str = "Comorbidities_Details";
pub const TB_TYPE: &str = "TB_Type";
pub const ADDICTIVE_SUBSTANCES: &str = "Addictive_Substances";
pub const ADDICTIVE_SUBSTANCES_DETAILS: &str = "Addictive_Substances_Details";

pub const PATIENT_DELAY: &str = "Patient_Delay";
pub const PROVIDER_DELAY: &str = "Healthcare_Provider_Related_Delay";
pub const TREATMENT_DELAY: &str = "Treatment_Delay";
pub const TOTAL_DELAY: &str = "Total_Delay";
pub const TB_UNIT_DELAY: &str = "TB_Unit_TU";
pub const HEALTHCARE_PROVIDERS_DELAY: &str = "Healthcare_Providers";
pub const NO_DELAY: &str = "No_Delay";

pub const PATIENT_DELAY_REASON_SPECIFIC: &str = "Patient_Delay_Specific_Reason";
pub const PROVIDER_DELAY_REASON_SPECIFIC: &str = "Provider_Delay_Specific_Reason";
pub const TREATMENT_DELAY_REASON_SPECIFIC: &str = "Treatment_Delay_Specific_Reason";

pub const SYMPTOMS_NATURE: &str = "Symptoms_Nature";
pub const FIRST_CARE_LOCATION: &str = "First_Care_Location";
pub const PATIENT_DELAY_REASON: &str = "Patient_Delay_Reason";
pub const HEALTHCARE_VISITS_COUNT: &str = "Healthcare_Visits_Count";
pub const DIAGNOSTIC_TESTS: &str = "Diagnostic_Tests";
pub const TREATMENT_DELAY_EXPERIENCED: &str = "Treatment_Delay_Experienced";
pub const TREATMENT_DELAY_REASON: &str = "Treatment_Delay_Reason";
pub const PROVIDER_AWARENESS: &str = "Provider_Awareness";
pub const PROVIDER_EXPLANATION: &str = "Provider_Explanation";
pub const PROVIDER_DIFFICULTIES: &str = "Provider_Difficulties";
pub const PROVIDER_DIFFICULTIES_DETAILS: &str = "Provider_Difficulties_Details";
pub const TREATMENT_SATISFACTION: &str = "Treatment_Satisfaction";
pub const TB_STIGMA: &str = "TB_Stigma";
pub const FAMILY_HISTORY: &str = "Family_History";
pub const FAMILY_HISTORY_YEAR: &str = "Family_History_Year";
pub const ADDITIONAL_SUPPORT_NEEDED: &str = "Additional_Support_Needed";

pub const DATA_VERIFIED: &str = "Data_Verified";
pub const VERIFICATION_NOTES: &str = "Verification_Notes";

/// Separator used when a multi-select answer is flattened into one cell.
pub const LIST_SEPARATOR: &str = "; ";

/// Fields that must be filled before a record may be exported.
pub const ESSENTIAL: [&str; 4] = [PARTICIPANT_ID, AGE, GENDER, TB_TYPE];

pub fn milestone_date(milestone: Milestone) -> &'static str {
    match milestone {
        Milestone::SymptomOnset => "Date_Symptom_Onset",
        Milestone::FirstVisit => "Date_First_Visit",
        Milestone::Diagnosis => "Date_Diagnosis",
        Milestone::TreatmentStart => "Date_Treatment_Start",
    }
}

/// One-based item column, e.g. `DHLI_Q9`.
pub fn literacy_item(prefix: &str, item_number: usize) -> String {
    format!("{prefix}_Q{item_number}")
}

pub fn literacy_total(prefix: &str) -> String {
    format!("{prefix}_Total_Score")
}

pub fn literacy_level(prefix: &str) -> String {
    format!("{prefix}_Level")
}
