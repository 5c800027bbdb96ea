use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Primary reason recorded for each gap of the pathway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct DelayReasons {
    /// Symptom onset to first visit.
    pub patient: String,
    /// First visit to diagnosis.
    pub provider: String,
    /// Diagnosis to treatment start.
    pub treatment: String,
}

/// Clinical questionnaire answers. List fields hold every option ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Questionnaire {
    pub symptoms_nature: Vec<String>,
    pub first_care_location: String,
    pub patient_delay_reason: Vec<String>,
    pub healthcare_visits_count: u32,
    pub diagnostic_tests: Vec<String>,
    pub treatment_delay_experienced: String,
    pub treatment_delay_reason: Vec<String>,
    pub provider_awareness: String,
    pub provider_explanation: String,
    pub provider_difficulties: String,
    pub provider_difficulties_details: Vec<String>,
    pub treatment_satisfaction: String,
    pub tb_stigma: String,
    pub family_history: String,
    pub family_history_year: String,
    pub additional_support_needed: Vec<String>,
}
