//! Care-pathway timing: milestone ordering checks and delay metrics.
//!
//! All functions are pure. Dates are calendar dates, so every metric is a
//! whole number of days.

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::error::CoreError;

/// The four clinical events of the care pathway, in clinical order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Milestone {
    SymptomOnset,
    FirstVisit,
    Diagnosis,
    TreatmentStart,
}

impl Milestone {
    pub const ALL: [Milestone; 4] = [
        Milestone::SymptomOnset,
        Milestone::FirstVisit,
        Milestone::Diagnosis,
        Milestone::TreatmentStart,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Milestone::SymptomOnset => "Symptom Onset",
            Milestone::FirstVisit => "First Visit",
            Milestone::Diagnosis => "Diagnosis",
            Milestone::TreatmentStart => "Treatment Start",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A present milestone dated strictly after a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[error("Date sequence error: {earlier} cannot be after {later}")]
#[ts(export)]
pub struct SequenceError {
    pub earlier: Milestone,
    pub later: Milestone,
}

impl SequenceError {
    pub fn earlier_index(&self) -> usize {
        self.earlier.index()
    }

    pub fn later_index(&self) -> usize {
        self.later.index()
    }

    fn between(earlier: usize, later: usize) -> Self {
        Self {
            earlier: Milestone::ALL[earlier],
            later: Milestone::ALL[later],
        }
    }
}

/// Which pairs of present dates are checked for ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SequencePolicy {
    /// Only neighbouring milestones that are both present. A date is never
    /// compared across a missing one.
    #[default]
    AdjacentPresent,
    /// Every pair of present milestones, including across gaps.
    AllPresent,
}

impl SequencePolicy {
    pub fn id(self) -> &'static str {
        match self {
            SequencePolicy::AdjacentPresent => "adjacent_present",
            SequencePolicy::AllPresent => "all_present",
        }
    }
}

impl fmt::Display for SequencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SequencePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "adjacent_present" => Ok(SequencePolicy::AdjacentPresent),
            "all_present" => Ok(SequencePolicy::AllPresent),
            _ => Err(CoreError::UnknownSequencePolicy(s.to_string())),
        }
    }
}

/// Check adjacent present pairs in milestone order. Pairs with a missing
/// endpoint are skipped.
pub fn validate_sequence(dates: &[Option<Date>; 4]) -> Result<(), SequenceError> {
    for i in 0..dates.len() - 1 {
        if let (Some(earlier), Some(later)) = (dates[i], dates[i + 1])
            && earlier > later
        {
            return Err(SequenceError::between(i, i + 1));
        }
    }
    Ok(())
}

/// Check ordering under the given policy. `AllPresent` reports the same
/// error as `AdjacentPresent` whenever an adjacent pair is out of order.
pub fn validate_sequence_with(
    dates: &[Option<Date>; 4],
    policy: SequencePolicy,
) -> Result<(), SequenceError> {
    validate_sequence(dates)?;
    if policy == SequencePolicy::AllPresent {
        for i in 0..dates.len() {
            for j in i + 2..dates.len() {
                if let (Some(earlier), Some(later)) = (dates[i], dates[j])
                    && earlier > later
                {
                    return Err(SequenceError::between(i, j));
                }
            }
        }
    }
    Ok(())
}

/// Delay metrics derived from a complete, ordered milestone sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DurationSet {
    /// Symptom onset to first healthcare visit.
    pub patient_delay: i32,
    /// First visit to diagnosis confirmation.
    pub provider_delay: i32,
    /// Diagnosis to treatment start.
    pub treatment_delay: i32,
    /// Symptom onset to treatment start.
    pub total_delay: i32,
    pub no_delay: bool,
}

impl DurationSet {
    /// Reported separately as the TB Unit (TU) delay; same interval as the
    /// provider delay.
    pub fn tb_unit_delay(&self) -> i32 {
        self.provider_delay
    }

    /// Reported separately as the healthcare providers delay; same interval
    /// as the provider delay.
    pub fn healthcare_providers_delay(&self) -> i32 {
        self.provider_delay
    }

    pub fn category(&self) -> DelayCategory {
        DelayCategory::from_total_days(self.total_delay)
    }
}

/// Coarse grouping of the total delay.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DelayCategory {
    /// Up to 30 days.
    Low,
    /// 31 to 60 days.
    Moderate,
    /// More than 60 days.
    High,
}

impl DelayCategory {
    pub fn from_total_days(days: i32) -> Self {
        if days <= 30 {
            DelayCategory::Low
        } else if days <= 60 {
            DelayCategory::Moderate
        } else {
            DelayCategory::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DelayCategory::Low => "Low Delay",
            DelayCategory::Moderate => "Moderate Delay",
            DelayCategory::High => "High Delay",
        }
    }
}

impl fmt::Display for DelayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compute the delay metrics. The caller must have validated the sequence;
/// an unordered input yields negative delays rather than an error.
pub fn compute_durations(dates: &[Date; 4]) -> DurationSet {
    let [onset, first_visit, diagnosis, treatment_start] = *dates;
    let days = |from: Date, to: Date| (to - from).get_days();

    let total_delay = days(onset, treatment_start);
    DurationSet {
        patient_delay: days(onset, first_visit),
        provider_delay: days(first_visit, diagnosis),
        treatment_delay: days(diagnosis, treatment_start),
        total_delay,
        no_delay: total_delay == 0,
    }
}

/// The four optional milestone dates of one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PathwayDates {
    pub symptom_onset: Option<Date>,
    pub first_visit: Option<Date>,
    pub diagnosis: Option<Date>,
    pub treatment_start: Option<Date>,
}

impl PathwayDates {
    pub fn new(dates: [Option<Date>; 4]) -> Self {
        let [symptom_onset, first_visit, diagnosis, treatment_start] = dates;
        Self {
            symptom_onset,
            first_visit,
            diagnosis,
            treatment_start,
        }
    }

    pub fn get(&self, milestone: Milestone) -> Option<Date> {
        match milestone {
            Milestone::SymptomOnset => self.symptom_onset,
            Milestone::FirstVisit => self.first_visit,
            Milestone::Diagnosis => self.diagnosis,
            Milestone::TreatmentStart => self.treatment_start,
        }
    }

    pub fn set(&mut self, milestone: Milestone, date: Option<Date>) {
        let slot = match milestone {
            Milestone::SymptomOnset => &mut self.symptom_onset,
            Milestone::FirstVisit => &mut self.first_visit,
            Milestone::Diagnosis => &mut self.diagnosis,
            Milestone::TreatmentStart => &mut self.treatment_start,
        };
        *slot = date;
    }

    pub fn as_array(&self) -> [Option<Date>; 4] {
        [
            self.symptom_onset,
            self.first_visit,
            self.diagnosis,
            self.treatment_start,
        ]
    }

    /// All four dates, or `None` while any is missing.
    pub fn complete(&self) -> Option<[Date; 4]> {
        Some([
            self.symptom_onset?,
            self.first_visit?,
            self.diagnosis?,
            self.treatment_start?,
        ])
    }

    pub fn validate(&self, policy: SequencePolicy) -> Result<(), SequenceError> {
        validate_sequence_with(&self.as_array(), policy)
    }

    /// Validate, then compute metrics if every date is present.
    pub fn durations(&self, policy: SequencePolicy) -> Result<Option<DurationSet>, SequenceError> {
        self.validate(policy)?;
        Ok(self.complete().map(|dates| compute_durations(&dates)))
    }
}
