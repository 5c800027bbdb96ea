use std::collections::BTreeMap;

use serde::Serialize;

use tbstudy_core::models::participant::ParticipantRecord;
use tbstudy_core::pathway::DurationSet;

const NOT_RECORDED: &str = "Not recorded";

/// Mean, median and range of one delay metric, in days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DelayStats {
    pub mean: f64,
    pub median: f64,
    pub min: i32,
    pub max: i32,
}

impl DelayStats {
    pub fn from_days(days: &[i32]) -> Option<Self> {
        if days.is_empty() {
            return None;
        }
        let mut sorted = days.to_vec();
        sorted.sort_unstable();

        let n = sorted.len();
        let mean = sorted.iter().map(|&d| f64::from(d)).sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (f64::from(sorted[n / 2 - 1]) + f64::from(sorted[n / 2])) / 2.0
        } else {
            f64::from(sorted[n / 2])
        };

        Some(Self {
            mean,
            median,
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

/// Descriptive counts and averages across participants. Records whose
/// delays are withheld count toward the totals but not the delay stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveSummary {
    pub participants: usize,
    pub with_delays: usize,
    pub patient_delay: Option<DelayStats>,
    pub provider_delay: Option<DelayStats>,
    pub treatment_delay: Option<DelayStats>,
    pub total_delay: Option<DelayStats>,
    pub mean_literacy_total: Option<f64>,
    pub by_gender: BTreeMap<String, usize>,
    pub by_tb_type: BTreeMap<String, usize>,
    pub by_literacy_level: BTreeMap<String, usize>,
    pub by_delay_category: BTreeMap<String, usize>,
}

fn bucket(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        NOT_RECORDED.to_string()
    } else {
        value.to_string()
    }
}

impl DescriptiveSummary {
    pub fn from_records(records: &[ParticipantRecord]) -> Self {
        let durations: Vec<&DurationSet> = records.iter().filter_map(|r| r.durations()).collect();
        let metric = |f: fn(&DurationSet) -> i32| {
            let days: Vec<i32> = durations.iter().map(|d| f(d)).collect();
            DelayStats::from_days(&days)
        };

        let mut by_gender = BTreeMap::new();
        let mut by_tb_type = BTreeMap::new();
        let mut by_literacy_level = BTreeMap::new();
        let mut by_delay_category = BTreeMap::new();

        for record in records {
            *by_gender
                .entry(bucket(&record.demographics.gender))
                .or_insert(0) += 1;
            *by_tb_type
                .entry(bucket(&record.demographics.tb_type))
                .or_insert(0) += 1;
            if let Ok(band) = record.literacy_band() {
                *by_literacy_level.entry(band.label().to_string()).or_insert(0) += 1;
            }
            if let Some(d) = record.durations() {
                *by_delay_category
                    .entry(d.category().label().to_string())
                    .or_insert(0) += 1;
            }
        }

        let mean_literacy_total = if records.is_empty() {
            None
        } else {
            let sum: u32 = records.iter().map(|r| r.literacy_total()).sum();
            Some(f64::from(sum) / records.len() as f64)
        };

        let summary = Self {
            participants: records.len(),
            with_delays: durations.len(),
            patient_delay: metric(|d| d.patient_delay),
            provider_delay: metric(|d| d.provider_delay),
            treatment_delay: metric(|d| d.treatment_delay),
            total_delay: metric(|d| d.total_delay),
            mean_literacy_total,
            by_gender,
            by_tb_type,
            by_literacy_level,
            by_delay_category,
        };
        tracing::debug!(
            participants = summary.participants,
            with_delays = summary.with_delays,
            "computed descriptive summary"
        );
        summary
    }
}
