use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use jiff::civil::{Date, DateTime};
use serde::Serialize;

use tbstudy_core::models::participant::{ParticipantRecord, Progress};
use tbstudy_core::pathway::DurationSet;
use tbstudy_export::csv::{export_filename, write_csv_file};
use tbstudy_export::render::render_summary;
use tbstudy_export::row::{to_row, ExportRow};
use tbstudy_export::summary::{DelayStats, DescriptiveSummary};
use tbstudy_instruments::scoring::{ItemBreakdown, ItemPrompt};
use tbstudy_instruments::{all_instruments, get_instrument};

use crate::config::StudyConfig;
use crate::intake::{load_intake, Intake};

/// Derived fields of one record, as printed by `score`.
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub participant_id: String,
    pub instrument: String,
    pub durations: Option<DurationSet>,
    pub tb_unit_delay: Option<i32>,
    pub healthcare_providers_delay: Option<i32>,
    pub delay_category: Option<&'static str>,
    pub sequence_error: Option<String>,
    pub literacy_total: u32,
    pub literacy_max: u32,
    pub literacy_level: &'static str,
    pub needs_support: bool,
    pub items: Vec<ItemBreakdown>,
    pub missing_fields: Vec<&'static str>,
    pub progress: Progress,
}

impl ScoreReport {
    pub fn from_intake(intake: &Intake) -> eyre::Result<Self> {
        let record = &intake.record;
        let durations = record.durations().copied();
        let band = record.literacy_band()?;
        let (_, literacy_max) = record.literacy().spec().total_range();

        Ok(Self {
            participant_id: record.participant_id.clone(),
            instrument: record.instrument().instrument().name().to_string(),
            durations,
            tb_unit_delay: durations.map(|d| d.tb_unit_delay()),
            healthcare_providers_delay: durations.map(|d| d.healthcare_providers_delay()),
            delay_category: durations.map(|d| d.category().label()),
            sequence_error: intake.sequence_error.map(|e| e.to_string()),
            literacy_total: record.literacy_total(),
            literacy_max,
            literacy_level: band.label(),
            needs_support: band.needs_support(),
            items: record.literacy().breakdown(),
            missing_fields: record.missing_essential_fields(),
            progress: record.progress(),
        })
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        let id = if self.participant_id.is_empty() {
            "(none)"
        } else {
            self.participant_id.as_str()
        };
        let _ = writeln!(out, "Participant: {id}");
        let _ = writeln!(out, "Instrument: {}", self.instrument);

        match (&self.durations, &self.sequence_error) {
            (Some(d), _) => {
                let _ = writeln!(out, "Patient Delay: {} days", d.patient_delay);
                let _ = writeln!(out, "Provider Delay: {} days", d.provider_delay);
                let _ = writeln!(out, "Treatment Delay: {} days", d.treatment_delay);
                let _ = writeln!(out, "Total Delay: {} days", d.total_delay);
                let _ = writeln!(out, "TB Unit (TU): {} days", d.tb_unit_delay());
                let _ = writeln!(
                    out,
                    "Healthcare Providers: {} days",
                    d.healthcare_providers_delay()
                );
                let _ = writeln!(out, "No Delay: {}", if d.no_delay { "yes" } else { "no" });
                let _ = writeln!(out, "Delay Category: {}", d.category().label());
            }
            (None, Some(error)) => {
                let _ = writeln!(out, "Delays: withheld ({error})");
            }
            (None, None) => {
                let _ = writeln!(out, "Delays: not available until all four dates are entered");
            }
        }

        let _ = writeln!(
            out,
            "Literacy: {}/{} ({}){}",
            self.literacy_total,
            self.literacy_max,
            self.literacy_level,
            if self.needs_support {
                ", may need extra support"
            } else {
                ""
            }
        );
        if !self.missing_fields.is_empty() {
            let _ = writeln!(out, "Missing before export: {}", self.missing_fields.join(", "));
        }
        out
    }
}

/// Load each intake form and build its record under the configured
/// instrument and sequence policy.
pub fn load_intakes(paths: &[PathBuf], config: &StudyConfig) -> eyre::Result<Vec<Intake>> {
    paths
        .iter()
        .map(|path| {
            let intake = load_intake(path)?
                .into_record(config.instrument, config.sequence_policy)
                .map_err(|e| eyre::eyre!("{}: {e}", path.display()))?;
            if let Some(error) = &intake.sequence_error {
                tracing::warn!(
                    path = %path.display(),
                    participant = %intake.record.participant_id,
                    %error,
                    "delays withheld"
                );
            }
            Ok(intake)
        })
        .collect()
}

pub fn score(intake: &Intake, json: bool) -> eyre::Result<String> {
    let report = ScoreReport::from_intake(intake)?;
    if json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.to_text())
    }
}

/// Verification summary followed by the per-item table.
pub fn review(intake: &Intake) -> eyre::Result<String> {
    let record = &intake.record;
    let mut out = render_summary(record)?;
    out.push('\n');
    out.push_str(
        &record
            .instrument()
            .instrument()
            .to_structured_input(&record.literacy().breakdown()),
    );
    Ok(out)
}

pub fn export_rows(
    records: &[ParticipantRecord],
    collection_date: Date,
) -> eyre::Result<Vec<ExportRow>> {
    let rows = records
        .iter()
        .map(|record| {
            to_row(record, collection_date)
                .map_err(|e| eyre::eyre!("participant {:?}: {e}", record.participant_id))
        })
        .collect::<eyre::Result<Vec<_>>>()?;
    Ok(rows)
}

/// File name for an export when `--out` is not given. A single record is
/// named after its participant; a batch is named `combined`.
pub fn default_export_path(
    config: &StudyConfig,
    records: &[ParticipantRecord],
    at: DateTime,
) -> PathBuf {
    let id = match records {
        [only] => only.participant_id.as_str(),
        _ => "combined",
    };
    let dir = config.export_dir.clone().unwrap_or_default();
    dir.join(export_filename(id, at))
}

pub fn export(
    records: &[ParticipantRecord],
    collection_date: Date,
    out: &Path,
) -> eyre::Result<usize> {
    let rows = export_rows(records, collection_date)?;
    write_csv_file(out, &rows)?;
    Ok(rows.len())
}

fn push_stats(out: &mut String, label: &str, stats: Option<&DelayStats>) {
    match stats {
        Some(s) => {
            let _ = writeln!(
                out,
                "{label}: mean {:.1}, median {:.1}, range {}-{} days",
                s.mean, s.median, s.min, s.max
            );
        }
        None => {
            let _ = writeln!(out, "{label}: no complete records");
        }
    }
}

fn push_counts(out: &mut String, label: &str, counts: &BTreeMap<String, usize>) {
    let _ = writeln!(out, "{label}:");
    for (key, count) in counts {
        let _ = writeln!(out, "  {key}: {count}");
    }
}

pub fn stats(records: &[ParticipantRecord], json: bool) -> eyre::Result<String> {
    let summary = DescriptiveSummary::from_records(records);
    if json {
        return Ok(serde_json::to_string_pretty(&summary)?);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Participants: {} ({} with complete delays)",
        summary.participants, summary.with_delays
    );
    push_stats(&mut out, "Patient Delay", summary.patient_delay.as_ref());
    push_stats(&mut out, "Provider Delay", summary.provider_delay.as_ref());
    push_stats(&mut out, "Treatment Delay", summary.treatment_delay.as_ref());
    push_stats(&mut out, "Total Delay", summary.total_delay.as_ref());
    if let Some(mean) = summary.mean_literacy_total {
        let _ = writeln!(out, "Mean literacy total: {mean:.2}");
    }
    push_counts(&mut out, "By gender", &summary.by_gender);
    push_counts(&mut out, "By TB type", &summary.by_tb_type);
    push_counts(&mut out, "By literacy level", &summary.by_literacy_level);
    push_counts(&mut out, "By delay category", &summary.by_delay_category);
    Ok(out)
}

pub fn show_config(path: &Path, config: &StudyConfig, json: bool) -> eyre::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(config)?);
    }
    let mut out = String::new();
    let _ = writeln!(out, "Config: {}", path.display());
    let _ = writeln!(out, "Instrument: {}", config.instrument);
    let _ = writeln!(out, "Sequence policy: {}", config.sequence_policy);
    let _ = writeln!(
        out,
        "Site: {}",
        if config.site_name.is_empty() {
            "(unset)"
        } else {
            config.site_name.as_str()
        }
    );
    if let Some(dir) = &config.export_dir {
        let _ = writeln!(out, "Export dir: {}", dir.display());
    }
    let _ = writeln!(out, "Created: {}", config.created_at);
    Ok(out)
}

#[derive(Debug, Serialize)]
pub struct InstrumentSummary {
    id: String,
    name: String,
    items: usize,
}

#[derive(Debug, Serialize)]
pub struct InstrumentDetail {
    id: String,
    name: String,
    total_range: (u32, u32),
    items: Vec<ItemPrompt>,
}

/// Without an ID, list every instrument. With one, show its items and
/// answer options.
pub fn instruments(id: Option<&str>, json: bool) -> eyre::Result<String> {
    let Some(id) = id else {
        let summaries: Vec<InstrumentSummary> = all_instruments()
            .iter()
            .map(|i| InstrumentSummary {
                id: i.id().to_string(),
                name: i.name().to_string(),
                items: i.spec().item_count(),
            })
            .collect();
        if json {
            return Ok(serde_json::to_string_pretty(&summaries)?);
        }
        let mut out = String::new();
        for s in &summaries {
            let _ = writeln!(out, "{}: {} ({} items)", s.id, s.name, s.items);
        }
        return Ok(out);
    };

    let instrument =
        get_instrument(id).ok_or_else(|| eyre::eyre!("instrument not found: {id}"))?;
    let spec = instrument.spec();
    let detail = InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        total_range: spec.total_range(),
        items: spec.items.clone(),
    };
    if json {
        return Ok(serde_json::to_string_pretty(&detail)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "## {}", detail.name);
    let _ = writeln!(out, "Total: {}-{}", detail.total_range.0, detail.total_range.1);
    for (index, item) in detail.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "- Q{} [{}]: {} ({})",
            index + 1,
            item.id,
            item.prompt,
            item.options.join(" / ")
        );
    }
    Ok(out)
}
