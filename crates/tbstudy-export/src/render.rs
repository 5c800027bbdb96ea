use serde::Serialize;
use tera::{Context, Tera};

use tbstudy_core::models::participant::ParticipantRecord;
use tbstudy_core::pathway::Milestone;

use crate::error::ExportError;

/// Plain-text data summary shown before the operator ticks "verified".
pub const SUMMARY_TEMPLATE: &str = "\
Participant Information
- ID: {{ participant_id }}
- Age: {{ age }}
- Gender: {{ gender }}
- TB Type: {{ tb_type }}

Timeline
{% for event in timeline -%}
- {{ event.label }}: {{ event.date }}
{% endfor %}
Calculated Delays
{% if delays -%}
- Patient Delay: {{ delays.patient_delay }} days
- Healthcare Provider-related Delay: {{ delays.provider_delay }} days
- Treatment Delay: {{ delays.treatment_delay }} days
- Total Delay: {{ delays.total_delay }} days
- TB Unit (TU): {{ delays.tb_unit_delay }} days
- Healthcare Providers: {{ delays.healthcare_providers_delay }} days
- No Delay: {{ delays.no_delay }}
- Delay Category: {{ delays.category }}
{% else -%}
- Not available: {{ delay_status }}
{% endif %}
{{ literacy.instrument }}
- Total Score: {{ literacy.total }}/{{ literacy.max }}
- Literacy Level: {{ literacy.level }}
- {{ literacy.interpretation }}

Verification
- Data Verified: {% if verified %}yes{% else %}no{% endif %}
{% if notes %}- Notes: {{ notes }}
{% endif %}{% if missing_fields %}- Missing before export: {{ missing_fields | join(sep=\", \") }}
{% endif %}";

#[derive(Debug, Serialize)]
struct TimelineEvent {
    label: &'static str,
    date: String,
}

#[derive(Debug, Serialize)]
struct DelaysView {
    patient_delay: i32,
    provider_delay: i32,
    treatment_delay: i32,
    total_delay: i32,
    tb_unit_delay: i32,
    healthcare_providers_delay: i32,
    no_delay: bool,
    category: &'static str,
}

#[derive(Debug, Serialize)]
struct LiteracyView {
    instrument: String,
    total: u32,
    max: u32,
    level: &'static str,
    interpretation: &'static str,
}

/// Template context for one record.
#[derive(Debug, Serialize)]
pub struct SummaryView {
    participant_id: String,
    age: u8,
    gender: String,
    tb_type: String,
    timeline: Vec<TimelineEvent>,
    delays: Option<DelaysView>,
    delay_status: String,
    literacy: LiteracyView,
    verified: bool,
    notes: String,
    missing_fields: Vec<&'static str>,
}

impl SummaryView {
    pub fn from_record(record: &ParticipantRecord) -> Result<Self, ExportError> {
        let timeline = Milestone::ALL
            .iter()
            .filter_map(|&m| {
                record.pathway().get(m).map(|date| TimelineEvent {
                    label: m.label(),
                    date: date.to_string(),
                })
            })
            .collect();

        let delays = record.durations().map(|d| DelaysView {
            patient_delay: d.patient_delay,
            provider_delay: d.provider_delay,
            treatment_delay: d.treatment_delay,
            total_delay: d.total_delay,
            tb_unit_delay: d.tb_unit_delay(),
            healthcare_providers_delay: d.healthcare_providers_delay(),
            no_delay: d.no_delay,
            category: d.category().label(),
        });
        let delay_status = match record.sequence_error() {
            Some(error) => error.to_string(),
            None => "enter all four dates".to_string(),
        };

        let literacy = record.literacy();
        let band = literacy.band()?;
        let (_, max) = literacy.spec().total_range();

        Ok(Self {
            participant_id: record.participant_id.clone(),
            age: record.demographics.age,
            gender: record.demographics.gender.clone(),
            tb_type: record.demographics.tb_type.clone(),
            timeline,
            delays,
            delay_status,
            literacy: LiteracyView {
                instrument: literacy.instrument().instrument().name().to_string(),
                total: literacy.total_score(),
                max,
                level: band.label(),
                interpretation: band.interpretation(),
            },
            verified: record.verification.verified,
            notes: record.verification.notes.clone(),
            missing_fields: record.missing_essential_fields(),
        })
    }
}

/// Render a Tera template against a summary view.
///
/// `template_content` is raw Tera (Jinja2-style) source; the view's fields
/// become the template variables.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    view: &SummaryView,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(view)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Render the built-in data summary for a record.
pub fn render_summary(record: &ParticipantRecord) -> Result<String, ExportError> {
    let view = SummaryView::from_record(record)?;
    render_template("summary.txt", SUMMARY_TEMPLATE, &view)
}
