use serde::Serialize;
use tera::{Context, Tera};

use vigior_core::models::patient_record::PatientRecord;

use crate::error::ReportError;
use crate::summary::CohortSummary;
use crate::templates;

/// Render the built-in case report for one record.
pub fn render_case_report(record: &PatientRecord) -> Result<String, ReportError> {
    render_case_report_with(templates::CASE_REPORT_NAME, templates::CASE_REPORT, record)
}

/// Render a caller-supplied template against one record.
///
/// The record's flattened fields become the template variables, plus
/// `treatment_label` (the display name of the treatment).
pub fn render_case_report_with(
    template_name: &str,
    template_content: &str,
    record: &PatientRecord,
) -> Result<String, ReportError> {
    let mut context = context_from(record)?;
    context.insert(
        "treatment_label",
        record.recommendation.treatment.display_name(),
    );
    render(template_name, template_content, &context)
}

/// Render a case-series summary as Markdown.
pub fn render_cohort_summary(summary: &CohortSummary) -> Result<String, ReportError> {
    let context = context_from(summary)?;
    render(
        templates::COHORT_SUMMARY_NAME,
        templates::COHORT_SUMMARY,
        &context,
    )
}

fn context_from<T: Serialize>(value: &T) -> Result<Context, ReportError> {
    let value = serde_json::to_value(value)?;
    Context::from_value(value).map_err(|e| ReportError::TemplateRender(e.to_string()))
}

fn render(template_name: &str, template_content: &str, context: &Context) -> Result<String, ReportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ReportError::TemplateParse(e.to_string()))?;

    let rendered = tera.render(template_name, context)?;
    tracing::debug!(template = template_name, bytes = rendered.len(), "report rendered");
    Ok(rendered)
}
