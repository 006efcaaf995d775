//! Built-in templates (Jinja2 syntax).

pub const CASE_REPORT_NAME: &str = "case_report.md";

pub const CASE_REPORT: &str = r#"# Case report {{ id }}

Patient {{ id }}, {{ age }} years{% if smoker %}, smoker{% endif %}, {{ comorbidity_count }} major comorbidit{% if comorbidity_count == 1 %}y{% else %}ies{% endif %}, {{ bone_quality }} bone quality.

## Fracture

- Fragments (Neer): {{ fragment_count }}
- Head-shaft angle: {{ head_shaft_angle }}°
- Interfragmentary gap: {{ interfragmentary_gap }} mm
- Tuberosities irreparable: {% if tuberosities_irreparable %}yes{% else %}no{% endif %}

## Estimated risks ({{ model_id }})

- Avascular necrosis: {{ avascular_necrosis_risk }} %
- Nonunion: {{ nonunion_risk }} %
- Fixation failure: {{ fixation_failure_risk }} %
- Composite surgical risk: {{ composite_surgical_risk }}

## Recommendation

**{{ treatment_label }}**

{{ justification }}
{% if contributing_factors | length > 0 %}
### Contributing factors
{% for factor in contributing_factors %}
- {{ factor }}
{%- endfor %}
{% endif %}
## Clinical notes

{% if notes %}{{ notes }}{% else %}_No notes recorded._{% endif %}
"#;

pub const COHORT_SUMMARY_NAME: &str = "cohort_summary.md";

pub const COHORT_SUMMARY: &str = r#"# Case series

- Patients recorded: {{ total }}
- Matching filter{% if keyword %} "{{ keyword }}"{% endif %}: {{ matching }}
{% if matching > 0 %}
## Treatments
{% for row in treatments %}
- {{ row.label }}: {{ row.count }}
{%- endfor %}

## Mean risks

- Avascular necrosis: {{ mean_scores.avascular_necrosis_risk }} %
- Nonunion: {{ mean_scores.nonunion_risk }} %
- Fixation failure: {{ mean_scores.fixation_failure_risk }} %
- Composite surgical risk: {{ mean_scores.composite_surgical_risk }}
{% endif %}"#;
