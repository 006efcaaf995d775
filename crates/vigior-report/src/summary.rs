use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use vigior_core::models::patient_record::PatientRecord;
use vigior_core::models::recommendation::TreatmentLabel;
use vigior_core::models::scores::RiskScores;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentCount {
    pub treatment: TreatmentLabel,
    pub label: String,
    pub count: usize,
}

/// Aggregate view of a filtered case series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CohortSummary {
    pub total: usize,
    pub matching: usize,
    pub keyword: Option<String>,
    /// Only treatments that occur, in label order.
    pub treatments: Vec<TreatmentCount>,
    /// Means over the matching records, rounded to one decimal.
    /// `None` when nothing matches.
    pub mean_scores: Option<RiskScores>,
}

impl CohortSummary {
    /// Summarize `matching`, a subset of a store holding `total` records.
    pub fn from_records<'a>(
        total: usize,
        matching: impl IntoIterator<Item = &'a PatientRecord>,
        keyword: Option<&str>,
    ) -> Self {
        let matching: Vec<&PatientRecord> = matching.into_iter().collect();

        let mut counts: BTreeMap<TreatmentLabel, usize> = BTreeMap::new();
        for record in &matching {
            *counts.entry(record.recommendation.treatment).or_default() += 1;
        }

        Self {
            total,
            matching: matching.len(),
            keyword: keyword.map(str::to_string).filter(|k| !k.trim().is_empty()),
            treatments: counts
                .into_iter()
                .map(|(treatment, count)| TreatmentCount {
                    treatment,
                    label: treatment.display_name().to_string(),
                    count,
                })
                .collect(),
            mean_scores: mean_scores(&matching),
        }
    }
}

fn mean_scores(records: &[&PatientRecord]) -> Option<RiskScores> {
    if records.is_empty() {
        return None;
    }

    let n = records.len() as f64;
    let mut sums = [0.0; 4];
    for record in records {
        for (sum, value) in sums.iter_mut().zip(record.scores.as_array()) {
            *sum += value;
        }
    }
    let mean = |i: usize| (sums[i] / n * 10.0).round_ties_even() / 10.0;

    Some(RiskScores {
        avascular_necrosis_risk: mean(0),
        nonunion_risk: mean(1),
        fixation_failure_risk: mean(2),
        composite_surgical_risk: mean(3),
    })
}
