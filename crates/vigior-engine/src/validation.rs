//! Input domain checks.
//!
//! The scoring formulas are defined for any number, so what happens to an
//! out-of-range field is a policy choice made by the caller.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use vigior_core::models::observation::ClinicalObservation;

pub const AGE_RANGE: RangeInclusive<u32> = 18..=110;
pub const FRAGMENT_RANGE: RangeInclusive<u32> = 1..=6;
pub const HEAD_SHAFT_ANGLE_RANGE: RangeInclusive<f64> = 60.0..=180.0;
pub const MIN_GAP: f64 = 0.0;

/// What to do with an observation whose fields fall outside their domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InputPolicy {
    /// Refuse to score it.
    #[default]
    Reject,
    /// Pull each field to its nearest bound, then score.
    Clamp,
    /// Score the raw values.
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

/// Non-finite numbers cannot be scored under any policy.
pub fn non_finite_fields(observation: &ClinicalObservation) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !observation.head_shaft_angle.is_finite() {
        errors.push(FieldError::new(
            "head_shaft_angle",
            "head_shaft_angle must be a finite number".to_string(),
        ));
    }
    if !observation.interfragmentary_gap.is_finite() {
        errors.push(FieldError::new(
            "interfragmentary_gap",
            "interfragmentary_gap must be a finite number".to_string(),
        ));
    }
    errors
}

/// Check every field against its declared domain.
pub fn validate(observation: &ClinicalObservation) -> Vec<FieldError> {
    let o = observation;
    let mut errors = non_finite_fields(o);

    if !AGE_RANGE.contains(&o.age) {
        errors.push(FieldError::new(
            "age",
            format!(
                "age {} is outside range [{}, {}]",
                o.age,
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ),
        ));
    }
    if !FRAGMENT_RANGE.contains(&o.fragment_count) {
        errors.push(FieldError::new(
            "fragment_count",
            format!(
                "fragment_count {} is outside range [{}, {}]",
                o.fragment_count,
                FRAGMENT_RANGE.start(),
                FRAGMENT_RANGE.end()
            ),
        ));
    }
    if o.head_shaft_angle.is_finite() && !HEAD_SHAFT_ANGLE_RANGE.contains(&o.head_shaft_angle) {
        errors.push(FieldError::new(
            "head_shaft_angle",
            format!(
                "head_shaft_angle {} is outside range [{}, {}]",
                o.head_shaft_angle,
                HEAD_SHAFT_ANGLE_RANGE.start(),
                HEAD_SHAFT_ANGLE_RANGE.end()
            ),
        ));
    }
    if o.interfragmentary_gap.is_finite() && o.interfragmentary_gap < MIN_GAP {
        errors.push(FieldError::new(
            "interfragmentary_gap",
            format!(
                "interfragmentary_gap {} must not be negative",
                o.interfragmentary_gap
            ),
        ));
    }
    errors
}

/// Pull every field into its domain. Expects finite numbers.
pub fn clamp(observation: &ClinicalObservation) -> ClinicalObservation {
    let o = observation;
    ClinicalObservation {
        age: o.age.clamp(*AGE_RANGE.start(), *AGE_RANGE.end()),
        fragment_count: o
            .fragment_count
            .clamp(*FRAGMENT_RANGE.start(), *FRAGMENT_RANGE.end()),
        head_shaft_angle: o
            .head_shaft_angle
            .clamp(*HEAD_SHAFT_ANGLE_RANGE.start(), *HEAD_SHAFT_ANGLE_RANGE.end()),
        interfragmentary_gap: o.interfragmentary_gap.max(MIN_GAP),
        ..o.clone()
    }
}

/// Apply `policy`, returning the observation that should be scored.
pub fn apply_policy(
    policy: InputPolicy,
    observation: &ClinicalObservation,
) -> Result<ClinicalObservation, Vec<FieldError>> {
    let non_finite = non_finite_fields(observation);
    if !non_finite.is_empty() {
        return Err(non_finite);
    }

    match policy {
        InputPolicy::Reject => {
            let errors = validate(observation);
            if errors.is_empty() {
                Ok(observation.clone())
            } else {
                Err(errors)
            }
        }
        InputPolicy::Clamp => Ok(clamp(observation)),
        InputPolicy::PassThrough => Ok(observation.clone()),
    }
}
