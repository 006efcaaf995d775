//! Priority-ordered treatment decision rules.
//!
//! Rules are evaluated top to bottom and the first match wins. Ordering is
//! part of the contract: the elderly-osteoporotic override must precede the
//! arthroplasty rule it exists to pre-empt. The fallback runs only when no
//! rule matches, so [`DecisionCascade::propose`] is total.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use vigior_core::models::observation::ClinicalObservation;
use vigior_core::models::recommendation::{Recommendation, RuleId, TreatmentLabel};
use vigior_core::models::scores::RiskScores;

use crate::factors::contributing_factors;

/// Every threshold the cascade compares against. Defaults are the
/// provisional values of the current rule set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Thresholds {
    pub override_min_age: u32,
    pub override_max_fragments: u32,
    pub override_max_gap: f64,
    pub override_max_necrosis: f64,
    pub override_max_nonunion: f64,

    pub arthroplasty_necrosis: f64,
    pub arthroplasty_min_fragments: u32,
    pub arthroplasty_composite: f64,
    /// Age from which poor bone forces arthroplasty and rules out ORIF.
    pub elderly_age: u32,
    pub rtsa_min_comorbidities: u32,

    pub orif_nonunion: f64,
    pub orif_fixation_failure: f64,
    pub orif_fragments: u32,
    /// Augmentation advice applies strictly below this age.
    pub augmentation_max_age: u32,

    pub closed_max_fragments: u32,
    pub closed_fixation_failure: f64,

    pub low_risk_necrosis: f64,
    pub low_risk_nonunion: f64,
    pub low_risk_max_fragments: u32,

    pub escalation_necrosis: f64,
    pub escalation_min_fragments: u32,
    pub default_surgery_max_age: u32,
    pub default_surgery_max_comorbidities: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            override_min_age: 70,
            override_max_fragments: 3,
            override_max_gap: 5.0,
            override_max_necrosis: 60.0,
            override_max_nonunion: 50.0,

            arthroplasty_necrosis: 50.0,
            arthroplasty_min_fragments: 4,
            arthroplasty_composite: 55.0,
            elderly_age: 75,
            rtsa_min_comorbidities: 1,

            orif_nonunion: 30.0,
            orif_fixation_failure: 30.0,
            orif_fragments: 3,
            augmentation_max_age: 65,

            closed_max_fragments: 2,
            closed_fixation_failure: 30.0,

            low_risk_necrosis: 25.0,
            low_risk_nonunion: 20.0,
            low_risk_max_fragments: 2,

            escalation_necrosis: 40.0,
            escalation_min_fragments: 3,
            default_surgery_max_age: 80,
            default_surgery_max_comorbidities: 2,
        }
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub scores: &'a RiskScores,
    pub observation: &'a ClinicalObservation,
    pub thresholds: &'a Thresholds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub treatment: TreatmentLabel,
    pub justification: String,
}

impl Outcome {
    fn new(treatment: TreatmentLabel, justification: impl Into<String>) -> Self {
        Self {
            treatment,
            justification: justification.into(),
        }
    }
}

pub type Predicate = fn(&RuleInput<'_>) -> bool;
pub type OutcomeBuilder = fn(&RuleInput<'_>) -> Outcome;
pub type Fallback = fn(&RuleInput<'_>) -> (RuleId, Outcome);

/// One `(predicate, outcome-builder)` pair.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    pub when: Predicate,
    pub then: OutcomeBuilder,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("id", &self.id).finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct DecisionCascade {
    thresholds: Thresholds,
    rules: Vec<Rule>,
    fallback: Fallback,
}

impl Default for DecisionCascade {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

impl DecisionCascade {
    /// The standard rule set with the given thresholds.
    pub fn new(thresholds: Thresholds) -> Self {
        Self::with_rules(thresholds, standard_rules(), fallback)
    }

    pub fn with_rules(thresholds: Thresholds, rules: Vec<Rule>, fallback: Fallback) -> Self {
        Self {
            thresholds,
            rules,
            fallback,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Return the outcome of the first matching rule, or of the fallback.
    pub fn propose(&self, scores: &RiskScores, observation: &ClinicalObservation) -> Recommendation {
        let input = RuleInput {
            scores,
            observation,
            thresholds: &self.thresholds,
        };

        let (rule, outcome) = match self.rules.iter().find(|r| (r.when)(&input)) {
            Some(r) => (r.id, (r.then)(&input)),
            None => (self.fallback)(&input),
        };

        tracing::debug!(rule = %rule, treatment = outcome.treatment.as_str(), "cascade matched");

        Recommendation {
            treatment: outcome.treatment,
            justification: outcome.justification,
            rule,
            contributing_factors: contributing_factors(observation),
        }
    }

    /// IDs of every rule whose predicate holds, in priority order. Only the
    /// first one decides the outcome.
    pub fn matching_rules(&self, scores: &RiskScores, observation: &ClinicalObservation) -> Vec<RuleId> {
        let input = RuleInput {
            scores,
            observation,
            thresholds: &self.thresholds,
        };
        self.rules
            .iter()
            .filter(|r| (r.when)(&input))
            .map(|r| r.id)
            .collect()
    }
}

/// The five ordered rules. The fallback is supplied separately.
pub fn standard_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: RuleId::ElderlyOsteoporoticOverride,
            when: elderly_osteoporotic_override,
            then: |_| {
                Outcome::new(
                    TreatmentLabel::Conservative,
                    "Elderly osteoporotic patient with minimally displaced fracture: meta-analyses \
                     show equivalent functional outcomes with fewer complications, conservative \
                     approach prioritized.",
                )
            },
        },
        Rule {
            id: RuleId::Arthroplasty,
            when: needs_arthroplasty,
            then: arthroplasty_outcome,
        },
        Rule {
            id: RuleId::Orif,
            when: orif_indicated,
            then: |input| {
                let mut justification = String::from(
                    "Open reduction internal fixation (ORIF) indicated: significant risk of \
                     nonunion/fixation failure but anatomy and bone quality allow reconstruction.",
                );
                if needs_augmentation(input) {
                    justification.push_str(" Consider augmentation techniques (graft, cement).");
                }
                Outcome::new(TreatmentLabel::Orif, justification)
            },
        },
        Rule {
            id: RuleId::ClosedFixation,
            when: closed_fixation_suitable,
            then: |_| {
                Outcome::new(
                    TreatmentLabel::ClosedFixation,
                    "Minimally comminuted fracture and good bone quality: intramedullary nail \
                     suitable, minimal tissue trauma.",
                )
            },
        },
        Rule {
            id: RuleId::LowRiskConservative,
            when: low_risk,
            then: |_| {
                Outcome::new(
                    TreatmentLabel::Conservative,
                    "Low scores: good candidate for non-operative management.",
                )
            },
        },
    ]
}

/// Catch-all once every ordered rule has failed.
pub fn fallback(input: &RuleInput<'_>) -> (RuleId, Outcome) {
    let o = input.observation;
    let t = input.thresholds;

    if escalation_signal(input) {
        let outcome = if o.age >= t.elderly_age || o.bone_quality.is_poor() {
            Outcome::new(
                TreatmentLabel::ArthroplastyRtsa,
                "High complication signal in an at-risk patient: arthroplasty favored.",
            )
        } else {
            Outcome::new(
                TreatmentLabel::Orif,
                "High complication signal but relatively young patient with adequate bone: \
                 attempt reconstruction.",
            )
        };
        return (RuleId::FallbackEscalation, outcome);
    }

    let outcome = if surgical_candidate(input) {
        Outcome::new(
            TreatmentLabel::Orif,
            "Default choice for an intermediate case where anatomical fixation is feasible.",
        )
    } else {
        Outcome::new(
            TreatmentLabel::Conservative,
            "High surgical risk: favor conservative management or local discussion.",
        )
    };
    (RuleId::FallbackDefault, outcome)
}

fn arthroplasty_outcome(input: &RuleInput<'_>) -> Outcome {
    if prefers_reverse(input) {
        Outcome::new(
            TreatmentLabel::ArthroplastyRtsa,
            "High risk of reconstruction failure in elderly/osteoporotic patients: RTSA often \
             preferred to restore function and reduce reoperation.",
        )
    } else {
        Outcome::new(
            TreatmentLabel::ArthroplastyHa,
            "High risk of mechanical complications or uncertain reconstruction; arthroplasty \
             recommended, type decided intra-operatively according to the tuberosities.",
        )
    }
}

pub fn elderly_osteoporotic_override(input: &RuleInput<'_>) -> bool {
    let (s, o, t) = (input.scores, input.observation, input.thresholds);
    o.age >= t.override_min_age
        && o.bone_quality.is_poor()
        && o.fragment_count <= t.override_max_fragments
        && o.interfragmentary_gap <= t.override_max_gap
        && s.avascular_necrosis_risk < t.override_max_necrosis
        && s.nonunion_risk < t.override_max_nonunion
}

pub fn needs_arthroplasty(input: &RuleInput<'_>) -> bool {
    let (s, o, t) = (input.scores, input.observation, input.thresholds);
    s.avascular_necrosis_risk >= t.arthroplasty_necrosis
        || o.fragment_count >= t.arthroplasty_min_fragments
        || (o.age >= t.elderly_age && o.bone_quality.is_poor())
        || s.composite_surgical_risk >= t.arthroplasty_composite
        || o.tuberosities_irreparable
}

pub fn prefers_reverse(input: &RuleInput<'_>) -> bool {
    let (o, t) = (input.observation, input.thresholds);
    o.age >= t.elderly_age
        || o.bone_quality.is_poor()
        || o.comorbidity_count >= t.rtsa_min_comorbidities
}

pub fn orif_indicated(input: &RuleInput<'_>) -> bool {
    let (s, o, t) = (input.scores, input.observation, input.thresholds);
    let signal = s.nonunion_risk >= t.orif_nonunion
        || s.fixation_failure_risk >= t.orif_fixation_failure
        || o.fragment_count == t.orif_fragments;
    signal && !(o.bone_quality.is_poor() && o.age >= t.elderly_age)
}

pub fn needs_augmentation(input: &RuleInput<'_>) -> bool {
    let (o, t) = (input.observation, input.thresholds);
    o.bone_quality.is_poor() && o.age < t.augmentation_max_age
}

pub fn closed_fixation_suitable(input: &RuleInput<'_>) -> bool {
    let (s, o, t) = (input.scores, input.observation, input.thresholds);
    o.fragment_count <= t.closed_max_fragments
        && s.fixation_failure_risk < t.closed_fixation_failure
        && !o.bone_quality.is_poor()
}

pub fn low_risk(input: &RuleInput<'_>) -> bool {
    let (s, o, t) = (input.scores, input.observation, input.thresholds);
    s.avascular_necrosis_risk < t.low_risk_necrosis
        && s.nonunion_risk < t.low_risk_nonunion
        && o.fragment_count <= t.low_risk_max_fragments
}

pub fn escalation_signal(input: &RuleInput<'_>) -> bool {
    let (s, o, t) = (input.scores, input.observation, input.thresholds);
    s.avascular_necrosis_risk >= t.escalation_necrosis
        || o.fragment_count >= t.escalation_min_fragments
}

pub fn surgical_candidate(input: &RuleInput<'_>) -> bool {
    let (o, t) = (input.observation, input.thresholds);
    o.age < t.default_surgery_max_age
        && o.comorbidity_count < t.default_surgery_max_comorbidities
}
