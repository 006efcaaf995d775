use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The closed set of treatments the decision cascade can propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TreatmentLabel {
    /// Non-operative management.
    Conservative,
    /// Closed reduction, intramedullary nailing.
    ClosedFixation,
    /// Open reduction internal fixation.
    Orif,
    /// Arthroplasty, hemi or reverse decided intra-operatively.
    ArthroplastyHa,
    /// Arthroplasty, reverse total shoulder preferred.
    ArthroplastyRtsa,
}

impl TreatmentLabel {
    pub const ALL: [TreatmentLabel; 5] = [
        TreatmentLabel::Conservative,
        TreatmentLabel::ClosedFixation,
        TreatmentLabel::Orif,
        TreatmentLabel::ArthroplastyHa,
        TreatmentLabel::ArthroplastyRtsa,
    ];

    /// Wire identifier, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TreatmentLabel::Conservative => "conservative",
            TreatmentLabel::ClosedFixation => "closed_fixation",
            TreatmentLabel::Orif => "orif",
            TreatmentLabel::ArthroplastyHa => "arthroplasty_ha",
            TreatmentLabel::ArthroplastyRtsa => "arthroplasty_rtsa",
        }
    }

    /// Label shown to clinicians.
    pub fn display_name(self) -> &'static str {
        match self {
            TreatmentLabel::Conservative => "Conservative treatment",
            TreatmentLabel::ClosedFixation => "Closed reduction internal fixation (IM nailing)",
            TreatmentLabel::Orif => "Open reduction internal fixation (ORIF)",
            TreatmentLabel::ArthroplastyHa => "Arthroplasty (HA or RTSA as per-op)",
            TreatmentLabel::ArthroplastyRtsa => "Arthroplasty (RTSA preferred)",
        }
    }

    pub fn is_surgical(self) -> bool {
        self != TreatmentLabel::Conservative
    }

    pub fn is_arthroplasty(self) -> bool {
        matches!(
            self,
            TreatmentLabel::ArthroplastyHa | TreatmentLabel::ArthroplastyRtsa
        )
    }
}

impl fmt::Display for TreatmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TreatmentLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TreatmentLabel::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownTreatment(s.to_string()))
    }
}

/// Which rule of the decision cascade produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RuleId {
    ElderlyOsteoporoticOverride,
    Arthroplasty,
    Orif,
    ClosedFixation,
    LowRiskConservative,
    FallbackEscalation,
    FallbackDefault,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::ElderlyOsteoporoticOverride => "elderly_osteoporotic_override",
            RuleId::Arthroplasty => "arthroplasty",
            RuleId::Orif => "orif",
            RuleId::ClosedFixation => "closed_fixation",
            RuleId::LowRiskConservative => "low_risk_conservative",
            RuleId::FallbackEscalation => "fallback_escalation",
            RuleId::FallbackDefault => "fallback_default",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed treatment with its justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendation {
    pub treatment: TreatmentLabel,
    pub justification: String,
    pub rule: RuleId,
    /// Clinical factors that raised risk. Informational only.
    #[serde(default)]
    pub contributing_factors: Vec<String>,
}
