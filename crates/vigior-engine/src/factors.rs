use vigior_core::models::observation::ClinicalObservation;

/// Short explanations of the clinical findings that push risk up.
///
/// Informational: the cascade never reads these back.
pub fn contributing_factors(observation: &ClinicalObservation) -> Vec<String> {
    let o = observation;
    let checks: [(bool, &str); 8] = [
        (
            o.age > 65,
            "advanced age: higher risk of stiffness and poor bone stock",
        ),
        (
            o.fragment_count >= 3,
            "multiple fragments: higher risk of mechanical complications",
        ),
        (
            o.head_shaft_angle < 120.0,
            "low head-shaft angle: compromised head perfusion, necrosis risk",
        ),
        (
            o.interfragmentary_gap > 5.0,
            "wide interfragmentary gap: nonunion risk",
        ),
        (o.smoker, "smoking: impairs bone healing"),
        (
            o.bone_quality.is_poor(),
            "poor bone quality: weaker fixation purchase",
        ),
        (
            o.comorbidity_count >= 1,
            "major comorbidities: higher surgical risk",
        ),
        (
            o.tuberosities_irreparable,
            "irreparable tuberosities: reconstruction unreliable",
        ),
    ];

    checks
        .into_iter()
        .filter(|(present, _)| *present)
        .map(|(_, text)| text.to_string())
        .collect()
}
