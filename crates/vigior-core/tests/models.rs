use serde_json::json;
use vigior_core::models::observation::{BoneQuality, ClinicalObservation};
use vigior_core::models::patient_record::PatientRecord;
use vigior_core::models::recommendation::{Recommendation, RuleId, TreatmentLabel};
use vigior_core::models::scores::RiskScores;

fn observation() -> ClinicalObservation {
    ClinicalObservation {
        age: 70,
        smoker: false,
        comorbidity_count: 0,
        bone_quality: BoneQuality::Normal,
        fragment_count: 3,
        head_shaft_angle: 130.0,
        interfragmentary_gap: 3.0,
        tuberosities_irreparable: false,
    }
}

#[test]
fn tuberosities_default_to_false_when_absent() {
    let obs: ClinicalObservation = serde_json::from_value(json!({
        "age": 55,
        "smoker": true,
        "comorbidity_count": 1,
        "bone_quality": "poor",
        "fragment_count": 2,
        "head_shaft_angle": 120,
        "interfragmentary_gap": 1.5
    }))
    .unwrap();

    assert!(!obs.tuberosities_irreparable);
    assert_eq!(obs.bone_quality, BoneQuality::Poor);
    assert_eq!(obs.head_shaft_angle, 120.0);
}

#[test]
fn treatment_labels_parse_from_wire_names() {
    for label in TreatmentLabel::ALL {
        let parsed: TreatmentLabel = label.as_str().parse().unwrap();
        assert_eq!(parsed, label);
        assert_eq!(
            serde_json::to_value(label).unwrap(),
            json!(label.as_str())
        );
    }
    assert!("surgery".parse::<TreatmentLabel>().is_err());
}

#[test]
fn only_conservative_is_non_surgical() {
    let surgical: Vec<_> = TreatmentLabel::ALL
        .into_iter()
        .filter(|t| !t.is_surgical())
        .collect();
    assert_eq!(surgical, vec![TreatmentLabel::Conservative]);
    assert!(TreatmentLabel::ArthroplastyRtsa.is_arthroplasty());
    assert!(!TreatmentLabel::Orif.is_arthroplasty());
}

#[test]
fn patient_record_serializes_as_a_flat_row() {
    let record = PatientRecord::new(
        "H-0000ABCD".to_string(),
        "canonical",
        observation(),
        RiskScores {
            avascular_necrosis_risk: 23.5,
            nonunion_risk: 20.0,
            fixation_failure_risk: 18.5,
            composite_surgical_risk: 21.0,
        },
        Recommendation {
            treatment: TreatmentLabel::Orif,
            justification: "ORIF indicated.".to_string(),
            rule: RuleId::Orif,
            contributing_factors: vec![],
        },
        "",
    );

    let value = serde_json::to_value(&record).unwrap();
    let row = value.as_object().unwrap();
    assert_eq!(row["age"], json!(70));
    assert_eq!(row["avascular_necrosis_risk"], json!(23.5));
    assert_eq!(row["treatment"], json!("orif"));
    assert_eq!(row["rule"], json!("orif"));
    assert!(!row.contains_key("updated_at"));

    let back: PatientRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}
