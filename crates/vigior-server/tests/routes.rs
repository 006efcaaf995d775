use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use vigior_engine::engine::Engine;
use vigior_server::state::AppState;
use vigior_storage::records::RecordStore;

fn test_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(dir.path().join("patients.jsonl")).unwrap();
    let app = vigior_server::app(AppState::new(Engine::default(), store));
    (dir, app)
}

fn elderly_four_part() -> Value {
    json!({
        "age": 80,
        "smoker": false,
        "comorbidity_count": 1,
        "bone_quality": "poor",
        "fragment_count": 4,
        "head_shaft_angle": 120.0,
        "interfragmentary_gap": 4.0
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let (_dir, app) = test_app();
    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn models_marks_the_active_one() {
    let (_dir, app) = test_app();
    let (status, body) = send_json(&app, "GET", "/models", None).await;
    assert_eq!(status, StatusCode::OK);

    let models = body.as_array().unwrap();
    assert_eq!(models.len(), 2);
    let active: Vec<&str> = models
        .iter()
        .filter(|m| m["active"] == true)
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(active, ["canonical"]);
}

#[tokio::test]
async fn evaluate_does_not_persist() {
    let (_dir, app) = test_app();
    let (status, body) = send_json(&app, "POST", "/evaluate", Some(elderly_four_part())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_id"], "canonical");
    assert_eq!(body["recommendation"]["treatment"], "arthroplasty_rtsa");

    let (_, records) = send_json(&app, "GET", "/records", None).await;
    assert_eq!(records, json!([]));
}

#[tokio::test]
async fn evaluate_rejects_out_of_range_fields() {
    let (_dir, app) = test_app();
    let mut obs = elderly_four_part();
    obs["fragment_count"] = json!(7);

    let (status, body) = send_json(&app, "POST", "/evaluate", Some(obs)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"][0]["field"], "fragment_count");
}

#[tokio::test]
async fn create_then_fetch_record() {
    let (_dir, app) = test_app();
    let (status, created) = send_json(
        &app,
        "POST",
        "/records",
        Some(json!({ "observation": elderly_four_part(), "notes": "fall at home" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_str().unwrap();
    assert!(id.starts_with("H-"));
    assert_eq!(created["notes"], "fall at home");
    assert_eq!(created["age"], 80);

    let (status, fetched) = send_json(&app, "GET", &format!("/records/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn unknown_record_is_not_found() {
    let (_dir, app) = test_app();
    let (status, body) = send_json(&app, "GET", "/records/H-00000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("H-00000000"));

    let (status, _) = send_json(
        &app,
        "PUT",
        "/records/H-00000000/notes",
        Some(json!({ "notes": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notes_update_is_persisted() {
    let (_dir, app) = test_app();
    let (_, created) = send_json(
        &app,
        "POST",
        "/records",
        Some(json!({ "observation": elderly_four_part() })),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["notes"], "");

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/records/{id}/notes"),
        Some(json!({ "notes": "reviewed at follow-up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["notes"], "reviewed at follow-up");
    assert!(updated.get("updated_at").is_some());

    let (_, fetched) = send_json(&app, "GET", &format!("/records/{id}"), None).await;
    assert_eq!(fetched["notes"], "reviewed at follow-up");
}

#[tokio::test]
async fn list_filters_by_keyword_and_treatment() {
    let (_dir, app) = test_app();
    send_json(
        &app,
        "POST",
        "/records",
        Some(json!({ "observation": elderly_four_part(), "notes": "bilateral" })),
    )
    .await;
    let young = json!({
        "age": 30,
        "smoker": false,
        "comorbidity_count": 0,
        "bone_quality": "normal",
        "fragment_count": 1,
        "head_shaft_angle": 135.0,
        "interfragmentary_gap": 0.0
    });
    send_json(&app, "POST", "/records", Some(json!({ "observation": young }))).await;

    let (_, all) = send_json(&app, "GET", "/records", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, hits) = send_json(&app, "GET", "/records?q=BILATERAL", None).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["age"], 80);

    let (_, rtsa) = send_json(&app, "GET", "/records?treatment=arthroplasty_rtsa", None).await;
    assert_eq!(rtsa.as_array().unwrap().len(), 1);

    let (status, _) = send_json(&app, "GET", "/records?treatment=amputation", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn case_report_is_markdown() {
    let (_dir, app) = test_app();
    let (_, created) = send_json(
        &app,
        "POST",
        "/records",
        Some(json!({ "observation": elderly_four_part() })),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, bytes) = send(&app, "GET", &format!("/records/{id}/report"), None).await;
    assert_eq!(status, StatusCode::OK);
    let report = String::from_utf8(bytes).unwrap();
    assert!(report.starts_with(&format!("# Case report {id}")));
    assert!(report.contains("_No notes recorded._"));
}

#[tokio::test]
async fn cohort_summary_counts_matching_records() {
    let (_dir, app) = test_app();
    for notes in ["ward-7a", "ward-7b", "outpatient clinic"] {
        send_json(
            &app,
            "POST",
            "/records",
            Some(json!({ "observation": elderly_four_part(), "notes": notes })),
        )
        .await;
    }

    let (status, summary) = send_json(&app, "GET", "/cohort/summary?q=ward-7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["matching"], 2);
    assert_eq!(summary["keyword"], "ward-7");

    let (status, bytes) = send(&app, "GET", "/cohort/report", None).await;
    assert_eq!(status, StatusCode::OK);
    let report = String::from_utf8(bytes).unwrap();
    assert!(report.contains("- Patients recorded: 3"));
}

#[tokio::test]
async fn malformed_id_is_not_found() {
    let (_dir, app) = test_app();
    let (status, _) = send_json(&app, "GET", "/records/not-an-id/report", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_gets_a_json_error() {
    let (_dir, app) = test_app();
    let mut obs = elderly_four_part();
    obs["age"] = json!(-3);

    let (status, body) = send_json(&app, "POST", "/evaluate", Some(obs.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("age"));

    let (status, body) = send_json(&app, "POST", "/records", Some(json!({ "observation": obs }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send_json(&app, "GET", "/records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_all_land() {
    let (_dir, app) = test_app();

    let mut handles = Vec::new();
    for i in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            send_json(
                &app,
                "POST",
                "/records",
                Some(json!({ "observation": elderly_four_part(), "notes": format!("case {i}") })),
            )
            .await
        }));
    }
    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, records) = send_json(&app, "GET", "/records", None).await;
    assert_eq!(records.as_array().unwrap().len(), 16);
}
