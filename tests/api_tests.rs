use actix_web::{http::header, test, web, App};
use serde_json::{json, Value};
use stewards_decision_server::decision::DecisionService;
use stewards_decision_server::{configure_api, AppState};

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::with_service(DecisionService::direct())))
                .configure(configure_api),
        )
        .await
    };
}

#[actix_web::test]
async fn test_decision_pdf_with_capitalised_fields() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/decision-pdf")
        .set_json(json!({
            "Driver": "Lewis Hamilton",
            "CarNumber": 44,
            "Team": "Mercedes",
            "Event": "race",
            "Cause": "Causing a collision",
            "Penalty": "5-second time penalty"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert_eq!(content_type, "application/pdf");
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("filename=\"decision_Lewis_Hamilton_"));
    assert!(disposition.contains(".pdf\""));

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF"));
}

#[actix_web::test]
async fn test_decision_pdf_with_empty_body_uses_defaults() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/decision-pdf")
        .set_json(json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("decision_unknown_"));
}

#[actix_web::test]
async fn test_decision_pdf_rejects_malformed_json() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/decision-pdf")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ malformed json ")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BadRequest");
}

#[actix_web::test]
async fn test_catalog_listing() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/catalog").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 16);
    assert_eq!(entries[6]["cause"], "Leaving the pit under red light");
    assert_eq!(entries[6]["penalty"]["race"], "Drive through");
}

#[actix_web::test]
async fn test_catalog_resolve() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/catalog/resolve")
        .set_json(json!({ "cause": "Jump start (but stops)", "event": "sprint" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["penalty"], "5 sec time penalty");
    assert_eq!(body["discretionary"], false);
    assert_eq!(body["session"], "race");

    let req = test::TestRequest::post()
        .uri("/api/catalog/resolve")
        .set_json(json!({
            "Cause": "Ignoring yellow flags",
            "Event": "practice",
            "Penalty": "Grid penalty +5"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["penalty"], "Grid penalty +5");
    assert_eq!(body["discretionary"], true);
    assert_eq!(body["session"], "training");
}
