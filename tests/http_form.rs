mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{constant_model, form_body, ModelDir};
use houseprice::api::router;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
}

fn post_form(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn attributes() -> Value {
    json!({
        "bedrooms": 3, "bathrooms": 2, "sqft_living": 1500, "sqft_lot": 5000,
        "floors": 1, "waterfront": 1, "view": 2, "condition": 3, "grade": 7,
        "lat": 47.5112, "long": -122.257
    })
}

#[tokio::test]
async fn index_renders_form_with_empty_output() {
    let app = router(constant_model(1.0));
    let (status, html) = send(app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("King County House price prediction"));
    assert!(html.contains("<div id=\"output-prediction\"></div>"));
    assert!(html.contains("id=\"waterfront-dropdown\""));
}

#[tokio::test]
async fn zero_clicks_keeps_output_empty_even_with_garbage() {
    let app = router(constant_model(1.0));
    let (status, html) = send(app, post_form("grade-dropdown=banana&n_clicks=0".into())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<div id=\"output-prediction\"></div>"));
}

#[tokio::test]
async fn submit_shows_formatted_constant() {
    let app = router(constant_model(540_088.1));
    let (status, html) = send(app, post_form(form_body(1, "0"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<div id=\"output-prediction\">Prediction: $540,088.10</div>"));
    assert!(html.contains("name=\"n_clicks\" value=\"2\""));
    assert!(html.contains("value=\"47.5112\""));
}

#[tokio::test]
async fn submit_uses_loaded_forest() {
    let dir = ModelDir::new();
    let (_, dry) = send(router(dir.load()), post_form(form_body(1, "0"))).await;
    assert!(dry.contains("Prediction: $450,000.00"));

    let (_, wet) = send(router(dir.load()), post_form(form_body(1, "1"))).await;
    assert!(wet.contains("Prediction: $950,000.00"));
}

#[tokio::test]
async fn submit_without_waterfront_is_unprocessable() {
    let app = router(constant_model(1.0));
    let (status, html) = send(app, post_form(form_body(1, ""))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("class=\"error\">invalid input: waterfront is required</div>"));
}

#[tokio::test]
async fn api_predict_returns_json() {
    let app = router(constant_model(1_250_000.0));
    let (status, body) = send(app, post_json(attributes())).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["price"], json!(1_250_000.0));
    assert_eq!(value["text"], "Prediction: $1,250,000.00");
    assert_eq!(value["model"], "constant-fixture");
}

#[tokio::test]
async fn api_predict_rejects_out_of_range() {
    let mut attrs = attributes();
    attrs["condition"] = json!(9);
    let (status, body) = send(router(constant_model(1.0)), post_json(attrs)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["code"], 1);

    let (status, _) = send(router(constant_model(1.0)), post_json(json!({ "bedrooms": 3 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn api_predict_non_finite_is_server_error() {
    let (status, body) = send(router(constant_model(f64::NAN)), post_json(attributes())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["code"], 4);
}

#[tokio::test]
async fn healthz_reports_fingerprint() {
    let dir = ModelDir::new();
    let model = dir.load();
    let expected = model.version.fingerprint.clone();
    let (status, body) = send(router(model), Request::get("/healthz").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["status"], "ok");
    assert_eq!(value["kind"], "random_forest");
    assert_eq!(value["model"], expected);
}

#[tokio::test]
async fn duplicated_field_is_unprocessable_and_keeps_typed_values() {
    let app = router(constant_model(1.0));
    let body = format!("{}&n_clicks=2", form_body(1, "1"));
    let (status, html) = send(app, post_form(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("duplicate field `n_clicks`"));
    assert!(html.contains("value=\"47.5112\""));
    assert!(html.contains("<option value=\"1\" selected>Yes</option>"));
}
