//! HTTP surface: the form page, a JSON prediction endpoint and a health probe.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, RawFormRejection};
use axum::extract::{RawForm, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::common::config::AppCfg;
use crate::common::error::{HouseError, HouseResult};
use crate::data::domain::HouseAttributes;
use crate::data::input::FormInput;
use crate::inference::domain::Prediction;
use crate::inference::service;
use crate::model::domain::LoadedModel;

use super::form::{self, Output};

#[derive(Clone)]
pub struct AppState {
    model: Arc<LoadedModel>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub model_loaded: bool,
    pub model: String,
    pub kind: &'static str,
}

pub fn router(model: Arc<LoadedModel>) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/predict", post(api_predict))
        .route("/healthz", get(healthz))
        .with_state(AppState { model })
}

/// Bind `cfg.bind` and serve until ctrl-c.
pub async fn serve(cfg: &AppCfg, model: Arc<LoadedModel>) -> HouseResult<()> {
    let listener = TcpListener::bind(cfg.bind).await?;
    info!(ev = "listening", addr = %listener.local_addr()?, "serving prediction form");
    axum::serve(listener, router(model))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(ev = "shutdown", "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(ev = "signal", error = %err, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}

async fn index() -> Html<String> {
    Html(form::render_page(&form::default_input(), 0, Output::Text("")))
}

async fn submit(State(state): State<AppState>, body: Result<RawForm, RawFormRejection>) -> Response {
    let RawForm(bytes) = match body {
        Ok(body) => body,
        Err(rejection) => {
            let err = HouseError::invalid(rejection.body_text());
            return page_error(&form::default_input(), 0, &err);
        }
    };
    let input = match serde_urlencoded::from_bytes::<FormInput>(&bytes) {
        Ok(input) => input,
        Err(err) => {
            let err = HouseError::invalid(format!("malformed form: {err}"));
            return page_error(&salvage_widgets(&bytes), 0, &err);
        }
    };

    let n_clicks = match input.clicks() {
        Ok(n) => n,
        Err(err) => return page_error(&input, 0, &err),
    };

    match service::update_prediction(&state.model, n_clicks, &input) {
        Ok(text) => Html(form::render_page(&input, n_clicks, Output::Text(&text))).into_response(),
        Err(err) => page_error(&input, n_clicks, &err),
    }
}

/// Best-effort widget values from a body that did not fit [`FormInput`], so a
/// rejected page still shows what the user typed. First occurrence wins.
fn salvage_widgets(bytes: &[u8]) -> FormInput {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes).unwrap_or_default();
    let mut input = FormInput::default();
    for (id, value) in pairs {
        if input.widget(&id).is_none() {
            input.set_widget(&id, value);
        }
    }
    input
}

fn page_error(input: &FormInput, n_clicks: u32, err: &HouseError) -> Response {
    log_failure(err);
    let message = err.to_string();
    let page = form::render_page(input, n_clicks, Output::Error(&message));
    (status_for(err), Html(page)).into_response()
}

async fn api_predict(
    State(state): State<AppState>,
    body: Result<Json<HouseAttributes>, JsonRejection>,
) -> Result<Json<Prediction>, HouseError> {
    let Json(attrs) = body.map_err(|rejection| HouseError::invalid(rejection.body_text()))?;
    service::predict(&state.model, attrs).map(Json)
}

async fn healthz(State(state): State<AppState>) -> Json<Health> {
    let version = &state.model.version;
    Json(Health {
        status: "ok",
        model_loaded: true,
        model: version.fingerprint.clone(),
        kind: version.kind.as_str(),
    })
}

fn status_for(err: &HouseError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn log_failure(err: &HouseError) {
    let code = err.code() as u32;
    if err.is_client_error() {
        info!(ev = "rejected", code, error = %err, "request rejected");
    } else {
        warn!(ev = "failed", code, error = %err, "prediction failed");
    }
}

impl IntoResponse for HouseError {
    fn into_response(self) -> Response {
        log_failure(&self);
        let body = json!({ "error": self.to_string(), "code": self.code() as u32 });
        (status_for(&self), Json(body)).into_response()
    }
}
