use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use es_core::Error;
use crate::AppState;

const INDEX_HTML: &str = include_str!("../static/index.html");
const SCRIPT_JS: &str = include_str!("../static/script.js");

pub const MISSING_PARAMS_MESSAGE: &str = "Please provide both 'company' and 'quarter' parameters.";

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub company: Option<String>,
    pub quarter: Option<String>,
}

impl AnalyzeParams {
    /// Both parameters must be present and non-empty.
    fn validate(self) -> es_core::Result<(String, String)> {
        match (self.company, self.quarter) {
            (Some(company), Some(quarter)) if !company.is_empty() && !quarter.is_empty() => {
                Ok((company, quarter))
            }
            _ => Err(Error::Validation(MISSING_PARAMS_MESSAGE.to_string())),
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

pub async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], SCRIPT_JS)
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
) -> Response {
    let (company, quarter) = match params.validate() {
        Ok(pair) => pair,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.message()),
    };

    let record = state.requester.summarize(&company, &quarter).await;

    if let Some(message) = record.error_message() {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, message);
    }

    Json(record).into_response()
}

pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "ok": true })))
}
