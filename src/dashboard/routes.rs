// src/dashboard/routes.rs
//! Handlers for the dashboard page and its JSON API.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DashboardContext, chart};
use crate::data::{self, GroupCount, Selection, TimeSummary};
use crate::model::{AgeGroup, RunnerResult};

const INDEX_HTML: &str = include_str!("assets/dashboard.html");

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: msg.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/* ---------------- Responses ---------------- */

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records: usize,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub years: Vec<i32>,
    pub age_groups: Vec<AgeGroup>,
    pub source: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    /// Comma-separated race years; absent or empty means all.
    pub years: Option<String>,
    /// Comma-separated age group labels; absent or empty means all.
    pub age_groups: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub total: usize,
    pub rows: Vec<RunnerResult>,
    pub counts: Vec<GroupCount>,
    pub summary: Vec<TimeSummary>,
    pub figure: Value,
}

/* ---------------- Handlers ---------------- */

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health(State(ctx): State<Arc<DashboardContext>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: ctx.data.dataset().len(),
    })
}

pub async fn options(State(ctx): State<Arc<DashboardContext>>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        years: ctx.data.available_years(),
        age_groups: ctx.data.available_age_groups(),
        source: ctx.source.display().to_string(),
    })
}

pub async fn results(
    State(ctx): State<Arc<DashboardContext>>,
    Query(q): Query<ResultsQuery>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let sel = Selection::from_query(q.years.as_deref(), q.age_groups.as_deref())
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let view = ctx.data.filter(&sel);
    let counts = data::counts_by_year_and_group(&view);
    let figure = chart::runners_per_year(&counts);

    Ok(Json(ResultsResponse {
        total: view.len(),
        rows: view.to_owned_rows(),
        summary: data::finish_time_summary(&view),
        counts,
        figure,
    }))
}
