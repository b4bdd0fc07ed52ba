use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use grant_eligibility::eligibility::{EligibilityResult, ResearcherRecord, RosterNotice};
use grant_eligibility::error::AppError;
use grant_eligibility::roster::RosterImporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::info;

/// Researchers may arrive as roster CSV text, as JSON records, or both; CSV
/// rows come first in the response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EligibilityRequest {
    #[serde(default)]
    pub(crate) roster_csv: Option<String>,
    #[serde(default)]
    pub(crate) researchers: Vec<ResearcherRecord>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityResponse {
    pub(crate) today: NaiveDate,
    pub(crate) rows: Vec<EligibilityRow>,
    pub(crate) notices: Vec<NoticeView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityRow {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) eligibility: EligibilityResult,
}

#[derive(Debug, Serialize)]
pub(crate) struct NoticeView {
    pub(crate) row: usize,
    pub(crate) message: String,
}

impl From<&RosterNotice> for NoticeView {
    fn from(notice: &RosterNotice) -> Self {
        Self {
            row: notice.row,
            message: notice.message(),
        }
    }
}

pub(crate) fn eligibility_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/eligibility", post(eligibility_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn eligibility_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<EligibilityRequest>,
) -> Result<Json<EligibilityResponse>, AppError> {
    let EligibilityRequest {
        roster_csv,
        researchers,
        today,
    } = payload;

    let mut records = match roster_csv {
        Some(csv) => {
            let roster = RosterImporter::from_reader(Cursor::new(csv.into_bytes()))?;
            roster.records().to_vec()
        }
        None => Vec::new(),
    };
    records.extend(researchers);

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let evaluation = state.engine.evaluate_roster(&records, today);
    info!(
        researchers = records.len(),
        notices = evaluation.notices.len(),
        %today,
        "eligibility request evaluated"
    );

    let rows = records
        .into_iter()
        .zip(evaluation.results)
        .map(|(record, eligibility)| EligibilityRow {
            first_name: record.first_name,
            last_name: record.last_name,
            eligibility,
        })
        .collect();
    let notices = evaluation.notices.iter().map(NoticeView::from).collect();

    Ok(Json(EligibilityResponse {
        today,
        rows,
        notices,
    }))
}
