use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    CourseLog, CourseRecord, NewCourse, YearMonth,
    persistence::{PersistenceError, csv_export_filename, json_export_filename},
    stats::MonthlyBreakdown,
};

#[derive(Clone)]
pub struct AppState {
    log: Arc<RwLock<CourseLog>>,
}

impl AppState {
    pub fn new(log: CourseLog) -> Self {
        Self {
            log: Arc::new(RwLock::new(log)),
        }
    }

    pub fn with_shared(log: Arc<RwLock<CourseLog>>) -> Self {
        Self { log }
    }

    fn log(&self) -> Arc<RwLock<CourseLog>> {
        self.log.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        ApiError::Internal(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                error!("internal error: {message}");
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/:id", get(get_course).delete(delete_course))
        .route("/stats/total_hours", get(total_hours))
        .route("/stats/months", get(month_options))
        .route("/stats/locations/:month", get(location_breakdown))
        .route("/export/csv", get(export_csv))
        .route("/export/json", get(export_json))
        .route("/import/json", post(import_json))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, log: CourseLog) -> std::io::Result<()> {
    let state = AppState::new(log);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_courses(State(state): State<AppState>) -> Json<Vec<CourseRecord>> {
    let log = state.log();
    let courses = {
        let guard = log.read();
        guard.by_date_desc()
    };
    Json(courses)
}

async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<u64>,
) -> Result<Json<CourseRecord>, ApiError> {
    let log = state.log();
    let result = {
        let guard = log.read();
        guard.find(course_id).cloned()
    };
    match result {
        Some(course) => Ok(Json(course)),
        None => Err(ApiError::not_found(format!("course {course_id} not found"))),
    }
}

async fn create_course(
    State(state): State<AppState>,
    Json(fields): Json<NewCourse>,
) -> Result<(StatusCode, Json<CourseRecord>), ApiError> {
    let log = state.log();
    let created = {
        let mut guard = log.write();
        guard.add(fields)?
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let log = state.log();
    let removed = {
        let mut guard = log.write();
        guard.remove(course_id)?
    };
    if !removed {
        return Err(ApiError::not_found(format!("course {course_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn total_hours(State(state): State<AppState>) -> Json<serde_json::Value> {
    let log = state.log();
    let total = {
        let guard = log.read();
        guard.total_hours()
    };
    Json(json!({ "totalHours": total }))
}

async fn month_options(State(state): State<AppState>) -> Json<Vec<String>> {
    let log = state.log();
    let today = Local::now().date_naive();
    let months = {
        let guard = log.read();
        guard.month_options(today)
    };
    Json(months.iter().map(YearMonth::to_string).collect())
}

async fn location_breakdown(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let month = YearMonth::from_str(&month).map_err(|err| ApiError::invalid(err.to_string()))?;
    let log = state.log();
    let breakdown = {
        let guard = log.read();
        guard.location_breakdown(month)
    };
    let body = match breakdown {
        MonthlyBreakdown::NoData => json!({ "month": month.to_string(), "noData": true }),
        MonthlyBreakdown::Locations(entries) => {
            json!({ "month": month.to_string(), "locations": entries })
        }
    };
    Ok(Json(body))
}

fn attachment_response(content_type: &str, filename: String, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

async fn export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let log = state.log();
    let bytes = {
        let guard = log.read();
        guard.export_csv()?
    };
    let filename = csv_export_filename(Local::now().date_naive());
    Ok(attachment_response(
        "text/csv; charset=utf-8",
        filename,
        bytes,
    ))
}

async fn export_json(State(state): State<AppState>) -> Result<Response, ApiError> {
    let log = state.log();
    let bytes = {
        let guard = log.read();
        guard.export_json()?
    };
    let filename = json_export_filename(Local::now().date_naive());
    Ok(attachment_response("application/json", filename, bytes))
}

/// Replaces the whole collection from an uploaded JSON document. The write
/// lock serializes competing imports; a rejected document leaves the
/// current collection untouched.
async fn import_json(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    let log = state.log();
    let result = {
        let mut guard = log.write();
        guard.import_json(&body)
    };
    match result {
        Ok(count) => Ok(Json(json!({ "imported": count }))),
        Err(err @ PersistenceError::Serialization(_)) => {
            info!("import rejected: {err}");
            Err(ApiError::invalid(format!("import rejected: {err}")))
        }
        Err(err) => Err(ApiError::from(err)),
    }
}
