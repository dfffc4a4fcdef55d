use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::{
    DailyPlan, Motivation, ServiceError, SettingsUpdate, SettingsView, Target, WorkoutService,
};

#[derive(Clone)]
pub struct AppState {
    service: WorkoutService,
}

impl AppState {
    pub fn new(service: WorkoutService) -> Self {
        Self { service }
    }

    fn service(&self) -> &WorkoutService {
        &self.service
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::InvalidUpdate(err) => ApiError::Invalid(err.to_string()),
            other => {
                error!(error = %other, "settings update failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Invalid(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// Body of `/today` and `/tomorrow`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub date: NaiveDate,
    pub day: String,
    pub week: u32,
    pub exercises: Vec<String>,
    pub motivation: String,
    pub cost: f64,
    pub timestamp: String,
}

impl From<DailyPlan> for PlanResponse {
    fn from(plan: DailyPlan) -> Self {
        Self {
            date: plan.schedule.date,
            day: plan.schedule.day_label,
            week: plan.schedule.week,
            exercises: plan.schedule.exercises,
            motivation: plan.motivation.sentence,
            cost: plan.motivation.cost,
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayResponse {
    pub day: String,
    pub week: Option<u32>,
    pub exercises: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DayQuery {
    week: Option<u32>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/today", get(today))
        .route("/tomorrow", get(tomorrow))
        .route("/day/:name", get(day_by_name))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/motivation", get(motivation))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, service: WorkoutService) -> std::io::Result<()> {
    let state = AppState::new(service);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "workout schedule HTTP API listening");
    axum::serve(listener, app).await
}

fn timestamp() -> String {
    Local::now().to_rfc3339()
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy", "timestamp": timestamp() }))
}

async fn today(State(state): State<AppState>) -> Json<PlanResponse> {
    Json(state.service().plan(Target::Today).await.into())
}

async fn tomorrow(State(state): State<AppState>) -> Json<PlanResponse> {
    Json(state.service().plan(Target::Tomorrow).await.into())
}

async fn day_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<DayResponse>, ApiError> {
    let Query(query) = query?;
    let exercises = state.service().exercises_named(&name, query.week).await;
    Ok(Json(DayResponse {
        day: name,
        week: query.week,
        exercises,
    }))
}

async fn get_settings(State(state): State<AppState>) -> Json<SettingsView> {
    Json(SettingsView::from(&state.service().settings()))
}

async fn update_settings(
    State(state): State<AppState>,
    payload: Result<Json<SettingsUpdate>, JsonRejection>,
) -> Result<Json<SettingsView>, ApiError> {
    let Json(update) = payload?;
    if update.is_empty() {
        return Err(ApiError::Invalid("no settings fields supplied".into()));
    }
    let settings = state.service().update_settings(&update)?;
    Ok(Json(SettingsView::from(&settings)))
}

async fn motivation(State(state): State<AppState>) -> Json<Motivation> {
    Json(state.service().motivation().await)
}
