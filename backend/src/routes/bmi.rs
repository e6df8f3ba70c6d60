//! BMI calculation and history API routes

use crate::error::{ApiError, ApiResult};
use crate::repositories::HistoryStore;
use crate::services::BmiService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bmi_calculator_shared::{
    validation::parse_gender, DisplayPayload, HistoryEntry, InvalidInputError, MeasurementForm,
};
use serde::{Deserialize, Serialize};

/// Create BMI routes
pub fn bmi_routes() -> Router<AppState> {
    Router::new()
        .route("/bmi", post(calculate))
        .route("/history", get(get_history).delete(clear_history))
}

/// Form submission. Values are the raw text typed by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub weight: String,
    pub height: String,
    pub age: String,
    pub gender: String,
}

impl CalculateRequest {
    fn into_form(self) -> Result<MeasurementForm, InvalidInputError> {
        Ok(MeasurementForm {
            gender: parse_gender(&self.gender)?,
            weight: self.weight,
            height: self.height,
            age: self.age,
        })
    }
}

/// Stored history, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub count: usize,
    pub capacity: usize,
}

/// Run a store operation on the blocking pool while holding the store lock
async fn with_store<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&mut HistoryStore) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    let history = state.history();
    tokio::task::spawn_blocking(move || {
        let mut store = history.blocking_lock();
        op(&mut store)
    })
    .await
    .map_err(anyhow::Error::from)?
}

/// POST /api/v1/bmi - Compute metrics and record them in the history
async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<CalculateRequest>,
) -> Result<Json<DisplayPayload>, ApiError> {
    let form = req.into_form()?;

    let payload = with_store(&state, move |store| {
        BmiService::calculate(store, &form, BmiService::now())
    })
    .await?;

    Ok(Json(payload))
}

/// GET /api/v1/history - List stored results
async fn get_history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, ApiError> {
    let store = state.history.lock().await;
    let entries = BmiService::history(&store);

    Ok(Json(HistoryResponse {
        count: entries.len(),
        capacity: store.capacity(),
        entries,
    }))
}

/// DELETE /api/v1/history - Remove all stored results
async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    with_store(&state, BmiService::clear_history).await?;
    Ok(StatusCode::NO_CONTENT)
}
