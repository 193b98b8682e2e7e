//! Axum route handlers for the fact collection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::models::Fact;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactInput {
    pub fact_text: Option<String>,
    pub category: Option<String>,
}

impl FactInput {
    /// Fact text is required and stored trimmed; category defaults to "".
    fn validated(&self) -> Result<(&str, &str), AppError> {
        let fact_text = self.fact_text.as_deref().unwrap_or("").trim();
        if fact_text.is_empty() {
            return Err(AppError::Validation("Fact text is required".to_string()));
        }
        Ok((fact_text, self.category.as_deref().unwrap_or("")))
    }
}

/// GET /api/facts — most-used first, newest-first tiebreak.
pub async fn handle_list_facts(State(state): State<AppState>) -> Result<Json<Vec<Fact>>, AppError> {
    let facts = state.store.list_facts().await?;
    Ok(Json(facts))
}

/// GET /api/facts/:id
pub async fn handle_get_fact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Fact>, AppError> {
    let fact = state
        .store
        .get_fact(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Fact not found".to_string()))?;
    Ok(Json(fact))
}

/// POST /api/facts
pub async fn handle_create_fact(
    State(state): State<AppState>,
    Json(input): Json<FactInput>,
) -> Result<(StatusCode, Json<Fact>), AppError> {
    let (fact_text, category) = input.validated()?;
    let fact = state.store.create_fact(fact_text, category).await?;
    Ok((StatusCode::CREATED, Json(fact)))
}

/// PUT /api/facts/:id
pub async fn handle_update_fact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<FactInput>,
) -> Result<Json<Fact>, AppError> {
    let (fact_text, category) = input.validated()?;
    let fact = state.store.update_fact(id, fact_text, category).await?;
    Ok(Json(fact))
}

/// DELETE /api/facts/:id
pub async fn handle_delete_fact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.delete_fact(id).await?;
    Ok(Json(json!({ "message": "Fact deleted successfully" })))
}

/// POST /api/facts/:id/use
pub async fn handle_use_fact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.increment_fact_usage(id).await?;
    Ok(Json(json!({ "message": "Usage count updated" })))
}
