//! Axum route handlers for the preset collection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::models::Preset;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetInput {
    pub name: Option<String>,
    pub system_prompt: Option<String>,
    pub output_structure: Option<String>,
}

impl PresetInput {
    /// Name and system prompt are required; output structure defaults to "".
    fn validated(&self) -> Result<(&str, &str, &str), AppError> {
        let name = self.name.as_deref().unwrap_or("").trim();
        let system_prompt = self.system_prompt.as_deref().unwrap_or("");
        if name.is_empty() || system_prompt.trim().is_empty() {
            return Err(AppError::Validation(
                "Name and system prompt are required".to_string(),
            ));
        }
        Ok((
            name,
            system_prompt,
            self.output_structure.as_deref().unwrap_or(""),
        ))
    }
}

/// GET /api/presets
pub async fn handle_list_presets(
    State(state): State<AppState>,
) -> Result<Json<Vec<Preset>>, AppError> {
    let presets = state.store.list_presets().await?;
    Ok(Json(presets))
}

/// GET /api/presets/:id
pub async fn handle_get_preset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Preset>, AppError> {
    let preset = state
        .store
        .get_preset(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Preset not found".to_string()))?;
    Ok(Json(preset))
}

/// POST /api/presets
pub async fn handle_create_preset(
    State(state): State<AppState>,
    Json(input): Json<PresetInput>,
) -> Result<(StatusCode, Json<Preset>), AppError> {
    let (name, system_prompt, output_structure) = input.validated()?;
    let preset = state
        .store
        .create_preset(name, system_prompt, output_structure)
        .await?;
    Ok((StatusCode::CREATED, Json(preset)))
}

/// PUT /api/presets/:id
pub async fn handle_update_preset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<PresetInput>,
) -> Result<Json<Preset>, AppError> {
    let (name, system_prompt, output_structure) = input.validated()?;
    let preset = state
        .store
        .update_preset(id, name, system_prompt, output_structure)
        .await?;
    Ok(Json(preset))
}

/// DELETE /api/presets/:id
pub async fn handle_delete_preset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.delete_preset(id).await?;
    Ok(Json(json!({ "message": "Preset deleted successfully" })))
}
