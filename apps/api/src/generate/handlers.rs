//! Axum route handler for the generation proxy.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generate::prompts::{build_system_prompt, build_user_prompt, resolve_prompt_fields};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub description: Option<String>,
    pub metrics: Option<String>,
    pub fact: Option<String>,
    pub creator: Option<String>,
    /// Take prompts from a stored preset.
    pub preset_id: Option<i64>,
    /// Per-request overrides; win over the preset's stored fields.
    pub system_prompt: Option<String>,
    pub output_structure: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub post: String,
}

/// POST /api/generate
///
/// One upstream round trip; failures are surfaced, never retried here.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let description = request.description.as_deref().unwrap_or("").trim();
    let metrics = request.metrics.as_deref().unwrap_or("").trim();
    let fact = request.fact.as_deref().unwrap_or("").trim();
    if description.is_empty() || metrics.is_empty() || fact.is_empty() {
        return Err(AppError::Validation(
            "All fields are required: description, metrics, and fact".to_string(),
        ));
    }

    let preset = match request.preset_id {
        Some(id) => Some(
            state
                .store
                .get_preset(id)
                .await?
                .ok_or_else(|| AppError::NotFound("Preset not found".to_string()))?,
        ),
        None => None,
    };

    let (system_prompt, output_structure) = resolve_prompt_fields(
        request.system_prompt.as_deref(),
        request.output_structure.as_deref(),
        preset.as_ref(),
    );

    let system = build_system_prompt(&system_prompt, &output_structure);
    let user = build_user_prompt(description, metrics, fact, request.creator.as_deref());

    let post = state.llm.generate(&system, &user).await?;

    Ok(Json(GenerateResponse { post }))
}
