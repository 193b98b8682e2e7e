use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A reusable prompt configuration. At most 5 exist at any time and the last
/// one can never be deleted, so generation always has a preset to fall back on.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: i64,
    pub name: String,
    pub system_prompt: String,
    pub output_structure: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
