use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A short reusable domain-knowledge snippet. `usage_count` only moves through
/// the explicit increment operation, never through updates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    pub id: i64,
    pub fact_text: String,
    pub category: String,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
