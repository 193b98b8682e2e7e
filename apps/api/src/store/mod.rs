//! Store capability interface.
//!
//! All persistence goes through the `Store` trait. Handlers never see which
//! backend is behind it; the backend is picked once at startup from
//! `STORE_BACKEND`. Only SQLite ships today.

pub mod seed;
pub mod sqlite;

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;
use crate::db;
use crate::models::{Fact, Preset};
use crate::store::sqlite::SqliteStore;

/// Hard ceiling on the preset collection.
pub const MAX_PRESETS: i64 = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("maximum of {MAX_PRESETS} presets reached")]
    CapacityExceeded,

    #[error("cannot delete the last remaining preset")]
    LastRemaining,

    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}

/// CRUD + invariant contract shared by every backend.
///
/// Every operation is a single round trip to the backing store. The adapter
/// adds no locking: the capacity and last-remaining guards are check-then-act
/// and rely on per-statement atomicity only, so concurrent writers can race
/// past the ceiling in theory. Accepted: one process per deployment.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_presets(&self) -> Result<Vec<Preset>, StoreError>;
    async fn get_preset(&self, id: i64) -> Result<Option<Preset>, StoreError>;
    async fn create_preset(
        &self,
        name: &str,
        system_prompt: &str,
        output_structure: &str,
    ) -> Result<Preset, StoreError>;
    async fn update_preset(
        &self,
        id: i64,
        name: &str,
        system_prompt: &str,
        output_structure: &str,
    ) -> Result<Preset, StoreError>;
    /// The count guard fires before the existence check: an empty-collection
    /// outcome is refused even when the id itself is bogus.
    async fn delete_preset(&self, id: i64) -> Result<(), StoreError>;

    async fn list_facts(&self) -> Result<Vec<Fact>, StoreError>;
    async fn get_fact(&self, id: i64) -> Result<Option<Fact>, StoreError>;
    async fn create_fact(&self, fact_text: &str, category: &str) -> Result<Fact, StoreError>;
    async fn update_fact(
        &self,
        id: i64,
        fact_text: &str,
        category: &str,
    ) -> Result<Fact, StoreError>;
    async fn delete_fact(&self, id: i64) -> Result<(), StoreError>;
    async fn increment_fact_usage(&self, id: i64) -> Result<(), StoreError>;

    /// One-time insertion of the default preset and fact list; a no-op for
    /// any collection that is already non-empty.
    async fn seed_defaults(&self) -> Result<(), StoreError>;

    /// Releases the backend connection(s). Called on every shutdown path.
    async fn close(&self);
}

/// Connects the backend named in the config and returns it behind the trait.
pub async fn connect(config: &Config) -> Result<Arc<dyn Store>> {
    match config.store_backend.as_str() {
        "sqlite" => {
            let pool = db::create_pool(&config.database_url).await?;
            Ok(Arc::new(SqliteStore::new(pool)))
        }
        other => bail!("Unknown STORE_BACKEND '{other}' (supported: sqlite)"),
    }
}
