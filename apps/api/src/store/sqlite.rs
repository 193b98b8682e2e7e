//! SQLite-backed implementation of the store contract.
//!
//! Timestamps are assigned here (not by SQLite defaults) so that a freshly
//! created row has `created_at == updated_at` exactly, and so ordering is
//! consistent with what the adapter hands back.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{Fact, Preset};
use crate::store::seed::{
    DEFAULT_FACTS, DEFAULT_OUTPUT_STRUCTURE, DEFAULT_PRESET_NAME, DEFAULT_SYSTEM_PROMPT,
};
use crate::store::{Store, StoreError, MAX_PRESETS};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn preset_count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM presets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_presets(&self) -> Result<Vec<Preset>, StoreError> {
        let presets =
            sqlx::query_as::<_, Preset>("SELECT * FROM presets ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(presets)
    }

    async fn get_preset(&self, id: i64) -> Result<Option<Preset>, StoreError> {
        let preset = sqlx::query_as::<_, Preset>("SELECT * FROM presets WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(preset)
    }

    async fn create_preset(
        &self,
        name: &str,
        system_prompt: &str,
        output_structure: &str,
    ) -> Result<Preset, StoreError> {
        // Check-then-insert; see the trait docs for the accepted race window.
        if self.preset_count().await? >= MAX_PRESETS {
            return Err(StoreError::CapacityExceeded);
        }

        let now = Utc::now();
        let preset = sqlx::query_as::<_, Preset>(
            r#"
            INSERT INTO presets (name, system_prompt, output_structure, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(system_prompt)
        .bind(output_structure)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(preset)
    }

    async fn update_preset(
        &self,
        id: i64,
        name: &str,
        system_prompt: &str,
        output_structure: &str,
    ) -> Result<Preset, StoreError> {
        let preset = sqlx::query_as::<_, Preset>(
            r#"
            UPDATE presets
            SET name = ?1, system_prompt = ?2, output_structure = ?3, updated_at = ?4
            WHERE id = ?5
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(system_prompt)
        .bind(output_structure)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        preset.ok_or(StoreError::NotFound("Preset"))
    }

    async fn delete_preset(&self, id: i64) -> Result<(), StoreError> {
        // Count guard first: the collection may never be emptied, even when
        // the requested id does not exist.
        if self.preset_count().await? <= 1 {
            return Err(StoreError::LastRemaining);
        }

        let result = sqlx::query("DELETE FROM presets WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Preset"));
        }
        Ok(())
    }

    async fn list_facts(&self) -> Result<Vec<Fact>, StoreError> {
        let facts = sqlx::query_as::<_, Fact>(
            "SELECT * FROM facts ORDER BY usage_count DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(facts)
    }

    async fn get_fact(&self, id: i64) -> Result<Option<Fact>, StoreError> {
        let fact = sqlx::query_as::<_, Fact>("SELECT * FROM facts WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fact)
    }

    async fn create_fact(&self, fact_text: &str, category: &str) -> Result<Fact, StoreError> {
        let now = Utc::now();
        let fact = sqlx::query_as::<_, Fact>(
            r#"
            INSERT INTO facts (fact_text, category, usage_count, created_at, updated_at)
            VALUES (?1, ?2, 0, ?3, ?3)
            RETURNING *
            "#,
        )
        .bind(fact_text)
        .bind(category)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(fact)
    }

    async fn update_fact(
        &self,
        id: i64,
        fact_text: &str,
        category: &str,
    ) -> Result<Fact, StoreError> {
        // usage_count is deliberately untouched here.
        let fact = sqlx::query_as::<_, Fact>(
            r#"
            UPDATE facts
            SET fact_text = ?1, category = ?2, updated_at = ?3
            WHERE id = ?4
            RETURNING *
            "#,
        )
        .bind(fact_text)
        .bind(category)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        fact.ok_or(StoreError::NotFound("Fact"))
    }

    async fn delete_fact(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM facts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Fact"));
        }
        Ok(())
    }

    async fn increment_fact_usage(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE facts SET usage_count = usage_count + 1, updated_at = ?1 WHERE id = ?2",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Fact"));
        }
        Ok(())
    }

    async fn seed_defaults(&self) -> Result<(), StoreError> {
        if self.preset_count().await? == 0 {
            self.create_preset(
                DEFAULT_PRESET_NAME,
                DEFAULT_SYSTEM_PROMPT,
                DEFAULT_OUTPUT_STRUCTURE,
            )
            .await?;
            info!("Default preset seeded");
        }

        let fact_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM facts")
            .fetch_one(&self.pool)
            .await?;
        if fact_count == 0 {
            for fact in DEFAULT_FACTS {
                self.create_fact(fact, "").await?;
            }
            info!("Default facts seeded");
        }

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::time::Duration;

    async fn test_store() -> SqliteStore {
        // A single connection keeps the in-memory database alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        db::migrate(&pool).await.expect("schema");
        SqliteStore::new(pool)
    }

    // Sub-millisecond inserts can share a timestamp; nudge the clock so
    // creation-time ordering is deterministic in tests.
    async fn tick() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    #[tokio::test]
    async fn test_seed_empty_store_then_reseed_is_noop() {
        let store = test_store().await;
        store.seed_defaults().await.unwrap();

        let presets = store.list_presets().await.unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].name, "Default");
        assert!(!presets[0].system_prompt.is_empty());
        assert!(!presets[0].output_structure.is_empty());

        let facts = store.list_facts().await.unwrap();
        assert_eq!(facts.len(), 6);
        assert!(facts.iter().all(|f| f.usage_count == 0));
        assert!(facts.iter().all(|f| f.category.is_empty()));

        // Second initialization must not duplicate anything.
        store.seed_defaults().await.unwrap();
        assert_eq!(store.list_presets().await.unwrap().len(), 1);
        assert_eq!(store.list_facts().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_seed_skips_nonempty_collections_independently() {
        let store = test_store().await;
        store.create_preset("Mine", "prompt", "").await.unwrap();

        store.seed_defaults().await.unwrap();

        // Preset collection was non-empty: untouched. Facts were empty: seeded.
        let presets = store.list_presets().await.unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].name, "Mine");
        assert_eq!(store.list_facts().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_preset_capacity_ceiling() {
        let store = test_store().await;
        for i in 0..5 {
            store
                .create_preset(&format!("p{i}"), "prompt", "")
                .await
                .unwrap();
        }

        let err = store.create_preset("p5", "prompt", "").await.unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded));
        assert_eq!(store.list_presets().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_delete_last_preset_refused() {
        let store = test_store().await;
        let preset = store.create_preset("only", "prompt", "").await.unwrap();

        let err = store.delete_preset(preset.id).await.unwrap_err();
        assert!(matches!(err, StoreError::LastRemaining));
        assert_eq!(store.list_presets().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_count_guard_fires_before_existence_check() {
        let store = test_store().await;
        store.create_preset("only", "prompt", "").await.unwrap();

        // Bogus id, but the collection has a single preset: still the guard.
        let err = store.delete_preset(9999).await.unwrap_err();
        assert!(matches!(err, StoreError::LastRemaining));
    }

    #[tokio::test]
    async fn test_delete_missing_preset_not_found() {
        let store = test_store().await;
        store.create_preset("a", "prompt", "").await.unwrap();
        store.create_preset("b", "prompt", "").await.unwrap();

        let err = store.delete_preset(9999).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound("Preset")));
        assert_eq!(store.list_presets().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_then_get_preset_roundtrip() {
        let store = test_store().await;
        let created = store
            .create_preset("Launch", "system text", "structure text")
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get_preset(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Launch");
        assert_eq!(fetched.system_prompt, "system text");
        assert_eq!(fetched.output_structure, "structure text");
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_get_missing_preset_is_none() {
        let store = test_store().await;
        assert!(store.get_preset(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_preset_refreshes_updated_at_only() {
        let store = test_store().await;
        let created = store.create_preset("old", "old prompt", "").await.unwrap();
        tick().await;

        let updated = store
            .update_preset(created.id, "new", "new prompt", "new structure")
            .await
            .unwrap();
        assert_eq!(updated.name, "new");
        assert_eq!(updated.system_prompt, "new prompt");
        assert_eq!(updated.output_structure, "new structure");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_preset_not_found() {
        let store = test_store().await;
        let err = store.update_preset(7, "n", "p", "").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound("Preset")));
    }

    #[tokio::test]
    async fn test_presets_listed_in_creation_order() {
        let store = test_store().await;
        for name in ["first", "second", "third"] {
            store.create_preset(name, "prompt", "").await.unwrap();
            tick().await;
        }

        let names: Vec<String> = store
            .list_presets()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_fact_create_then_get_roundtrip() {
        let store = test_store().await;
        let created = store.create_fact("water is wet", "science").await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.usage_count, 0);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get_fact(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.fact_text, "water is wet");
        assert_eq!(fetched.category, "science");
    }

    #[tokio::test]
    async fn test_increment_survives_interleaved_update() {
        let store = test_store().await;
        let fact = store.create_fact("text", "").await.unwrap();

        store.increment_fact_usage(fact.id).await.unwrap();
        store.increment_fact_usage(fact.id).await.unwrap();
        store
            .update_fact(fact.id, "edited text", "cat")
            .await
            .unwrap();
        store.increment_fact_usage(fact.id).await.unwrap();

        let fact = store.get_fact(fact.id).await.unwrap().unwrap();
        assert_eq!(fact.usage_count, 3);
        assert_eq!(fact.fact_text, "edited text");
        assert_eq!(fact.category, "cat");
    }

    #[tokio::test]
    async fn test_increment_missing_fact_not_found() {
        let store = test_store().await;
        let err = store.increment_fact_usage(1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound("Fact")));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_fact_not_found() {
        let store = test_store().await;
        let err = store.update_fact(1, "t", "").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound("Fact")));
        let err = store.delete_fact(1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound("Fact")));
        assert!(store.list_facts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_fact() {
        let store = test_store().await;
        let fact = store.create_fact("short lived", "").await.unwrap();
        store.delete_fact(fact.id).await.unwrap();
        assert!(store.get_fact(fact.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_facts_ordered_by_usage_then_recency() {
        let store = test_store().await;
        let a = store.create_fact("a", "").await.unwrap();
        tick().await;
        let b = store.create_fact("b", "").await.unwrap();
        tick().await;
        let c = store.create_fact("c", "").await.unwrap();

        // usage: a=3, b=1, c=3
        for _ in 0..3 {
            store.increment_fact_usage(a.id).await.unwrap();
            store.increment_fact_usage(c.id).await.unwrap();
        }
        store.increment_fact_usage(b.id).await.unwrap();

        let order: Vec<i64> = store
            .list_facts()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        // Both usage-3 facts first, newest creation first among them.
        assert_eq!(order, [c.id, a.id, b.id]);
    }
}
