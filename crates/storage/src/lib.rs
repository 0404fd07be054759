use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::Score;

pub const BEST_ERRORS_FIELD: &str = "bestErrors";
pub const BEST_TIME_FIELD: &str = "bestTimeSeconds";

/// Raw view of the two persisted fields. Either may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoredBest {
    pub best_errors: Option<u32>,
    pub best_seconds: Option<u32>,
}

impl StoredBest {
    /// A best score only exists when both fields are present.
    pub fn score(self) -> Option<Score> {
        Some(Score::new(self.best_errors?, self.best_seconds?))
    }
}

#[async_trait]
pub trait BestScoreRepository: Send + Sync {
    async fn load_best(&self) -> Result<Option<Score>>;
    async fn save_best(&self, score: Score) -> Result<()>;
    async fn clear_best(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct ScoreStore {
    pool: Pool<Sqlite>,
}

impl ScoreStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite url '{database_url}'"))?
            .create_if_missing(true);
        // Every connection to an in-memory database is a separate database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 2 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open score database '{database_url}'"))?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn load(&self) -> Result<StoredBest> {
        let rows = sqlx::query("SELECT field, value FROM best_score")
            .fetch_all(&self.pool)
            .await
            .context("failed to read best score")?;

        let mut stored = StoredBest::default();
        for row in rows {
            let field: String = row.try_get("field")?;
            let slot = match field.as_str() {
                BEST_ERRORS_FIELD => &mut stored.best_errors,
                BEST_TIME_FIELD => &mut stored.best_seconds,
                other => {
                    tracing::debug!(field = other, "ignoring unknown score field");
                    continue;
                }
            };
            let raw: i64 = match row.try_get("value") {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::warn!(field = %field, "ignoring undecodable stored score field: {err}");
                    continue;
                }
            };
            match u32::try_from(raw) {
                Ok(value) => *slot = Some(value),
                Err(_) => {
                    tracing::warn!(field = %field, value = raw, "ignoring out-of-range stored score field")
                }
            }
        }
        Ok(stored)
    }

    /// Writes both fields in one transaction so a crash never leaves half a
    /// best score behind.
    pub async fn save(&self, score: Score) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for (field, value) in [
            (BEST_ERRORS_FIELD, score.errors),
            (BEST_TIME_FIELD, score.seconds),
        ] {
            sqlx::query(
                "INSERT INTO best_score (field, value) VALUES (?1, ?2)
                 ON CONFLICT(field) DO UPDATE SET value = excluded.value",
            )
            .bind(field)
            .bind(i64::from(value))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to write {field}"))?;
        }
        tx.commit().await.context("failed to commit best score")?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM best_score WHERE field IN (?1, ?2)")
            .bind(BEST_ERRORS_FIELD)
            .bind(BEST_TIME_FIELD)
            .execute(&self.pool)
            .await
            .context("failed to clear best score")?;
        Ok(())
    }
}

#[async_trait]
impl BestScoreRepository for ScoreStore {
    async fn load_best(&self) -> Result<Option<Score>> {
        Ok(self.load().await?.score())
    }

    async fn save_best(&self, score: Score) -> Result<()> {
        self.save(score).await
    }

    async fn clear_best(&self) -> Result<()> {
        self.clear().await
    }
}

/// `<local data dir>/match_cards`, the per-user home of the score database.
pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("unable to resolve local app data dir"))?;
    Ok(base.join("match_cards"))
}

pub fn database_url_for(data_dir: &Path) -> String {
    normalize_database_url(&data_dir.join("scores.sqlite3").to_string_lossy())
}

pub fn default_database_url() -> Result<String> {
    Ok(database_url_for(&default_data_dir()?))
}

/// Accepts `sqlite:` urls or plain file paths and returns a `sqlite://` url.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.contains(":memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
