use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use game_core::GameConfig;
use serde::Deserialize;
use shared::{domain::CardKind, error::GameError};

pub const SETTINGS_FILE_NAME: &str = "match_cards.toml";
pub const ENV_PREFIX: &str = "MATCH_CARDS";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub rows: usize,
    pub columns: usize,
    pub kinds: Vec<String>,
    pub preview_ms: u64,
    pub mismatch_ms: u64,
    pub tick_ms: u64,
    pub lock_restart_during_preview: bool,
    pub database_url: Option<String>,
    pub assets_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let game = GameConfig::default();
        Self {
            rows: game.rows,
            columns: game.columns,
            kinds: game.kinds.iter().map(|kind| kind.name().to_string()).collect(),
            preview_ms: game.preview.as_millis() as u64,
            mismatch_ms: game.mismatch.as_millis() as u64,
            tick_ms: game.tick.as_millis() as u64,
            lock_restart_during_preview: game.lock_restart_during_preview,
            database_url: None,
            assets_dir: None,
        }
    }
}

impl Settings {
    pub fn game_config(&self) -> Result<GameConfig, GameError> {
        let kinds = self
            .kinds
            .iter()
            .map(|raw| raw.parse::<CardKind>())
            .collect::<Result<Vec<_>, _>>()?;
        let config = GameConfig {
            rows: self.rows,
            columns: self.columns,
            kinds,
            preview: Duration::from_millis(self.preview_ms),
            mismatch: Duration::from_millis(self.mismatch_ms),
            tick: Duration::from_millis(self.tick_ms),
            lock_restart_during_preview: self.lock_restart_during_preview,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub settings_path: PathBuf,
    pub assets_dir: PathBuf,
}

impl AppPaths {
    pub fn resolve(data_dir: Option<&Path>) -> anyhow::Result<Self> {
        let root = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => storage::default_data_dir()?,
        };
        Ok(Self {
            settings_path: root.join(SETTINGS_FILE_NAME),
            assets_dir: root.join("img"),
            data_root: root,
        })
    }

    pub fn database_url(&self) -> String {
        storage::database_url_for(&self.data_root)
    }
}

/// Layers built-in defaults, `match_cards.toml` in the data directory, an
/// explicit config file and `MATCH_CARDS__*` environment variables, later
/// sources winning.
pub fn load_settings(paths: &AppPaths, explicit: Option<&Path>) -> anyhow::Result<Settings> {
    let mut builder = config::Config::builder()
        .add_source(config::File::from(paths.settings_path.as_path()).required(false));
    if let Some(path) = explicit {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("kinds"),
    );

    let settings = builder
        .build()
        .context("failed to read settings")?
        .try_deserialize::<Settings>()
        .context("invalid settings")?;
    Ok(settings)
}
