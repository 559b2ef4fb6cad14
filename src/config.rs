// File: ./src/config.rs
// Handles configuration loading, defaults and explicit overrides.
use crate::context::AppContext;
use crate::model::AgendaEngine;
use crate::model::agenda::DEFAULT_DEADLINE_WARNING_DAYS;
use crate::storage::{CategoryStore, DEFAULT_EXTENSION};
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_EDITOR: &str = "vim";

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_deadline_warning_days() -> u32 {
    DEFAULT_DEADLINE_WARNING_DAYS
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the category files.
    #[serde(default)]
    pub todo_dir: Option<PathBuf>,
    /// Program used by `open`.
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_deadline_warning_days")]
    pub deadline_warning_days: u32,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            todo_dir: None,
            editor: None,
            // Match the serde defaults
            extension: default_extension(),
            deadline_warning_days: DEFAULT_DEADLINE_WARNING_DAYS,
            color: true,
            log_level: default_log_level(),
        }
    }
}

/// Values taken from the environment by the caller, e.g. `TODO_DIRECTORY`
/// and `EDITOR`. They win over the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub todo_dir: Option<PathBuf>,
    pub editor: Option<String>,
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults. Malformed files
    /// are still an error.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, toml_str)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Todo directory: override, then config, then the context's fallback.
    pub fn resolve_todo_dir(
        &self,
        ctx: &dyn AppContext,
        overrides: &Overrides,
    ) -> Result<PathBuf> {
        if let Some(dir) = overrides.todo_dir.as_ref().or(self.todo_dir.as_ref()) {
            return Ok(dir.clone());
        }
        ctx.default_todo_dir()
    }

    /// Editor: override, then config, then `vim`.
    pub fn resolve_editor(&self, overrides: &Overrides) -> String {
        overrides
            .editor
            .clone()
            .or_else(|| self.editor.clone())
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
    }

    pub fn store(&self, ctx: &dyn AppContext, overrides: &Overrides) -> Result<CategoryStore> {
        let dir = self.resolve_todo_dir(ctx, overrides)?;
        Ok(CategoryStore::new(dir, self.extension.clone()))
    }

    pub fn agenda_engine(&self) -> AgendaEngine {
        AgendaEngine::new(self.deadline_warning_days)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_config_uses_defaults() {
        let ctx = TestContext::new();
        assert!(Config::load(&ctx).is_err());
        let config = Config::load_or_default(&ctx).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.deadline_warning_days, 7);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "editor = \"nano\"\ndeadline_warning_days = 3\n").unwrap();

        let config = Config::load(&ctx).unwrap();
        assert_eq!(config.editor.as_deref(), Some("nano"));
        assert_eq!(config.deadline_warning_days, 3);
        assert_eq!(config.extension, "txt");
        assert!(config.color);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "deadline_warning_days = \"soon\"\n").unwrap();

        let err = Config::load_or_default(&ctx).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_save_then_load() {
        let ctx = TestContext::new();
        let config = Config {
            todo_dir: Some(PathBuf::from("/srv/todo")),
            color: false,
            ..Config::default()
        };
        config.save(&ctx).unwrap();
        assert_eq!(Config::load(&ctx).unwrap(), config);
    }

    #[test]
    fn test_overrides_win() {
        let ctx = TestContext::new();
        let config = Config {
            todo_dir: Some(PathBuf::from("/from/config")),
            editor: Some("nano".to_string()),
            ..Config::default()
        };
        let none = Overrides::default();
        assert_eq!(
            config.resolve_todo_dir(&ctx, &none).unwrap(),
            PathBuf::from("/from/config")
        );
        assert_eq!(config.resolve_editor(&none), "nano");

        let env = Overrides {
            todo_dir: Some(PathBuf::from("/from/env")),
            editor: Some("hx".to_string()),
        };
        assert_eq!(
            config.resolve_todo_dir(&ctx, &env).unwrap(),
            PathBuf::from("/from/env")
        );
        assert_eq!(config.resolve_editor(&env), "hx");

        let bare = Config::default();
        assert_eq!(bare.resolve_todo_dir(&ctx, &none).unwrap(), ctx.todo_dir());
        assert_eq!(bare.resolve_editor(&none), DEFAULT_EDITOR);
    }
}
