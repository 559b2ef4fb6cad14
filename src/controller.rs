// File: src/controller.rs
//! Central logic controller for the command-line operations.
//! The binary parses arguments and delegates here; every operation returns
//! its output as a string so it can be tested without a terminal.
use crate::config::{Config, Overrides};
use crate::context::AppContext;
use crate::model::parser::parse_query_date;
use crate::model::{AgendaEngine, Renderer};
use crate::storage::CategoryStore;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::fs;
use std::process::Command;

/// Coordinates config, the category store and rendering.
#[derive(Debug, Clone)]
pub struct TaskController {
    pub store: CategoryStore,
    pub engine: AgendaEngine,
    pub renderer: Renderer,
    editor: String,
}

impl TaskController {
    pub fn new(
        store: CategoryStore,
        engine: AgendaEngine,
        renderer: Renderer,
        editor: String,
    ) -> Self {
        Self {
            store,
            engine,
            renderer,
            editor,
        }
    }

    /// Builds a controller from the resolved configuration.
    ///
    /// `color` is the caller's decision (config value combined with
    /// `--no-color`); `today` anchors relative dates.
    pub fn from_config(
        ctx: &dyn AppContext,
        config: &Config,
        overrides: &Overrides,
        color: bool,
        today: NaiveDate,
    ) -> Result<Self> {
        let store = config.store(ctx, overrides)?;
        log::debug!("Using todo directory {}", store.dir().display());
        Ok(Self::new(
            store,
            config.agenda_engine(),
            Renderer::new(color, today),
            config.resolve_editor(overrides),
        ))
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Agenda for `date` (default today) across all categories.
    pub fn agenda(&self, date: Option<&str>, json: bool) -> Result<String> {
        let today = self.renderer.today;
        let date = match date {
            Some(text) => parse_query_date(text, today)
                .with_context(|| format!("Invalid date '{}'", text))?,
            None => today,
        };
        let categories = self.store.load_all()?;
        let agenda = self.engine.for_categories(&categories, date);
        log::info!("Agenda for {} has {} entries", date, agenda.entries.len());

        if json {
            let mut out = serde_json::to_string_pretty(&agenda)?;
            out.push('\n');
            return Ok(out);
        }
        Ok(self.renderer.agenda(&agenda))
    }

    /// All categories, or only `category` when given.
    pub fn list(&self, category: Option<&str>) -> Result<String> {
        match category {
            Some(name) => {
                let category = self.store.load(name)?;
                Ok(self.renderer.categories(std::slice::from_ref(&category)))
            }
            None => {
                let categories = self.store.load_all()?;
                if categories.is_empty() {
                    return Ok(format!(
                        "No categories in {}\n",
                        self.store.dir().display()
                    ));
                }
                Ok(self.renderer.categories(&categories))
            }
        }
    }

    /// Opens the category file in the editor, creating the directory first.
    /// The file itself is left for the editor to create.
    pub fn open(&self, category: &str) -> Result<()> {
        let path = self.store.path_for(category)?;
        fs::create_dir_all(self.store.dir()).with_context(|| {
            format!("Failed to create directory {}", self.store.dir().display())
        })?;

        let mut words = self.editor.split_whitespace();
        let Some(program) = words.next() else {
            bail!("No editor configured");
        };
        log::debug!("Running {} on {}", self.editor, path.display());
        let status = Command::new(program)
            .args(words)
            .arg(&path)
            .status()
            .with_context(|| format!("Failed to start editor '{}'", self.editor))?;
        if !status.success() {
            bail!("Editor '{}' exited with {}", self.editor, status);
        }
        Ok(())
    }
}
