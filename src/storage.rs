// Discovers and loads category files from the todo directory.
//
// Each category is one plaintext file `<dir>/<name>.<extension>`. Loading is
// all-or-nothing: a parse error in any file fails the whole load.
use crate::error::StoreError;
use crate::model::{Category, parse};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "txt";

#[derive(Debug, Clone)]
pub struct CategoryStore {
    dir: PathBuf,
    extension: String,
}

impl CategoryStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Category names found in the directory, sorted by name.
    /// A missing directory has no categories.
    pub fn discover(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.exists() {
            log::info!("Todo directory {} does not exist", self.dir.display());
            return Ok(vec![]);
        }
        let io_err = |source| StoreError::Io {
            path: self.dir.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        log::debug!("Discovered {} categories in {}", names.len(), self.dir.display());
        Ok(names)
    }

    /// File path backing `name`, whether or not it exists yet.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, self.extension)))
    }

    pub fn load(&self, name: &str) -> Result<Category, StoreError> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(StoreError::UnknownCategory(name.to_string()));
        }
        let text = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let tasks = parse(&text).map_err(|source| StoreError::Parse {
            category: name.to_string(),
            path: path.clone(),
            source,
        })?;
        log::debug!("Loaded {} tasks from {}", tasks.len(), path.display());
        Ok(Category::new(name, path, tasks))
    }

    /// Loads every discovered category; the first failure aborts.
    pub fn load_all(&self) -> Result<Vec<Category>, StoreError> {
        self.discover()?
            .iter()
            .map(|name| self.load(name))
            .collect()
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    let invalid = || StoreError::InvalidCategory(name.to_string());
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => return Err(invalid()),
    }
    if name.contains(['/', '\\']) {
        return Err(invalid());
    }
    Ok(())
}
