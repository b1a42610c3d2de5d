//! Saved recipes, grouped by category, in a single JSON file.

use crate::error::GuacoError;
use crate::model::ParsedRecipe;
use log::{error, info};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// Category name to recipes, in the order they were saved.
pub type RecipeBook = BTreeMap<String, Vec<ParsedRecipe>>;

pub struct RecipeStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl RecipeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the store file.
    ///
    /// Returns `Ok(None)` when the file does not exist yet. A file that
    /// exists but does not parse is an error and is never silently replaced.
    pub async fn read(&self) -> Result<Option<RecipeBook>, GuacoError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(GuacoError::StoreIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(Some(RecipeBook::new()));
        }

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| {
                error!(
                    "Recipe store {} is corrupt: {}",
                    self.path.display(),
                    source
                );
                GuacoError::CorruptStore {
                    path: self.path.clone(),
                    source,
                }
            })
    }

    /// Read the store, treating a missing file as an empty book.
    pub async fn load(&self) -> Result<RecipeBook, GuacoError> {
        match self.read().await? {
            Some(book) => Ok(book),
            None => {
                info!(
                    "No recipe store at {}, starting empty",
                    self.path.display()
                );
                Ok(RecipeBook::new())
            }
        }
    }

    /// Append `recipe` to `category` and return how many recipes that
    /// category now holds.
    pub async fn save(&self, category: &str, recipe: ParsedRecipe) -> Result<usize, GuacoError> {
        let category = normalize_category(category)?;
        let _guard = self.write_lock.lock().await;

        let mut book = self.load().await?;
        let recipes = book.entry(category).or_default();
        recipes.push(recipe);
        let count = recipes.len();

        self.write(&book).await?;
        Ok(count)
    }

    /// Recipes saved under `category`; an unknown category is empty.
    pub async fn list(&self, category: &str) -> Result<Vec<ParsedRecipe>, GuacoError> {
        let category = normalize_category(category)?;
        let mut book = self.load().await?;
        Ok(book.remove(&category).unwrap_or_default())
    }

    /// Write through a temporary file so readers never see a partial store.
    async fn write(&self, book: &RecipeBook) -> Result<(), GuacoError> {
        let io_error = |source| GuacoError::StoreIo {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(book)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).await.map_err(io_error)?;
        fs::rename(&tmp_path, &self.path).await.map_err(io_error)?;
        Ok(())
    }
}

/// Categories are case-insensitive and must not be blank.
pub fn normalize_category(category: &str) -> Result<String, GuacoError> {
    let category = category.trim().to_lowercase();
    if category.is_empty() {
        return Err(GuacoError::InvalidInput(
            "Recipe category cannot be empty".to_string(),
        ));
    }
    Ok(category)
}
