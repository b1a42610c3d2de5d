use crate::error::GuacoError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Static grocery dataset served verbatim to the shopping list UI.
#[derive(Debug, Clone)]
pub struct GroceryDataset {
    path: PathBuf,
}

impl GroceryDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The CSV file contents.
    pub async fn read_csv(&self) -> Result<String, GuacoError> {
        fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                GuacoError::NotFound(format!(
                    "Grocery dataset not found at {}",
                    self.path.display()
                ))
            } else {
                GuacoError::IoError(e)
            }
        })
    }
}
