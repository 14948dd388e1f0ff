use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const DATABASE_FILE: &str = "soullink.sqlite";

/// Owns the on-disk layout under the configured data folder.
#[derive(Debug, Clone)]
pub struct DataDirManager {
    root: PathBuf,
}

impl DataDirManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data folder itself (`DATA_FOLDER`, `./data` by default).
    pub fn data_dir(&self) -> &Path {
        &self.root
    }

    /// The SQLite session store (`<data>/soullink.sqlite`).
    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }

    /// Creates the data folder if it does not exist.
    pub fn init(&self) -> Result<(), std::io::Error> {
        if !self.root.exists() {
            info!("Creating data directory: {:?}", self.root);
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}
