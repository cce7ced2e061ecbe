use crate::category::CategoryTable;
use crate::error::{BlockportError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the category overrides inside a config directory.
pub const CATEGORIES_FILE: &str = "categories.json";

/// Loader for user configuration files
///
/// Looks for overrides in a custom directory first, then in the default
/// `~/.config/blockport` directory. Profiles found on disk are layered over
/// the built-in [`CategoryTable`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Custom config directory path
    custom_dir: Option<PathBuf>,
    /// Default config directory path
    standard_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that only knows the built-in table
    pub fn new() -> Self {
        Self { custom_dir: None, standard_dir: None }
    }

    /// Create a loader for the default directory plus a custom override directory
    pub fn with_custom_dir<P: AsRef<Path>>(path: P) -> Self {
        let mut builder = ConfigLoaderBuilder::new().custom_dir(path);

        if let Some(standard_dir) = Self::default_standard_dir() {
            builder = builder.standard_dir(standard_dir);
        }

        builder.build()
    }

    /// Load the category table
    ///
    /// The standard directory is applied first, then the custom one, so a
    /// profile in the custom directory wins.
    pub fn load_categories(&self) -> Result<CategoryTable> {
        let mut table = CategoryTable::default();

        for path in self.find_config_files() {
            let overlay = Self::parse_categories(&path)?;
            debug!(path = %path.display(), profiles = overlay.len(), "loaded category overrides");
            table.merge(overlay);
        }

        Ok(table)
    }

    /// Parse a single categories file
    pub fn parse_categories(path: &Path) -> Result<CategoryTable> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| BlockportError::ConfigError(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Existing category files in application order
    fn find_config_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for dir in [&self.standard_dir, &self.custom_dir].into_iter().flatten() {
            let file_path = dir.join(CATEGORIES_FILE);
            if file_path.exists() && !files.contains(&file_path) {
                files.push(file_path);
            }
        }

        files
    }

    /// Get default config directory (~/.config/blockport)
    fn default_standard_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("blockport"))
    }
}

/// Builder for ConfigLoader
#[derive(Debug)]
pub struct ConfigLoaderBuilder {
    custom_dir: Option<PathBuf>,
    standard_dir: Option<PathBuf>,
}

impl ConfigLoaderBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self { custom_dir: None, standard_dir: None }
    }

    /// Set custom config directory
    pub fn custom_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.custom_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set standard config directory
    pub fn standard_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.standard_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the ConfigLoader
    pub fn build(self) -> ConfigLoader {
        ConfigLoader { custom_dir: self.custom_dir, standard_dir: self.standard_dir }
    }
}

impl Default for ConfigLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        let mut builder = ConfigLoaderBuilder::new();

        if let Some(standard_dir) = Self::default_standard_dir() {
            builder = builder.standard_dir(standard_dir);
        }

        builder.build()
    }
}
