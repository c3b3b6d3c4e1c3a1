//! Editor configuration persistence
//!
//! Reads user preferences from `~/.config/whisk/config.yaml`

use serde::{Deserialize, Serialize};

use crate::table::Delimiter;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Delimiter for files whose extension and content say nothing useful
    pub default_delimiter: Delimiter,
    /// Shape of the table created when no file is opened
    pub blank_rows: usize,
    pub blank_columns: usize,
    /// Maximum number of undoable edits kept; 0 keeps all of them
    pub undo_limit: usize,
    /// Grid area printed by the front-end
    pub visible_rows: usize,
    pub visible_columns: usize,
    /// Longer cell text is truncated with an ellipsis when printed
    pub max_cell_width: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_delimiter: Delimiter::Comma,
            blank_rows: 1000,
            blank_columns: 26,
            undo_limit: 0,
            visible_rows: 20,
            visible_columns: 8,
            max_cell_width: 16,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse YAML, filling missing keys with defaults
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config.sanitized())
    }

    /// Zero-sized viewports and cell widths are replaced with 1
    fn sanitized(mut self) -> Self {
        self.visible_rows = self.visible_rows.max(1);
        self.visible_columns = self.visible_columns.max(1);
        self.max_cell_width = self.max_cell_width.max(1);
        self
    }
}
