//! UI state: status line and transform console output

/// Output of the last transform, shown below the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutput {
    /// Text produced by a pipeline (count, sum, unique, ...)
    Text(String),
    /// A pipeline failed; the table was left alone
    Error(String),
}

/// UI state
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Message displayed in the status bar
    pub status_message: String,
    /// Console output area, empty until a pipeline prints something
    pub console: Option<ConsoleOutput>,
    /// Last pipeline that was run
    pub last_transform: Option<String>,
    /// Whether a file is currently being loaded
    pub is_loading: bool,
    /// Whether a file is currently being saved
    pub is_saving: bool,
    /// Whether a pipeline is running
    pub is_transforming: bool,
}

impl UiState {
    /// Create a new UI state with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a UI state with an initial status message
    pub fn with_status(message: impl Into<String>) -> Self {
        Self {
            status_message: message.into(),
            ..Self::default()
        }
    }

    /// Set the status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Check if the UI is busy (loading, saving or transforming)
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_saving || self.is_transforming
    }
}
