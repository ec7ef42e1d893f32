//! Application Configuration
//! In-code settings shared by the loader, cleaner and analyzer.

/// Settings used by every stage of the pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Number of entries kept in each "top N" ranking.
    pub top_n: usize,
    /// Rows shown in the load preview.
    pub preview_rows: usize,
    /// Replacement for missing text values.
    pub unknown_label: String,
    /// Amount token treated as a missing value (matched exactly).
    pub undisclosed_token: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            preview_rows: 5,
            unknown_label: "Unknown".to_string(),
            undisclosed_token: "undisclosed".to_string(),
        }
    }
}
