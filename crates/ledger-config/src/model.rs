use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_PAGE_WINDOW: usize = 4;
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Stores user-configurable shell preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Identity used to scope sales fetches when the shell starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for sales data. Defaults to `~/Documents/SalesLedger`.
    pub data_root: Option<PathBuf>,

    /// Minutes east of UTC used to decide which month a sale belongs to.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    #[serde(default = "Config::default_page_window")]
    pub page_window: usize,

    #[serde(default)]
    pub currency_symbol: String,

    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identity: None,
            data_root: None,
            utc_offset_minutes: 0,
            page_window: Self::default_page_window(),
            currency_symbol: String::new(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_page_window() -> usize {
        DEFAULT_PAGE_WINDOW
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("SalesLedger")
    }

    /// Page window width, never below one.
    pub fn effective_page_window(&self) -> usize {
        self.page_window.max(1)
    }

    /// Reporting offset in minutes, clamped to the ±14h range real time zones use.
    pub fn effective_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
            .clamp(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES)
    }
}
