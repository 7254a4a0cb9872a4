//! Configuration structures for truecost settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Side panel geometry and transition timing
    #[serde(default)]
    pub panel: PanelSettings,

    /// Remote API settings
    #[serde(default)]
    pub api: ApiSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Event loop tick interval in ms
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Number of recent analyses shown under the query box
    #[serde(default = "default_recent_cards")]
    pub recent_cards: usize,
}

/// Side panel settings.
///
/// Widths are in pixels. The terminal host converts columns to pixels
/// with `cell_width_px`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    /// Viewport width at which the layout switches to desktop mode
    #[serde(default = "default_breakpoint_px")]
    pub breakpoint_px: u32,

    /// Minimum panel width on desktop
    #[serde(default = "default_min_width_px")]
    pub min_width_px: u32,

    /// Maximum panel width on desktop
    #[serde(default = "default_max_width_px")]
    pub max_width_px: u32,

    /// Share of the viewport taken by the panel on desktop
    #[serde(default = "default_desktop_ratio")]
    pub desktop_ratio: f64,

    /// Share of the viewport taken by the panel on mobile
    #[serde(default = "default_mobile_ratio")]
    pub mobile_ratio: f64,

    /// Delay between mounting the panel and un-collapsing it
    #[serde(default = "default_expand_delay_ms")]
    pub expand_delay_ms: u64,

    /// Delay between collapsing the panel and removing it from layout
    #[serde(default = "default_collapse_delay_ms")]
    pub collapse_delay_ms: u64,

    /// Width of one terminal cell in pixels
    #[serde(default = "default_cell_width_px")]
    pub cell_width_px: u32,
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the web API (`/api/*` routes are resolved against it)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key sent as `x-api-key`
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Environment variable holding the web app's session cookie
    /// (`name=value` pairs as sent in a `Cookie` header)
    #[serde(default = "default_session_cookie_env")]
    pub session_cookie_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_tick_interval_ms() -> u64 {
    defaults::TICK_INTERVAL_MS
}

fn default_recent_cards() -> usize {
    defaults::RECENT_CARDS
}

fn default_breakpoint_px() -> u32 {
    defaults::BREAKPOINT_PX
}

fn default_min_width_px() -> u32 {
    defaults::MIN_WIDTH_PX
}

fn default_max_width_px() -> u32 {
    defaults::MAX_WIDTH_PX
}

fn default_desktop_ratio() -> f64 {
    defaults::DESKTOP_RATIO
}

fn default_mobile_ratio() -> f64 {
    defaults::MOBILE_RATIO
}

fn default_expand_delay_ms() -> u64 {
    defaults::EXPAND_DELAY_MS
}

fn default_collapse_delay_ms() -> u64 {
    defaults::COLLAPSE_DELAY_MS
}

fn default_cell_width_px() -> u32 {
    defaults::CELL_WIDTH_PX
}

fn default_base_url() -> String {
    defaults::BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    defaults::API_KEY_ENV.to_string()
}

fn default_session_cookie_env() -> String {
    defaults::SESSION_COOKIE_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    defaults::TIMEOUT_SECS
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

// Default implementations
impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            recent_cards: default_recent_cards(),
        }
    }
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            breakpoint_px: default_breakpoint_px(),
            min_width_px: default_min_width_px(),
            max_width_px: default_max_width_px(),
            desktop_ratio: default_desktop_ratio(),
            mobile_ratio: default_mobile_ratio(),
            expand_delay_ms: default_expand_delay_ms(),
            collapse_delay_ms: default_collapse_delay_ms(),
            cell_width_px: default_cell_width_px(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            session_cookie_env: default_session_cookie_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}
