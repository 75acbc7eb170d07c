use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME_STORAGE_KEY: &str = "lieas-theme";
pub const DEFAULT_CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";
pub const DEFAULT_CSRF_COOKIE_NAME: &str = "csrftoken";
pub const DEFAULT_TOGGLE_STATUS_PREFIX: &str = "/toggle-message-status/";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("admin config is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("mobile breakpoint must be greater than zero")]
    ZeroBreakpoint,
    #[error("fade-in threshold must be within 0.0..=1.0, got {0}")]
    ThresholdOutOfRange(String),
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Tunables for every timed or keyed behavior on the dashboard.
///
/// All fields default to the values the dashboard has always shipped with,
/// so a partial JSON override only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub nav_loading_ms: u32,
    pub alert_dismiss_ms: u32,
    pub alert_removal_ms: u32,
    pub notification_show_delay_ms: u32,
    pub notification_duration_ms: u32,
    pub notification_removal_ms: u32,
    pub card_removal_ms: u32,
    pub mobile_breakpoint_px: u32,
    pub fade_in_threshold: f64,
    pub theme_storage_key: String,
    pub csrf_field_name: String,
    pub csrf_cookie_name: String,
    pub toggle_status_prefix: String,
    /// `tracing_subscriber::EnvFilter` directives for the browser console.
    pub log_filter: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            nav_loading_ms: 1_000,
            alert_dismiss_ms: 5_000,
            alert_removal_ms: 300,
            notification_show_delay_ms: 100,
            notification_duration_ms: 3_000,
            notification_removal_ms: 300,
            card_removal_ms: 500,
            mobile_breakpoint_px: 768,
            fade_in_threshold: 0.1,
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
            csrf_field_name: DEFAULT_CSRF_FIELD_NAME.to_string(),
            csrf_cookie_name: DEFAULT_CSRF_COOKIE_NAME.to_string(),
            toggle_status_prefix: DEFAULT_TOGGLE_STATUS_PREFIX.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AdminConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|error| ConfigError::InvalidJson(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mobile_breakpoint_px == 0 {
            return Err(ConfigError::ZeroBreakpoint);
        }
        if !(0.0..=1.0).contains(&self.fade_in_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(
                self.fade_in_threshold.to_string(),
            ));
        }
        for (field, value) in [
            ("theme_storage_key", &self.theme_storage_key),
            ("csrf_field_name", &self.csrf_field_name),
            ("csrf_cookie_name", &self.csrf_cookie_name),
            ("toggle_status_prefix", &self.toggle_status_prefix),
            ("log_filter", &self.log_filter),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }
        Ok(())
    }

    /// Path of the status-toggle endpoint for one message, always with a
    /// trailing slash.
    pub fn toggle_status_path(&self, message_id: &str) -> String {
        let prefix = self.toggle_status_prefix.trim_end_matches('/');
        format!("{prefix}/{message_id}/")
    }
}
