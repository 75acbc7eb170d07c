use lieas_admin_core::{AdminConfig, ConfigError};
use serde::Serialize;

/// Resolves the optional page-level JSON override. An invalid override is
/// reported alongside the defaults so the page still boots.
#[cfg(any(target_arch = "wasm32", test))]
pub(crate) fn resolve_config(raw: Option<&str>) -> (AdminConfig, Option<ConfigError>) {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return (AdminConfig::default(), None);
    };
    match AdminConfig::from_json_str(raw) {
        Ok(config) => (config, None),
        Err(error) => (AdminConfig::default(), Some(error)),
    }
}

/// Diagnostics snapshot returned by `admin_state_json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdminSnapshot {
    pub booted: bool,
    pub config_error: Option<String>,
    pub active_nav_links: Vec<usize>,
    pub sidebar_collapsed: bool,
    pub mobile_layout: bool,
    pub open_modals: usize,
    pub field_errors: usize,
    pub tables: usize,
    pub selected_rows: usize,
    pub pending_timers: usize,
    pub review: Option<ReviewSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewSnapshot {
    pub cards: usize,
    pub unchecked_visible: usize,
    pub search_term: String,
    pub modal_visible: bool,
}

impl AdminSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            "{\"booted\":false,\"config_error\":\"snapshot serialization failed\"}".to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn missing_or_blank_override_uses_defaults() {
        assert_eq!(resolve_config(None), (AdminConfig::default(), None));
        assert_eq!(resolve_config(Some("   ")), (AdminConfig::default(), None));
    }

    #[test]
    fn partial_override_is_applied() {
        let (config, error) = resolve_config(Some(r#"{"notification_duration_ms": 4500}"#));
        assert!(error.is_none());
        assert_eq!(config.notification_duration_ms, 4_500);
        assert_eq!(config.alert_dismiss_ms, 5_000);
    }

    #[test]
    fn invalid_override_falls_back_and_reports() {
        let (config, error) = resolve_config(Some(r#"{"mobile_breakpoint_px": 0}"#));
        assert_eq!(config, AdminConfig::default());
        assert_eq!(error, Some(ConfigError::ZeroBreakpoint));
    }

    #[test]
    fn snapshot_serializes_review_section() {
        let snapshot = AdminSnapshot {
            booted: true,
            active_nav_links: vec![2],
            review: Some(ReviewSnapshot {
                cards: 3,
                unchecked_visible: 1,
                search_term: "invoice".to_string(),
                modal_visible: false,
            }),
            ..AdminSnapshot::default()
        };
        let value: Value = serde_json::from_str(&snapshot.to_json()).expect("valid json");
        assert_eq!(value["booted"], json!(true));
        assert_eq!(value["active_nav_links"], json!([2]));
        assert_eq!(value["review"]["unchecked_visible"], json!(1));
        assert_eq!(value["config_error"], Value::Null);
    }
}
