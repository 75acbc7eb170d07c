use std::fmt;

use crate::config::AdminConfig;

pub const NOTIFICATION_SHOW_CLASS: &str = "show";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Unknown kinds render as info toasts.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

impl NotificationId {
    pub fn element_id(self) -> String {
        format!("lieas-notification-{}", self.0)
    }
}

/// Offsets, in milliseconds from creation, of each toast transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSchedule {
    pub show_at_ms: u32,
    pub hide_at_ms: u32,
    pub remove_at_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub duration_ms: u32,
}

impl Notification {
    pub fn class_name(&self) -> String {
        format!("notification notification-{}", self.kind)
    }

    pub fn schedule(&self, config: &AdminConfig) -> NotificationSchedule {
        NotificationSchedule {
            show_at_ms: config.notification_show_delay_ms,
            hide_at_ms: self.duration_ms,
            remove_at_ms: self.duration_ms.saturating_add(config.notification_removal_ms),
        }
    }
}

/// Allocates toast ids so every toast's timers can be keyed separately.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    next_id: u64,
}

impl NotificationCenter {
    pub fn create(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        duration_ms: Option<u32>,
        config: &AdminConfig,
    ) -> Notification {
        self.next_id += 1;
        Notification {
            id: NotificationId(self.next_id),
            message: message.into(),
            kind,
            duration_ms: duration_ms.unwrap_or(config.notification_duration_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toast_timeline() {
        let config = AdminConfig::default();
        let mut center = NotificationCenter::default();
        let toast = center.create("Saved", NotificationKind::Success, None, &config);
        assert_eq!(toast.class_name(), "notification notification-success");
        assert_eq!(
            toast.schedule(&config),
            NotificationSchedule {
                show_at_ms: 100,
                hide_at_ms: 3_000,
                remove_at_ms: 3_300,
            }
        );
    }

    #[test]
    fn ids_are_unique_and_custom_duration_is_kept() {
        let config = AdminConfig::default();
        let mut center = NotificationCenter::default();
        let first = center.create("a", NotificationKind::Info, Some(1_000), &config);
        let second = center.create("b", NotificationKind::Error, None, &config);
        assert_ne!(first.id, second.id);
        assert_eq!(first.duration_ms, 1_000);
        assert_eq!(first.schedule(&config).remove_at_ms, 1_300);
        assert_eq!(second.id.element_id(), "lieas-notification-2");
    }

    #[test]
    fn kind_parsing_falls_back_to_info() {
        assert_eq!(NotificationKind::parse("ERROR"), NotificationKind::Error);
        assert_eq!(NotificationKind::parse("bogus"), NotificationKind::Info);
    }
}
