use crate::config::AdminConfig;

pub const ALERT_CLOSE_CLASS: &str = "alert-close";
pub const ALERT_CLOSE_LABEL: &str = "\u{00d7}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Shown,
    /// Fade/slide-out styles applied; removal follows after the removal delay.
    Dismissing,
    Removed,
}

/// Lifecycle of one flash alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertLifecycle {
    pub phase: AlertPhase,
    pub dismiss_after_ms: u32,
    pub remove_after_ms: u32,
}

impl AlertLifecycle {
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            phase: AlertPhase::Shown,
            dismiss_after_ms: config.alert_dismiss_ms,
            remove_after_ms: config.alert_removal_ms,
        }
    }

    /// Starts the exit transition. Returns the delay until removal, or
    /// `None` when the alert is already leaving.
    pub fn dismiss(&mut self) -> Option<u32> {
        match self.phase {
            AlertPhase::Shown => {
                self.phase = AlertPhase::Dismissing;
                Some(self.remove_after_ms)
            }
            AlertPhase::Dismissing | AlertPhase::Removed => None,
        }
    }

    pub fn finish(&mut self) {
        self.phase = AlertPhase::Removed;
    }

    pub fn exit_styles() -> [(&'static str, &'static str); 2] {
        [("opacity", "0"), ("transform", "translateY(-20px)")]
    }
}

pub fn needs_close_button(has_close_control: bool) -> bool {
    !has_close_control
}
