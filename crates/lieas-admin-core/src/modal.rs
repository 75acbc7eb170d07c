use std::collections::BTreeSet;

pub const MODAL_SHOW_CLASS: &str = "show";

/// Whether the page body should scroll after a modal change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollLock {
    Locked,
    Restored,
    Unchanged,
}

impl ScrollLock {
    /// Value for the body's `overflow` style, if it has to change.
    pub fn overflow_value(self) -> Option<&'static str> {
        match self {
            Self::Locked => Some("hidden"),
            Self::Restored => Some(""),
            Self::Unchanged => None,
        }
    }
}

/// Class-driven modals opened by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalStack {
    open: BTreeSet<String>,
}

impl ModalStack {
    pub fn open(&mut self, modal_id: &str) -> ScrollLock {
        self.open.insert(modal_id.to_string());
        ScrollLock::Locked
    }

    /// Any close restores page scroll, even when other modals stay open.
    pub fn close(&mut self, modal_id: &str) -> ScrollLock {
        self.open.remove(modal_id);
        ScrollLock::Restored
    }

    /// Escape handling. Returns the ids that were closed.
    pub fn close_all(&mut self) -> (Vec<String>, ScrollLock) {
        if self.open.is_empty() {
            return (Vec::new(), ScrollLock::Unchanged);
        }
        let closed = std::mem::take(&mut self.open).into_iter().collect();
        (closed, ScrollLock::Restored)
    }

    pub fn is_open(&self, modal_id: &str) -> bool {
        self.open.contains(modal_id)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDetail {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub description: String,
}

/// Full-message preview on the review page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailModal {
    detail: Option<MessageDetail>,
    visible: bool,
}

impl DetailModal {
    pub fn show(&mut self, detail: MessageDetail) {
        self.detail = Some(detail);
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Window click. Only a click on the backdrop itself closes the modal,
    /// never a click inside its content. Returns true when it closed.
    pub fn click(&mut self, target_is_backdrop: bool) -> bool {
        if target_is_backdrop && self.visible {
            self.visible = false;
            return true;
        }
        false
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn detail(&self) -> Option<&MessageDetail> {
        self.detail.as_ref()
    }

    pub fn display_value(&self) -> &'static str {
        if self.visible { "block" } else { "none" }
    }
}
