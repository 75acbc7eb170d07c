use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::error::AdminError;

pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Anything that is not explicitly dark becomes dark.
    pub fn toggled_from(current: Option<&str>) -> Self {
        match current.and_then(Self::parse) {
            Some(Self::Dark) => Self::Light,
            _ => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable key/value storage for the theme preference.
pub trait ThemeStore {
    fn load(&self, key: &str) -> Result<Option<String>, AdminError>;
    fn save(&self, key: &str, value: &str) -> Result<(), AdminError>;
}

impl<S: ThemeStore + ?Sized> ThemeStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, AdminError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), AdminError> {
        (**self).save(key, value)
    }
}

/// In-memory store, handy for tests and for pages without local storage.
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    values: RefCell<HashMap<String, String>>,
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self, key: &str) -> Result<Option<String>, AdminError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), AdminError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct ThemeController<S> {
    store: S,
    storage_key: String,
}

impl<S: ThemeStore> ThemeController<S> {
    pub fn new(store: S, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
        }
    }

    /// Load-time application. The stored value is applied verbatim when
    /// it names a known theme; unknown values are ignored.
    pub fn apply_stored(&self) -> Result<Option<Theme>, AdminError> {
        let stored = self.store.load(&self.storage_key)?;
        Ok(stored.as_deref().and_then(Theme::parse))
    }

    /// Flips the page's current attribute value and persists the result.
    pub fn toggle(&self, current_attribute: Option<&str>) -> Result<Theme, AdminError> {
        let next = Theme::toggled_from(current_attribute);
        self.store.save(&self.storage_key, next.as_str())?;
        tracing::debug!(theme = %next, "theme toggled");
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_without_preference_goes_dark_and_persists() {
        let controller = ThemeController::new(MemoryThemeStore::default(), "lieas-theme");
        assert_eq!(controller.apply_stored().expect("load"), None);

        let theme = controller.toggle(None).expect("toggle");
        assert_eq!(theme, Theme::Dark);
        assert_eq!(
            controller.store().load("lieas-theme").expect("load"),
            Some("dark".to_string())
        );

        // A reload re-applies the stored preference without user action.
        assert_eq!(controller.apply_stored().expect("load"), Some(Theme::Dark));
    }

    #[test]
    fn toggle_flips_light_and_dark() {
        assert_eq!(Theme::toggled_from(Some("dark")), Theme::Light);
        assert_eq!(Theme::toggled_from(Some("light")), Theme::Dark);
        assert_eq!(Theme::toggled_from(Some("sepia")), Theme::Dark);
    }

    #[test]
    fn unknown_stored_values_are_ignored() {
        let store = MemoryThemeStore::default();
        store.save("lieas-theme", "sepia").expect("save");
        let controller = ThemeController::new(store, "lieas-theme");
        assert_eq!(controller.apply_stored().expect("load"), None);
    }
}
