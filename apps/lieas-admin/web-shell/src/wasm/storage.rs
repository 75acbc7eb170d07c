use super::*;

/// Theme preference in `window.localStorage`.
pub(crate) struct LocalStorageThemeStore;

fn local_storage() -> Result<web_sys::Storage, AdminError> {
    web_sys::window()
        .ok_or_else(|| AdminError::Storage("window is unavailable".to_string()))?
        .local_storage()
        .map_err(|_| AdminError::Storage("local storage access was denied".to_string()))?
        .ok_or_else(|| AdminError::Storage("local storage is unavailable".to_string()))
}

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self, key: &str) -> Result<Option<String>, AdminError> {
        local_storage()?
            .get_item(key)
            .map_err(|_| AdminError::Storage(format!("failed to read {key}")))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), AdminError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| AdminError::Storage(format!("failed to write {key}")))
    }
}
