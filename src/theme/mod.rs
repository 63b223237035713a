//! Dark mode preference
//!
//! One durable boolean, read at startup and flipped only by the user. The
//! stored value lives behind [`PreferenceStore`] so tests can inject storage.

pub mod store;

pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore};

use crate::app::presenter::Presenter;

/// Storage key for the preference
pub const DARK_MODE_KEY: &str = "darkMode";

/// Toggle label and accessibility text for the given mode
pub fn control_labels(dark: bool) -> (&'static str, &'static str) {
    if dark {
        ("☀️ Light", "Switch to light mode")
    } else {
        ("🌙 Dark", "Switch to dark mode")
    }
}

pub struct ThemePreference {
    store: Box<dyn PreferenceStore>,
    dark: bool,
}

impl ThemePreference {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self { store, dark: false }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Read the stored mode (light when absent or unreadable) and apply it
    pub fn init(&mut self, presenter: &mut dyn Presenter) -> bool {
        self.dark = match self.store.get_bool(DARK_MODE_KEY) {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                tracing::warn!("Ignoring stored theme preference: {}", e);
                false
            }
        };
        self.apply(presenter);
        self.dark
    }

    /// Flip the mode, persist it, and return the new value
    pub fn toggle(&mut self, presenter: &mut dyn Presenter) -> bool {
        self.dark = !self.dark;
        if let Err(e) = self.store.set_bool(DARK_MODE_KEY, self.dark) {
            tracing::warn!("Failed to save theme preference: {}", e);
        }
        tracing::debug!(dark = self.dark, "Theme toggled");
        self.apply(presenter);
        self.dark
    }

    fn apply(&self, presenter: &mut dyn Presenter) {
        presenter.apply_theme(self.dark);
        let (label, accessible_label) = control_labels(self.dark);
        presenter.set_theme_control(label, accessible_label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::presenter::RecordingPresenter;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryPreferenceStore>>);

    impl PreferenceStore for SharedStore {
        fn get_bool(&self, key: &str) -> Result<Option<bool>, PreferenceError> {
            self.0.lock().unwrap().get_bool(key)
        }

        fn set_bool(&mut self, key: &str, value: bool) -> Result<(), PreferenceError> {
            self.0.lock().unwrap().set_bool(key, value)
        }
    }

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get_bool(&self, _key: &str) -> Result<Option<bool>, PreferenceError> {
            Err(PreferenceError::Read {
                path: "prefs.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn set_bool(&mut self, _key: &str, _value: bool) -> Result<(), PreferenceError> {
            Err(PreferenceError::Write {
                path: "prefs.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    #[test]
    fn test_init_defaults_to_light() {
        let mut theme = ThemePreference::new(Box::new(MemoryPreferenceStore::default()));
        let mut presenter = RecordingPresenter::default();
        assert!(!theme.init(&mut presenter));
        assert_eq!(presenter.dark, Some(false));
        assert_eq!(presenter.theme_label, "🌙 Dark");
        assert_eq!(presenter.theme_accessible_label, "Switch to dark mode");
    }

    #[test]
    fn test_init_reads_stored_dark() {
        let mut theme =
            ThemePreference::new(Box::new(MemoryPreferenceStore::with(DARK_MODE_KEY, true)));
        let mut presenter = RecordingPresenter::default();
        assert!(theme.init(&mut presenter));
        assert_eq!(presenter.theme_label, "☀️ Light");
        assert_eq!(presenter.theme_accessible_label, "Switch to light mode");
    }

    #[test]
    fn test_toggle_persists_returned_value() {
        let store = SharedStore::default();
        let mut theme = ThemePreference::new(Box::new(store.clone()));
        let mut presenter = RecordingPresenter::default();
        theme.init(&mut presenter);

        let value = theme.toggle(&mut presenter);
        assert!(value);
        assert_eq!(store.get_bool(DARK_MODE_KEY).unwrap(), Some(value));
        assert_eq!(presenter.dark, Some(true));

        let back = theme.toggle(&mut presenter);
        assert!(!back);
        assert_eq!(store.get_bool(DARK_MODE_KEY).unwrap(), Some(false));
    }

    #[test]
    fn test_survives_restart_with_file_store() {
        let temp = TempDir::new().unwrap();
        let mut presenter = RecordingPresenter::default();

        let mut first = ThemePreference::new(Box::new(FilePreferenceStore::in_dir(temp.path())));
        first.init(&mut presenter);
        first.toggle(&mut presenter);

        let mut second = ThemePreference::new(Box::new(FilePreferenceStore::in_dir(temp.path())));
        assert!(second.init(&mut presenter));
    }

    #[test]
    fn test_storage_failures_do_not_block_ui() {
        let mut theme = ThemePreference::new(Box::new(FailingStore));
        let mut presenter = RecordingPresenter::default();
        assert!(!theme.init(&mut presenter));
        assert!(theme.toggle(&mut presenter));
        assert_eq!(presenter.dark, Some(true));
    }
}
