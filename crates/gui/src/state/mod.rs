pub mod settings;
pub mod store;

pub use settings::{AppSettings, AudioSettings, Language, UiSettings, ViewportSettings};
pub use store::{ChangeCause, ConfigChange, ConfigStore, SAVE_DELAY};

use crate::persistence::{FileStorage, MemoryStorage, Persistence};

/// Panel visibility flags
pub struct PanelVisibility {
    pub config_panel: bool,
    pub status_bar: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            config_panel: true,
            status_bar: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub store: ConfigStore,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
}

impl AppState {
    /// State backed by the platform config directory, falling back to memory
    /// when no home directory can be found.
    pub fn open() -> Self {
        let persistence = match FileStorage::in_project_dirs() {
            Some(storage) => Persistence::new(Box::new(storage)),
            None => {
                tracing::warn!("No config directory available, configuration will not persist");
                Persistence::new(Box::new(MemoryStorage::new()))
            }
        };
        Self::with_store(ConfigStore::new(persistence), AppSettings::load())
    }

    pub fn with_store(store: ConfigStore, settings: AppSettings) -> Self {
        Self {
            store,
            panels: PanelVisibility::default(),
            settings,
        }
    }
}
