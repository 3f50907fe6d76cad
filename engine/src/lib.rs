// Engine library root: storage, the check-in registry, exports, attachments and the camera session.

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod media;
pub mod services;

pub use config::EngineSettings;
pub use error::{EngineError, EngineResult};
pub use services::{CheckInRegistry, PURGE_PHRASE};

use shared::clock::Clock;
use shared::models::{PersonRecord, VehicleRecord};
use std::sync::Arc;

use data::{FileStorage, KeyValueStorage};

/// Vehicle and person registries sharing one storage backend and clock.
#[derive(Clone)]
pub struct Registries {
    pub vehicles: CheckInRegistry<VehicleRecord>,
    pub people: CheckInRegistry<PersonRecord>,
}

impl Registries {
    pub fn new(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>) -> Self {
        Registries {
            vehicles: CheckInRegistry::new(storage.clone(), clock.clone()),
            people: CheckInRegistry::new(storage, clock),
        }
    }

    /// File-backed registries under `settings.data_dir`.
    pub fn open(settings: &EngineSettings, clock: Arc<dyn Clock>) -> Self {
        tracing::info!(data_dir = %settings.data_dir.display(), "Opening check-in storage");
        Registries::new(Arc::new(FileStorage::new(settings.data_dir.clone())), clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::MemoryStorage;
    use shared::clock::FixedClock;

    #[test]
    fn test_registries_share_storage_but_not_collections() {
        let now = chrono::NaiveDate::from_ymd_opt(2025, 5, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
        let registries = Registries::new(Arc::new(MemoryStorage::new()), Arc::new(FixedClock(now)));

        registries
            .people
            .submit(PersonRecord {
                name: "Ana".to_string(),
                ..PersonRecord::default()
            })
            .unwrap();
        assert_eq!(registries.people.list().unwrap().len(), 1);
        assert!(registries.vehicles.list().unwrap().is_empty());
    }
}
