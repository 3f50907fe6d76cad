// In-process client the UI talks to: wraps the registries, exports, attachment
// loading and the camera backend behind one cloneable handle.
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use engine::data::{KeyValueStorage, MemoryStorage};
use engine::export::{export_report, ExportFormat, VehicleReport};
use engine::media::{AttachmentLoader, CameraBackend, CameraError, CameraSession, Facing, NoCameraBackend};
use engine::{EngineError, EngineResult, EngineSettings, Registries};
use shared::clock::{Clock, SystemClock};
use shared::models::{Attachment, PersonRecord, VehicleRecord};
use shared::overstay::Overstay;

#[derive(Clone)]
pub struct EngineClient {
    registries: Registries,
    settings: EngineSettings,
    loader: AttachmentLoader,
    camera: Arc<dyn CameraBackend>,
}

impl EngineClient {
    /// File-backed client on the system clock, without camera support.
    pub fn new(settings: EngineSettings) -> Self {
        let registries = Registries::open(&settings, Arc::new(SystemClock));
        Self::with_parts(registries, settings, Arc::new(NoCameraBackend))
    }

    pub fn with_parts(registries: Registries, settings: EngineSettings, camera: Arc<dyn CameraBackend>) -> Self {
        let loader = AttachmentLoader::new(settings.max_attachment_bytes);
        EngineClient {
            registries,
            settings,
            loader,
            camera,
        }
    }

    /// Memory-backed client, used when the data directory cannot be opened and in tests.
    pub fn in_memory(settings: EngineSettings, clock: Arc<dyn Clock>) -> Self {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        Self::with_parts(Registries::new(storage, clock), settings, Arc::new(NoCameraBackend))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn now(&self) -> NaiveDateTime {
        self.registries.vehicles.now()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.registries.vehicles.clock()
    }

    pub fn search_vehicles(&self, term: &str) -> EngineResult<Vec<VehicleRecord>> {
        self.registries.vehicles.search(term)
    }

    pub fn search_people(&self, term: &str) -> EngineResult<Vec<PersonRecord>> {
        self.registries.people.search(term)
    }

    pub fn submit_vehicle(&self, record: VehicleRecord) -> EngineResult<VehicleRecord> {
        self.registries.vehicles.submit(record)
    }

    pub fn submit_person(&self, record: PersonRecord) -> EngineResult<PersonRecord> {
        self.registries.people.submit(record)
    }

    pub fn delete_vehicle(&self, id: &str) -> EngineResult<VehicleRecord> {
        self.registries.vehicles.delete(id)
    }

    pub fn delete_person(&self, id: &str) -> EngineResult<PersonRecord> {
        self.registries.people.delete(id)
    }

    pub fn purge_vehicles(&self, confirmation: &str) -> EngineResult<usize> {
        self.registries.vehicles.purge(confirmation)
    }

    pub fn purge_people(&self, confirmation: &str) -> EngineResult<usize> {
        self.registries.people.purge(confirmation)
    }

    pub fn vehicle_overstay(&self, record: &VehicleRecord, now: NaiveDateTime) -> Option<Overstay> {
        engine::services::overstay_at(record, now, &self.settings.tolerance)
    }

    pub fn person_overstay(&self, record: &PersonRecord, now: NaiveDateTime) -> Option<Overstay> {
        engine::services::overstay_at(record, now, &self.settings.tolerance)
    }

    /// Exports the vehicles matching `term` (all of them for a blank term).
    /// Rendering and file writes run on the blocking pool.
    pub async fn export_vehicles(&self, format: ExportFormat, term: String) -> EngineResult<PathBuf> {
        let client = self.clone();
        tokio::task::spawn_blocking(move || {
            let records = client.search_vehicles(&term)?;
            let report = VehicleReport::build(
                &records,
                client.now(),
                &client.settings.tolerance,
                client.settings.language,
            )?;
            export_report(&report, format, &client.settings.export_dir)
        })
        .await
        .map_err(|e| EngineError::ConfigError(format!("export task failed: {}", e)))?
    }

    /// Checks bytes picked in the UI against the size and type limits.
    pub fn attach(&self, name: &str, bytes: Vec<u8>) -> EngineResult<Attachment> {
        self.loader.from_bytes(name, bytes)
    }

    pub fn open_camera(&self, facing: Facing) -> Result<CameraSession, CameraError> {
        CameraSession::open(self.camera.clone(), facing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::clock::FixedClock;
    use shared::models::ContractType;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 10).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn client(export_dir: PathBuf) -> EngineClient {
        let settings = EngineSettings {
            export_dir,
            ..EngineSettings::default()
        };
        EngineClient::in_memory(settings, Arc::new(FixedClock(now())))
    }

    fn vehicle(plate: &str, driver: &str) -> VehicleRecord {
        VehicleRecord {
            plate: plate.to_string(),
            driver: driver.to_string(),
            contract: ContractType::Hourly,
            ..VehicleRecord::default()
        }
    }

    #[test]
    fn test_submit_search_delete() {
        let client = client(PathBuf::from("."));
        let stored = client.submit_vehicle(vehicle("ABC1234", "José")).unwrap();
        client.submit_vehicle(vehicle("BRA2E19", "Ana")).unwrap();

        assert_eq!(client.search_vehicles("jose").unwrap().len(), 1);
        assert_eq!(client.search_vehicles("").unwrap().len(), 2);

        client.delete_vehicle(&stored.id).unwrap();
        assert_eq!(client.search_vehicles("").unwrap().len(), 1);
        assert!(client.search_people("").unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_storage_is_reported() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(engine::data::VEHICLES_KEY, "{not json").unwrap();
        let registries = Registries::new(storage, Arc::new(FixedClock(now())));
        let client = EngineClient::with_parts(registries, EngineSettings::default(), Arc::new(NoCameraBackend));

        assert!(client.search_vehicles("").is_err());
        assert!(client.search_people("").unwrap().is_empty());
    }

    #[test]
    fn test_camera_is_unsupported_on_desktop() {
        let client = client(PathBuf::from("."));
        assert!(matches!(client.open_camera(Facing::Environment), Err(CameraError::Unsupported)));
    }

    #[test]
    fn test_attach_rejects_unknown_types() {
        let client = client(PathBuf::from("."));
        assert!(client.attach("notes.txt", b"hello".to_vec()).is_err());
        let png = client.attach("photo.png", b"\x89PNG\r\n\x1a\nrest".to_vec()).unwrap();
        assert_eq!(png.mime_type(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_export_filters_by_term() {
        let dir = tempfile::TempDir::new().unwrap();
        let client = client(dir.path().to_path_buf());

        let empty = client.export_vehicles(ExportFormat::Csv, String::new()).await;
        assert!(matches!(empty, Err(EngineError::EmptyExport)));

        client.submit_vehicle(vehicle("ABC1234", "José")).unwrap();
        client.submit_vehicle(vehicle("BRA2E19", "Ana")).unwrap();
        let path = client.export_vehicles(ExportFormat::Csv, "ana".to_string()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "veiculos_2025-02-10.csv");
        let body = std::fs::read_to_string(path).unwrap();
        assert!(body.contains("Ana"));
        assert!(!body.contains("José"));
    }
}
