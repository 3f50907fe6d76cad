// Whole-collection persistence of check-in records under a single storage key.
use std::marker::PhantomData;
use std::sync::Arc;

use shared::duration::normalize_duration;
use shared::models::{CheckInRecord, PersonRecord, VehicleRecord};

use super::storage::KeyValueStorage;
use crate::error::EngineResult;

pub const VEHICLES_KEY: &str = "veiculos";
pub const PEOPLE_KEY: &str = "pessoas-cadastradas";

/// Storage key of a record collection.
pub trait Collection: CheckInRecord {
    const STORAGE_KEY: &'static str;
    const LABEL: &'static str;
}

impl Collection for VehicleRecord {
    const STORAGE_KEY: &'static str = VEHICLES_KEY;
    const LABEL: &'static str = "vehicle";
}

impl Collection for PersonRecord {
    const STORAGE_KEY: &'static str = PEOPLE_KEY;
    const LABEL: &'static str = "person";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

struct Loaded<R> {
    records: Vec<R>,
    unreadable: Vec<serde_json::Value>,
}

/// Reads the full collection, applies one change and writes it back on every call.
pub struct RecordStore<R> {
    storage: Arc<dyn KeyValueStorage>,
    key: &'static str,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        RecordStore {
            storage: self.storage.clone(),
            key: self.key,
            _record: PhantomData,
        }
    }
}

impl<R: Collection> RecordStore<R> {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, R::STORAGE_KEY)
    }
}

impl<R: CheckInRecord> RecordStore<R> {
    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: &'static str) -> Self {
        RecordStore { storage, key, _record: PhantomData }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Loads the collection, repairing durations that do not fit their contract.
    /// Repairs are written back before returning. Entries that cannot be read
    /// as records are skipped with a warning.
    pub fn load(&self) -> EngineResult<Vec<R>> {
        Ok(self.read()?.records)
    }

    /// Replaces the whole collection with `records`.
    pub fn save_all(&self, records: &[R]) -> EngineResult<()> {
        self.write(records, &[])
    }

    fn read(&self) -> EngineResult<Loaded<R>> {
        let entries: Vec<serde_json::Value> = match self.storage.get(self.key)? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)?,
            _ => Vec::new(),
        };

        let mut loaded = Loaded { records: Vec::with_capacity(entries.len()), unreadable: Vec::new() };
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<R>(entry.clone()) {
                Ok(record) => loaded.records.push(record),
                Err(e) => {
                    tracing::warn!(key = self.key, index, error = %e, "Skipping unreadable stored record");
                    loaded.unreadable.push(entry);
                }
            }
        }

        let mut repaired = 0usize;
        for record in loaded.records.iter_mut() {
            let current = record.duration_minutes();
            let fixed = normalize_duration(current, record.contract());
            if fixed != current {
                tracing::debug!(
                    key = self.key,
                    id = %record.id(),
                    from = current,
                    to = fixed,
                    "Repairing allowed duration"
                );
                record.set_duration_minutes(fixed);
                repaired += 1;
            }
        }

        if repaired > 0 {
            tracing::info!(key = self.key, repaired, "Persisting repaired durations");
            self.write(&loaded.records, &loaded.unreadable)?;
        }
        Ok(loaded)
    }

    // Unreadable entries are written back untouched after the records.
    fn write(&self, records: &[R], unreadable: &[serde_json::Value]) -> EngineResult<()> {
        let mut entries = Vec::with_capacity(records.len() + unreadable.len());
        for record in records {
            entries.push(serde_json::to_value(record)?);
        }
        entries.extend(unreadable.iter().cloned());
        let raw = serde_json::to_string(&entries)?;
        self.storage.set(self.key, &raw)
    }

    /// Replaces the record with the same id, or appends it.
    pub fn upsert(&self, record: R) -> EngineResult<UpsertOutcome> {
        let Loaded { mut records, unreadable } = self.read()?;
        let outcome = match records.iter_mut().find(|existing| existing.id() == record.id()) {
            Some(existing) => {
                *existing = record;
                UpsertOutcome::Updated
            }
            None => {
                records.push(record);
                UpsertOutcome::Created
            }
        };
        self.write(&records, &unreadable)?;
        Ok(outcome)
    }

    /// Removes the record with `id`, returning it when it existed.
    pub fn delete_by_id(&self, id: &str) -> EngineResult<Option<R>> {
        let Loaded { mut records, unreadable } = self.read()?;
        let Some(position) = records.iter().position(|record| record.id() == id) else {
            return Ok(None);
        };
        let removed = records.remove(position);
        self.write(&records, &unreadable)?;
        Ok(Some(removed))
    }

    pub fn clear(&self) -> EngineResult<()> {
        self.storage.remove(self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::storage::{FileStorage, MemoryStorage};
    use shared::models::ContractType;

    fn vehicle(id: &str, plate: &str) -> VehicleRecord {
        VehicleRecord {
            id: id.to_string(),
            plate: plate.to_string(),
            driver: "Ana".to_string(),
            contract: ContractType::Hourly,
            duration_minutes: 120,
            ..VehicleRecord::default()
        }
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        let store: RecordStore<VehicleRecord> = RecordStore::new(Arc::new(MemoryStorage::new()));
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.key(), "veiculos");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir.path()));
        let store: RecordStore<VehicleRecord> = RecordStore::new(storage.clone());
        let records = vec![vehicle("1", "ABC1234"), vehicle("2", "BRA2E19")];
        store.save_all(&records).unwrap();

        let reopened: RecordStore<VehicleRecord> = RecordStore::new(storage);
        assert_eq!(reopened.load().unwrap(), records);
    }

    #[test]
    fn test_upsert_creates_then_updates() {
        let store: RecordStore<VehicleRecord> = RecordStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(store.upsert(vehicle("1", "ABC1234")).unwrap(), UpsertOutcome::Created);

        let mut edited = vehicle("1", "ABC1234");
        edited.model = "Gol".to_string();
        assert_eq!(store.upsert(edited).unwrap(), UpsertOutcome::Updated);

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].model, "Gol");
    }

    #[test]
    fn test_delete_by_id() {
        let store: RecordStore<VehicleRecord> = RecordStore::new(Arc::new(MemoryStorage::new()));
        store.save_all(&[vehicle("1", "ABC1234"), vehicle("2", "BRA2E19")]).unwrap();

        let removed = store.delete_by_id("1").unwrap();
        assert_eq!(removed.map(|r| r.plate), Some("ABC1234".to_string()));
        assert!(store.delete_by_id("missing").unwrap().is_none());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_load_repairs_and_persists_durations() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                VEHICLES_KEY,
                r#"[{"id":"1","placa":"ABC1234","tipoContrato":"mensalista","duracaoMinutos":1440},
                    {"id":"2","placa":"BRA2E19","tipoContrato":"por_hora","duracaoMinutos":43200},
                    {"id":"3","placa":"XYZ9876","tipoContrato":"diaria","duracaoMinutos":1440}]"#,
            )
            .unwrap();
        let store: RecordStore<VehicleRecord> = RecordStore::new(storage.clone());

        let records = store.load().unwrap();
        let durations: Vec<u32> = records.iter().map(|r| r.duration_minutes).collect();
        assert_eq!(durations, vec![43_200, 60, 1_440]);

        let persisted = storage.get(VEHICLES_KEY).unwrap().unwrap();
        let raw: serde_json::Value = serde_json::from_str(&persisted).unwrap();
        assert_eq!(raw[0]["duracaoMinutos"], 43_200);
        assert_eq!(raw[1]["duracaoMinutos"], 60);
    }

    #[test]
    fn test_clear_and_people_key() {
        let storage = Arc::new(MemoryStorage::new());
        let people: RecordStore<PersonRecord> = RecordStore::new(storage.clone());
        let person = PersonRecord {
            id: "p1".to_string(),
            name: "Ana".to_string(),
            ..PersonRecord::default()
        };
        people.upsert(person).unwrap();
        assert!(storage.get(PEOPLE_KEY).unwrap().is_some());

        people.clear().unwrap();
        assert!(people.load().unwrap().is_empty());
    }

    #[test]
    fn test_bad_entry_does_not_break_the_collection() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                VEHICLES_KEY,
                r#"[{"id":"1","placa":"ABC1234","tipoContrato":"por_hora","duracaoMinutos":120},
                    {"id":"2","placa":"BRA2E19","tipoContrato":"por_hora","duracaoMinutos":null},
                    {"id":"3","modelo":"sem placa"},
                    {"id":"4","placa":"XYZ9876","dataEntrada":"ontem"}]"#,
            )
            .unwrap();
        let store: RecordStore<VehicleRecord> = RecordStore::new(storage.clone());

        let records = store.load().unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(records[1].duration_minutes, 60);

        assert_eq!(store.upsert(vehicle("5", "QWE1A23")).unwrap(), UpsertOutcome::Created);
        assert_eq!(store.load().unwrap().len(), 3);

        // Unreadable entries stay in storage.
        let persisted: serde_json::Value = serde_json::from_str(&storage.get(VEHICLES_KEY).unwrap().unwrap()).unwrap();
        let stored_ids: Vec<&str> = persisted
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["id"].as_str().unwrap())
            .collect();
        assert_eq!(stored_ids, vec!["1", "2", "5", "3", "4"]);
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(VEHICLES_KEY, "{not json").unwrap();
        let store: RecordStore<VehicleRecord> = RecordStore::new(storage);
        assert!(matches!(store.load(), Err(crate::error::EngineError::JsonError { .. })));
    }
}
