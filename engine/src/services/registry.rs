// Check-in workflow over a record collection: submit, look up, remove, purge.
use chrono::NaiveDateTime;
use std::sync::Arc;
use uuid::Uuid;

use shared::clock::Clock;
use shared::duration::normalize_duration;
use shared::overstay::{evaluate_overstay, Overstay, TolerancePolicy};
use shared::search::search;

use crate::data::{Collection, KeyValueStorage, RecordStore, UpsertOutcome};
use crate::error::{EngineError, EngineResult};

/// Phrase the operator must type to delete a whole collection.
pub const PURGE_PHRASE: &str = "EXCLUIR TUDO";

pub struct CheckInRegistry<R> {
    store: RecordStore<R>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for CheckInRegistry<R> {
    fn clone(&self) -> Self {
        CheckInRegistry {
            store: self.store.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<R: Collection> CheckInRegistry<R> {
    pub fn new(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>) -> Self {
        CheckInRegistry {
            store: RecordStore::new(storage),
            clock,
        }
    }

    /// Creates the record when its id is empty, otherwise replaces the stored
    /// record with the same id. Returns the record as stored.
    ///
    /// Invalid input aborts before anything is written.
    pub fn submit(&self, mut record: R) -> EngineResult<R> {
        record.tidy();
        record.validate()?;

        if record.entry_date().is_none() {
            record.set_entry_date(self.clock.today());
        }
        let duration = normalize_duration(record.duration_minutes(), record.contract());
        record.set_duration_minutes(duration);

        let creating = record.id().is_empty();
        if creating {
            record.assign_id(Uuid::new_v4().to_string());
        } else if !self.store.load()?.iter().any(|existing| existing.id() == record.id()) {
            return Err(EngineError::NotFound(record.id().to_string()));
        }

        let outcome = self.store.upsert(record.clone())?;
        match outcome {
            UpsertOutcome::Created => tracing::info!(
                collection = R::LABEL,
                id = %record.id(),
                record = %record.summary(),
                contract = %record.contract().code(),
                "Created check-in record"
            ),
            UpsertOutcome::Updated => tracing::info!(
                collection = R::LABEL,
                id = %record.id(),
                record = %record.summary(),
                "Updated check-in record"
            ),
        }
        Ok(record)
    }

    pub fn list(&self) -> EngineResult<Vec<R>> {
        self.store.load()
    }

    /// Records matching `term` in stored order; a blank term lists everything.
    pub fn search(&self, term: &str) -> EngineResult<Vec<R>> {
        let records = self.store.load()?;
        Ok(search(&records, term))
    }

    pub fn find(&self, id: &str) -> EngineResult<R> {
        self.store
            .load()?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))
    }

    pub fn delete(&self, id: &str) -> EngineResult<R> {
        let removed = self
            .store
            .delete_by_id(id)?
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;
        tracing::info!(collection = R::LABEL, id, record = %removed.summary(), "Deleted check-in record");
        Ok(removed)
    }

    /// Deletes every record once the operator typed [`PURGE_PHRASE`] exactly.
    /// Returns how many records were removed.
    pub fn purge(&self, confirmation: &str) -> EngineResult<usize> {
        if confirmation != PURGE_PHRASE {
            tracing::warn!(collection = R::LABEL, "Purge refused: confirmation phrase mismatch");
            return Err(EngineError::ConfirmationMismatch { expected: PURGE_PHRASE });
        }
        let count = self.store.load()?.len();
        self.store.clear()?;
        tracing::warn!(collection = R::LABEL, count, "Purged all check-in records");
        Ok(count)
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Elapsed/overstay of `record` at the registry's current time.
    /// Records without an entry date have nothing to measure.
    pub fn overstay_of(&self, record: &R, policy: &TolerancePolicy) -> Option<Overstay> {
        overstay_at(record, self.now(), policy)
    }
}

pub fn overstay_at<R: Collection>(record: &R, now: NaiveDateTime, policy: &TolerancePolicy) -> Option<Overstay> {
    let entry_date = record.entry_date()?;
    Some(evaluate_overstay(
        entry_date,
        record.entry_time(),
        record.duration_minutes(),
        record.contract(),
        now,
        policy,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MemoryStorage, VEHICLES_KEY};
    use chrono::{NaiveDate, NaiveTime};
    use shared::clock::FixedClock;
    use shared::models::{ContractType, PersonRecord, ValidationError, VehicleRecord};
    use shared::overstay::OverstayStatus;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(10, 30, 0).unwrap()
    }

    fn setup<R: Collection>() -> (Arc<MemoryStorage>, CheckInRegistry<R>) {
        let storage = Arc::new(MemoryStorage::new());
        let registry = CheckInRegistry::new(storage.clone(), Arc::new(FixedClock(now())));
        (storage, registry)
    }

    fn vehicle(plate: &str) -> VehicleRecord {
        VehicleRecord {
            plate: plate.to_string(),
            driver: "maria souza".to_string(),
            model: "onix".to_string(),
            contract: ContractType::Hourly,
            duration_minutes: 60,
            ..VehicleRecord::default()
        }
    }

    #[test]
    fn test_submit_mercosul_vehicle_without_entry_time() {
        let (storage, registry) = setup::<VehicleRecord>();
        let stored = registry.submit(vehicle("ABC1D23")).unwrap();

        assert!(!stored.id.is_empty());
        assert!(Uuid::parse_str(&stored.id).is_ok());
        assert_eq!(stored.driver, "Maria Souza");
        assert_eq!(stored.model, "Onix");
        assert_eq!(stored.entry_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(stored.entry_time, None);

        let raw = storage.get(VEHICLES_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["placa"], "ABC1D23");
        assert_eq!(json[0]["horaEntrada"], "");

        let overstay = registry.overstay_of(&stored, &TolerancePolicy::default()).unwrap();
        // Missing time counts from midnight: 10h30 elapsed against one hour.
        assert_eq!(overstay.elapsed_minutes, 630);
        assert_eq!(overstay.status, OverstayStatus::Exceeded);
    }

    #[test]
    fn test_invalid_plate_leaves_storage_untouched() {
        let (storage, registry) = setup::<VehicleRecord>();
        let err = registry.submit(vehicle("AB1234")).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation { source: ValidationError::InvalidPlate(_) }
        ));
        assert!(storage.get(VEHICLES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_submit_formats_plate_input() {
        let (_, registry) = setup::<VehicleRecord>();
        let stored = registry.submit(vehicle("abc-1234")).unwrap();
        assert_eq!(stored.plate, "ABC1234");
    }

    #[test]
    fn test_edit_keeps_id_and_replaces_in_place() {
        let (_, registry) = setup::<VehicleRecord>();
        let first = registry.submit(vehicle("ABC1234")).unwrap();
        let second = registry.submit(vehicle("BRA2E19")).unwrap();

        let mut edited = first.clone();
        edited.contract = ContractType::Monthly;
        edited.duration_minutes = 1_440;
        let saved = registry.submit(edited).unwrap();

        assert_eq!(saved.id, first.id);
        assert_eq!(saved.duration_minutes, 43_200);
        let ids: Vec<String> = registry.list().unwrap().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_edit_of_unknown_id_is_not_found() {
        let (_, registry) = setup::<VehicleRecord>();
        let mut ghost = vehicle("ABC1234");
        ghost.id = "ghost".to_string();
        assert!(matches!(registry.submit(ghost), Err(EngineError::NotFound(_))));
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn test_keeps_given_entry_date() {
        let (_, registry) = setup::<VehicleRecord>();
        let mut record = vehicle("ABC1234");
        record.entry_date = NaiveDate::from_ymd_opt(2024, 12, 31);
        record.entry_time = NaiveTime::from_hms_opt(22, 0, 0);
        let stored = registry.submit(record).unwrap();
        assert_eq!(stored.entry_date, NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn test_search_find_delete() {
        let (_, registry) = setup::<VehicleRecord>();
        let mut joao = vehicle("ABC1234");
        joao.driver = "João".to_string();
        let joao = registry.submit(joao).unwrap();
        registry.submit(vehicle("BRA2E19")).unwrap();

        assert_eq!(registry.search("").unwrap().len(), 2);
        let found = registry.search("joao").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(registry.find(&joao.id).unwrap().plate, "ABC1234");

        registry.delete(&joao.id).unwrap();
        assert!(matches!(registry.find(&joao.id), Err(EngineError::NotFound(_))));
        assert!(matches!(registry.delete(&joao.id), Err(EngineError::NotFound(_))));
        assert_eq!(registry.list().unwrap().len(), 1);
    }

    #[test]
    fn test_purge_requires_exact_phrase() {
        let (_, registry) = setup::<VehicleRecord>();
        registry.submit(vehicle("ABC1234")).unwrap();
        registry.submit(vehicle("BRA2E19")).unwrap();

        assert!(matches!(registry.purge("excluir tudo"), Err(EngineError::ConfirmationMismatch { .. })));
        assert_eq!(registry.list().unwrap().len(), 2);

        assert_eq!(registry.purge("EXCLUIR TUDO").unwrap(), 2);
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn test_person_submit() {
        let (_, registry) = setup::<PersonRecord>();
        let person = PersonRecord {
            name: "ana lima".to_string(),
            ..PersonRecord::default()
        };
        let stored = registry.submit(person).unwrap();
        assert_eq!(stored.name, "Ana Lima");
        assert_eq!(stored.duration_minutes, 43_200);

        let nameless = PersonRecord::default();
        assert!(matches!(registry.submit(nameless), Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_now_comes_from_clock() {
        let (_, registry) = setup::<VehicleRecord>();
        assert_eq!(registry.now(), now());
    }
}
