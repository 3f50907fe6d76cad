pub mod repository;
pub mod storage;

pub use repository::{Collection, RecordStore, UpsertOutcome, PEOPLE_KEY, VEHICLES_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
