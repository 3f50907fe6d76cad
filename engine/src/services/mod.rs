pub mod registry;

pub use registry::{overstay_at, CheckInRegistry, PURGE_PHRASE};
