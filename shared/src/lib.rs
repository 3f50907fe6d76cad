//! Domain models and the pure check-in kernel: plate formatting, duration
//! normalization, overstay evaluation and free-text search.
pub mod clock;
pub mod duration;
pub mod language;
pub mod models;
pub mod overstay;
pub mod plate;
pub mod search;
pub mod utils;

pub use clock::{next_refresh_delay, Clock, FixedClock, SystemClock};
pub use duration::{default_duration, duration_choices, format_minutes, normalize_duration, MONTHLY_MINUTES};
pub use language::Language;
pub use models::{
    Attachment, CheckInRecord, ContractType, LodgingKind, PersonRecord, ValidationError, VehicleKind, VehicleRecord,
};
pub use overstay::{
    elapsed_label, elapsed_minutes, evaluate_overstay, Overstay, OverstayStatus, ReportStatus, SeverityTier,
    TolerancePolicy,
};
pub use plate::{display_plate, format_plate, validate_plate, PlateFormat};
pub use search::{matches, normalize_text, search, SearchField, Searchable};
