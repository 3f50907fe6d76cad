pub mod app_state;

pub use app_state::{AppState, AttachmentSlot, Notice, NoticeKind, Page, PendingAction, PersonDraft, VehicleDraft};
