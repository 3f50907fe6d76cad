pub mod dialogs;
pub mod person_page;
pub mod sidebar;
pub mod vehicle_form;
pub mod vehicle_table;

pub use dialogs::{ConfirmDialog, NoticeBanner};
pub use person_page::PersonPage;
pub use sidebar::Sidebar;
pub use vehicle_form::VehicleForm;
pub use vehicle_table::VehicleTable;
