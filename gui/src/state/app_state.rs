// UI state of the check-in pages: the page shown, form drafts, notices and
// pending confirmations. Everything here is plain data so it can be tested
// without a window.
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use shared::clock::{current_minute, Clock};
use shared::duration::{default_duration, normalize_duration};
use shared::models::{Attachment, ContractType, LodgingKind, PersonRecord, VehicleKind, VehicleRecord};
use shared::plate::format_plate;
use shared::utils::title_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Vehicles,
    People,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Vehicles => "Cadastro de Veículos",
            Page::People => "Cadastro de Pessoas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentSlot {
    Photo,
    VehicleDocument,
    DriverLicense,
    ProofOfAddress,
}

impl AttachmentSlot {
    pub const VEHICLE_SLOTS: [AttachmentSlot; 4] = [
        AttachmentSlot::Photo,
        AttachmentSlot::VehicleDocument,
        AttachmentSlot::DriverLicense,
        AttachmentSlot::ProofOfAddress,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AttachmentSlot::Photo => "Foto",
            AttachmentSlot::VehicleDocument => "Documento do Veículo",
            AttachmentSlot::DriverLicense => "CNH",
            AttachmentSlot::ProofOfAddress => "Comprovante de Endereço",
        }
    }

    /// The photo slot takes images only; the document slots also take PDFs.
    pub fn accept(&self) -> &'static str {
        match self {
            AttachmentSlot::Photo => "image/*",
            _ => "image/*,application/pdf",
        }
    }
}

fn parse_date_field(value: &str) -> Result<Option<NaiveDate>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Data de entrada inválida: {}", value))
}

fn parse_time_field(value: &str) -> Result<Option<NaiveTime>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(Some)
        .map_err(|_| format!("Hora de entrada inválida: {}", value))
}

fn date_field(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn time_field(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

/// Vehicle form contents. Dates and times are kept as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub id: Option<String>,
    pub kind: VehicleKind,
    pub plate: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub driver: String,
    pub document: String,
    pub phone: String,
    pub profession: String,
    pub contract: ContractType,
    pub spot: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub photo: Option<Attachment>,
    pub vehicle_document: Option<Attachment>,
    pub driver_license: Option<Attachment>,
    pub proof_of_address: Option<Attachment>,
}

impl Default for VehicleDraft {
    fn default() -> Self {
        VehicleDraft::from_record(&VehicleRecord::default())
    }
}

impl VehicleDraft {
    pub fn from_record(record: &VehicleRecord) -> Self {
        VehicleDraft {
            id: (!record.id.is_empty()).then(|| record.id.clone()),
            kind: record.kind,
            plate: record.plate.clone(),
            model: record.model.clone(),
            year: record.year.clone(),
            color: record.color.clone(),
            driver: record.driver.clone(),
            document: record.document.clone(),
            phone: record.phone.clone(),
            profession: record.profession.clone(),
            contract: record.contract,
            spot: record.parking_spot.clone(),
            date: date_field(record.entry_date),
            time: time_field(record.entry_time),
            duration: record.duration_minutes,
            photo: record.photo.clone(),
            vehicle_document: record.vehicle_document.clone(),
            driver_license: record.driver_license.clone(),
            proof_of_address: record.proof_of_address.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_plate(&mut self, raw: &str) {
        self.plate = format_plate(raw);
    }

    pub fn set_driver(&mut self, value: &str) {
        self.driver = title_case(value);
    }

    pub fn set_model(&mut self, value: &str) {
        self.model = title_case(value);
    }

    pub fn set_color(&mut self, value: &str) {
        self.color = title_case(value);
    }

    pub fn set_profession(&mut self, value: &str) {
        self.profession = title_case(value);
    }

    /// Changing the contract repairs a duration that no longer fits it.
    pub fn set_contract(&mut self, contract: ContractType) {
        self.contract = contract;
        self.duration = normalize_duration(self.duration, contract);
    }

    /// "Agora" button: today's date and the current minute.
    pub fn fill_now(&mut self, clock: &dyn Clock) {
        let (date, time) = current_minute(clock);
        self.date = date_field(Some(date));
        self.time = time_field(Some(time));
    }

    pub fn attachment(&self, slot: AttachmentSlot) -> Option<&Attachment> {
        match slot {
            AttachmentSlot::Photo => self.photo.as_ref(),
            AttachmentSlot::VehicleDocument => self.vehicle_document.as_ref(),
            AttachmentSlot::DriverLicense => self.driver_license.as_ref(),
            AttachmentSlot::ProofOfAddress => self.proof_of_address.as_ref(),
        }
    }

    pub fn set_attachment(&mut self, slot: AttachmentSlot, attachment: Option<Attachment>) {
        match slot {
            AttachmentSlot::Photo => self.photo = attachment,
            AttachmentSlot::VehicleDocument => self.vehicle_document = attachment,
            AttachmentSlot::DriverLicense => self.driver_license = attachment,
            AttachmentSlot::ProofOfAddress => self.proof_of_address = attachment,
        }
    }

    pub fn to_record(&self) -> Result<VehicleRecord, String> {
        Ok(VehicleRecord {
            id: self.id.clone().unwrap_or_default(),
            kind: self.kind,
            plate: self.plate.clone(),
            model: self.model.clone(),
            year: self.year.clone(),
            color: self.color.clone(),
            driver: self.driver.clone(),
            document: self.document.clone(),
            phone: self.phone.clone(),
            profession: self.profession.clone(),
            contract: self.contract,
            parking_spot: self.spot.clone(),
            entry_date: parse_date_field(&self.date)?,
            entry_time: parse_time_field(&self.time)?,
            duration_minutes: self.duration,
            photo: self.photo.clone(),
            vehicle_document: self.vehicle_document.clone(),
            driver_license: self.driver_license.clone(),
            proof_of_address: self.proof_of_address.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonDraft {
    pub id: Option<String>,
    pub name: String,
    pub document: String,
    pub phone: String,
    pub profession: String,
    pub photo: Option<Attachment>,
    pub lodging_kind: LodgingKind,
    pub lodging_number: String,
    pub contract: ContractType,
    pub date: String,
    pub time: String,
    pub duration: u32,
}

impl Default for PersonDraft {
    fn default() -> Self {
        PersonDraft::from_record(&PersonRecord::default())
    }
}

impl PersonDraft {
    pub fn from_record(record: &PersonRecord) -> Self {
        PersonDraft {
            id: (!record.id.is_empty()).then(|| record.id.clone()),
            name: record.name.clone(),
            document: record.document.clone(),
            phone: record.phone.clone(),
            profession: record.profession.clone(),
            photo: record.photo.clone(),
            lodging_kind: record.lodging_kind,
            lodging_number: record.lodging_number.clone(),
            contract: record.contract,
            date: date_field(record.entry_date),
            time: time_field(record.entry_time),
            duration: record.duration_minutes,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Only the first letter is raised while typing a name.
    pub fn set_name(&mut self, value: &str) {
        self.name = shared::utils::capitalize_first(value);
    }

    /// A new person picks up the contract's default duration; edits are repaired.
    pub fn set_contract(&mut self, contract: ContractType) {
        self.contract = contract;
        self.duration = if self.is_editing() {
            normalize_duration(self.duration, contract)
        } else {
            default_duration(contract)
        };
    }

    pub fn fill_now(&mut self, clock: &dyn Clock) {
        let (date, time) = current_minute(clock);
        self.date = date_field(Some(date));
        self.time = time_field(Some(time));
    }

    pub fn to_record(&self) -> Result<PersonRecord, String> {
        Ok(PersonRecord {
            id: self.id.clone().unwrap_or_default(),
            name: self.name.clone(),
            document: self.document.clone(),
            phone: self.phone.clone(),
            profession: self.profession.clone(),
            photo: self.photo.clone(),
            lodging_kind: self.lodging_kind,
            lodging_number: self.lodging_number.clone(),
            contract: self.contract,
            entry_date: parse_date_field(&self.date)?,
            entry_time: parse_time_field(&self.time)?,
            duration_minutes: self.duration,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Error, message: message.into() }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => "notice info",
            NoticeKind::Error => "notice error",
        }
    }
}

/// Destructive action waiting for the operator's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Delete { page: Page, id: String, label: String },
    Purge { page: Page, count: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub page: Page,
    pub search_term: String,
    pub notice: Option<Notice>,
    pub pending: Option<PendingAction>,
    /// Phrase typed in the purge dialog.
    pub purge_input: String,
    pub now: NaiveDateTime,
    /// Bumped after every mutation so views reload from storage.
    pub revision: u64,
    /// File inputs are keyed by this; bumping it recreates them empty.
    pub upload_generation: u64,
}

impl AppState {
    pub fn new(now: NaiveDateTime) -> Self {
        AppState {
            page: Page::default(),
            search_term: String::new(),
            notice: None,
            pending: None,
            purge_input: String::new(),
            now,
            revision: 0,
            upload_generation: 0,
        }
    }

    pub fn switch_page(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.search_term.clear();
            self.pending = None;
            self.notice = None;
        }
    }

    pub fn ask(&mut self, action: PendingAction) {
        self.purge_input.clear();
        self.pending = Some(action);
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
        self.purge_input.clear();
    }

    pub fn touch(&mut self) {
        self.revision += 1;
    }

    /// Reports a refused file and clears the file inputs.
    pub fn reject_upload(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::error(message));
        self.upload_generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::clock::FixedClock;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 7).unwrap().and_hms_opt(14, 5, 33).unwrap()
    }

    #[test]
    fn test_blank_vehicle_draft() {
        let draft = VehicleDraft::default();
        assert_eq!(draft.kind, VehicleKind::Car);
        assert_eq!(draft.contract, ContractType::Monthly);
        assert_eq!(draft.duration, 60);
        assert!(!draft.is_editing());
        assert_eq!(draft.date, "");
    }

    #[test]
    fn test_vehicle_draft_live_formatting() {
        let mut draft = VehicleDraft::default();
        draft.set_plate("bra-2e19");
        draft.set_driver("maria DE souza");
        draft.set_model("onix plus");
        assert_eq!(draft.plate, "BRA2E19");
        assert_eq!(draft.driver, "Maria De Souza");
        assert_eq!(draft.model, "Onix Plus");
    }

    #[test]
    fn test_contract_change_repairs_duration() {
        let mut draft = VehicleDraft::default();
        draft.duration = 43_200;
        draft.set_contract(ContractType::Hourly);
        assert_eq!(draft.duration, 60);

        draft.duration = 30;
        draft.set_contract(ContractType::Monthly);
        assert_eq!(draft.duration, 43_200);
    }

    #[test]
    fn test_fill_now_truncates_to_minute() {
        let mut draft = VehicleDraft::default();
        draft.fill_now(&FixedClock(now()));
        assert_eq!(draft.date, "2025-06-07");
        assert_eq!(draft.time, "14:05");
    }

    #[test]
    fn test_vehicle_draft_round_trip_and_errors() {
        let mut draft = VehicleDraft::default();
        draft.set_plate("ABC1234");
        draft.date = "2025-06-07".to_string();
        let record = draft.to_record().unwrap();
        assert_eq!(record.entry_date, NaiveDate::from_ymd_opt(2025, 6, 7));
        assert_eq!(record.entry_time, None);
        assert_eq!(record.id, "");

        let mut stored = record.clone();
        stored.id = "abc".to_string();
        let editing = VehicleDraft::from_record(&stored);
        assert!(editing.is_editing());
        assert_eq!(editing.to_record().unwrap(), stored);

        draft.time = "25:99".to_string();
        assert!(draft.to_record().is_err());
    }

    #[test]
    fn test_attachment_slots() {
        let mut draft = VehicleDraft::default();
        let pdf = Attachment::inline("application/pdf", b"%PDF".to_vec());
        draft.set_attachment(AttachmentSlot::DriverLicense, Some(pdf.clone()));
        assert_eq!(draft.attachment(AttachmentSlot::DriverLicense), Some(&pdf));
        assert_eq!(draft.attachment(AttachmentSlot::Photo), None);
        assert_eq!(AttachmentSlot::Photo.accept(), "image/*");
    }

    #[test]
    fn test_person_contract_defaults() {
        let mut draft = PersonDraft::default();
        assert_eq!(draft.duration, 43_200);
        draft.set_contract(ContractType::Daily);
        assert_eq!(draft.duration, 1_440);
        draft.set_name("ana");
        assert_eq!(draft.name, "Ana");
    }

    #[test]
    fn test_app_state_page_switch_and_confirmations() {
        let mut state = AppState::new(now());
        state.search_term = "ana".to_string();
        state.ask(PendingAction::Purge { page: Page::Vehicles, count: 3 });
        state.purge_input = "EXCLUIR".to_string();

        state.dismiss();
        assert_eq!(state.pending, None);
        assert_eq!(state.purge_input, "");

        state.switch_page(Page::People);
        assert_eq!(state.page, Page::People);
        assert_eq!(state.search_term, "");

        state.touch();
        assert_eq!(state.revision, 1);
    }

    #[test]
    fn test_rejected_upload_clears_inputs() {
        let mut state = AppState::new(now());
        state.reject_upload("Tipo de arquivo não permitido: text/plain");
        assert_eq!(state.upload_generation, 1);
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));

        state.reject_upload("Arquivo muito grande");
        assert_eq!(state.upload_generation, 2);
        assert_eq!(state.revision, 0);
    }
}
