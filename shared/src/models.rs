use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::duration::default_duration;
use crate::plate::{format_plate, validate_plate};
use crate::search::{SearchField, Searchable};
use crate::utils::title_case;

// Billing/rental category of an entry. Stored with the codes the check-in
// pages have always written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractType {
    #[default]
    Monthly,
    Hourly,
    Daily,
    Overnight,
    Casual,
}

impl ContractType {
    pub const ALL: [ContractType; 5] = [
        ContractType::Monthly,
        ContractType::Hourly,
        ContractType::Daily,
        ContractType::Overnight,
        ContractType::Casual,
    ];

    /// Unknown or empty codes read as casual.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "mensalista" => ContractType::Monthly,
            "por_hora" => ContractType::Hourly,
            "diaria" => ContractType::Daily,
            "pernoite" => ContractType::Overnight,
            _ => ContractType::Casual,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ContractType::Monthly => "mensalista",
            ContractType::Hourly => "por_hora",
            ContractType::Daily => "diaria",
            ContractType::Overnight => "pernoite",
            ContractType::Casual => "avulso",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ContractType::Monthly => "Mensalista",
            ContractType::Hourly => "Por Hora",
            ContractType::Daily => "Diária",
            ContractType::Overnight => "Pernoite",
            ContractType::Casual => "Avulso",
        }
    }

    /// Monthly contracts talk about deadlines instead of elapsed time.
    pub fn is_monthly(&self) -> bool {
        matches!(self, ContractType::Monthly)
    }
}

impl From<String> for ContractType {
    fn from(code: String) -> Self {
        ContractType::from_code(&code)
    }
}

impl From<ContractType> for String {
    fn from(contract: ContractType) -> Self {
        contract.code().to_string()
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VehicleKind {
    #[default]
    #[serde(rename = "carro")]
    Car,
    #[serde(rename = "moto")]
    Motorcycle,
    #[serde(rename = "caminhao")]
    Truck,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Car, VehicleKind::Motorcycle, VehicleKind::Truck];

    pub fn code(&self) -> &'static str {
        match self {
            VehicleKind::Car => "carro",
            VehicleKind::Motorcycle => "moto",
            VehicleKind::Truck => "caminhao",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        VehicleKind::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VehicleKind::Car => "Carro",
            VehicleKind::Motorcycle => "Moto",
            VehicleKind::Truck => "Caminhão",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LodgingKind {
    #[default]
    #[serde(rename = "nenhum")]
    None,
    #[serde(rename = "casa")]
    House,
    #[serde(rename = "apartamento")]
    Apartment,
    #[serde(rename = "quarto")]
    Room,
    #[serde(rename = "pousada")]
    Inn,
}

impl LodgingKind {
    pub const ALL: [LodgingKind; 5] = [
        LodgingKind::None,
        LodgingKind::House,
        LodgingKind::Apartment,
        LodgingKind::Room,
        LodgingKind::Inn,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            LodgingKind::None => "nenhum",
            LodgingKind::House => "casa",
            LodgingKind::Apartment => "apartamento",
            LodgingKind::Room => "quarto",
            LodgingKind::Inn => "pousada",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        LodgingKind::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LodgingKind::None => "Nenhum",
            LodgingKind::House => "Casa",
            LodgingKind::Apartment => "Apartamento",
            LodgingKind::Room => "Quarto",
            LodgingKind::Inn => "Pousada",
        }
    }
}

/// Photo or document attached to a record.
///
/// Persisted as a single string: inline data becomes a
/// `data:<mime>;base64,<payload>` URL, references (for example `blob:` URLs left
/// behind by older data) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    Inline { mime_type: String, bytes: Vec<u8> },
    Reference(String),
}

impl Attachment {
    pub fn inline(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Attachment::Inline { mime_type: mime_type.into(), bytes }
    }

    pub fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix("data:") {
            if let Some((header, payload)) = rest.split_once(',') {
                if let Some(mime_type) = header.strip_suffix(";base64") {
                    if let Ok(bytes) = BASE64.decode(payload.trim()) {
                        return Attachment::Inline { mime_type: mime_type.to_string(), bytes };
                    }
                }
            }
        }
        Attachment::Reference(raw.to_string())
    }

    pub fn to_data_url(&self) -> String {
        match self {
            Attachment::Inline { mime_type, bytes } => {
                format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
            }
            Attachment::Reference(raw) => raw.clone(),
        }
    }

    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Attachment::Inline { mime_type, .. } => Some(mime_type),
            Attachment::Reference(_) => None,
        }
    }

    pub fn is_pdf(&self) -> bool {
        match self {
            Attachment::Inline { mime_type, .. } => mime_type == "application/pdf",
            Attachment::Reference(raw) => raw.starts_with("blob:") || raw.contains(".pdf"),
        }
    }

    pub fn byte_len(&self) -> usize {
        match self {
            Attachment::Inline { bytes, .. } => bytes.len(),
            Attachment::Reference(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Placa inválida '{0}'. Formatos aceitos: ABC-1234 (padrão antigo) ou ABC1D23 (Mercosul)")]
    InvalidPlate(String),
    #[error("Campo obrigatório vazio: {0}")]
    MissingField(&'static str),
}

/// Common surface of vehicle and person entries, used by the record store,
/// the registry and the exports.
pub trait CheckInRecord: Searchable + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn assign_id(&mut self, id: String);
    fn contract(&self) -> ContractType;
    fn duration_minutes(&self) -> u32;
    fn set_duration_minutes(&mut self, minutes: u32);
    fn entry_date(&self) -> Option<NaiveDate>;
    fn set_entry_date(&mut self, date: NaiveDate);
    fn entry_time(&self) -> Option<NaiveTime>;
    /// Short human description for logs and confirmation prompts.
    fn summary(&self) -> String;

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Canonicalizes input (plate, capitalized names) before the record is stored.
    fn tidy(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "tipo", default)]
    pub kind: VehicleKind,
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "modelo", default)]
    pub model: String,
    #[serde(rename = "ano", default)]
    pub year: String,
    #[serde(rename = "cor", default)]
    pub color: String,
    #[serde(rename = "condutor", default)]
    pub driver: String,
    #[serde(rename = "documento", default)]
    pub document: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(rename = "profissao", default)]
    pub profession: String,
    #[serde(rename = "tipoContrato", default)]
    pub contract: ContractType,
    #[serde(rename = "localEstacionamento", default)]
    pub parking_spot: String,
    #[serde(rename = "dataEntrada", default, with = "serde_fields::optional_date")]
    pub entry_date: Option<NaiveDate>,
    #[serde(rename = "horaEntrada", default, with = "serde_fields::optional_time")]
    pub entry_time: Option<NaiveTime>,
    #[serde(
        rename = "duracaoMinutos",
        default = "serde_fields::default_vehicle_duration",
        deserialize_with = "serde_fields::lenient_minutes::vehicle"
    )]
    pub duration_minutes: u32,
    #[serde(rename = "fotoUrl", default, with = "serde_fields::optional_attachment")]
    pub photo: Option<Attachment>,
    #[serde(rename = "fotoDocumentoVeiculoUrl", default, with = "serde_fields::optional_attachment")]
    pub vehicle_document: Option<Attachment>,
    #[serde(rename = "fotoCnhUrl", default, with = "serde_fields::optional_attachment")]
    pub driver_license: Option<Attachment>,
    #[serde(rename = "fotoComprovanteEnderecoUrl", default, with = "serde_fields::optional_attachment")]
    pub proof_of_address: Option<Attachment>,
}

impl Default for VehicleRecord {
    // Blank form: car, monthly contract, one hour, like a fresh registration page.
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: VehicleKind::Car,
            plate: String::new(),
            model: String::new(),
            year: String::new(),
            color: String::new(),
            driver: String::new(),
            document: String::new(),
            phone: String::new(),
            profession: String::new(),
            contract: ContractType::Monthly,
            parking_spot: String::new(),
            entry_date: None,
            entry_time: None,
            duration_minutes: 60,
            photo: None,
            vehicle_document: None,
            driver_license: None,
            proof_of_address: None,
        }
    }
}

impl Searchable for VehicleRecord {
    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::Text(&self.driver),
            SearchField::Plate(&self.plate),
            SearchField::Text(&self.model),
            SearchField::Text(&self.color),
            SearchField::Text(&self.document),
            SearchField::Text(&self.phone),
            SearchField::Text(&self.profession),
            SearchField::Text(&self.year),
        ]
    }
}

impl CheckInRecord for VehicleRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn contract(&self) -> ContractType {
        self.contract
    }

    fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    fn set_duration_minutes(&mut self, minutes: u32) {
        self.duration_minutes = minutes;
    }

    fn entry_date(&self) -> Option<NaiveDate> {
        self.entry_date
    }

    fn set_entry_date(&mut self, date: NaiveDate) {
        self.entry_date = Some(date);
    }

    fn entry_time(&self) -> Option<NaiveTime> {
        self.entry_time
    }

    fn summary(&self) -> String {
        format!("{} ({})", crate::plate::display_plate(&self.plate), self.driver)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !validate_plate(&self.plate) {
            return Err(ValidationError::InvalidPlate(self.plate.clone()));
        }
        Ok(())
    }

    fn tidy(&mut self) {
        self.plate = format_plate(&self.plate);
        self.driver = title_case(&self.driver);
        self.color = title_case(&self.color);
        self.model = title_case(&self.model);
        self.profession = title_case(&self.profession);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "documento", default)]
    pub document: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(rename = "profissao", default)]
    pub profession: String,
    #[serde(rename = "fotoUrl", default, with = "serde_fields::optional_attachment")]
    pub photo: Option<Attachment>,
    #[serde(rename = "tipoImovel", default)]
    pub lodging_kind: LodgingKind,
    #[serde(rename = "numeroImovel", default)]
    pub lodging_number: String,
    #[serde(rename = "tipoContrato", default)]
    pub contract: ContractType,
    #[serde(rename = "dataEntrada", default, with = "serde_fields::optional_date")]
    pub entry_date: Option<NaiveDate>,
    #[serde(rename = "horaEntrada", default, with = "serde_fields::optional_time")]
    pub entry_time: Option<NaiveTime>,
    #[serde(
        rename = "duracaoMinutos",
        default = "serde_fields::default_person_duration",
        deserialize_with = "serde_fields::lenient_minutes::person"
    )]
    pub duration_minutes: u32,
}

impl Default for PersonRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            document: String::new(),
            phone: String::new(),
            profession: String::new(),
            photo: None,
            lodging_kind: LodgingKind::None,
            lodging_number: String::new(),
            contract: ContractType::Monthly,
            entry_date: None,
            entry_time: None,
            duration_minutes: default_duration(ContractType::Monthly),
        }
    }
}

impl Searchable for PersonRecord {
    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::Text(&self.name),
            SearchField::Text(&self.document),
            SearchField::Text(&self.phone),
            SearchField::Text(&self.profession),
        ]
    }
}

impl CheckInRecord for PersonRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn contract(&self) -> ContractType {
        self.contract
    }

    fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    fn set_duration_minutes(&mut self, minutes: u32) {
        self.duration_minutes = minutes;
    }

    fn entry_date(&self) -> Option<NaiveDate> {
        self.entry_date
    }

    fn set_entry_date(&mut self, date: NaiveDate) {
        self.entry_date = Some(date);
    }

    fn entry_time(&self) -> Option<NaiveTime> {
        self.entry_time
    }

    fn summary(&self) -> String {
        if self.document.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.document)
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("nome"));
        }
        Ok(())
    }

    fn tidy(&mut self) {
        self.name = title_case(&self.name);
        self.profession = title_case(&self.profession);
    }
}

// Field codecs for the stored JSON layout: empty strings stand for "absent".
mod serde_fields {
    use super::Attachment;
    use crate::duration::default_duration;
    use crate::models::ContractType;
    use chrono::{NaiveDate, NaiveTime};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn default_vehicle_duration() -> u32 {
        60
    }

    pub fn default_person_duration() -> u32 {
        default_duration(ContractType::Monthly)
    }

    /// Durations written by older pages may be null, a numeric string or a float.
    /// Anything unreadable falls back to the record's default duration.
    pub mod lenient_minutes {
        use super::*;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Other(serde::de::IgnoredAny),
        }

        fn minutes(raw: Option<Raw>) -> Option<u32> {
            let value = match raw? {
                Raw::Number(n) => n,
                Raw::Text(text) => text.trim().parse::<f64>().ok()?,
                Raw::Other(_) => return None,
            };
            if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 {
                Some(value.round() as u32)
            } else {
                None
            }
        }

        fn read<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
            Ok(minutes(Option::<Raw>::deserialize(deserializer)?))
        }

        pub fn vehicle<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
            Ok(read(deserializer)?.unwrap_or_else(default_vehicle_duration))
        }

        pub fn person<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
            Ok(read(deserializer)?.unwrap_or_else(default_person_duration))
        }
    }

    pub mod optional_date {
        use super::*;

        pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
                None => serializer.serialize_str(""),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            // Older entries sometimes carried a full ISO timestamp.
            let date_part = raw.get(..10).unwrap_or(raw);
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }

    pub mod optional_time {
        use super::*;

        pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(time) => serializer.serialize_str(&time.format("%H:%M").to_string()),
                None => serializer.serialize_str(""),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            NaiveTime::parse_from_str(raw, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }

    pub mod optional_attachment {
        use super::*;

        pub fn serialize<S: Serializer>(value: &Option<Attachment>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(attachment) => serializer.serialize_str(&attachment.to_data_url()),
                None => serializer.serialize_str(""),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Attachment>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
            if raw.trim().is_empty() {
                Ok(None)
            } else {
                Ok(Some(Attachment::parse(&raw)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle() -> VehicleRecord {
        VehicleRecord {
            id: "v-1".to_string(),
            plate: "ABC1D23".to_string(),
            model: "Onix".to_string(),
            year: "2022".to_string(),
            color: "Prata".to_string(),
            driver: "João Silva".to_string(),
            contract: ContractType::Hourly,
            entry_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            entry_time: NaiveTime::from_hms_opt(10, 0, 0),
            photo: Some(Attachment::inline("image/jpeg", vec![0xFF, 0xD8, 0xFF, 0x00])),
            ..VehicleRecord::default()
        }
    }

    #[test]
    fn test_vehicle_uses_stored_field_names() {
        let json = serde_json::to_value(sample_vehicle()).unwrap();
        assert_eq!(json["placa"], "ABC1D23");
        assert_eq!(json["condutor"], "João Silva");
        assert_eq!(json["tipoContrato"], "por_hora");
        assert_eq!(json["tipo"], "carro");
        assert_eq!(json["dataEntrada"], "2025-01-01");
        assert_eq!(json["horaEntrada"], "10:00");
        assert_eq!(json["fotoCnhUrl"], "");
        assert!(json["fotoUrl"].as_str().unwrap().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_vehicle_json_round_trip() {
        let vehicle = sample_vehicle();
        let json = serde_json::to_string(&vehicle).unwrap();
        let parsed: VehicleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vehicle);
    }

    #[test]
    fn test_reads_legacy_entry_with_missing_fields() {
        let json = r#"{
            "id": "abc",
            "tipo": "moto",
            "placa": "ABC1234",
            "condutor": "Maria",
            "tipoContrato": "mensalista",
            "dataEntrada": "2025-07-21",
            "horaEntrada": "",
            "duracaoMinutos": 43200,
            "fotoUrl": "blob:http://localhost/123"
        }"#;
        let parsed: VehicleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind, VehicleKind::Motorcycle);
        assert_eq!(parsed.entry_time, None);
        assert_eq!(parsed.parking_spot, "");
        assert_eq!(parsed.photo, Some(Attachment::Reference("blob:http://localhost/123".to_string())));
        assert!(parsed.photo.unwrap().is_pdf());
    }

    #[test]
    fn test_lenient_duration_values() {
        let read = |raw: &str| -> u32 {
            let json = format!(r#"{{"placa":"ABC1234","duracaoMinutos":{}}}"#, raw);
            serde_json::from_str::<VehicleRecord>(&json).unwrap().duration_minutes
        };
        assert_eq!(read("120"), 120);
        assert_eq!(read("\"240\""), 240);
        assert_eq!(read("90.0"), 90);
        assert_eq!(read("null"), 60);
        assert_eq!(read("\"duas horas\""), 60);
        assert_eq!(read("-5"), 60);
        assert_eq!(read("[1]"), 60);

        let person: PersonRecord = serde_json::from_str(r#"{"nome":"Ana","duracaoMinutos":null}"#).unwrap();
        assert_eq!(person.duration_minutes, 43_200);
    }

    #[test]
    fn test_unknown_contract_reads_as_casual() {
        assert_eq!(ContractType::from_code(""), ContractType::Casual);
        assert_eq!(ContractType::from_code("avulso"), ContractType::Casual);
        assert_eq!(ContractType::from_code("por_hora"), ContractType::Hourly);
    }

    #[test]
    fn test_person_defaults_duration_when_absent() {
        let json = r#"{"id":"p1","nome":"Ana","documento":"123","telefone":"","profissao":"","fotoUrl":"","tipoImovel":"pousada","numeroImovel":"12","tipoContrato":"diaria","dataEntrada":"2025-02-03"}"#;
        let parsed: PersonRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.lodging_kind, LodgingKind::Inn);
        assert_eq!(parsed.contract, ContractType::Daily);
        assert_eq!(parsed.duration_minutes, 43_200);
    }

    #[test]
    fn test_attachment_data_url_round_trip() {
        let attachment = Attachment::inline("application/pdf", b"%PDF-1.4".to_vec());
        let url = attachment.to_data_url();
        assert_eq!(Attachment::parse(&url), attachment);
        assert!(attachment.is_pdf());
    }

    #[test]
    fn test_attachment_with_broken_payload_is_kept_verbatim() {
        let raw = "data:image/png;base64,@@@";
        assert_eq!(Attachment::parse(raw), Attachment::Reference(raw.to_string()));
    }

    #[test]
    fn test_vehicle_validation_and_tidy() {
        let mut vehicle = sample_vehicle();
        vehicle.driver = "joão DA silva".to_string();
        vehicle.tidy();
        assert_eq!(vehicle.driver, "João Da Silva");
        assert!(vehicle.validate().is_ok());

        vehicle.plate = "AB12".to_string();
        assert_eq!(vehicle.validate(), Err(ValidationError::InvalidPlate("AB12".to_string())));
    }

    #[test]
    fn test_person_requires_name() {
        let person = PersonRecord::default();
        assert_eq!(person.validate(), Err(ValidationError::MissingField("nome")));
    }
}
