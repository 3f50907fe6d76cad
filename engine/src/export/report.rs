// Tabular vehicle report shared by the PDF and CSV exporters.
use chrono::{NaiveDate, NaiveDateTime};

use shared::duration::format_minutes;
use shared::language::Language;
use shared::models::VehicleRecord;
use shared::overstay::{ReportStatus, TolerancePolicy};
use shared::plate::display_plate;
use shared::utils::{capitalize_first, truncate_with_ellipsis};

use crate::error::{EngineError, EngineResult};
use crate::services::overstay_at;

pub const REPORT_TITLE: &str = "Relatório de Veículos - Hotel Parking";

pub const PDF_COLUMNS: [&str; 9] = [
    "Condutor",
    "Placa",
    "Tipo",
    "Modelo",
    "Data Entrada",
    "Hora Entrada",
    "Local",
    "Tempo Permitido",
    "Status",
];

pub const CSV_COLUMNS: [&str; 17] = [
    "Condutor",
    "Placa",
    "Tipo",
    "Modelo",
    "Cor",
    "Ano",
    "Documento",
    "Telefone",
    "Profissão",
    "Contrato",
    "Local",
    "Data Entrada",
    "Hora Entrada",
    "Tempo Permitido",
    "Tempo Decorrido",
    "Tempo Excedido",
    "Status",
];

const DRIVER_MAX: usize = 20;
const MODEL_MAX: usize = 16;
const LOCATION_MAX: usize = 14;
const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub driver: String,
    pub plate: String,
    pub kind: String,
    pub model: String,
    pub color: String,
    pub year: String,
    pub document: String,
    pub phone: String,
    pub profession: String,
    pub contract: String,
    pub location: String,
    pub entry_date: Option<NaiveDate>,
    pub entry_time: String,
    pub allowed: String,
    pub elapsed: String,
    pub overstay: String,
    pub status: ReportStatus,
}

impl ReportRow {
    fn from_record(record: &VehicleRecord, now: NaiveDateTime, policy: &TolerancePolicy, language: Language) -> Self {
        let overstay = overstay_at(record, now, policy);
        let (elapsed, overstay_label, status) = match &overstay {
            Some(result) => (result.elapsed_label(language), result.label(language), result.report_status()),
            // Nothing to measure without an entry date.
            None => (PLACEHOLDER.to_string(), PLACEHOLDER.to_string(), ReportStatus::Ok),
        };

        ReportRow {
            driver: record.driver.clone(),
            plate: display_plate(&record.plate),
            kind: capitalize_first(record.kind.code()),
            model: record.model.clone(),
            color: record.color.clone(),
            year: record.year.clone(),
            document: record.document.clone(),
            phone: record.phone.clone(),
            profession: record.profession.clone(),
            contract: record.contract.display_name().to_string(),
            location: record.parking_spot.clone(),
            entry_date: record.entry_date,
            entry_time: record
                .entry_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            allowed: format_minutes(record.duration_minutes as i64),
            elapsed,
            overstay: overstay_label,
            status,
        }
    }

    fn entry_date_label(&self) -> String {
        self.entry_date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    fn or_placeholder(value: &str) -> String {
        if value.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            value.to_string()
        }
    }

    /// Cells of the summarized PDF table, long text cut with "...".
    pub fn pdf_cells(&self) -> [String; 9] {
        [
            truncate_with_ellipsis(&self.driver, DRIVER_MAX),
            self.plate.clone(),
            self.kind.clone(),
            truncate_with_ellipsis(&self.model, MODEL_MAX),
            self.entry_date_label(),
            Self::or_placeholder(&self.entry_time),
            Self::or_placeholder(&truncate_with_ellipsis(&self.location, LOCATION_MAX)),
            self.allowed.clone(),
            self.status.label().to_string(),
        ]
    }

    /// Full, untruncated cells of the CSV export.
    pub fn csv_cells(&self) -> [String; 17] {
        [
            self.driver.clone(),
            self.plate.clone(),
            self.kind.clone(),
            self.model.clone(),
            self.color.clone(),
            self.year.clone(),
            self.document.clone(),
            self.phone.clone(),
            self.profession.clone(),
            self.contract.clone(),
            self.location.clone(),
            self.entry_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            self.entry_time.clone(),
            self.allowed.clone(),
            self.elapsed.clone(),
            self.overstay.clone(),
            self.status.label().to_string(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct VehicleReport {
    pub title: String,
    pub generated_at: NaiveDateTime,
    pub rows: Vec<ReportRow>,
}

impl VehicleReport {
    /// Builds the report for `records` as of `now`. An empty slice has nothing to export.
    pub fn build(
        records: &[VehicleRecord],
        now: NaiveDateTime,
        policy: &TolerancePolicy,
        language: Language,
    ) -> EngineResult<Self> {
        if records.is_empty() {
            return Err(EngineError::EmptyExport);
        }
        let rows = records
            .iter()
            .map(|record| ReportRow::from_record(record, now, policy, language))
            .collect();
        Ok(VehicleReport {
            title: REPORT_TITLE.to_string(),
            generated_at: now,
            rows,
        })
    }

    pub fn generated_label(&self) -> String {
        format!("Gerado em: {}", self.generated_at.format("%d/%m/%Y %H:%M:%S"))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `<prefix>_YYYY-MM-DD.<extension>`
pub fn export_file_name(prefix: &str, date: NaiveDate, extension: &str) -> String {
    format!("{}_{}.{}", prefix, date.format("%Y-%m-%d"), extension)
}
