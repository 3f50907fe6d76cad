pub mod csv_export;
pub mod pdf_export;
pub mod report;

pub use csv_export::{export_csv, render_csv};
pub use pdf_export::{export_pdf, render_pdf};
pub use report::{VehicleReport, REPORT_TITLE};

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Formato desconhecido: {}", s)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Writes the report in `format` under `dir`.
pub fn export_report(report: &VehicleReport, format: ExportFormat, dir: &std::path::Path) -> crate::error::EngineResult<std::path::PathBuf> {
    match format {
        ExportFormat::Pdf => export_pdf(report, dir),
        ExportFormat::Csv => export_csv(report, dir),
    }
}
