// CSV rendering of the vehicle report. Every field is quoted.
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::report::{export_file_name, VehicleReport, CSV_COLUMNS};
use crate::error::EngineResult;

pub fn write_csv<W: Write>(report: &VehicleReport, writer: W) -> EngineResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    csv_writer.write_record(CSV_COLUMNS)?;
    for row in &report.rows {
        csv_writer.write_record(row.csv_cells())?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn render_csv(report: &VehicleReport) -> EngineResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;
    Ok(buffer)
}

/// Writes `veiculos_YYYY-MM-DD.csv` into `dir` and returns its path.
pub fn export_csv(report: &VehicleReport, dir: &Path) -> EngineResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name("veiculos", report.generated_at.date(), "csv"));
    let file = std::fs::File::create(&path)?;
    write_csv(report, std::io::BufWriter::new(file))?;
    tracing::info!(path = %path.display(), rows = report.len(), "Exported vehicle report as CSV");
    Ok(path)
}
