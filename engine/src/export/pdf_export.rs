// Landscape A4 PDF rendering of the vehicle report, using the built-in Helvetica fonts.
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use std::path::{Path, PathBuf};

use super::report::{export_file_name, ReportRow, VehicleReport, PDF_COLUMNS};
use crate::error::{EngineError, EngineResult};
use shared::overstay::ReportStatus;

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const LAYER_NAME: &str = "Camada 1";

const COLUMN_WIDTHS: [f32; 9] = [50.0, 25.0, 20.0, 40.0, 25.0, 25.0, 30.0, 30.0, 25.0];
const TABLE_TOP: f32 = 35.0;
const TABLE_BOTTOM: f32 = 20.0;
const ROW_HEIGHT: f32 = 7.0;
/// Body rows per page, below the repeated header row.
pub const ROWS_PER_PAGE: usize = ((PAGE_HEIGHT - TABLE_TOP - TABLE_BOTTOM) / ROW_HEIGHT) as usize - 1;

const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 10.0;
const HEADER_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;
const PT_TO_MM: f32 = 0.3528;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn pdf_error(e: impl std::fmt::Display) -> EngineError {
    EngineError::PdfError(e.to_string())
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, None))
}

// Helvetica averages about half an em per character.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 * PT_TO_MM
}

fn table_left() -> f32 {
    (PAGE_WIDTH - COLUMN_WIDTHS.iter().sum::<f32>()) / 2.0
}

/// Pages needed for `rows` body rows; an empty report still gets one page.
pub fn page_count(rows: usize) -> usize {
    rows.div_ceil(ROWS_PER_PAGE).max(1)
}

pub fn footer_text(page: usize, total_pages: usize, total_records: usize) -> String {
    format!("Página {} de {} - Total de registros: {}", page, total_pages, total_records)
}

fn status_color(status: ReportStatus) -> Color {
    match status {
        ReportStatus::Exceeded => rgb(196, 48, 43),
        ReportStatus::Ok => rgb(5, 150, 105),
        ReportStatus::Scheduled => rgb(146, 64, 14),
    }
}

fn draw_centered(layer: &PdfLayerReference, text: &str, size: f32, center_x: f32, y: f32, font: &IndirectFontRef) {
    let x = center_x - text_width(text, size) / 2.0;
    layer.use_text(text, size, Mm(x), Mm(y), font);
}

fn draw_rule(layer: &PdfLayerReference, y: f32) {
    let left = table_left();
    let right = left + COLUMN_WIDTHS.iter().sum::<f32>();
    let line = Line {
        points: vec![(Point::new(Mm(left), Mm(y)), false), (Point::new(Mm(right), Mm(y)), false)],
        is_closed: false,
    };
    layer.add_line(line);
}

fn draw_cells(layer: &PdfLayerReference, cells: &[String], y: f32, size: f32, font: &IndirectFontRef) {
    let mut x = table_left();
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        draw_centered(layer, cell, size, x + width / 2.0, y, font);
        x += width;
    }
}

fn draw_header_row(layer: &PdfLayerReference, top: f32, fonts: &Fonts) {
    let baseline = top - ROW_HEIGHT + 2.0;
    layer.set_fill_color(rgb(25, 34, 48));
    let headers: Vec<String> = PDF_COLUMNS.iter().map(|c| c.to_string()).collect();
    draw_cells(layer, &headers, baseline, HEADER_SIZE, &fonts.bold);
    layer.set_outline_color(rgb(200, 200, 200));
    layer.set_outline_thickness(0.3);
    draw_rule(layer, top - ROW_HEIGHT);
}

fn draw_body_row(layer: &PdfLayerReference, row: &ReportRow, top: f32, fonts: &Fonts) {
    let baseline = top - ROW_HEIGHT + 2.0;
    let cells = row.pdf_cells();
    layer.set_fill_color(rgb(0, 0, 0));
    draw_cells(layer, &cells[..8], baseline, BODY_SIZE, &fonts.regular);

    let status_x = table_left() + COLUMN_WIDTHS[..8].iter().sum::<f32>() + COLUMN_WIDTHS[8] / 2.0;
    layer.set_fill_color(status_color(row.status));
    draw_centered(layer, &cells[8], BODY_SIZE, status_x, baseline, &fonts.bold);

    draw_rule(layer, top - ROW_HEIGHT);
}

fn draw_page(
    layer: &PdfLayerReference,
    report: &VehicleReport,
    rows: &[ReportRow],
    page: usize,
    total_pages: usize,
    fonts: &Fonts,
) {
    if page == 1 {
        layer.set_fill_color(rgb(0, 0, 0));
        draw_centered(layer, &report.title, TITLE_SIZE, PAGE_WIDTH / 2.0, PAGE_HEIGHT - 15.0, &fonts.bold);
        draw_centered(layer, &report.generated_label(), SUBTITLE_SIZE, PAGE_WIDTH / 2.0, PAGE_HEIGHT - 25.0, &fonts.regular);
    }

    let mut top = PAGE_HEIGHT - TABLE_TOP;
    draw_header_row(layer, top, fonts);
    top -= ROW_HEIGHT;
    for row in rows {
        draw_body_row(layer, row, top, fonts);
        top -= ROW_HEIGHT;
    }

    layer.set_fill_color(rgb(90, 90, 90));
    let footer = footer_text(page, total_pages, report.len());
    draw_centered(layer, &footer, FOOTER_SIZE, PAGE_WIDTH / 2.0, 10.0, &fonts.regular);
}

pub fn render_pdf(report: &VehicleReport) -> EngineResult<Vec<u8>> {
    if report.is_empty() {
        return Err(EngineError::EmptyExport);
    }

    let (doc, first_page, first_layer) =
        PdfDocument::new(report.title.clone(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
    };

    let total_pages = page_count(report.len());
    for (index, rows) in report.rows.chunks(ROWS_PER_PAGE).enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
            doc.get_page(page).get_layer(layer)
        };
        draw_page(&layer, report, rows, index + 1, total_pages, &fonts);
    }

    doc.save_to_bytes().map_err(pdf_error)
}

/// Writes `veiculos_YYYY-MM-DD.pdf` into `dir` and returns its path.
pub fn export_pdf(report: &VehicleReport, dir: &Path) -> EngineResult<PathBuf> {
    let bytes = render_pdf(report)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name("veiculos", report.generated_at.date(), "pdf"));
    std::fs::write(&path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        rows = report.len(),
        pages = page_count(report.len()),
        bytes = bytes.len(),
        "Exported vehicle report as PDF"
    );
    Ok(path)
}
