use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::RgbImage;
use printpdf::{
    BuiltinFont, Color, Image as PdfImage, ImageTransform, IndirectFontRef, Line, Mm,
    PdfDocument, PdfLayerReference, Point, Rgb,
};
use serde::{Deserialize, Serialize};

use crate::assemble::grid::TimetableExportRow;
use crate::assemble::student::StudentScheduleRow;
use crate::error::ExportError;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const PAGE_MARGIN: f64 = 10.0;
const ROW_HEIGHT: f64 = 7.5;
const CELL_PADDING: f64 = 2.0;
const FONT_SIZE: f64 = 10.0;
const HEADER_FILL: (u8, u8, u8) = (241, 245, 249);
const ZEBRA_FILL: (u8, u8, u8) = (248, 250, 252);
/// Resolution the captured bitmaps are treated as when placed on the page.
const CAPTURE_DPI: f64 = 300.0;

/// The two document-generation strategies. Vector keeps the table as
/// selectable structured text; raster embeds a bitmap capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    VectorTable,
    Raster,
}

/// Tabular content in serializable form: a header row plus body rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_student_rows(rows: &[StudentScheduleRow]) -> TableView {
        TableView {
            headers: [
                "Student ID",
                "Student Name",
                "Specialty",
                "Module Name",
                "Exam Day",
                "Time",
                "Classroom",
                "Instructor",
            ]
            .map(String::from)
            .to_vec(),
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.student_id.clone(),
                        r.student_name.clone(),
                        r.specialty.clone(),
                        r.module_name.clone(),
                        r.exam_day.clone(),
                        r.time.clone(),
                        r.classroom.clone(),
                        r.instructor.clone(),
                    ]
                })
                .collect(),
        }
    }

    pub fn from_timetable_rows(rows: &[TimetableExportRow]) -> TableView {
        TableView {
            headers: ["Course", "Day", "Time", "Room", "Instructor", "Specialties"]
                .map(String::from)
                .to_vec(),
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.course.clone(),
                        r.day.clone(),
                        r.time.clone(),
                        r.room.clone(),
                        r.instructor.clone(),
                        r.specialties.clone(),
                    ]
                })
                .collect(),
        }
    }
}

/// Explicit capture of a view handed to the document exporter, decoupled
/// from any rendering surface. A view may carry tabular content, a bitmap,
/// or both; each mode requires its half and fails cleanly without it.
pub struct ViewSnapshot {
    pub title: String,
    pub table: Option<TableView>,
    pub bitmap: Option<RgbImage>,
}

impl ViewSnapshot {
    pub fn of_table(title: impl Into<String>, table: TableView) -> Self {
        ViewSnapshot {
            title: title.into(),
            table: Some(table),
            bitmap: None,
        }
    }

    pub fn of_bitmap(title: impl Into<String>, bitmap: RgbImage) -> Self {
        ViewSnapshot {
            title: title.into(),
            table: None,
            bitmap: Some(bitmap),
        }
    }
}

/// Renders a view snapshot to a paginated PDF at `path`. The two modes are
/// mutually exclusive; a vector-table export of a snapshot without tabular
/// content produces a `NoTable` error and no file.
pub fn export_document(
    snapshot: &ViewSnapshot,
    path: &Path,
    mode: ExportMode,
) -> Result<(), ExportError> {
    match mode {
        ExportMode::VectorTable => {
            let table = snapshot.table.as_ref().ok_or(ExportError::NoTable)?;
            render_table_pdf(&snapshot.title, table, path)
        }
        ExportMode::Raster => {
            let bitmap = snapshot.bitmap.as_ref().ok_or(ExportError::NoBitmap)?;
            render_raster_pdf(&snapshot.title, bitmap, path)
        }
    }
}

/// Body rows that fit on one page below a header row.
pub fn body_rows_per_page() -> usize {
    ((PAGE_HEIGHT - 2.0 * PAGE_MARGIN - ROW_HEIGHT) / ROW_HEIGHT) as usize
}

/// Pages a table of `row_count` body rows will occupy; the header row
/// repeats on every page.
pub fn pages_needed(row_count: usize) -> usize {
    let per_page = body_rows_per_page();
    if row_count == 0 {
        1
    } else {
        row_count.div_ceil(per_page)
    }
}

/// Height (mm) of a bitmap scaled uniformly to the full page width.
pub fn fit_height_to_page_width(width_px: u32, height_px: u32) -> f64 {
    PAGE_WIDTH * height_px as f64 / width_px.max(1) as f64
}

fn pdf_error(err: printpdf::Error) -> ExportError {
    ExportError::Pdf(err.to_string())
}

fn render_table_pdf(title: &str, table: &TableView, path: &Path) -> Result<(), ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "table");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let columns = table.headers.len().max(1);
    let column_width = (PAGE_WIDTH - 2.0 * PAGE_MARGIN) / columns as f64;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT - PAGE_MARGIN;
    draw_row(&layer, &bold, &table.headers, y, column_width, Some(HEADER_FILL));
    y -= ROW_HEIGHT;

    for (index, row) in table.rows.iter().enumerate() {
        if y - ROW_HEIGHT < PAGE_MARGIN {
            let (page, layer_index) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "table");
            layer = doc.get_page(page).get_layer(layer_index);
            y = PAGE_HEIGHT - PAGE_MARGIN;
            draw_row(&layer, &bold, &table.headers, y, column_width, Some(HEADER_FILL));
            y -= ROW_HEIGHT;
        }
        // White body with zebra fill on every other row.
        let fill = if index % 2 == 1 { Some(ZEBRA_FILL) } else { None };
        draw_row(&layer, &regular, row, y, column_width, fill);
        y -= ROW_HEIGHT;
    }

    doc.save(&mut BufWriter::new(File::create(path)?))
        .map_err(pdf_error)
}

fn draw_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    cells: &[String],
    top: f64,
    column_width: f64,
    fill: Option<(u8, u8, u8)>,
) {
    let bottom = top - ROW_HEIGHT;
    for (index, cell) in cells.iter().enumerate() {
        let x = PAGE_MARGIN + index as f64 * column_width;
        if let Some((r, g, b)) = fill {
            layer.set_fill_color(rgb(r, g, b));
            layer.add_shape(rect(x, bottom, column_width, ROW_HEIGHT, true, false));
        }
        layer.set_outline_color(rgb(0, 0, 0));
        // 0.1mm grid lines, expressed in points.
        layer.set_outline_thickness(0.28);
        layer.add_shape(rect(x, bottom, column_width, ROW_HEIGHT, false, true));
        layer.set_fill_color(rgb(0, 0, 0));
        layer.use_text(
            clip_cell(cell, column_width),
            FONT_SIZE,
            Mm(x + CELL_PADDING),
            Mm(bottom + CELL_PADDING),
            font,
        );
    }
}

/// Clips cell text to roughly what fits in the column at 10pt Helvetica.
fn clip_cell(cell: &str, column_width: f64) -> String {
    let budget = (((column_width - 2.0 * CELL_PADDING) / 1.8) as usize).max(4);
    if cell.chars().count() <= budget {
        cell.to_string()
    } else {
        let kept: String = cell.chars().take(budget - 3).collect();
        format!("{}...", kept)
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f64 / 255.0,
        g as f64 / 255.0,
        b as f64 / 255.0,
        None,
    ))
}

fn rect(x: f64, y: f64, width: f64, height: f64, has_fill: bool, has_stroke: bool) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y + height)), false),
            (Point::new(Mm(x), Mm(y + height)), false),
        ],
        is_closed: true,
        has_fill,
        has_stroke,
        is_clipping_path: false,
    }
}

fn render_raster_pdf(title: &str, bitmap: &RgbImage, path: &Path) -> Result<(), ExportError> {
    let (doc, page, layer_index) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "capture");
    let layer = doc.get_page(page).get_layer(layer_index);

    let dynamic = image::DynamicImage::ImageRgb8(bitmap.clone());
    let pdf_image = PdfImage::from_dynamic_image(&dynamic);

    // Uniform scale to the full page width; height follows the aspect ratio.
    let native_width = bitmap.width() as f64 * 25.4 / CAPTURE_DPI;
    let scale = PAGE_WIDTH / native_width;
    let scaled_height = fit_height_to_page_width(bitmap.width(), bitmap.height());

    pdf_image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(PAGE_HEIGHT - scaled_height)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(CAPTURE_DPI),
            ..Default::default()
        },
    );

    doc.save(&mut BufWriter::new(File::create(path)?))
        .map_err(pdf_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_table() -> TableView {
        TableView {
            headers: vec!["Student ID".into(), "Module Name".into()],
            rows: vec![
                vec!["S1".into(), "Algebra".into()],
                vec!["S2".into(), "Physics".into()],
            ],
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("exam_timetabler_{}_{}", std::process::id(), name))
    }

    #[test]
    fn vector_mode_without_table_reports_no_table_and_writes_nothing() {
        let snapshot = ViewSnapshot::of_bitmap("chart", RgbImage::new(4, 4));
        let path = temp_path("no_table.pdf");
        let outcome = export_document(&snapshot, &path, ExportMode::VectorTable);
        assert!(matches!(outcome, Err(ExportError::NoTable)));
        assert!(!path.exists());
    }

    #[test]
    fn raster_mode_without_bitmap_reports_no_bitmap() {
        let snapshot = ViewSnapshot::of_table("schedule", tiny_table());
        let path = temp_path("no_bitmap.pdf");
        let outcome = export_document(&snapshot, &path, ExportMode::Raster);
        assert!(matches!(outcome, Err(ExportError::NoBitmap)));
        assert!(!path.exists());
    }

    #[test]
    fn vector_mode_writes_a_document() {
        let snapshot = ViewSnapshot::of_table("schedule", tiny_table());
        let path = temp_path("table.pdf");
        export_document(&snapshot, &path, ExportMode::VectorTable).unwrap();
        let written = std::fs::metadata(&path).unwrap();
        assert!(written.len() > 0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn raster_mode_writes_a_document() {
        let bitmap = RgbImage::from_pixel(160, 80, image::Rgb([255, 255, 255]));
        let snapshot = ViewSnapshot::of_bitmap("chart", bitmap);
        let path = temp_path("capture.pdf");
        export_document(&snapshot, &path, ExportMode::Raster).unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn pagination_repeats_the_header_each_page() {
        let per_page = body_rows_per_page();
        assert_eq!(per_page, 35);
        assert_eq!(pages_needed(0), 1);
        assert_eq!(pages_needed(per_page), 1);
        assert_eq!(pages_needed(per_page + 1), 2);
        assert_eq!(pages_needed(3 * per_page), 3);
    }

    #[test]
    fn raster_embed_preserves_aspect_ratio() {
        // A 2:1 capture scaled to 210mm page width stands 105mm tall.
        assert_eq!(fit_height_to_page_width(1600, 800), 105.0);
        assert_eq!(fit_height_to_page_width(800, 800), 210.0);
    }

    #[test]
    fn table_views_assemble_from_row_shapes() {
        let table = TableView::from_timetable_rows(&[TimetableExportRow {
            course: "Algebra".into(),
            day: "Sunday".into(),
            time: "08:00".into(),
            room: "Hall A".into(),
            instructor: "Dr. Benali".into(),
            specialties: "SE, AI".into(),
        }]);
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.rows[0][5], "SE, AI");
    }
}
