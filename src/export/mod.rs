pub mod csv_out;
pub mod document;

pub use csv_out::{
    rows_to_csv, specialty_timetable_filename, student_schedule_filename, write_rows_csv,
};
pub use document::{export_document, ExportMode, TableView, ViewSnapshot};
