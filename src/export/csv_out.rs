use chrono::Utc;
use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;

use crate::assemble::SpecialtyFilter;
use crate::error::ExportError;
use crate::gateway::Variant;

/// Serializes a row sequence to delimited text. The header row comes from
/// the row struct's field names, so exported files re-import cleanly.
pub fn rows_to_csv<S: Serialize>(rows: &[S]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Encode(e.to_string()))
}

pub fn write_rows_csv<S: Serialize>(rows: &[S], path: &Path) -> Result<(), ExportError> {
    let csv = rows_to_csv(rows)?;
    std::fs::write(path, csv)?;
    Ok(())
}

/// `student_schedule_{method}_{millis}.csv`
pub fn student_schedule_filename(variant: Variant) -> String {
    student_schedule_filename_at(variant, Utc::now().timestamp_millis())
}

pub fn student_schedule_filename_at(variant: Variant, millis: i64) -> String {
    format!("student_schedule_{}_{}.csv", variant.slug(), millis)
}

/// `specialty_timetable_{specialty}_{method}_{millis}.csv`
pub fn specialty_timetable_filename(filter: &SpecialtyFilter, variant: Variant) -> String {
    specialty_timetable_filename_at(filter, variant, Utc::now().timestamp_millis())
}

pub fn specialty_timetable_filename_at(
    filter: &SpecialtyFilter,
    variant: Variant,
    millis: i64,
) -> String {
    format!(
        "specialty_timetable_{}_{}_{}.csv",
        filter.slug(),
        variant.slug(),
        millis
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::student::StudentScheduleRow;
    use crate::importer::parse_delimited;

    fn rows() -> Vec<StudentScheduleRow> {
        vec![
            StudentScheduleRow {
                student_id: "S1".into(),
                student_name: "Amel".into(),
                specialty: "SE".into(),
                module_name: "Algebra".into(),
                exam_day: "Sunday".into(),
                time: "08:00".into(),
                classroom: "Hall A".into(),
                instructor: "Dr. Benali".into(),
            },
            StudentScheduleRow {
                student_id: "S2".into(),
                student_name: "Karim".into(),
                specialty: "N/A".into(),
                module_name: "Unknown".into(),
                exam_day: "".into(),
                time: "".into(),
                classroom: "".into(),
                instructor: "Unknown".into(),
            },
        ]
    }

    #[test]
    fn export_then_reimport_round_trips() {
        let csv = rows_to_csv(&rows()).unwrap();
        let records = parse_delimited(&csv);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["student_id"], "S1");
        assert_eq!(records[0]["module_name"], "Algebra");
        assert_eq!(records[1]["specialty"], "N/A");
        assert_eq!(records[1]["exam_day"], "");
        assert_eq!(records[1]["instructor"], "Unknown");
    }

    #[test]
    fn filenames_carry_method_and_timestamp() {
        assert_eq!(
            student_schedule_filename_at(Variant::Traditional, 1700000000000),
            "student_schedule_traditional_1700000000000.csv"
        );
        assert_eq!(
            specialty_timetable_filename_at(&SpecialtyFilter::All, Variant::Hybrid, 7),
            "specialty_timetable_all_hybrid_7.csv"
        );
        assert_eq!(
            specialty_timetable_filename_at(
                &SpecialtyFilter::Only("SE".into()),
                Variant::Traditional,
                7
            ),
            "specialty_timetable_SE_traditional_7.csv"
        );
    }

    #[test]
    fn empty_row_sequence_yields_empty_text() {
        let csv = rows_to_csv::<StudentScheduleRow>(&[]).unwrap();
        assert!(csv.is_empty());
    }
}
