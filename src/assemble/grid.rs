use serde::Serialize;

use crate::gateway::OptimizationResult;
use crate::records::RecordStore;

/// Fixed day columns of the timetable grid, in display order.
pub const DAYS: [&str; 5] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday"];

/// One assignment joined into display form for the timetable views. Join
/// misses resolve to empty strings here; the grid simply shows less text.
#[derive(Debug, Clone)]
pub struct TimetableEntry {
    pub course: String,
    pub day: String,
    pub time: String,
    pub room: String,
    pub instructor: String,
    /// Distinct specialties of the students enrolled in this course, in
    /// first-appearance order. May contain the empty string.
    pub specialties: Vec<String>,
}

/// Flat row shape used for the specialty-timetable CSV export.
#[derive(Debug, Clone, Serialize)]
pub struct TimetableExportRow {
    pub course: String,
    pub day: String,
    pub time: String,
    pub room: String,
    pub instructor: String,
    pub specialties: String,
}

impl TimetableEntry {
    pub fn to_export_row(&self) -> TimetableExportRow {
        TimetableExportRow {
            course: self.course.clone(),
            day: self.day.clone(),
            time: self.time.clone(),
            room: self.room.clone(),
            instructor: self.instructor.clone(),
            specialties: self.specialties.join(", "),
        }
    }
}

/// Selects which timetable slice to build or export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialtyFilter {
    All,
    Only(String),
}

impl SpecialtyFilter {
    pub fn matches(&self, entry: &TimetableEntry) -> bool {
        match self {
            SpecialtyFilter::All => true,
            SpecialtyFilter::Only(specialty) => entry.specialties.contains(specialty),
        }
    }

    /// Filename component: "all" or the specialty itself.
    pub fn slug(&self) -> &str {
        match self {
            SpecialtyFilter::All => "all",
            SpecialtyFilter::Only(specialty) => specialty,
        }
    }
}

/// Joins every assignment of a result against the store. Each assignment
/// triggers a full scan of the student set for its specialties, which is
/// quadratic but fine at uploaded-file scale.
pub fn timetable_entries(result: &OptimizationResult, store: &RecordStore) -> Vec<TimetableEntry> {
    result
        .solution
        .iter()
        .map(|entry| {
            let course = store.courses.iter().find(|c| c.id == entry.course);
            let timeslot = store.timeslots.iter().find(|t| t.id == entry.timeslot);
            let room = store.rooms.iter().find(|r| r.id == entry.room);
            let instructor = store
                .instructors
                .iter()
                .find(|i| i.id == entry.instructor_id);

            let mut specialties: Vec<String> = Vec::new();
            for student in store.students.iter().filter(|s| s.course_id == entry.course) {
                if !specialties.contains(&student.specialty) {
                    specialties.push(student.specialty.clone());
                }
            }

            TimetableEntry {
                course: course.map(|c| c.name.clone()).unwrap_or_default(),
                day: timeslot.map(|t| t.day.clone()).unwrap_or_default(),
                time: timeslot.map(|t| t.time.clone()).unwrap_or_default(),
                room: room.map(|r| r.name.clone()).unwrap_or_default(),
                instructor: instructor.map(|i| i.name.clone()).unwrap_or_default(),
                specialties,
            }
        })
        .collect()
}

/// Distinct non-empty specialties across the student set, in
/// first-appearance order. Drives the per-specialty timetable list.
pub fn all_specialties(store: &RecordStore) -> Vec<String> {
    let mut specialties = Vec::new();
    for student in &store.students {
        if !student.specialty.is_empty() && !specialties.contains(&student.specialty) {
            specialties.push(student.specialty.clone());
        }
    }
    specialties
}

/// Day/time grid over one timetable slice. Rows are the distinct time
/// strings observed in the filtered entries (sorted ascending as strings),
/// columns the fixed day list. Cells are lists: parallel sections in the
/// same day/time cell all render.
#[derive(Debug, Clone)]
pub struct SpecialtyGrid {
    pub filter: SpecialtyFilter,
    pub times: Vec<String>,
    cells: Vec<Vec<Vec<TimetableEntry>>>,
}

impl SpecialtyGrid {
    pub fn cell(&self, time_index: usize, day_index: usize) -> &[TimetableEntry] {
        &self.cells[time_index][day_index]
    }

    /// Flat export rows for this slice, in solution order.
    pub fn export_rows(entries: &[TimetableEntry], filter: &SpecialtyFilter) -> Vec<TimetableExportRow> {
        entries
            .iter()
            .filter(|e| filter.matches(e))
            .map(TimetableEntry::to_export_row)
            .collect()
    }
}

pub fn build_grid(entries: &[TimetableEntry], filter: SpecialtyFilter) -> SpecialtyGrid {
    let filtered: Vec<&TimetableEntry> = entries.iter().filter(|e| filter.matches(e)).collect();

    let mut times: Vec<String> = Vec::new();
    for entry in &filtered {
        if !times.contains(&entry.time) {
            times.push(entry.time.clone());
        }
    }
    times.sort();

    let cells = times
        .iter()
        .map(|time| {
            DAYS.iter()
                .map(|day| {
                    filtered
                        .iter()
                        .filter(|e| e.day == *day && e.time == *time)
                        .map(|e| (*e).clone())
                        .collect()
                })
                .collect()
        })
        .collect();

    SpecialtyGrid {
        filter,
        times,
        cells,
    }
}
