pub mod grid;
pub mod student;

pub use grid::{all_specialties, build_grid, timetable_entries, SpecialtyFilter, SpecialtyGrid, TimetableEntry};
pub use student::{student_schedule, StudentScheduleRow};
