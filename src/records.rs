use serde::{Deserialize, Serialize};

use crate::importer::RawRecord;

/// One course (module) offering. `instructor_id` is a foreign key into the
/// instructor set; nothing enforces that it resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub instructor_id: String,
}

/// One examinable timeslot. Days in this domain run Sunday through Thursday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeslot {
    pub id: String,
    pub day: String,
    pub time: String,
}

/// A classroom. Capacity is kept as uploaded text; the importer does no
/// numeric coercion and the solver is the only consumer that cares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub capacity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    pub id: String,
    pub name: String,
}

/// One student enrollment. `specialty` may legitimately be empty; views
/// render it as "N/A" but the record keeps the raw value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub course_id: String,
    pub specialty: String,
}

fn field(raw: &RawRecord, key: &str) -> String {
    raw.get(key).cloned().unwrap_or_default()
}

impl Course {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Course {
            id: field(raw, "id"),
            name: field(raw, "name"),
            instructor_id: field(raw, "instructor_id"),
        }
    }
}

impl Timeslot {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Timeslot {
            id: field(raw, "id"),
            day: field(raw, "day"),
            time: field(raw, "time"),
        }
    }
}

impl Room {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Room {
            id: field(raw, "id"),
            name: field(raw, "name"),
            capacity: field(raw, "capacity"),
        }
    }
}

impl Instructor {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Instructor {
            id: field(raw, "id"),
            name: field(raw, "name"),
        }
    }
}

impl Student {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Student {
            id: field(raw, "id"),
            name: field(raw, "name"),
            course_id: field(raw, "course_id"),
            specialty: field(raw, "specialty"),
        }
    }
}

/// Names one of the five record-set slots. Callers address slots by string
/// identifier (file pickers, CLI args); `from_name` is the single place that
/// mapping lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSlot {
    Courses,
    Timeslots,
    Rooms,
    Instructors,
    Students,
}

impl RecordSlot {
    pub const ALL: [RecordSlot; 5] = [
        RecordSlot::Courses,
        RecordSlot::Timeslots,
        RecordSlot::Rooms,
        RecordSlot::Instructors,
        RecordSlot::Students,
    ];

    pub fn from_name(name: &str) -> Option<RecordSlot> {
        match name.to_lowercase().as_str() {
            "courses" | "modules" => Some(RecordSlot::Courses),
            "timeslots" => Some(RecordSlot::Timeslots),
            "rooms" | "classrooms" => Some(RecordSlot::Rooms),
            "instructors" => Some(RecordSlot::Instructors),
            "students" => Some(RecordSlot::Students),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecordSlot::Courses => "courses",
            RecordSlot::Timeslots => "timeslots",
            RecordSlot::Rooms => "rooms",
            RecordSlot::Instructors => "instructors",
            RecordSlot::Students => "students",
        }
    }
}

/// In-memory store for the five uploaded record sets. A load replaces the
/// slot wholesale; nothing merges and duplicate ids are kept as-is (joins
/// decide which copy wins). State lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    pub courses: Vec<Course>,
    pub timeslots: Vec<Timeslot>,
    pub rooms: Vec<Room>,
    pub instructors: Vec<Instructor>,
    pub students: Vec<Student>,
}

impl RecordStore {
    /// Replaces one slot with freshly imported raw records.
    pub fn load(&mut self, slot: RecordSlot, raw: &[RawRecord]) {
        match slot {
            RecordSlot::Courses => {
                self.courses = raw.iter().map(Course::from_raw).collect();
            }
            RecordSlot::Timeslots => {
                self.timeslots = raw.iter().map(Timeslot::from_raw).collect();
            }
            RecordSlot::Rooms => {
                self.rooms = raw.iter().map(Room::from_raw).collect();
            }
            RecordSlot::Instructors => {
                self.instructors = raw.iter().map(Instructor::from_raw).collect();
            }
            RecordSlot::Students => {
                self.students = raw.iter().map(Student::from_raw).collect();
            }
        }
    }

    pub fn count(&self, slot: RecordSlot) -> usize {
        match slot {
            RecordSlot::Courses => self.courses.len(),
            RecordSlot::Timeslots => self.timeslots.len(),
            RecordSlot::Rooms => self.rooms.len(),
            RecordSlot::Instructors => self.instructors.len(),
            RecordSlot::Students => self.students.len(),
        }
    }

    /// The run precondition: courses, timeslots and rooms must be loaded.
    /// Instructors and students only affect joins, so empty sets there are
    /// allowed and degrade to placeholders later.
    pub fn ready_for_run(&self) -> bool {
        !self.courses.is_empty() && !self.timeslots.is_empty() && !self.rooms.is_empty()
    }
}
