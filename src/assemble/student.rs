use serde::Serialize;

use crate::gateway::OptimizationResult;
use crate::records::RecordStore;

/// One assembled row of the per-student schedule view. Field names double as
/// the CSV export header.
#[derive(Debug, Clone, Serialize)]
pub struct StudentScheduleRow {
    pub student_id: String,
    pub student_name: String,
    pub specialty: String,
    pub module_name: String,
    pub exam_day: String,
    pub time: String,
    pub classroom: String,
    pub instructor: String,
}

/// Joins a solver result against the record store, one row per student whose
/// course has an assignment. Students without a matching assignment are
/// silently omitted; dangling ids degrade to per-field placeholders so the
/// view always renders.
pub fn student_schedule(result: &OptimizationResult, store: &RecordStore) -> Vec<StudentScheduleRow> {
    let mut rows = Vec::new();

    for student in &store.students {
        // First match in solution order wins; any further assignments for
        // the same course id (parallel sections) are ignored.
        let assignment = match result
            .solution
            .iter()
            .find(|a| a.course == student.course_id)
        {
            Some(assignment) => assignment,
            None => continue,
        };

        let course = store.courses.iter().find(|c| c.id == student.course_id);
        let timeslot = store.timeslots.iter().find(|t| t.id == assignment.timeslot);
        let room = store.rooms.iter().find(|r| r.id == assignment.room);
        let instructor = store
            .instructors
            .iter()
            .find(|i| i.id == assignment.instructor_id);

        rows.push(StudentScheduleRow {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            specialty: if student.specialty.is_empty() {
                "N/A".to_string()
            } else {
                student.specialty.clone()
            },
            module_name: course
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            exam_day: timeslot.map(|t| t.day.clone()).unwrap_or_default(),
            time: timeslot.map(|t| t.time.clone()).unwrap_or_default(),
            classroom: room.map(|r| r.name.clone()).unwrap_or_default(),
            instructor: instructor
                .map(|i| i.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{Assignment, CostPoint};
    use crate::importer::parse_delimited;
    use crate::records::RecordSlot;

    fn store() -> RecordStore {
        let mut store = RecordStore::default();
        store.load(
            RecordSlot::Courses,
            &parse_delimited("id,name,instructor_id\nC1,Algebra,I1\nC2,Physics,I2\n"),
        );
        store.load(
            RecordSlot::Timeslots,
            &parse_delimited("id,day,time\nT1,Sunday,08:00\nT2,Monday,10:00\n"),
        );
        store.load(
            RecordSlot::Rooms,
            &parse_delimited("id,name,capacity\nR1,Hall A,40\nR2,Hall B,30\n"),
        );
        store.load(
            RecordSlot::Instructors,
            &parse_delimited("id,name\nI1,Dr. Benali\nI2,Dr. Cherif\n"),
        );
        store.load(
            RecordSlot::Students,
            &parse_delimited(
                "id,name,course_id,specialty\nS1,Amel,C1,SE\nS2,Karim,C2,AI\nS3,Lina,C9,SE\nS4,Yanis,C1\n",
            ),
        );
        store
    }

    fn assignment(course: &str, timeslot: &str, room: &str, instructor: &str) -> Assignment {
        Assignment {
            course: course.into(),
            timeslot: timeslot.into(),
            room: room.into(),
            instructor_id: instructor.into(),
        }
    }

    fn result(solution: Vec<Assignment>) -> OptimizationResult {
        OptimizationResult {
            solution,
            cost: 0.0,
            history: vec![CostPoint { cost: 0.0 }],
        }
    }

    #[test]
    fn joins_every_field_through_the_store() {
        let result = result(vec![
            assignment("C1", "T1", "R1", "I1"),
            assignment("C2", "T2", "R2", "I2"),
        ]);
        let rows = student_schedule(&result, &store());
        assert_eq!(rows.len(), 3); // S3 has no matching assignment
        assert_eq!(rows[0].module_name, "Algebra");
        assert_eq!(rows[0].exam_day, "Sunday");
        assert_eq!(rows[0].time, "08:00");
        assert_eq!(rows[0].classroom, "Hall A");
        assert_eq!(rows[0].instructor, "Dr. Benali");
        assert_eq!(rows[1].module_name, "Physics");
    }

    #[test]
    fn row_count_never_exceeds_student_count() {
        let store = store();
        let result = result(vec![
            assignment("C1", "T1", "R1", "I1"),
            assignment("C2", "T2", "R2", "I2"),
            assignment("C9", "T1", "R1", "I1"),
        ]);
        let rows = student_schedule(&result, &store);
        // Every student's course_id now matches an assignment: equality.
        assert_eq!(rows.len(), store.students.len());
    }

    #[test]
    fn dangling_ids_degrade_to_placeholders() {
        let result = result(vec![assignment("C1", "T9", "R9", "I9")]);
        let rows = student_schedule(&result, &store());
        let row = &rows[0];
        assert_eq!(row.module_name, "Algebra");
        assert_eq!(row.exam_day, "");
        assert_eq!(row.time, "");
        assert_eq!(row.classroom, "");
        assert_eq!(row.instructor, "Unknown");
    }

    #[test]
    fn unknown_course_id_yields_unknown_module() {
        // S3's course C9 exists in the solution but not in the course set.
        let result = result(vec![assignment("C9", "T1", "R1", "I1")]);
        let rows = student_schedule(&result, &store());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student_id, "S3");
        assert_eq!(rows[0].module_name, "Unknown");
    }

    #[test]
    fn empty_specialty_renders_as_placeholder() {
        // S4 was imported from a short row with no specialty column.
        let result = result(vec![assignment("C1", "T1", "R1", "I1")]);
        let rows = student_schedule(&result, &store());
        let yanis = rows.iter().find(|r| r.student_id == "S4").unwrap();
        assert_eq!(yanis.specialty, "N/A");
    }

    #[test]
    fn first_assignment_in_solution_order_wins() {
        let result = result(vec![
            assignment("C1", "T1", "R1", "I1"),
            assignment("C1", "T2", "R2", "I2"),
        ]);
        let rows = student_schedule(&result, &store());
        let amel = rows.iter().find(|r| r.student_id == "S1").unwrap();
        assert_eq!(amel.exam_day, "Sunday");
        assert_eq!(amel.classroom, "Hall A");
    }
}
