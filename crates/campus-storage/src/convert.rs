//! Decomposes a live campus into its flat snapshot form.
//!
//! The inverse lives in [`crate::link::recompose`], which also performs
//! reference resolution.

use campus_core::Campus;

use crate::record::{
    AssignmentRecord, CourseRecord, EnrollmentRecord, GradeRecord, PersonRecord, Snapshot,
};

/// Flattens every store into identifier-only records, in store order.
pub fn decompose(campus: &Campus) -> Snapshot {
    Snapshot {
        users: campus
            .users()
            .iter()
            .map(|(_, person)| PersonRecord::from_person(person))
            .collect(),
        courses: campus
            .courses()
            .iter()
            .map(|(_, course)| CourseRecord::from_course(course))
            .collect(),
        enrollments: campus
            .enrollments()
            .iter()
            .map(|(_, enrollment)| EnrollmentRecord::from_enrollment(enrollment))
            .collect(),
        assignments: campus
            .assignments()
            .iter()
            .map(|(_, assignment)| AssignmentRecord::from_assignment(assignment))
            .collect(),
        grades: campus
            .grades()
            .iter()
            .map(|(_, grade)| GradeRecord::from_grade(grade))
            .collect(),
    }
}
