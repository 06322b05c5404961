//! Flat keyed records: the serialized form of each entity.
//!
//! A record holds primitive values and identifier strings only, never a
//! nested entity, so the serialized store graph has no cycles. Derived
//! back-references (a student's enrolled set, an instructor's assigned set)
//! are not serialized at all; the linker rebuilds them from the
//! authoritative course records on load.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use campus_core::assignment::{Assignment, Submission};
use campus_core::course::{Course, ScheduleWindow};
use campus_core::enrollment::{Enrollment, EnrollmentStatus, PaymentStatus};
use campus_core::grade::Grade;
use campus_core::id::{AssignmentId, CourseId, EnrollmentId, GradeId, UserId};
use campus_core::person::{Person, PersonKind};

/// Serialized person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: String,
    pub kind: PersonKind,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl PersonRecord {
    pub fn from_person(person: &Person) -> Self {
        PersonRecord {
            id: person.id.0.clone(),
            kind: person.kind(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            email: person.email.clone(),
            phone: person.phone.clone(),
            password: person.password.clone(),
        }
    }

    /// Rebuilds the person with empty role data; the linker fills the
    /// derived course sets afterwards.
    pub fn into_person(self) -> Person {
        Person::new(
            UserId(self.id),
            self.kind,
            self.first_name,
            self.last_name,
            self.email,
            self.phone,
            self.password,
        )
    }
}

/// Serialized course. Relationship fields carry identifier strings only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub capacity: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub grade_ceiling: f64,
    pub instructor: Option<String>,
    pub roster: Vec<String>,
    pub assignments: Vec<String>,
    pub applications: Vec<String>,
}

impl CourseRecord {
    pub fn from_course(course: &Course) -> Self {
        CourseRecord {
            id: course.id.0.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            capacity: course.capacity,
            start_date: course.schedule.start,
            end_date: course.schedule.end,
            grade_ceiling: course.grade_ceiling,
            instructor: course.instructor.as_ref().map(|id| id.0.clone()),
            roster: course.roster.iter().map(|id| id.0.clone()).collect(),
            assignments: course.assignments.iter().map(|id| id.0.clone()).collect(),
            applications: course.applications.iter().map(|id| id.0.clone()).collect(),
        }
    }

    /// Rebuilds the course with empty relationship sets; the linker
    /// re-resolves roster, instructor, assignments, and applications.
    pub fn into_course(self) -> Course {
        let mut course = Course::new(
            CourseId(self.id),
            self.title,
            self.description,
            self.capacity,
            ScheduleWindow {
                start: self.start_date,
                end: self.end_date,
            },
        );
        course.grade_ceiling = self.grade_ceiling;
        course
    }
}

/// Serialized enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub id: String,
    pub student: String,
    pub course: String,
    pub payment: PaymentStatus,
    pub status: EnrollmentStatus,
}

impl EnrollmentRecord {
    pub fn from_enrollment(enrollment: &Enrollment) -> Self {
        EnrollmentRecord {
            id: enrollment.id.0.clone(),
            student: enrollment.student.0.clone(),
            course: enrollment.course.0.clone(),
            payment: enrollment.payment,
            status: enrollment.status,
        }
    }

    pub fn into_enrollment(self) -> Enrollment {
        let mut enrollment = Enrollment::new(
            EnrollmentId(self.id),
            UserId(self.student),
            CourseId(self.course),
        );
        enrollment.payment = self.payment;
        enrollment.status = self.status;
        enrollment
    }
}

/// Serialized assignment. Submission and score maps are keyed by student id
/// string, exactly as held in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub id: String,
    pub course: String,
    pub title: String,
    pub description: String,
    pub due: DateTime<Utc>,
    pub max_score: f64,
    pub submissions: IndexMap<String, Submission>,
    pub scores: IndexMap<String, f64>,
}

impl AssignmentRecord {
    pub fn from_assignment(assignment: &Assignment) -> Self {
        AssignmentRecord {
            id: assignment.id.0.clone(),
            course: assignment.course.0.clone(),
            title: assignment.title.clone(),
            description: assignment.description.clone(),
            due: assignment.due,
            max_score: assignment.max_score,
            submissions: assignment
                .submissions
                .iter()
                .map(|(id, s)| (id.0.clone(), s.clone()))
                .collect(),
            scores: assignment
                .scores
                .iter()
                .map(|(id, score)| (id.0.clone(), *score))
                .collect(),
        }
    }

    /// Rebuilds the assignment with empty maps; the linker refills them
    /// entry by entry so a dangling key drops only that entry.
    pub fn into_assignment(self) -> Assignment {
        Assignment::new(
            AssignmentId(self.id),
            CourseId(self.course),
            self.title,
            self.description,
            self.due,
            self.max_score,
        )
    }
}

/// Serialized grade record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub id: String,
    pub student: String,
    pub course: String,
    pub value: f64,
}

impl GradeRecord {
    pub fn from_grade(grade: &Grade) -> Self {
        GradeRecord {
            id: grade.id.0.clone(),
            student: grade.student.0.clone(),
            course: grade.course.0.clone(),
            value: grade.value,
        }
    }

    pub fn into_grade(self) -> Grade {
        Grade::new(
            GradeId(self.id),
            UserId(self.student),
            CourseId(self.course),
            self.value,
        )
    }
}

/// The full serialized store graph: one record collection per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<PersonRecord>,
    pub courses: Vec<CourseRecord>,
    pub enrollments: Vec<EnrollmentRecord>,
    pub assignments: Vec<AssignmentRecord>,
    pub grades: Vec<GradeRecord>,
}
