//! Course-level grade records.
//!
//! Grades are an append-only log: one record per grading event for a
//! (student, course) pair, bounded by the course's grade ceiling.

use serde::{Deserialize, Serialize};

use crate::id::{CourseId, GradeId, UserId};

/// A recorded course grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Unique identity, immutable once assigned.
    pub id: GradeId,
    pub student: UserId,
    pub course: CourseId,
    pub value: f64,
}

impl Grade {
    pub fn new(id: GradeId, student: UserId, course: CourseId, value: f64) -> Self {
        Grade {
            id,
            student,
            course,
            value,
        }
    }
}
