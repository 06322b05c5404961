//! Courses and their authoritative relationship sets.
//!
//! The roster, instructor link, assignment list, and application queue on a
//! [`Course`] are the authoritative side of every person↔course
//! relationship; the per-person course sets are derived from them.

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::id::{AssignmentId, CourseId, UserId};

/// Default grade ceiling for a new course.
pub const DEFAULT_GRADE_CEILING: f64 = 100.0;

/// The date window a course runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A course record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identity, immutable once assigned.
    pub id: CourseId,
    pub title: String,
    pub description: String,
    /// Maximum roster size.
    pub capacity: u32,
    pub schedule: ScheduleWindow,
    /// Upper bound for course grade values.
    pub grade_ceiling: f64,
    /// At most one instructor. Weak reference by id.
    pub instructor: Option<UserId>,
    /// Enrolled students, in approval order. Authoritative.
    pub roster: IndexSet<UserId>,
    /// Assignments owned by this course, in creation order.
    pub assignments: Vec<AssignmentId>,
    /// Pending instructor applications, in arrival order. Cleared when an
    /// instructor is assigned.
    pub applications: Vec<UserId>,
}

impl Course {
    /// Creates an empty course with the default grade ceiling.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        capacity: u32,
        schedule: ScheduleWindow,
    ) -> Self {
        Course {
            id,
            title: title.into(),
            description: description.into(),
            capacity,
            schedule,
            grade_ceiling: DEFAULT_GRADE_CEILING,
            instructor: None,
            roster: IndexSet::new(),
            assignments: Vec::new(),
            applications: Vec::new(),
        }
    }

    /// Returns `true` if the roster has no seat left.
    pub fn is_full(&self) -> bool {
        self.roster.len() as u32 >= self.capacity
    }

    /// Remaining seats on the roster.
    pub fn seats_left(&self) -> u32 {
        self.capacity.saturating_sub(self.roster.len() as u32)
    }
}

/// A permitted course field change.
///
/// Closed set; the id and relationship sets cannot be patched directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CourseUpdate {
    Title(String),
    Description(String),
    Capacity(u32),
    Schedule(ScheduleWindow),
    GradeCeiling(f64),
}
