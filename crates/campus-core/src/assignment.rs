//! Assignments, submissions, and per-submission scores.
//!
//! Submission and score maps are keyed by student id string, never by a live
//! person, so they survive serialization and reload unchanged.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::id::{AssignmentId, CourseId, UserId};

/// One student's submission for an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub text: String,
    pub submitted_at: DateTime<Utc>,
}

/// An assignment record, owned by its course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identity, immutable once assigned.
    pub id: AssignmentId,
    pub course: CourseId,
    pub title: String,
    pub description: String,
    /// Submission deadline.
    pub due: DateTime<Utc>,
    /// Upper bound for submission scores.
    pub max_score: f64,
    /// student id -> submission, in submission order.
    pub submissions: IndexMap<UserId, Submission>,
    /// student id -> score, in grading order.
    pub scores: IndexMap<UserId, f64>,
}

impl Assignment {
    /// Creates an assignment with no submissions.
    pub fn new(
        id: AssignmentId,
        course: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        due: DateTime<Utc>,
        max_score: f64,
    ) -> Self {
        Assignment {
            id,
            course,
            title: title.into(),
            description: description.into(),
            due,
            max_score,
            submissions: IndexMap::new(),
            scores: IndexMap::new(),
        }
    }

    /// Returns `true` if the student has a recorded submission.
    pub fn has_submission(&self, student: &UserId) -> bool {
        self.submissions.contains_key(student)
    }

    /// The recorded score for a student, if graded.
    pub fn score_for(&self, student: &UserId) -> Option<f64> {
        self.scores.get(student).copied()
    }
}
