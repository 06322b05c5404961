//! Core error types for campus-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering every
//! failure the domain rule engine can surface. Each variant aborts only the
//! requested operation; the stores are never left partially mutated.

use crate::id::{AssignmentId, CourseId, UserId};
use crate::store::EntityKind;
use thiserror::Error;

/// Errors produced by the campus-core crate.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced entity was not found in its store.
    #[error("{kind} not found: '{id}'")]
    NotFound { kind: EntityKind, id: String },

    /// Inserting an entity whose identifier is already in use.
    #[error("{kind} id already in use: '{id}'")]
    IdCollision { kind: EntityKind, id: String },

    /// Registering a person with an email another person already holds.
    #[error("email already registered: '{email}'")]
    DuplicateEmail { email: String },

    /// The student already has a Pending or Approved enrollment in the course.
    #[error("student '{student}' already has an active enrollment in course '{course}'")]
    DuplicateEnrollment { student: UserId, course: CourseId },

    /// The course roster has no seat left.
    #[error("course '{course}' is full ({capacity} seats)")]
    CapacityExceeded { course: CourseId, capacity: u32 },

    /// An illegal state transition was requested.
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    /// The student already submitted this assignment.
    #[error("student '{student}' already submitted assignment '{assignment}'")]
    AlreadySubmitted {
        student: UserId,
        assignment: AssignmentId,
    },

    /// The submission arrived after the assignment's due instant.
    #[error("deadline for assignment '{assignment}' has passed")]
    DeadlinePassed { assignment: AssignmentId },

    /// A score outside the permitted bounds.
    #[error("score {score} out of range 0..={max}")]
    ScoreOutOfRange { score: f64, max: f64 },

    /// Grading was requested for a student with no prior submission.
    #[error("student '{student}' has not submitted assignment '{assignment}'")]
    NotSubmitted {
        student: UserId,
        assignment: AssignmentId,
    },

    /// The course already has an instructor assigned.
    #[error("course '{course}' already has an instructor assigned")]
    AlreadyAssigned { course: CourseId },

    /// An instructor applied to a course that is already taken.
    #[error("course '{course}' is already taken by an instructor")]
    CourseTaken { course: CourseId },

    /// The instructor is already in the course's application queue.
    #[error("instructor '{instructor}' already applied to course '{course}'")]
    DuplicateApplication {
        instructor: UserId,
        course: CourseId,
    },
}
