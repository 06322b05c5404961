//! Enrollments linking students to courses.
//!
//! An enrollment references its student and course by id only; it owns
//! neither. Status transitions are one-way: Pending may become Approved or
//! Declined, and nothing moves after that.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::{CourseId, EnrollmentId, UserId};

/// Payment state for an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
        };
        write!(f, "{name}")
    }
}

/// Lifecycle state for an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    Pending,
    Approved,
    Declined,
}

impl EnrollmentStatus {
    /// Pending and Approved enrollments block a duplicate for the same
    /// (student, course) pair; Declined ones do not.
    pub fn is_active(self) -> bool {
        matches!(self, EnrollmentStatus::Pending | EnrollmentStatus::Approved)
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnrollmentStatus::Pending => "Pending",
            EnrollmentStatus::Approved => "Approved",
            EnrollmentStatus::Declined => "Declined",
        };
        write!(f, "{name}")
    }
}

/// An enrollment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Unique identity, immutable once assigned.
    pub id: EnrollmentId,
    pub student: UserId,
    pub course: CourseId,
    pub payment: PaymentStatus,
    pub status: EnrollmentStatus,
}

impl Enrollment {
    /// Creates a new enrollment in status Pending with payment Pending.
    pub fn new(id: EnrollmentId, student: UserId, course: CourseId) -> Self {
        Enrollment {
            id,
            student,
            course,
            payment: PaymentStatus::Pending,
            status: EnrollmentStatus::Pending,
        }
    }

    /// Returns `true` while the enrollment blocks a duplicate for its pair.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_enrollment_is_pending_on_both_axes() {
        let e = Enrollment::new(
            EnrollmentId("ENR-1".into()),
            UserId("STU-1".into()),
            CourseId("CRS-1".into()),
        );
        assert_eq!(e.status, EnrollmentStatus::Pending);
        assert_eq!(e.payment, PaymentStatus::Pending);
        assert!(e.is_active());
    }

    #[test]
    fn declined_is_not_active() {
        assert!(EnrollmentStatus::Pending.is_active());
        assert!(EnrollmentStatus::Approved.is_active());
        assert!(!EnrollmentStatus::Declined.is_active());
    }
}
