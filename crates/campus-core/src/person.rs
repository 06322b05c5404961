//! People: students, instructors, and platform admins.
//!
//! A [`Person`] carries the shared profile fields; the [`Role`] tagged enum
//! holds what differs per variant. The course sets inside `Role` are
//! **derived** back-references -- the owning [`Course`](crate::course::Course)
//! roster and instructor fields are authoritative, and every mutation path
//! (and the load-time linker) keeps both sides consistent.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::id::{CourseId, IdKind, UserId};

/// The three person variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonKind {
    Student,
    Instructor,
    Admin,
}

impl PersonKind {
    /// The identifier kind minted for this person variant.
    pub fn id_kind(self) -> IdKind {
        match self {
            PersonKind::Student => IdKind::Student,
            PersonKind::Instructor => IdKind::Instructor,
            PersonKind::Admin => IdKind::Admin,
        }
    }

    /// Human-readable variant name.
    pub fn label(self) -> &'static str {
        match self {
            PersonKind::Student => "Student",
            PersonKind::Instructor => "Instructor",
            PersonKind::Admin => "Admin",
        }
    }
}

/// Role-specific data, dispatched by kind tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Role {
    /// A student with their ordered set of enrolled-course refs.
    Student { enrolled: IndexSet<CourseId> },
    /// An instructor with their ordered set of assigned-course refs.
    Instructor { assigned: IndexSet<CourseId> },
    /// A platform admin; no course relationships.
    Admin,
}

impl Role {
    /// Creates the empty role data for a person kind.
    pub fn empty(kind: PersonKind) -> Self {
        match kind {
            PersonKind::Student => Role::Student {
                enrolled: IndexSet::new(),
            },
            PersonKind::Instructor => Role::Instructor {
                assigned: IndexSet::new(),
            },
            PersonKind::Admin => Role::Admin,
        }
    }

    /// The kind tag of this role.
    pub fn kind(&self) -> PersonKind {
        match self {
            Role::Student { .. } => PersonKind::Student,
            Role::Instructor { .. } => PersonKind::Instructor,
            Role::Admin => PersonKind::Admin,
        }
    }
}

/// A person record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identity, immutable once assigned.
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all people.
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

impl Person {
    /// Creates a person with empty role data for `kind`.
    pub fn new(
        id: UserId,
        kind: PersonKind,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Person {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            password: password.into(),
            role: Role::empty(kind),
        }
    }

    /// The kind tag of this person.
    pub fn kind(&self) -> PersonKind {
        self.role.kind()
    }

    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The enrolled-course set, if this person is a student.
    pub fn enrolled(&self) -> Option<&IndexSet<CourseId>> {
        match &self.role {
            Role::Student { enrolled } => Some(enrolled),
            _ => None,
        }
    }

    /// Mutable access to the enrolled-course set, if a student.
    pub fn enrolled_mut(&mut self) -> Option<&mut IndexSet<CourseId>> {
        match &mut self.role {
            Role::Student { enrolled } => Some(enrolled),
            _ => None,
        }
    }

    /// The assigned-course set, if this person is an instructor.
    pub fn assigned(&self) -> Option<&IndexSet<CourseId>> {
        match &self.role {
            Role::Instructor { assigned } => Some(assigned),
            _ => None,
        }
    }

    /// Mutable access to the assigned-course set, if an instructor.
    pub fn assigned_mut(&mut self) -> Option<&mut IndexSet<CourseId>> {
        match &mut self.role {
            Role::Instructor { assigned } => Some(assigned),
            _ => None,
        }
    }

    /// Multi-line profile text, per variant.
    pub fn profile(&self) -> String {
        let mut lines = vec![
            format!("{} Profile:", self.kind().label()),
            format!("ID: {}", self.id),
            format!("Name: {}", self.full_name()),
            format!("Email: {}", self.email),
            format!("Phone: {}", self.phone),
        ];
        match &self.role {
            Role::Student { enrolled } => {
                lines.push(format!("Enrolled Courses: {}", join_ids(enrolled)));
            }
            Role::Instructor { assigned } => {
                lines.push(format!("Assigned Courses: {}", join_ids(assigned)));
            }
            Role::Admin => {}
        }
        lines.join("\n")
    }
}

fn join_ids(ids: &IndexSet<CourseId>) -> String {
    if ids.is_empty() {
        return "None".to_string();
    }
    ids.iter()
        .map(|id| id.0.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A permitted person field change.
///
/// Closed set: anything not representable here cannot be patched onto a
/// person. The id and role are deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PersonUpdate {
    FirstName(String),
    LastName(String),
    Email(String),
    Phone(String),
    Password(String),
}
