//! Relationship linker: turns identifier-only records back into a live,
//! fully cross-referenced campus.
//!
//! Resolution runs in fixed dependency order -- Persons, Courses,
//! Enrollments, Assignments, Grades -- so each later kind only ever looks up
//! already-populated stores. A reference that does not resolve is skipped
//! and reported through [`LoadReport`], never fatal: one corrupt record must
//! not prevent the rest of the dataset from loading.
//!
//! Derived back-references (student enrolled sets, instructor assigned sets)
//! are rebuilt here from the authoritative course records; the snapshot does
//! not carry them.

use std::fmt;

use tracing::warn;

use campus_core::id::{AssignmentId, CourseId, IdRegistry, UserId};
use campus_core::person::PersonKind;
use campus_core::store::{EntityKind, EntityStore};
use campus_core::Campus;

use crate::record::Snapshot;

/// A reference in a serialized record that did not resolve to any loaded
/// entity. The affected record (or map/list entry) was omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Kind of the record being linked.
    pub kind: EntityKind,
    /// Id of the record being linked.
    pub record: String,
    /// The identifier that failed to resolve.
    pub missing: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dangling reference in {} '{}': missing '{}'",
            self.kind, self.record, self.missing
        )
    }
}

/// What the linker skipped while rebuilding a campus.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub skipped: Vec<DanglingReference>,
}

impl LoadReport {
    /// Returns `true` if nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn dangling(&mut self, kind: EntityKind, record: &str, missing: &str) {
        warn!(%kind, record, missing, "skipping dangling reference");
        self.skipped.push(DanglingReference {
            kind,
            record: record.to_string(),
            missing: missing.to_string(),
        });
    }
}

/// Rebuilds a live [`Campus`] from a snapshot.
///
/// Ids are carried through verbatim and fed to the identity registry, so
/// later mints cannot collide with reloaded data.
pub fn recompose(snapshot: Snapshot) -> (Campus, LoadReport) {
    let mut report = LoadReport::default();
    let mut ids = IdRegistry::new();

    // Pass 1: persons. No references to resolve; role course sets start
    // empty and are derived from courses below.
    let mut users = EntityStore::new(EntityKind::User);
    for record in snapshot.users {
        ids.observe(&record.id);
        let person = record.into_person();
        let id = person.id.clone();
        if let Err(err) = users.insert(id, person) {
            warn!(%err, "skipping duplicate user record");
        }
    }

    // Pass 2: courses. Instructor/roster/application refs resolve against
    // the user store; a dangling entry drops only that entry, the course
    // itself survives. Assignment lists are reconciled in pass 4 once the
    // assignment store exists.
    let mut courses = EntityStore::new(EntityKind::Course);
    let mut pending_assignments: Vec<(CourseId, Vec<String>)> = Vec::new();
    for record in snapshot.courses {
        ids.observe(&record.id);
        let instructor_raw = record.instructor.clone();
        let roster_raw = record.roster.clone();
        let applications_raw = record.applications.clone();
        let assignments_raw = record.assignments.clone();

        let mut course = record.into_course();
        let course_id = course.id.clone();

        if let Some(raw) = instructor_raw {
            let id = UserId(raw.clone());
            match users.get(&id) {
                Some(p) if p.kind() == PersonKind::Instructor => course.instructor = Some(id),
                _ => report.dangling(EntityKind::Course, &course_id.0, &raw),
            }
        }
        for raw in roster_raw {
            let id = UserId(raw.clone());
            match users.get(&id) {
                Some(p) if p.kind() == PersonKind::Student => {
                    course.roster.insert(id);
                }
                _ => report.dangling(EntityKind::Course, &course_id.0, &raw),
            }
        }
        for raw in applications_raw {
            let id = UserId(raw.clone());
            match users.get(&id) {
                Some(p) if p.kind() == PersonKind::Instructor => course.applications.push(id),
                _ => report.dangling(EntityKind::Course, &course_id.0, &raw),
            }
        }

        pending_assignments.push((course_id.clone(), assignments_raw));
        if let Err(err) = courses.insert(course_id, course) {
            warn!(%err, "skipping duplicate course record");
        }
    }

    // Rebuild derived back-references from the authoritative course side.
    let mut enrolled_pairs: Vec<(UserId, CourseId)> = Vec::new();
    let mut assigned_pairs: Vec<(UserId, CourseId)> = Vec::new();
    for (course_id, course) in courses.iter() {
        for student in &course.roster {
            enrolled_pairs.push((student.clone(), course_id.clone()));
        }
        if let Some(instructor) = &course.instructor {
            assigned_pairs.push((instructor.clone(), course_id.clone()));
        }
    }
    for (user, course) in enrolled_pairs {
        if let Some(enrolled) = users.get_mut(&user).and_then(|p| p.enrolled_mut()) {
            enrolled.insert(course);
        }
    }
    for (user, course) in assigned_pairs {
        if let Some(assigned) = users.get_mut(&user).and_then(|p| p.assigned_mut()) {
            assigned.insert(course);
        }
    }

    // Pass 3: enrollments. Both refs must resolve or the record is skipped.
    let mut enrollments = EntityStore::new(EntityKind::Enrollment);
    for record in snapshot.enrollments {
        ids.observe(&record.id);
        if !users.contains(&UserId(record.student.clone())) {
            report.dangling(EntityKind::Enrollment, &record.id, &record.student);
            continue;
        }
        if !courses.contains(&CourseId(record.course.clone())) {
            report.dangling(EntityKind::Enrollment, &record.id, &record.course);
            continue;
        }
        let enrollment = record.into_enrollment();
        let id = enrollment.id.clone();
        if let Err(err) = enrollments.insert(id, enrollment) {
            warn!(%err, "skipping duplicate enrollment record");
        }
    }

    // Pass 4: assignments. A dangling course skips the record; a dangling
    // submission/score key drops only that entry.
    let mut assignments = EntityStore::new(EntityKind::Assignment);
    for record in snapshot.assignments {
        ids.observe(&record.id);
        if !courses.contains(&CourseId(record.course.clone())) {
            report.dangling(EntityKind::Assignment, &record.id, &record.course);
            continue;
        }
        let submissions = record.submissions.clone();
        let scores = record.scores.clone();
        let mut assignment = record.into_assignment();

        for (raw, submission) in submissions {
            let id = UserId(raw.clone());
            if users.contains(&id) {
                assignment.submissions.insert(id, submission);
            } else {
                report.dangling(EntityKind::Assignment, &assignment.id.0, &raw);
            }
        }
        for (raw, score) in scores {
            let id = UserId(raw.clone());
            if assignment.submissions.contains_key(&id) {
                assignment.scores.insert(id, score);
            } else {
                warn!(assignment = %assignment.id, student = %raw, "dropping score without a submission");
            }
        }

        let id = assignment.id.clone();
        if let Err(err) = assignments.insert(id, assignment) {
            warn!(%err, "skipping duplicate assignment record");
        }
    }

    // Reconcile each course's assignment list against what actually loaded:
    // keep the recorded order, drop entries that resolve nowhere, and pick
    // up loaded assignments the list was missing.
    for (course_id, raw_list) in pending_assignments {
        let mut list: Vec<AssignmentId> = Vec::new();
        for raw in raw_list {
            let id = AssignmentId(raw.clone());
            let owned = assignments
                .get(&id)
                .map(|a| a.course == course_id)
                .unwrap_or(false);
            if owned {
                list.push(id);
            } else {
                report.dangling(EntityKind::Course, &course_id.0, &raw);
            }
        }
        for (id, assignment) in assignments.iter() {
            if assignment.course == course_id && !list.contains(id) {
                warn!(course = %course_id, assignment = %id, "re-attaching assignment missing from course list");
                list.push(id.clone());
            }
        }
        if let Some(course) = courses.get_mut(&course_id) {
            course.assignments = list;
        }
    }

    // Pass 5: grades.
    let mut grades = EntityStore::new(EntityKind::Grade);
    for record in snapshot.grades {
        ids.observe(&record.id);
        if !users.contains(&UserId(record.student.clone())) {
            report.dangling(EntityKind::Grade, &record.id, &record.student);
            continue;
        }
        if !courses.contains(&CourseId(record.course.clone())) {
            report.dangling(EntityKind::Grade, &record.id, &record.course);
            continue;
        }
        let grade = record.into_grade();
        let id = grade.id.clone();
        if let Err(err) = grades.insert(id, grade) {
            warn!(%err, "skipping duplicate grade record");
        }
    }

    let campus = Campus::from_parts(users, courses, enrollments, assignments, grades, ids);
    (campus, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    use campus_core::course::ScheduleWindow;
    use campus_core::person::PersonKind;

    use crate::convert::decompose;
    use crate::record::{EnrollmentRecord, Snapshot};

    fn window() -> ScheduleWindow {
        ScheduleWindow {
            start: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 5, 22).unwrap(),
        }
    }

    /// A campus exercising every relationship: approved and declined
    /// enrollments, an assigned instructor, a queued application, a graded
    /// submission, and a course grade.
    fn populated_campus() -> Campus {
        let mut campus = Campus::new();
        let ada = campus
            .register_person(PersonKind::Student, "Ada", "Lovelace", "555-0100")
            .unwrap()
            .0;
        let grace = campus
            .register_person(PersonKind::Student, "Grace", "Hopper", "555-0101")
            .unwrap()
            .0;
        let barbara = campus
            .register_person(PersonKind::Instructor, "Barbara", "Liskov", "555-0200")
            .unwrap()
            .0;
        let edsger = campus
            .register_person(PersonKind::Instructor, "Edsger", "Dijkstra", "555-0201")
            .unwrap()
            .0;

        let rust = campus.add_course("Rust", "Systems", 30, window()).unwrap();
        let math = campus.add_course("Math", "Proofs", 10, window()).unwrap();

        campus.assign_instructor(&rust, &barbara).unwrap();
        campus.apply_to_course(&edsger, &math).unwrap();

        let enr = campus.enroll(&ada, &rust).unwrap();
        campus.record_payment(&enr).unwrap();
        campus.approve_enrollment(&enr).unwrap();
        let declined = campus.enroll(&grace, &rust).unwrap();
        campus.decline_enrollment(&declined).unwrap();

        let due = Utc.with_ymd_and_hms(2026, 3, 1, 23, 59, 0).unwrap();
        let hw = campus
            .add_assignment(&rust, "hw1", "ownership", due, 100.0)
            .unwrap();
        campus
            .submit_assignment_at(&hw, &ada, "borrowed", due - Duration::days(2))
            .unwrap();
        campus.grade_submission(&hw, &ada, 91.0).unwrap();

        campus.record_course_grade(&ada, &rust, 88.5).unwrap();
        campus
    }

    #[test]
    fn round_trip_preserves_the_whole_graph() {
        let campus = populated_campus();
        let snapshot = decompose(&campus);

        // Through the serialized text form, exactly as the file store does.
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();

        let (reloaded, report) = recompose(parsed);
        assert!(report.is_clean(), "unexpected skips: {:?}", report.skipped);

        // Attribute-for-attribute equality of the flattened graphs, which
        // covers ids, statuses, maps, and ordering.
        assert_eq!(decompose(&reloaded), snapshot);

        // Derived back-references were rebuilt identically.
        for (id, person) in campus.users().iter() {
            assert_eq!(reloaded.person(id).unwrap(), person);
        }
    }

    #[test]
    fn dangling_enrollment_is_skipped_but_load_continues() {
        let campus = populated_campus();
        let mut snapshot = decompose(&campus);
        let good = snapshot.enrollments.len();

        snapshot.enrollments.push(EnrollmentRecord {
            id: "ENR-ghost".into(),
            student: snapshot.users[0].id.clone(),
            course: "CRS-ghost".into(),
            payment: campus_core::PaymentStatus::Pending,
            status: campus_core::EnrollmentStatus::Pending,
        });

        let (reloaded, report) = recompose(snapshot);
        assert_eq!(reloaded.enrollments().len(), good);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].record, "ENR-ghost");
        assert_eq!(report.skipped[0].missing, "CRS-ghost");
    }

    #[test]
    fn dangling_roster_entry_drops_only_that_entry() {
        let campus = populated_campus();
        let mut snapshot = decompose(&campus);

        let course = snapshot
            .courses
            .iter_mut()
            .find(|c| !c.roster.is_empty())
            .unwrap();
        let course_id = course.id.clone();
        let kept = course.roster.len();
        course.roster.push("STU-ghost".into());

        let (reloaded, report) = recompose(snapshot);
        let roster = &reloaded
            .course(&campus_core::CourseId(course_id))
            .unwrap()
            .roster;
        assert_eq!(roster.len(), kept);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].missing, "STU-ghost");
    }

    #[test]
    fn dangling_instructor_becomes_unassigned() {
        let campus = populated_campus();
        let mut snapshot = decompose(&campus);

        let course = snapshot
            .courses
            .iter_mut()
            .find(|c| c.instructor.is_some())
            .unwrap();
        course.instructor = Some("INS-ghost".into());
        let course_id = course.id.clone();

        let (reloaded, report) = recompose(snapshot);
        let course = reloaded.course(&campus_core::CourseId(course_id)).unwrap();
        assert_eq!(course.instructor, None);
        assert!(!report.is_clean());
    }

    #[test]
    fn empty_snapshot_loads_an_empty_campus() {
        let (campus, report) = recompose(Snapshot::default());
        assert!(report.is_clean());
        assert!(campus.users().is_empty());
        assert!(campus.courses().is_empty());
    }
}
