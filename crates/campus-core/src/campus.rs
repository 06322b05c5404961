//! Campus: the root context tying the entity stores together.
//!
//! [`Campus`] owns the five per-kind stores plus the identity registry and
//! is the single validation point for every mutation. It is constructed once
//! at process start and passed down explicitly -- there is no global state.
//! Each operation validates against current store state first and mutates
//! only on success, so a failed operation never leaves a partial change
//! behind.
//!
//! Relationship discipline: the course-side sets (roster, instructor link,
//! assignment list, application queue) are authoritative. The per-person
//! course sets are derived back-references, and every mutation here updates
//! both sides in the same call.

use chrono::{DateTime, Utc};

use crate::account::{self, Credentials};
use crate::assignment::{Assignment, Submission};
use crate::course::{Course, CourseUpdate, ScheduleWindow};
use crate::enrollment::{Enrollment, EnrollmentStatus, PaymentStatus};
use crate::error::DomainError;
use crate::grade::Grade;
use crate::id::{AssignmentId, CourseId, EnrollmentId, GradeId, IdKind, IdRegistry, UserId};
use crate::person::{Person, PersonKind, PersonUpdate};
use crate::store::{EntityKind, EntityStore};

/// The root context: all stores, the identity registry, and every
/// rule-engine operation.
#[derive(Debug)]
pub struct Campus {
    users: EntityStore<UserId, Person>,
    courses: EntityStore<CourseId, Course>,
    enrollments: EntityStore<EnrollmentId, Enrollment>,
    assignments: EntityStore<AssignmentId, Assignment>,
    grades: EntityStore<GradeId, Grade>,
    ids: IdRegistry,
}

impl Campus {
    /// Creates an empty campus.
    pub fn new() -> Self {
        Campus {
            users: EntityStore::new(EntityKind::User),
            courses: EntityStore::new(EntityKind::Course),
            enrollments: EntityStore::new(EntityKind::Enrollment),
            assignments: EntityStore::new(EntityKind::Assignment),
            grades: EntityStore::new(EntityKind::Grade),
            ids: IdRegistry::new(),
        }
    }

    /// Constructs a `Campus` from already-populated stores.
    ///
    /// This is how the storage layer rebuilds a campus from a loaded
    /// snapshot without going through the rule-engine methods (whose
    /// invariants the stored data already satisfies). The registry must have
    /// observed every id in the stores.
    pub fn from_parts(
        users: EntityStore<UserId, Person>,
        courses: EntityStore<CourseId, Course>,
        enrollments: EntityStore<EnrollmentId, Enrollment>,
        assignments: EntityStore<AssignmentId, Assignment>,
        grades: EntityStore<GradeId, Grade>,
        ids: IdRegistry,
    ) -> Self {
        Campus {
            users,
            courses,
            enrollments,
            assignments,
            grades,
            ids,
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn users(&self) -> &EntityStore<UserId, Person> {
        &self.users
    }

    pub fn courses(&self) -> &EntityStore<CourseId, Course> {
        &self.courses
    }

    pub fn enrollments(&self) -> &EntityStore<EnrollmentId, Enrollment> {
        &self.enrollments
    }

    pub fn assignments(&self) -> &EntityStore<AssignmentId, Assignment> {
        &self.assignments
    }

    pub fn grades(&self) -> &EntityStore<GradeId, Grade> {
        &self.grades
    }

    // -----------------------------------------------------------------------
    // People
    // -----------------------------------------------------------------------

    /// Registers a new person and generates their account credentials.
    ///
    /// The email is derived from the name; registration fails with
    /// [`DomainError::DuplicateEmail`] if another person already holds it.
    pub fn register_person(
        &mut self,
        kind: PersonKind,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<(UserId, Credentials), DomainError> {
        let email = account::email_for(first_name, last_name);
        if self.find_person_by_email(&email).is_some() {
            return Err(DomainError::DuplicateEmail { email });
        }

        let password = account::generate_password(&mut rand::thread_rng());
        let id = UserId(self.ids.mint(kind.id_kind()));
        let person = Person::new(
            id.clone(),
            kind,
            first_name,
            last_name,
            email.clone(),
            phone,
            password.clone(),
        );
        self.users.insert(id.clone(), person)?;

        Ok((id, Credentials { email, password }))
    }

    /// Applies a closed set of field changes to a person.
    ///
    /// All changes are validated before any is applied.
    pub fn update_person(
        &mut self,
        id: &UserId,
        updates: &[PersonUpdate],
    ) -> Result<(), DomainError> {
        self.users.require(id)?;
        for update in updates {
            if let PersonUpdate::Email(email) = update {
                if let Some(holder) = self.find_person_by_email(email) {
                    if holder.id != *id {
                        return Err(DomainError::DuplicateEmail {
                            email: email.clone(),
                        });
                    }
                }
            }
        }

        let person = self.users.require_mut(id)?;
        for update in updates {
            match update {
                PersonUpdate::FirstName(v) => person.first_name = v.clone(),
                PersonUpdate::LastName(v) => person.last_name = v.clone(),
                PersonUpdate::Email(v) => person.email = v.clone(),
                PersonUpdate::Phone(v) => person.phone = v.clone(),
                PersonUpdate::Password(v) => person.password = v.clone(),
            }
        }
        Ok(())
    }

    /// Removes a person, detaching them from every course roster,
    /// instructor slot, and application queue they appear in.
    ///
    /// Their historical enrollments and grades are left in place; the linker
    /// drops such orphaned records (with a warning) on the next reload.
    pub fn remove_person(&mut self, id: &UserId) -> Result<Person, DomainError> {
        let person = self.users.remove(id)?;

        for course in self.courses.values_mut() {
            course.roster.shift_remove(id);
            if course.instructor.as_ref() == Some(id) {
                course.instructor = None;
            }
            course.applications.retain(|applicant| applicant != id);
        }

        Ok(person)
    }

    /// Looks up a person by email.
    pub fn find_person_by_email(&self, email: &str) -> Option<&Person> {
        self.users.iter().map(|(_, p)| p).find(|p| p.email == email)
    }

    /// Checks credentials against the user store.
    ///
    /// Plain equality on the stored password; this mirrors the platform's
    /// record-keeping login, not a security boundary.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Person> {
        self.find_person_by_email(email)
            .filter(|p| p.password == password)
    }

    /// Looks up a person by id.
    pub fn person(&self, id: &UserId) -> Result<&Person, DomainError> {
        self.users.require(id)
    }

    fn require_student(&self, id: &UserId) -> Result<&Person, DomainError> {
        match self.users.get(id) {
            Some(p) if p.kind() == PersonKind::Student => Ok(p),
            _ => Err(DomainError::NotFound {
                kind: EntityKind::User,
                id: id.to_string(),
            }),
        }
    }

    fn require_instructor(&self, id: &UserId) -> Result<&Person, DomainError> {
        match self.users.get(id) {
            Some(p) if p.kind() == PersonKind::Instructor => Ok(p),
            _ => Err(DomainError::NotFound {
                kind: EntityKind::User,
                id: id.to_string(),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Courses
    // -----------------------------------------------------------------------

    /// Creates a new course and returns its id.
    pub fn add_course(
        &mut self,
        title: &str,
        description: &str,
        capacity: u32,
        schedule: ScheduleWindow,
    ) -> Result<CourseId, DomainError> {
        let id = CourseId(self.ids.mint(IdKind::Course));
        let course = Course::new(id.clone(), title, description, capacity, schedule);
        self.courses.insert(id.clone(), course)?;
        Ok(id)
    }

    /// Applies a closed set of field changes to a course.
    ///
    /// All changes are validated before any is applied; shrinking capacity
    /// below the current roster size fails with
    /// [`DomainError::CapacityExceeded`].
    pub fn update_course(
        &mut self,
        id: &CourseId,
        updates: &[CourseUpdate],
    ) -> Result<(), DomainError> {
        let course = self.courses.require(id)?;
        for update in updates {
            match update {
                CourseUpdate::Capacity(capacity) => {
                    if (*capacity as usize) < course.roster.len() {
                        return Err(DomainError::CapacityExceeded {
                            course: id.clone(),
                            capacity: *capacity,
                        });
                    }
                }
                CourseUpdate::GradeCeiling(ceiling) => {
                    if *ceiling <= 0.0 {
                        return Err(DomainError::InvalidState {
                            reason: format!("grade ceiling must be positive, got {ceiling}"),
                        });
                    }
                }
                _ => {}
            }
        }

        let course = self.courses.require_mut(id)?;
        for update in updates {
            match update {
                CourseUpdate::Title(v) => course.title = v.clone(),
                CourseUpdate::Description(v) => course.description = v.clone(),
                CourseUpdate::Capacity(v) => course.capacity = *v,
                CourseUpdate::Schedule(v) => course.schedule = *v,
                CourseUpdate::GradeCeiling(v) => course.grade_ceiling = *v,
            }
        }
        Ok(())
    }

    /// Removes a course, cascading over everything that references it.
    ///
    /// The course's assignments, enrollments, and grades are removed, and
    /// the back-references of its instructor and enrolled students are
    /// detached.
    pub fn remove_course(&mut self, id: &CourseId) -> Result<Course, DomainError> {
        let course = self.courses.remove(id)?;

        self.assignments.retain(|_, a| a.course != *id);
        self.enrollments.retain(|_, e| e.course != *id);
        self.grades.retain(|_, g| g.course != *id);

        if let Some(instructor) = &course.instructor {
            if let Some(person) = self.users.get_mut(instructor) {
                if let Some(assigned) = person.assigned_mut() {
                    assigned.shift_remove(id);
                }
            }
        }
        for student in &course.roster {
            if let Some(person) = self.users.get_mut(student) {
                if let Some(enrolled) = person.enrolled_mut() {
                    enrolled.shift_remove(id);
                }
            }
        }

        Ok(course)
    }

    /// Looks up a course by id.
    pub fn course(&self, id: &CourseId) -> Result<&Course, DomainError> {
        self.courses.require(id)
    }

    /// Courses with no instructor assigned, in creation order.
    pub fn available_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.filter(|c| c.instructor.is_none())
    }

    // -----------------------------------------------------------------------
    // Instructor assignment
    // -----------------------------------------------------------------------

    /// Queues an instructor's application for a course.
    pub fn apply_to_course(
        &mut self,
        instructor: &UserId,
        course: &CourseId,
    ) -> Result<(), DomainError> {
        self.require_instructor(instructor)?;
        let course_ref = self.courses.require_mut(course)?;
        if course_ref.instructor.is_some() {
            return Err(DomainError::CourseTaken {
                course: course.clone(),
            });
        }
        if course_ref.applications.contains(instructor) {
            return Err(DomainError::DuplicateApplication {
                instructor: instructor.clone(),
                course: course.clone(),
            });
        }
        course_ref.applications.push(instructor.clone());
        Ok(())
    }

    /// Assigns an instructor to a course, linking both directions and
    /// clearing the application queue.
    pub fn assign_instructor(
        &mut self,
        course: &CourseId,
        instructor: &UserId,
    ) -> Result<(), DomainError> {
        self.require_instructor(instructor)?;
        if self.courses.require(course)?.instructor.is_some() {
            return Err(DomainError::AlreadyAssigned {
                course: course.clone(),
            });
        }

        let course_ref = self.courses.require_mut(course)?;
        course_ref.instructor = Some(instructor.clone());
        course_ref.applications.clear();
        if let Some(assigned) = self.users.require_mut(instructor)?.assigned_mut() {
            assigned.insert(course.clone());
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Enrollment
    // -----------------------------------------------------------------------

    /// Creates a Pending enrollment for a student in a course.
    ///
    /// The roster is untouched until approval; capacity is nonetheless
    /// checked here so a full course rejects new enrollments up front.
    pub fn enroll(
        &mut self,
        student: &UserId,
        course: &CourseId,
    ) -> Result<EnrollmentId, DomainError> {
        self.require_student(student)?;
        let course_ref = self.courses.require(course)?;
        if course_ref.is_full() {
            return Err(DomainError::CapacityExceeded {
                course: course.clone(),
                capacity: course_ref.capacity,
            });
        }
        let duplicate = self
            .enrollments
            .iter()
            .any(|(_, e)| e.student == *student && e.course == *course && e.is_active());
        if duplicate {
            return Err(DomainError::DuplicateEnrollment {
                student: student.clone(),
                course: course.clone(),
            });
        }

        let id = EnrollmentId(self.ids.mint(IdKind::Enrollment));
        let enrollment = Enrollment::new(id.clone(), student.clone(), course.clone());
        self.enrollments.insert(id.clone(), enrollment)?;
        Ok(id)
    }

    /// Approves a Pending enrollment.
    ///
    /// On success the student joins the course roster and the course joins
    /// the student's enrolled set; both inserts are idempotent, so a roster
    /// can never gain the same student twice. The roster may have filled
    /// since the enrollment was created, in which case this fails with
    /// [`DomainError::CapacityExceeded`] and the enrollment stays Pending.
    pub fn approve_enrollment(&mut self, id: &EnrollmentId) -> Result<(), DomainError> {
        let (student, course, status) = {
            let e = self.enrollments.require(id)?;
            (e.student.clone(), e.course.clone(), e.status)
        };
        if status != EnrollmentStatus::Pending {
            return Err(DomainError::InvalidState {
                reason: format!("enrollment '{id}' is {status}, expected Pending"),
            });
        }
        self.require_student(&student)?;
        let course_ref = self.courses.require(&course)?;
        if !course_ref.roster.contains(&student) && course_ref.is_full() {
            return Err(DomainError::CapacityExceeded {
                course: course.clone(),
                capacity: course_ref.capacity,
            });
        }

        self.enrollments.require_mut(id)?.status = EnrollmentStatus::Approved;
        self.courses
            .require_mut(&course)?
            .roster
            .insert(student.clone());
        if let Some(enrolled) = self.users.require_mut(&student)?.enrolled_mut() {
            enrolled.insert(course.clone());
        }
        Ok(())
    }

    /// Declines a Pending enrollment. No roster mutation.
    pub fn decline_enrollment(&mut self, id: &EnrollmentId) -> Result<(), DomainError> {
        let e = self.enrollments.require_mut(id)?;
        if e.status != EnrollmentStatus::Pending {
            return Err(DomainError::InvalidState {
                reason: format!("enrollment '{}' is {}, expected Pending", e.id, e.status),
            });
        }
        e.status = EnrollmentStatus::Declined;
        Ok(())
    }

    /// Marks an enrollment's payment as received.
    pub fn record_payment(&mut self, id: &EnrollmentId) -> Result<(), DomainError> {
        let e = self.enrollments.require_mut(id)?;
        if e.payment == PaymentStatus::Paid {
            return Err(DomainError::InvalidState {
                reason: format!("enrollment '{}' is already paid", e.id),
            });
        }
        e.payment = PaymentStatus::Paid;
        Ok(())
    }

    /// Looks up an enrollment by id.
    pub fn enrollment(&self, id: &EnrollmentId) -> Result<&Enrollment, DomainError> {
        self.enrollments.require(id)
    }

    /// Enrollments referencing a course, in creation order.
    pub fn enrollments_for_course(&self, course: &CourseId) -> impl Iterator<Item = &Enrollment> {
        let course = course.clone();
        self.enrollments.filter(move |e| e.course == course)
    }

    // -----------------------------------------------------------------------
    // Assignments
    // -----------------------------------------------------------------------

    /// Creates an assignment owned by a course.
    pub fn add_assignment(
        &mut self,
        course: &CourseId,
        title: &str,
        description: &str,
        due: DateTime<Utc>,
        max_score: f64,
    ) -> Result<AssignmentId, DomainError> {
        self.courses.require(course)?;
        if max_score <= 0.0 {
            return Err(DomainError::InvalidState {
                reason: format!("max score must be positive, got {max_score}"),
            });
        }

        let id = AssignmentId(self.ids.mint(IdKind::Assignment));
        let assignment = Assignment::new(
            id.clone(),
            course.clone(),
            title,
            description,
            due,
            max_score,
        );
        self.assignments.insert(id.clone(), assignment)?;
        self.courses.require_mut(course)?.assignments.push(id.clone());
        Ok(id)
    }

    /// Records a student's submission, reading the wall clock once.
    pub fn submit_assignment(
        &mut self,
        assignment: &AssignmentId,
        student: &UserId,
        text: &str,
    ) -> Result<(), DomainError> {
        self.submit_assignment_at(assignment, student, text, Utc::now())
    }

    /// Records a student's submission against an explicit instant.
    pub fn submit_assignment_at(
        &mut self,
        assignment: &AssignmentId,
        student: &UserId,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.require_student(student)?;
        let assignment_ref = self.assignments.require_mut(assignment)?;
        if assignment_ref.has_submission(student) {
            return Err(DomainError::AlreadySubmitted {
                student: student.clone(),
                assignment: assignment.clone(),
            });
        }
        if now > assignment_ref.due {
            return Err(DomainError::DeadlinePassed {
                assignment: assignment.clone(),
            });
        }
        assignment_ref.submissions.insert(
            student.clone(),
            Submission {
                text: text.to_string(),
                submitted_at: now,
            },
        );
        Ok(())
    }

    /// Records (or overwrites) the score for a student's submission.
    ///
    /// The assignment's stored max score is authoritative; a failing call
    /// leaves any previously recorded score unchanged.
    pub fn grade_submission(
        &mut self,
        assignment: &AssignmentId,
        student: &UserId,
        score: f64,
    ) -> Result<(), DomainError> {
        let assignment_ref = self.assignments.require_mut(assignment)?;
        if !assignment_ref.has_submission(student) {
            return Err(DomainError::NotSubmitted {
                student: student.clone(),
                assignment: assignment.clone(),
            });
        }
        if !(0.0..=assignment_ref.max_score).contains(&score) {
            return Err(DomainError::ScoreOutOfRange {
                score,
                max: assignment_ref.max_score,
            });
        }
        assignment_ref.scores.insert(student.clone(), score);
        Ok(())
    }

    /// Looks up an assignment by id.
    pub fn assignment(&self, id: &AssignmentId) -> Result<&Assignment, DomainError> {
        self.assignments.require(id)
    }

    /// Assignments owned by a course, in creation order.
    pub fn assignments_for_course(&self, course: &CourseId) -> impl Iterator<Item = &Assignment> {
        let course = course.clone();
        self.assignments.filter(move |a| a.course == course)
    }

    // -----------------------------------------------------------------------
    // Course grades
    // -----------------------------------------------------------------------

    /// Appends a course grade record for a student.
    ///
    /// The value must lie within the course's grade bounds.
    pub fn record_course_grade(
        &mut self,
        student: &UserId,
        course: &CourseId,
        value: f64,
    ) -> Result<GradeId, DomainError> {
        self.require_student(student)?;
        let ceiling = self.courses.require(course)?.grade_ceiling;
        if !(0.0..=ceiling).contains(&value) {
            return Err(DomainError::ScoreOutOfRange {
                score: value,
                max: ceiling,
            });
        }

        let id = GradeId(self.ids.mint(IdKind::Grade));
        let grade = Grade::new(id.clone(), student.clone(), course.clone(), value);
        self.grades.insert(id.clone(), grade)?;
        Ok(id)
    }

    /// Looks up a grade record by id.
    pub fn grade(&self, id: &GradeId) -> Result<&Grade, DomainError> {
        self.grades.require(id)
    }

    /// Grade records for a student, in recording order.
    pub fn grades_for_student(&self, student: &UserId) -> impl Iterator<Item = &Grade> {
        let student = student.clone();
        self.grades.filter(move |g| g.student == student)
    }
}

impl Default for Campus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn window() -> ScheduleWindow {
        ScheduleWindow {
            start: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 5, 22).unwrap(),
        }
    }

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 23, 59, 0).unwrap()
    }

    fn student(campus: &mut Campus, first_name: &str) -> UserId {
        campus
            .register_person(PersonKind::Student, first_name, "Student", "555-0100")
            .unwrap()
            .0
    }

    fn instructor(campus: &mut Campus, first_name: &str) -> UserId {
        campus
            .register_person(PersonKind::Instructor, first_name, "Instructor", "555-0200")
            .unwrap()
            .0
    }

    fn course(campus: &mut Campus, capacity: u32) -> CourseId {
        campus
            .add_course("Systems Programming", "", capacity, window())
            .unwrap()
    }

    // -- registration and credentials --------------------------------------

    #[test]
    fn register_generates_credentials_and_unique_email() {
        let mut campus = Campus::new();
        let (id, creds) = campus
            .register_person(PersonKind::Student, "Ada", "Lovelace", "555")
            .unwrap();
        assert_eq!(creds.email, "ada.lovelace@platform.com");
        assert_eq!(campus.person(&id).unwrap().email, creds.email);

        let err = campus
            .register_person(PersonKind::Instructor, "Ada", "Lovelace", "556")
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail { .. }));
    }

    #[test]
    fn authenticate_checks_generated_password() {
        let mut campus = Campus::new();
        let (id, creds) = campus
            .register_person(PersonKind::Admin, "Root", "Admin", "555")
            .unwrap();
        let found = campus.authenticate(&creds.email, &creds.password).unwrap();
        assert_eq!(found.id, id);
        assert!(campus.authenticate(&creds.email, "wrong").is_none());
    }

    // -- enrollment flow ----------------------------------------------------

    #[test]
    fn enroll_is_pending_and_leaves_roster_untouched() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);

        let enr = campus.enroll(&stu, &crs).unwrap();
        let enrollment = campus.enrollment(&enr).unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Pending);
        assert_eq!(enrollment.payment, PaymentStatus::Pending);
        assert!(campus.course(&crs).unwrap().roster.is_empty());
    }

    #[test]
    fn duplicate_active_enrollment_is_rejected() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);

        let first = campus.enroll(&stu, &crs).unwrap();
        let err = campus.enroll(&stu, &crs).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEnrollment { .. }));

        // Approved still blocks.
        campus.approve_enrollment(&first).unwrap();
        let err = campus.enroll(&stu, &crs).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEnrollment { .. }));
    }

    #[test]
    fn enrolling_again_after_decline_succeeds() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);

        let first = campus.enroll(&stu, &crs).unwrap();
        campus.decline_enrollment(&first).unwrap();
        campus.enroll(&stu, &crs).unwrap();
    }

    #[test]
    fn enroll_into_full_roster_is_rejected() {
        let mut campus = Campus::new();
        let a = student(&mut campus, "Ada");
        let b = student(&mut campus, "Grace");
        let crs = course(&mut campus, 1);

        let enr_a = campus.enroll(&a, &crs).unwrap();
        campus.approve_enrollment(&enr_a).unwrap();

        let err = campus.enroll(&b, &crs).unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded { .. }));
    }

    #[test]
    fn approval_adds_to_roster_and_back_reference() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);
        let enr = campus.enroll(&stu, &crs).unwrap();

        campus.approve_enrollment(&enr).unwrap();

        let roster = &campus.course(&crs).unwrap().roster;
        assert!(roster.contains(&stu));
        assert!(campus.person(&stu).unwrap().enrolled().unwrap().contains(&crs));
    }

    #[test]
    fn approving_twice_fails_and_roster_grows_at_most_once() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);
        let enr = campus.enroll(&stu, &crs).unwrap();

        campus.approve_enrollment(&enr).unwrap();
        let err = campus.approve_enrollment(&enr).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
        assert_eq!(campus.course(&crs).unwrap().roster.len(), 1);
    }

    #[test]
    fn approval_checks_capacity_when_roster_filled_in_between() {
        let mut campus = Campus::new();
        let a = student(&mut campus, "Ada");
        let b = student(&mut campus, "Grace");
        let crs = course(&mut campus, 1);

        // Both enroll while the roster is empty.
        let enr_a = campus.enroll(&a, &crs).unwrap();
        let enr_b = campus.enroll(&b, &crs).unwrap();

        campus.approve_enrollment(&enr_a).unwrap();
        let err = campus.approve_enrollment(&enr_b).unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded { .. }));

        // B's enrollment stays Pending, roster stays [A].
        assert_eq!(
            campus.enrollment(&enr_b).unwrap().status,
            EnrollmentStatus::Pending
        );
        let roster: Vec<_> = campus.course(&crs).unwrap().roster.iter().collect();
        assert_eq!(roster, [&a]);
    }

    #[test]
    fn decline_leaves_roster_alone_and_is_one_way() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);
        let enr = campus.enroll(&stu, &crs).unwrap();

        campus.decline_enrollment(&enr).unwrap();
        assert!(campus.course(&crs).unwrap().roster.is_empty());

        let err = campus.approve_enrollment(&enr).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
        let err = campus.decline_enrollment(&enr).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
    }

    #[test]
    fn payment_is_recorded_once() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);
        let enr = campus.enroll(&stu, &crs).unwrap();

        campus.record_payment(&enr).unwrap();
        assert_eq!(
            campus.enrollment(&enr).unwrap().payment,
            PaymentStatus::Paid
        );
        let err = campus.record_payment(&enr).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
    }

    // -- assignments ---------------------------------------------------------

    #[test]
    fn add_assignment_links_into_course() {
        let mut campus = Campus::new();
        let crs = course(&mut campus, 5);
        let asn = campus
            .add_assignment(&crs, "hw1", "first homework", due(), 100.0)
            .unwrap();
        assert_eq!(campus.course(&crs).unwrap().assignments, [asn.clone()]);
        assert_eq!(campus.assignment(&asn).unwrap().course, crs);
    }

    #[test]
    fn submission_respects_deadline_and_uniqueness() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);
        let asn = campus.add_assignment(&crs, "hw1", "", due(), 100.0).unwrap();

        let late = due() + chrono::Duration::hours(1);
        let err = campus
            .submit_assignment_at(&asn, &stu, "late answer", late)
            .unwrap_err();
        assert!(matches!(err, DomainError::DeadlinePassed { .. }));

        let on_time = due() - chrono::Duration::days(1);
        campus
            .submit_assignment_at(&asn, &stu, "answer", on_time)
            .unwrap();
        let err = campus
            .submit_assignment_at(&asn, &stu, "again", on_time)
            .unwrap_err();
        assert!(matches!(err, DomainError::AlreadySubmitted { .. }));
    }

    #[test]
    fn grading_requires_a_submission() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);
        let asn = campus.add_assignment(&crs, "hw1", "", due(), 100.0).unwrap();

        let err = campus.grade_submission(&asn, &stu, 50.0).unwrap_err();
        assert!(matches!(err, DomainError::NotSubmitted { .. }));
    }

    #[test]
    fn out_of_range_score_leaves_prior_grade_unchanged() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);
        let asn = campus.add_assignment(&crs, "hw1", "", due(), 100.0).unwrap();
        campus
            .submit_assignment_at(&asn, &stu, "answer", due() - chrono::Duration::days(1))
            .unwrap();

        campus.grade_submission(&asn, &stu, 80.0).unwrap();

        let err = campus.grade_submission(&asn, &stu, 101.0).unwrap_err();
        assert!(matches!(err, DomainError::ScoreOutOfRange { .. }));
        let err = campus.grade_submission(&asn, &stu, -1.0).unwrap_err();
        assert!(matches!(err, DomainError::ScoreOutOfRange { .. }));

        assert_eq!(campus.assignment(&asn).unwrap().score_for(&stu), Some(80.0));

        // A valid regrade overwrites.
        campus.grade_submission(&asn, &stu, 95.0).unwrap();
        assert_eq!(campus.assignment(&asn).unwrap().score_for(&stu), Some(95.0));
    }

    // -- instructors ---------------------------------------------------------

    #[test]
    fn assign_instructor_links_both_ways_and_clears_queue() {
        let mut campus = Campus::new();
        let ins = instructor(&mut campus, "Barbara");
        let other = instructor(&mut campus, "Edsger");
        let crs = course(&mut campus, 5);

        campus.apply_to_course(&ins, &crs).unwrap();
        campus.apply_to_course(&other, &crs).unwrap();

        campus.assign_instructor(&crs, &ins).unwrap();
        let course_ref = campus.course(&crs).unwrap();
        assert_eq!(course_ref.instructor, Some(ins.clone()));
        assert!(course_ref.applications.is_empty());
        assert!(campus.person(&ins).unwrap().assigned().unwrap().contains(&crs));

        let err = campus.assign_instructor(&crs, &other).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyAssigned { .. }));
    }

    #[test]
    fn applications_reject_taken_courses_and_duplicates() {
        let mut campus = Campus::new();
        let ins = instructor(&mut campus, "Barbara");
        let other = instructor(&mut campus, "Edsger");
        let crs = course(&mut campus, 5);

        campus.apply_to_course(&ins, &crs).unwrap();
        let err = campus.apply_to_course(&ins, &crs).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateApplication { .. }));

        campus.assign_instructor(&crs, &ins).unwrap();
        let err = campus.apply_to_course(&other, &crs).unwrap_err();
        assert!(matches!(err, DomainError::CourseTaken { .. }));
    }

    #[test]
    fn students_cannot_take_instructor_roles() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);
        let err = campus.apply_to_course(&stu, &crs).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    // -- course grades -------------------------------------------------------

    #[test]
    fn course_grades_respect_the_ceiling() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let crs = course(&mut campus, 5);

        campus.record_course_grade(&stu, &crs, 87.5).unwrap();
        let err = campus.record_course_grade(&stu, &crs, 101.0).unwrap_err();
        assert!(matches!(err, DomainError::ScoreOutOfRange { .. }));

        let values: Vec<f64> = campus.grades_for_student(&stu).map(|g| g.value).collect();
        assert_eq!(values, [87.5]);
    }

    // -- updates -------------------------------------------------------------

    #[test]
    fn course_capacity_cannot_shrink_below_roster() {
        let mut campus = Campus::new();
        let a = student(&mut campus, "Ada");
        let b = student(&mut campus, "Grace");
        let crs = course(&mut campus, 5);
        for stu in [&a, &b] {
            let enr = campus.enroll(stu, &crs).unwrap();
            campus.approve_enrollment(&enr).unwrap();
        }

        let err = campus
            .update_course(&crs, &[CourseUpdate::Capacity(1)])
            .unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded { .. }));
        assert_eq!(campus.course(&crs).unwrap().capacity, 5);

        campus
            .update_course(
                &crs,
                &[
                    CourseUpdate::Capacity(2),
                    CourseUpdate::Title("Advanced Systems".into()),
                ],
            )
            .unwrap();
        let course_ref = campus.course(&crs).unwrap();
        assert_eq!(course_ref.capacity, 2);
        assert_eq!(course_ref.title, "Advanced Systems");
    }

    #[test]
    fn person_update_respects_email_uniqueness() {
        let mut campus = Campus::new();
        let ada = student(&mut campus, "Ada");
        let _grace = student(&mut campus, "Grace");

        let err = campus
            .update_person(
                &ada,
                &[PersonUpdate::Email("grace.student@platform.com".into())],
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail { .. }));

        // Re-setting one's own email is fine.
        campus
            .update_person(
                &ada,
                &[
                    PersonUpdate::Email("ada.student@platform.com".into()),
                    PersonUpdate::Phone("555-9999".into()),
                ],
            )
            .unwrap();
        assert_eq!(campus.person(&ada).unwrap().phone, "555-9999");
    }

    // -- removal cascades ----------------------------------------------------

    #[test]
    fn removing_a_course_cascades_everywhere() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let ins = instructor(&mut campus, "Barbara");
        let crs = course(&mut campus, 5);

        campus.assign_instructor(&crs, &ins).unwrap();
        let enr = campus.enroll(&stu, &crs).unwrap();
        campus.approve_enrollment(&enr).unwrap();
        let asn = campus.add_assignment(&crs, "hw1", "", due(), 100.0).unwrap();
        campus.record_course_grade(&stu, &crs, 90.0).unwrap();

        campus.remove_course(&crs).unwrap();

        assert!(campus.course(&crs).is_err());
        assert!(campus.assignment(&asn).is_err());
        assert!(campus.enrollment(&enr).is_err());
        assert_eq!(campus.grades().len(), 0);
        assert!(campus.person(&stu).unwrap().enrolled().unwrap().is_empty());
        assert!(campus.person(&ins).unwrap().assigned().unwrap().is_empty());
    }

    #[test]
    fn removing_a_person_detaches_them_from_courses() {
        let mut campus = Campus::new();
        let stu = student(&mut campus, "Ada");
        let ins = instructor(&mut campus, "Barbara");
        let other = instructor(&mut campus, "Edsger");
        let crs = course(&mut campus, 5);
        let other_crs = course(&mut campus, 5);

        campus.assign_instructor(&crs, &ins).unwrap();
        campus.apply_to_course(&other, &other_crs).unwrap();
        let enr = campus.enroll(&stu, &crs).unwrap();
        campus.approve_enrollment(&enr).unwrap();

        campus.remove_person(&stu).unwrap();
        campus.remove_person(&ins).unwrap();
        campus.remove_person(&other).unwrap();

        let course_ref = campus.course(&crs).unwrap();
        assert!(course_ref.roster.is_empty());
        assert_eq!(course_ref.instructor, None);
        assert!(campus.course(&other_crs).unwrap().applications.is_empty());

        // Historical enrollment record survives the removal.
        assert!(campus.enrollment(&enr).is_ok());
    }

    // -- capacity property ---------------------------------------------------

    mod capacity_property {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any interleaving of enroll/approve/decline over a pool of
            /// students keeps every roster within capacity.
            #[test]
            fn roster_never_exceeds_capacity(
                capacity in 0u32..4,
                ops in proptest::collection::vec((0u8..3, 0usize..4), 1..40),
            ) {
                let mut campus = Campus::new();
                let students: Vec<UserId> = ["Ada", "Grace", "Barbara", "Edsger"]
                    .iter()
                    .map(|name| student(&mut campus, name))
                    .collect();
                let crs = course(&mut campus, capacity);

                for (action, idx) in ops {
                    let stu = &students[idx];
                    match action {
                        0 => {
                            let _ = campus.enroll(stu, &crs);
                        }
                        1 | 2 => {
                            let pending: Vec<EnrollmentId> = campus
                                .enrollments()
                                .filter(|e| {
                                    e.student == *stu
                                        && e.status == EnrollmentStatus::Pending
                                })
                                .map(|e| e.id.clone())
                                .collect();
                            for enr in pending {
                                if action == 1 {
                                    let _ = campus.approve_enrollment(&enr);
                                } else {
                                    let _ = campus.decline_enrollment(&enr);
                                }
                            }
                        }
                        _ => unreachable!(),
                    }
                    let roster_len = campus.course(&crs).unwrap().roster.len() as u32;
                    prop_assert!(roster_len <= capacity);
                }
            }
        }
    }
}
