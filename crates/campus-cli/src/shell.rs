//! The interactive menu shell.
//!
//! A text menu over the core: the general menu handles login and sign-up,
//! then hands off to a per-role menu. Every domain failure is printed and
//! the loop continues; nothing here is fatal to the process. The shell owns
//! presentation only -- all validation lives in the rule engine.

use campus_core::course::CourseUpdate;
use campus_core::id::{AssignmentId, CourseId, EnrollmentId, UserId};
use campus_core::person::PersonKind;
use campus_core::{Campus, Course, ScheduleWindow};

use crate::input;

/// Top-level menu loop. Returns when the user exits or input ends.
pub fn general_menu(campus: &mut Campus) {
    loop {
        println!("\n--- General Menu ---");
        println!("1. Login");
        println!("2. Sign Up");
        println!("3. Exit");
        let Some(choice) = input::prompt("Enter your choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => login(campus),
            "2" => sign_up(campus),
            "3" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn login(campus: &mut Campus) {
    let Some(email) = input::prompt("Email: ") else {
        return;
    };
    let Some(password) = input::prompt("Password: ") else {
        return;
    };
    let found = campus
        .authenticate(&email, &password)
        .map(|p| (p.id.clone(), p.kind()));
    match found {
        Some((id, PersonKind::Student)) => student_menu(campus, &id),
        Some((id, PersonKind::Instructor)) => instructor_menu(campus, &id),
        Some((id, PersonKind::Admin)) => admin_menu(campus, &id),
        None => println!("Invalid credentials."),
    }
}

fn sign_up(campus: &mut Campus) {
    println!("Account Type:\n1. Student\n2. Instructor\n3. Admin");
    let Some(choice) = input::prompt("Choose account type (1, 2, or 3): ") else {
        return;
    };
    let kind = match choice.as_str() {
        "1" => PersonKind::Student,
        "2" => PersonKind::Instructor,
        "3" => PersonKind::Admin,
        _ => {
            println!("Invalid account type.");
            return;
        }
    };
    let Some(first_name) = input::prompt("First Name: ") else {
        return;
    };
    let Some(last_name) = input::prompt("Last Name: ") else {
        return;
    };
    let Some(phone) = input::prompt("Phone: ") else {
        return;
    };

    match campus.register_person(kind, &first_name, &last_name, &phone) {
        Ok((id, credentials)) => {
            println!("{} account created!", kind.label());
            println!("Email: {}", credentials.email);
            println!("Password: {}", credentials.password);
            println!("ID: {id}");
        }
        Err(err) => println!("Error: {err}"),
    }
}

// ---------------------------------------------------------------------------
// Student menu
// ---------------------------------------------------------------------------

fn student_menu(campus: &mut Campus, id: &UserId) {
    loop {
        let Ok(person) = campus.person(id) else {
            return;
        };
        println!("\n--- Student Menu ({}) ---", person.full_name());
        println!("1. View Profile");
        println!("2. View All Courses");
        println!("3. Enroll in Course");
        println!("4. View Grades");
        println!("5. View Assignments");
        println!("6. Submit Assignment");
        println!("7. Logout");
        let Some(choice) = input::prompt("Enter your choice: ") else {
            return;
        };
        match choice.as_str() {
            "1" => {
                if let Ok(person) = campus.person(id) {
                    println!("{}", person.profile());
                }
            }
            "2" => list_courses(campus),
            "3" => enroll_in_course(campus, id),
            "4" => view_grades(campus, id),
            "5" => view_assignments(campus),
            "6" => submit_assignment(campus, id),
            "7" => {
                println!("Logging out...");
                return;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn enroll_in_course(campus: &mut Campus, student: &UserId) {
    let Some(raw) = input::prompt("Enter Course ID to enroll: ") else {
        return;
    };
    let course = CourseId(raw);
    let enrollment = match campus.enroll(student, &course) {
        Ok(id) => id,
        Err(err) => {
            println!("Error: {err}");
            return;
        }
    };
    println!("Enrollment created: {enrollment} (status Pending)");

    println!("Choose Payment Method:\n1. PayPal\n2. GCash\n3. Debit Card");
    let Some(choice) = input::prompt("Enter payment option (1, 2, or 3): ") else {
        return;
    };
    if matches!(choice.as_str(), "1" | "2" | "3") {
        match campus.record_payment(&enrollment) {
            Ok(()) => println!("Payment recorded."),
            Err(err) => println!("Error: {err}"),
        }
    } else {
        println!("Payment left pending.");
    }
}

fn view_grades(campus: &Campus, student: &UserId) {
    let mut any = false;
    for grade in campus.grades_for_student(student) {
        any = true;
        let title = campus
            .course(&grade.course)
            .map(|c| c.title.clone())
            .unwrap_or_else(|_| grade.course.to_string());
        println!("Course: {title}, Grade: {}", grade.value);
    }
    if !any {
        println!("No grades found.");
    }
}

fn view_assignments(campus: &Campus) {
    let Some(raw) = input::prompt("Enter Course ID to view assignments: ") else {
        return;
    };
    let course = CourseId(raw);
    if let Err(err) = campus.course(&course) {
        println!("Error: {err}");
        return;
    }
    let mut any = false;
    for assignment in campus.assignments_for_course(&course) {
        any = true;
        println!(
            "{}: {} (due {}, max score {})",
            assignment.id, assignment.title, assignment.due, assignment.max_score
        );
    }
    if !any {
        println!("No assignments found for this course.");
    }
}

fn submit_assignment(campus: &mut Campus, student: &UserId) {
    let Some(raw) = input::prompt("Enter Assignment ID to submit: ") else {
        return;
    };
    let Some(text) = input::prompt("Enter your submission: ") else {
        return;
    };
    match campus.submit_assignment(&AssignmentId(raw), student, &text) {
        Ok(()) => println!("Assignment submitted."),
        Err(err) => println!("Error: {err}"),
    }
}

// ---------------------------------------------------------------------------
// Instructor menu
// ---------------------------------------------------------------------------

fn instructor_menu(campus: &mut Campus, id: &UserId) {
    loop {
        let Ok(person) = campus.person(id) else {
            return;
        };
        println!("\n--- Instructor Menu ({}) ---", person.full_name());
        println!("1. View Profile");
        println!("2. View Available Courses");
        println!("3. Apply to Course");
        println!("4. Add Assignment");
        println!("5. Grade Submission");
        println!("6. Grade Course");
        println!("7. Logout");
        let Some(choice) = input::prompt("Enter your choice: ") else {
            return;
        };
        match choice.as_str() {
            "1" => {
                if let Ok(person) = campus.person(id) {
                    println!("{}", person.profile());
                }
            }
            "2" => list_available_courses(campus),
            "3" => apply_to_course(campus, id),
            "4" => add_assignment(campus),
            "5" => grade_submission(campus),
            "6" => grade_course(campus, id),
            "7" => {
                println!("Logging out...");
                return;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn apply_to_course(campus: &mut Campus, instructor: &UserId) {
    let Some(raw) = input::prompt("Enter Course ID to apply for: ") else {
        return;
    };
    match campus.apply_to_course(instructor, &CourseId(raw)) {
        Ok(()) => println!("Application submitted."),
        Err(err) => println!("Error: {err}"),
    }
}

fn add_assignment(campus: &mut Campus) {
    let Some(raw) = input::prompt("Enter Course ID: ") else {
        return;
    };
    let course = CourseId(raw);
    let Some(title) = input::prompt("Enter Assignment Title: ") else {
        return;
    };
    let Some(description) = input::prompt("Enter Assignment Description: ") else {
        return;
    };
    let Some(due) = input::prompt_deadline("Enter Due Date (YYYY-MM-DD): ") else {
        return;
    };
    let Some(max_score) = input::prompt_f64("Enter Max Score: ") else {
        return;
    };
    match campus.add_assignment(&course, &title, &description, due, max_score) {
        Ok(id) => println!("Assignment added: {id}"),
        Err(err) => println!("Error: {err}"),
    }
}

fn grade_submission(campus: &mut Campus) {
    let Some(assignment) = input::prompt("Enter Assignment ID: ") else {
        return;
    };
    let Some(student) = input::prompt("Enter Student ID to grade: ") else {
        return;
    };
    let Some(score) = input::prompt_f64("Enter Score: ") else {
        return;
    };
    match campus.grade_submission(&AssignmentId(assignment), &UserId(student), score) {
        Ok(()) => println!("Submission graded."),
        Err(err) => println!("Error: {err}"),
    }
}

fn grade_course(campus: &mut Campus, instructor: &UserId) {
    let Some(raw) = input::prompt("Enter Course ID to grade: ") else {
        return;
    };
    let course_id = CourseId(raw);
    let roster: Vec<(UserId, String)> = match campus.course(&course_id) {
        Ok(course) => {
            if course.instructor.as_ref() != Some(instructor) {
                println!("You are not assigned to this course.");
                return;
            }
            course
                .roster
                .iter()
                .map(|id| {
                    let name = campus
                        .person(id)
                        .map(|p| p.full_name())
                        .unwrap_or_else(|_| id.to_string());
                    (id.clone(), name)
                })
                .collect()
        }
        Err(err) => {
            println!("Error: {err}");
            return;
        }
    };
    if roster.is_empty() {
        println!("No students are enrolled in this course.");
        return;
    }

    for (student, name) in roster {
        let Some(value) = input::prompt_f64(&format!("Enter grade for {name}: ")) else {
            return;
        };
        match campus.record_course_grade(&student, &course_id, value) {
            Ok(id) => println!("Grade recorded: {id}"),
            Err(err) => println!("Error: {err}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Admin menu
// ---------------------------------------------------------------------------

fn admin_menu(campus: &mut Campus, id: &UserId) {
    loop {
        let Ok(person) = campus.person(id) else {
            return;
        };
        println!("\n--- Admin Menu ({}) ---", person.full_name());
        println!("1. Create Course");
        println!("2. Update Course");
        println!("3. Drop Course");
        println!("4. View All Users");
        println!("5. Assign Instructor to Course");
        println!("6. Approve/Decline Enrollments");
        println!("7. Drop Student/Instructor");
        println!("8. Logout");
        let Some(choice) = input::prompt("Enter your choice: ") else {
            return;
        };
        match choice.as_str() {
            "1" => create_course(campus),
            "2" => update_course(campus),
            "3" => drop_course(campus),
            "4" => view_all_users(campus),
            "5" => assign_instructor(campus),
            "6" => review_enrollments(campus),
            "7" => drop_person(campus),
            "8" => {
                println!("Logging out...");
                return;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn create_course(campus: &mut Campus) {
    let Some(title) = input::prompt("Course Title: ") else {
        return;
    };
    let Some(description) = input::prompt("Description: ") else {
        return;
    };
    let Some(capacity) = input::prompt_u32("Capacity: ") else {
        return;
    };
    let Some(start) = input::prompt_date("Start Date (YYYY-MM-DD): ") else {
        return;
    };
    let Some(end) = input::prompt_date("End Date (YYYY-MM-DD): ") else {
        return;
    };
    if end < start {
        println!("Error: end date is before start date.");
        return;
    }
    match campus.add_course(&title, &description, capacity, ScheduleWindow { start, end }) {
        Ok(id) => println!("Course created: {id}"),
        Err(err) => println!("Error: {err}"),
    }
}

fn update_course(campus: &mut Campus) {
    let Some(raw) = input::prompt("Enter Course ID to update: ") else {
        return;
    };
    let course = CourseId(raw);
    println!("Field:\n1. Title\n2. Description\n3. Capacity\n4. Schedule\n5. Grade Ceiling");
    let Some(choice) = input::prompt("Choose a field: ") else {
        return;
    };
    let update = match choice.as_str() {
        "1" => {
            let Some(title) = input::prompt("New Title: ") else {
                return;
            };
            CourseUpdate::Title(title)
        }
        "2" => {
            let Some(description) = input::prompt("New Description: ") else {
                return;
            };
            CourseUpdate::Description(description)
        }
        "3" => {
            let Some(capacity) = input::prompt_u32("New Capacity: ") else {
                return;
            };
            CourseUpdate::Capacity(capacity)
        }
        "4" => {
            let Some(start) = input::prompt_date("Start Date (YYYY-MM-DD): ") else {
                return;
            };
            let Some(end) = input::prompt_date("End Date (YYYY-MM-DD): ") else {
                return;
            };
            if end < start {
                println!("Error: end date is before start date.");
                return;
            }
            CourseUpdate::Schedule(ScheduleWindow { start, end })
        }
        "5" => {
            let Some(ceiling) = input::prompt_f64("New Grade Ceiling: ") else {
                return;
            };
            CourseUpdate::GradeCeiling(ceiling)
        }
        _ => {
            println!("Invalid choice.");
            return;
        }
    };
    match campus.update_course(&course, &[update]) {
        Ok(()) => println!("Course updated."),
        Err(err) => println!("Error: {err}"),
    }
}

fn drop_course(campus: &mut Campus) {
    let Some(raw) = input::prompt("Enter Course ID to drop: ") else {
        return;
    };
    match campus.remove_course(&CourseId(raw)) {
        Ok(course) => println!("Course '{}' removed.", course.title),
        Err(err) => println!("Error: {err}"),
    }
}

fn view_all_users(campus: &Campus) {
    if campus.users().is_empty() {
        println!("No users found.");
        return;
    }
    println!("\n--- All Users ---");
    for (id, person) in campus.users().iter() {
        println!(
            "ID: {id}, Name: {}, Type: {}",
            person.full_name(),
            person.kind().label()
        );
    }
}

fn assign_instructor(campus: &mut Campus) {
    let Some(raw) = input::prompt("Enter Course ID: ") else {
        return;
    };
    let course_id = CourseId(raw);
    let applications: Vec<String> = match campus.course(&course_id) {
        Ok(course) => course
            .applications
            .iter()
            .map(|id| {
                let name = campus
                    .person(id)
                    .map(|p| p.full_name())
                    .unwrap_or_else(|_| id.to_string());
                format!("Instructor ID: {id}, Name: {name}")
            })
            .collect(),
        Err(err) => {
            println!("Error: {err}");
            return;
        }
    };
    if applications.is_empty() {
        println!("No applications for this course.");
    } else {
        println!("--- Applications ---");
        for line in applications {
            println!("{line}");
        }
    }

    let Some(raw) = input::prompt("Enter Instructor ID to assign: ") else {
        return;
    };
    match campus.assign_instructor(&course_id, &UserId(raw)) {
        Ok(()) => println!("Instructor assigned."),
        Err(err) => println!("Error: {err}"),
    }
}

fn review_enrollments(campus: &mut Campus) {
    let Some(raw) = input::prompt("Enter Course ID to manage enrollments: ") else {
        return;
    };
    let course_id = CourseId(raw);
    if let Err(err) = campus.course(&course_id) {
        println!("Error: {err}");
        return;
    }
    let listing: Vec<String> = campus
        .enrollments_for_course(&course_id)
        .map(|e| {
            let name = campus
                .person(&e.student)
                .map(|p| p.full_name())
                .unwrap_or_else(|_| e.student.to_string());
            format!(
                "Enrollment ID: {}, Student: {name}, Status: {}, Payment: {}",
                e.id, e.status, e.payment
            )
        })
        .collect();
    if listing.is_empty() {
        println!("No enrollments found for this course.");
        return;
    }
    for line in listing {
        println!("{line}");
    }

    println!("Options:\n1. Approve Enrollment\n2. Decline Enrollment");
    let Some(choice) = input::prompt("Choose an option: ") else {
        return;
    };
    let Some(raw) = input::prompt("Enter Enrollment ID: ") else {
        return;
    };
    let enrollment = EnrollmentId(raw);
    let result = match choice.as_str() {
        "1" => campus.approve_enrollment(&enrollment),
        "2" => campus.decline_enrollment(&enrollment),
        _ => {
            println!("Invalid option.");
            return;
        }
    };
    match result {
        Ok(()) => println!("Enrollment updated."),
        Err(err) => println!("Error: {err}"),
    }
}

fn drop_person(campus: &mut Campus) {
    let Some(raw) = input::prompt("Enter User ID: ") else {
        return;
    };
    match campus.remove_person(&UserId(raw)) {
        Ok(person) => println!("{} '{}' removed.", person.kind().label(), person.full_name()),
        Err(err) => println!("Error: {err}"),
    }
}

// ---------------------------------------------------------------------------
// Shared listings
// ---------------------------------------------------------------------------

fn list_courses(campus: &Campus) {
    if campus.courses().is_empty() {
        println!("No courses available.");
        return;
    }
    for (_, course) in campus.courses().iter() {
        print_course(campus, course);
    }
}

fn list_available_courses(campus: &Campus) {
    let mut any = false;
    for course in campus.available_courses() {
        any = true;
        print_course(campus, course);
    }
    if !any {
        println!("No available courses at the moment.");
    }
}

fn print_course(campus: &Campus, course: &Course) {
    let instructor = course
        .instructor
        .as_ref()
        .and_then(|id| campus.person(id).ok())
        .map(|p| p.full_name())
        .unwrap_or_else(|| "None".to_string());
    println!(
        "{}: {} ({} - {}) | Instructor: {} | Enrolled: {}/{}",
        course.id,
        course.title,
        course.schedule.start,
        course.schedule.end,
        instructor,
        course.roster.len(),
        course.capacity
    );
}
