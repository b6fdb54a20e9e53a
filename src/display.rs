use crate::codec::Decoded;
use crate::error::Result;
use crate::model::{Admissions, StudentRow, UniversityId};
use crate::scholarships::Outcome;

fn university_name(a: &Admissions, u: UniversityId) -> String {
    a.university(u)
        .map_or_else(|| format!("University {}", u.0), |u| u.name.clone())
}

fn student_name(a: &Admissions, s: StudentRow) -> String {
    a.student(s)
        .map_or_else(|| format!("Student {}", s.0), |s| s.name.clone())
}

fn yes_no(b: bool) -> &'static str {
    if b { "Yes" } else { "No" }
}

pub fn display_matrix(a: &Admissions) {
    println!("Application matrix:");
    print!("{:<16}", "Student");
    for u in a.all_universities() {
        print!("{:>10}", university_name(a, u));
    }
    println!();
    for s in a.applications.all_students() {
        print!("{:<16}", student_name(a, s));
        for u in a.all_universities() {
            print!("{:>10}", u8::from(a.applications.applied(s, u)));
        }
        println!();
    }
    println!();
}

pub fn display_counts(a: &Admissions) {
    println!("Applications per university:");
    for (u, n) in a.applications.applications_per_university().into_iter().enumerate() {
        println!("  - {}: {n}", university_name(a, UniversityId(u)));
    }
    println!("Applications per student:");
    for (s, n) in a.applications.applications_per_student().into_iter().enumerate() {
        println!("  - {}: {n}", student_name(a, StudentRow(s)));
    }
    println!();
}

pub fn display_first_choices(a: &Admissions) {
    println!("Students who applied to their first choice:");
    for s in a.applied_to_first_choice() {
        println!("  - {}", student_name(a, s));
    }
    println!();
}

pub fn display_student(a: &Admissions, s: StudentRow) -> Result<()> {
    let universities = a.universities_for_student(s)?;
    match a.student(s) {
        Some(st) => {
            println!("Student ID: {}", st.id);
            println!("Name: {}", st.name);
            println!("Exam score: {}", st.exam_score);
            println!(
                "Preferences: {}",
                st.preferences.map(|p| p.to_string()).join(" ")
            );
        }
        None => println!("No student loaded at row {}", s.0),
    }
    println!(
        "Universities applied to: {}",
        universities
            .iter()
            .map(|u| u.0.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!();
    Ok(())
}

pub fn display_university(a: &Admissions, u: UniversityId) -> Result<()> {
    let students = a.students_for_university(u)?;
    println!("University: {}", university_name(a, u));
    if let Some(university) = a.university(u) {
        println!("Location: {}", university.location);
        println!("Available seats: {}", university.available_seats);
    }
    if students.is_empty() {
        println!("No students applied to this university.");
    } else {
        println!("Students who applied:");
        for s in students {
            if let Some(st) = a.student(s) {
                print!("  - {} (score: {}", st.name, st.exam_score);
                if let Some(rank) = st.rank_of(u) {
                    print!(", rank {}", rank + 1);
                }
                println!(")");
            }
        }
    }
    println!();
    Ok(())
}

pub fn display_awards(a: &Admissions, outcomes: &[Outcome]) {
    for outcome in outcomes {
        println!("University: {}", university_name(a, outcome.university));
        match outcome.award {
            Some(award) => {
                println!("Student: {}", student_name(a, award.student));
                println!("Scholarship amount: ${}", award.amount);
                println!("Score: {}", award.score);
            }
            None => println!("No eligible applicants"),
        }
        println!();
    }
}

pub fn display_reloaded(decoded: &Decoded) {
    println!("--- Loaded from binary ---");
    for s in &decoded.students {
        println!(
            "{} | Score: {} | Scholarship: {}",
            s.name,
            s.exam_score,
            yes_no(s.got_scholarship)
        );
    }
    if let Some(error) = &decoded.error {
        println!("Stopped reading: {error}");
    }
    println!();
}

pub fn display_search(a: &Admissions, name: &str) {
    match a.store.row_of(name).and_then(|row| Some((row, a.student(row)?))) {
        Some((row, s)) => {
            println!("Student found:");
            println!("Name: {}", s.name);
            println!("ID: {}", s.id);
            println!("Row: {}", row.0);
            println!("Score: {}", s.exam_score);
            println!("Scholarship status: {}", yes_no(s.got_scholarship));
        }
        None => println!("Student with the name '{name}' not found."),
    }
}
