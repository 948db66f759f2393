//! Interactive numbered menu
//!
//! Mutations stay in memory until option 8 saves them. Recoverable errors are
//! printed and the menu is shown again; I/O failures end the shell.

use super::{analytics, parse_field, records, Session};
use campus_registrar::core::analytics::AnalyticsReport;
use campus_registrar::core::RegistrarError;
use campus_registrar::info;
use std::io::{self, BufRead, Write};

const MENU: &str = "
--- Campus Registrar ---
1. List students/courses
2. Add student
3. Add course
4. Enroll student in course
5. Record/update grade
6. Show a student transcript
7. Search
8. Save & backup data
9. Analytics
10. Exit
";

const ANALYTICS_MENU: &str = "1. Top N students by GPA
2. Course fill rates
3. Average grade per course
";

/// Run the shell on the process's stdin and stdout
pub fn run(session: &mut Session) -> Result<(), RegistrarError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(session, &mut stdin.lock(), &mut stdout.lock())
}

/// Run the shell until option 10, `exit`, or end of input
pub fn run_with(
    session: &mut Session,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), RegistrarError> {
    info!("Interactive shell started");
    loop {
        write!(out, "{MENU}")?;
        let Some(choice) = read_prompt(input, out, "Choose an option: ")? else {
            writeln!(out)?;
            return Ok(());
        };

        let result = match choice.as_str() {
            "1" => records::list(session, out),
            "2" => add_student(session, input, out),
            "3" => add_course(session, input, out),
            "4" => enroll(session, input, out),
            "5" => grade(session, input, out),
            "6" => transcript(session, input, out),
            "7" => search(session, input, out),
            "8" => records::save(session, out),
            "9" => run_analytics(session, input, out),
            "10" | "exit" | "quit" => {
                writeln!(out, "Exiting...")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid choice.").map_err(RegistrarError::from),
        };

        if let Err(e) = result {
            if !e.is_recoverable() {
                return Err(e);
            }
            writeln!(out, "✗ {e}")?;
        }
    }
}

/// Print `label`, then read one trimmed line; `None` at end of input
fn read_prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> Result<Option<String>, RegistrarError> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Like [`read_prompt`], but end of input abandons the current action
fn ask(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> Result<String, RegistrarError> {
    read_prompt(input, out, label)?
        .ok_or_else(|| RegistrarError::InvalidInput("unexpected end of input".to_string()))
}

fn add_student(
    session: &mut Session,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), RegistrarError> {
    let id = parse_field("student id", &ask(input, out, "Enter student ID: ")?)?;
    if session.store.student(id).is_some() {
        return Err(RegistrarError::DuplicateKey(format!("Student {id}")));
    }
    let name = ask(input, out, "Enter full name: ")?;
    let year = parse_field("year", &ask(input, out, "Enter year (1-4): ")?)?;
    let gpa = parse_field("GPA", &ask(input, out, "Enter GPA (0.0 - 4.0): ")?)?;
    records::add_student(session, out, id, &name, year, gpa)
}

fn add_course(
    session: &mut Session,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), RegistrarError> {
    let code = ask(input, out, "Enter course code: ")?;
    if session.store.course(&code).is_some() {
        return Err(RegistrarError::DuplicateKey(format!("Course {code}")));
    }
    let title = ask(input, out, "Enter course title: ")?;
    let credits = parse_field("credits", &ask(input, out, "Enter credits: ")?)?;
    let capacity = parse_field("capacity", &ask(input, out, "Enter capacity: ")?)?;
    let prereqs: Vec<String> = ask(input, out, "Enter prereqs (comma separated): ")?
        .split(',')
        .map(str::to_string)
        .collect();
    records::add_course(session, out, &code, &title, credits, capacity, &prereqs)
}

fn enroll(
    session: &mut Session,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), RegistrarError> {
    let id = parse_field("student id", &ask(input, out, "Enter student ID: ")?)?;
    let code = ask(input, out, "Enter course code: ")?;
    records::enroll(session, out, id, &code)
}

fn grade(
    session: &mut Session,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), RegistrarError> {
    let id = parse_field("student id", &ask(input, out, "Enter student ID: ")?)?;
    let code = ask(input, out, "Enter course code: ")?;
    let grade = parse_field("grade", &ask(input, out, "Enter grade (0-100): ")?)?;
    records::grade(session, out, id, &code, grade)
}

fn transcript(
    session: &Session,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), RegistrarError> {
    let id = parse_field("student id", &ask(input, out, "Enter student ID: ")?)?;
    records::show_transcript(session, out, id)
}

fn search(
    session: &Session,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), RegistrarError> {
    let query = ask(input, out, "Enter name or course code: ")?;
    records::find(session, out, &query)
}

fn run_analytics(
    session: &Session,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), RegistrarError> {
    write!(out, "{ANALYTICS_MENU}")?;
    let report: AnalyticsReport = ask(input, out, "Choose: ")?
        .parse()
        .map_err(RegistrarError::InvalidInput)?;
    match report {
        AnalyticsReport::TopStudents => {
            let n = parse_field("N", &ask(input, out, "Enter N: ")?)?;
            analytics::top_students(session, out, n)
        }
        AnalyticsReport::FillRates => analytics::course_fill_rates(session, out),
        AnalyticsReport::AverageGrades => analytics::course_average_grades(session, out),
    }
}
