//! Line-oriented input helpers for the menu shell.
//!
//! All free-text parsing happens here: the core only ever receives values
//! already validated as the right primitive type. Prompt helpers re-ask on
//! malformed input and return `None` on end of input.

use std::io::{self, Write};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Prompts and reads one trimmed line. Returns `None` on EOF.
pub fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Prompts until the input parses as a non-negative integer.
pub fn prompt_u32(label: &str) -> Option<u32> {
    loop {
        let line = prompt(label)?;
        match line.parse() {
            Ok(value) => return Some(value),
            Err(_) => println!("Invalid number. Please try again."),
        }
    }
}

/// Prompts until the input parses as a number.
pub fn prompt_f64(label: &str) -> Option<f64> {
    loop {
        let line = prompt(label)?;
        match line.parse() {
            Ok(value) => return Some(value),
            Err(_) => println!("Invalid number. Please try again."),
        }
    }
}

/// Prompts until the input parses as a `YYYY-MM-DD` date.
pub fn prompt_date(label: &str) -> Option<NaiveDate> {
    loop {
        let line = prompt(label)?;
        match parse_date(&line) {
            Some(date) => return Some(date),
            None => println!("Invalid date, expected YYYY-MM-DD."),
        }
    }
}

/// Prompts for a `YYYY-MM-DD` date and returns the end of that day in UTC,
/// which is how assignment deadlines are entered.
pub fn prompt_deadline(label: &str) -> Option<DateTime<Utc>> {
    loop {
        let line = prompt(label)?;
        match parse_deadline(&line) {
            Some(instant) => return Some(instant),
            None => println!("Invalid date, expected YYYY-MM-DD."),
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Parses a `YYYY-MM-DD` date as an end-of-day UTC deadline.
pub fn parse_deadline(text: &str) -> Option<DateTime<Utc>> {
    let date = parse_date(text)?;
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)?;
    Some(Utc.from_utc_datetime(&date.and_time(end_of_day)))
}
