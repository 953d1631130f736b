//! Per-answer validation. Every rejection carries the message shown before re-prompting.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid input. Please enter an integer.")]
    NotAnInteger,
    #[error("Please enter a number between {min} and {max}.")]
    OutOfRange { min: i64, max: i64 },
    #[error("Please enter 'yes' or 'no'.")]
    NotYesNo,
    #[error("Invalid input. Please enter one of the following: {}.", .options.join(", "))]
    UnknownOption { options: Vec<String> },
    #[error("Invalid date format. Please use the format YYYY-MM-DD")]
    BadDate,
    #[error("Invalid time format. Please use the format HH:MM")]
    BadTime,
    #[error("The second number cannot be the same as the first. Please choose a different number.")]
    Duplicate,
}

pub fn parse_int_in_range(raw: &str, min: i64, max: i64) -> Result<i64, InputError> {
    let value: i64 = raw.trim().parse().map_err(|_| InputError::NotAnInteger)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange { min, max })
    }
}

pub fn parse_yes_no(raw: &str) -> Result<bool, InputError> {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        _ => Err(InputError::NotYesNo),
    }
}

/// Case-insensitive; returns the lowercased answer.
pub fn parse_option(raw: &str, options: &[&str]) -> Result<String, InputError> {
    let answer = raw.trim().to_lowercase();
    if options.iter().any(|o| o.to_lowercase() == answer) {
        Ok(answer)
    } else {
        Err(InputError::UnknownOption {
            options: options.iter().map(|o| o.to_string()).collect(),
        })
    }
}

/// Returns the answer as typed (trimmed) once it parses as a calendar date.
pub fn parse_date(raw: &str) -> Result<String, InputError> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| InputError::BadDate)?;
    Ok(s.to_string())
}

pub fn parse_time(raw: &str) -> Result<String, InputError> {
    let s = raw.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT).map_err(|_| InputError::BadTime)?;
    Ok(s.to_string())
}

pub fn ensure_distinct(first: u8, second: u8) -> Result<[u8; 2], InputError> {
    if first == second {
        Err(InputError::Duplicate)
    } else {
        Ok([first, second])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_range_bounds_are_inclusive() {
        assert_eq!(parse_int_in_range("1", 1, 4), Ok(1));
        assert_eq!(parse_int_in_range(" 4 ", 1, 4), Ok(4));
        assert_eq!(
            parse_int_in_range("5", 1, 4),
            Err(InputError::OutOfRange { min: 1, max: 4 })
        );
        assert_eq!(parse_int_in_range("two", 1, 4), Err(InputError::NotAnInteger));
        assert_eq!(parse_int_in_range("", 1, 4), Err(InputError::NotAnInteger));
    }

    #[test]
    fn yes_no_accepts_short_forms() {
        assert_eq!(parse_yes_no("Y"), Ok(true));
        assert_eq!(parse_yes_no("no"), Ok(false));
        assert_eq!(parse_yes_no("maybe"), Err(InputError::NotYesNo));
    }

    #[test]
    fn option_is_case_insensitive() {
        assert_eq!(parse_option("TWO", &["one", "two", "none"]), Ok("two".into()));
        let err = parse_option("both", &["one", "two", "none"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input. Please enter one of the following: one, two, none."
        );
    }

    #[test]
    fn dates_and_times_must_be_real() {
        assert_eq!(parse_date("2024-01-01"), Ok("2024-01-01".into()));
        assert_eq!(parse_date("2024-02-30"), Err(InputError::BadDate));
        assert_eq!(parse_date("01/01/2024"), Err(InputError::BadDate));
        assert_eq!(parse_time("09:30"), Ok("09:30".into()));
        assert_eq!(parse_time("24:10"), Err(InputError::BadTime));
        assert_eq!(parse_time("9.30"), Err(InputError::BadTime));
    }

    #[test]
    fn distinct_pair() {
        assert_eq!(ensure_distinct(2, 4), Ok([2, 4]));
        assert_eq!(ensure_distinct(1, 1), Err(InputError::Duplicate));
    }
}
