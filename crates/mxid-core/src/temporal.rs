//! # Temporal Helpers — YYMMDD Segments
//!
//! RFC and CURP embed a birth or foundation date as a six-digit `YYMMDD`
//! segment. Validation re-parses the segment as a real calendar date, so
//! month 13 and day 32 are rejected, and February 29 is accepted only when
//! one of the two candidate centuries makes it a leap day.
//!
//! The segment carries no century. Resolving one needs a reference date
//! supplied by the caller; nothing here reads the clock.

use chrono::{Datelike, NaiveDate};

use crate::error::GenerationError;

/// Split a `YYMMDD` segment into `(yy, mm, dd)` if it is six ASCII digits.
pub fn split_yymmdd(segment: &str) -> Option<(u32, u32, u32)> {
    if segment.len() != 6 || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy = segment[0..2].parse().ok()?;
    let mm = segment[2..4].parse().ok()?;
    let dd = segment[4..6].parse().ok()?;
    Some((yy, mm, dd))
}

/// Whether `segment` is a calendar date in the 1900s or the 2000s.
pub fn is_valid_yymmdd(segment: &str) -> bool {
    let Some((yy, mm, dd)) = split_yymmdd(segment) else {
        return false;
    };
    [1900, 2000]
        .iter()
        .any(|century| NaiveDate::from_ymd_opt(century + yy as i32, mm, dd).is_some())
}

/// Resolve a `YYMMDD` segment to the latest date not after `reference`.
///
/// Returns `None` if the segment is not a date in either century or if both
/// candidates lie after `reference`.
pub fn resolve_yymmdd(segment: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let (yy, mm, dd) = split_yymmdd(segment)?;
    [2000, 1900]
        .iter()
        .filter_map(|century| NaiveDate::from_ymd_opt(century + yy as i32, mm, dd))
        .find(|d| *d <= reference)
}

/// Resolve a `YYMMDD` segment in an explicit century (`1900` or `2000`).
pub fn date_in_century(segment: &str, century: i32) -> Option<NaiveDate> {
    let (yy, mm, dd) = split_yymmdd(segment)?;
    NaiveDate::from_ymd_opt(century + yy as i32, mm, dd)
}

/// Render `date` as the six-digit `YYMMDD` segment.
pub fn format_yymmdd(date: NaiveDate) -> String {
    format!("{:02}{:02}{:02}", date.year().rem_euclid(100), date.month(), date.day())
}

/// Accepted textual date layouts for generator input.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Parse a generator date field.
///
/// Accepts ISO `YYYY-MM-DD` as well as `DD/MM/YYYY` and `DD-MM-YYYY`.
///
/// # Errors
///
/// Returns [`GenerationError::MissingField`] for blank input and
/// [`GenerationError::InvalidDate`] when no layout matches.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, GenerationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::MissingField(field));
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| GenerationError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn valid_segments() {
        assert!(is_valid_yymmdd("561231"));
        assert!(is_valid_yymmdd("900515"));
        assert!(is_valid_yymmdd("000229")); // 2000 is a leap year
    }

    #[test]
    fn invalid_segments() {
        assert!(!is_valid_yymmdd("561331")); // month 13
        assert!(!is_valid_yymmdd("560132")); // day 32
        assert!(!is_valid_yymmdd("010229")); // neither 1901 nor 2001 is leap
        assert!(!is_valid_yymmdd("56123"));
        assert!(!is_valid_yymmdd("5612A1"));
    }

    #[test]
    fn resolve_prefers_latest_past_century() {
        let today = ymd(2026, 10, 18);
        assert_eq!(resolve_yymmdd("561231", today), Some(ymd(1956, 12, 31)));
        assert_eq!(resolve_yymmdd("090909", today), Some(ymd(2009, 9, 9)));
        assert_eq!(resolve_yymmdd("261019", today), Some(ymd(1926, 10, 19)));
    }

    #[test]
    fn explicit_century() {
        assert_eq!(date_in_century("900515", 1900), Some(ymd(1990, 5, 15)));
        assert_eq!(date_in_century("050101", 2000), Some(ymd(2005, 1, 1)));
    }

    #[test]
    fn format_pads_each_part() {
        assert_eq!(format_yymmdd(ymd(2009, 9, 9)), "090909");
        assert_eq!(format_yymmdd(ymd(1956, 12, 31)), "561231");
    }

    #[test]
    fn parse_date_layouts() {
        assert_eq!(parse_date("birth_date", "1990-05-15").unwrap(), ymd(1990, 5, 15));
        assert_eq!(parse_date("birth_date", "15/05/1990").unwrap(), ymd(1990, 5, 15));
        assert_eq!(parse_date("birth_date", " 15-05-1990 ").unwrap(), ymd(1990, 5, 15));
    }

    #[test]
    fn parse_date_errors() {
        assert_eq!(
            parse_date("birth_date", "  "),
            Err(GenerationError::MissingField("birth_date"))
        );
        assert!(matches!(
            parse_date("birth_date", "1990-13-01"),
            Err(GenerationError::InvalidDate { field: "birth_date", .. })
        ));
    }
}
