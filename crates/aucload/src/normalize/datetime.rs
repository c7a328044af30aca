//! Timestamp normalization.
//!
//! Archive timestamps look like `Dec-06-01 06:44:54`.  The relations store
//! them as `2001-12-06 06:44:54`, which sorts chronologically under plain
//! string comparison and loads into an SQL `TIMESTAMP` column without a
//! format clause.

use thiserror::Error as ThisError;

/// A timestamp that does not have the `Mon-DD-YY HH:MM:SS` shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum TimestampError {
    /// No space between the date and time portions.
    #[error("no space between date and time")]
    MissingTimeSeparator,

    /// The date portion does not have three hyphen-separated parts.
    #[error("date is not of the form Mon-DD-YY")]
    MalformedDate,
}

/// Rewrites `Mon-DD-YY HH:MM:SS` as `YYYY-MM-DD HH:MM:SS`.
///
/// Two-digit years are assumed to fall in the 2000s.  Only the shape is
/// checked: an unrecognized month abbreviation and out-of-range day or time
/// digits pass through untouched rather than failing the record.
pub fn normalize_datetime(value: &str) -> Result<String, TimestampError> {
    let value = value.trim();
    let (date, time) = value
        .split_once(' ')
        .ok_or(TimestampError::MissingTimeSeparator)?;
    let mut parts = date.split('-');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TimestampError::MalformedDate);
    };
    Ok(format!("20{year}-{}-{day} {time}", month_number(month)))
}

/// Maps a three-letter month abbreviation to its two-digit number.  Anything
/// unrecognized is passed through verbatim.
fn month_number(month: &str) -> &str {
    match month {
        "Jan" => "01",
        "Feb" => "02",
        "Mar" => "03",
        "Apr" => "04",
        "May" => "05",
        "Jun" => "06",
        "Jul" => "07",
        "Aug" => "08",
        "Sep" => "09",
        "Oct" => "10",
        "Nov" => "11",
        "Dec" => "12",
        other => other,
    }
}
