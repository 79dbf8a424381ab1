//! Lenient date parsing and display formatting

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::FormatError;

/// How `format_date` renders a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `2024-03-09`
    #[default]
    Date,
    /// `2024-03-09 4:05pm UTC`
    DateTime,
}

/// Parse a unix timestamp, RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` value
pub fn parse_date(input: &str) -> Result<OffsetDateTime, FormatError> {
    let input = input.trim();
    let invalid = || FormatError::InvalidDate(input.to_string());

    if let Ok(timestamp) = input.parse::<i64>() {
        return OffsetDateTime::from_unix_timestamp(timestamp).map_err(|_| invalid());
    }

    if let Ok(parsed) = OffsetDateTime::parse(input, &Rfc3339) {
        return Ok(parsed);
    }

    let datetime = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    if let Ok(parsed) = PrimitiveDateTime::parse(input, datetime) {
        return Ok(parsed.assume_utc());
    }

    let date = format_description!("[year]-[month]-[day]");
    Date::parse(input, date)
        .map(|d| d.midnight().assume_utc())
        .map_err(|_| invalid())
}

/// Parse an optional date; a missing value is only accepted when `allow_null`
pub fn parse_optional_date(
    input: Option<&str>,
    allow_null: bool,
) -> Result<Option<OffsetDateTime>, FormatError> {
    match input.filter(|s| !s.is_empty()) {
        Some(value) => parse_date(value).map(Some),
        None if allow_null => Ok(None),
        None => Err(FormatError::MissingDate),
    }
}

/// First 10 characters (`YYYY-MM-DD`) of a date string
pub fn ten_digit_date(
    input: Option<&str>,
    allow_null: bool,
) -> Result<Option<String>, FormatError> {
    match input.filter(|s| !s.is_empty()) {
        Some(value) => value
            .get(..10)
            .map(|prefix| Some(prefix.to_string()))
            .ok_or_else(|| FormatError::InvalidDate(value.to_string())),
        None if allow_null => Ok(None),
        None => Err(FormatError::MissingDate),
    }
}

/// Render a date in the viewer's offset. Unparseable or missing input renders nothing.
pub fn format_date(input: Option<&str>, style: DateStyle, offset: UtcOffset) -> Option<String> {
    let parsed = parse_optional_date(input, true).ok().flatten()?;
    format_datetime(parsed, style, offset)
}

/// Render an already-parsed date in the viewer's offset
pub fn format_datetime(
    value: OffsetDateTime,
    style: DateStyle,
    offset: UtcOffset,
) -> Option<String> {
    let local = value.to_offset(offset);

    match style {
        DateStyle::Date => local
            .format(format_description!("[year]-[month]-[day]"))
            .ok(),
        DateStyle::DateTime => {
            let date = local
                .format(format_description!("[year]-[month]-[day]"))
                .ok()?;
            let minute = local.format(format_description!("[minute]")).ok()?;
            let (hour, meridiem) = match local.hour() {
                0 => (12, "am"),
                h @ 1..=11 => (h, "am"),
                12 => (12, "pm"),
                h => (h - 12, "pm"),
            };
            Some(format!(
                "{} {}:{}{} {}",
                date,
                hour,
                minute,
                meridiem,
                offset_label(offset)
            ))
        }
    }
}

fn offset_label(offset: UtcOffset) -> String {
    if offset.is_utc() {
        return "UTC".to_string();
    }

    let (hours, minutes, _) = offset.as_hms();
    let sign = if offset.is_negative() { '-' } else { '+' };
    format!("{}{:02}:{:02}", sign, hours.abs(), minutes.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("0").unwrap(), datetime!(1970-01-01 0:00 UTC));
        assert_eq!(
            parse_date("2024-03-09").unwrap(),
            datetime!(2024-03-09 0:00 UTC)
        );
        assert_eq!(
            parse_date("2024-03-09 16:05:00").unwrap(),
            datetime!(2024-03-09 16:05 UTC)
        );
        assert_eq!(
            parse_date("2024-03-09T16:05:00+02:00").unwrap(),
            datetime!(2024-03-09 14:05 UTC)
        );
        assert!(matches!(
            parse_date("next tuesday"),
            Err(FormatError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None, true).unwrap(), None);
        assert_eq!(parse_optional_date(Some(""), true).unwrap(), None);
        assert_eq!(
            parse_optional_date(None, false),
            Err(FormatError::MissingDate)
        );
        assert!(parse_optional_date(Some("2024-01-01"), false)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_ten_digit_date() {
        assert_eq!(
            ten_digit_date(Some("2024-03-09 16:05:00"), false).unwrap(),
            Some("2024-03-09".to_string())
        );
        assert_eq!(ten_digit_date(Some(""), true).unwrap(), None);
        assert_eq!(ten_digit_date(None, false), Err(FormatError::MissingDate));
        assert!(matches!(
            ten_digit_date(Some("2024-3-9"), false),
            Err(FormatError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(Some("2024-03-09 16:05:00"), DateStyle::Date, UtcOffset::UTC),
            Some("2024-03-09".to_string())
        );
        assert_eq!(
            format_date(Some("2024-03-09 16:05:00"), DateStyle::DateTime, UtcOffset::UTC),
            Some("2024-03-09 4:05pm UTC".to_string())
        );
        assert_eq!(
            format_date(Some("2024-03-09 00:30:00"), DateStyle::DateTime, UtcOffset::UTC),
            Some("2024-03-09 12:30am UTC".to_string())
        );
        assert_eq!(format_date(None, DateStyle::Date, UtcOffset::UTC), None);
        assert_eq!(format_date(Some("garbage"), DateStyle::Date, UtcOffset::UTC), None);
    }

    #[test]
    fn test_format_date_with_offset() {
        assert_eq!(
            format_date(Some("2024-03-09 02:00:00"), DateStyle::Date, offset!(-5)),
            Some("2024-03-08".to_string())
        );
        assert_eq!(
            format_date(Some("2024-03-09 02:00:00"), DateStyle::DateTime, offset!(+5:30)),
            Some("2024-03-09 7:30am +05:30".to_string())
        );
    }
}
