use std::ops::Index;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses `YYYY-MM-DD HH:MM:SS[.fff] [offset]`. The offset is `+HH:MM`,
/// `-HH:MM` or `Z` and defaults to +00:00 when absent. Fractional seconds
/// are accepted and discarded.
pub fn parse_offset_date_time(buf: &str) -> Result<DateTime<FixedOffset>, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"(\d{4})-(\d{1,2})-(\d{1,2})[ T](\d{1,2}):(\d{1,2}):(\d{1,2})(\.\d{1,3})?\s*(Z|[+-]\d{2}:?\d{2})?"
        ).unwrap();
    }

    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    // We are using the regex approach to make it more flexible
    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;
    let h: u32 = to_u32(caps.index(4))?;
    let mn: u32 = to_u32(caps.index(5))?;
    let s: u32 = to_u32(caps.index(6))?;

    let date = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| format!("Date out of range in {}", buf))?;
    let time = NaiveTime::from_hms_opt(h, mn, s)
        .ok_or_else(|| format!("Time out of range in {}", buf))?;

    let offset = parse_offset(caps.get(8).map(|m| m.as_str()))?;
    offset
        .from_local_datetime(&NaiveDateTime::new(date, time))
        .single()
        .ok_or_else(|| format!("Ambiguous local date time {}", buf))
}

fn parse_offset(matched: Option<&str>) -> Result<FixedOffset, String> {
    let Some(buf) = matched else {
        return Ok(Utc.fix());
    };

    if buf == "Z" {
        return Ok(Utc.fix());
    }

    let sign = if buf.starts_with('-') { -1 } else { 1 };
    let digits: String = buf.chars().filter(|c| c.is_ascii_digit()).collect();
    let hours: i32 = to_int(&digits[0..2], buf)?;
    let minutes: i32 = to_int(&digits[2..4], buf)?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| format!("Timezone offset out of range {}", buf))
}

/// Offset-preserving form used in metadata headers, e.g. `2022-02-24 10:30:00 +09:00`.
pub fn format_header_date(date_time: &DateTime<FixedOffset>) -> String {
    date_time.format("%Y-%m-%d %H:%M:%S %:z").to_string()
}

pub fn format_date_time(date_time: &DateTime<FixedOffset>) -> (String, String) {
    let date = date_time.format("%Y-%m-%d").to_string();
    let time = date_time.format("%H:%M:%S").to_string();
    (date, time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_time_no_offset() {
        let date_time = parse_offset_date_time("2017-09-10 10:42:32.123").unwrap();
        let (date, time) = format_date_time(&date_time);
        assert_eq!(date, "2017-09-10");
        assert_eq!(time, "10:42:32");
        assert_eq!(date_time.offset().local_minus_utc(), 0);

        let date_time = parse_offset_date_time("2017-09-10 10:42:32").unwrap();
        let (date, time) = format_date_time(&date_time);
        assert_eq!(date, "2017-09-10");
        assert_eq!(time, "10:42:32");
    }

    #[test]
    fn test_parse_date_time_with_offset() {
        let date_time = parse_offset_date_time("2022-02-24 10:30:00 +09:00").unwrap();
        assert_eq!(date_time.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(format_header_date(&date_time), "2022-02-24 10:30:00 +09:00");

        let date_time = parse_offset_date_time("2022-02-24 10:30:00 -0330").unwrap();
        assert_eq!(date_time.offset().local_minus_utc(), -(3 * 3600 + 30 * 60));

        let date_time = parse_offset_date_time("2022-02-24T10:30:00Z").unwrap();
        assert_eq!(date_time.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_offset_changes_the_instant() {
        let tokyo = parse_offset_date_time("2022-02-24 10:30:00 +09:00").unwrap();
        let utc = parse_offset_date_time("2022-02-24 01:30:00").unwrap();
        assert_eq!(tokyo, utc);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_offset_date_time("tomorrow at noon").is_err());
        assert!(parse_offset_date_time("2022-13-40 99:00:00").is_err());
    }

    #[test]
    fn test_header_date_round_trip() {
        let original = parse_offset_date_time("2024-02-12 22:54:00 -05:00").unwrap();
        let reparsed = parse_offset_date_time(&format_header_date(&original)).unwrap();
        assert_eq!(original, reparsed);
        assert_eq!(
            original.offset().local_minus_utc(),
            reparsed.offset().local_minus_utc()
        );
    }
}
