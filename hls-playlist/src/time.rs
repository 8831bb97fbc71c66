//! `EXT-X-PROGRAM-DATE-TIME` timestamp parsing.

use chrono::{DateTime, FixedOffset, ParseResult, SecondsFormat};

/// Parses ISO 8601 timestamps with a `Z`, `±HH:MM`, `±HHMM` or `±HH` zone
/// and optional fractional seconds.
pub fn full_time_parse(value: &str) -> ParseResult<DateTime<FixedOffset>> {
    let value = value.trim();
    match split_zone(value) {
        Some((datetime, zone)) => {
            DateTime::parse_from_rfc3339(&format!("{}{}", datetime, normalize_zone(zone)))
        }
        // let chrono report the malformed input
        None => DateTime::parse_from_rfc3339(value),
    }
}

/// Parses RFC 3339 timestamps only, i.e. a `Z` or `±HH:MM` zone.
pub fn strict_time_parse(value: &str) -> ParseResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim())
}

pub(crate) fn format_time(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Splits `2006-01-02T15:04:05+0100` into the local part and the zone.
fn split_zone(value: &str) -> Option<(&str, &str)> {
    let time_start = value.find(['T', 't'])?;
    if value.ends_with(['Z', 'z']) {
        return Some(value.split_at(value.len() - 1));
    }
    let zone_start = value[time_start..].rfind(['+', '-'])? + time_start;
    Some(value.split_at(zone_start))
}

fn normalize_zone(zone: &str) -> String {
    if zone.eq_ignore_ascii_case("z") {
        return "Z".to_owned();
    }

    let (sign, digits) = zone.split_at(1);
    let digits = digits.replace(':', "");
    if !digits.bytes().all(|x| x.is_ascii_digit()) {
        return zone.to_owned();
    }
    match digits.len() {
        2 => format!("{}{}:00", sign, digits),
        4 => format!("{}{}:{}", sign, &digits[..2], &digits[2..]),
        _ => zone.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::{format_time, full_time_parse, strict_time_parse};

    const FULL: &[&str] = &[
        "2006-01-02T15:04:05Z",
        "2006-01-02T15:04:05.123456789Z",
        "2006-01-02T15:04:05+01:00",
        "2006-01-02T15:04:05+0100",
        "2006-01-02T15:04:05+01",
        "2006-01-02T15:04:05-01:00",
        "2006-01-02T15:04:05-0100",
        "2006-01-02T15:04:05-01",
    ];

    #[test]
    fn full_parse_accepts_iso_zone_forms() {
        for value in FULL {
            let parsed = full_time_parse(value).unwrap();
            assert_eq!(parsed.year(), 2006);
            assert_eq!(parsed.hour(), 15);
        }

        let parsed = full_time_parse("2006-01-02T15:04:05-0130").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), -(3600 + 1800));
        assert_eq!(
            full_time_parse("2006-01-02T15:04:05.123456789Z")
                .unwrap()
                .nanosecond(),
            123456789
        );
    }

    #[test]
    fn strict_parse_accepts_rfc3339_only() {
        for value in &FULL[..2] {
            strict_time_parse(value).unwrap();
        }
        strict_time_parse("2006-01-02T15:04:05+01:00").unwrap();
        strict_time_parse("2006-01-02T15:04:05-01:00").unwrap();

        assert!(strict_time_parse("2006-01-02T15:04:05+01").is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(full_time_parse("yesterday").is_err());
        assert!(full_time_parse("2006-01-02").is_err());
    }

    #[test]
    fn non_ascii_zone_is_rejected() {
        assert!(full_time_parse("2006-01-02T15:04:05+a€").is_err());
        assert!(full_time_parse("2006-01-02T15:04:05+€1").is_err());
        assert!(full_time_parse("2006-01-02T15:04:05-0x").is_err());
    }

    #[test]
    fn format_keeps_offset_and_uses_z_for_utc() {
        let parsed = strict_time_parse("2018-12-31T09:47:22+08:00").unwrap();
        assert_eq!(format_time(&parsed), "2018-12-31T09:47:22+08:00");

        let parsed = strict_time_parse("2006-01-02T15:04:05.125Z").unwrap();
        assert_eq!(format_time(&parsed), "2006-01-02T15:04:05.125Z");
    }
}
