use chrono::{NaiveDate, NaiveDateTime};
use nom::{
    IResult,
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{all_consuming, map_res},
    sequence::tuple,
};

/// The one date/time literal convention used on the command line and in the
/// data file.
///
/// Input literals look like `2/12/2024 1800`: day and month take one or two
/// digits, the year exactly four, then a single space and a 24-hour `HHmm`
/// time with no separator. Anything else is rejected. The convention is fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateTimeFormat;

impl DateTimeFormat {
    const PATTERN: &'static str = "d/M/yyyy HHmm";
    const ENCODE_FMT: &'static str = "%-d/%-m/%Y %H%M";
    const DISPLAY_FMT: &'static str = "%b %d %Y %H:%M";

    /// Human-readable label of the accepted input pattern.
    pub fn pattern(&self) -> &'static str {
        Self::PATTERN
    }

    /// Decode a literal, returning `None` on any deviation from the pattern
    /// or on a calendar-invalid value (`31/2/2024`, `2400`, `1260`).
    pub fn decode(&self, literal: &str) -> Option<NaiveDateTime> {
        let (_, (day, _, month, _, year, _, hour, minute)) = all_consuming(tuple((
            day_or_month,
            char('/'),
            day_or_month,
            char('/'),
            year,
            char(' '),
            two_digits,
            two_digits,
        )))(literal)
        .ok()?;

        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
    }

    /// Render back into the input literal form, e.g. `2/12/2024 2359`.
    pub fn encode(&self, value: NaiveDateTime) -> String {
        value.format(Self::ENCODE_FMT).to_string()
    }

    /// Render for people, e.g. `Dec 02 2024 23:59`.
    pub fn display(&self, value: NaiveDateTime) -> String {
        value.format(Self::DISPLAY_FMT).to_string()
    }
}

fn day_or_month(input: &str) -> IResult<&str, u32> {
    map_res(take_while_m_n(1, 2, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u32>()
    })(input)
}

fn year(input: &str) -> IResult<&str, i32> {
    map_res(take_while_m_n(4, 4, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<i32>()
    })(input)
}

fn two_digits(input: &str) -> IResult<&str, u32> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u32>()
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_decodes_single_and_double_digit_fields() {
        let format = DateTimeFormat::default();
        assert_eq!(format.decode("15/8/2024 0930"), Some(at(2024, 8, 15, 9, 30)));
        assert_eq!(format.decode("2/12/2024 1800"), Some(at(2024, 12, 2, 18, 0)));
        assert_eq!(format.decode("02/03/2024 0000"), Some(at(2024, 3, 2, 0, 0)));
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        let format = DateTimeFormat::default();
        for literal in [
            "tomorrow",
            "2/12/24 1800",
            "2-12-2024 1800",
            "2/12/2024 18:00",
            "2/12/2024 600",
            "2/12/2024 6pm",
            "2/12/2024  1800",
            "2/12/2024 1800 extra",
            " 2/12/2024 1800",
            "123/1/2024 1800",
            "2/12/2024",
            "",
        ] {
            assert_eq!(format.decode(literal), None, "{literal:?} should not decode");
        }
    }

    #[test]
    fn test_rejects_impossible_calendar_values() {
        let format = DateTimeFormat::default();
        assert_eq!(format.decode("31/2/2024 1200"), None);
        assert_eq!(format.decode("1/13/2024 1200"), None);
        assert_eq!(format.decode("1/1/2024 2400"), None);
        assert_eq!(format.decode("1/1/2024 1260"), None);
        assert!(format.decode("29/2/2024 1200").is_some());
    }

    #[test]
    fn test_encode_matches_input_form() {
        let format = DateTimeFormat::default();
        let value = at(2024, 12, 2, 23, 59);
        assert_eq!(format.encode(value), "2/12/2024 2359");
        assert_eq!(format.decode(&format.encode(value)), Some(value));
        assert_eq!(format.display(value), "Dec 02 2024 23:59");
        assert_eq!(format.pattern(), "d/M/yyyy HHmm");
    }
}
