//! Locale-aware value parsing for German portal pages
//!
//! Grades use a decimal comma (`1,3`) and dates are `dd.mm.yy HH:MM`.
//! Anything that doesn't parse becomes `None`; placeholder text such as
//! "noch nicht gesetzt" is routine on these pages.

use chrono::NaiveDateTime;

pub const TIMESTAMP_FORMAT: &str = "%d.%m.%y %H:%M";

/// Parses a grade cell, converting the decimal comma.
#[must_use]
pub fn parse_grade(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|grade| grade.is_finite())
}

/// Joins a date cell and a time cell and parses them as `dd.mm.yy HH:MM`.
#[must_use]
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let combined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&combined, TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("1,3", Some(1.3))]
    #[case(" 2,0 ", Some(2.0))]
    #[case("4", Some(4.0))]
    #[case("1.7", Some(1.7))]
    #[case("noch nicht gesetzt", None)]
    #[case("b", None)]
    #[case("", None)]
    #[case("1.234,5", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    fn test_grades(#[case] cell: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_grade(cell), expected);
    }

    #[test]
    fn test_timestamp_parses_two_digit_year() {
        let expected = NaiveDate::from_ymd_opt(2022, 6, 30)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(parse_timestamp("30.06.22", "14:05"), Some(expected));
        assert_eq!(parse_timestamp(" 30.06.22 ", "14:05\n"), Some(expected));
    }

    #[rstest]
    #[case("30.06.2022x", "14:05")]
    #[case("", "")]
    #[case("30.06.22", "")]
    #[case("31.02.22", "10:00")]
    #[case("30.06.22", "25:00")]
    #[case("2022-06-30", "14:05")]
    fn test_malformed_timestamps_are_absent(#[case] date: &str, #[case] time: &str) {
        assert_eq!(parse_timestamp(date, time), None);
    }

    proptest! {
        #[test]
        fn test_comma_decimals_match_dot_decimals(whole in 0u32..10, frac in 0u32..100) {
            let with_comma = format!("{whole},{frac}");
            let with_dot: f64 = format!("{whole}.{frac}").parse().unwrap();
            prop_assert_eq!(parse_grade(&with_comma), Some(with_dot));
        }

        #[test]
        fn test_text_without_digits_is_never_a_grade(text in "[a-zA-Z ]{0,20}") {
            // "inf"/"nan" spellings are rejected as non-finite
            prop_assert_eq!(parse_grade(&text), None);
        }

        #[test]
        fn test_valid_instants_round_trip(day in 1u32..=28, month in 1u32..=12, year in 0i32..=68, hour in 0u32..24, minute in 0u32..60) {
            let date = format!("{day:02}.{month:02}.{year:02}");
            let time = format!("{hour:02}:{minute:02}");
            let expected = NaiveDate::from_ymd_opt(2000 + year, month, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            prop_assert_eq!(parse_timestamp(&date, &time), Some(expected));
        }
    }
}
