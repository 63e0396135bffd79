use chrono::Local;

use crate::core::GenericResult;
use crate::types::Date;

pub fn today() -> Date {
    Local::now().date_naive()
}

pub fn parse_date(date: &str, format: &str) -> GenericResult<Date> {
    Ok(Date::parse_from_str(date, format).map_err(|_| format!(
        "Invalid date: {:?}", date))?)
}

pub fn parse_user_date(date: &str) -> GenericResult<Date> {
    parse_date(date, "%d.%m.%Y")
        .or_else(|_| parse_date(date, "%Y-%m-%d"))
        .or_else(|_| parse_date(date, "%Y.%m.%d"))
}

/// Whole calendar days between the dates. Dates carry no time of day, so the difference is always
/// integral and not affected by DST transitions.
pub fn days_between(start: Date, end: Date) -> i64 {
    (end - start).num_days()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use super::*;

    #[rstest(date, expected,
        case("02.06.2023", date!(2023, 6, 2)),
        case("2023-06-02", date!(2023, 6, 2)),
        case("2023.06.02", date!(2023, 6, 2)),
    )]
    fn user_date_parsing(date: &str, expected: Date) {
        assert_eq!(parse_user_date(date).unwrap(), expected);
    }

    #[rstest(date => ["", "31.02.2023", "2023/06/02", "02.06.23x"])]
    fn invalid_user_date(date: &str) {
        assert!(parse_user_date(date).is_err());
    }

    #[test]
    fn days_over_dst_transition() {
        assert_eq!(days_between(date!(2024, 3, 30), date!(2024, 4, 1)), 2);
        assert_eq!(days_between(date!(2024, 10, 26), date!(2024, 10, 28)), 2);
        assert_eq!(days_between(date!(2024, 1, 1), date!(2025, 1, 1)), 366);
    }
}
