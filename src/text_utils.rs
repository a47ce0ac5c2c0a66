use chrono::NaiveDate;

use crate::post::DATE_FORMAT;

/// Formats a stored `YYYY-MM-DD` date for display, e.g. `June 1, 2022`.
/// Anything unparseable is echoed back so a page render never fails on a
/// date.
pub fn format_display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(parsed) => parsed.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2022-06-01"), "June 1, 2022");
        assert_eq!(format_display_date("2021-01-01"), "January 1, 2021");
        assert_eq!(format_display_date("2020-12-25"), "December 25, 2020");
    }

    #[test]
    fn test_format_display_date_passthrough() {
        assert_eq!(format_display_date("error"), "error");
        assert_eq!(format_display_date(""), "");
    }
}
