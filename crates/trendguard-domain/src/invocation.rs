use crate::result::ValidationResult;
use regex::Regex;
use std::sync::OnceLock;
use time::Date;
use time::macros::format_description;
use trendguard_types::ids;

/// Validate the requested period and date. Returns true when both are usable.
pub fn check_invocation(
    period: &str,
    date: &str,
    periods: &[String],
    result: &mut ValidationResult,
) -> bool {
    let mut ok = true;

    if !periods.iter().any(|p| p == period) {
        let mut expected: Vec<&str> = periods.iter().map(String::as_str).collect();
        expected.sort_unstable();
        result.error(
            ids::CHECK_REPORT_INVOCATION,
            ids::CODE_INVALID_PERIOD,
            format!(
                "Invalid period: {period}. Expected one of [{}].",
                expected.join(", ")
            ),
        );
        ok = false;
    }

    if !is_calendar_date(date) {
        result.error(
            ids::CHECK_REPORT_INVOCATION,
            ids::CODE_INVALID_DATE,
            format!("Invalid date: {date}. Expected YYYY-MM-DD."),
        );
        ok = false;
    }

    ok
}

/// `YYYY-MM-DD` naming a day that exists.
pub fn is_calendar_date(date: &str) -> bool {
    date_shape_re().is_match(date)
        && Date::parse(date, format_description!("[year]-[month]-[day]")).is_ok()
}

fn date_shape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn periods() -> Vec<String> {
        ["daily", "weekly", "monthly"].map(String::from).to_vec()
    }

    #[test]
    fn accepts_configured_period_and_real_date() {
        let mut r = ValidationResult::new();
        assert!(check_invocation("weekly", "2026-02-17", &periods(), &mut r));
        assert!(r.findings().is_empty());
    }

    #[test]
    fn rejects_unknown_period_with_sorted_choices() {
        let mut r = ValidationResult::new();
        assert!(!check_invocation("yearly", "2026-02-17", &periods(), &mut r));
        assert_eq!(
            r.error_messages(),
            vec!["Invalid period: yearly. Expected one of [daily, monthly, weekly]."]
        );
    }

    #[test]
    fn date_shape_and_calendar() {
        assert!(is_calendar_date("2024-02-29"));
        assert!(!is_calendar_date("2026-02-29"));
        assert!(!is_calendar_date("2026-2-17"));
        assert!(!is_calendar_date("2026-02-17T00:00"));
        assert!(!is_calendar_date("2026-13-01"));
    }
}
