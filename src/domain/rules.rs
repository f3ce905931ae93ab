//! Normalization and eligibility rules applied on the write path.

use chrono::{Datelike, NaiveDate};

use super::DomainError;

pub const MINIMUM_CUSTOMER_AGE: i32 = 13;
pub const MAX_COPIES_IN_STOCK: i32 = 20;

pub const STATUS_PROCESSING: &str = "PROCESSING";
pub const STATUS_COMPLETED: &str = "COMPLETED";

/// Names of customers, movies and genres are stored upper-cased.
pub fn normalize_name(name: &str) -> String {
    name.to_uppercase()
}

/// Whole years elapsed between `birthdate` and `today`.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    years
}

pub fn validate_customer_age(
    birthdate: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<NaiveDate, DomainError> {
    let birthdate =
        birthdate.ok_or_else(|| DomainError::BusinessRule("Birthdate is required".to_string()))?;

    if age_on(birthdate, today) < MINIMUM_CUSTOMER_AGE {
        return Err(DomainError::BusinessRule(format!(
            "Customer must be at least {} years old",
            MINIMUM_CUSTOMER_AGE
        )));
    }

    Ok(birthdate)
}

/// Silently bring stock counters back into `0 <= available <= in_stock <= 20`.
/// Returns `(number_in_stock, number_available)`.
pub fn clamp_stock(number_in_stock: i32, number_available: i32) -> (i32, i32) {
    let in_stock = number_in_stock.clamp(0, MAX_COPIES_IN_STOCK);
    let available = number_available.clamp(0, in_stock);
    (in_stock, available)
}

/// Aggregate status of a rental given the return dates of its items.
pub fn rental_status<'a>(returns: impl IntoIterator<Item = &'a Option<NaiveDate>>) -> &'static str {
    let mut any = false;
    for returned in returns {
        any = true;
        if returned.is_none() {
            return STATUS_PROCESSING;
        }
    }
    if any {
        STATUS_COMPLETED
    } else {
        STATUS_PROCESSING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn names_are_upper_cased() {
        assert_eq!(normalize_name("john doe"), "JOHN DOE");
        assert_eq!(normalize_name("Jean-Luc Picard"), "JEAN-LUC PICARD");
    }

    #[test]
    fn age_counts_whole_years() {
        let today = date(2025, 6, 10);
        assert_eq!(age_on(date(2012, 6, 10), today), 13);
        assert_eq!(age_on(date(2012, 6, 11), today), 12);
        assert_eq!(age_on(date(1990, 5, 15), today), 35);
        // leap-day birthdays only count on Mar 1 in common years
        assert_eq!(age_on(date(2012, 2, 29), date(2025, 2, 28)), 12);
        assert_eq!(age_on(date(2012, 2, 29), date(2025, 3, 1)), 13);
    }

    #[test]
    fn thirteen_year_olds_are_accepted() {
        let today = date(2025, 6, 10);
        assert_eq!(
            validate_customer_age(Some(date(2012, 6, 10)), today).unwrap(),
            date(2012, 6, 10)
        );
    }

    #[test]
    fn under_thirteen_is_rejected() {
        let err = validate_customer_age(Some(date(2013, 1, 1)), date(2025, 6, 10)).unwrap_err();
        assert_eq!(err.to_string(), "Customer must be at least 13 years old");
    }

    #[test]
    fn missing_birthdate_is_rejected() {
        let err = validate_customer_age(None, date(2025, 6, 10)).unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
        assert_eq!(err.to_string(), "Birthdate is required");
    }

    #[test]
    fn stock_is_clamped() {
        assert_eq!(clamp_stock(5, 3), (5, 3));
        assert_eq!(clamp_stock(25, 25), (20, 20));
        assert_eq!(clamp_stock(-4, 2), (0, 0));
        assert_eq!(clamp_stock(6, 9), (6, 6));
        assert_eq!(clamp_stock(6, -1), (6, 0));
    }

    #[test]
    fn status_follows_returns() {
        let today = Some(date(2025, 1, 1));
        assert_eq!(rental_status(&[None, today]), STATUS_PROCESSING);
        assert_eq!(rental_status(&[today, today]), STATUS_COMPLETED);
        let none: &[Option<NaiveDate>] = &[];
        assert_eq!(rental_status(none), STATUS_PROCESSING);
    }
}
