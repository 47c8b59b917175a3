//! Filter value validators.
//!
//! Each validator is a pure function over the string form of a filter value.
//! They are referenced from the per-collection filter tables (see
//! [`CollectionSpec`](super::CollectionSpec)); filters with no validator accept
//! any string.

use chrono::NaiveDate;

use crate::query::errors::ValidationError;

/// Signature shared by every filter validator.
pub type Validator = fn(&str) -> Result<(), ValidationError>;

/// Accepts `YYYY`, `YYYY-MM`, or `YYYY-MM-DD` when it names a real calendar date.
///
/// Years run from `0001` to `9999`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] otherwise.
///
/// # Example
///
/// ```rust
/// use crossref_api::query::validators::is_date;
///
/// assert!(is_date("2020").is_ok());
/// assert!(is_date("2020-02").is_ok());
/// assert!(is_date("2020-02-29").is_ok());
/// assert!(is_date("2020-13-40").is_err());
/// ```
pub fn is_date(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidDate {
        value: value.to_string(),
    };

    let mut parts = value.split('-');
    let year = parts
        .next()
        .and_then(|year| numeric(year, 4, 4))
        .filter(|&year| year >= 1)
        .ok_or_else(invalid)?;
    let month = parts.next().map_or(Some(1), |month| numeric(month, 1, 2));
    let day = parts.next().map_or(Some(1), |day| numeric(day, 1, 2));

    if parts.next().is_some() {
        return Err(invalid());
    }

    match (month, day) {
        (Some(month), Some(day)) => i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            .map(|_| ())
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Accepts `t` or `f`, case-insensitively.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidBool`] otherwise.
pub fn is_bool(value: &str) -> Result<(), ValidationError> {
    if value.eq_ignore_ascii_case("t") || value.eq_ignore_ascii_case("f") {
        Ok(())
    } else {
        Err(ValidationError::InvalidBool {
            value: value.to_string(),
        })
    }
}

/// Accepts a base-10 integer with an optional sign.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidInteger`] otherwise.
pub fn is_integer(value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidInteger {
            value: value.to_string(),
        })
    }
}

/// Parses an all-digit segment whose length is within `min..=max`.
fn numeric(segment: &str, min: usize, max: usize) -> Option<u32> {
    if segment.len() < min || segment.len() > max || !segment.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_date_accepts_all_precisions() {
        for value in ["2020", "2020-01", "2020-1", "2020-01-01", "2020-12-31", "1999-2-3"] {
            assert!(is_date(value).is_ok(), "expected {value} to be a date");
        }
    }

    #[test]
    fn test_is_date_rejects_impossible_dates() {
        for value in ["2020-13-40", "2020-00", "2020-02-30", "2021-02-29", "2020-01-00"] {
            assert!(
                matches!(is_date(value), Err(ValidationError::InvalidDate { .. })),
                "expected {value} to be rejected"
            );
        }
    }

    #[test]
    fn test_is_date_rejects_year_zero() {
        for value in ["0000", "0000-01", "0000-01-01"] {
            assert!(
                matches!(is_date(value), Err(ValidationError::InvalidDate { .. })),
                "expected {value} to be rejected"
            );
        }
        assert!(is_date("0001-01-01").is_ok());
    }

    #[test]
    fn test_is_date_rejects_malformed_values() {
        for value in ["", "20", "20200", "2020-", "2020-01-01-01", "abcd", "2020/01/01", "t"] {
            assert!(is_date(value).is_err(), "expected {value} to be rejected");
        }
    }

    #[test]
    fn test_is_bool() {
        assert!(is_bool("t").is_ok());
        assert!(is_bool("f").is_ok());
        assert!(is_bool("T").is_ok());
        assert!(is_bool("F").is_ok());
        assert!(matches!(is_bool("true"), Err(ValidationError::InvalidBool { .. })));
        assert!(is_bool("").is_err());
        assert!(is_bool("1").is_err());
    }

    #[test]
    fn test_is_integer() {
        assert!(is_integer("0").is_ok());
        assert!(is_integer("365").is_ok());
        assert!(is_integer("-1").is_ok());
        assert!(is_integer("+7").is_ok());
        assert!(is_integer("123456789012345678901234567890").is_ok());
        assert!(matches!(is_integer("1.5"), Err(ValidationError::InvalidInteger { .. })));
        assert!(is_integer("").is_err());
        assert!(is_integer("-").is_err());
        assert!(is_integer("ten").is_err());
    }

    #[test]
    fn test_validators_do_not_alter_input() {
        let value = String::from("2020-01-01");
        is_date(&value).unwrap();
        assert_eq!(value, "2020-01-01");
    }
}
