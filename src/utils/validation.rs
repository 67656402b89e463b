use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// ISO 日曆日期 (YYYY-MM-DD)
pub fn validate_iso_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected a YYYY-MM-DD date: {}", e),
        }
    })
}

pub fn validate_unique_ids<'a, I>(ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(BookingError::DuplicateResource { id: id.to_string() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("hour", 0, 0, 23).is_ok());
        assert!(validate_range("hour", 23, 0, 23).is_ok());
        assert!(validate_range("hour", -1, 0, 23).is_err());
        assert!(validate_range("hour", 24, 0, 23).is_err());
    }

    #[test]
    fn test_validate_iso_date() {
        assert!(validate_iso_date("date", "2023-02-15").is_ok());
        assert!(validate_iso_date("date", "2023-02-30").is_err());
        assert!(validate_iso_date("date", "15/02/2023").is_err());
        assert!(validate_iso_date("date", "").is_err());
    }

    #[test]
    fn test_validate_unique_ids() {
        assert!(validate_unique_ids(["1", "2"]).is_ok());
        match validate_unique_ids(["1", "2", "1"]) {
            Err(BookingError::DuplicateResource { id }) => assert_eq!(id, "1"),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "bike1").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }
}
