use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

// Международный формат: необязательный "+", цифры, пробелы, скобки и дефисы
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ()\-]{5,19}$").unwrap());

pub fn validate_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone.trim())
}

pub fn sanitize_string(input: &str) -> String {
    input.trim().to_string()
}

pub fn validate_phone_field(phone: &str) -> Result<(), ValidationError> {
    if validate_phone(phone) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.message = Some("phone is required and must be a valid number".into());
        Err(error)
    }
}

pub fn validate_non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("amount must not be negative".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+221771234567"));
        assert!(validate_phone("06 12 34 56 78"));
        assert!(validate_phone("+1 (555) 123-4567"));
        assert!(!validate_phone(""));
        assert!(!validate_phone("abc"));
        assert!(!validate_phone("12"));
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(120050, 2)).is_ok());
        assert!(validate_non_negative(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  Dakar  "), "Dakar");
    }
}
