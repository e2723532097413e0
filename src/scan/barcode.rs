use thiserror::Error;

/// Manual barcode entry validation failures. Messages are shown to the user
/// as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BarcodeError {
    #[error("Please enter a barcode")]
    Empty,

    #[error("Barcode should only contain numbers")]
    NonNumeric,

    #[error("Barcode should be 8-13 digits long")]
    BadLength,
}

/// Validates a manually entered barcode: numeric only, 8 to 13 digits.
pub fn parse(input: &str) -> Result<i64, BarcodeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BarcodeError::Empty);
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(BarcodeError::NonNumeric);
    }
    if trimmed.len() < 8 || trimmed.len() > 13 {
        return Err(BarcodeError::BadLength);
    }
    // 13 digits always fit in i64.
    trimmed.parse::<i64>().map_err(|_| BarcodeError::BadLength)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_eight_digits() {
        assert_eq!(parse("12345678"), Ok(12345678));
    }

    #[test]
    fn accepts_thirteen_digits() {
        assert_eq!(parse("5700000000001"), Ok(5700000000001));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse("  12345678  "), Ok(12345678));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse(""), Err(BarcodeError::Empty));
        assert_eq!(parse("   "), Err(BarcodeError::Empty));
    }

    #[test]
    fn rejects_too_short() {
        assert_eq!(parse("1234"), Err(BarcodeError::BadLength));
        assert_eq!(parse("1234567"), Err(BarcodeError::BadLength));
    }

    #[test]
    fn rejects_too_long() {
        assert_eq!(parse("12345678901234"), Err(BarcodeError::BadLength));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(parse("abc12345"), Err(BarcodeError::NonNumeric));
        assert_eq!(parse("1234 5678"), Err(BarcodeError::NonNumeric));
        assert_eq!(parse("12-345678"), Err(BarcodeError::NonNumeric));
    }

    #[test]
    fn error_messages_match_the_ui_copy() {
        assert_eq!(BarcodeError::Empty.to_string(), "Please enter a barcode");
        assert_eq!(
            BarcodeError::NonNumeric.to_string(),
            "Barcode should only contain numbers"
        );
        assert_eq!(
            BarcodeError::BadLength.to_string(),
            "Barcode should be 8-13 digits long"
        );
    }
}
