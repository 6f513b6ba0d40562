//! Custom `validator` rules shared by request DTOs.

use std::borrow::Cow;
use validator::ValidationError;

/// Rejects empty or whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some(Cow::Borrowed("must not be blank"));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::not_blank;

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank("  \t").is_err());
        assert!(not_blank("").is_err());
        assert!(not_blank("wifi").is_ok());
    }
}
