use validator::ValidateEmail;

use crate::{ServiceError, ServiceResult};

pub fn validate_email(email: &str) -> ServiceResult<String> {
    if email.validate_email() {
        Ok(email.to_string())
    } else {
        ServiceError::bad_request("Invalid email address")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }
}
