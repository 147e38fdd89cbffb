use crate::utils::error::{DirectoryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(DirectoryError::ValidationError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DirectoryError::ValidationError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Surnames and names are stored as single whitespace-delimited tokens.
pub fn validate_name_token(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(DirectoryError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty".to_string(),
        });
    }

    if value.chars().any(char::is_whitespace) {
        return Err(DirectoryError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Accepts a positive integer and returns its canonical decimal form.
pub fn parse_phone_number(field_name: &str, input: &str) -> Result<String> {
    let trimmed = input.trim();
    match trimmed.parse::<u64>() {
        Ok(0) => Err(DirectoryError::ValidationError {
            field: field_name.to_string(),
            value: input.to_string(),
            reason: "Phone number must be positive".to_string(),
        }),
        Ok(number) => Ok(number.to_string()),
        Err(e) => Err(DirectoryError::ValidationError {
            field: field_name.to_string(),
            value: input.to_string(),
            reason: format!("Invalid phone number: {}", e),
        }),
    }
}
