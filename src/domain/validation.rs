use validator::ValidationError;

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

/// Every technology tag must carry at least one visible character.
pub fn validate_technologies(technologies: &[String]) -> Result<(), ValidationError> {
    if technologies.iter().any(|t| t.trim().is_empty()) {
        let mut error = ValidationError::new("blank_technology");
        error.message = Some("Technology names cannot be blank".into());
        return Err(error);
    }

    Ok(())
}
