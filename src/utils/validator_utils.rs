use validator::ValidationError;

/// Slugs are ASCII letters, digits, hyphens and underscores.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty()
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_slug");
        error.message = Some(std::borrow::Cow::from("Use only letters, numbers, hyphens and underscores"));
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_slug_characters() {
        assert!(validate_slug("summer-2024_recap").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("no spaces").is_err());
        assert!(validate_slug("über").is_err());
    }
}
