use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a valid URL")]
    Empty,
    #[error("Please enter a valid URL (e.g., https://example.com)")]
    Invalid,
}

/// Checks whether the trimmed input is an absolute `http` or `https` URL.
pub fn is_valid_url(input: &str) -> bool {
    validate_capture_url(input).is_ok()
}

/// Parses user input into a capture target, rejecting anything that is not
/// a well-formed `http`/`https` URL.
pub fn validate_capture_url(input: &str) -> Result<Url, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let parsed = Url::parse(trimmed).map_err(|_| ValidationError::Invalid)?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(parsed),
        _ => Err(ValidationError::Invalid),
    }
}
