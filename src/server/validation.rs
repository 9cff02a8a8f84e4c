use crate::server::error::{ServerError, ServerResult};

/// Returns the values of two request parameters, or `why` as a validation
/// error when either is absent or empty.
pub fn require_pair(
    first: Option<String>,
    second: Option<String>,
    why: &str,
) -> ServerResult<(String, String)> {
    match (first, second) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => Ok((a, b)),
        _ => Err(ServerError::ValidationError { why: why.to_string() }),
    }
}

/// The client-supplied name of an uploaded file must be non-empty.
pub fn validate_upload_name(file_name: &str) -> ServerResult<String> {
    if file_name.is_empty() {
        return Err(ServerError::ValidationError {
            why: "No selected file".to_string(),
        });
    }
    Ok(file_name.to_string())
}
