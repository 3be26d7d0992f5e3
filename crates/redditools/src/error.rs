use redditools_core::reddit::{FormatError, ValidationError};

/// Failure talking to the Reddit API
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("failed to create client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("API returned error status: {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("failed to parse JSON response: {0}")]
    Decode(String),
}

/// Everything a tool call can fail with
///
/// The `Display` output is exactly what the caller sees in the tool's error
/// result.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Reddit API error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to format {what}: {source}")]
    Format {
        what: &'static str,
        #[source]
        source: FormatError,
    },
}

impl ToolError {
    pub fn format(what: &'static str) -> impl FnOnce(FormatError) -> Self {
        move |source| Self::Format { what, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_messages() {
        let err = ToolError::from(ValidationError::Missing("post_id"));
        assert_eq!(err.to_string(), "post_id is required");

        let err = ToolError::from(FetchError::Status(429));
        assert_eq!(
            err.to_string(),
            "Reddit API error: API returned error status: 429"
        );

        let err = ToolError::format("comments")(FormatError::UnexpectedFormat);
        assert_eq!(
            err.to_string(),
            "Failed to format comments: unexpected response format"
        );
    }
}
