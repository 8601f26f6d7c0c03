use thiserror::Error;

/// Main error type for itinerary generation
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP transport error: {0}")]
    Http(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Completion response contained no message content")]
    EmptyResponse,

    #[error("GPT response could not be parsed as JSON: {message}")]
    Parse { message: String, raw: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Whether re-issuing the whole request could plausibly succeed.
    ///
    /// The planner never retries on its own; this is a hint for callers
    /// deciding whether to offer "try again" to the user.
    pub fn is_retryable(&self) -> bool {
        match self {
            PlannerError::Http(_) | PlannerError::Timeout(_) => true,
            PlannerError::Api { status, .. } => *status == 429 || *status >= 500,
            PlannerError::EmptyResponse | PlannerError::Parse { .. } => true,
            PlannerError::Config(_) => false,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Http(_) => "HTTP_ERROR",
            PlannerError::Timeout(_) => "TIMEOUT_ERROR",
            PlannerError::Api { .. } => "API_ERROR",
            PlannerError::EmptyResponse => "EMPTY_RESPONSE",
            PlannerError::Parse { .. } => "PARSE_ERROR",
        }
    }

    /// The unmodified model reply, when the failure happened while decoding it.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            PlannerError::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = PlannerError::Parse {
            message: "expected value at line 1 column 1".to_string(),
            raw: "Sorry, I can't help with that.".to_string(),
        };
        assert!(err
            .to_string()
            .starts_with("GPT response could not be parsed as JSON"));
        assert_eq!(err.raw_response(), Some("Sorry, I can't help with that."));
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_api_error_retryable() {
        let unauthorized = PlannerError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        };
        assert!(!unauthorized.is_retryable());

        let overloaded = PlannerError::Api {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert!(overloaded.is_retryable());
    }

    #[test]
    fn test_error_payload() {
        let payload = PlannerError::Config("bad timeout".to_string()).to_error_payload();
        assert_eq!(payload["error"]["code"], "CONFIG_ERROR");
        assert_eq!(payload["error"]["retryable"], false);
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("bad timeout"));
    }
}
