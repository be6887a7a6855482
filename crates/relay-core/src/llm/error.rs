//! LLM error types

use std::fmt;

/// Error type for LLM operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network/connection error
    Connection(String),

    /// API error (authentication, bad request, server error)
    Api { status: u16, message: String },

    /// Request timeout
    Timeout,

    /// Rate limited
    RateLimited { retry_after: Option<u64> },

    /// The response could not be understood
    InvalidResponse(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Connection(msg) => write!(f, "Connection error: {}", msg),
            LlmError::Api { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            LlmError::Timeout => write!(f, "Request timed out"),
            LlmError::RateLimited { retry_after } => {
                if let Some(seconds) = retry_after {
                    write!(f, "Rate limited, retry after {} seconds", seconds)
                } else {
                    write!(f, "Rate limited")
                }
            }
            LlmError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<ureq::Error> for LlmError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let retry_after = response
                    .header("retry-after")
                    .and_then(|v| v.trim().parse::<u64>().ok());
                let message = response
                    .into_string()
                    .map(|body| api_error_message(&body))
                    .unwrap_or_else(|_| "Unknown error".to_string());
                if status == 429 {
                    LlmError::RateLimited { retry_after }
                } else if status == 401 || status == 403 {
                    LlmError::Api {
                        status,
                        message: "Authentication failed".to_string(),
                    }
                } else {
                    LlmError::Api { status, message }
                }
            }
            ureq::Error::Transport(transport) => {
                let message = transport.to_string();
                if message.to_lowercase().contains("timed out") {
                    LlmError::Timeout
                } else {
                    LlmError::Connection(message)
                }
            }
        }
    }
}

impl From<std::io::Error> for LlmError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::TimedOut {
            LlmError::Timeout
        } else {
            LlmError::InvalidResponse(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(format!("JSON error: {}", err))
    }
}

/// Pull `error.message` out of an API error body, or return the body as is
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = LlmError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
        assert_eq!(
            LlmError::RateLimited { retry_after: Some(3) }.to_string(),
            "Rate limited, retry after 3 seconds"
        );
        assert_eq!(LlmError::RateLimited { retry_after: None }.to_string(), "Rate limited");
    }

    #[test]
    fn test_api_error_message_from_json() {
        let body = r#"{"error":{"message":"model not found","type":"invalid_request_error"}}"#;
        assert_eq!(api_error_message(body), "model not found");
    }

    #[test]
    fn test_api_error_message_plain_body() {
        assert_eq!(api_error_message("  bad gateway \n"), "bad gateway");
    }

    #[test]
    fn test_io_timeout_maps_to_timeout() {
        let err: LlmError = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow").into();
        assert_eq!(err, LlmError::Timeout);
    }
}
