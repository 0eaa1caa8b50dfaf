use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each service crate's error type. The crates render
/// these into an [`ErrorBody`], keeping status mapping next to the domain.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
}

impl ErrorBody {
    /// Build the body for a domain error
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            success: false,
            error: error.client_message(),
            error_type: error.error_type().to_owned(),
            pid: None,
        }
    }

    /// Attach the current process id
    #[must_use]
    pub fn with_pid(mut self) -> Self {
        self.pid = Some(crate::pid());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Broken;

    impl std::fmt::Display for Broken {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("secret detail")
        }
    }

    impl std::error::Error for Broken {}

    impl HttpError for Broken {
        fn status_code(&self) -> StatusCode {
            StatusCode::INTERNAL_SERVER_ERROR
        }

        fn error_type(&self) -> &str {
            "internal_error"
        }

        fn client_message(&self) -> String {
            "an internal error occurred".to_owned()
        }
    }

    #[test]
    fn body_uses_client_message() {
        let body = ErrorBody::from_error(&Broken);
        assert!(!body.success);
        assert_eq!(body.error, "an internal error occurred");
        assert_eq!(body.error_type, "internal_error");
        assert!(body.pid.is_none());
    }

    #[test]
    fn pid_is_attached_on_request() {
        let body = ErrorBody::from_error(&Broken).with_pid();
        assert_eq!(body.pid, Some(std::process::id()));
    }
}
