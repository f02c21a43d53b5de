use hensai_client::ApiError;
use hensai_import::StatementError;
use thiserror::Error;

/// Failure classes surfaced to the user. Every lower-level error is folded
/// into exactly one of these before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Api,
    File,
    Validation,
    Unknown,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        AppError {
            kind: ErrorKind::Unknown,
            message: message.into(),
        }
    }

    /// The line shown to the user. Fixed per class, except validation
    /// errors, whose message is passed through verbatim.
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                "Network error — check your connection and try again.".to_string()
            }
            ErrorKind::Api => "The repayment service returned an error.".to_string(),
            ErrorKind::File => "Could not read the statement file.".to_string(),
            ErrorKind::Validation => self.message.clone(),
            ErrorKind::Unknown => "An unexpected error occurred.".to_string(),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        let kind = match &e {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Api { .. } | ApiError::Decode(_) => ErrorKind::Api,
            ApiError::Config(_) => ErrorKind::Validation,
        };
        AppError {
            kind,
            message: e.to_string(),
        }
    }
}

impl From<StatementError> for AppError {
    fn from(e: StatementError) -> Self {
        AppError {
            kind: ErrorKind::File,
            message: e.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError {
            kind: ErrorKind::File,
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_passes_through_verbatim() {
        let e = AppError::validation("No API endpoint configured.");
        assert_eq!(e.user_message(), "No API endpoint configured.");
    }

    #[test]
    fn non_validation_kinds_use_the_fixed_message() {
        let e: AppError = ApiError::Api { status: 500 }.into();
        assert_eq!(e.kind, ErrorKind::Api);
        assert_eq!(e.user_message(), "The repayment service returned an error.");
        assert!(e.message.contains("500"));
    }

    #[test]
    fn config_errors_classify_as_validation() {
        let e: AppError = ApiError::Config("HENSAI_API_ENDPOINT is not set".into()).into();
        assert_eq!(e.kind, ErrorKind::Validation);
        assert!(e.user_message().contains("HENSAI_API_ENDPOINT"));
    }

    #[test]
    fn statement_errors_classify_as_file() {
        let e: AppError = StatementError::MissingColumn("日付".into()).into();
        assert_eq!(e.kind, ErrorKind::File);
    }
}
