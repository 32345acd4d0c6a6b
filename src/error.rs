use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    AuthenticationRequired,
    InvalidCredentials,
    UserExists,
    TaskNotFound,
    AmbiguousRef,
    ValidationError,
    LoadFailed,
    GatewayFailure,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserExists => "USER_EXISTS",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::LoadFailed => "LOAD_FAILED",
            Self::GatewayFailure => "GATEWAY_FAILURE",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TudooError {
    pub code: ErrorCode,
    pub message: String,
}

impl TudooError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "tudoo is not initialized. Run `tudoo init` first.",
        )
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::AuthenticationRequired, "User not authenticated")
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, "Invalid login credentials")
    }

    pub fn user_exists(email: &str) -> Self {
        Self::new(
            ErrorCode::UserExists,
            format!("User already registered: {email}"),
        )
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn load_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::LoadFailed, message)
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::GatewayFailure, message)
    }
}

impl From<rusqlite::Error> for TudooError {
    fn from(e: rusqlite::Error) -> Self {
        Self::gateway(e.to_string())
    }
}
