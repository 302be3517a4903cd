use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    AgreementRequired,
    Conflict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Order form rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("agreement to the privacy policy is required")]
    AgreementRequired,
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error("unknown service index {0}")]
    UnknownService(usize),
    #[error("invalid service index '{0}'")]
    InvalidService(String),
    #[error("unknown contact method '{0}'")]
    UnknownContactMethod(String),
}

impl FormError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FormError::AgreementRequired => ErrorCode::AgreementRequired,
            FormError::AlreadySubmitting => ErrorCode::Conflict,
            FormError::UnknownService(_)
            | FormError::InvalidService(_)
            | FormError::UnknownContactMethod(_) => ErrorCode::Validation,
        }
    }

    /// User-facing notice for errors the form reports instead of rejecting.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            FormError::AgreementRequired => Some(Notice::agreement_required()),
            _ => None,
        }
    }
}

impl From<FormError> for ApiError {
    fn from(value: FormError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}
