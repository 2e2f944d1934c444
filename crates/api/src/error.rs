// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use confreview::CoreError;
use confreview_domain::{DomainError, JudgementField, ReviewRole};
use confreview_persistence::PersistenceError;
use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Broad category of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The actor may not perform the operation.
    Authorization,
    /// A parameter is missing or malformed, or a value is not acceptable.
    Validation,
    /// The current state does not allow the operation.
    Conflict,
    /// A named conference, contribution or other object does not exist.
    NotFound,
    /// Storage or another internal component failed.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authorization => "authorization",
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        }
    }
}

/// The single error type returned to callers of an operation.
///
/// `code` is stable and meant for programs; `message` is for people.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub message: String,
}

impl ServiceError {
    #[must_use]
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn authorization(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, code, message)
    }

    #[must_use]
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, code, message)
    }

    #[must_use]
    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, code, message)
    }

    #[must_use]
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, code, message)
    }

    #[must_use]
    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, code, message)
    }

    /// Unknown operation name.
    #[must_use]
    pub fn unknown_operation(method: &str) -> Self {
        Self::not_found("ERR-R0", format!("Unknown operation '{method}'"))
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        Self::authorization("ERR-A0", err.to_string())
    }
}

impl From<PersistenceError> for ServiceError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ConferenceNotFound(id) => {
                Self::not_found("ERR-NF0", format!("Conference '{id}' not found"))
            }
            PersistenceError::Conflict(msg) => {
                Self::conflict("ERR-DB1", format!("Concurrent modification: {msg}"))
            }
            other => Self::internal("ERR-DB0", other.to_string()),
        }
    }
}

/// Translates a domain error into a service error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ServiceError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidIdentifier { .. } => ServiceError::validation("ERR-P1", message),
        DomainError::InvalidReviewingMode(_) => ServiceError::validation("ERR-REV10", message),
        DomainError::InvalidRole(_) | DomainError::InvalidAttribute(_) => {
            ServiceError::validation("ERR-REV5", message)
        }
        DomainError::ContributionNotFound(_) => ServiceError::not_found("ERR-NF1", message),
        DomainError::TemplateNotFound(_) => ServiceError::not_found("ERR-NF2", message),
        DomainError::RoleNotAllowedInMode { role, .. } => {
            let code: &'static str = match role {
                ReviewRole::Referee => "ERR-REV6aa",
                ReviewRole::Editor => "ERR-REV6bb",
                ReviewRole::Reviewer => "ERR-REV6cc",
            };
            ServiceError::conflict(code, message)
        }
        DomainError::RefereeRequired { role, .. } => {
            let code: &'static str = match role {
                ReviewRole::Editor => "ERR-REV9a",
                ReviewRole::Referee | ReviewRole::Reviewer => "ERR-REV9b",
            };
            ServiceError::conflict(code, message)
        }
        DomainError::RoleAlreadyAssigned { .. } => ServiceError::conflict("ERR-REV12", message),
        DomainError::JudgementSubmitted { field } => {
            let code: &'static str = match field {
                JudgementField::Verdict => "ERR-REV8a",
                JudgementField::Comments => "ERR-REV8b",
                JudgementField::Answers => "ERR-REV8c",
            };
            ServiceError::conflict(code, message)
        }
        DomainError::JudgementIncomplete { .. } => ServiceError::conflict("ERR-REV9", message),
        DomainError::InvalidVerdict(_) => ServiceError::validation("ERR-REV13", message),
        DomainError::UnknownQuestion(_) => ServiceError::validation("ERR-REV14", message),
        DomainError::InvalidAnswer { .. } => ServiceError::validation("ERR-REV15", message),
        DomainError::FolderConstraint(_) => ServiceError::validation("ERR-ATT1", message),
        DomainError::FolderNotFound(_) => ServiceError::not_found("ERR-ATT2", message),
        DomainError::InvalidTitle(_) => ServiceError::validation("ERR-ATT3", message),
    }
}

/// Translates a core error into a service error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ServiceError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
