// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use classbook::CoreError;
use classbook_domain::{DomainError, FieldError};
use classbook_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let field: String = match &err {
        DomainError::InvalidInterval { .. } => String::from("end"),
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            String::from("date")
        }
        DomainError::InvalidIdentifier { kind, .. } => format!("{}_id", kind.replace(' ', "_")),
        DomainError::UnknownFrequency(_) => String::from("recurrence.frequency"),
        DomainError::UnknownWeekday(_) => String::from("recurrence.weekdays"),
        DomainError::UnknownRangeWindow(_) => String::from("range"),
        DomainError::UnknownInterval(_) => String::from("interval"),
        DomainError::UnknownWeekStart(_) => String::from("week_start"),
        DomainError::InvalidTimezone(_) => String::from("timezone"),
    };
    ApiError::InvalidInput { field, message }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidDraft(field_errors) => translate_field_errors(&field_errors),
        CoreError::BlockedByConflicts(count) => ApiError::DomainRuleViolation {
            rule: String::from("no_resource_conflicts"),
            message: format!("{count} blocking conflict(s) with existing sessions"),
        },
        CoreError::EmptySeries => ApiError::DomainRuleViolation {
            rule: String::from("non_empty_series"),
            message: String::from("The series has no sessions to create"),
        },
        CoreError::Store(msg) => ApiError::Internal {
            message: format!("Session store error: {msg}"),
        },
    }
}

/// Collapses form field errors into one input error naming the first field.
#[must_use]
pub fn translate_field_errors(field_errors: &[FieldError]) -> ApiError {
    let field: String = field_errors
        .first()
        .map_or_else(|| String::from("form"), |e| e.field().to_string());
    let message: String = field_errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join("; ");
    ApiError::InvalidInput { field, message }
}

/// Translates a persistence error into an API error.
///
/// Missing rows and dangling references become not-found errors; storage
/// failures become internal errors.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        PersistenceError::ReferenceViolation(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Referenced resource"),
            message: msg,
        },
        PersistenceError::DuplicateRecord(msg) => ApiError::DomainRuleViolation {
            rule: String::from("unique_record"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
