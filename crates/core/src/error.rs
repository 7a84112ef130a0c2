// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use classbook_domain::{DomainError, FieldError};

/// Errors that can occur while planning, submitting or reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The class form has field errors.
    InvalidDraft(Vec<FieldError>),
    /// The series overlaps existing sessions.
    BlockedByConflicts(usize),
    /// The series has no candidates to submit.
    EmptySeries,
    /// The session store failed.
    Store(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidDraft(errors) => {
                let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "Invalid class: {}", messages.join("; "))
            }
            Self::BlockedByConflicts(count) => {
                write!(f, "Series blocked by {count} scheduling conflict(s)")
            }
            Self::EmptySeries => write!(f, "Series has no sessions to create"),
            Self::Store(message) => write!(f, "Session store error: {message}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
