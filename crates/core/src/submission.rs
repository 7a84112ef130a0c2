// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Series submission toward the session store.
//!
//! Each candidate is created by its own store call, in order. A failed
//! create is logged and recorded; the remaining candidates are still
//! attempted and already-created sessions are kept.
//!
//! Every create carries the batch token and the candidate's sequence
//! number. The store treats `(venue, batch, sequence)` as unique, so
//! resubmitting a plan under the same token in the same venue only fills
//! the gaps. [`rollback_series`] removes everything a venue created under
//! a token.

use crate::error::CoreError;
use crate::planner::SeriesPlan;
use chrono::NaiveDateTime;
use classbook_domain::{DomainError, NewOccurrence, VenueId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Prefix of every batch token.
pub const BATCH_TOKEN_PREFIX: &str = "batch_";

/// Identifies one series submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchToken(String);

impl BatchToken {
    /// Builds a token from a creation time and a random nonce.
    ///
    /// # Example
    ///
    /// ```text
    /// BatchToken::generate(1736150400000, 42) = "batch_1736150400000_42"
    /// ```
    #[must_use]
    pub fn generate(unix_millis: i64, nonce: u64) -> Self {
        Self(format!("{BATCH_TOKEN_PREFIX}{unix_millis}_{nonce}"))
    }

    /// Accepts a token supplied by a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is blank or lacks the batch prefix.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed: &str = raw.trim();
        if trimmed.len() <= BATCH_TOKEN_PREFIX.len() || !trimmed.starts_with(BATCH_TOKEN_PREFIX) {
            return Err(CoreError::DomainViolation(DomainError::InvalidIdentifier {
                kind: "batch",
                value: raw.to_string(),
            }));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BatchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The persistence seam for class sessions.
pub trait OccurrenceStore {
    /// The store's error type.
    type Error: std::fmt::Display;

    /// Creates one session, or returns the id of the session already
    /// created for `(occurrence.venue_id, batch, sequence)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the session.
    fn create_occurrence(
        &mut self,
        batch: &BatchToken,
        sequence: u32,
        occurrence: &NewOccurrence,
    ) -> Result<i64, Self::Error>;

    /// Deletes every session `venue_id` created under `batch`, returning
    /// how many.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot delete.
    fn delete_batch(
        &mut self,
        venue_id: VenueId,
        batch: &BatchToken,
    ) -> Result<usize, Self::Error>;
}

/// A session created by a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedOccurrence {
    /// Position in the series (0 is the base occurrence).
    pub sequence: u32,
    /// The store-assigned id.
    pub occurrence_id: i64,
    /// Session start.
    pub start: NaiveDateTime,
}

/// A candidate the store refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedOccurrence {
    /// Position in the series.
    pub sequence: u32,
    /// Session start.
    pub start: NaiveDateTime,
    /// The store's error message.
    pub message: String,
}

/// The outcome of a series submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    /// The batch token every session was created under.
    pub batch: BatchToken,
    /// Sessions created.
    pub created: Vec<CreatedOccurrence>,
    /// Candidates that failed.
    pub failed: Vec<FailedOccurrence>,
}

impl SubmissionReport {
    /// Whether every candidate was created.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Submits every candidate of a plan, one create call each.
///
/// # Arguments
///
/// * `store` - The session store
/// * `plan` - A plan that may be submitted
/// * `batch` - The token for this submission
///
/// # Errors
///
/// Returns an error only if the plan may not be submitted. Store failures
/// are reported per candidate in the returned report.
pub fn submit_series<S: OccurrenceStore>(
    store: &mut S,
    plan: &SeriesPlan,
    batch: BatchToken,
) -> Result<SubmissionReport, CoreError> {
    plan.ensure_submittable()?;

    let mut created: Vec<CreatedOccurrence> = Vec::with_capacity(plan.candidates.len());
    let mut failed: Vec<FailedOccurrence> = Vec::new();

    for (sequence, candidate) in (0u32..).zip(plan.candidates.iter()) {
        match store.create_occurrence(&batch, sequence, candidate) {
            Ok(occurrence_id) => created.push(CreatedOccurrence {
                sequence,
                occurrence_id,
                start: candidate.start,
            }),
            Err(err) => {
                warn!(
                    batch = %batch,
                    sequence,
                    start = %candidate.start,
                    error = %err,
                    "Failed to create class session"
                );
                failed.push(FailedOccurrence {
                    sequence,
                    start: candidate.start,
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        batch = %batch,
        created = created.len(),
        failed = failed.len(),
        "Submitted class series"
    );

    Ok(SubmissionReport {
        batch,
        created,
        failed,
    })
}

/// Deletes every session `venue_id` created under `batch`.
///
/// Sessions another venue created under the same token are left alone.
///
/// # Errors
///
/// Returns an error if the store cannot delete.
pub fn rollback_series<S: OccurrenceStore>(
    store: &mut S,
    venue_id: VenueId,
    batch: &BatchToken,
) -> Result<usize, CoreError> {
    let removed: usize = store
        .delete_batch(venue_id, batch)
        .map_err(|err| CoreError::Store(err.to_string()))?;
    info!(venue_id = %venue_id, batch = %batch, removed, "Rolled back class series");
    Ok(removed)
}
