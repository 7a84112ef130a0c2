// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod analytics;
mod config;
mod error;
mod month_view;
mod planner;
mod submission;

#[cfg(test)]
mod tests;

pub use analytics::{AnalyticsFilters, AnalyticsReport, build_analytics};
pub use config::EngineConfig;
pub use error::CoreError;
pub use month_view::{DayCell, MonthView, build_month_view, month_view_window};
pub use planner::{ClassDraft, SeriesPlan, build_candidates, candidate_window, plan_series};
pub use submission::{
    BATCH_TOKEN_PREFIX, BatchToken, CreatedOccurrence, FailedOccurrence, OccurrenceStore,
    SubmissionReport, rollback_series, submit_series,
};
