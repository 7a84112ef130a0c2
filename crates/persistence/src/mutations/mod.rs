// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Inserts read the new id back with `last_insert_rowid()` from the
//! `backend` module. Everything else is Diesel DSL.
//!
//! ## Module Organization
//!
//! - `resources`: Instructor and room creation
//! - `sessions`: Batch-slot session creation and batch deletion
//! - `events`: Booking, payment and package ownership recording

pub mod events;
pub mod resources;
pub mod sessions;
