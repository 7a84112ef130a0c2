// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every query is scoped to one venue and uses Diesel DSL.
//!
//! ## Module Organization
//!
//! - `resources`: Instructors and rooms
//! - `sessions`: Class sessions by window, id or batch slot
//! - `events`: Raw bookings, payments and package ownerships

pub mod events;
pub mod resources;
pub mod sessions;
