// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod fuel;
pub mod session;

pub use fuel::compute_left_over;
pub use session::{GuardVerdict, Resolution, RoleStore, SessionContext, SessionState};
