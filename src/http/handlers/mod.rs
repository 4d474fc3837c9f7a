//! Route handlers grouped by console page.

pub mod areas;
pub mod auth;
pub mod demands;
pub mod professionals;
