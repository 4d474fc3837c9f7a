#![forbid(unsafe_code)]

//! Administrative console for the Redecom demands workflow.
//!
//! Staff sign in, browse and filter submitted demands, assign professionals
//! to them, and maintain the professional roster and reference areas. The
//! record store is the source of truth; each signed-in session works on its
//! own cached copy through a [`console::Console`].

pub mod assignment;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod console;
pub mod errors;
pub mod http;
pub mod models;
pub mod persistence;
pub mod store;

pub use config::GlobalConfig;
pub use errors::{AppError, AuthFailure, Result};
