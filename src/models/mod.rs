//! Domain model module declarations.

pub mod area;
pub mod demand;
pub mod professional;
