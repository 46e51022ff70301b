//! Game implementations built on the table engine.

pub mod bartok;
