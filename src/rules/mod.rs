//! Play-validation rules.
//!
//! Games implement `PlayRules` to decide which cards may be laid on the
//! target. `RuleSet` bundles the built-in variants so configuration can
//! select one by name.

pub mod engine;

pub use engine::{PlayRules, RuleSet};
