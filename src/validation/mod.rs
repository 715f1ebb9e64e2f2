//! Validation utilities
//!
//! Structural checks shared by tree edits and sync runs

mod structure;

pub use structure::{check_shape, find_cycle, validate_definition, validate_specs};
