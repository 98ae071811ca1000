//! Prelude module for calendar_intervals crate.
//!
//! Re-exports the derive macros used across modules.

pub use derive_more::Display;
