//! Headless testing helpers.
//!
//! Use [`render_to_string`] and related helpers to capture widget output as
//! plain text for snapshot-style assertions.

pub mod snapshot;

pub use snapshot::{render_to_lines, render_to_string, strips_to_string};
