//! Output system for the `ruls` application.
//!
//! - [`format`]: renders one group's entries as a compact name list or
//!   detailed records
//! - [`terminal`]: orders groups and entries and writes titles, blocks and
//!   separators

pub mod format;
pub mod terminal;

/// Terminal output renderer function.
///
/// See [`terminal::render`] for full documentation.
pub use terminal::render as render_terminal;
