//! Report renderers for evaluation records.
//!
//! - [`terminal`] — colored verdict card with red flags, URL verification and
//!   history listing; respects `--quiet`.
//! - [`pdf`] — paginated PDF report for a single record.

pub mod pdf;
pub mod terminal;
