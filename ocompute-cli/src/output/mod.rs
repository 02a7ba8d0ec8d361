//! Output module
//!
//! Rendering of resources for the terminal: fixed-order summaries, sorted
//! tables and the coloured progress reporter.

pub mod summary;
pub mod table;
pub mod terminal;
