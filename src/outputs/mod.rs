//! Export and query steps run over the finished statistics table.
//!
//! Both submodules treat the table as read-only; the pool has already
//! joined by the time anything here runs.
//!
//! # Submodules
//!
//! - [`json`]: writes the word→{count, articles} table to a date-stamped
//!   JSON file
//! - [`queries`]: answers the built-in console queries (frequent words,
//!   words unique to one article, top-N) through the report stream

pub mod json;
pub mod queries;
