//! tbstudy-export
//!
//! Flat per-participant rows, CSV output, the rendered verification summary
//! and descriptive statistics across exported records.

pub mod csv;
pub mod error;
pub mod render;
pub mod row;
pub mod summary;
