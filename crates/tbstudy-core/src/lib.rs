//! tbstudy-core
//!
//! Participant record, care-pathway timing and export column conventions.
//! No file or network I/O. This is the shared vocabulary of the study
//! toolkit.

pub mod columns;
pub mod error;
pub mod models;
pub mod pathway;
