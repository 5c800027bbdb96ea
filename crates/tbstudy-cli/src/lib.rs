//! tbstudy-cli
//!
//! Configuration, intake-form loading and command implementations behind
//! the `tbstudy` binary.

pub mod commands;
pub mod config;
pub mod intake;
