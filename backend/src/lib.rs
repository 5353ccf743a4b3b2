//! MorphDB Server Library
//!
//! Exposes the command-line surface so it can be driven from integration tests.

pub mod args;
pub mod commands;
pub mod logging;
