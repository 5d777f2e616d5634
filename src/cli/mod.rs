//! Command-line interface
//!
//! Argument definitions and command handlers for the `huskpack` binary.

pub mod args;
pub mod commands;
