//! Huskpack — configuration subsystem for web-to-native packaging
//!
//! This library loads and validates the declarative configuration record
//! that the Huskpack packaging tool consumes when embedding built web
//! assets into a native mobile application shell.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
