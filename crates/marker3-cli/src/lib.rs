//! Marker3 CLI library.
//!
//! This crate provides the core functionality for the `marker3` binary:
//! loading configuration and avatar documents, and the command
//! implementations.

pub mod commands;
pub mod input;
