//! s3mgr CLI library
//!
//! Exposes the command definitions and output helpers for integration tests.

pub mod commands;
pub mod exit_code;
pub mod output;
