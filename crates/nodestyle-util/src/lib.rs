//! Shared utilities for nodestyle.
//!
//! This crate provides the cross-cutting pieces used by the other nodestyle
//! crates: the error type and the filesystem/path helpers.

pub mod errors;
pub mod fs;
