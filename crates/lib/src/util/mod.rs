//! Shared utilities.

pub mod ksuid;
