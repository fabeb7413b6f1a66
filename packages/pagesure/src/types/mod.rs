//! Data types for page resolution.

pub mod config;
pub mod page;
