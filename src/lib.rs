// src/lib.rs
// Productive MCP - guided timesheet entry for Productive.io

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod timesheet;
pub mod tools;

pub use error::{ProductiveError, Result};
