//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Volunteer Hub backend.
//! It includes database helpers, fixed identities and the in-process test context.

#![allow(dead_code)]

pub mod database_helper;
pub mod log_capture;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use log_capture::*;
pub use test_context::*;
pub use test_data::*;
