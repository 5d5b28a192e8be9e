//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - Report assertions
//! - In-memory documents served through the access-layer traits
//! - Real PDF builders for end-to-end tests

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod pdf_helpers;

pub use assertions::*;
pub use fixtures::*;
pub use pdf_helpers::*;
