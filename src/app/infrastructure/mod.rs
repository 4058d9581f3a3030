//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Error types
//! - Browser-backed preview files
//! - HTML export

pub mod error;
pub mod export;
pub mod file_target;
