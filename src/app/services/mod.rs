//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Document template generation
//! - Document assembly
//! - Persisted state
//! - Text operations

pub mod assembler;
pub mod session;
pub mod templates;
pub mod text_ops;
