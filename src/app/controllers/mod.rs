//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the UI:
//! - Protected buffer and its input guard
//! - Deferred settle steps
//! - Preview scaling and render target fan-out
//! - The page controller tying them together

pub mod buffer;
pub mod deferred;
pub mod page;
pub mod preview;
pub mod surface;
