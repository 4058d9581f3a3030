//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Page configuration (framework, orientation)
//! - Caret and selection positions
//! - Application settings
//! - Message types for the event system

pub mod caret;
pub mod config;
pub mod messages;
pub mod settings;

pub use caret::{Caret, Selection};
pub use config::{Framework, Orientation, PageConfig};
pub use messages::Message;
pub use settings::AppSettings;
