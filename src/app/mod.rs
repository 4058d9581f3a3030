//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (PageConfig, Caret, Settings, Messages)
//! - `controllers/` - Orchestration (ProtectedBuffer, PreviewSynchronizer, PageController)
//! - `services/` - Business operations (templates, assembler, session, text_ops)
//! - `infrastructure/` - External integrations (error, preview files, export)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::page::PageController;
pub use domain::{AppSettings, Framework, Message, Orientation, PageConfig};
pub use infrastructure::error::{AppError, Result};
pub use services::session::PersistedState;
