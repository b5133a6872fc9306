//! Configuration module
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Document export geometry

pub mod paths;
pub mod settings;

pub use paths::TimesheetPaths;
pub use settings::Settings;
