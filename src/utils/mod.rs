//! Utility modules for RWS Fetch
//!
//! This module contains helpers organized by functionality:
//! - `files`: Output layout and directory management
//! - `http`: HTTP client and URL helpers

pub mod files;
pub mod http;

// Re-export commonly used functions for convenience
pub use files::{count_images, ensure_directories};
