//! Route table and path normalization
//!
//! This module provides access to arbor-urls: the route table, nested
//! route resolution and the recognizers that match paths to pages.

// Re-export all arbor-urls functionality
pub use arbor_urls::*;
