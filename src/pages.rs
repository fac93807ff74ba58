//! Nested page runtime
//!
//! This module provides access to arbor-pages.
//!
//! ## Architecture
//!
//! - **Page Tree**: pages discovered from `data-page` elements
//! - **Navigator**: resolves paths, switches visible pages and updates history
//! - **Handlers**: produce a view-model each time a page is shown
//! - **Custom Elements**: reusable markup with per-instance models

// Re-export all arbor-pages functionality
pub use arbor_pages::*;
