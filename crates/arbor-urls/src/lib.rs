//! Arbor URLs - Route table for nested page applications
//!
//! Maps application paths to page identifiers. Pages may nest: a nested
//! page's route is its parent's route, the nested separator (`~` by
//! default) and its own local segment.
//!
//! ## Modules
//!
//! - [`normalize`](mod@normalize): base prefix stripping and joining
//! - [`table`]: the [`RouteTable`] and nested route resolution
//! - [`recognizer`]: exact and pattern route matchers
//!
//! ## Example
//!
//! ```
//! use arbor_urls::{Recognized, RouteTable, normalize};
//! use std::collections::HashMap;
//!
//! let pages: HashMap<String, Option<String>> = HashMap::from([
//!     ("settings".to_string(), None),
//!     ("profile".to_string(), Some("settings".to_string())),
//! ]);
//!
//! let mut table = RouteTable::new();
//! table.register_page("/settings", "settings", &pages).unwrap();
//! table.register_page("profile", "profile", &pages).unwrap();
//!
//! let path = normalize("/app/settings~profile", "/app");
//! assert_eq!(table.recognize(&path), Recognized::Page("profile".to_string()));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod normalize;
pub mod recognizer;
pub mod table;

pub use error::RouteError;
pub use normalize::{full_path, is_under_base, normalize};
pub use recognizer::{ExactRecognizer, PatternRecognizer, RouteRecognizer, RoutePattern};
pub use table::{NESTED_SEPARATOR, PageLookup, Recognized, RouteEntry, RouteTable, RouteTarget};
