//! Filter expression engine for the Cabinet file manager.
//!
//! This crate compiles user-written filter expressions like
//! `size:">1M" and (ext:"jpg" or ext:"png")` into a cached expression tree and
//! evaluates them repeatedly against file-system nodes. Per-column matching
//! (text, size, date, ...) is pluggable through the
//! [`ColumnMatcher`]/[`MatcherRegistry`] traits; a [`Filter`] caches its
//! compiled tree and rebuilds it when a referenced column's configured type
//! changes.
//!
//! Evaluation is a strict left-to-right fold with short-circuiting — AND and
//! OR have no relative precedence (see the [`expr`] module docs for the full
//! syntax).
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use cabinet_filter_rs::{Filter, Node, Settings, TypeRegistry};
//!
//! struct Entry {
//!     name: &'static str,
//!     size: u64,
//! }
//!
//! impl Node for Entry {
//!     fn property(&self, name: &str) -> Option<String> {
//!         match name {
//!             "name" => Some(self.name.to_string()),
//!             "ext" => {
//!                 let ext = self.name.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
//!                 Some(ext.to_string())
//!             }
//!             "size" => Some(self.size.to_string()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let settings = Rc::new(Settings::new());
//! let registry = Rc::new(TypeRegistry::new(Rc::clone(&settings)));
//! let filter = Filter::new(
//!     r#"size:">1M" and (ext:"jpg" or ext:"png")"#,
//!     registry,
//!     settings.events(),
//! );
//!
//! let photo = Entry { name: "holiday.jpg", size: 4 << 20 };
//! let note = Entry { name: "notes.txt", size: 512 };
//! assert!(filter.is_match(&photo).unwrap());
//! assert!(!filter.is_match(&note).unwrap());
//! ```

pub mod config;
pub mod expr;
pub mod filter;
pub mod matcher;
pub mod matchers;
pub mod node;

pub use config::{ColumnType, ConfigEvents, Settings, SettingsError, Subscription};
pub use expr::{FilterError, FilterResult};
pub use filter::Filter;
pub use matcher::{ColumnMatcher, CompiledState, MatchError, MatchResult, MatcherRegistry};
pub use matchers::{DateMatcher, SizeMatcher, TextMatcher, TypeRegistry};
pub use node::Node;
