//! # ordmap
//!
//! A mutable sorted map for Rust with stable positions, pluggable
//! comparators and node extraction.
//!
//! ## Overview
//!
//! [`OrderedMap`](ordered::OrderedMap) keeps unique keys in ascending order of
//! a comparator and offers the usual map operations in O(log N), plus:
//!
//! - **Positions**: copyable handles that survive unrelated mutation, usable
//!   as insertion hints and for erase-while-walking
//! - **Comparators**: natural, reverse, closures, or user types, including
//!   heterogeneous lookup (`str` probes for `String` keys)
//! - **Node handles**: detach an entry, edit its key, splice it back
//! - **Range queries**: `lower_bound`, `upper_bound`, `equal_range`, `range`
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for maps
//! - `tour`: builds the `map-tour` demonstration binary
//!
//! ## Example
//!
//! ```rust
//! use ordmap::prelude::*;
//!
//! let mut inventory: OrderedMap<String, u32> = OrderedMap::new();
//! inventory.insert("widget".to_string(), 3);
//! inventory.insert("gadget".to_string(), 5);
//! *inventory.get_or_default("widget".to_string()) += 1;
//!
//! assert_eq!(inventory.get("widget"), Some(&4));
//! assert_eq!(inventory.keys().next().map(String::as_str), Some("gadget"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use ordmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ordered::{
        Comparator, MapError, NaturalOrder, NodeHandle, OrderedMap, Position, ReverseOrder,
    };
}

pub mod ordered;
