//! Sorted associative containers.
//!
//! This module provides [`OrderedMap`], a mutable map with unique keys kept in
//! ascending order of a [`Comparator`], together with the handles and
//! iterators it hands out.
//!
//! # Types
//!
//! - [`OrderedMap`]: the map itself, a red-black tree
//! - [`Position`]: a stable, copyable handle to one entry (or the end)
//! - [`NodeHandle`]: an entry detached from a map
//! - [`Comparator`], [`NaturalOrder`], [`ReverseOrder`]: key orderings
//! - [`MapError`]: failures of checked access and auditing
//!
//! # Example
//!
//! ```rust
//! use ordmap::ordered::{OrderedMap, ReverseOrder};
//!
//! let mut scores: OrderedMap<&str, u32, ReverseOrder> = OrderedMap::default();
//! scores.insert("ada", 3);
//! scores.insert("grace", 7);
//! scores.insert("barbara", 5);
//!
//! let names: Vec<&str> = scores.keys().copied().collect();
//! assert_eq!(names, vec!["grace", "barbara", "ada"]);
//! ```

mod compare;
mod error;
mod iter;
mod map;
mod node_handle;
mod position;
#[cfg(feature = "serde")]
mod serde_support;
mod tree;

pub use compare::{Comparator, NaturalOrder, ReverseOrder, ValueComparator};
pub use error::MapError;
pub use iter::{IntoIter, Iter, IterMut, Keys, Range, Values, ValuesMut};
pub use map::OrderedMap;
pub use node_handle::{InsertNodeResult, NodeHandle};
pub use position::Position;
