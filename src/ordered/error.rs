//! Error types for [`OrderedMap`](super::OrderedMap).
//!
//! Lookups that can miss come in three flavours: [`OrderedMap::get`]
//! returns an `Option`, [`OrderedMap::at`] returns a `Result` carrying
//! [`MapError::KeyNotFound`], and indexing (`map[&key]`) panics with the
//! same message.
//!
//! [`OrderedMap::get`]: super::OrderedMap::get
//! [`OrderedMap::at`]: super::OrderedMap::at

use std::fmt;

use thiserror::Error;

/// Errors reported by [`OrderedMap`](super::OrderedMap).
///
/// # Examples
///
/// ```rust
/// use ordmap::ordered::{MapError, OrderedMap};
///
/// let map: OrderedMap<String, f64> = [("e".to_string(), 2.5)].into();
/// let error = map.at("pi").unwrap_err();
/// assert_eq!(error, MapError::KeyNotFound { key: "\"pi\"".to_string() });
/// assert_eq!(error.to_string(), "key not found: \"pi\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A checked lookup found no entry for the key.
    ///
    /// The key is kept in its `Debug` rendering so that the error does not
    /// borrow from, or require ownership of, the probe.
    #[error("key not found: {key}")]
    KeyNotFound {
        /// `Debug` rendering of the missing key.
        key: String,
    },

    /// The tree failed a structural audit.
    ///
    /// Only [`OrderedMap::verify`](super::OrderedMap::verify) reports this.
    /// It means the comparator is not a strict weak ordering (or changed its
    /// answers after keys were inserted).
    #[error("ordered map invariant violated: {detail}")]
    InvariantViolation {
        /// Which invariant failed, and where.
        detail: String,
    },
}

impl MapError {
    pub(crate) fn key_not_found<Q: fmt::Debug + ?Sized>(key: &Q) -> Self {
        Self::KeyNotFound {
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn invariant_violation(detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MapError::key_not_found(&42), "key not found: 42")]
    #[case(MapError::key_not_found("GPU"), "key not found: \"GPU\"")]
    #[case(
        MapError::invariant_violation("red node 3 has a red child"),
        "ordered map invariant violated: red node 3 has a red child"
    )]
    fn test_display(#[case] error: MapError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<MapError>();
    }
}
