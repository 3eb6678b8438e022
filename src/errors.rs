//! Error types for the bidirectional map.
//!
//! Everything else in this crate fails soft: a missed substring search is a
//! sentinel view, malformed query text is absorbed into empty-view semantics,
//! and a terminated accept stream is the normal end of iteration. Only the
//! [`BijectiveMap`](crate::BijectiveMap) surfaces real errors, because its
//! two-way uniqueness invariant is a contract the caller must hold.

use std::{error, fmt};

/// Failures of [`BijectiveMap`](crate::BijectiveMap) construction, lookup
/// and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BimapError {
    /// A pair list used for construction repeats a key.
    DuplicateKey,

    /// A pair list used for construction repeats a value.
    DuplicateValue,

    /// Forward lookup miss: the requested key is not present.
    KeyNotFound,

    /// Inverse lookup miss: the requested value is not present.
    ValueNotFound,

    /// A write would bind a value that is already owned by a different key.
    ///
    /// The map rejects the write and stays unchanged; silently re-binding
    /// the value would break inverse lookup for the previous owner.
    InvariantViolation,
}

impl error::Error for BimapError {}

impl fmt::Display for BimapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BimapError::DuplicateKey => {
                write!(f, "duplicate key in construction pair list")
            }
            BimapError::DuplicateValue => {
                write!(f, "duplicate value in construction pair list")
            }
            BimapError::KeyNotFound => {
                write!(f, "key not present in bijective map")
            }
            BimapError::ValueNotFound => {
                write!(f, "value not present in bijective map")
            }
            BimapError::InvariantViolation => {
                write!(f, "value is already bound to a different key")
            }
        }
    }
}
