//! Axis identifiers returned by the vector axis queries.

use serde::{Deserialize, Serialize};

/// A vector axis, numbered in component declaration order.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// First component.
    X = 0,
    /// Second component.
    Y = 1,
    /// Third component.
    Z = 2,
    /// Fourth component.
    W = 3,
}

impl Axis {
    /// Component index of this axis.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Axis for a component index, if there is one.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            3 => Some(Self::W),
            _ => None,
        }
    }
}
