//! Axis-aligned 2D rectangles, real and integer.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::mathf::Real;
use crate::{Vector2, Vector2i};

/// Axis-aligned rectangle: `position` is the top-left corner.
///
/// Most queries assume a non-negative `size`; call [`Rect2::abs`] first
/// otherwise.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rect2 {
    /// Top-left corner
    pub position: Vector2,
    /// Width and height
    pub size: Vector2,
}

impl Rect2 {
    /// Creates a rect from position and size.
    #[inline]
    #[must_use]
    pub const fn new(position: Vector2, size: Vector2) -> Self {
        Self { position, size }
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn end(&self) -> Vector2 {
        self.position + self.size
    }

    /// Width times height.
    #[must_use]
    pub fn area(&self) -> Real {
        self.size.x * self.size.y
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vector2 {
        self.position + self.size * 0.5
    }

    /// Same rect with a non-negative size.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.position + self.size.minf(0.0), self.size.abs())
    }

    /// Returns `true` if the point is inside. The far edges are exclusive.
    #[must_use]
    pub fn has_point(&self, point: Vector2) -> bool {
        let end = self.end();
        point.x >= self.position.x && point.y >= self.position.y && point.x < end.x && point.y < end.y
    }

    /// Returns `true` if the rects overlap with a non-zero area.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (a_end, b_end) = (self.end(), other.end());
        self.position.x < b_end.x
            && a_end.x > other.position.x
            && self.position.y < b_end.y
            && a_end.y > other.position.y
    }

    /// Returns `true` if `other` lies completely inside.
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        let (a_end, b_end) = (self.end(), other.end());
        other.position.x >= self.position.x
            && other.position.y >= self.position.y
            && b_end.x <= a_end.x
            && b_end.y <= a_end.y
    }

    /// Overlap of the two rects, or `None` if they do not intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let position = self.position.max(other.position);
        let end = self.end().min(other.end());
        Some(Self::new(position, end - position))
    }

    /// Smallest rect enclosing both.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let position = self.position.min(other.position);
        let end = self.end().max(other.end());
        Self::new(position, end - position)
    }

    /// Smallest rect enclosing this one and `to`.
    #[must_use]
    pub fn expand(&self, to: Vector2) -> Self {
        let position = self.position.min(to);
        let end = self.end().max(to);
        Self::new(position, end - position)
    }

    /// Grown by `by` on every side.
    #[must_use]
    pub fn grow(&self, by: Real) -> Self {
        Self::new(self.position - Vector2::ONE * by, self.size + Vector2::ONE * (by * 2.0))
    }

    /// Returns `true` if position and size are approximately equal.
    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.position.is_equal_approx(other.position) && self.size.is_equal_approx(other.size)
    }
}

impl fmt::Display for Rect2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[P: {}, S: {}]", self.position, self.size)
    }
}

/// Integer axis-aligned rectangle.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rect2i {
    /// Top-left corner
    pub position: Vector2i,
    /// Width and height
    pub size: Vector2i,
}

impl Rect2i {
    /// Creates a rect from position and size.
    #[inline]
    #[must_use]
    pub const fn new(position: Vector2i, size: Vector2i) -> Self {
        Self { position, size }
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn end(&self) -> Vector2i {
        self.position + self.size
    }

    /// Width times height.
    #[must_use]
    pub const fn area(&self) -> i32 {
        self.size.x * self.size.y
    }

    /// Same rect with a non-negative size.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.position + self.size.mini(0), self.size.abs())
    }

    /// Returns `true` if the point is inside. The far edges are exclusive.
    #[must_use]
    pub fn has_point(&self, point: Vector2i) -> bool {
        let end = self.end();
        point.x >= self.position.x && point.y >= self.position.y && point.x < end.x && point.y < end.y
    }

    /// Returns `true` if the rects overlap with a non-zero area.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (a_end, b_end) = (self.end(), other.end());
        self.position.x < b_end.x
            && a_end.x > other.position.x
            && self.position.y < b_end.y
            && a_end.y > other.position.y
    }

    /// Smallest rect enclosing both.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let position = self.position.min(other.position);
        let end = self.end().max(other.end());
        Self::new(position, end - position)
    }

    /// Smallest rect enclosing this one and `to`.
    #[must_use]
    pub fn expand(&self, to: Vector2i) -> Self {
        let position = self.position.min(to);
        let end = self.end().max(to);
        Self::new(position, end - position)
    }
}

impl From<Rect2i> for Rect2 {
    fn from(r: Rect2i) -> Self {
        Self::new(r.position.into(), r.size.into())
    }
}

impl fmt::Display for Rect2i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[P: {}, S: {}]", self.position, self.size)
    }
}
