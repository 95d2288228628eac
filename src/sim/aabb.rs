//! Axis-aligned bounding boxes
//!
//! Every entity is a rectangle in view space: `pos` is the top-left corner,
//! `size` the extent. Edges are half-open, so boxes that merely touch
//! (`a.right() == b.left()`) do not overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (never negative)
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width.max(0.0), height.max(0.0)),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size: size.max(Vec2::ZERO),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Move so the bottom edge sits at `y`
    #[inline]
    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    /// Move so the top edge sits at `y`
    #[inline]
    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// True iff the interiors intersect
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlaps(self, other)
    }
}

/// True iff the two boxes' interiors intersect (half-open on right/bottom).
///
/// Zero-sized boxes never overlap anything.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    let width = a.right().min(b.right()) - a.left().max(b.left());
    let height = a.bottom().min(b.bottom()) - a.top().max(b.top());
    width > 0.0 && height > 0.0
}

/// Move `rect` fully inside `bounds`, preserving its size.
///
/// A box larger than `bounds` along an axis is centered on that axis.
pub fn clamp_into(rect: Aabb, bounds: &Aabb) -> Aabb {
    let x = clamp_axis(rect.pos.x, rect.size.x, bounds.pos.x, bounds.size.x);
    let y = clamp_axis(rect.pos.y, rect.size.y, bounds.pos.y, bounds.size.y);
    Aabb {
        pos: Vec2::new(x, y),
        size: rect.size,
    }
}

fn clamp_axis(start: f32, len: f32, bound_start: f32, bound_len: f32) -> f32 {
    if len >= bound_len {
        bound_start + (bound_len - len) / 2.0
    } else if start < bound_start {
        bound_start
    } else if start + len > bound_start + bound_len {
        bound_start + bound_len - len
    } else {
        start
    }
}
