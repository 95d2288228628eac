//! Collision queries and platform response
//!
//! Everything here works on anything that exposes a bounding box, so the
//! player, enemies, bullets and goals share one set of overlap queries.

use super::aabb::Aabb;

/// Anything with a position and extent in view space
pub trait Bounded {
    fn bounds(&self) -> Aabb;
}

impl Bounded for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

/// Indices of every item in `items` whose box overlaps `target`, in order
pub fn overlapping_indices<T: Bounded>(target: &Aabb, items: &[T]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.bounds().overlaps(target))
        .map(|(i, _)| i)
        .collect()
}

/// True if `target` overlaps at least one item
pub fn any_overlap<T: Bounded>(target: &Aabb, items: &[T]) -> bool {
    items.iter().any(|item| item.bounds().overlaps(target))
}

/// Result of resolving a vertical move against platforms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalResolution {
    /// Index of the platform the body came to rest on (falling case)
    pub landed_on: Option<usize>,
}

impl VerticalResolution {
    pub fn landed(&self) -> bool {
        self.landed_on.is_some()
    }
}

/// Integrate gravity, advance the body vertically, then push it out of
/// every platform it now overlaps.
///
/// The overlap set is gathered once after the move and resolved in platform
/// order. A falling body snaps its bottom to the platform top; a rising body
/// snaps its top to the platform underside. Either case zeroes the velocity,
/// so with stacked overlapping platforms only the first one in order takes
/// effect.
pub fn integrate_vertical<T: Bounded>(
    bounds: &mut Aabb,
    velocity_y: &mut f32,
    gravity: f32,
    platforms: &[T],
) -> VerticalResolution {
    *velocity_y += gravity;
    bounds.pos.y += *velocity_y;

    let mut result = VerticalResolution::default();
    for index in overlapping_indices(bounds, platforms) {
        let platform = platforms[index].bounds();
        if *velocity_y > 0.0 {
            bounds.set_bottom(platform.top());
            *velocity_y = 0.0;
            result.landed_on = Some(index);
        } else if *velocity_y < 0.0 {
            bounds.set_top(platform.bottom());
            *velocity_y = 0.0;
        }
    }
    result
}
