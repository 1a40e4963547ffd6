//! Axis-aligned collision checks for the snake head
//!
//! Everything on the map is a box, so detection is plain AABB overlap with
//! inclusive edges: boxes that exactly touch count as colliding.

use glam::Vec2;

use super::chain::Chain;
use super::food::FoodPool;

/// Axis-aligned bounding box, stored as top-left corner plus extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Overlap test with inclusive edges
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Whether this box sits fully inside `outer` (edges allowed to touch)
    #[inline]
    pub fn inside(&self, outer: &Aabb) -> bool {
        self.min.x >= outer.min.x
            && self.min.y >= outer.min.y
            && self.max.x <= outer.max.x
            && self.max.y <= outer.max.y
    }
}

/// What the head ran into this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Foods newly marked destroyed, one tail appended per food
    pub foods_eaten: usize,
    /// Head box is no longer fully inside the map
    pub left_bounds: bool,
}

/// Run the post-move head against foods and the map boundary. Each eaten
/// food is marked destroyed and grows the chain by one tail; leaving the
/// map sets the chain's died flag. Food replacement and life loss are
/// handled by later tick stages.
pub fn resolve_collisions(
    chain: &mut Chain,
    foods: &mut FoodPool,
    map_size: Vec2,
) -> CollisionOutcome {
    let head = chain.head();
    let head_box = Aabb::new(head.pos, head.size);

    let mut outcome = CollisionOutcome::default();
    for food in &mut foods.foods {
        if food.destroyed {
            continue;
        }
        if head_box.overlaps(&Aabb::new(food.pos, food.size)) {
            food.destroyed = true;
            outcome.foods_eaten += 1;
        }
    }
    for _ in 0..outcome.foods_eaten {
        chain.push_tail();
    }

    let map = Aabb::new(Vec2::ZERO, map_size);
    if !head_box.inside(&map) {
        chain.died = true;
        outcome.left_bounds = true;
    }
    outcome
}
