//! The snake body: an ordered chain of rigid segments that follows the head
//!
//! Segments converge to a fixed inter-node spacing. Each tick every body
//! segment chases its predecessor with positional lerp and rotational slerp,
//! which gives the body an elastic, organic follow motion instead of rigid
//! fixed-distance chaining.

use glam::{Quat, Vec2};

use crate::heading_quat;

/// Treat inter-node distances below this as coincident
const DIST_EPS: f32 = 1e-4;

/// One rigid body unit of the chain (head or body piece)
///
/// `pos` is the top-left corner of the segment's box; `vel` is a unit
/// travel direction. Orientation is carried as a quaternion so follow
/// interpolation can slerp it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub rotation: Quat,
    /// Atlas tile index for rendering
    pub sprite: u32,
    /// Indestructible marker
    pub solid: bool,
    pub destroyed: bool,
}

/// Construction parameters for a chain
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Head position (top-left corner)
    pub origin: Vec2,
    pub node_size: Vec2,
    pub initial_len: usize,
    /// Atlas tiles: `[head, body, ..]`. A single entry is used for both.
    pub sprites: Vec<u32>,
    /// Degrees to rotate the art so it faces the travel direction
    pub sprite_rotation_deg: f32,
    /// Initial velocity; magnitude is the base speed
    pub velocity: Vec2,
}

/// Fatal configuration errors, reported at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainConfigError {
    ZeroLength,
    EmptySpriteSet,
    ZeroVelocity,
}

impl std::fmt::Display for ChainConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainConfigError::ZeroLength => write!(f, "chain length must be at least 1"),
            ChainConfigError::EmptySpriteSet => write!(f, "chain needs at least one sprite"),
            ChainConfigError::ZeroVelocity => write!(f, "chain velocity must be non-zero"),
        }
    }
}

impl std::error::Error for ChainConfigError {}

/// The snake: segments stored head-first
///
/// Invariants:
/// - `nodes` is never empty
/// - `nodes[0].vel` matches the normalized chain velocity
/// - length only changes through [`Chain::push_tail`] or a rebuild
#[derive(Debug, Clone)]
pub struct Chain {
    pub nodes: Vec<Segment>,
    /// Full velocity vector; magnitude is the current base speed
    pub velocity: Vec2,
    /// Target spacing between adjacent segments once settled
    pub node_distance: f32,
    pub paused: bool,
    /// Set when the head leaves the map; cleared on respawn/reset
    pub died: bool,
    /// Authoritative head position, advanced before syncing `nodes[0]`
    head_pos: Vec2,
    node_size: Vec2,
    sprites: Vec<u32>,
    sprite_rotation_deg: f32,
    initial_len: usize,
}

impl Chain {
    pub fn new(cfg: ChainConfig) -> Result<Self, ChainConfigError> {
        if cfg.initial_len == 0 {
            return Err(ChainConfigError::ZeroLength);
        }
        if cfg.sprites.is_empty() {
            return Err(ChainConfigError::EmptySpriteSet);
        }
        if cfg.velocity.length_squared() < DIST_EPS * DIST_EPS {
            return Err(ChainConfigError::ZeroVelocity);
        }

        let mut chain = Self {
            nodes: Vec::with_capacity(cfg.initial_len),
            velocity: cfg.velocity,
            node_distance: cfg.node_size.x,
            paused: true,
            died: false,
            head_pos: cfg.origin,
            node_size: cfg.node_size,
            sprites: cfg.sprites,
            sprite_rotation_deg: cfg.sprite_rotation_deg,
            initial_len: cfg.initial_len,
        };
        chain.build(cfg.origin, cfg.velocity, cfg.initial_len);
        Ok(chain)
    }

    /// Rebuild in place: head at `origin`, tails extrapolated behind it
    fn build(&mut self, origin: Vec2, velocity: Vec2, len: usize) {
        self.nodes.clear();
        self.head_pos = origin;
        self.velocity = velocity;

        let dir = velocity.normalize();
        self.nodes.push(Segment {
            pos: origin,
            size: self.node_size,
            vel: dir,
            rotation: heading_quat(dir, self.sprite_rotation_deg),
            sprite: self.sprites[0],
            solid: true,
            destroyed: false,
        });
        for _ in 1..len {
            self.push_tail();
        }
    }

    fn body_sprite(&self) -> u32 {
        *self.sprites.get(1).unwrap_or(&self.sprites[0])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> &Segment {
        &self.nodes[0]
    }

    /// Grow by one tail segment. This is the only growth entry point, so
    /// geometric continuity is guaranteed: the new segment extrapolates
    /// the current tail's direction of travel.
    pub fn push_tail(&mut self) {
        let last = self.nodes[self.nodes.len() - 1];
        let spacing = if self.nodes.len() >= 2 {
            let before_last = self.nodes[self.nodes.len() - 2];
            last.pos.distance(before_last.pos)
        } else {
            self.node_distance
        };

        self.nodes.push(Segment {
            pos: last.pos - last.vel * spacing,
            size: last.size,
            vel: last.vel,
            rotation: last.rotation,
            sprite: self.body_sprite(),
            solid: true,
            destroyed: false,
        });
    }

    /// Request a heading change. Rejected when the new direction is more
    /// than 90 degrees away from the current heading, which rules out
    /// instant reversal into the body. Speed magnitude is preserved.
    pub fn steer(&mut self, dir: Vec2) -> bool {
        let Some(new_dir) = dir.try_normalize() else {
            return false;
        };
        let heading = self.velocity.normalize();
        if new_dir.dot(heading) < 0.0 {
            return false;
        }
        self.velocity = new_dir * self.velocity.length();
        true
    }

    /// Advance the chain by `dt` seconds. No-op while paused.
    ///
    /// Body segments are visited tail-to-head so each one chases its
    /// predecessor's position from *before* this tick's movement. When a
    /// segment's interpolation factor reaches 1 it has fully caught up and
    /// is skipped for the tick - a deliberate approximation kept for its
    /// gameplay feel, not a bug.
    pub fn advance(&mut self, dt: f32, speed_multiplier: f32) {
        if self.paused {
            return;
        }

        let speed = self.velocity.length() * speed_multiplier;
        // |move vector| / node distance; uniform across segments
        let interp = speed * dt / self.node_distance;

        for i in (1..self.nodes.len()).rev() {
            let prev = self.nodes[i - 1];
            let cur = &mut self.nodes[i];

            let to_prev = prev.pos - cur.pos;
            let distance = to_prev.length();
            if distance <= DIST_EPS {
                // Already coincident; a normalized direction would be NaN
                continue;
            }
            cur.vel = to_prev / distance;
            if interp >= 1.0 {
                continue;
            }
            cur.pos = cur.pos.lerp(prev.pos, interp);
            cur.rotation = cur.rotation.slerp(prev.rotation, interp);
        }

        self.head_pos += self.velocity * dt * speed_multiplier;
        self.sync_head();
    }

    /// Sync `nodes[0]` from the authoritative head position and heading
    fn sync_head(&mut self) {
        let dir = self.velocity.normalize();
        let head = &mut self.nodes[0];
        head.pos = self.head_pos;
        head.vel = dir;
        head.rotation = heading_quat(dir, self.sprite_rotation_deg);
    }

    /// Rebuild at a fresh position/heading, preserving the current length.
    /// The chain comes back paused until the next start input.
    pub fn respawn(&mut self, origin: Vec2, velocity: Vec2) {
        let len = self.nodes.len();
        self.build(origin, velocity, len);
        self.paused = true;
        self.died = false;
    }

    /// Full reset: rebuild at the configured initial length
    pub fn reset(&mut self, origin: Vec2, velocity: Vec2) {
        let len = self.initial_len;
        self.build(origin, velocity, len);
        self.paused = true;
        self.died = false;
    }
}
