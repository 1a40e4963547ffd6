//! Neon Snake - a smooth-motion snake arcade game
//!
//! Core modules:
//! - `sim`: Gameplay logic (chain motion, collisions, food pool, state machine)
//! - `renderer`: WebGPU sprite batch pipeline
//! - `input`: Edge-triggered key/mouse snapshot tables
//! - `platform`: Browser/native platform glue

pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use input::{InputState, Key};
pub use settings::{QualityPreset, Settings};

use glam::{Quat, Vec2};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Map dimensions in world units. Origin is the top-left corner and
    /// y grows downward, matching the sprite projection.
    pub const MAP_WIDTH: f32 = 600.0;
    pub const MAP_HEIGHT: f32 = 600.0;

    /// Grid backdrop density
    pub const GRID_ROWS: u32 = 50;
    pub const GRID_COLS: u32 = 50;
    /// One grid cell in world units
    pub const GRID_SIZE: f32 = MAP_WIDTH / GRID_ROWS as f32;

    /// Snake defaults
    pub const SNAKE_SPEED: f32 = 100.0;
    /// Default heading (up; y is down-positive)
    pub const SNAKE_START_DIR: Vec2 = Vec2::new(0.0, -1.0);
    /// Segment size - two grid cells square
    pub const NODE_SIZE: f32 = GRID_SIZE * 2.0;
    pub const INITIAL_LENGTH: usize = 30;
    /// The head/body art points up; rotate it to face the travel direction
    pub const SPRITE_ROTATION_DEG: f32 = 90.0;
    /// Speed multiplier while the boost key is held
    pub const BOOST_MULTIPLIER: f32 = 2.0;

    pub const START_LIVES: u8 = 3;
    pub const LEVEL_COUNT: u32 = 4;

    /// Food defaults
    pub const FOOD_SIZE: f32 = GRID_SIZE;
    pub const SPRITE_FOOD_COUNT: usize = 6;
    pub const COLOR_FOOD_COUNT: usize = 6;

    /// Minimum frame interval before a tick runs (~60 Hz gate)
    pub const MIN_FRAME_DT: f32 = 1.0 / 60.0;
    /// Upper clamp on wall-clock dt fed into the sim
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Orientation quaternion for a travel direction, including the fixed
/// sprite-alignment offset (degrees)
#[inline]
pub fn heading_quat(dir: Vec2, offset_deg: f32) -> Quat {
    let deg = dir.y.atan2(dir.x).to_degrees() + offset_deg;
    Quat::from_rotation_z(deg.to_radians())
}

/// Z rotation angle (radians) carried by a quaternion
///
/// Exact for pure z rotations, which is all the sim produces.
#[inline]
pub fn quat_z_angle(q: Quat) -> f32 {
    2.0 * q.z.atan2(q.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_quat_roundtrip() {
        let q = heading_quat(Vec2::new(1.0, 0.0), 0.0);
        assert!(quat_z_angle(q).abs() < 1e-5);

        let q = heading_quat(Vec2::new(0.0, 1.0), 0.0);
        assert!((quat_z_angle(q) - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_heading_quat_offset() {
        // Facing +x with a 90 degree art offset lands at +90 degrees
        let q = heading_quat(Vec2::new(1.0, 0.0), 90.0);
        assert!((quat_z_angle(q) - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
