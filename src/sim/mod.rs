//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - No rendering or platform dependencies
//! - Variable `dt` comes in from the frame loop, nothing here reads clocks

pub mod chain;
pub mod collision;
pub mod food;
pub mod state;
pub mod tick;

pub use chain::{Chain, ChainConfig, ChainConfigError, Segment};
pub use collision::{Aabb, CollisionOutcome, resolve_collisions};
pub use food::{Food, FoodPool, FoodPoolConfig, FoodVisual};
pub use state::{GameState, Particle, Screen, FOOD_PALETTE, MAX_PARTICLES, tiles};
pub use tick::{TickInput, tick};
