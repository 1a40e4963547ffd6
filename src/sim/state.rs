//! Top-level game state
//!
//! Everything the simulation mutates lives here; rendering only reads it.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::chain::{Chain, ChainConfig, ChainConfigError};
use super::food::{FoodPool, FoodPoolConfig};
use crate::consts::*;

/// Which screen the player is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Title / level select
    Menu,
    /// Gameplay (running or paused via the chain's pause flag)
    Active,
    /// Victory splash
    Win,
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Atlas tiles used by the simulation side
pub mod tiles {
    pub const HEAD: u32 = 1;
    pub const BODY: u32 = 2;
    pub const FOOD_BASE: u32 = 3;
    pub const FOOD_COUNT: u32 = 4;
}

/// Flat tints for the color food category
pub const FOOD_PALETTE: [[f32; 4]; 5] = [
    [0.95, 0.30, 0.30, 1.0],
    [0.35, 0.85, 0.40, 1.0],
    [0.35, 0.55, 0.95, 1.0],
    [0.95, 0.80, 0.30, 1.0],
    [0.80, 0.40, 0.90, 1.0],
];

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible food layouts
    pub seed: u64,
    /// Selected level (0-based)
    pub level: u32,
    pub lives: u8,
    /// Foods eaten this run
    pub score: u64,
    pub screen: Screen,
    pub snake: Chain,
    pub foods: FoodPool,
    /// Point the camera keeps centered (follows the head)
    pub camera_focus: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64) -> Result<Self, ChainConfigError> {
        let origin = spawn_origin();
        let snake = Chain::new(ChainConfig {
            origin,
            node_size: Vec2::splat(NODE_SIZE),
            initial_len: INITIAL_LENGTH,
            sprites: vec![tiles::HEAD, tiles::BODY],
            sprite_rotation_deg: SPRITE_ROTATION_DEG,
            velocity: SNAKE_START_DIR * SNAKE_SPEED,
        })?;
        let foods = FoodPool::new(seed, food_config(0));

        Ok(Self {
            seed,
            level: 0,
            lives: START_LIVES,
            score: 0,
            screen: Screen::Menu,
            snake,
            foods,
            camera_focus: origin,
            time_ticks: 0,
            particles: Vec::new(),
            rng: Pcg32::new(seed ^ 0x5eed, 0xa02bdbf7bb3c0a7),
        })
    }

    /// External win trigger (level scripting, debug key). The simulation
    /// never declares victory on its own.
    pub fn declare_win(&mut self) {
        if self.screen == Screen::Active {
            log::info!("win declared at tick {}", self.time_ticks);
            self.screen = Screen::Win;
        }
    }

    /// Fresh run on the currently selected level. Higher levels start a
    /// little faster and scatter a little more food.
    pub fn start_run(&mut self) {
        log::info!("starting level {}", self.level);
        self.lives = START_LIVES;
        self.score = 0;
        self.screen = Screen::Active;
        self.snake
            .reset(spawn_origin(), SNAKE_START_DIR * level_speed(self.level));
        self.foods = FoodPool::new(
            self.seed.wrapping_add(self.level as u64),
            food_config(self.level),
        );
        self.particles.clear();
        self.camera_focus = spawn_origin();
    }

    /// Death with lives remaining: fresh spawn, length preserved
    pub fn respawn(&mut self) {
        self.snake
            .respawn(spawn_origin(), SNAKE_START_DIR * level_speed(self.level));
    }

    /// Out of lives: back to the menu with a fully reset snake
    pub fn game_over(&mut self) {
        log::info!("game over at tick {}, score {}", self.time_ticks, self.score);
        self.lives = START_LIVES;
        self.screen = Screen::Menu;
        self.snake
            .reset(spawn_origin(), SNAKE_START_DIR * SNAKE_SPEED);
    }

    /// Spawn a small particle burst, dropping the oldest past the cap
    pub fn spawn_burst(&mut self, pos: Vec2, color: [f32; 4], count: usize) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(20.0..90.0);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                life: 1.0,
                size: self.rng.random_range(2.0..5.0),
            });
        }
    }
}

/// Head spawn point: map center, offset so the head box is centered
fn spawn_origin() -> Vec2 {
    Vec2::new(
        MAP_WIDTH / 2.0 - NODE_SIZE / 2.0,
        MAP_HEIGHT / 2.0 - NODE_SIZE / 2.0,
    )
}

/// Base speed for a level: 10% faster per level
fn level_speed(level: u32) -> f32 {
    SNAKE_SPEED * (1.0 + level as f32 * 0.1)
}

/// Food pool layout for a level: one extra food per category per level
fn food_config(level: u32) -> FoodPoolConfig {
    FoodPoolConfig {
        map_size: Vec2::new(MAP_WIDTH, MAP_HEIGHT),
        food_size: Vec2::splat(FOOD_SIZE),
        sprite_tiles: (0..tiles::FOOD_COUNT).map(|i| tiles::FOOD_BASE + i).collect(),
        palette: FOOD_PALETTE.to_vec(),
        sprite_count: SPRITE_FOOD_COUNT + level as usize,
        color_count: COLOR_FOOD_COUNT + level as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_on_menu() {
        let state = GameState::new(1).unwrap();
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.snake.len(), INITIAL_LENGTH);
        assert_eq!(state.foods.len(), SPRITE_FOOD_COUNT + COLOR_FOOD_COUNT);
        assert!(state.snake.paused);
    }

    #[test]
    fn test_declare_win_only_from_active() {
        let mut state = GameState::new(1).unwrap();
        state.declare_win();
        assert_eq!(state.screen, Screen::Menu);

        state.start_run();
        state.declare_win();
        assert_eq!(state.screen, Screen::Win);
    }

    #[test]
    fn test_start_run_resets_run_state() {
        let mut state = GameState::new(1).unwrap();
        state.lives = 1;
        state.score = 17;
        state.snake.push_tail();

        state.start_run();
        assert_eq!(state.screen, Screen::Active);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), INITIAL_LENGTH);
        assert!(state.snake.paused);
    }

    #[test]
    fn test_levels_scale_speed_and_food() {
        let mut state = GameState::new(1).unwrap();
        state.start_run();
        let base_speed = state.snake.velocity.length();
        let base_foods = state.foods.len();

        state.level = 2;
        state.start_run();
        assert!((state.snake.velocity.length() - base_speed * 1.2).abs() < 1e-3);
        assert_eq!(state.foods.len(), base_foods + 4);
    }

    #[test]
    fn test_respawn_preserves_length() {
        let mut state = GameState::new(1).unwrap();
        state.start_run();
        state.snake.push_tail();
        state.snake.push_tail();
        let len = state.snake.len();

        state.respawn();
        assert_eq!(state.snake.len(), len);
        assert!(state.snake.paused);
    }

    #[test]
    fn test_particle_cap() {
        let mut state = GameState::new(1).unwrap();
        for _ in 0..40 {
            state.spawn_burst(Vec2::splat(100.0), [1.0; 4], 10);
        }
        assert!(state.particles.len() <= MAX_PARTICLES);
    }
}
