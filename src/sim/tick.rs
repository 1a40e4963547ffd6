//! Per-frame simulation step
//!
//! One `tick` call advances the whole game by a variable wall-clock `dt`.
//! The active-screen pipeline runs in a fixed stage order: steering, motion,
//! collisions, lifecycle, food replenishment.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::state::{GameState, Screen};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Requested heading (world-space direction, any magnitude)
    pub steer: Option<Vec2>,
    /// Hold for double speed
    pub boost: bool,
    /// Start / unpause (space)
    pub start: bool,
    /// Confirm on menu and win screens (enter)
    pub confirm: bool,
    /// Menu level select
    pub level_up: bool,
    pub level_down: bool,
}

/// Advance the game by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    match state.screen {
        Screen::Menu => tick_menu(state, input),
        Screen::Win => {
            if input.confirm || input.start {
                state.screen = Screen::Menu;
            }
        }
        Screen::Active => tick_active(state, input, dt),
    }

    update_particles(state, dt);
}

fn tick_menu(state: &mut GameState, input: &TickInput) {
    if input.level_up {
        state.level = (state.level + 1) % LEVEL_COUNT;
    }
    if input.level_down {
        state.level = (state.level + LEVEL_COUNT - 1) % LEVEL_COUNT;
    }
    if input.start || input.confirm {
        state.start_run();
    }
}

fn tick_active(state: &mut GameState, input: &TickInput, dt: f32) {
    // Space only ever unpauses; pausing happens through death/respawn
    if input.start && state.snake.paused {
        log::info!("run resumed at tick {}", state.time_ticks);
        state.snake.paused = false;
    }
    if state.snake.paused {
        return;
    }

    apply_steering(state, input);
    advance_motion(state, input, dt);
    let outcome = resolve_collisions(
        &mut state.snake,
        &mut state.foods,
        Vec2::new(MAP_WIDTH, MAP_HEIGHT),
    );
    settle_lifecycle(state, outcome.foods_eaten);
    state.foods.replenish();

    let head = state.snake.head();
    state.camera_focus = head.pos + head.size / 2.0;
}

fn apply_steering(state: &mut GameState, input: &TickInput) {
    if let Some(dir) = input.steer {
        state.snake.steer(dir);
    }
}

fn advance_motion(state: &mut GameState, input: &TickInput, dt: f32) {
    let multiplier = if input.boost { BOOST_MULTIPLIER } else { 1.0 };
    state.snake.advance(dt, multiplier);
}

/// Scoring and death handling for this tick's collision outcome. Growth
/// already happened inside the collision stage.
fn settle_lifecycle(state: &mut GameState, foods_eaten: usize) {
    if foods_eaten > 0 {
        state.score += foods_eaten as u64;
        let eaten: Vec<(Vec2, Vec2)> = state
            .foods
            .foods
            .iter()
            .filter(|f| f.destroyed)
            .map(|f| (f.pos, f.size))
            .collect();
        for (pos, size) in eaten {
            state.spawn_burst(pos + size / 2.0, [0.95, 0.85, 0.4, 1.0], 8);
        }
    }

    if state.snake.died {
        let head = state.snake.head();
        let head_center = head.pos + head.size / 2.0;
        state.spawn_burst(head_center, [0.9, 0.2, 0.2, 1.0], 24);
        state.lives -= 1;
        log::info!("died at tick {}, lives left {}", state.time_ticks, state.lives);

        if state.lives == 0 {
            state.game_over();
        } else {
            state.respawn();
        }
    }
}

fn update_particles(state: &mut GameState, dt: f32) {
    for particle in &mut state.particles {
        particle.pos += particle.vel * dt;
        particle.vel *= 0.96;
        particle.life -= dt * 1.5;
        particle.size *= 0.99;
    }
    state.particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_state() -> GameState {
        let mut state = GameState::new(3).unwrap();
        state.start_run();
        state.snake.paused = false;
        // Keep foods out of the snake's path unless a test plants one
        for food in &mut state.foods.foods {
            food.pos = Vec2::new(5.0, 5.0);
        }
        state
    }

    #[test]
    fn test_menu_level_select_wraps() {
        let mut state = GameState::new(1).unwrap();
        let up = TickInput {
            level_up: true,
            ..TickInput::default()
        };
        let down = TickInput {
            level_down: true,
            ..TickInput::default()
        };

        assert_eq!(state.level, 0);
        tick(&mut state, &down, 0.016);
        assert_eq!(state.level, LEVEL_COUNT - 1);
        tick(&mut state, &up, 0.016);
        assert_eq!(state.level, 0);
    }

    #[test]
    fn test_menu_start_begins_run_paused() {
        let mut state = GameState::new(1).unwrap();
        let start = TickInput {
            start: true,
            ..TickInput::default()
        };
        tick(&mut state, &start, 0.016);
        assert_eq!(state.screen, Screen::Active);
        assert!(state.snake.paused);
    }

    #[test]
    fn test_start_unpauses_then_moves() {
        let mut state = active_state();
        state.snake.paused = true;
        let head_before = state.snake.head().pos;

        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.snake.head().pos, head_before);

        let start = TickInput {
            start: true,
            ..TickInput::default()
        };
        tick(&mut state, &start, 0.016);
        assert!(!state.snake.paused);
        assert_ne!(state.snake.head().pos, head_before);
    }

    #[test]
    fn test_eating_grows_scores_and_replenishes() {
        let mut state = active_state();
        let head = *state.snake.head();
        // Plant one food directly ahead of the head
        state.foods.foods[0].pos = head.pos + state.snake.velocity.normalize() * 4.0;
        let len_before = state.snake.len();
        let pool_before = state.foods.len();

        tick(&mut state, &TickInput::default(), 0.016);

        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), len_before + 1);
        assert_eq!(state.foods.len(), pool_before);
        assert!(state.foods.foods.iter().all(|f| !f.destroyed));
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_collision_uses_post_move_head() {
        let mut state = active_state();
        let head = *state.snake.head();
        // Food just out of reach of the pre-move head box (24 wide, heading
        // up at 100/s): only the moved head overlaps it
        state.foods.foods[0].pos = Vec2::new(head.pos.x, head.pos.y - 16.0);

        tick(&mut state, &TickInput::default(), 0.05);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_boost_doubles_displacement() {
        let mut plain = active_state();
        let mut boosted = active_state();
        let start = plain.snake.head().pos;

        tick(&mut plain, &TickInput::default(), 0.016);
        let boost = TickInput {
            boost: true,
            ..TickInput::default()
        };
        tick(&mut boosted, &boost, 0.016);

        let d_plain = plain.snake.head().pos.distance(start);
        let d_boost = boosted.snake.head().pos.distance(start);
        assert!((d_boost - d_plain * BOOST_MULTIPLIER).abs() < 1e-3);
    }

    /// Drive the snake until it leaves the map
    fn run_until_death(state: &mut GameState, max_ticks: usize) -> bool {
        let lives = state.lives;
        let screen = state.screen;
        for _ in 0..max_ticks {
            tick(state, &TickInput::default(), 0.05);
            if state.lives != lives || state.screen != screen {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_death_consumes_life_and_respawns_paused() {
        let mut state = active_state();
        state.snake.push_tail();
        let len = state.snake.len();

        assert!(run_until_death(&mut state, 400));
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.screen, Screen::Active);
        assert!(state.snake.paused);
        // Length survives the respawn
        assert_eq!(state.snake.len(), len);
    }

    #[test]
    fn test_final_death_returns_to_menu_fully_reset() {
        let mut state = active_state();
        state.lives = 1;
        state.snake.push_tail();

        assert!(run_until_death(&mut state, 400));
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.snake.len(), INITIAL_LENGTH);
    }

    #[test]
    fn test_win_confirm_returns_to_menu() {
        let mut state = active_state();
        state.declare_win();
        assert_eq!(state.screen, Screen::Win);

        let confirm = TickInput {
            confirm: true,
            ..TickInput::default()
        };
        tick(&mut state, &confirm, 0.016);
        assert_eq!(state.screen, Screen::Menu);
    }

    #[test]
    fn test_camera_follows_head() {
        let mut state = active_state();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), 0.016);
        }
        let head = state.snake.head();
        assert_eq!(state.camera_focus, head.pos + head.size / 2.0);
    }

    #[test]
    fn test_particles_decay_away() {
        let mut state = active_state();
        state.spawn_burst(Vec2::splat(300.0), [1.0; 4], 16);
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), 0.05);
        }
        assert!(state.particles.is_empty());
    }
}
