//! Keyboard and mouse state, turned into per-tick commands
//!
//! Held keys are sampled every frame; one-shot actions use an edge latch so
//! a held key fires exactly once until released. Platform code feeds raw
//! events in, the frame loop calls [`InputState::gather`] once per tick.

use glam::Vec2;

use crate::sim::{Screen, TickInput};

/// Logical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Start / unpause
    Space,
    /// Confirm
    Enter,
    /// Hold for double speed
    Boost,
}

impl Key {
    pub const COUNT: usize = 7;

    fn index(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Down => 1,
            Key::Left => 2,
            Key::Right => 3,
            Key::Space => 4,
            Key::Enter => 5,
            Key::Boost => 6,
        }
    }
}

/// Raw input state accumulated between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    down: [bool; Key::COUNT],
    /// Set once a press has been consumed; cleared on release
    processed: [bool; Key::COUNT],
    /// Pending click position in world coordinates
    mouse_click: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.down[key.index()] = true;
    }

    pub fn key_up(&mut self, key: Key) {
        let i = key.index();
        self.down[i] = false;
        self.processed[i] = false;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    /// One-shot press: true exactly once per physical key press
    pub fn take_press(&mut self, key: Key) -> bool {
        let i = key.index();
        if self.down[i] && !self.processed[i] {
            self.processed[i] = true;
            true
        } else {
            false
        }
    }

    pub fn mouse_click(&mut self, world_pos: Vec2) {
        self.mouse_click = Some(world_pos);
    }

    /// Direction requested by the held movement keys, zero when none.
    /// Y grows downward to match world coordinates.
    fn key_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_down(Key::Up) {
            dir.y -= 1.0;
        }
        if self.is_down(Key::Down) {
            dir.y += 1.0;
        }
        if self.is_down(Key::Left) {
            dir.x -= 1.0;
        }
        if self.is_down(Key::Right) {
            dir.x += 1.0;
        }
        dir
    }

    /// Build this tick's commands. A pending mouse click steers toward the
    /// clicked point and wins over the keyboard for the tick.
    pub fn gather(&mut self, screen: Screen, head_center: Vec2) -> TickInput {
        let steer = if let Some(click) = self.mouse_click.take() {
            let dir = click - head_center;
            (dir.length_squared() > 1e-6).then_some(dir)
        } else {
            let dir = self.key_direction();
            (dir != Vec2::ZERO).then_some(dir)
        };

        let (level_up, level_down) = if screen == Screen::Menu {
            (self.take_press(Key::Up), self.take_press(Key::Down))
        } else {
            (false, false)
        };

        TickInput {
            steer,
            boost: self.is_down(Key::Boost),
            start: self.take_press(Key::Space),
            confirm: self.take_press(Key::Enter),
            level_up,
            level_down,
        }
    }
}
