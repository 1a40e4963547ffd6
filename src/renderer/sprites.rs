//! Scene geometry: turns game state into a vertex list
//!
//! Everything is quads. Sprites rotate around their center; the grid and
//! particles are solid-tile quads.

use glam::Vec2;

use super::atlas::{self, uv_rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::quat_z_angle;
use crate::settings::Settings;
use crate::sim::{FoodVisual, GameState};

/// Append a rotated textured quad (two triangles) centered on `center`
pub fn sprite_quad(
    out: &mut Vec<Vertex>,
    center: Vec2,
    size: Vec2,
    angle: f32,
    tile: u32,
    color: [f32; 4],
) {
    let [u0, v0, u1, v1] = uv_rect(tile);
    let half = size / 2.0;
    let (sin, cos) = angle.sin_cos();
    let rotate = |local: Vec2| {
        center
            + Vec2::new(
                local.x * cos - local.y * sin,
                local.x * sin + local.y * cos,
            )
    };

    let tl = rotate(Vec2::new(-half.x, -half.y));
    let tr = rotate(Vec2::new(half.x, -half.y));
    let bl = rotate(Vec2::new(-half.x, half.y));
    let br = rotate(Vec2::new(half.x, half.y));

    out.push(Vertex::new(tl.x, tl.y, [u0, v0], color));
    out.push(Vertex::new(bl.x, bl.y, [u0, v1], color));
    out.push(Vertex::new(tr.x, tr.y, [u1, v0], color));

    out.push(Vertex::new(tr.x, tr.y, [u1, v0], color));
    out.push(Vertex::new(bl.x, bl.y, [u0, v1], color));
    out.push(Vertex::new(br.x, br.y, [u1, v1], color));
}

/// Axis-aligned untextured quad, `pos` is the top-left corner
pub fn solid_quad(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    sprite_quad(out, pos + size / 2.0, size, 0.0, atlas::SOLID, color);
}

/// Background grid lines over the whole map
fn grid(out: &mut Vec<Vertex>) {
    let width = 1.0;
    for col in 0..=GRID_COLS {
        let x = col as f32 * GRID_SIZE;
        solid_quad(
            out,
            Vec2::new(x - width / 2.0, 0.0),
            Vec2::new(width, MAP_HEIGHT),
            colors::GRID,
        );
    }
    for row in 0..=GRID_ROWS {
        let y = row as f32 * GRID_SIZE;
        solid_quad(
            out,
            Vec2::new(0.0, y - width / 2.0),
            Vec2::new(MAP_WIDTH, width),
            colors::GRID,
        );
    }
}

/// Map edge, drawn on every preset so the play bounds stay visible
fn border(out: &mut Vec<Vertex>) {
    let width = 2.0;
    let map = Vec2::new(MAP_WIDTH, MAP_HEIGHT);
    solid_quad(out, Vec2::ZERO, Vec2::new(map.x, width), colors::BORDER);
    solid_quad(out, Vec2::new(0.0, map.y - width), Vec2::new(map.x, width), colors::BORDER);
    solid_quad(out, Vec2::ZERO, Vec2::new(width, map.y), colors::BORDER);
    solid_quad(out, Vec2::new(map.x - width, 0.0), Vec2::new(width, map.y), colors::BORDER);
}

/// Build the full frame's vertex list. Draw order is paint order: grid,
/// border, foods, snake body tail first, head last so it sits on top.
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(2048);

    if settings.quality.grid_enabled() {
        grid(&mut out);
    }
    border(&mut out);

    for food in &state.foods.foods {
        if food.destroyed {
            continue;
        }
        match food.visual {
            FoodVisual::Sprite(tile) => {
                sprite_quad(
                    &mut out,
                    food.pos + food.size / 2.0,
                    food.size,
                    0.0,
                    tile,
                    colors::WHITE,
                );
            }
            FoodVisual::Flat(color) => solid_quad(&mut out, food.pos, food.size, color),
        }
    }

    for (i, seg) in state.snake.nodes.iter().enumerate().rev() {
        let tint = if i == 0 { colors::SNAKE_HEAD } else { colors::SNAKE };
        sprite_quad(
            &mut out,
            seg.pos + seg.size / 2.0,
            seg.size,
            quat_z_angle(seg.rotation),
            seg.sprite,
            tint,
        );
    }

    let particle_cap = settings.max_particles();
    for particle in state.particles.iter().take(particle_cap) {
        let mut color = particle.color;
        color[3] = particle.life;
        sprite_quad(
            &mut out,
            particle.pos,
            Vec2::splat(particle.size),
            0.0,
            atlas::SOLID,
            color,
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_unrotated_quad_corners() {
        let mut out = Vec::new();
        sprite_quad(
            &mut out,
            Vec2::new(10.0, 20.0),
            Vec2::new(4.0, 6.0),
            0.0,
            atlas::SOLID,
            colors::WHITE,
        );
        assert_eq!(out.len(), 6);
        assert_eq!(out[0].position, [8.0, 17.0]);
        assert_eq!(out[5].position, [12.0, 23.0]);
    }

    #[test]
    fn test_quarter_turn_swaps_extents() {
        let mut out = Vec::new();
        sprite_quad(
            &mut out,
            Vec2::ZERO,
            Vec2::new(10.0, 2.0),
            FRAC_PI_2,
            atlas::SOLID,
            colors::WHITE,
        );
        // A wide quad turned 90 degrees becomes tall
        let max_x = out.iter().map(|v| v.position[0].abs()).fold(0.0, f32::max);
        let max_y = out.iter().map(|v| v.position[1].abs()).fold(0.0, f32::max);
        assert!((max_x - 1.0).abs() < 1e-4);
        assert!((max_y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_scene_draws_head_on_top() {
        let state = GameState::new(1).unwrap();
        let settings = Settings::default();
        let verts = build_scene(&state, &settings);
        assert!(!verts.is_empty());

        // Last snake quad is the head
        let head = state.snake.head();
        let head_center = head.pos + head.size / 2.0;
        let last = &verts[verts.len() - 6..];
        for v in last {
            let d = Vec2::new(v.position[0], v.position[1]).distance(head_center);
            assert!(d <= head.size.length());
        }
    }

    #[test]
    fn test_destroyed_food_not_drawn() {
        let mut state = GameState::new(1).unwrap();
        let settings = Settings::default();
        let before = build_scene(&state, &settings).len();
        state.foods.foods[0].destroyed = true;
        let after = build_scene(&state, &settings).len();
        assert_eq!(before - after, 6);
    }
}
