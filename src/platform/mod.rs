//! Platform glue kept pure so it tests natively
//!
//! Maps browser key strings to logical keys and converts canvas pixel
//! coordinates back into world space (the inverse of the renderer's
//! letterboxed world-to-NDC mapping).

use glam::Vec2;

use crate::consts::{MAP_HEIGHT, MAP_WIDTH};
use crate::input::Key;

/// Map a `KeyboardEvent.key` value to a logical key
pub fn map_key(key: &str) -> Option<Key> {
    match key {
        "w" | "W" | "ArrowUp" => Some(Key::Up),
        "s" | "S" | "ArrowDown" => Some(Key::Down),
        "a" | "A" | "ArrowLeft" => Some(Key::Left),
        "d" | "D" | "ArrowRight" => Some(Key::Right),
        " " => Some(Key::Space),
        "Enter" => Some(Key::Enter),
        "=" | "+" => Some(Key::Boost),
        _ => None,
    }
}

/// Convert a canvas pixel position to world coordinates
pub fn canvas_to_world(px: f32, py: f32, canvas_w: f32, canvas_h: f32) -> Vec2 {
    let ndc_x = px / canvas_w * 2.0 - 1.0;
    let ndc_y = 1.0 - py / canvas_h * 2.0;

    let aspect = canvas_w / canvas_h;
    let scale = 2.0 / MAP_WIDTH.max(MAP_HEIGHT);
    let (cx, cy) = if aspect > 1.0 {
        (ndc_x * aspect / scale, ndc_y / scale)
    } else {
        (ndc_x / scale, ndc_y / (scale * aspect))
    };

    Vec2::new(cx + MAP_WIDTH / 2.0, MAP_HEIGHT / 2.0 - cy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key_aliases() {
        assert_eq!(map_key("w"), Some(Key::Up));
        assert_eq!(map_key("ArrowUp"), Some(Key::Up));
        assert_eq!(map_key(" "), Some(Key::Space));
        assert_eq!(map_key("="), Some(Key::Boost));
        assert_eq!(map_key("q"), None);
    }

    #[test]
    fn test_square_canvas_maps_directly() {
        // Square canvas: corners land on map corners
        let center = canvas_to_world(300.0, 300.0, 600.0, 600.0);
        assert!(center.distance(Vec2::new(MAP_WIDTH / 2.0, MAP_HEIGHT / 2.0)) < 1e-3);

        let top_left = canvas_to_world(0.0, 0.0, 600.0, 600.0);
        assert!(top_left.distance(Vec2::ZERO) < 1e-3);

        let bottom_right = canvas_to_world(600.0, 600.0, 600.0, 600.0);
        assert!(bottom_right.distance(Vec2::new(MAP_WIDTH, MAP_HEIGHT)) < 1e-3);
    }

    #[test]
    fn test_wide_canvas_letterboxes() {
        // On a wide canvas the map is centered; the canvas center still maps
        // to the map center and vertical extent is unchanged
        let center = canvas_to_world(600.0, 300.0, 1200.0, 600.0);
        assert!(center.distance(Vec2::new(MAP_WIDTH / 2.0, MAP_HEIGHT / 2.0)) < 1e-3);

        let top = canvas_to_world(600.0, 0.0, 1200.0, 600.0);
        assert!((top.y - 0.0).abs() < 1e-3);
    }
}
