//! Procedural sprite atlas
//!
//! All art is generated at startup into one horizontal RGBA strip, so there
//! is no asset loading. Tiles are grayscale plus alpha and get tinted per
//! vertex. Tile indices are shared with the simulation side.

/// Tile edge length in pixels
pub const TILE_PX: u32 = 32;

/// Tiles in the strip: white, head, body, four food shapes
pub const TILE_COUNT: u32 = 7;

pub const ATLAS_WIDTH: u32 = TILE_PX * TILE_COUNT;
pub const ATLAS_HEIGHT: u32 = TILE_PX;

/// Tile 0 is solid white, used for untextured quads (grid, particles, flats)
pub const SOLID: u32 = 0;

/// Build the RGBA8 atlas strip
pub fn build_atlas() -> Vec<u8> {
    let mut pixels = vec![0u8; (ATLAS_WIDTH * ATLAS_HEIGHT * 4) as usize];
    for tile in 0..TILE_COUNT {
        for py in 0..TILE_PX {
            for px in 0..TILE_PX {
                // Normalized coords in -1..1 from the tile center
                let x = (px as f32 + 0.5) / TILE_PX as f32 * 2.0 - 1.0;
                let y = (py as f32 + 0.5) / TILE_PX as f32 * 2.0 - 1.0;
                let (value, alpha) = shade_tile(tile, x, y);

                let idx = (((py * ATLAS_WIDTH) + tile * TILE_PX + px) * 4) as usize;
                let v = (value * 255.0) as u8;
                pixels[idx] = v;
                pixels[idx + 1] = v;
                pixels[idx + 2] = v;
                pixels[idx + 3] = (alpha * 255.0) as u8;
            }
        }
    }
    pixels
}

/// Grayscale value and alpha for one pixel of a tile
fn shade_tile(tile: u32, x: f32, y: f32) -> (f32, f32) {
    let r = (x * x + y * y).sqrt();
    match tile {
        // Solid white
        0 => (1.0, 1.0),
        // Head: disc with two eye dots toward the top (art faces up)
        1 => {
            if r > 0.95 {
                return (0.0, 0.0);
            }
            let eye = |ex: f32| {
                let dx = x - ex;
                let dy = y + 0.45;
                (dx * dx + dy * dy).sqrt() < 0.18
            };
            if eye(-0.35) || eye(0.35) {
                (0.1, 1.0)
            } else {
                (1.0 - r * 0.25, 1.0)
            }
        }
        // Body: disc with a darker rim
        2 => {
            if r > 0.85 {
                (0.0, 0.0)
            } else if r > 0.65 {
                (0.6, 1.0)
            } else {
                (1.0 - r * 0.2, 1.0)
            }
        }
        // Food shapes: disc, diamond, ring, cross
        3 => in_shape(r < 0.8, r),
        4 => in_shape(x.abs() + y.abs() < 0.8, r),
        5 => in_shape(r > 0.4 && r < 0.8, r),
        _ => in_shape(r < 0.8 && (x.abs() < 0.3 || y.abs() < 0.3), r),
    }
}

fn in_shape(hit: bool, r: f32) -> (f32, f32) {
    if hit { (1.0 - r * 0.2, 1.0) } else { (0.0, 0.0) }
}

/// UV rectangle `[u0, v0, u1, v1]` for a tile, inset half a pixel to keep
/// neighboring tiles from bleeding in
pub fn uv_rect(tile: u32) -> [f32; 4] {
    let tile = tile.min(TILE_COUNT - 1);
    let inset = 0.5 / ATLAS_WIDTH as f32;
    let u0 = tile as f32 / TILE_COUNT as f32 + inset;
    let u1 = (tile + 1) as f32 / TILE_COUNT as f32 - inset;
    let v_inset = 0.5 / ATLAS_HEIGHT as f32;
    [u0, v_inset, u1, 1.0 - v_inset]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_dimensions() {
        let pixels = build_atlas();
        assert_eq!(pixels.len(), (ATLAS_WIDTH * ATLAS_HEIGHT * 4) as usize);
    }

    #[test]
    fn test_solid_tile_is_opaque_white() {
        let pixels = build_atlas();
        for py in 0..TILE_PX {
            for px in 0..TILE_PX {
                let idx = ((py * ATLAS_WIDTH + px) * 4) as usize;
                assert_eq!(&pixels[idx..idx + 4], &[255, 255, 255, 255]);
            }
        }
    }

    #[test]
    fn test_uv_rects_ordered_and_in_bounds() {
        let mut last_u1 = 0.0;
        for tile in 0..TILE_COUNT {
            let [u0, v0, u1, v1] = uv_rect(tile);
            assert!(u0 >= last_u1);
            assert!(u0 < u1 && u1 <= 1.0);
            assert!(v0 < v1 && v1 <= 1.0);
            last_u1 = u1;
        }
    }

    #[test]
    fn test_out_of_range_tile_clamps() {
        assert_eq!(uv_rect(99), uv_rect(TILE_COUNT - 1));
    }
}
