//! Food pool: a fixed-size set of pickups scattered over the map
//!
//! Two categories coexist: sprite foods drawn from atlas tiles and flat
//! color foods drawn as tinted quads. Eaten food is replaced in place by a
//! fresh one of the same category, so the pool size never changes.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

/// How a food renders
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoodVisual {
    /// Atlas tile index
    Sprite(u32),
    /// Solid RGBA tint on the plain quad
    Flat([f32; 4]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub pos: Vec2,
    pub size: Vec2,
    pub visual: FoodVisual,
    pub destroyed: bool,
}

/// White placeholder when no visuals were configured
const PLACEHOLDER: FoodVisual = FoodVisual::Flat([1.0, 1.0, 1.0, 1.0]);

/// Construction parameters for the pool
#[derive(Debug, Clone)]
pub struct FoodPoolConfig {
    pub map_size: Vec2,
    pub food_size: Vec2,
    /// Atlas tiles drawn from for sprite foods
    pub sprite_tiles: Vec<u32>,
    /// Tints drawn from for flat color foods
    pub palette: Vec<[f32; 4]>,
    pub sprite_count: usize,
    pub color_count: usize,
}

/// Fixed pool of foods with deterministic seeded placement
#[derive(Debug, Clone)]
pub struct FoodPool {
    pub foods: Vec<Food>,
    cfg: FoodPoolConfig,
    rng: Pcg32,
}

impl FoodPool {
    pub fn new(seed: u64, cfg: FoodPoolConfig) -> Self {
        let mut pool = Self {
            foods: Vec::with_capacity(cfg.sprite_count + cfg.color_count),
            cfg,
            rng: Pcg32::new(seed, 0xa02bdbf7bb3c0a7),
        };
        for _ in 0..pool.cfg.sprite_count {
            let food = pool.fresh_food(true);
            pool.foods.push(food);
        }
        for _ in 0..pool.cfg.color_count {
            let food = pool.fresh_food(false);
            pool.foods.push(food);
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Uniform position keeping the whole food box inside the map
    fn random_pos(&mut self) -> Vec2 {
        let max = self.cfg.map_size - self.cfg.food_size;
        Vec2::new(
            self.rng.random_range(0.0..=max.x),
            self.rng.random_range(0.0..=max.y),
        )
    }

    fn fresh_food(&mut self, sprite: bool) -> Food {
        let visual = if sprite {
            if self.cfg.sprite_tiles.is_empty() {
                PLACEHOLDER
            } else {
                let i = self.rng.random_range(0..self.cfg.sprite_tiles.len());
                FoodVisual::Sprite(self.cfg.sprite_tiles[i])
            }
        } else if self.cfg.palette.is_empty() {
            PLACEHOLDER
        } else {
            let i = self.rng.random_range(0..self.cfg.palette.len());
            FoodVisual::Flat(self.cfg.palette[i])
        };
        Food {
            pos: self.random_pos(),
            size: self.cfg.food_size,
            visual,
            destroyed: false,
        }
    }

    /// Replace every destroyed food with a fresh one of the same category.
    /// Returns the number replaced.
    pub fn replenish(&mut self) -> usize {
        let mut replaced = 0;
        for i in 0..self.foods.len() {
            if !self.foods[i].destroyed {
                continue;
            }
            let sprite = matches!(self.foods[i].visual, FoodVisual::Sprite(_));
            self.foods[i] = self.fresh_food(sprite);
            replaced += 1;
        }
        replaced
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> FoodPoolConfig {
        FoodPoolConfig {
            map_size: Vec2::splat(600.0),
            food_size: Vec2::splat(12.0),
            sprite_tiles: vec![4, 5, 6],
            palette: vec![[1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0]],
            sprite_count: 6,
            color_count: 6,
        }
    }

    fn category_counts(pool: &FoodPool) -> (usize, usize) {
        let sprites = pool
            .foods
            .iter()
            .filter(|f| matches!(f.visual, FoodVisual::Sprite(_)))
            .count();
        (sprites, pool.len() - sprites)
    }

    #[test]
    fn test_spawns_both_categories_in_bounds() {
        let pool = FoodPool::new(7, test_config());
        assert_eq!(pool.len(), 12);
        assert_eq!(category_counts(&pool), (6, 6));

        for food in &pool.foods {
            assert!(food.pos.x >= 0.0 && food.pos.x + food.size.x <= 600.0);
            assert!(food.pos.y >= 0.0 && food.pos.y + food.size.y <= 600.0);
            assert!(!food.destroyed);
        }
    }

    #[test]
    fn test_replenish_preserves_pool_size_and_category() {
        let mut pool = FoodPool::new(7, test_config());
        pool.foods[0].destroyed = true; // a sprite food
        pool.foods[11].destroyed = true; // a color food
        let old_sprite_pos = pool.foods[0].pos;

        assert_eq!(pool.replenish(), 2);

        assert_eq!(pool.len(), 12);
        assert_eq!(category_counts(&pool), (6, 6));
        assert!(pool.foods.iter().all(|f| !f.destroyed));
        assert_ne!(pool.foods[0].pos, old_sprite_pos);
    }

    #[test]
    fn test_replenish_without_destroyed_is_noop() {
        let mut pool = FoodPool::new(7, test_config());
        let snapshot = pool.foods.clone();
        assert_eq!(pool.replenish(), 0);
        assert_eq!(pool.foods, snapshot);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = FoodPool::new(42, test_config());
        let b = FoodPool::new(42, test_config());
        assert_eq!(a.foods, b.foods);
    }

    #[test]
    fn test_empty_visual_sets_fall_back_to_placeholder() {
        let mut cfg = test_config();
        cfg.sprite_tiles = vec![];
        cfg.palette = vec![];
        let pool = FoodPool::new(1, cfg);
        assert!(pool.foods.iter().all(|f| f.visual == PLACEHOLDER));
    }
}
