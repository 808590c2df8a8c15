use core::f32::consts::PI;
use core::ops::RangeInclusive;

use anyhow::Result;
use petal_engine::coords::Vec2;
use petal_engine::paint::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::flower::Flower;

pub const RADIUS_RANGE: RangeInclusive<f32> = 60.0..=90.0;
pub const PETAL_COUNT_RANGE: RangeInclusive<u32> = 6..=50;
/// Petal width as a share of the widest non-overlapping petal.
pub const OUTSIDE_FILL_RANGE: RangeInclusive<f32> = 0.9..=1.0;
/// Inside radius as a share of the outside radius.
pub const INSIDE_RATIO_RANGE: RangeInclusive<f32> = 0.2..=0.4;
pub const FLOWER_ALPHA: f32 = 0.65;

/// Samples random flowers.
pub struct FlowerSpawner<R: Rng = StdRng> {
    rng: R,
}

impl FlowerSpawner<StdRng> {
    /// Reproducible sequence of flowers for `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> FlowerSpawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// A new flower centered at `at`.
    ///
    /// Outside petal radius is half the circumference share of one petal,
    /// shrunk slightly, so neighbouring petals touch at most.
    pub fn spawn(&mut self, at: Vec2) -> Result<Flower> {
        let radius = self.rng.gen_range(RADIUS_RANGE);
        let petal_count = self.rng.gen_range(PETAL_COUNT_RANGE);
        let outside = (2.0 * PI * radius) / petal_count as f32 / 2.0
            * self.rng.gen_range(OUTSIDE_FILL_RANGE);
        let inside = outside * self.rng.gen_range(INSIDE_RATIO_RANGE);
        let hue: f32 = self.rng.r#gen();
        let color = Color::from_hsva(hue, 1.0, 1.0, FLOWER_ALPHA);

        Flower::new(at, radius, outside, inside, petal_count, color)
    }
}
