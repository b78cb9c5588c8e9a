//! Shake generator: per-point random jitter for the retro "vibrating" look.
//!
//! Jitter is freshly sampled every time [`ShakeGenerator::shake`] runs, with no
//! smoothing between samples. How often a stroke is re-shaken is decided by the
//! caller using [`frame_interval`], which yields discrete vibration steps.

use kurbo::Point;
use std::time::Duration;

/// Recompute interval at a shake speed of 1.0 (one 60 Hz frame).
pub const BASE_SHAKE_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Smallest accepted shake speed.
pub const MIN_SHAKE_SPEED: f64 = 0.1;

/// Time between jitter recomputes for a stroke with the given shake speed.
///
/// Higher speeds recompute more often. Speeds below [`MIN_SHAKE_SPEED`]
/// (including NaN) are treated as the minimum.
pub fn frame_interval(shake_speed: f64) -> Duration {
    let speed = if shake_speed.is_nan() {
        MIN_SHAKE_SPEED
    } else {
        shake_speed.max(MIN_SHAKE_SPEED)
    };
    BASE_SHAKE_INTERVAL.div_f64(speed)
}

/// Generate a seed for a new generator.
/// Uses a counter + hash approach that works on all platforms including WASM.
pub fn generate_seed() -> u32 {
    use std::sync::atomic::{AtomicU32, Ordering};

    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    // splitmix32-style mixing
    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

/// Seeded xorshift32 random number generator.
#[derive(Debug, Clone)]
pub struct ShakeRng {
    state: u32,
}

impl ShakeRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Random float in range [-1, 1]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u32() as f64 / u32::MAX as f64) * 2.0 - 1.0
    }

    /// Random offset in `[-amount, amount]`
    pub fn offset(&mut self, amount: f64) -> f64 {
        self.next_f64() * amount
    }
}

/// Produces jittered copies of polylines.
#[derive(Debug, Clone)]
pub struct ShakeGenerator {
    rng: ShakeRng,
}

impl Default for ShakeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShakeGenerator {
    /// Create a generator with a fresh seed.
    pub fn new() -> Self {
        Self::with_seed(generate_seed())
    }

    /// Create a generator with a fixed seed (reproducible output).
    pub fn with_seed(seed: u32) -> Self {
        Self {
            rng: ShakeRng::new(seed),
        }
    }

    /// Return a jittered copy of `points`.
    ///
    /// Each coordinate moves independently by up to `offset * intensity`.
    /// A zero amplitude returns the input unchanged; stored points are never
    /// touched.
    pub fn shake(&mut self, points: &[Point], offset: f64, intensity: f64) -> Vec<Point> {
        let amount = amplitude(offset, intensity);
        if amount == 0.0 {
            return points.to_vec();
        }
        points
            .iter()
            .map(|p| Point::new(p.x + self.rng.offset(amount), p.y + self.rng.offset(amount)))
            .collect()
    }
}

/// Effective jitter amplitude; negative or NaN inputs count as zero.
pub fn amplitude(offset: f64, intensity: f64) -> f64 {
    let amount = offset * intensity;
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}
