//! Random source injected into every generation stage.

use rand::prelude::*;

/// Uniform draws consumed by crystal generation.
///
/// Generation takes this as an explicit dependency so a seeded or scripted
/// source makes the whole pipeline reproducible.
pub trait RandomSource {
    /// Uniform float in `[min, max]`. Returns `min` when the range is empty.
    fn uniform_float(&mut self, min: f32, max: f32) -> f32;

    /// Uniform integer in `[min, max_exclusive)`. Returns `min` when
    /// `max_exclusive <= min`.
    fn uniform_int(&mut self, min: u32, max_exclusive: u32) -> u32;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn uniform_float(&mut self, min: f32, max: f32) -> f32 {
        (**self).uniform_float(min, max)
    }

    fn uniform_int(&mut self, min: u32, max_exclusive: u32) -> u32 {
        (**self).uniform_int(min, max_exclusive)
    }
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform_float(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn uniform_int(&mut self, min: u32, max_exclusive: u32) -> u32 {
        if max_exclusive <= min {
            return min;
        }
        self.rng.gen_range(min..max_exclusive)
    }
}

/// Scripted source that replays a fixed sequence of draws, cycling when it
/// runs out.
///
/// Float draws are stored as unit fractions `t` and mapped to
/// `min + t * (max - min)`, so the same script works for any range. Integer
/// draws are clamped into the requested range.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    fractions: Vec<f32>,
    ints: Vec<u32>,
    float_cursor: usize,
    int_cursor: usize,
}

impl ReplaySource {
    pub fn new(fractions: Vec<f32>, ints: Vec<u32>) -> Self {
        Self {
            fractions,
            ints,
            float_cursor: 0,
            int_cursor: 0,
        }
    }

    /// Every float draw lands at fraction `t` of its range.
    pub fn constant(t: f32) -> Self {
        Self::new(vec![t], Vec::new())
    }

    /// Number of float draws consumed so far.
    pub fn float_draws(&self) -> usize {
        self.float_cursor
    }

    /// Number of integer draws consumed so far.
    pub fn int_draws(&self) -> usize {
        self.int_cursor
    }
}

impl RandomSource for ReplaySource {
    fn uniform_float(&mut self, min: f32, max: f32) -> f32 {
        let t = if self.fractions.is_empty() {
            0.5
        } else {
            self.fractions[self.float_cursor % self.fractions.len()].clamp(0.0, 1.0)
        };
        self.float_cursor += 1;
        if min >= max {
            return min;
        }
        min + t * (max - min)
    }

    fn uniform_int(&mut self, min: u32, max_exclusive: u32) -> u32 {
        let value = if self.ints.is_empty() {
            min
        } else {
            self.ints[self.int_cursor % self.ints.len()]
        };
        self.int_cursor += 1;
        if max_exclusive <= min {
            return min;
        }
        value.clamp(min, max_exclusive - 1)
    }
}
