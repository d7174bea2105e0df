use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random variation the simulated models apply.
pub trait RandomSource: Send {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Multiplier drawn uniformly from `[1 - spread, 1 + spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        1.0 - spread + self.next_unit() * 2.0 * spread
    }

    /// Index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Midpoint source: jitter is exactly 1.0 and every draw is 0.5.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeutralSource;

impl RandomSource for NeutralSource {
    fn next_unit(&mut self) -> f64 {
        0.5
    }

    fn jitter(&mut self, _spread: f64) -> f64 {
        1.0
    }
}
