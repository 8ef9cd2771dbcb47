//! Random source for the time-penalty jitter
//!
//! The engine is a pure function apart from one uniform draw. Isolating the
//! draw behind `JitterSource` lets prediction turn it off and tests pin it.

use rand::Rng;

/// Supplies one jitter value per evaluation
pub trait JitterSource {
    /// Draw a value in `[0, max)`. Must return 0.0 when `max <= 0.0`.
    fn draw(&mut self, max: f64) -> f64;
}

/// Randomness disabled: every draw is zero
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn draw(&mut self, _max: f64) -> f64 {
        0.0
    }
}

/// A pre-drawn value, clamped into the requested range
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn draw(&mut self, max: f64) -> f64 {
        if max <= 0.0 || !self.0.is_finite() {
            return 0.0;
        }
        // Keep the upper bound exclusive
        let below_max = max - max * f64::EPSILON;
        self.0.clamp(0.0, below_max)
    }
}

/// Uniform draws from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngJitter<R: Rng> {
    rng: R,
}

impl<R: Rng> RngJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> JitterSource for RngJitter<R> {
    fn draw(&mut self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_no_jitter_is_zero() {
        assert_eq!(NoJitter.draw(0.05), 0.0);
    }

    #[test]
    fn test_fixed_jitter_clamped() {
        assert_eq!(FixedJitter(0.02).draw(0.05), 0.02);
        assert_eq!(FixedJitter(-1.0).draw(0.05), 0.0);
        assert!(FixedJitter(0.05).draw(0.05) < 0.05);
        assert_eq!(FixedJitter(0.02).draw(0.0), 0.0);
    }

    #[test]
    fn test_rng_jitter_in_range() {
        let mut jitter = RngJitter::new(ChaCha8Rng::seed_from_u64(42));
        for _ in 0..1000 {
            let value = jitter.draw(0.05);
            assert!((0.0..0.05).contains(&value));
        }
        assert_eq!(jitter.draw(0.0), 0.0);
    }

    #[test]
    fn test_rng_jitter_reproducible() {
        let mut a = RngJitter::new(ChaCha8Rng::seed_from_u64(7));
        let mut b = RngJitter::new(ChaCha8Rng::seed_from_u64(7));
        for _ in 0..10 {
            assert_eq!(a.draw(0.05), b.draw(0.05));
        }
    }
}
