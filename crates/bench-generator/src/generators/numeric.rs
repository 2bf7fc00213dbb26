//! Numeric value generators.

use rand::Rng;

/// Generate a random float in the half-open range `[min, max)`.
pub fn generate_float_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen_range(min..max)
}
