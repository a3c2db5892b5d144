//! Seeded 2D gradient noise with fractal (fBm) and ridged octave sums.
//!
//! Wraps the `noise` crate's `Perlin` so every sample is normalised to `[0, 1]`, and
//! composites octaves the same way for both fBm and ridge variants: each
//! octave multiplies frequency by `lacunarity` and amplitude by `persistence`,
//! and the total is divided by the sum of amplitudes.

use glam::Vec2;
use ::noise::{NoiseFn, Perlin};

/// Octave configuration shared by [`NoiseField::fbm`] and [`NoiseField::ridge`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    /// Number of octaves to composite.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Frequency of the first octave, applied to the input point.
    pub frequency: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            frequency: 4.0,
        }
    }
}

/// Deterministic Perlin noise field seeded by the world seed.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
    params: NoiseParams,
}

impl NoiseField {
    /// Create a field whose permutation table is derived from `seed`.
    pub fn new(seed: u32, params: NoiseParams) -> Self {
        Self {
            perlin: Perlin::new(seed),
            params,
        }
    }

    /// Octave configuration in use.
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    fn raw(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y])
    }

    /// Single-octave sample at `p` (no frequency scaling), in `[0, 1]`.
    pub fn sample(&self, p: Vec2) -> f32 {
        normalize(self.raw(f64::from(p.x), f64::from(p.y)))
    }

    /// Fractal Brownian motion at `p`, in `[0, 1]`.
    pub fn fbm(&self, p: Vec2) -> f32 {
        self.accumulate(p, |v| (v + 1.0) * 0.5)
    }

    /// Ridged multi-octave noise at `p`, in `[0, 1]`.
    ///
    /// Each octave contributes `(1 - |n|)^2`, which peaks along the zero
    /// crossings of the underlying noise.
    pub fn ridge(&self, p: Vec2) -> f32 {
        self.accumulate(p, |v| {
            let r = 1.0 - v.abs();
            r * r
        })
    }

    fn accumulate(&self, p: Vec2, octave: impl Fn(f64) -> f64) -> f32 {
        let mut total = 0.0;
        let mut amplitude_sum = 0.0;
        let mut frequency = self.params.frequency;
        let mut amplitude = 1.0;

        for _ in 0..self.params.octaves {
            let v = self
                .raw(f64::from(p.x) * frequency, f64::from(p.y) * frequency)
                .clamp(-1.0, 1.0);
            total += octave(v) * amplitude;
            amplitude_sum += amplitude;

            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        if amplitude_sum > 0.0 {
            ((total / amplitude_sum) as f32).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Map a raw `[-1, 1]` noise value to `[0, 1]`.
#[inline]
fn normalize(v: f64) -> f32 {
    (((v + 1.0) * 0.5) as f32).clamp(0.0, 1.0)
}
