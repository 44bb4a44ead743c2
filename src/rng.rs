//! Deterministic RNG based on splitmix64. Sources are passed in explicitly,
//! nothing here touches global state.

/// Seed the star field is generated from unless a caller picks another one.
pub const STAR_SEED: u64 = 42;

#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Anything that can hand out uniform samples in `[lo, hi)`.
pub trait UniformSource {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

/// Simple sequential RNG for scene generation.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = splitmix64(self.state);
        self.state
    }

    /// 53 random mantissa bits, in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / 9007199254740992.0
    }

    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

impl UniformSource for Rng {
    #[inline]
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.range_f64(lo, hi)
    }
}
