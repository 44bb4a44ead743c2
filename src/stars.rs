use std::collections::HashMap;
use std::sync::Arc;

use crate::rng::{Rng, STAR_SEED, UniformSource};

pub const X_RANGE: (f64, f64) = (0.0, 100.0);
pub const Y_RANGE: (f64, f64) = (50.0, 100.0);
pub const BRIGHTNESS_RANGE: (f64, f64) = (0.3, 1.0);

/// Column-major star table. Row `i` of every column belongs to star `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StarField {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub size: Vec<f64>,
    pub brightness: Vec<f64>,
}

/// One row of a [`StarField`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub brightness: f64,
}

impl StarField {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Star> {
        Some(Star {
            x: *self.x.get(i)?,
            y: *self.y.get(i)?,
            size: *self.size.get(i)?,
            brightness: *self.brightness.get(i)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Star> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }
}

fn column<R: UniformSource>(source: &mut R, n: usize, (lo, hi): (f64, f64)) -> Vec<f64> {
    (0..n).map(|_| source.uniform(lo, hi)).collect()
}

/// Draw `count` stars from `source`. Each column is drawn as a whole block,
/// x first, then y, size and brightness. No range checking on the inputs.
pub fn generate_stars<R: UniformSource>(source: &mut R, count: usize, size: f64) -> StarField {
    let x = column(source, count, X_RANGE);
    let y = column(source, count, Y_RANGE);
    let size = column(source, count, (size / 2.0, size * 2.0));
    let brightness = column(source, count, BRIGHTNESS_RANGE);
    StarField { x, y, size, brightness }
}

/// Memoized star fields keyed on the exact `(count, size)` pair.
/// Every miss seeds a fresh [`Rng`] with the same seed, so a cached field and
/// a recomputed one are identical.
#[derive(Debug)]
pub struct StarCache {
    seed: u64,
    entries: HashMap<(usize, u64), Arc<StarField>>,
}

impl Default for StarCache {
    fn default() -> Self {
        Self::new(STAR_SEED)
    }
}

impl StarCache {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            entries: HashMap::new(),
        }
    }

    pub fn stars(&mut self, count: usize, size: f64) -> Arc<StarField> {
        let key = (count, size.to_bits());
        if let Some(field) = self.entries.get(&key) {
            log::trace!("star cache hit count={count} size={size}");
            return Arc::clone(field);
        }
        log::trace!("star cache miss count={count} size={size}");
        let mut rng = Rng::new(self.seed);
        let field = Arc::new(generate_stars(&mut rng, count, size));
        self.entries.insert(key, Arc::clone(&field));
        field
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns `lo` every time, so every column sits on its lower bound.
    struct Floor;

    impl UniformSource for Floor {
        fn uniform(&mut self, lo: f64, _hi: f64) -> f64 {
            lo
        }
    }

    /// Counts calls and hands out the midpoint.
    #[derive(Default)]
    struct Counting {
        calls: usize,
    }

    impl UniformSource for Counting {
        fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
            self.calls += 1;
            (lo + hi) / 2.0
        }
    }

    #[test]
    fn row_count_matches() {
        for n in [0, 1, 50, 200, 500] {
            let field = generate_stars(&mut Rng::new(STAR_SEED), n, 3.0);
            assert_eq!(field.len(), n);
            assert_eq!(field.y.len(), n);
            assert_eq!(field.size.len(), n);
            assert_eq!(field.brightness.len(), n);
        }
    }

    #[test]
    fn deterministic_for_same_seed() {
        let a = generate_stars(&mut Rng::new(STAR_SEED), 200, 3.0);
        let b = generate_stars(&mut Rng::new(STAR_SEED), 200, 3.0);
        assert_eq!(a, b);
    }

    #[test]
    fn values_within_ranges() {
        let field = generate_stars(&mut Rng::new(STAR_SEED), 500, 4.0);
        for s in field.iter() {
            assert!((0.0..=100.0).contains(&s.x));
            assert!((50.0..=100.0).contains(&s.y));
            assert!((2.0..=8.0).contains(&s.size));
            assert!((0.3..=1.0).contains(&s.brightness));
        }
    }

    #[test]
    fn injected_source_drives_every_column() {
        let field = generate_stars(&mut Floor, 3, 6.0);
        assert_eq!(field.x, vec![0.0; 3]);
        assert_eq!(field.y, vec![50.0; 3]);
        assert_eq!(field.size, vec![3.0; 3]);
        assert_eq!(field.brightness, vec![0.3; 3]);

        let mut counting = Counting::default();
        let field = generate_stars(&mut counting, 10, 2.0);
        assert_eq!(counting.calls, 40);
        assert_eq!(field.get(9).map(|s| s.size), Some(2.5));
        assert_eq!(field.get(10), None);
    }

    #[test]
    fn columns_are_drawn_in_blocks() {
        // The x column of a 3-star field is the first 3 draws of the source,
        // the y column the next 3, and so on.
        let field = generate_stars(&mut Rng::new(9), 3, 1.0);
        let mut rng = Rng::new(9);
        let xs: Vec<f64> = (0..3).map(|_| rng.uniform(0.0, 100.0)).collect();
        let ys: Vec<f64> = (0..3).map(|_| rng.uniform(50.0, 100.0)).collect();
        assert_eq!(field.x, xs);
        assert_eq!(field.y, ys);
    }

    #[test]
    fn cache_reuses_entries() {
        let mut cache = StarCache::default();
        assert!(cache.is_empty());
        let a = cache.stars(200, 3.0);
        let b = cache.stars(200, 3.0);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        let c = cache.stars(200, 4.0);
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        let d = cache.stars(200, 3.0);
        assert_eq!(*a, *d);
    }

    #[test]
    fn cache_matches_direct_generation() {
        let mut cache = StarCache::new(STAR_SEED);
        let cached = cache.stars(120, 5.0);
        let direct = generate_stars(&mut Rng::new(STAR_SEED), 120, 5.0);
        assert_eq!(*cached, direct);
    }
}
