//! Index lookup cache for repeated queries along one axis.

use ndarray::{ArrayBase, Data, Ix1};

use crate::vector_extensions::VectorExtensions;

/// Remembers the last bracketing interval of an axis.
///
/// Consecutive queries that fall into the same interval skip the bisection.
/// The cache is owned by the caller and is only borrowed by an evaluation,
/// so one accelerator can serve several interpolators that share the same
/// axis. It never changes the result of a lookup.
///
/// After re-initializing an interpolator with a different axis call
/// [`reset`](InterpAccel::reset) to keep the hit statistics meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpAccel {
    cache: usize,
    hits: usize,
    misses: usize,
}

impl InterpAccel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cached interval and clear the statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of lookups answered from the cache
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of lookups that needed a bisection
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// The index `i` with `axis[i] <= x < axis[i + 1]`.
    ///
    /// Like [`get_lower_index`](VectorExtensions::get_lower_index) this never returns
    /// the last index, so `i + 1` is always a valid index when `axis.len() >= 2`.
    /// A query at the last knot belongs to the last interval.
    pub fn find<S>(&mut self, axis: &ArrayBase<S, Ix1>, x: S::Elem) -> usize
    where
        S: Data,
        S::Elem: PartialOrd + Copy,
    {
        let len = axis.len();
        if len < 2 {
            return 0;
        }
        if self.cache + 1 >= len {
            self.cache = 0;
        }
        let idx = self.cache;
        if x < axis[idx] {
            self.misses += 1;
            self.cache = axis.get_lower_index_between(x, 0, idx);
        } else if x > axis[idx + 1] || (x == axis[idx + 1] && idx + 2 < len) {
            self.misses += 1;
            self.cache = axis.get_lower_index_between(x, idx, len - 1);
        } else {
            self.hits += 1;
        }
        self.cache
    }
}

#[cfg(test)]
mod test {
    use ndarray::{array, Array};

    use super::InterpAccel;
    use crate::vector_extensions::VectorExtensions;

    #[test]
    fn matches_bisection() {
        let axis = array![0.0, 0.5, 1.5, 3.0, 4.0, 7.5];
        let mut accel = InterpAccel::new();
        for x in Array::linspace(0.0, 7.5, 61) {
            assert_eq!(accel.find(&axis, x), axis.get_lower_index(x), "x = {x}");
        }
    }

    #[test]
    fn counts_hits_and_misses() {
        let axis = array![0.0, 1.0, 2.0, 3.0];
        let mut accel = InterpAccel::new();
        assert_eq!(accel.find(&axis, 2.5), 2);
        assert_eq!(accel.find(&axis, 2.2), 2);
        assert_eq!(accel.find(&axis, 2.9), 2);
        assert_eq!(accel.find(&axis, 0.1), 0);
        assert_eq!(accel.hits(), 2);
        assert_eq!(accel.misses(), 2);

        accel.reset();
        assert_eq!(accel, InterpAccel::default());
    }

    #[test]
    fn right_edge_stays_inside() {
        let axis = array![0.0, 1.0, 2.0];
        let mut accel = InterpAccel::new();
        assert_eq!(accel.find(&axis, 2.0), 1);
        assert_eq!(accel.find(&axis, 2.0), 1);
        assert_eq!(accel.find(&axis, 1.5), 1);
        assert_eq!(accel.misses(), 1);
        assert_eq!(accel.hits(), 2);
    }

    #[test]
    fn stale_cache_from_longer_axis() {
        let long = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let short = array![0.0, 10.0, 20.0];
        let mut accel = InterpAccel::new();
        assert_eq!(accel.find(&long, 4.5), 4);
        assert_eq!(accel.find(&short, 15.0), 1);
        assert_eq!(accel.find(&short, 5.0), 0);
    }
}
