//! This module contains the vector extensions trait

use ndarray::{ArrayBase, Data, Ix1};

pub trait VectorExtensions<T> {
    /// get the monotonic property of the vector
    fn monotonic_prop(&self) -> Monotonic;

    /// Get the index of the next lower value inside the vector.
    /// This is not guaranteed to return the index of an exact match.
    ///
    /// This will never return the last index of the vector.
    /// when x is out of bounds it will either return `0` or `self.len() - 2`
    /// depending on which side it is out of bounds
    ///
    /// # Warning
    /// this method requires the [`monotonic_prop`](VectorExtensions::monotonic_prop) to be
    /// `Monotonic::Rising { strict: true }`
    /// otherwise the behaviour is undefined
    fn get_lower_index(&self, x: T) -> usize;

    /// Same as [`get_lower_index`](VectorExtensions::get_lower_index) but the search
    /// is restricted to `lo..=hi`. The result satisfies `lo <= idx < hi` for `lo < hi`.
    fn get_lower_index_between(&self, x: T, lo: usize, hi: usize) -> usize;
}

/// Describes the monotonic property of a vector
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Monotonic {
    Rising { strict: bool },
    Falling { strict: bool },
    NotMonotonic,
}
use Monotonic::*;

impl<S> VectorExtensions<S::Elem> for ArrayBase<S, Ix1>
where
    S: Data,
    S::Elem: PartialOrd + Copy,
{
    fn monotonic_prop(&self) -> Monotonic {
        let mut rising = true;
        let mut falling = true;
        let mut strict = true;
        for (a, b) in self.iter().zip(self.iter().skip(1)) {
            if a < b {
                falling = false;
            } else if a > b {
                rising = false;
            } else if a == b {
                strict = false;
            } else {
                // unordered, e.g. NaN
                return NotMonotonic;
            }
            if !rising && !falling {
                return NotMonotonic;
            }
        }
        match (rising, falling) {
            (true, _) => Rising { strict },
            (false, true) => Falling { strict },
            (false, false) => NotMonotonic,
        }
    }

    fn get_lower_index(&self, x: S::Elem) -> usize {
        self.get_lower_index_between(x, 0, self.len().saturating_sub(1))
    }

    fn get_lower_index_between(&self, x: S::Elem, mut lo: usize, mut hi: usize) -> usize {
        while hi > lo + 1 {
            let mid = (hi + lo) / 2;
            if self[mid] > x {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        lo
    }
}

#[cfg(test)]
mod test {
    use ndarray::{array, Array1};

    use super::{Monotonic, VectorExtensions};

    macro_rules! test_monotonic {
        ($d:ident, $expected:pat) => {
            assert!(matches!($d.monotonic_prop(), $expected));
            assert!(matches!($d.view().monotonic_prop(), $expected));
        };
    }

    #[test]
    fn test_strict_rising() {
        let data: Array1<f64> = array![1.1, 2.0, 3.123, 4.5];
        test_monotonic!(data, Monotonic::Rising { strict: true });
    }

    #[test]
    fn test_rising() {
        let data: Array1<f64> = array![1.1, 2.0, 2.0, 4.5];
        test_monotonic!(data, Monotonic::Rising { strict: false });
    }

    #[test]
    fn test_strict_falling() {
        let data: Array1<f64> = array![5.8, 4.123, 3.1, 2.0];
        test_monotonic!(data, Monotonic::Falling { strict: true });
    }

    #[test]
    fn test_not_monotonic() {
        let data: Array1<f64> = array![1.1, 2.0, 1.5, 4.5];
        test_monotonic!(data, Monotonic::NotMonotonic);
    }

    #[test]
    fn test_nan_is_not_monotonic() {
        let data: Array1<f64> = array![1.0, f64::NAN, 3.0];
        test_monotonic!(data, Monotonic::NotMonotonic);
    }

    #[test]
    fn test_short_vectors_are_strict() {
        let data: Array1<f64> = array![1.0];
        test_monotonic!(data, Monotonic::Rising { strict: true });
    }

    #[test]
    fn test_lower_index() {
        let data = array![0.0, 1.0, 2.0, 4.0, 8.0];
        assert_eq!(data.get_lower_index(0.0), 0);
        assert_eq!(data.get_lower_index(0.5), 0);
        assert_eq!(data.get_lower_index(1.0), 1);
        assert_eq!(data.get_lower_index(3.9), 2);
        assert_eq!(data.get_lower_index(8.0), 3);
        assert_eq!(data.get_lower_index(-1.0), 0);
        assert_eq!(data.get_lower_index(9.0), 3);
    }

    #[test]
    fn test_lower_index_between() {
        let data = array![0.0, 1.0, 2.0, 4.0, 8.0];
        assert_eq!(data.get_lower_index_between(5.0, 2, 4), 3);
        assert_eq!(data.get_lower_index_between(0.5, 0, 2), 0);
    }
}
