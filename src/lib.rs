//! The ndarray-interp2d crate interpolates scalar data sampled on a
//! rectangular grid.
//!
//! [`Interp2D`](interp2d::Interp2D) binds a grid size to an interpolation
//! method described by an [`Interp2DType`](interp2d::Interp2DType).
//! The method is pluggable: [`Bilinear`](interp2d::Bilinear) and
//! [`Bicubic`](interp2d::Bicubic) are provided, custom methods implement the trait.
//!
//! [`Spline2D`](interp2d::Spline2D) owns its data and is the convenient entry
//! point when the grid does not need to be shared.
//!
//! ```rust
//! # use ndarray::array;
//! # use ndarray_interp2d::interp2d::{Bilinear, Interp2D};
//! let x = array![0.0, 1.0];
//! let y = array![0.0, 1.0];
//! let z = array![[0.0, 1.0], [1.0, 2.0]];
//!
//! let mut interp = Interp2D::new(&Bilinear, 2, 2).unwrap();
//! interp.init(&x, &y, &z).unwrap();
//! let value: f64 = interp.eval(&x, &y, &z, 0.5, 0.5, None, None).unwrap();
//! # assert!((value - 1.0).abs() < 1e-12);
//! ```
use std::fmt::Debug;

use num_traits::Float;
use thiserror::Error;

pub mod accel;
pub mod interp2d;
pub mod vector_extensions;

pub use accel::InterpAccel;

/// Element type of the coordinates and sampled values
pub trait InterpNum: Float + Debug + Send + Sync + 'static {}

impl<T> InterpNum for T where T: Float + Debug + Send + Sync + 'static {}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpolateError {
    /// bad grid size, mismatched data or non monotonic axis
    #[error("{0}")]
    InvalidArgument(String),
    /// the interpolation method could not obtain its state
    #[error("{0}")]
    OutOfMemory(String),
    /// the query point lies outside of the sampled domain
    #[error("{0}")]
    Domain(String),
    /// failure reported by the interpolation method itself
    #[error("{0}")]
    Algorithm(String),
}
