use std::{any::Any, fmt::Debug};

use ndarray::{ArrayView1, ArrayView2};

use crate::{
    vector_extensions::VectorExtensions, InterpAccel, InterpNum, InterpolateError,
};

mod bicubic;
mod bilinear;

pub use bicubic::Bicubic;
pub use bilinear::Bilinear;

/// Type erased per-object state of an interpolation method.
///
/// Produced by [`Interp2DType::alloc`] and handed back to
/// [`Interp2DType::free`] when the owning [`Interp2D`](super::Interp2D) is dropped.
pub type MethodState = Box<dyn Any + Send + Sync>;

/// Describes an interpolation method that can be plugged into
/// [`Interp2D`](super::Interp2D).
///
/// Implementors are usually unit structs, so a reference to them is a
/// `'static` descriptor shared by every interpolator using the method.
///
/// The methods are only called by [`Interp2D`](super::Interp2D), which guarantees:
///  - the grid has at least [`min_size`](Interp2DType::min_size) points along each axis
///  - x and y are strictly monotonic rising
///  - the shape of z is `(x.len(), y.len())`
///  - `state` is whatever [`alloc`](Interp2DType::alloc) returned for this object
///  - the query point of [`eval`](Interp2DType::eval) lies inside the grid
pub trait Interp2DType<T: InterpNum>: Debug + Send + Sync {
    /// Identifying name of the method
    fn name(&self) -> &'static str;

    /// Number of points the method needs along each axis
    fn min_size(&self) -> usize;

    /// Create the per-object state. Stateless methods keep the default.
    fn alloc(&self, _xsize: usize, _ysize: usize) -> Result<Option<MethodState>, InterpolateError> {
        Ok(None)
    }

    /// Release a state created by [`alloc`](Interp2DType::alloc).
    fn free(&self, state: MethodState) {
        drop(state);
    }

    /// Prepare the state from the grid data, e.g. by calculating coefficients.
    /// Called again on every re-initialization.
    fn init(
        &self,
        state: Option<&mut MethodState>,
        grid: GridView<'_, T>,
    ) -> Result<(), InterpolateError>;

    /// Interpolate at `(x, y)`
    fn eval(
        &self,
        state: Option<&MethodState>,
        grid: GridView<'_, T>,
        x: T,
        y: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> Result<T, InterpolateError>;

    /// Partial derivative of the interpolant at `(x, y)`.
    /// Methods without derivative support keep the default, which fails.
    #[allow(clippy::too_many_arguments)]
    fn eval_deriv(
        &self,
        _state: Option<&MethodState>,
        _grid: GridView<'_, T>,
        deriv: Derivative,
        _x: T,
        _y: T,
        _xa: Option<&mut InterpAccel>,
        _ya: Option<&mut InterpAccel>,
    ) -> Result<T, InterpolateError> {
        Err(InterpolateError::Algorithm(format!(
            "{} interpolation does not provide the {deriv:?} derivative",
            self.name()
        )))
    }
}

/// Partial derivatives of the interpolant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivative {
    X,
    Y,
    XX,
    XY,
    YY,
}

impl Derivative {
    /// order of the derivative along x and y
    pub fn orders(self) -> (u8, u8) {
        match self {
            Derivative::X => (1, 0),
            Derivative::Y => (0, 1),
            Derivative::XX => (2, 0),
            Derivative::XY => (1, 1),
            Derivative::YY => (0, 2),
        }
    }
}

/// Borrowed grid data handed to an [`Interp2DType`].
///
/// `z[[i, j]]` is the sample at `(x[i], y[j])`.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a, T> {
    x: ArrayView1<'a, T>,
    y: ArrayView1<'a, T>,
    z: ArrayView2<'a, T>,
}

impl<'a, T: InterpNum> GridView<'a, T> {
    pub(crate) fn new(x: ArrayView1<'a, T>, y: ArrayView1<'a, T>, z: ArrayView2<'a, T>) -> Self {
        debug_assert_eq!(z.dim(), (x.len(), y.len()));
        GridView { x, y, z }
    }

    pub fn x(&self) -> ArrayView1<'a, T> {
        self.x
    }

    pub fn y(&self) -> ArrayView1<'a, T> {
        self.y
    }

    pub fn z(&self) -> ArrayView2<'a, T> {
        self.z
    }

    pub fn xsize(&self) -> usize {
        self.x.len()
    }

    pub fn ysize(&self) -> usize {
        self.y.len()
    }

    /// The index of a known x value left of, or at x.
    ///
    /// This will never return the right most index,
    /// so `x_index(..) + 1` is a valid index whenever the axis has two or more points.
    pub fn x_index(&self, x: T, accel: Option<&mut InterpAccel>) -> usize {
        match accel {
            Some(accel) => accel.find(&self.x, x),
            None => self.x.get_lower_index(x),
        }
    }

    /// The index of a known y value below, or at y.
    /// See [`x_index`](GridView::x_index).
    pub fn y_index(&self, y: T, accel: Option<&mut InterpAccel>) -> usize {
        match accel {
            Some(accel) => accel.find(&self.y, y),
            None => self.y.get_lower_index(y),
        }
    }

    /// Locate the cell containing `(x, y)`.
    /// Returns the lower left index, the cell width and height,
    /// and the position of the query inside the cell scaled to `[0, 1]`.
    pub(crate) fn cell(
        &self,
        x: T,
        y: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> Cell<T> {
        let xi = self.x_index(x, xa);
        let yi = self.y_index(y, ya);
        let dx = self.x[xi + 1] - self.x[xi];
        let dy = self.y[yi + 1] - self.y[yi];
        Cell {
            xi,
            yi,
            dx,
            dy,
            t: (x - self.x[xi]) / dx,
            u: (y - self.y[yi]) / dy,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Cell<T> {
    pub xi: usize,
    pub yi: usize,
    pub dx: T,
    pub dy: T,
    pub t: T,
    pub u: T,
}

impl<T: InterpNum> Cell<T> {
    /// Scale a derivative taken in cell coordinates back to grid coordinates
    pub fn unscale(&self, value: T, (ox, oy): (u8, u8)) -> T {
        value / (self.dx.powi(ox.into()) * self.dy.powi(oy.into()))
    }
}
