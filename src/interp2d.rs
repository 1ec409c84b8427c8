//! A collection of structs and traits to interpolate data sampled on a 2D grid
//!
//! # Interpolator
//!  - [`Interp2D`] The interpolator bound to a grid size and a method, working on borrowed data
//!  - [`Spline2D`] An interpolator owning its data
//!  - [`Spline2DBuilder`] Configure a [`Spline2D`]
//!
//! # Traits
//!  - [`Interp2DType`] The trait describing a pluggable interpolation method
//!
//! # Methods
//!  - [`Bilinear`] Bilinear interpolation
//!  - [`Bicubic`] Bicubic interpolation

use ndarray::{ArrayBase, Data, Ix1, Ix2};
use tracing::debug;

use crate::{
    vector_extensions::{Monotonic, VectorExtensions},
    InterpAccel, InterpNum, InterpolateError,
};

mod spline;
mod strategies;

pub use spline::{Spline2D, Spline2DBuilder};
pub use strategies::{Bicubic, Bilinear, Derivative, GridView, Interp2DType, MethodState};

/// The rectangle `[xmin, xmax] × [ymin, ymax]` covered by the samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain<T> {
    pub xmin: T,
    pub xmax: T,
    pub ymin: T,
    pub ymax: T,
}

impl<T: InterpNum> Domain<T> {
    pub fn contains_x(&self, x: T) -> bool {
        self.xmin <= x && x <= self.xmax
    }

    pub fn contains_y(&self, y: T) -> bool {
        self.ymin <= y && y <= self.ymax
    }

    pub fn contains(&self, x: T, y: T) -> bool {
        self.contains_x(x) && self.contains_y(y)
    }
}

/// Two dimensional interpolator
///
/// The interpolator is bound to a grid size and an [`Interp2DType`] for its whole lifetime.
/// It does not own the grid data: the same `x`, `y` and `z` arrays are passed to
/// [`init`](Interp2D::init) and to every evaluation, and must not change in between.
/// `z` has the shape `(x.len(), y.len())` and `z[[i, j]]` is the sample at `(x[i], y[j])`.
///
/// Method specific state is created on [`new`](Interp2D::new) and released through
/// [`Interp2DType::free`] when the interpolator is dropped.
///
/// ```rust
/// # use ndarray::array;
/// # use ndarray_interp2d::{InterpAccel, interp2d::{Bicubic, Interp2D}};
/// let x = array![0.0, 1.0, 2.0, 3.0];
/// let y = array![0.0, 1.0, 2.0, 3.0];
/// let z = array![
///     [0.0, 1.0, 2.0, 3.0],
///     [1.0, 2.0, 3.0, 4.0],
///     [2.0, 3.0, 4.0, 5.0],
///     [3.0, 4.0, 5.0, 6.0],
/// ];
///
/// let mut interp = Interp2D::new(&Bicubic, x.len(), y.len()).unwrap();
/// interp.init(&x, &y, &z).unwrap();
///
/// let (mut xa, mut ya) = (InterpAccel::new(), InterpAccel::new());
/// let value: f64 = interp
///     .eval(&x, &y, &z, 1.25, 2.5, Some(&mut xa), Some(&mut ya))
///     .unwrap();
/// # assert!((value - 3.75).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Interp2D<'t, T: InterpNum> {
    kind: &'t dyn Interp2DType<T>,
    xsize: usize,
    ysize: usize,
    state: Option<MethodState>,
    /// `None` until a successful [`init`](Interp2D::init)
    domain: Option<Domain<T>>,
}

impl<'t, T: InterpNum> Interp2D<'t, T> {
    /// Create an interpolator for a grid of `xsize × ysize` points.
    ///
    /// Fails with [`InterpolateError::InvalidArgument`] when either size is
    /// below the [`min_size`](Interp2DType::min_size) of the method, and with
    /// [`InterpolateError::OutOfMemory`] when the method state can not be allocated.
    pub fn new(
        kind: &'t dyn Interp2DType<T>,
        xsize: usize,
        ysize: usize,
    ) -> Result<Self, InterpolateError> {
        // a grid needs at least one point to have a domain
        let min_size = kind.min_size().max(1);
        if xsize < min_size || ysize < min_size {
            return Err(InterpolateError::InvalidArgument(format!(
                "insufficient number of points for {} interpolation. Provided: {xsize}x{ysize}, Required: {min_size} along each axis",
                kind.name()
            )));
        }
        let state = kind.alloc(xsize, ysize)?;
        debug!(
            method = kind.name(),
            xsize,
            ysize,
            stateful = state.is_some(),
            "allocated interpolator"
        );
        Ok(Interp2D {
            kind,
            xsize,
            ysize,
            state,
            domain: None,
        })
    }

    /// Validate the grid data and initialize the method with it.
    ///
    /// The data must match the size given to [`new`](Interp2D::new) and
    /// `x` and `y` need to be strictly monotonic rising. Validation errors leave
    /// the interpolator untouched. An error of the method itself is returned
    /// unchanged and leaves the interpolator uninitialized.
    ///
    /// Calling `init` again with new data of the same size re-initializes the
    /// interpolator. Acceleration caches used before should be
    /// [`reset`](InterpAccel::reset) by the caller.
    pub fn init<Sx, Sy, Sz>(
        &mut self,
        x: &ArrayBase<Sx, Ix1>,
        y: &ArrayBase<Sy, Ix1>,
        z: &ArrayBase<Sz, Ix2>,
    ) -> Result<(), InterpolateError>
    where
        Sx: Data<Elem = T>,
        Sy: Data<Elem = T>,
        Sz: Data<Elem = T>,
    {
        use self::Monotonic::*;

        let grid = self.grid(x, y, z)?;
        if !matches!(x.monotonic_prop(), Rising { strict: true }) {
            return Err(InterpolateError::InvalidArgument(
                "x values must be strictly monotonic rising".into(),
            ));
        }
        if !matches!(y.monotonic_prop(), Rising { strict: true }) {
            return Err(InterpolateError::InvalidArgument(
                "y values must be strictly monotonic rising".into(),
            ));
        }

        let domain = Domain {
            xmin: x[0],
            xmax: x[self.xsize - 1],
            ymin: y[0],
            ymax: y[self.ysize - 1],
        };
        self.domain = None;
        self.kind.init(self.state.as_mut(), grid)?;
        self.domain = Some(domain);
        debug!(method = self.kind.name(), ?domain, "initialized interpolator");
        Ok(())
    }

    /// Interpolate at `(xq, yq)`.
    ///
    /// `x`, `y` and `z` must be the data given to [`init`](Interp2D::init).
    /// Queries outside of the [`domain`](Interp2D::domain) fail with
    /// [`InterpolateError::Domain`] before the method is consulted.
    ///
    /// The acceleration caches `xa` and `ya` speed up repeated queries close to
    /// each other. They are optional and never change the result.
    #[allow(clippy::too_many_arguments)]
    pub fn eval<Sx, Sy, Sz>(
        &self,
        x: &ArrayBase<Sx, Ix1>,
        y: &ArrayBase<Sy, Ix1>,
        z: &ArrayBase<Sz, Ix2>,
        xq: T,
        yq: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> Result<T, InterpolateError>
    where
        Sx: Data<Elem = T>,
        Sy: Data<Elem = T>,
        Sz: Data<Elem = T>,
    {
        let grid = self.checked_grid(x, y, z, xq, yq)?;
        self.kind.eval(self.state.as_ref(), grid, xq, yq, xa, ya)
    }

    /// Like [`eval`](Interp2D::eval), but any error results in `NaN`.
    #[allow(clippy::too_many_arguments)]
    pub fn eval_or_nan<Sx, Sy, Sz>(
        &self,
        x: &ArrayBase<Sx, Ix1>,
        y: &ArrayBase<Sy, Ix1>,
        z: &ArrayBase<Sz, Ix2>,
        xq: T,
        yq: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> T
    where
        Sx: Data<Elem = T>,
        Sy: Data<Elem = T>,
        Sz: Data<Elem = T>,
    {
        self.eval(x, y, z, xq, yq, xa, ya)
            .unwrap_or_else(|err| self.nan_for(err))
    }

    /// Partial derivative of the interpolant at `(xq, yq)`.
    /// Validation is the same as for [`eval`](Interp2D::eval).
    #[allow(clippy::too_many_arguments)]
    pub fn eval_deriv<Sx, Sy, Sz>(
        &self,
        deriv: Derivative,
        x: &ArrayBase<Sx, Ix1>,
        y: &ArrayBase<Sy, Ix1>,
        z: &ArrayBase<Sz, Ix2>,
        xq: T,
        yq: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> Result<T, InterpolateError>
    where
        Sx: Data<Elem = T>,
        Sy: Data<Elem = T>,
        Sz: Data<Elem = T>,
    {
        let grid = self.checked_grid(x, y, z, xq, yq)?;
        self.kind
            .eval_deriv(self.state.as_ref(), grid, deriv, xq, yq, xa, ya)
    }

    /// The minimum number of points along each axis the method needs
    pub fn min_size(&self) -> usize {
        self.kind.min_size()
    }

    /// Name of the interpolation method
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn kind(&self) -> &'t dyn Interp2DType<T> {
        self.kind
    }

    pub fn xsize(&self) -> usize {
        self.xsize
    }

    pub fn ysize(&self) -> usize {
        self.ysize
    }

    /// The sampled domain, `None` before the interpolator is initialized
    pub fn domain(&self) -> Option<Domain<T>> {
        self.domain
    }

    pub fn is_initialized(&self) -> bool {
        self.domain.is_some()
    }

    pub(crate) fn nan_for(&self, err: InterpolateError) -> T {
        debug!(method = self.kind.name(), %err, "interpolation failed, returning NaN");
        T::nan()
    }

    fn grid<'a, Sx, Sy, Sz>(
        &self,
        x: &'a ArrayBase<Sx, Ix1>,
        y: &'a ArrayBase<Sy, Ix1>,
        z: &'a ArrayBase<Sz, Ix2>,
    ) -> Result<GridView<'a, T>, InterpolateError>
    where
        Sx: Data<Elem = T>,
        Sy: Data<Elem = T>,
        Sz: Data<Elem = T>,
    {
        if x.len() != self.xsize || y.len() != self.ysize {
            return Err(InterpolateError::InvalidArgument(format!(
                "data must match size of interpolation object. Expected: {}x{}, got x: {}, y: {}",
                self.xsize,
                self.ysize,
                x.len(),
                y.len()
            )));
        }
        if z.dim() != (self.xsize, self.ysize) {
            return Err(InterpolateError::InvalidArgument(format!(
                "shape of z must match size of interpolation object. Expected: {:?}, got: {:?}",
                (self.xsize, self.ysize),
                z.dim()
            )));
        }
        Ok(GridView::new(x.view(), y.view(), z.view()))
    }

    fn checked_grid<'a, Sx, Sy, Sz>(
        &self,
        x: &'a ArrayBase<Sx, Ix1>,
        y: &'a ArrayBase<Sy, Ix1>,
        z: &'a ArrayBase<Sz, Ix2>,
        xq: T,
        yq: T,
    ) -> Result<GridView<'a, T>, InterpolateError>
    where
        Sx: Data<Elem = T>,
        Sy: Data<Elem = T>,
        Sz: Data<Elem = T>,
    {
        let domain = self.domain.ok_or_else(|| {
            InterpolateError::InvalidArgument("interpolator is not initialized".into())
        })?;
        if !domain.contains_x(xq) {
            return Err(InterpolateError::Domain(format!(
                "x = {xq:?} is not in range of [{:?}, {:?}]",
                domain.xmin, domain.xmax
            )));
        }
        if !domain.contains_y(yq) {
            return Err(InterpolateError::Domain(format!(
                "y = {yq:?} is not in range of [{:?}, {:?}]",
                domain.ymin, domain.ymax
            )));
        }
        self.grid(x, y, z)
    }
}

impl<T: InterpNum> Drop for Interp2D<'_, T> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.kind.free(state);
        }
    }
}
