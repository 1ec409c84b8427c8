use ndarray::{Array, Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix1, Ix2};
use num_traits::cast;

use crate::{InterpAccel, InterpNum, InterpolateError};

use super::{Bilinear, Derivative, Domain, Interp2D, Interp2DType};

/// Two dimensional interpolator owning its data
///
/// Keeps a copy of the grid next to an [`Interp2D`], so evaluation only needs the query point.
///
/// ```rust
/// # use ndarray::array;
/// # use ndarray_interp2d::interp2d::{Bicubic, Spline2D};
/// let z = array![
///     [1.0, 2.0, 3.0, 4.0],
///     [5.0, 6.0, 7.0, 8.0],
///     [9.0, 10.0, 11.0, 12.0],
///     [13.0, 14.0, 15.0, 16.0],
/// ];
/// let spline = Spline2D::builder(z)
///     .x(array![0.0, 0.5, 1.0, 1.5])
///     .method(&Bicubic)
///     .build()
///     .unwrap();
///
/// let value: f64 = spline.eval(0.25, 1.5, None, None).unwrap();
/// # assert!((value - 4.5).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Spline2D<'t, T: InterpNum> {
    x: Array1<T>,
    y: Array1<T>,
    z: Array2<T>,
    interp: Interp2D<'t, T>,
}

impl<T: InterpNum> Spline2D<'static, T> {
    /// Get the [Spline2DBuilder]
    pub fn builder<S>(z: ArrayBase<S, Ix2>) -> Spline2DBuilder<'static, T>
    where
        S: Data<Elem = T>,
    {
        Spline2DBuilder::new(z)
    }
}

impl<'t, T: InterpNum> Spline2D<'t, T> {
    /// Copy the grid data, then allocate and initialize the interpolator for it.
    pub fn new<Sx, Sy, Sz>(
        kind: &'t dyn Interp2DType<T>,
        x: ArrayBase<Sx, Ix1>,
        y: ArrayBase<Sy, Ix1>,
        z: ArrayBase<Sz, Ix2>,
    ) -> Result<Self, InterpolateError>
    where
        Sx: Data<Elem = T>,
        Sy: Data<Elem = T>,
        Sz: Data<Elem = T>,
    {
        let (x, y, z) = (x.into_owned(), y.into_owned(), z.into_owned());
        let mut interp = Interp2D::new(kind, x.len(), y.len())?;
        interp.init(&x, &y, &z)?;
        Ok(Spline2D { x, y, z, interp })
    }

    /// Interpolate at `(x, y)`, see [`Interp2D::eval`]
    pub fn eval(
        &self,
        x: T,
        y: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> Result<T, InterpolateError> {
        self.interp.eval(&self.x, &self.y, &self.z, x, y, xa, ya)
    }

    /// Like [`eval`](Spline2D::eval), but any error results in `NaN`.
    pub fn eval_or_nan(
        &self,
        x: T,
        y: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> T {
        self.eval(x, y, xa, ya)
            .unwrap_or_else(|err| self.interp.nan_for(err))
    }

    /// Partial derivative at `(x, y)`, see [`Interp2D::eval_deriv`]
    pub fn eval_deriv(
        &self,
        deriv: Derivative,
        x: T,
        y: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> Result<T, InterpolateError> {
        self.interp
            .eval_deriv(deriv, &self.x, &self.y, &self.z, x, y, xa, ya)
    }

    pub fn x(&self) -> ArrayView1<'_, T> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, T> {
        self.y.view()
    }

    pub fn z(&self) -> ArrayView2<'_, T> {
        self.z.view()
    }

    pub fn domain(&self) -> Domain<T> {
        self.interp
            .domain()
            .unwrap_or_else(|| unreachable!("a spline is always initialized"))
    }

    pub fn min_size(&self) -> usize {
        self.interp.min_size()
    }

    pub fn name(&self) -> &'static str {
        self.interp.name()
    }
}

/// Create and configure a [Spline2D].
///
/// # Default configuration
/// In the default configuration the interpolation method is [`Bilinear`].
/// The index to `Axis(0)` of the data is used as x values and the index
/// to `Axis(1)` as y values.
#[derive(Debug)]
pub struct Spline2DBuilder<'t, T: InterpNum> {
    x: Array1<T>,
    y: Array1<T>,
    z: Array2<T>,
    kind: &'t dyn Interp2DType<T>,
}

impl<T: InterpNum> Spline2DBuilder<'static, T> {
    pub fn new<S>(z: ArrayBase<S, Ix2>) -> Self
    where
        S: Data<Elem = T>,
    {
        let (xsize, ysize) = z.dim();
        Spline2DBuilder {
            x: index_axis(xsize),
            y: index_axis(ysize),
            z: z.into_owned(),
            kind: &Bilinear,
        }
    }
}

impl<'t, T: InterpNum> Spline2DBuilder<'t, T> {
    /// Set the interpolation method. By default [`Bilinear`] is used.
    pub fn method<'n>(self, kind: &'n dyn Interp2DType<T>) -> Spline2DBuilder<'n, T> {
        let Spline2DBuilder { x, y, z, .. } = self;
        Spline2DBuilder { x, y, z, kind }
    }

    /// Add a custom x axis for the data. The axis needs to have the same length
    /// as `Axis(0)` of the data and must be strictly monotonic rising.
    pub fn x<S>(mut self, x: ArrayBase<S, Ix1>) -> Self
    where
        S: Data<Elem = T>,
    {
        self.x = x.into_owned();
        self
    }

    /// Add a custom y axis for the data. The axis needs to have the same length
    /// as `Axis(1)` of the data and must be strictly monotonic rising.
    pub fn y<S>(mut self, y: ArrayBase<S, Ix1>) -> Self
    where
        S: Data<Elem = T>,
    {
        self.y = y.into_owned();
        self
    }

    /// Validate input data and create the configured [Spline2D]
    pub fn build(self) -> Result<Spline2D<'t, T>, InterpolateError> {
        let Spline2DBuilder { x, y, z, kind } = self;
        let (xsize, ysize) = z.dim();
        if x.len() != xsize || y.len() != ysize {
            return Err(InterpolateError::InvalidArgument(format!(
                "Lengths of the axes and the data need to match. Got x: {}, y: {}, data: {:?}",
                x.len(),
                y.len(),
                (xsize, ysize)
            )));
        }
        Spline2D::new(kind, x, y, z)
    }
}

fn index_axis<T: InterpNum>(len: usize) -> Array1<T> {
    Array::from_iter((0..len).map(|i| {
        cast(i).unwrap_or_else(|| unimplemented!("casting from usize to a number should always work"))
    }))
}
