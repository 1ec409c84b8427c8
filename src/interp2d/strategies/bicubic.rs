use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis};
use num_traits::cast;

use crate::{InterpAccel, InterpNum, InterpolateError};

use super::{Derivative, GridView, Interp2DType, MethodState};

/// Bicubic interpolation method
///
/// The partial derivatives `∂z/∂x`, `∂z/∂y` and `∂²z/∂x∂y` at every grid point are
/// taken from natural cubic splines through the rows and columns of the data.
/// Inside a cell the interpolant is the bicubic Hermite patch matching the
/// values and derivatives at the four corners. The result is continuous
/// with continuous first derivatives across cell borders.
///
/// The method needs four points along each axis and keeps the derivatives in its state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bicubic;

#[derive(Debug)]
struct BicubicState<T> {
    zx: Array2<T>,
    zy: Array2<T>,
    zxy: Array2<T>,
}

impl<T: InterpNum> Interp2DType<T> for Bicubic {
    fn name(&self) -> &'static str {
        "bicubic"
    }

    fn min_size(&self) -> usize {
        4
    }

    fn alloc(&self, xsize: usize, ysize: usize) -> Result<Option<MethodState>, InterpolateError> {
        let state = BicubicState::<T> {
            zx: try_zeros(xsize, ysize)?,
            zy: try_zeros(xsize, ysize)?,
            zxy: try_zeros(xsize, ysize)?,
        };
        Ok(Some(Box::new(state)))
    }

    fn init(
        &self,
        state: Option<&mut MethodState>,
        grid: GridView<'_, T>,
    ) -> Result<(), InterpolateError> {
        let state = state
            .and_then(|state| state.downcast_mut::<BicubicState<T>>())
            .ok_or_else(missing_state)?;
        let (x, y, z) = (grid.x(), grid.y(), grid.z());

        // z[:, j] runs along x, z[i, :] along y
        for (column, slopes) in z.axis_iter(Axis(1)).zip(state.zx.axis_iter_mut(Axis(1))) {
            spline_slopes(x, column, slopes);
        }
        for (row, slopes) in z.axis_iter(Axis(0)).zip(state.zy.axis_iter_mut(Axis(0))) {
            spline_slopes(y, row, slopes);
        }
        for (column, slopes) in state.zy.axis_iter(Axis(1)).zip(state.zxy.axis_iter_mut(Axis(1))) {
            spline_slopes(x, column, slopes);
        }
        Ok(())
    }

    fn eval(
        &self,
        state: Option<&MethodState>,
        grid: GridView<'_, T>,
        x: T,
        y: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> Result<T, InterpolateError> {
        patch(state, grid, x, y, (0, 0), xa, ya)
    }

    fn eval_deriv(
        &self,
        state: Option<&MethodState>,
        grid: GridView<'_, T>,
        deriv: Derivative,
        x: T,
        y: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> Result<T, InterpolateError> {
        patch(state, grid, x, y, deriv.orders(), xa, ya)
    }
}

fn missing_state() -> InterpolateError {
    InterpolateError::Algorithm("bicubic interpolation state is missing".into())
}

fn try_zeros<T: InterpNum>(xsize: usize, ysize: usize) -> Result<Array2<T>, InterpolateError> {
    let len = xsize.checked_mul(ysize).ok_or_else(|| {
        InterpolateError::OutOfMemory(format!("a {xsize}x{ysize} grid overflows the address space"))
    })?;
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|err| {
        InterpolateError::OutOfMemory(format!(
            "failed to allocate space for bicubic interpolation state: {err}"
        ))
    })?;
    buffer.resize(len, T::zero());
    Array2::from_shape_vec((xsize, ysize), buffer)
        .map_err(|err| InterpolateError::OutOfMemory(err.to_string()))
}

/// Evaluate the Hermite patch of the cell containing `(x, y)`,
/// or one of its partial derivatives.
fn patch<T: InterpNum>(
    state: Option<&MethodState>,
    grid: GridView<'_, T>,
    x: T,
    y: T,
    orders: (u8, u8),
    xa: Option<&mut InterpAccel>,
    ya: Option<&mut InterpAccel>,
) -> Result<T, InterpolateError> {
    let state = state
        .and_then(|state| state.downcast_ref::<BicubicState<T>>())
        .ok_or_else(missing_state)?;
    let cell = grid.cell(x, y, xa, ya);
    let hx = hermite_basis(cell.t, orders.0);
    let hy = hermite_basis(cell.u, orders.1);
    let z = grid.z();

    let mut value = T::zero();
    for a in 0..2 {
        // value and slope weight of this corner
        let (px, sx) = (hx[2 * a], hx[2 * a + 1] * cell.dx);
        for b in 0..2 {
            let (py, sy) = (hy[2 * b], hy[2 * b + 1] * cell.dy);
            let idx = [cell.xi + a, cell.yi + b];
            value = value
                + z[idx] * px * py
                + state.zx[idx] * sx * py
                + state.zy[idx] * px * sy
                + state.zxy[idx] * sx * sy;
        }
    }
    Ok(cell.unscale(value, orders))
}

/// The cubic Hermite basis `[h00, h10, h01, h11]` at `t`
/// or its derivative of the given order
fn hermite_basis<T: InterpNum>(t: T, order: u8) -> [T; 4] {
    let c = constant::<T>;
    let t2 = t * t;
    let t3 = t2 * t;
    match order {
        0 => [
            c(2.0) * t3 - c(3.0) * t2 + T::one(),
            t3 - c(2.0) * t2 + t,
            c(3.0) * t2 - c(2.0) * t3,
            t3 - t2,
        ],
        1 => [
            c(6.0) * t2 - c(6.0) * t,
            c(3.0) * t2 - c(4.0) * t + T::one(),
            c(6.0) * t - c(6.0) * t2,
            c(3.0) * t2 - c(2.0) * t,
        ],
        2 => [
            c(12.0) * t - c(6.0),
            c(6.0) * t - c(4.0),
            c(6.0) - c(12.0) * t,
            c(6.0) * t - c(2.0),
        ],
        _ => [T::zero(); 4],
    }
}

fn constant<T: InterpNum>(v: f64) -> T {
    cast(v).unwrap_or_else(|| unimplemented!("casting a small constant should always work"))
}

/// First derivative at every knot of the natural cubic spline through `(x, f)`.
///
/// The second derivatives `m` solve the tridiagonal system
/// `h[i-1] m[i-1] + 2 (h[i-1] + h[i]) m[i] + h[i] m[i+1] = 6 (s[i] - s[i-1])`
/// with `m[0] = m[n-1] = 0`, where `h` are the knot distances and `s` the secant slopes.
fn spline_slopes<T: InterpNum>(
    x: ArrayView1<'_, T>,
    f: ArrayView1<'_, T>,
    mut out: ArrayViewMut1<'_, T>,
) {
    let n = x.len();
    if n < 2 {
        out.fill(T::zero());
        return;
    }
    let two = T::one() + T::one();
    let six: T = constant(6.0);

    let h: Vec<T> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();
    let s: Vec<T> = (0..n - 1).map(|i| (f[i + 1] - f[i]) / h[i]).collect();

    let mut m = vec![T::zero(); n];
    let k = n - 2;
    if k > 0 {
        // Thomas algorithm on the inner knots
        let mut diag: Vec<T> = (0..k).map(|i| two * (h[i] + h[i + 1])).collect();
        let mut rhs: Vec<T> = (0..k).map(|i| six * (s[i + 1] - s[i])).collect();
        for i in 1..k {
            let w = h[i] / diag[i - 1];
            diag[i] = diag[i] - w * h[i];
            rhs[i] = rhs[i] - w * rhs[i - 1];
        }
        m[k] = rhs[k - 1] / diag[k - 1];
        for i in (0..k - 1).rev() {
            m[i + 1] = (rhs[i] - h[i + 1] * m[i + 2]) / diag[i];
        }
    }

    for i in 0..n - 1 {
        out[i] = s[i] - h[i] * (two * m[i] + m[i + 1]) / six;
    }
    out[n - 1] = s[n - 2] + h[n - 2] * (m[n - 2] + two * m[n - 1]) / six;
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    use super::{hermite_basis, spline_slopes};

    #[test]
    fn basis_partition_of_unity() {
        for t in [0.0, 0.3, 0.5, 1.0] {
            let [h00, _, h01, _] = hermite_basis(t, 0);
            assert_abs_diff_eq!(h00 + h01, 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn basis_end_points() {
        assert_eq!(hermite_basis(0.0, 0), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(hermite_basis(1.0, 0), [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(hermite_basis(0.0, 1), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(hermite_basis(1.0, 1), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn slopes_of_linear_data_are_exact() {
        let x = array![0.0, 0.5, 2.0, 3.0, 4.5];
        let f = x.mapv(|x| 3.0 * x - 1.0);
        let mut out = Array1::zeros(5);
        spline_slopes(x.view(), f.view(), out.view_mut());
        assert_abs_diff_eq!(out, Array1::from_elem(5, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn slopes_of_natural_spline() {
        // natural spline through (0,0), (1,1), (2,0):
        // m1 = -3, slopes at the knots are 1.5, 0, -1.5
        let x = array![0.0, 1.0, 2.0];
        let f = array![0.0, 1.0, 0.0];
        let mut out = Array1::zeros(3);
        spline_slopes(x.view(), f.view(), out.view_mut());
        assert_abs_diff_eq!(out, array![1.5, 0.0, -1.5], epsilon = 1e-12);
    }
}
