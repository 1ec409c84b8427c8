use crate::{InterpAccel, InterpNum, InterpolateError};

use super::{Derivative, GridView, Interp2DType, MethodState};

/// Bilinear interpolation method
///
/// Blends the four corners of the grid cell containing the query point.
/// The method has no state and needs two points along each axis.
///
/// ```rust
/// # use ndarray::array;
/// # use ndarray_interp2d::interp2d::{Bilinear, Interp2D};
/// let x = array![1.0, 2.0, 3.0];
/// let y = array![4.0, 5.0];
/// let z = array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]];
///
/// let mut interp = Interp2D::new(&Bilinear, 3, 2).unwrap();
/// interp.init(&x, &y, &z).unwrap();
/// let value: f64 = interp.eval(&x, &y, &z, 2.5, 4.5, None, None).unwrap();
/// # assert!((value - 3.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Bilinear;

impl<T: InterpNum> Interp2DType<T> for Bilinear {
    fn name(&self) -> &'static str {
        "bilinear"
    }

    fn min_size(&self) -> usize {
        2
    }

    fn init(
        &self,
        _state: Option<&mut MethodState>,
        _grid: GridView<'_, T>,
    ) -> Result<(), InterpolateError> {
        Ok(())
    }

    fn eval(
        &self,
        _state: Option<&MethodState>,
        grid: GridView<'_, T>,
        x: T,
        y: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> Result<T, InterpolateError> {
        Ok(blend(grid, x, y, (0, 0), xa, ya))
    }

    fn eval_deriv(
        &self,
        _state: Option<&MethodState>,
        grid: GridView<'_, T>,
        deriv: Derivative,
        x: T,
        y: T,
        xa: Option<&mut InterpAccel>,
        ya: Option<&mut InterpAccel>,
    ) -> Result<T, InterpolateError> {
        Ok(blend(grid, x, y, deriv.orders(), xa, ya))
    }
}

fn blend<T: InterpNum>(
    grid: GridView<'_, T>,
    x: T,
    y: T,
    orders: (u8, u8),
    xa: Option<&mut InterpAccel>,
    ya: Option<&mut InterpAccel>,
) -> T {
    let cell = grid.cell(x, y, xa, ya);
    let wx = weights(cell.t, orders.0);
    let wy = weights(cell.u, orders.1);
    let z = grid.z();

    let mut value = T::zero();
    for (a, &w_a) in wx.iter().enumerate() {
        for (b, &w_b) in wy.iter().enumerate() {
            value = value + z[[cell.xi + a, cell.yi + b]] * w_a * w_b;
        }
    }
    cell.unscale(value, orders)
}

/// weights of the left and right sample for a position `t` in `[0, 1]`
fn weights<T: InterpNum>(t: T, order: u8) -> [T; 2] {
    match order {
        0 => [T::one() - t, t],
        1 => [-T::one(), T::one()],
        _ => [T::zero(), T::zero()],
    }
}
