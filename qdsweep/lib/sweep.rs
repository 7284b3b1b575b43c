//! Evaluate an observable over a one- or two-dimensional grid of control
//! parameters.
//!
//! A sweep threads a single, exclusively borrowed system through every grid
//! point: at each point, the system is first updated in place and then
//! evaluated. Nothing is rebuilt between points, and only the quantities
//! touched by the update function change.
//!
//! # Storage convention
//! Two-dimensional sweeps iterate in row-major order, with the outer loop over
//! the first axis and the inner loop over the second. The result for
//! `(outer[i], inner[j])` is stored at `[[i, j]]`, so that the rows of the
//! output follow the first axis. When plotting as a color map, the second axis
//! belongs on the horizontal axis and the first axis on the vertical.
//!
//! # Failures
//! The first error returned by either the update or evaluation function aborts
//! the whole sweep and is returned as a [`SweepError`] carrying the index of
//! the failing point. Partial results are discarded.
//!
//! ```
//! use std::convert::Infallible;
//! use qdsweep::{ grid::GridAxis, sweep };
//!
//! let x = GridAxis::linspace(0.0, 1.0, 3).unwrap();
//! let y = GridAxis::linspace(0.0, 10.0, 2).unwrap();
//! let mut state: (f64, f64) = (0.0, 0.0);
//! let grid = sweep::sweep_2d(
//!     &mut state,
//!     &x,
//!     &y,
//!     |s, xi, yj| { *s = (xi, yj); Ok::<_, Infallible>(()) },
//!     |s| Ok(s.0 + s.1),
//! ).unwrap();
//! assert_eq!(grid.shape(), &[3, 2]);
//! assert_eq!(grid[[2, 1]], 11.0);
//! ```

use ndarray as nd;
use num_traits::Zero;
use tracing::debug;
use crate::{
    error::SweepError,
    grid::GridAxis,
};

pub type SweepResult<T, E> = Result<T, SweepError<E>>;

/// Sweep over a single axis.
///
/// Element `[i]` of the output is `observe(update(system, axis[i]))`.
pub fn sweep_1d<T, A, E, U, O>(
    system: &mut T,
    axis: &GridAxis,
    mut update: U,
    mut observe: O,
) -> SweepResult<nd::Array1<A>, E>
where
    A: Clone + Zero,
    E: std::error::Error + 'static,
    U: FnMut(&mut T, f64) -> Result<(), E>,
    O: FnMut(&mut T) -> Result<A, E>,
{
    debug!(points = axis.len(), "starting 1D sweep");
    let mut out: nd::Array1<A> = nd::Array1::zeros(axis.len());
    for (i, (outk, &xk)) in out.iter_mut().zip(axis.iter()).enumerate() {
        update(system, xk).map_err(|err| SweepError::new(vec![i], err))?;
        *outk = observe(system).map_err(|err| SweepError::new(vec![i], err))?;
    }
    Ok(out)
}

/// Sweep over the Cartesian product of two axes.
///
/// Element `[[i, j]]` of the output is
/// `observe(update(system, outer[i], inner[j]))`; see the [module-level
/// documentation][self] for the storage convention.
pub fn sweep_2d<T, A, E, U, O>(
    system: &mut T,
    outer: &GridAxis,
    inner: &GridAxis,
    mut update: U,
    mut observe: O,
) -> SweepResult<nd::Array2<A>, E>
where
    A: Clone + Zero,
    E: std::error::Error + 'static,
    U: FnMut(&mut T, f64, f64) -> Result<(), E>,
    O: FnMut(&mut T) -> Result<A, E>,
{
    debug!(
        outer = outer.len(),
        inner = inner.len(),
        "starting 2D sweep"
    );
    let mut out: nd::Array2<A> = nd::Array2::zeros((outer.len(), inner.len()));
    let rows = out.axis_iter_mut(nd::Axis(0)).zip(outer.iter()).enumerate();
    for (i, (mut row, &xi)) in rows {
        for (j, (outij, &yj)) in row.iter_mut().zip(inner.iter()).enumerate() {
            update(system, xi, yj)
                .map_err(|err| SweepError::new(vec![i, j], err))?;
            *outij = observe(system)
                .map_err(|err| SweepError::new(vec![i, j], err))?;
        }
    }
    Ok(out)
}

/// Independent-variable axes for a sweep.
#[derive(Clone, Debug)]
pub enum Axes {
    /// Sweep over a single axis.
    One(GridAxis),
    /// Sweep over two axes: `(outer, inner)`.
    Two(GridAxis, GridAxis),
}

impl Axes {
    /// Return the shape of the grid produced by a sweep over these axes.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::One(x) => vec![x.len()],
            Self::Two(x, y) => vec![x.len(), y.len()],
        }
    }

    /// Return the total number of grid points.
    pub fn num_points(&self) -> usize { self.shape().into_iter().product() }

    /// Return `true` if `self` is `One`.
    pub fn is_one(&self) -> bool { matches!(self, Self::One(..)) }

    /// Return `true` if `self` is `Two`.
    pub fn is_two(&self) -> bool { matches!(self, Self::Two(..)) }
}

/// Master sweep function for any number of [axes][Axes].
///
/// The update function receives the current grid point as a slice with one
/// coordinate per axis, in axis order.
pub fn evaluate<T, A, E, U, O>(
    system: &mut T,
    axes: &Axes,
    mut update: U,
    observe: O,
) -> SweepResult<nd::ArrayD<A>, E>
where
    A: Clone + Zero,
    E: std::error::Error + 'static,
    U: FnMut(&mut T, &[f64]) -> Result<(), E>,
    O: FnMut(&mut T) -> Result<A, E>,
{
    match axes {
        Axes::One(x) => {
            let out = sweep_1d(system, x, |s, xi| update(s, &[xi]), observe)?;
            Ok(out.into_dyn())
        },
        Axes::Two(x, y) => {
            let out = sweep_2d(
                system, x, y, |s, xi, yj| update(s, &[xi, yj]), observe)?;
            Ok(out.into_dyn())
        },
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;
    use super::*;

    #[derive(Debug)]
    struct Diverged;

    impl fmt::Display for Diverged {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "diverged")
        }
    }

    impl std::error::Error for Diverged { }

    #[derive(Debug, Default)]
    struct Counter {
        x: f64,
        y: f64,
        fixed: f64,
        updates: usize,
        visited: Vec<(f64, f64)>,
    }

    fn set(c: &mut Counter, x: f64, y: f64) -> Result<(), Diverged> {
        c.x = x;
        c.y = y;
        c.updates += 1;
        c.visited.push((x, y));
        Ok(())
    }

    #[test]
    fn shape_and_row_major_order() {
        let x = GridAxis::linspace(0.0, 2.0, 3).unwrap();
        let y = GridAxis::linspace(0.0, 3.0, 4).unwrap();
        let mut c = Counter { fixed: 7.0, ..Counter::default() };
        let grid = sweep_2d(
            &mut c, &x, &y, set, |c| Ok(10.0 * c.x + c.y + c.fixed)).unwrap();
        assert_eq!(grid.shape(), &[3, 4]);
        assert_eq!(c.updates, 12);
        assert_eq!(c.fixed, 7.0);
        assert_eq!(&c.visited[..3], &[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]);
        for (i, &xi) in x.iter().enumerate() {
            for (j, &yj) in y.iter().enumerate() {
                assert_eq!(grid[[i, j]], 10.0 * xi + yj + 7.0);
            }
        }
    }

    #[test]
    fn failure_aborts_with_index() {
        let x = GridAxis::linspace(0.0, 1.0, 5).unwrap();
        let mut c = Counter::default();
        let res = sweep_1d(
            &mut c,
            &x,
            |c, xi| set(c, xi, 0.0),
            |c| if c.x > 0.6 { Err(Diverged) } else { Ok(c.x) },
        );
        let err = res.unwrap_err();
        assert_eq!(err.index, vec![3]);
        assert_eq!(c.updates, 4);
        assert!(err.to_string().contains("diverged"));
    }

    #[test]
    fn evaluate_matches_typed_sweeps() {
        let x = GridAxis::linspace(-1.0, 1.0, 4).unwrap();
        let y = GridAxis::linspace(2.0, 3.0, 2).unwrap();
        let axes = Axes::Two(x.clone(), y.clone());
        assert_eq!(axes.num_points(), 8);
        let mut c = Counter::default();
        let dyn_grid = evaluate(
            &mut c, &axes, |c, p| set(c, p[0], p[1]), |c| Ok(c.x * c.y))
            .unwrap();
        let grid = sweep_2d(
            &mut c, &x, &y, set, |c| Ok(c.x * c.y)).unwrap();
        assert_eq!(dyn_grid.shape(), axes.shape().as_slice());
        assert_eq!(dyn_grid.into_dimensionality::<nd::Ix2>().unwrap(), grid);

        let axes = Axes::One(x.clone());
        let dyn_grid = evaluate(
            &mut c, &axes, |c, p| set(c, p[0], 0.5), |c| Ok(c.x + c.y))
            .unwrap();
        assert_eq!(dyn_grid.ndim(), 1);
        let line = dyn_grid.into_dimensionality::<nd::Ix1>().unwrap();
        assert_eq!(line[3], 1.5);
    }
}
