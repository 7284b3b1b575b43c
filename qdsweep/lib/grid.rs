//! Evaluation points for one independent sweep variable.

use std::ops::Deref;
use ndarray as nd;
use crate::error::GridError;

pub type GridResult<T> = Result<T, GridError>;

/// An ordered, finite sequence of evaluation points for one independent
/// variable, uniformly spaced between two inclusive bounds.
///
/// Dereferences to the underlying [`ndarray::Array1`].
///
/// ```
/// use qdsweep::grid::GridAxis;
///
/// let eg = GridAxis::linspace(3.0, -8.0, 12).unwrap();
/// assert_eq!(eg.len(), 12);
/// assert_eq!(eg[0], 3.0);
/// assert_eq!(eg[11], -8.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GridAxis {
    points: nd::Array1<f64>,
}

impl GridAxis {
    /// Create a new axis from "linspace-style" arguments (start, inclusive
    /// end, and a point count).
    ///
    /// A single point yields `start`. Decreasing axes (`start > end`) are
    /// allowed and keep their order.
    pub fn linspace(start: f64, end: f64, n: usize) -> GridResult<Self> {
        if n == 0 { return Err(GridError::Empty); }
        if !start.is_finite() || !end.is_finite() {
            return Err(GridError::BadBounds(start, end));
        }
        let points
            = if n == 1 {
                nd::array![start]
            } else {
                nd::Array1::linspace(start, end, n)
            };
        Ok(Self { points })
    }

    /// Create a new axis from a bare array of points.
    pub fn from_array(points: nd::Array1<f64>) -> GridResult<Self> {
        if points.is_empty() { return Err(GridError::Empty); }
        if let Some(bad) = points.iter().find(|x| !x.is_finite()) {
            return Err(GridError::BadBounds(*bad, *bad));
        }
        Ok(Self { points })
    }

    /// Get a reference to the points.
    pub fn points(&self) -> &nd::Array1<f64> { &self.points }

    /// Return the point spacing, or 0 for a single-point axis.
    pub fn step(&self) -> f64 {
        if self.points.len() < 2 { 0.0 } else { self.points[1] - self.points[0] }
    }

    /// Consume `self`, returning the underlying array.
    pub fn into_array(self) -> nd::Array1<f64> { self.points }
}

impl Deref for GridAxis {
    type Target = nd::Array1<f64>;

    fn deref(&self) -> &Self::Target { &self.points }
}
