//! Miscellaneous tools.

use ndarray as nd;

/// Fermi-Dirac occupation `1 / (exp(x) + 1)` of a reservoir state at reduced
/// energy `x = (E - μ) / kT`.
///
/// Evaluated so that large `|x|` saturates to 0 or 1 without producing NaN.
pub fn fermi(x: f64) -> f64 {
    if x > 0.0 {
        let ex = (-x).exp();
        ex / (1.0 + ex)
    } else {
        (1.0 + x.exp()).recip()
    }
}

/// Return the largest absolute value in an array, e.g. to center a diverging
/// color scale on zero. Returns 0 for an empty array.
pub fn max_abs<S, D>(a: &nd::ArrayBase<S, D>) -> f64
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    a.iter().fold(0.0, |acc: f64, ak| acc.max(ak.abs()))
}

/// Return `true` if every element of an array is finite.
pub fn all_finite<S, D>(a: &nd::ArrayBase<S, D>) -> bool
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    a.iter().all(|ak| ak.is_finite())
}
