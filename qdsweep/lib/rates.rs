//! Closed-form rate-equation model for a quantum dot with a single
//! spin-degenerate level.
//!
//! Bias is applied to the leads symmetrically, and an electron travelling from
//! the right (drain) to the left (source) lead contributes a positive current.
//! Energies are in meV, biases in mV, temperatures in K and tunnelling rates in
//! Hz. See [`docs`][crate::docs#rate-equations] for the derivation.
//!
//! ```
//! use ndarray as nd;
//! use qdsweep::rates::simple_rates;
//!
//! // thermoelectric current: left lead at 1 K, right lead at 2 K, no bias
//! let eg: nd::Array1<f64> = nd::Array1::linspace(3.0, -8.0, 500);
//! let current = simple_rates(&eg, 0.0, 1.0, 2.0, 100e6);
//! assert_eq!(current.len(), 500);
//! assert!(current.iter().all(|i| i.is_finite()));
//! ```

use ndarray as nd;
use crate::{
    Arr1,
    units::{ amps_to_pa, e, kB_meV },
    utils::fermi,
};

/// Fermi-Dirac occupation of the left lead at energy `E`, including its half
/// of a symmetrically applied bias `V`, at temperature `T`.
pub fn fermi_left(E: f64, V: f64, T: f64) -> f64 {
    fermi((E + V / 2.0) / (kB_meV * T))
}

/// Fermi-Dirac occupation of the right lead at energy `E`, including its half
/// of a symmetrically applied bias `V`, at temperature `T`.
pub fn fermi_right(E: f64, V: f64, T: f64) -> f64 {
    fermi((E - V / 2.0) / (kB_meV * T))
}

/// Current (A) across the 0 ↔ 1 charge transition at energy `E`.
///
/// Two spin channels are available for the first electron to enter.
pub fn i01(E: f64, V: f64, TL: f64, TR: f64, GL: f64, GR: f64) -> f64 {
    let fl = fermi_left(E, V, TL);
    let fr = fermi_right(E, V, TR);
    2.0 * e * (GL * GR) / (GL + GR + GR * fr + GL * fl) * (fr - fl)
}

/// Current (A) across the 1 ↔ 2 charge transition at energy `E`.
///
/// Only one spin channel is available for the second electron to enter, but
/// either of two can be used to leave.
pub fn i12(E: f64, V: f64, TL: f64, TR: f64, GL: f64, GR: f64) -> f64 {
    let fl = fermi_left(E, V, TL);
    let fr = fermi_right(E, V, TR);
    e * (2.0 * GL * GR) / (2.0 * (GL + GR) - GL * fl - GR * fr) * (fr - fl)
}

/// Single spin-degenerate level with a fixed charging energy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RateModel {
    /// Charging energy (meV).
    pub ec: f64,
    /// Position of the 0 ↔ 1 transition at zero gate shift (meV).
    pub e0: f64,
    /// Tunnelling rate to the left lead (Hz).
    pub gamma_l: f64,
    /// Tunnelling rate to the right lead (Hz).
    pub gamma_r: f64,
}

impl Default for RateModel {
    fn default() -> Self {
        Self { ec: 5.0, e0: 0.0, gamma_l: 100e6, gamma_r: 100e6 }
    }
}

impl RateModel {
    /// Create a new model with symmetric tunnelling rates.
    pub fn symmetric(ec: f64, gamma: f64) -> Self {
        Self { ec, e0: 0.0, gamma_l: gamma, gamma_r: gamma }
    }

    /// Total current (pA) `I01 + I12` for a gate-induced level shift `eg`.
    pub fn current(&self, eg: f64, bias: f64, TL: f64, TR: f64) -> f64 {
        let e1 = self.e0 + eg;
        let e2 = self.e0 + self.ec + eg;
        let (gl, gr) = (self.gamma_l, self.gamma_r);
        amps_to_pa(
            i01(e1, bias, TL, TR, gl, gr) + i12(e2, bias, TL, TR, gl, gr))
    }

    /// Vectorized version of [`Self::current`] over level shifts.
    pub fn currents<S>(&self, eg: &Arr1<S>, bias: f64, TL: f64, TR: f64)
        -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        eg.mapv(|egk| self.current(egk, bias, TL, TR))
    }
}

/// Compute the total current (pA) through a dot with charging energy 5 meV and
/// symmetric tunnelling rates `gamma` for a series of gate-induced level
/// shifts.
pub fn simple_rates<S>(eg: &Arr1<S>, bias: f64, TL: f64, TR: f64, gamma: f64)
    -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    RateModel::symmetric(RateModel::default().ec, gamma)
        .currents(eg, bias, TL, TR)
}
