#![allow(non_upper_case_globals)]

//! Physical constants and conversions between laboratory units and the
//! internal unit system.
//!
//! Internally, all energies (level positions, chemical potentials, lead
//! temperatures, tunnelling amplitudes) are in meV and rates and currents are
//! in meV/ħ. Concrete physical constants are taken from NIST.
//!
//! See [`docs/units`][crate::docs#units] for more information.

use std::f64::consts::TAU;

/// Planck constant (kg m^2 s^-1)
pub const h: f64 = 6.62607015e-34;
//             +/- 0 (exact)

/// reduced Planck constant (kg m^2 s^-1)
pub const hbar: f64 = h / TAU;
//                +/- 0 (exact)

/// Boltzmann's constant (J K^-1)
pub const kB: f64 = 1.380649e-23;
//              +/- 0 (exact)

/// elementary charge (C)
pub const e: f64 = 1.602176634e-19;
//             +/- 0 (exact)

/// Boltzmann's constant (meV K^-1)
pub const kB_meV: f64 = kB / e * 1e3;

/// Convert a temperature in kelvin to an energy in meV.
pub fn kelvin_to_mev(temp: f64) -> f64 { temp * kB_meV }

/// Convert a temperature in millikelvin to an energy in meV.
pub fn millikelvin_to_mev(temp: f64) -> f64 { temp * 1e-3 * kB_meV }

/// Convert a rate in Hz to the equivalent energy ħΓ in meV.
pub fn hz_to_mev(rate: f64) -> f64 { 1e3 * hbar * rate / e }

/// Convert a tunnelling rate Γ in Hz to a bare tunnelling amplitude `t` in
/// meV, such that 2π |t|² = ħΓ.
pub fn rate_to_amplitude(rate: f64) -> f64 { (hz_to_mev(rate) / TAU).sqrt() }

/// Convert a particle current in meV/ħ to an electric current in pA.
pub fn current_to_pa(current: f64) -> f64 { current * 1e9 * e * e / hbar }

/// Convert an electric current in A to pA.
pub fn amps_to_pa(current: f64) -> f64 { current * 1e12 }
