#![allow(dead_code, non_snake_case)]

//! Provides steady-state transport calculations for quantum dots weakly
//! coupled to electron reservoirs, and the machinery to evaluate them over
//! one- and two-dimensional grids of control parameters (gate voltages,
//! bias) to produce charge stability diagrams.
//!
//! Provides implementations for the following:
//! - Many-body spectra of interacting dot Hamiltonians, diagonalized per charge
//!   sector
//! - Pauli master equation for sequential tunnelling[^1]
//! - Closed-form rate equations for a single spin-degenerate level[^2]
//! - Sweep evaluation with in-place system updates
//!
//! See [`docs`] for theoretical background.
//!
//! [^1]: J. König, H. Schoeller, and G. Schön, "Cotunneling at resonance for
//! the single-electron transistor." Phys. Rev. Lett. **78**, 4482 (1997).
//!
//! [^2]: C. W. J. Beenakker, "Theory of Coulomb-blockade oscillations in the
//! conductance of a quantum dot." Phys. Rev. B **44**, 1646 (1991).

pub mod error;
pub mod units;
pub mod utils;
pub mod grid;
pub mod sweep;
pub mod system;
pub mod fock;
pub mod hamiltonian;
pub mod pauli;
pub mod transport;
pub mod rates;
pub mod models;

pub mod docs;

/// Default lead band half-width (meV).
pub(crate) const DEF_DBAND: f64 = 1000.0;
/// Largest number of single-particle levels accepted; the Fock space grows as
/// `2^nsingle`.
pub(crate) const MAX_NSINGLE: usize = 12;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
