//! Steady-state transport through a dot system.
//!
//! [`Transport`] is the boundary between sweep orchestration and the physics:
//! a solver can be partially updated, solved, and its per-lead currents read
//! back afterward. [`QdSystem`] implements it with the [Pauli master
//! equation][crate::pauli].
//!
//! ```
//! use qdsweep::{
//!     system::{ Change, Params },
//!     transport::{ QdSystem, Transport },
//! };
//!
//! let params = Params::new(2, 4)
//!     .hsingle((0, 0), 0.0)
//!     .hsingle((1, 1), 0.0)
//!     .coulomb((0, 1, 1, 0), 5.0)
//!     .tleads((0, 0), 0.01)
//!     .tleads((1, 1), 0.01)
//!     .tleads((2, 0), 0.01)
//!     .tleads((3, 1), 0.01)
//!     .mulst(vec![-0.5, -0.5, 0.5, 0.5])
//!     .tlst(vec![0.1; 4]);
//! let mut system = QdSystem::new(params).unwrap();
//! system.solve().unwrap();
//! let i_left = system.current()[0] + system.current()[1];
//! assert!(i_left < 0.0);
//!
//! // reverse the bias
//! system.change(
//!     Change::new().mulst(0, 0.5).mulst(1, 0.5).mulst(2, -0.5).mulst(3, -0.5)
//! ).unwrap();
//! system.solve().unwrap();
//! let i_left_rev = system.current()[0] + system.current()[1];
//! assert!((i_left + i_left_rev).abs() < 1e-12);
//! ```

use ndarray as nd;
use tracing::{ debug, trace, warn };
use crate::{
    error::TransportError,
    fock::FockBasis,
    hamiltonian::{ self, Spectrum },
    pauli::{ self, Steady },
    system::{ Change, Method, Params },
};

pub type TransportResult<T> = Result<T, TransportError>;

/// A steady-state transport solver that can be repeatedly updated and
/// re-solved.
pub trait Transport {
    /// Apply a partial update to the system's parameters. Entries not named in
    /// `change` are left as they are.
    fn change(&mut self, change: Change) -> TransportResult<()>;

    /// Solve for the steady state, making the result available through
    /// [`Self::current`].
    fn solve(&mut self) -> TransportResult<()>;

    /// Particle current from each lead into the system, as of the last call
    /// to [`Self::solve`], in meV/ħ. All zeros before the first solve.
    fn current(&self) -> nd::ArrayView1<'_, f64>;
}

/// Dot system coupled to leads, solved in its many-body eigenbasis.
///
/// The Fock basis is built once at construction; changes only patch
/// parameters, and the many-body spectrum is recomputed on the next solve if
/// (and only if) the Hamiltonian was touched.
#[derive(Clone, Debug)]
pub struct QdSystem {
    params: Params,
    basis: FockBasis,
    spectrum: Option<Spectrum>,
    steady: Option<Steady>,
    zeros: nd::Array1<f64>,
}

impl QdSystem {
    /// Validate a system description and prepare it for solving.
    pub fn new(params: Params) -> TransportResult<Self> {
        params.validate()?;
        let basis = FockBasis::new(params.nsingle);
        let zeros = nd::Array1::zeros(params.nleads);
        debug!(
            nsingle = params.nsingle,
            nleads = params.nleads,
            nstates = basis.nstates(),
            method = %params.method,
            "built system"
        );
        Ok(Self { params, basis, spectrum: None, steady: None, zeros })
    }

    /// Get a reference to the current parameters.
    pub fn params(&self) -> &Params { &self.params }

    /// Get a reference to the Fock basis.
    pub fn basis(&self) -> &FockBasis { &self.basis }

    /// Get the many-body spectrum used by the last solve, if any.
    pub fn spectrum(&self) -> Option<&Spectrum> { self.spectrum.as_ref() }

    /// Get the full steady state found by the last solve, if any.
    pub fn steady(&self) -> Option<&Steady> { self.steady.as_ref() }

    /// Energy current from each lead into the system, in meV²/ħ.
    pub fn energy_current(&self) -> nd::ArrayView1<'_, f64> {
        self.steady.as_ref()
            .map(|st| st.energy_current.view())
            .unwrap_or_else(|| self.zeros.view())
    }

    /// Heat current from each lead into the system, in meV²/ħ.
    pub fn heat_current(&self) -> nd::ArrayView1<'_, f64> {
        self.steady.as_ref()
            .map(|st| st.heat_current.view())
            .unwrap_or_else(|| self.zeros.view())
    }

    /// Steady-state occupations of the many-body eigenstates, if solved.
    pub fn occupations(&self) -> Option<nd::ArrayView1<'_, f64>> {
        self.steady.as_ref().map(|st| st.occupations.view())
    }

    /// Energies of the many-body eigenstates, if solved.
    pub fn energies(&self) -> Option<nd::Array1<f64>> {
        self.spectrum.as_ref().map(|sp| sp.energies())
    }

    /// Sum of the particle currents into the system from a set of leads.
    ///
    /// *Panics if any lead index is out of range*.
    pub fn lead_current(&self, leads: &[usize]) -> f64 {
        let current = self.current();
        leads.iter().map(|l| current[*l]).sum()
    }
}

impl Transport for QdSystem {
    fn change(&mut self, change: Change) -> TransportResult<()> {
        self.params.apply(&change)?;
        if change.touches_hamiltonian() { self.spectrum = None; }
        self.steady = None;
        Ok(())
    }

    fn solve(&mut self) -> TransportResult<()> {
        self.steady = None;
        let spectrum
            = match self.spectrum.take() {
                Some(spectrum) => spectrum,
                None => {
                    trace!("rebuilding many-body spectrum");
                    hamiltonian::diagonalize(&self.basis, &self.params)?
                },
            };
        let steady
            = match self.params.method {
                Method::Pauli => {
                    pauli::solve(&self.basis, &spectrum, &self.params)
                },
            };
        self.spectrum = Some(spectrum);
        if let Err(err) = &steady {
            warn!(%err, mulst = ?self.params.mulst, "steady-state solve failed");
        }
        self.steady = Some(steady?);
        Ok(())
    }

    fn current(&self) -> nd::ArrayView1<'_, f64> {
        self.steady.as_ref()
            .map(|st| st.current.view())
            .unwrap_or_else(|| self.zeros.view())
    }
}
