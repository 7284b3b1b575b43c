//! Static description of a quantum-dot system coupled to leads, and partial
//! updates to it.
//!
//! All energies are in meV. Level indices run over single-particle states
//! (spin included, so a spin-degenerate orbital occupies two indices) and lead
//! indices run over reservoir channels (again with spin included).

use std::{ collections::BTreeMap, fmt, str::FromStr };
use num_complex::Complex64 as C64;
use crate::{
    error::{ ConfigError, LengthError },
    DEF_DBAND,
    MAX_NSINGLE,
};

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Named solution method for the steady state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Pauli (classical) master equation in the many-body eigenbasis:
    /// sequential tunnelling only, with coherences between eigenstates
    /// neglected.
    #[default]
    Pauli,
}

impl Method {
    /// Return `true` if `self` is `Pauli`.
    pub fn is_pauli(&self) -> bool { matches!(self, Self::Pauli) }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pauli => write!(f, "Pauli"),
        }
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pauli" => Ok(Self::Pauli),
            _ => Err(ConfigError::UnknownMethod(s.to_string())),
        }
    }
}

/// Full static description of a system.
///
/// Construct with [`Params::new`] and the builder-style setters, then hand it
/// to [`QdSystem::new`][crate::transport::QdSystem::new], which performs
/// validation.
///
/// ```
/// use qdsweep::system::Params;
///
/// // a single spin-degenerate level with charging energy 5 meV, coupled to a
/// // left (leads 0, 1) and right (leads 2, 3) reservoir
/// let params = Params::new(2, 4)
///     .hsingle((0, 0), 0.0)
///     .hsingle((1, 1), 0.0)
///     .coulomb((0, 1, 1, 0), 5.0)
///     .tleads((0, 0), 0.01)
///     .tleads((1, 1), 0.01)
///     .tleads((2, 0), 0.01)
///     .tleads((3, 1), 0.01)
///     .mulst(vec![0.0; 4])
///     .tlst(vec![0.1; 4]);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    /// Number of single-particle levels.
    pub nsingle: usize,
    /// Single-particle Hamiltonian: level energies on the diagonal and
    /// inter-level tunnelling off the diagonal. Only one of `(i, j)` and
    /// `(j, i)` should be given; its Hermitian conjugate is implied.
    pub hsingle: BTreeMap<(usize, usize), C64>,
    /// Interaction terms `U d†m d†n d_k d_l`, keyed `(m, n, k, l)`. Each term
    /// must be Hermitian by itself, as density-density terms `(m, n, n, m)`
    /// are.
    pub coulomb: BTreeMap<(usize, usize, usize, usize), f64>,
    /// Number of leads.
    pub nleads: usize,
    /// Tunnelling amplitudes between leads and levels, keyed `(lead, level)`.
    pub tleads: BTreeMap<(usize, usize), C64>,
    /// Chemical potential of each lead.
    pub mulst: Vec<f64>,
    /// Temperature of each lead (as an energy).
    pub tlst: Vec<f64>,
    /// Half-width of the lead bands around their chemical potentials.
    pub dband: f64,
    /// Solution method.
    pub method: Method,
}

impl Params {
    /// Create a new, empty description for `nsingle` levels and `nleads`
    /// leads, with all lead chemical potentials at zero and temperatures
    /// unset.
    pub fn new(nsingle: usize, nleads: usize) -> Self {
        Self {
            nsingle,
            hsingle: BTreeMap::new(),
            coulomb: BTreeMap::new(),
            nleads,
            tleads: BTreeMap::new(),
            mulst: vec![0.0; nleads],
            tlst: vec![0.0; nleads],
            dband: DEF_DBAND,
            method: Method::default(),
        }
    }

    /// Set a single-particle Hamiltonian element.
    pub fn hsingle<T>(mut self, idx: (usize, usize), val: T) -> Self
    where T: Into<C64>
    {
        self.hsingle.insert(idx, val.into());
        self
    }

    /// Set an interaction element.
    pub fn coulomb(mut self, idx: (usize, usize, usize, usize), val: f64)
        -> Self
    {
        self.coulomb.insert(idx, val);
        self
    }

    /// Set a lead-level tunnelling amplitude.
    pub fn tleads<T>(mut self, idx: (usize, usize), val: T) -> Self
    where T: Into<C64>
    {
        self.tleads.insert(idx, val.into());
        self
    }

    /// Set all lead chemical potentials.
    pub fn mulst(mut self, mulst: Vec<f64>) -> Self {
        self.mulst = mulst;
        self
    }

    /// Set all lead temperatures.
    pub fn tlst(mut self, tlst: Vec<f64>) -> Self {
        self.tlst = tlst;
        self
    }

    /// Set the band half-width.
    pub fn dband(mut self, dband: f64) -> Self {
        self.dband = dband;
        self
    }

    /// Set the solution method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Check the description for consistency.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.nsingle == 0 { return Err(ConfigError::NoLevels); }
        if self.nsingle > MAX_NSINGLE {
            return Err(ConfigError::TooManyLevels(self.nsingle, MAX_NSINGLE));
        }
        if self.nleads == 0 { return Err(ConfigError::NoLeads); }
        LengthError::check(self.nleads, &self.mulst)?;
        LengthError::check(self.nleads, &self.tlst)?;
        for (&(i, j), hij) in self.hsingle.iter() {
            ConfigError::check_level(i, self.nsingle)?;
            ConfigError::check_level(j, self.nsingle)?;
            ConfigError::check_finite("hsingle", hij.norm())?;
            ConfigError::check_hopping(&self.hsingle, (i, j))?;
        }
        for (&(m, n, k, l), u) in self.coulomb.iter() {
            for idx in [m, n, k, l] {
                ConfigError::check_level(idx, self.nsingle)?;
            }
            ConfigError::check_finite("coulomb", *u)?;
            ConfigError::check_hermitian(&self.coulomb, (m, n, k, l))?;
        }
        for (&(lead, level), t) in self.tleads.iter() {
            ConfigError::check_lead(lead, self.nleads)?;
            ConfigError::check_level(level, self.nsingle)?;
            ConfigError::check_finite("tleads", t.norm())?;
        }
        for (lead, (&mu, &temp)) in self.mulst.iter().zip(&self.tlst).enumerate() {
            ConfigError::check_finite("mulst", mu)?;
            ConfigError::check_temperature(lead, temp)?;
        }
        ConfigError::check_finite("dband", self.dband)?;
        ConfigError::check_bandwidth(self.dband)?;
        Ok(())
    }

    /// Apply a partial update, overwriting only the entries named in `change`.
    ///
    /// The update is validated as a whole before being applied, so `self` is
    /// left untouched on error.
    pub fn apply(&mut self, change: &Change) -> ConfigResult<()> {
        let mut new = self.clone();
        change.hsingle.iter()
            .for_each(|(idx, val)| { new.hsingle.insert(*idx, *val); });
        change.coulomb.iter()
            .for_each(|(idx, val)| { new.coulomb.insert(*idx, *val); });
        change.tleads.iter()
            .for_each(|(idx, val)| { new.tleads.insert(*idx, *val); });
        for &(lead, mu) in change.mulst.iter() {
            ConfigError::check_lead(lead, new.nleads)?;
            new.mulst[lead] = mu;
        }
        for &(lead, temp) in change.tlst.iter() {
            ConfigError::check_lead(lead, new.nleads)?;
            new.tlst[lead] = temp;
        }
        new.validate()?;
        *self = new;
        Ok(())
    }
}

/// A partial replacement of a system's parameters.
///
/// Every entry given here overwrites the corresponding entry of the system it
/// is applied to; all other entries persist.
///
/// ```
/// use qdsweep::system::Change;
///
/// let eg = 2.5;
/// let bias = 1.0;
/// let change = Change::new()
///     .hsingle((0, 0), -eg)
///     .hsingle((1, 1), -eg)
///     .mulst(0, -bias / 2.0)
///     .mulst(2, bias / 2.0);
/// assert!(!change.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Change {
    pub(crate) hsingle: Vec<((usize, usize), C64)>,
    pub(crate) coulomb: Vec<((usize, usize, usize, usize), f64)>,
    pub(crate) tleads: Vec<((usize, usize), C64)>,
    pub(crate) mulst: Vec<(usize, f64)>,
    pub(crate) tlst: Vec<(usize, f64)>,
}

impl Change {
    /// Create a new, empty update.
    pub fn new() -> Self { Self::default() }

    /// Overwrite a single-particle Hamiltonian element.
    pub fn hsingle<T>(mut self, idx: (usize, usize), val: T) -> Self
    where T: Into<C64>
    {
        self.hsingle.push((idx, val.into()));
        self
    }

    /// Overwrite an interaction element.
    pub fn coulomb(mut self, idx: (usize, usize, usize, usize), val: f64)
        -> Self
    {
        self.coulomb.push((idx, val));
        self
    }

    /// Overwrite a lead-level tunnelling amplitude.
    pub fn tleads<T>(mut self, idx: (usize, usize), val: T) -> Self
    where T: Into<C64>
    {
        self.tleads.push((idx, val.into()));
        self
    }

    /// Overwrite the chemical potential of a lead.
    pub fn mulst(mut self, lead: usize, mu: f64) -> Self {
        self.mulst.push((lead, mu));
        self
    }

    /// Overwrite the temperature of a lead.
    pub fn tlst(mut self, lead: usize, temp: f64) -> Self {
        self.tlst.push((lead, temp));
        self
    }

    /// Return `true` if `self` changes nothing.
    pub fn is_empty(&self) -> bool {
        self.hsingle.is_empty()
            && self.coulomb.is_empty()
            && self.tleads.is_empty()
            && self.mulst.is_empty()
            && self.tlst.is_empty()
    }

    /// Return `true` if `self` changes anything that enters the many-body
    /// Hamiltonian.
    pub fn touches_hamiltonian(&self) -> bool {
        !self.hsingle.is_empty() || !self.coulomb.is_empty()
    }
}
