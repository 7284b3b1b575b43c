//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::collections::BTreeMap;
use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Returned when a per-lead list does not have one entry for every lead.
#[derive(Debug, Error)]
#[error("expected one entry per lead ({0} leads); got {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<A>(nleads: usize, values: &[A]) -> Result<(), Self> {
        let n = values.len();
        (n == nleads).then_some(()).ok_or(Self(nleads, n))
    }
}

/// Returned when constructing a [`GridAxis`][crate::grid::GridAxis].
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when an axis is requested with zero points.
    #[error("grid axes must have at least one point")]
    Empty,

    /// Returned when either bound is NaN or infinite.
    #[error("grid bounds must be finite; got ({0}, {1})")]
    BadBounds(f64, f64),
}

/// Returned when a system description is malformed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when a system is described with no single-particle levels.
    #[error("systems must have at least one single-particle level")]
    NoLevels,

    /// Returned when the Fock space would be too large to enumerate.
    #[error("too many single-particle levels: {0} (maximum {1})")]
    TooManyLevels(usize, usize),

    /// Returned when a system is described with no leads.
    #[error("systems must have at least one lead")]
    NoLeads,

    /// Returned when a level index is out of range.
    #[error("level index {0} out of range for {1} levels")]
    LevelIndex(usize, usize),

    /// Returned when a lead index is out of range.
    #[error("lead index {0} out of range for {1} leads")]
    LeadIndex(usize, usize),

    /// Returned when a non-positive lead temperature is encountered.
    #[error("lead temperatures must be greater than 0; got {1} for lead {0}")]
    BadTemperature(usize, f64),

    /// Returned when a non-positive bandwidth is encountered.
    #[error("bandwidth must be greater than 0; got {0}")]
    BadBandwidth(f64),

    /// Returned when a hopping element is given in both orders, `(i, j)` and
    /// `(j, i)`.
    #[error("hopping between levels {0} and {1} given in both orders")]
    DuplicateHopping(usize, usize),

    /// Returned when an interaction term is neither Hermitian by itself nor
    /// accompanied by its Hermitian conjugate.
    #[error("interaction term {0:?} has no Hermitian conjugate")]
    NonHermitian((usize, usize, usize, usize)),

    /// Returned when a parameter is NaN or infinite.
    #[error("non-finite value for parameter {0}")]
    NonFinite(&'static str),

    /// Returned when an unsupported solution method is requested by name.
    #[error("unknown or unsupported solution method '{0}'")]
    UnknownMethod(String),

    /// [`LengthError`]
    #[error("length error: {0}")]
    Length(#[from] LengthError),
}

impl ConfigError {
    pub(crate) fn check_level(idx: usize, nsingle: usize)
        -> Result<(), Self>
    {
        (idx < nsingle).then_some(()).ok_or(Self::LevelIndex(idx, nsingle))
    }

    pub(crate) fn check_lead(idx: usize, nleads: usize) -> Result<(), Self> {
        (idx < nleads).then_some(()).ok_or(Self::LeadIndex(idx, nleads))
    }

    pub(crate) fn check_temperature(lead: usize, temp: f64)
        -> Result<(), Self>
    {
        (temp > 0.0 && temp.is_finite()).then_some(())
            .ok_or(Self::BadTemperature(lead, temp))
    }

    pub(crate) fn check_bandwidth(dband: f64) -> Result<(), Self> {
        (dband > 0.0).then_some(()).ok_or(Self::BadBandwidth(dband))
    }

    pub(crate) fn check_hopping<T>(
        hsingle: &BTreeMap<(usize, usize), T>,
        idx: (usize, usize),
    ) -> Result<(), Self>
    {
        let (i, j) = idx;
        (i == j || !hsingle.contains_key(&(j, i))).then_some(())
            .ok_or(Self::DuplicateHopping(i.min(j), i.max(j)))
    }

    pub(crate) fn check_hermitian(
        coulomb: &BTreeMap<(usize, usize, usize, usize), f64>,
        idx: (usize, usize, usize, usize),
    ) -> Result<(), Self>
    {
        // d+m d+n dk dl is conjugate to d+l d+k dn dm, which is the same
        // operator as d+k d+l dm dn
        let (m, n, k, l) = idx;
        let conj = [(l, k, n, m), (k, l, m, n)];
        let u = coulomb.get(&idx);
        conj.iter()
            .any(|c| *c == idx || coulomb.get(c) == u)
            .then_some(())
            .ok_or(Self::NonHermitian(idx))
    }

    pub(crate) fn check_finite(name: &'static str, x: f64)
        -> Result<(), Self>
    {
        x.is_finite().then_some(()).ok_or(Self::NonFinite(name))
    }
}

/// Returned when a steady state cannot be found.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Returned when the steady-state probabilities contain NaN or infinite
    /// values.
    #[error("steady-state solution is not finite")]
    NonFinite,

    /// Returned when the rate matrix has no unique steady state, e.g. because
    /// a group of states is disconnected from the rest. Holds the index of
    /// the state at which elimination failed.
    #[error("rate matrix is reducible at state {0}")]
    Reducible(usize),

    /// Returned when the steady state is not a probability distribution.
    #[error("steady state is not a probability distribution: {0}")]
    Unphysical(String),

    /// [`LinalgError`].
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}

/// Returned from [`Transport`][crate::transport::Transport] operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// [`ConfigError`]
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// [`SolveError`]
    #[error("solve error: {0}")]
    Solve(#[from] SolveError),
}

/// Returned from sweep functions when an update or evaluation fails at some
/// grid point.
///
/// The sweep is aborted at the first failure; `index` holds the multi-index of
/// the failing point in the storage order of the output grid.
#[derive(Debug, Error)]
#[error("sweep aborted at grid point {index:?}: {source}")]
pub struct SweepError<E>
where E: std::error::Error + 'static
{
    pub index: Vec<usize>,
    #[source]
    pub source: E,
}

impl<E> SweepError<E>
where E: std::error::Error + 'static
{
    pub(crate) fn new(index: Vec<usize>, source: E) -> Self {
        Self { index, source }
    }
}
