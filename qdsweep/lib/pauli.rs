//! Pauli master equation for sequential tunnelling between many-body
//! eigenstates.
//!
//! Only the populations of the eigenstates are tracked. An eigenstate `a` with
//! `N` electrons is connected to an eigenstate `b` with `N + 1` electrons
//! through lead `l` by the rates
//! ```text
//! Γ(a -> b) = 2π |T^l_ba|² f_l(E_b - E_a)
//! Γ(b -> a) = 2π |T^l_ba|² (1 - f_l(E_b - E_a))
//!
//! T^l_ba = Σ_i t_li <b| d†_i |a>
//! f_l(E) = 1 / (exp((E - μ_l) / T_l) + 1)
//! ```
//! and rates vanish for transition energies outside the band
//! `|E - μ_l| < D`. The steady state solves `K p = 0` with `Σ p = 1`, where
//! `K[b, a]` is the rate `a -> b` for `a != b` and `K[a, a]` is minus the total
//! rate out of `a`. Rates routinely span tens of orders of magnitude (thermally
//! suppressed escapes from blockaded states), so the null vector is found by
//! subtraction-free elimination rather than a generic linear solve.
//!
//! See [`docs`][crate::docs#pauli-master-equation] for more information.

use std::f64::consts::TAU;
use ndarray::{ self as nd, s };
use num_complex::Complex64 as C64;
use tracing::trace;
use crate::{
    error::SolveError,
    fock::{ self, FockBasis },
    hamiltonian::{ Sector, SolveResult, Spectrum },
    system::Params,
    utils::{ all_finite, fermi },
};

/// A single tunnelling process between two eigenstates through one lead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    /// Lead index.
    pub lead: usize,
    /// Global index of the `N`-electron eigenstate.
    pub lower: usize,
    /// Global index of the `N + 1`-electron eigenstate.
    pub upper: usize,
    /// Transition energy `E_upper - E_lower`.
    pub energy: f64,
    /// Rate for an electron to tunnel from the lead into the dot.
    pub rate_in: f64,
    /// Rate for an electron to tunnel from the dot into the lead.
    pub rate_out: f64,
}

// matrix elements of T^l = Σ_i t_li d†_i from sector `lo` to sector `lo + 1`
// in the Fock basis
fn fock_tunnelling(basis: &FockBasis, params: &Params, lead: usize, lo: usize)
    -> nd::Array2<C64>
{
    let kets = basis.sector(lo);
    let nbra = basis.sector(lo + 1).len();
    let mut T: nd::Array2<C64> = nd::Array2::zeros((nbra, kets.len()));
    let couplings = params.tleads.iter()
        .filter(|((l, _), _)| *l == lead);
    for (&(_, level), &t) in couplings {
        for (col, &ket) in kets.iter().enumerate() {
            if let Some((sign, bra)) = fock::create(ket, level) {
                T[[basis.position(bra), col]] += t * sign;
            }
        }
    }
    T
}

// rotate Fock-basis tunnelling amplitudes into the eigenbasis: V_hi† T V_lo
fn eigen_tunnelling(T: &nd::Array2<C64>, lo: &Sector, hi: &Sector)
    -> nd::Array2<C64>
{
    let hi_dag: nd::Array2<C64> = hi.vecs.t().mapv(|v| v.conj());
    hi_dag.dot(T).dot(&lo.vecs)
}

/// Compute the rates of all tunnelling processes.
pub fn transitions(basis: &FockBasis, spectrum: &Spectrum, params: &Params)
    -> Vec<Transition>
{
    let sectors = spectrum.sectors();
    let mut acc: Vec<Transition> = Vec::new();
    for lead in 0..params.nleads {
        let mu = params.mulst[lead];
        let temp = params.tlst[lead];
        for (lo, hi) in sectors.iter().zip(sectors.iter().skip(1)) {
            let T_fock = fock_tunnelling(basis, params, lead, lo.charge);
            let T = eigen_tunnelling(&T_fock, lo, hi);
            for ((b, a), tba) in T.indexed_iter() {
                let gamma = TAU * tba.norm_sqr();
                if gamma == 0.0 { continue; }
                let energy = hi.energies[b] - lo.energies[a];
                if (energy - mu).abs() >= params.dband { continue; }
                let x = (energy - mu) / temp;
                acc.push(Transition {
                    lead,
                    lower: lo.offset + a,
                    upper: hi.offset + b,
                    energy,
                    rate_in: gamma * fermi(x),
                    rate_out: gamma * fermi(-x),
                });
            }
        }
    }
    acc
}

/// Assemble the rate matrix from a set of transitions.
///
/// Columns of the returned matrix sum to zero.
pub fn kernel(nstates: usize, transitions: &[Transition]) -> nd::Array2<f64> {
    let mut K: nd::Array2<f64> = nd::Array2::zeros((nstates, nstates));
    for tr in transitions.iter() {
        let (a, b) = (tr.lower, tr.upper);
        K[[b, a]] += tr.rate_in;
        K[[a, a]] -= tr.rate_in;
        K[[a, b]] += tr.rate_out;
        K[[b, b]] -= tr.rate_out;
    }
    K
}

/// Tolerance on the normalization and sign of steady-state occupations.
pub const OCC_TOL: f64 = 1e-9;

/// Solve for the normalized null vector of a rate matrix.
///
/// Uses Grassmann-Taksar-Heyman elimination: states are folded out one at a
/// time from the highest index down, with each fold rescaled by the total
/// outgoing rate of the eliminated state toward the states that remain. Only
/// the off-diagonal (nonnegative) rates of `K` are read and no subtractions
/// are made, so occupations keep their relative accuracy even when rates
/// differ by many orders of magnitude.
///
/// Returns an error if the chain is reducible, the solution is not finite, or
/// the result is not a probability distribution.
pub fn steady_state(K: nd::Array2<f64>) -> SolveResult<nd::Array1<f64>> {
    let n = K.nrows();
    // P[[a, b]] = rate a -> b
    let mut P: nd::Array2<f64> = K.reversed_axes();
    P.diag_mut().fill(0.0);
    for k in (1..n).rev() {
        let out: f64 = P.slice(s![k, ..k]).sum();
        if out.is_nan() || out <= 0.0 { return Err(SolveError::Reducible(k)); }
        let into: nd::Array1<f64> = P.slice(s![..k, k]).mapv(|r| r / out);
        P.slice_mut(s![..k, k]).assign(&into);
        let from: nd::Array1<f64> = P.slice(s![k, ..k]).to_owned();
        let fold: nd::Array2<f64>
            = &into.view().insert_axis(nd::Axis(1))
            * &from.view().insert_axis(nd::Axis(0));
        let mut block = P.slice_mut(s![..k, ..k]);
        block += &fold;
    }
    // unnormalized back-substitution, rescaled as it goes so that the largest
    // occupation so far is 1
    let mut p: nd::Array1<f64> = nd::Array1::zeros(n);
    p[0] = 1.0;
    for k in 1..n {
        let pk = p.slice(s![..k]).dot(&P.slice(s![..k, k]));
        p[k] = pk;
        if pk > 1.0 { p.slice_mut(s![..=k]).mapv_inplace(|pj| pj / pk); }
    }
    let norm = p.sum();
    if !norm.is_finite() || !all_finite(&p) { return Err(SolveError::NonFinite); }
    p /= norm;
    check_distribution(&p)?;
    Ok(p)
}

fn check_distribution(p: &nd::Array1<f64>) -> SolveResult<()> {
    if let Some(pk) = p.iter().find(|pk| **pk < -OCC_TOL || **pk > 1.0 + OCC_TOL) {
        return Err(SolveError::Unphysical(format!("occupation {pk}")));
    }
    let total = p.sum();
    if (total - 1.0).abs() > OCC_TOL {
        return Err(SolveError::Unphysical(format!("total occupation {total}")));
    }
    Ok(())
}

/// Steady-state solution of the Pauli master equation.
#[derive(Clone, Debug)]
pub struct Steady {
    /// Occupation probability of each many-body eigenstate.
    pub occupations: nd::Array1<f64>,
    /// Particle current from each lead into the dot.
    pub current: nd::Array1<f64>,
    /// Energy current from each lead into the dot.
    pub energy_current: nd::Array1<f64>,
    /// Heat current from each lead into the dot.
    pub heat_current: nd::Array1<f64>,
}

/// Compute per-lead particle and energy currents into the dot for given
/// occupations.
pub fn currents(
    nleads: usize,
    transitions: &[Transition],
    occupations: &nd::Array1<f64>,
) -> (nd::Array1<f64>, nd::Array1<f64>)
{
    let mut current: nd::Array1<f64> = nd::Array1::zeros(nleads);
    let mut energy_current: nd::Array1<f64> = nd::Array1::zeros(nleads);
    for tr in transitions.iter() {
        let flow
            = occupations[tr.lower] * tr.rate_in
            - occupations[tr.upper] * tr.rate_out;
        current[tr.lead] += flow;
        energy_current[tr.lead] += tr.energy * flow;
    }
    (current, energy_current)
}

/// Find the steady state and currents for a diagonalized system.
pub fn solve(basis: &FockBasis, spectrum: &Spectrum, params: &Params)
    -> SolveResult<Steady>
{
    let transitions = transitions(basis, spectrum, params);
    trace!(transitions = transitions.len(), "solving master equation");
    let K = kernel(spectrum.nstates(), &transitions);
    let occupations = steady_state(K)?;
    let (current, energy_current)
        = currents(params.nleads, &transitions, &occupations);
    let heat_current: nd::Array1<f64>
        = nd::Zip::from(&energy_current).and(&current)
        .and(&nd::aview1(&params.mulst))
        .map_collect(|e, i, mu| e - mu * i);
    Ok(Steady { occupations, current, energy_current, heat_current })
}

#[cfg(test)]
mod tests {
    use approx::{ assert_abs_diff_eq, assert_relative_eq };
    use crate::hamiltonian::diagonalize;
    use super::*;

    // single spin-degenerate level, leads (0, 1) left and (2, 3) right
    fn single_level(eg: f64, bias: f64) -> Params {
        let t = 0.1;
        Params::new(2, 4)
            .hsingle((0, 0), eg)
            .hsingle((1, 1), eg)
            .coulomb((0, 1, 1, 0), 5.0)
            .tleads((0, 0), t)
            .tleads((1, 1), t)
            .tleads((2, 0), t)
            .tleads((3, 1), t)
            .mulst(vec![-bias / 2.0, -bias / 2.0, bias / 2.0, bias / 2.0])
            .tlst(vec![0.1; 4])
    }

    fn run(params: &Params) -> Steady {
        let basis = FockBasis::new(params.nsingle);
        let spec = diagonalize(&basis, params).unwrap();
        solve(&basis, &spec, params).unwrap()
    }

    #[test]
    fn kernel_conserves_probability() {
        let params = single_level(0.3, 1.0);
        let basis = FockBasis::new(2);
        let spec = diagonalize(&basis, &params).unwrap();
        let tr = transitions(&basis, &spec, &params);
        // 0 <-> up and 0 <-> down via one lead per side, then up/down <-> 2
        assert_eq!(tr.len(), 8);
        let K = kernel(spec.nstates(), &tr);
        for col in K.columns() {
            assert_abs_diff_eq!(col.sum(), 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn occupations_are_normalized() {
        let steady = run(&single_level(-3.0, 0.5));
        assert_abs_diff_eq!(steady.occupations.sum(), 1.0, epsilon = 1e-12);
        assert!(steady.occupations.iter().all(|p| *p >= -1e-12));
        // level well below both chemical potentials: singly occupied
        let single = steady.occupations[1] + steady.occupations[2];
        assert_abs_diff_eq!(single, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn current_is_conserved() {
        let steady = run(&single_level(0.0, 1.0));
        assert_abs_diff_eq!(steady.current.sum(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(steady.energy_current.sum(), 0.0, epsilon = 1e-12);
        // electrons enter from the left lead (lower chemical potential is on
        // the left, so current flows right to left)
        assert!(steady.current[0] + steady.current[1] < 0.0);
    }

    #[test]
    fn zero_bias_detailed_balance() {
        for eg in [-2.0, -0.1, 0.0, 0.2, 3.0] {
            let steady = run(&single_level(eg, 0.0));
            assert_abs_diff_eq!(
                steady.current[0] + steady.current[1], 0.0, epsilon = 1e-13);
            assert_abs_diff_eq!(
                steady.heat_current[0] + steady.heat_current[1],
                0.0,
                epsilon = 1e-13,
            );
        }
    }

    #[test]
    fn disconnected_state_is_reducible() {
        // level 1 couples to no lead, so its occupation is never fixed
        let params = Params::new(2, 2)
            .hsingle((0, 0), 0.0)
            .hsingle((1, 1), 0.0)
            .tleads((0, 0), 0.1)
            .tleads((1, 0), 0.1)
            .tlst(vec![0.1; 2]);
        let basis = FockBasis::new(2);
        let spec = diagonalize(&basis, &params).unwrap();
        assert!(matches!(
            solve(&basis, &spec, &params),
            Err(SolveError::Reducible(_)),
        ));
    }

    fn chain(rates: &[(f64, f64)]) -> Vec<Transition> {
        rates.iter().enumerate()
            .map(|(k, &(rate_in, rate_out))| {
                Transition {
                    lead: 0,
                    lower: k,
                    upper: k + 1,
                    energy: 0.0,
                    rate_in,
                    rate_out,
                }
            })
            .collect()
    }

    #[test]
    fn blockaded_state_keeps_relative_accuracy() {
        // escape from the last state is 21 orders of magnitude slower than
        // every other process
        let tr = chain(&[(1e-4, 1e-4), (1e-4, 1e-25)]);
        let p = steady_state(kernel(3, &tr)).unwrap();
        assert_relative_eq!(p[0], 1e-21, max_relative = 1e-12);
        assert_relative_eq!(p[1], 1e-21, max_relative = 1e-12);
        assert_relative_eq!(p[2], 1.0, max_relative = 1e-12);
    }

    #[test]
    fn improbable_reference_state_does_not_overflow() {
        // state 0 is the least likely by far; occupations relative to it
        // exceed the range of f64
        let tr = chain(&[(1e-4, 1e-200), (1e-4, 1e-200)]);
        let p = steady_state(kernel(3, &tr)).unwrap();
        assert!(all_finite(&p));
        assert_abs_diff_eq!(p[2], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.sum(), 1.0, epsilon = 1e-12);
        assert!(p.iter().all(|pk| *pk >= 0.0));
    }

    #[test]
    fn balanced_chain_matches_detailed_balance() {
        let tr = chain(&[(2.0, 1.0), (1.0, 3.0), (0.5, 0.25)]);
        let p = steady_state(kernel(4, &tr)).unwrap();
        let expected = nd::array![1.0, 2.0, 2.0 / 3.0, 4.0 / 3.0] / 5.0;
        for (pk, ek) in p.iter().zip(&expected) {
            assert_relative_eq!(*pk, *ek, max_relative = 1e-12);
        }
    }
}
