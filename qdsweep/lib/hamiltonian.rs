//! Many-body Hamiltonian of the isolated dot system and its eigenstates.
//!
//! Both the single-particle and interaction terms conserve charge, so the
//! Hamiltonian is built and diagonalized independently in each sector of fixed
//! electron number.

use ndarray as nd;
use ndarray_linalg::{ self as la, EighInto };
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::{
    error::SolveError,
    fock::{ self, FockBasis, Op },
    system::Params,
};

pub type SolveResult<T> = Result<T, SolveError>;

/// Eigenstates of a single charge sector.
#[derive(Clone, Debug)]
pub struct Sector {
    /// Number of electrons.
    pub charge: usize,
    /// Global index of the first eigenstate in this sector.
    pub offset: usize,
    /// Eigenenergies.
    pub energies: nd::Array1<f64>,
    /// Eigenvectors over the sector's Fock states, stored as columns.
    pub vecs: nd::Array2<C64>,
}

impl Sector {
    /// Get the number of eigenstates.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.energies.len() }

    /// Iterate over the global indices of the eigenstates.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len()
    }
}

/// Full many-body spectrum, grouped by charge.
#[derive(Clone, Debug)]
pub struct Spectrum {
    sectors: Vec<Sector>,
    nstates: usize,
}

impl Spectrum {
    /// Get all sectors in order of increasing charge.
    pub fn sectors(&self) -> &[Sector] { &self.sectors }

    /// Get the total number of eigenstates.
    pub fn nstates(&self) -> usize { self.nstates }

    /// Collect all eigenenergies, ordered by global index.
    pub fn energies(&self) -> nd::Array1<f64> {
        self.sectors.iter()
            .flat_map(|s| s.energies.iter().copied())
            .collect()
    }

    /// Collect the charge of every eigenstate, ordered by global index.
    pub fn charges(&self) -> Vec<usize> {
        self.sectors.iter()
            .flat_map(|s| std::iter::repeat(s.charge).take(s.len()))
            .collect()
    }
}

// every term of the Hamiltonian as (coefficient, operator string)
fn terms(params: &Params) -> Vec<(C64, Vec<Op>)> {
    let mut terms: Vec<(C64, Vec<Op>)> = Vec::new();
    for (&(i, j), &hij) in params.hsingle.iter() {
        terms.push((hij, vec![Op::Create(i), Op::Annihilate(j)]));
        if i != j {
            terms.push((hij.conj(), vec![Op::Create(j), Op::Annihilate(i)]));
        }
    }
    for (&(m, n, k, l), &u) in params.coulomb.iter() {
        terms.push((
            C64::from(u),
            vec![Op::Create(m), Op::Create(n), Op::Annihilate(k), Op::Annihilate(l)],
        ));
    }
    terms
}

/// Build the Hamiltonian matrix in the sector of `charge` electrons.
pub fn sector_hamiltonian(basis: &FockBasis, params: &Params, charge: usize)
    -> nd::Array2<C64>
{
    let states = basis.sector(charge);
    let n = states.len();
    let mut H: nd::Array2<C64> = nd::Array2::zeros((n, n));
    let terms = terms(params);
    for (col, &ket) in states.iter().enumerate() {
        for (coef, ops) in terms.iter() {
            if let Some((sign, bra)) = fock::apply(ket, ops) {
                H[[basis.position(bra), col]] += *coef * sign;
            }
        }
    }
    H
}

// group the indices of a Hermitian matrix into sets that are connected by
// nonzero off-diagonal elements
fn blocks<S>(H: &nd::ArrayBase<S, nd::Ix2>) -> Vec<Vec<usize>>
where S: nd::Data<Elem = C64>
{
    let n = H.nrows();
    let mut label: Vec<Option<usize>> = vec![None; n];
    let mut blocks: Vec<Vec<usize>> = Vec::new();
    for start in 0..n {
        if label[start].is_some() { continue; }
        let id = blocks.len();
        let mut block: Vec<usize> = vec![start];
        label[start] = Some(id);
        let mut k = 0;
        while k < block.len() {
            let i = block[k];
            for j in 0..n {
                if label[j].is_none() && !H[[i, j]].is_zero() {
                    label[j] = Some(id);
                    block.push(j);
                }
            }
            k += 1;
        }
        block.sort_unstable();
        blocks.push(block);
    }
    blocks
}

// diagonalize a single sector block by block, so that exact symmetries of the
// Hamiltonian (e.g. spin) are never mixed by the eigensolver within degenerate
// subspaces
fn diagonalize_sector<S>(H: &nd::ArrayBase<S, nd::Ix2>)
    -> SolveResult<(nd::Array1<f64>, nd::Array2<C64>)>
where S: nd::Data<Elem = C64>
{
    let n = H.nrows();
    let mut energies: nd::Array1<f64> = nd::Array1::zeros(n);
    let mut vecs: nd::Array2<C64> = nd::Array2::zeros((n, n));
    let mut col: usize = 0;
    for block in blocks(H).into_iter() {
        if let [i] = block.as_slice() {
            energies[col] = H[[*i, *i]].re;
            vecs[[*i, col]] = C64::from(1.0);
            col += 1;
            continue;
        }
        let sub: nd::Array2<C64>
            = H.select(nd::Axis(0), &block).select(nd::Axis(1), &block);
        let (e, v) = sub.eigh_into(la::UPLO::Lower)?;
        for (k, ek) in e.into_iter().enumerate() {
            energies[col] = ek;
            for (r, &i) in block.iter().enumerate() {
                vecs[[i, col]] = v[[r, k]];
            }
            col += 1;
        }
    }
    Ok((energies, vecs))
}

/// Diagonalize the Hamiltonian in every charge sector.
///
/// Within a sector, Fock states that the Hamiltonian does not connect are
/// diagonalized separately; states that are not connected to any other keep
/// their Fock-basis vectors and skip the eigensolver entirely.
pub fn diagonalize(basis: &FockBasis, params: &Params) -> SolveResult<Spectrum> {
    let mut sectors: Vec<Sector> = Vec::with_capacity(basis.ncharge());
    let mut offset: usize = 0;
    for charge in 0..basis.ncharge() {
        let H = sector_hamiltonian(basis, params, charge);
        let n = H.nrows();
        let (energies, vecs) = diagonalize_sector(&H)?;
        sectors.push(Sector { charge, offset, energies, vecs });
        offset += n;
    }
    Ok(Spectrum { sectors, nstates: offset })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use super::*;

    #[test]
    fn single_level_with_charging_energy() {
        let params = Params::new(2, 1)
            .hsingle((0, 0), -1.0)
            .hsingle((1, 1), -1.0)
            .coulomb((0, 1, 1, 0), 5.0);
        let basis = FockBasis::new(2);
        let spec = diagonalize(&basis, &params).unwrap();
        assert_eq!(spec.nstates(), 4);
        assert_eq!(spec.charges(), vec![0, 1, 1, 2]);
        let e = spec.energies();
        assert_abs_diff_eq!(e[0], 0.0);
        assert_abs_diff_eq!(e[1], -1.0);
        assert_abs_diff_eq!(e[2], -1.0);
        assert_abs_diff_eq!(e[3], 3.0);
    }

    #[test]
    fn hybridized_levels_split() {
        // two levels coupled by omega: bonding/antibonding at e -/+ omega
        let omega = 0.25;
        let params = Params::new(2, 1)
            .hsingle((0, 0), 1.0)
            .hsingle((1, 1), 1.0)
            .hsingle((0, 1), omega);
        let basis = FockBasis::new(2);
        let H = sector_hamiltonian(&basis, &params, 1);
        assert_abs_diff_eq!(H[[0, 1]].re, omega);
        assert_abs_diff_eq!(H[[1, 0]].re, omega);
        let spec = diagonalize(&basis, &params).unwrap();
        let one = &spec.sectors()[1];
        assert_eq!(one.indices(), 1..3);
        assert_abs_diff_eq!(one.energies[0], 1.0 - omega, epsilon = 1e-12);
        assert_abs_diff_eq!(one.energies[1], 1.0 + omega, epsilon = 1e-12);
        // doubly occupied state: 2e, hopping is Pauli-blocked
        assert_abs_diff_eq!(spec.sectors()[2].energies[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn spin_blocks_are_not_mixed() {
        // two spin-degenerate orbitals (0, 1) and (2, 3) hybridized per spin;
        // every one-electron eigenvector must live on a single spin species
        let params = Params::new(4, 1)
            .hsingle((0, 2), 0.05)
            .hsingle((1, 3), 0.05);
        let basis = FockBasis::new(4);
        let spec = diagonalize(&basis, &params).unwrap();
        let one = &spec.sectors()[1];
        let states = basis.sector(1);
        for v in one.vecs.columns() {
            let up: f64 = states.iter().zip(v.iter())
                .filter(|(s, _)| **s & 0b0101 != 0)
                .map(|(_, c)| c.norm_sqr())
                .sum();
            assert!(up < 1e-12 || (1.0 - up) < 1e-12);
        }
        let mut e = one.energies.to_vec();
        e.sort_by(|a, b| a.total_cmp(b));
        assert_abs_diff_eq!(e[0], -0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(e[1], -0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(e[3], 0.05, epsilon = 1e-12);
    }
}
