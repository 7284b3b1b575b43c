//! Many-body Fock basis over a set of single-particle levels.
//!
//! A Fock state is a bitmask in which bit `i` is set if level `i` is occupied.
//! Fermionic operators are ordered by level index, so that creating or
//! annihilating an electron in level `i` picks up a sign `(-1)^n`, where `n` is
//! the number of occupied levels with index below `i`.

/// A single fermionic creation or annihilation operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op {
    /// d†_i
    Create(usize),
    /// d_i
    Annihilate(usize),
}

// (-1)^(number of occupied levels below `i`)
fn parity(state: u32, i: usize) -> f64 {
    let below = state & ((1_u32 << i) - 1);
    if below.count_ones() % 2 == 0 { 1.0 } else { -1.0 }
}

/// Apply d†_i to a Fock state, returning the sign and the new state, or `None`
/// if the level is already occupied.
pub fn create(state: u32, i: usize) -> Option<(f64, u32)> {
    let bit = 1_u32 << i;
    (state & bit == 0).then(|| (parity(state, i), state | bit))
}

/// Apply d_i to a Fock state, returning the sign and the new state, or `None`
/// if the level is empty.
pub fn annihilate(state: u32, i: usize) -> Option<(f64, u32)> {
    let bit = 1_u32 << i;
    (state & bit != 0).then(|| (parity(state, i), state & !bit))
}

/// Apply a product of operators to a Fock state.
///
/// Operators are written left to right as in the product, i.e. the last
/// operator in `ops` acts first.
pub fn apply(state: u32, ops: &[Op]) -> Option<(f64, u32)> {
    ops.iter().rev()
        .try_fold((1.0, state), |(sign, s), op| {
            let (sk, new) = match *op {
                Op::Create(i) => create(s, i)?,
                Op::Annihilate(i) => annihilate(s, i)?,
            };
            Some((sign * sk, new))
        })
}

/// All Fock states of a system, grouped into sectors of fixed charge.
#[derive(Clone, Debug)]
pub struct FockBasis {
    nsingle: usize,
    // sectors[n] holds all states with n electrons, in ascending order
    sectors: Vec<Vec<u32>>,
    // index of each state within its sector
    position: Vec<usize>,
}

impl FockBasis {
    /// Enumerate all `2^nsingle` states.
    ///
    /// *Panics if `nsingle` is 32 or larger*.
    pub fn new(nsingle: usize) -> Self {
        assert!(nsingle < 32, "fock basis is limited to 31 levels");
        let nstates = 1_usize << nsingle;
        let mut sectors: Vec<Vec<u32>> = vec![Vec::new(); nsingle + 1];
        let mut position: Vec<usize> = vec![0; nstates];
        for state in 0..nstates as u32 {
            let sector = &mut sectors[state.count_ones() as usize];
            position[state as usize] = sector.len();
            sector.push(state);
        }
        Self { nsingle, sectors, position }
    }

    /// Get the number of single-particle levels.
    pub fn nsingle(&self) -> usize { self.nsingle }

    /// Get the total number of states.
    pub fn nstates(&self) -> usize { self.position.len() }

    /// Get the number of charge sectors, `nsingle + 1`.
    pub fn ncharge(&self) -> usize { self.sectors.len() }

    /// Get the states with `charge` electrons.
    ///
    /// *Panics if `charge > nsingle`*.
    pub fn sector(&self, charge: usize) -> &[u32] { &self.sectors[charge] }

    /// Get the index of a state within its charge sector.
    pub fn position(&self, state: u32) -> usize {
        self.position[state as usize]
    }

    /// Iterate over all sectors in order of increasing charge.
    pub fn sectors(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.sectors.iter().map(|s| s.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_signs() {
        // |1 1 0> (levels 0 and 1 occupied)
        let s = 0b011;
        assert_eq!(create(s, 2), Some((1.0, 0b111)));
        assert_eq!(create(s, 1), None);
        assert_eq!(annihilate(s, 1), Some((-1.0, 0b001)));
        assert_eq!(annihilate(s, 0), Some((1.0, 0b010)));
        assert_eq!(annihilate(0b000, 0), None);
    }

    #[test]
    fn anticommutation() {
        // d†_0 d†_1 = -d†_1 d†_0
        let a = apply(0, &[Op::Create(0), Op::Create(1)]).unwrap();
        let b = apply(0, &[Op::Create(1), Op::Create(0)]).unwrap();
        assert_eq!(a.1, b.1);
        assert_eq!(a.0, -b.0);
    }

    #[test]
    fn density_product_is_diagonal() {
        // d†_0 d†_1 d_1 d_0 = n_0 n_1
        let ops = [Op::Create(0), Op::Create(1), Op::Annihilate(1), Op::Annihilate(0)];
        assert_eq!(apply(0b11, &ops), Some((1.0, 0b11)));
        assert_eq!(apply(0b01, &ops), None);
        assert_eq!(apply(0b111, &ops), Some((1.0, 0b111)));
    }

    #[test]
    fn sectors_cover_basis() {
        let basis = FockBasis::new(4);
        assert_eq!(basis.nstates(), 16);
        assert_eq!(basis.ncharge(), 5);
        let sizes: Vec<usize> = basis.sectors().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![1, 4, 6, 4, 1]);
        for sector in basis.sectors() {
            for (k, &state) in sector.iter().enumerate() {
                assert_eq!(basis.position(state), k);
            }
        }
    }
}
