//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units](#units)
//! - [Pauli master equation](#pauli-master-equation)
//! - [Rate equations](#rate-equations)
//! - [Sweeps](#sweeps)
//!
//! # Background
//! A quantum dot (QD) is a small region in which electrons are confined
//! strongly enough that the single-particle spectrum is discrete, and where
//! adding an electron costs a charging energy comparable to or larger than the
//! level spacing. Coupled weakly to electron reservoirs (leads), its
//! conductance is dominated by sequential tunnelling: single electrons hop
//! between a lead and the dot whenever energy conservation allows it, and the
//! current through the device is set by the probabilities with which the dot
//! occupies each of its many-body states.
//!
//! The dot is described by
//! ```text
//! H_dot = Σ_ij h_ij d†_i d_j + Σ_mnkl U_mnkl d†_m d†_n d_k d_l
//! ```
//! where *d*†<sub>*i*</sub> creates an electron in single-particle level *i*
//! (spin included in the level index), *h* holds level energies and
//! inter-level tunnelling (e.g. between the two halves of a double quantum dot,
//! DQD), and *U* holds Coulomb interactions. For the common case of a constant
//! charging energy *E*<sub>c</sub> between every pair of levels, only the
//! density-density terms *U*<sub>*mnnm*</sub> = *E*<sub>c</sub> are nonzero.
//! The leads are non-interacting reservoirs at chemical potentials
//! *μ*<sub>*l*</sub> and temperatures *T*<sub>*l*</sub>, and couple to the dot
//! through
//! ```text
//! H_T = Σ_li (t_li d†_i c_l + h.c.)
//! ```
//! Both *H*<sub>dot</sub> and *H*<sub>*T*</sub> conserve the total electron
//! number, so the dot Hamiltonian is block diagonal in charge sectors and can
//! be diagonalized one sector at a time.
//!
//! # Units
//! All energies are given in meV: level positions, interaction energies,
//! chemical potentials (a bias of *V* mV applied symmetrically shifts the two
//! leads by ∓*V*/2 meV), and temperatures as *k*<sub>B</sub>*T*. Tunnelling
//! amplitudes are also in meV; an amplitude *t* corresponds to a tunnelling
//! rate
//! ```text
//! ħΓ = 2π |t|²
//! ```
//! so a rate Γ given in Hz is converted with *t* = √(10³ ħ Γ / *e* / 2π). Rates
//! and particle currents computed by the solver are then in units of meV/ħ,
//! and an electric current in pA follows from multiplication by
//! 10⁹ *e*²/ħ. See [`units`][crate::units] for the relevant conversions.
//!
//! # Pauli master equation
//! In the limit where the tunnel couplings are much smaller than temperature,
//! coherences between many-body eigenstates of different energy decay quickly
//! and only the eigenstate populations *p*<sub>*a*</sub> need to be
//! tracked[^1]. For eigenstates |*a*〉 with *N* electrons and |*b*〉 with
//! *N* + 1, Fermi's golden rule gives the rate for an electron to enter from
//! lead *l* as
//! ```text
//! Γ^l(a -> b) = 2π |T^l_ba|² f_l(E_b - E_a)
//! T^l_ba      = Σ_i t_li 〈b| d†_i |a〉
//! f_l(E)      = 1 / (exp((E - μ_l) / T_l) + 1)
//! ```
//! and the reverse process carries 1 - *f*<sub>*l*</sub> in place of
//! *f*<sub>*l*</sub>. Each lead has a finite band of half-width *D* about its
//! chemical potential, and transitions outside it are dropped. The populations
//! obey
//! ```text
//! dp_b/dt = Σ_a [Γ(a -> b) p_a - Γ(b -> a) p_b] = Σ_a K[b, a] p_a
//! ```
//! whose steady state is the normalized null vector of the kernel *K*. Deep in
//! Coulomb blockade, escape rates from the ground state can be twenty or more
//! orders of magnitude smaller than every other rate, and a generic linear
//! solve of *K* with one row replaced by the normalization Σ *p* = 1 loses all
//! accuracy. Instead, states are eliminated one at a time with the
//! Grassmann-Taksar-Heyman algorithm[^4], which never subtracts and so keeps
//! every occupation to full relative precision. The particle
//! current from lead *l* into the dot is
//! ```text
//! I_l = Σ_(a, b) [Γ^l(a -> b) p_a - Γ^l(b -> a) p_b]
//! ```
//! with the energy current obtained by weighting each term with
//! *E*<sub>*b*</sub> - *E*<sub>*a*</sub> and the heat current by subtracting
//! *μ*<sub>*l*</sub> *I*<sub>*l*</sub>.
//!
//! The steady state is not unique when a group of states is disconnected from
//! the rest, e.g. a level coupled to no lead, or when all rates out of a state
//! underflow at very low temperature. Such failures are reported as errors
//! rather than patched over; more complete approaches (1vN, Redfield,
//! Lindblad, RTD[^2]) are not provided here.
//!
//! # Rate equations
//! For a single spin-degenerate level with charging energy *E*<sub>c</sub> and
//! bare tunnelling rates Γ<sub>L</sub>, Γ<sub>R</sub>, the master equation can
//! be solved by hand[^3]. If only one charge transition is thermally
//! accessible at a time, the current across the 0 ↔ 1 transition at energy
//! *E* is
//! ```text
//!                  Γ_L Γ_R (f_R - f_L)
//! I_01 = 2 e -------------------------------
//!            Γ_L + Γ_R + Γ_R f_R + Γ_L f_L
//! ```
//! and across the 1 ↔ 2 transition at *E* + *E*<sub>c</sub>
//! ```text
//!                  2 Γ_L Γ_R (f_R - f_L)
//! I_12 = e -----------------------------------
//!          2 (Γ_L + Γ_R) - Γ_L f_L - Γ_R f_R
//! ```
//! where the factors of two count the spin channels available at each step.
//! The total current is approximated by *I*<sub>01</sub> + *I*<sub>12</sub>,
//! which is exact far from the regime where both transitions are active at
//! once; the full [Pauli solution](#pauli-master-equation) for the same system
//! must reproduce it there. See [`rates`][crate::rates].
//!
//! # Sweeps
//! Stability diagrams and gate traces are produced by repeatedly updating a
//! small number of parameters of a single system (level positions through a
//! gate lever arm, lead chemical potentials through the bias) and re-solving.
//! Only the swept quantities change between steps, and the Fock basis is never
//! rebuilt. See [`sweep`][crate::sweep] for the storage convention of
//! two-dimensional results.
//!
//! [^1]: J. König, H. Schoeller, and G. Schön, "Cotunneling at resonance for
//! the single-electron transistor." Phys. Rev. Lett. **78**, 4482 (1997).
//!
//! [^2]: G. Kiršanskas, J. N. Pedersen, O. Karlström, M. Leijnse, and A. Wacker,
//! "QmeQ 1.0: An open-source Python package for calculations of transport
//! through quantum dot devices." Comput. Phys. Commun. **221**, 317 (2017).
//!
//! [^3]: C. W. J. Beenakker, "Theory of Coulomb-blockade oscillations in the
//! conductance of a quantum dot." Phys. Rev. B **44**, 1646 (1991).
//!
//! [^4]: W. K. Grassmann, M. I. Taksar, and D. P. Heyman, "Regenerative
//! analysis and steady state distributions for Markov chains." Oper. Res.
//! **33**, 1107 (1985).
