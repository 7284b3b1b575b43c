//! Predefined quantum-dot and double-quantum-dot systems, with the parameter
//! updates used to sweep them.
//!
//! Every system here couples its levels to a left (source) reservoir through
//! leads 0 and 1 (spin up and down) and to a right (drain) reservoir through
//! leads 2 and 3. The observable is the current in pA, counted positive for
//! electrons travelling from drain to source; see [`left_current_pa`].

use ndarray as nd;
use crate::{
    error::{ SweepError, TransportError },
    grid::GridAxis,
    sweep::{ self, SweepResult },
    system::{ Change, Method, Params },
    transport::{ QdSystem, Transport, TransportResult },
    units,
};

/// Leads attached to the source reservoir.
pub const SOURCE: [usize; 2] = [0, 1];

/// Leads attached to the drain reservoir.
pub const DRAIN: [usize; 2] = [2, 3];

/// Solve the system and return the current through the source leads in pA,
/// positive for electrons travelling from drain to source.
pub fn left_current_pa<T>(system: &mut T) -> TransportResult<f64>
where T: Transport
{
    system.solve()?;
    let current = system.current();
    let i: f64 = SOURCE.iter().map(|l| current[*l]).sum();
    Ok(-units::current_to_pa(i))
}

// equal couplings of each orbital's two spin levels to both reservoirs
fn couple_symmetric(mut params: Params, orbitals: usize, t: f64) -> Params {
    for k in 0..orbitals {
        params = params
            .tleads((SOURCE[0], 2 * k), t)
            .tleads((SOURCE[1], 2 * k + 1), t)
            .tleads((DRAIN[0], 2 * k), t)
            .tleads((DRAIN[1], 2 * k + 1), t);
    }
    params
}

/// Quantum dot with a single spin-degenerate level.
///
/// This is the system for which [`rates`][crate::rates] gives a closed-form
/// current, and is used to validate the master-equation solver against it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SingleLevel {
    /// Charging energy (meV).
    pub ec: f64,
    /// Tunnelling rate to each reservoir (Hz).
    pub gamma: f64,
    /// Left reservoir temperature (K).
    pub temp_l: f64,
    /// Right reservoir temperature (K).
    pub temp_r: f64,
    /// Symmetrically applied bias (mV).
    pub bias: f64,
    /// Lead band half-width (meV).
    pub dband: f64,
    /// Solution method.
    pub method: Method,
}

impl Default for SingleLevel {
    fn default() -> Self {
        Self {
            ec: 5.0,
            gamma: 100e6,
            temp_l: 1.0,
            temp_r: 2.0,
            bias: 0.0,
            dband: 100.0,
            method: Method::Pauli,
        }
    }
}

impl SingleLevel {
    /// Generate the full system description, with the level at zero.
    pub fn params(&self) -> Params {
        let t = units::rate_to_amplitude(self.gamma);
        let tl = units::kelvin_to_mev(self.temp_l);
        let tr = units::kelvin_to_mev(self.temp_r);
        let v = self.bias;
        let params = Params::new(2, 4)
            .hsingle((0, 0), 0.0)
            .hsingle((1, 1), 0.0)
            .coulomb((0, 1, 1, 0), self.ec)
            .mulst(vec![-v / 2.0, -v / 2.0, v / 2.0, v / 2.0])
            .tlst(vec![tl, tl, tr, tr])
            .dband(self.dband)
            .method(self.method);
        couple_symmetric(params, 1, t)
    }

    /// Build the system.
    pub fn build(&self) -> TransportResult<QdSystem> {
        Ok(QdSystem::new(self.params())?)
    }

    /// Shift the level to `eg` (meV) and set a symmetric bias (mV).
    pub fn update<T>(system: &mut T, eg: f64, bias: f64) -> TransportResult<()>
    where T: Transport
    {
        system.change(
            Change::new()
                .hsingle((0, 0), eg)
                .hsingle((1, 1), eg)
                .mulst(0, -bias / 2.0)
                .mulst(1, -bias / 2.0)
                .mulst(2, bias / 2.0)
                .mulst(3, bias / 2.0)
        )
    }

    /// Compute the current (pA) over a series of level positions at the
    /// configured bias.
    pub fn gate_sweep(&self, eg: &GridAxis)
        -> SweepResult<nd::Array1<f64>, TransportError>
    {
        let mut system = self.build().map_err(|err| SweepError::new(vec![], err))?;
        let bias = self.bias;
        sweep::sweep_1d(
            &mut system,
            eg,
            |s, egk| Self::update(s, egk, bias),
            left_current_pa,
        )
    }
}

/// Quantum dot with three spin-degenerate, equally spaced orbitals and a
/// constant charging energy between every pair of electrons. Exchange
/// interactions are neglected.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThreeLevels {
    /// Orbital spacing (meV).
    pub spacing: f64,
    /// Charging energy (meV).
    pub ec: f64,
    /// Tunnelling rate to each reservoir (Hz).
    pub gamma: f64,
    /// Left reservoir temperature (mK).
    pub temp_l: f64,
    /// Right reservoir temperature (mK).
    pub temp_r: f64,
    /// Lead band half-width (meV).
    pub dband: f64,
    /// Solution method.
    pub method: Method,
}

impl Default for ThreeLevels {
    fn default() -> Self {
        Self {
            spacing: 3.0,
            ec: 6.0,
            gamma: 100e6,
            temp_l: 1000.0,
            temp_r: 1000.0,
            dband: 1000.0,
            method: Method::Pauli,
        }
    }
}

impl ThreeLevels {
    const ORBITALS: usize = 3;

    /// Generate the full system description at zero gate shift and bias.
    pub fn params(&self) -> Params {
        let nsingle = 2 * Self::ORBITALS;
        let t = units::rate_to_amplitude(self.gamma);
        let tl = units::millikelvin_to_mev(self.temp_l);
        let tr = units::millikelvin_to_mev(self.temp_r);
        let mut params = Params::new(nsingle, 4)
            .tlst(vec![tl, tl, tr, tr])
            .dband(self.dband)
            .method(self.method);
        for i in 0..nsingle {
            params = params.hsingle((i, i), self.spacing * (i / 2) as f64);
            for j in i + 1..nsingle {
                params = params.coulomb((i, j, j, i), self.ec);
            }
        }
        couple_symmetric(params, Self::ORBITALS, t)
    }

    /// Build the system.
    pub fn build(&self) -> TransportResult<QdSystem> {
        Ok(QdSystem::new(self.params())?)
    }

    /// Set a symmetric bias (mV) and shift all levels down by `eg` (meV).
    pub fn update<T>(&self, system: &mut T, bias: f64, eg: f64)
        -> TransportResult<()>
    where T: Transport
    {
        let change
            = (0..2 * Self::ORBITALS)
            .fold(Change::new(), |ch, i| {
                ch.hsingle((i, i), -eg + self.spacing * (i / 2) as f64)
            })
            .mulst(0, -bias / 2.0)
            .mulst(1, -bias / 2.0)
            .mulst(2, bias / 2.0)
            .mulst(3, bias / 2.0);
        system.change(change)
    }

    /// Compute the charge stability diagram: current (pA) with rows following
    /// `bias` (mV) and columns following `eg` (meV).
    pub fn stability_diagram(&self, bias: &GridAxis, eg: &GridAxis)
        -> SweepResult<nd::Array2<f64>, TransportError>
    {
        let mut system = self.build().map_err(|err| SweepError::new(vec![], err))?;
        sweep::sweep_2d(
            &mut system,
            bias,
            eg,
            |s, v, egk| self.update(s, v, egk),
            left_current_pa,
        )
    }
}

/// Double quantum dot with a single spin-degenerate level in each dot,
/// coupled in series between the reservoirs.
///
/// Levels 0 and 1 belong to the left dot and levels 2 and 3 to the right dot.
/// The bias is applied to the source (left) reservoir only, with the drain
/// grounded. Electron-phonon coupling is not included.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DoubleDot {
    /// Charging energy of the left dot (meV).
    pub u_l: f64,
    /// Charging energy of the right dot (meV).
    pub u_r: f64,
    /// Interdot Coulomb energy (meV).
    pub u_n: f64,
    /// Interdot tunnel coupling (meV).
    pub omega: f64,
    /// Tunnelling rate between the left dot and the source (Hz).
    pub gamma_l: f64,
    /// Tunnelling rate between the right dot and the drain (Hz).
    pub gamma_r: f64,
    /// Source temperature (mK).
    pub temp_l: f64,
    /// Drain temperature (mK).
    pub temp_r: f64,
    /// Bias on the source (mV).
    pub bias: f64,
    /// Lead band half-width (meV).
    pub dband: f64,
    /// Solution method.
    pub method: Method,
}

impl Default for DoubleDot {
    fn default() -> Self {
        Self {
            u_l: 10.0,
            u_r: 10.0,
            u_n: 2.0,
            omega: 0.05,
            gamma_l: 100e6,
            gamma_r: 100e6,
            temp_l: 1000.0,
            temp_r: 1000.0,
            bias: 2.0,
            dband: 100.0,
            method: Method::Pauli,
        }
    }
}

impl DoubleDot {
    /// Generate the full system description with both levels at zero.
    pub fn params(&self) -> Params {
        let tl = units::rate_to_amplitude(self.gamma_l);
        let tr = units::rate_to_amplitude(self.gamma_r);
        let temp_l = units::millikelvin_to_mev(self.temp_l);
        let temp_r = units::millikelvin_to_mev(self.temp_r);
        Params::new(4, 4)
            .hsingle((0, 0), 0.0)
            .hsingle((1, 1), 0.0)
            .hsingle((2, 2), 0.0)
            .hsingle((3, 3), 0.0)
            .hsingle((0, 2), self.omega)
            .hsingle((1, 3), self.omega)
            .coulomb((0, 1, 1, 0), self.u_l)
            .coulomb((2, 3, 3, 2), self.u_r)
            .coulomb((0, 2, 2, 0), self.u_n)
            .coulomb((0, 3, 3, 0), self.u_n)
            .coulomb((1, 2, 2, 1), self.u_n)
            .coulomb((1, 3, 3, 1), self.u_n)
            .tleads((SOURCE[0], 0), tl)
            .tleads((SOURCE[1], 1), tl)
            .tleads((DRAIN[0], 2), tr)
            .tleads((DRAIN[1], 3), tr)
            .mulst(vec![-self.bias, -self.bias, 0.0, 0.0])
            .tlst(vec![temp_l, temp_l, temp_r, temp_r])
            .dband(self.dband)
            .method(self.method)
    }

    /// Build the system.
    pub fn build(&self) -> TransportResult<QdSystem> {
        Ok(QdSystem::new(self.params())?)
    }

    /// Shift the left and right dot levels down by `e_l` and `e_r` (meV),
    /// keeping the configured source bias.
    ///
    /// Shifts follow the convention `ε = μ_D - μ_QD`, i.e. a positive shift
    /// pulls the dot level below the drain's chemical potential.
    pub fn update<T>(&self, system: &mut T, e_l: f64, e_r: f64)
        -> TransportResult<()>
    where T: Transport
    {
        system.change(
            Change::new()
                .hsingle((0, 0), -e_l)
                .hsingle((1, 1), -e_l)
                .hsingle((2, 2), -e_r)
                .hsingle((3, 3), -e_r)
                .mulst(0, -self.bias)
                .mulst(1, -self.bias)
                .mulst(2, 0.0)
                .mulst(3, 0.0)
        )
    }

    /// Compute the charge stability diagram: current (pA) with rows following
    /// `e_l` and columns following `e_r` (both meV).
    pub fn stability_diagram(&self, e_l: &GridAxis, e_r: &GridAxis)
        -> SweepResult<nd::Array2<f64>, TransportError>
    {
        let mut system = self.build().map_err(|err| SweepError::new(vec![], err))?;
        sweep::sweep_2d(
            &mut system,
            e_l,
            e_r,
            |s, el, er| self.update(s, el, er),
            left_current_pa,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use crate::{ rates::simple_rates, utils::{ all_finite, max_abs } };
    use super::*;

    // relative agreement at every point, with an absolute floor far below the
    // peak where the reference current vanishes
    fn assert_close_pointwise(
        actual: &nd::Array1<f64>,
        expected: &nd::Array1<f64>,
        rtol: f64,
    ) {
        let floor = 1e-9 * max_abs(expected);
        for (k, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() <= rtol * e.abs().max(floor),
                "point {k}: {a} vs {e}",
            );
        }
    }

    #[test]
    fn pointwise_check_catches_tail_errors() {
        // a trace that doubles every value below 2% of the peak is far from
        // the reference, even though it is within 5% of the peak everywhere
        let expected = nd::array![0.001, 0.01, 1.0, 0.3, 0.015];
        let doubled = expected.mapv(|x| if x < 0.02 { 2.0 * x } else { x });
        let res = std::panic::catch_unwind(|| {
            assert_close_pointwise(&doubled, &expected, 0.05)
        });
        assert!(res.is_err());
        assert_close_pointwise(&expected, &expected, 0.05);
    }

    #[test]
    fn master_equation_matches_rate_equations() {
        // thermoelectric current with TL = 1 K, TR = 2 K and no bias
        let model = SingleLevel::default();
        let eg = GridAxis::linspace(3.0, -8.0, 500).unwrap();
        let i_me = model.gate_sweep(&eg).unwrap();
        let i_re = simple_rates(eg.points(), 0.0, 1.0, 2.0, 100e6);
        assert_eq!(i_me.len(), 500);
        assert!(all_finite(&i_me));
        let peak = max_abs(&i_re);
        assert!(peak > 0.1);
        assert_close_pointwise(&i_me, &i_re, 0.05);
    }

    #[test]
    fn master_equation_matches_rate_equations_under_bias() {
        let model = SingleLevel { temp_r: 1.0, bias: 1.0, ..SingleLevel::default() };
        let eg = GridAxis::linspace(2.0, -7.0, 91).unwrap();
        let i_me = model.gate_sweep(&eg).unwrap();
        let i_re = simple_rates(eg.points(), 1.0, 1.0, 1.0, 100e6);
        assert_close_pointwise(&i_me, &i_re, 0.05);
    }

    #[test]
    fn zero_bias_symmetric_leads_carry_no_current() {
        let model = SingleLevel { temp_r: 1.0, ..SingleLevel::default() };
        let eg = GridAxis::linspace(2.0, -7.0, 37).unwrap();
        let i_me = model.gate_sweep(&eg).unwrap();
        let peak = units::amps_to_pa(units::e * model.gamma);
        assert!(i_me.iter().all(|i| i.abs() < 1e-9 * peak));
    }

    #[test]
    fn current_is_antisymmetric_in_bias() {
        let model = SingleLevel { temp_r: 1.0, ..SingleLevel::default() };
        let mut system = model.build().unwrap();
        for eg in [-5.2, -2.5, -0.1, 0.0, 0.3] {
            for bias in [0.2, 1.0, 3.0] {
                SingleLevel::update(&mut system, eg, bias).unwrap();
                let fwd = left_current_pa(&mut system).unwrap();
                SingleLevel::update(&mut system, eg, -bias).unwrap();
                let rev = left_current_pa(&mut system).unwrap();
                assert_abs_diff_eq!(fwd, -rev, epsilon = 1e-9 * fwd.abs().max(1.0));
            }
        }
    }

    #[test]
    fn repeated_point_is_identical() {
        let model = SingleLevel::default();
        let mut system = model.build().unwrap();
        SingleLevel::update(&mut system, -0.1, 0.0).unwrap();
        let first = left_current_pa(&mut system).unwrap();
        SingleLevel::update(&mut system, -6.0, 2.0).unwrap();
        left_current_pa(&mut system).unwrap();
        SingleLevel::update(&mut system, -0.1, 0.0).unwrap();
        let again = left_current_pa(&mut system).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn three_levels_storage_follows_axis_order() {
        // rows follow bias, columns follow gate: with the first orbital pulled
        // into a positive bias window the current is positive and grows with
        // bias, and it vanishes with the gate far below all transitions
        let model = ThreeLevels::default();
        let bias = GridAxis::linspace(0.5, 4.0, 8).unwrap();
        let eg = GridAxis::linspace(-5.0, 0.0, 3).unwrap();
        let I = model.stability_diagram(&bias, &eg).unwrap();
        assert_eq!(I.shape(), &[8, 3]);
        assert!(all_finite(&I));
        let resonant = I.column(2);
        assert!(resonant.iter().all(|i| *i > 0.0));
        for (a, b) in resonant.iter().zip(resonant.iter().skip(1)) {
            assert!(b >= a);
        }
        assert!(I.column(0).iter().all(|i| i.abs() < 1e-6 * resonant[7]));
    }

    #[test]
    fn double_dot_empty_dots_block_current() {
        let model = DoubleDot::default();
        let e = GridAxis::linspace(-5.0, 20.0, 11).unwrap();
        let I = model.stability_diagram(&e, &e).unwrap();
        assert_eq!(I.shape(), &[11, 11]);
        assert!(all_finite(&I));
        // both levels far above the drain
        assert_abs_diff_eq!(I[[0, 0]], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn double_dot_steady_states_are_physical() {
        // coarse subgrid of the full 100 x 100 diagram, including the points
        // where the 3-electron ground states are nearly decoupled from the
        // leads
        let full = |k: usize| -5.0 + 25.0 * k as f64 / 99.0;
        let e_l = GridAxis::from_array(
            [0, 20, 40, 57, 59, 80, 91, 99].into_iter().map(full).collect()
        ).unwrap();
        let e_r = GridAxis::from_array(
            [0, 20, 40, 60, 75, 89, 99].into_iter().map(full).collect()
        ).unwrap();
        let model = DoubleDot::default();
        let ceiling = units::amps_to_pa(units::e * model.gamma_l);
        let mut system = model.build().unwrap();
        for &el in e_l.iter() {
            for &er in e_r.iter() {
                model.update(&mut system, el, er).unwrap();
                let current = left_current_pa(&mut system).unwrap();
                assert!(
                    current.abs() <= ceiling * (1.0 + 1e-9),
                    "({el}, {er}): {current} pA",
                );
                let p = system.occupations().unwrap();
                assert!(p.iter().all(|pk| (-1e-12..=1.0 + 1e-12).contains(pk)));
                assert_abs_diff_eq!(p.sum(), 1.0, epsilon = 1e-12);
            }
        }
        // exact corner of the original grid
        model.update(&mut system, 10.0, 20.0).unwrap();
        let current = left_current_pa(&mut system).unwrap();
        assert!(current.is_finite() && current.abs() <= ceiling);
    }

    #[test]
    fn double_dot_aligned_levels_conduct() {
        // both levels inside the bias window: electrons enter from the drain
        // and leave to the source, and detuning the dots suppresses this
        let model = DoubleDot::default();
        let mut system = model.build().unwrap();
        model.update(&mut system, 1.0, 1.0).unwrap();
        let aligned = left_current_pa(&mut system).unwrap();
        model.update(&mut system, 1.0, 1.6).unwrap();
        let detuned = left_current_pa(&mut system).unwrap();
        assert!(aligned > 0.0);
        assert!(aligned > detuned.abs());
    }

    #[test]
    fn sweep_failure_carries_grid_index() {
        let model = SingleLevel::default();
        let eg = GridAxis::from_array(nd::array![0.0, 1.0]).unwrap();
        let mut system = model.build().unwrap();
        let err = sweep::sweep_1d(
            &mut system,
            &eg,
            |s, egk| {
                if egk > 0.5 {
                    s.change(Change::new().hsingle((5, 5), egk))
                } else {
                    SingleLevel::update(s, egk, 0.0)
                }
            },
            left_current_pa,
        ).unwrap_err();
        assert_eq!(err.index, vec![1]);
        assert!(matches!(err.source, TransportError::Config(_)));
    }
}
