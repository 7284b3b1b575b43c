//! Thermoelectric current through a single spin-degenerate level, computed
//! with both the closed-form rate equations and the Pauli master equation.

use std::path::PathBuf;
use ndarray as nd;
use tracing::info;
use whooie::{ mkdir, write_npz };
use lib::init_logging;
use qdsweep::{
    grid::GridAxis,
    models::SingleLevel,
    rates,
    utils::max_abs,
};

const GAMMA: f64 = 100e6; // Hz
const TEMP_L: f64 = 1.0; // K
const TEMP_R: f64 = 2.0; // K
const BIAS: f64 = 0.0; // mV

fn main() -> anyhow::Result<()> {
    init_logging("info");

    let eg = GridAxis::linspace(3.0, -8.0, 500)?;
    let i_re: nd::Array1<f64>
        = rates::simple_rates(eg.points(), BIAS, TEMP_L, TEMP_R, GAMMA);

    let model = SingleLevel {
        gamma: GAMMA,
        temp_l: TEMP_L,
        temp_r: TEMP_R,
        bias: BIAS,
        ..SingleLevel::default()
    };
    let i_me: nd::Array1<f64> = model.gate_sweep(&eg)?;
    let diff: nd::Array1<f64> = &i_me - &i_re;
    info!(
        peak_re = max_abs(&i_re),
        peak_me = max_abs(&i_me),
        max_diff = max_abs(&diff),
        "computed gate traces (pA)"
    );

    let outdir = PathBuf::from("output");
    mkdir!(outdir);
    write_npz!(
        outdir.join("qd_rate_eq.npz"),
        arrays: {
            "eg" => eg.points(),
            "i_re" => &i_re,
            "i_me" => &i_me,
        }
    );
    Ok(())
}
