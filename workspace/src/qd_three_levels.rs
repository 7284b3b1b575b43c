//! Charge stability diagram of a quantum dot with three spin-degenerate
//! orbitals.

use std::path::PathBuf;
use tracing::info;
use whooie::{ mkdir, write_npz };
use lib::init_logging;
use qdsweep::{
    grid::GridAxis,
    models::ThreeLevels,
    utils::max_abs,
};

fn main() -> anyhow::Result<()> {
    init_logging("info");

    let bias = GridAxis::linspace(-10.0, 10.0, 200)?; // mV
    let eg = GridAxis::linspace(-5.0, 40.0, 500)?; // meV
    let model = ThreeLevels::default();
    info!(?model, points = bias.len() * eg.len(), "sweeping");
    // rows follow bias, columns follow gate
    let current = model.stability_diagram(&bias, &eg)?;
    info!(max_abs = max_abs(&current), "computed stability diagram (pA)");

    let outdir = PathBuf::from("output");
    mkdir!(outdir);
    write_npz!(
        outdir.join("qd_three_levels.npz"),
        arrays: {
            "bias" => bias.points(),
            "eg" => eg.points(),
            "current" => &current,
        }
    );
    Ok(())
}
