//! Charge stability diagram of a double quantum dot with one spin-degenerate
//! level per dot, biased on the source side.

use std::path::PathBuf;
use tracing::info;
use whooie::{ mkdir, write_npz };
use lib::init_logging;
use qdsweep::{
    grid::GridAxis,
    models::DoubleDot,
    utils::max_abs,
};

fn main() -> anyhow::Result<()> {
    init_logging("info");

    let e_l = GridAxis::linspace(-5.0, 20.0, 100)?; // meV
    let e_r = GridAxis::linspace(-5.0, 20.0, 100)?; // meV
    let model = DoubleDot::default();
    info!(?model, points = e_l.len() * e_r.len(), "sweeping");
    // rows follow the left dot, columns follow the right dot
    let current = model.stability_diagram(&e_l, &e_r)?;
    info!(max_abs = max_abs(&current), "computed stability diagram (pA)");

    let outdir = PathBuf::from("output");
    mkdir!(outdir);
    write_npz!(
        outdir.join("dqd_single_level.npz"),
        arrays: {
            "e_l" => e_l.points(),
            "e_r" => e_r.points(),
            "current" => &current,
        }
    );
    Ok(())
}
