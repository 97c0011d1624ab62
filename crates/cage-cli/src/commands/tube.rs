use crate::cli::TubeArgs;
use crate::error::Result;
use spiralcage::workflows;
use tracing::info;

pub fn run(args: TubeArgs) -> Result<()> {
    info!("Invoking the core tube workflow...");
    let result = workflows::tube::run(args.n, args.m, args.cells)?;
    let tube = &result.tube;

    println!(
        "Tube ({}, {}) x {} cell(s): {} vertices, {} edges, {} hexagons",
        tube.n,
        tube.m,
        tube.cells,
        result.report.vertices,
        result.report.edges,
        result.report.faces
    );
    println!(
        "  Radius {:.4}, cell length {:.4}, chiral angle {:.2} deg, Euler characteristic {}",
        tube.radius, tube.cell_length, tube.chiral_angle, result.report.euler_characteristic
    );
    Ok(())
}
