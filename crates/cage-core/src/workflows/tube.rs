use crate::core::lattice::{Tube, tube};
use crate::core::topology::{ValidationReport, check};
use crate::engine::error::EngineError;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct TubeResult {
    pub tube: Tube,
    /// Check of the open tube; the Euler characteristic is 0 and the rim
    /// vertices are under-saturated, so the report is not expected to be valid.
    pub report: ValidationReport,
}

#[instrument(skip_all, name = "tube_workflow", fields(n = n, m = m, cells = cells))]
pub fn run(n: u32, m: u32, cells: usize) -> Result<TubeResult, EngineError> {
    let tube = tube(n, m, cells)?;
    let report = check(&tube.graph);
    info!(
        vertices = report.vertices,
        edges = report.edges,
        faces = report.faces,
        radius = tube.radius,
        chiral_angle = tube.chiral_angle,
        "Tube built."
    );
    Ok(TubeResult { tube, report })
}
