use crate::core::canonical::{Signature, signature};
use crate::core::enantiomorph;
use crate::core::geometry::{Convergence, Regularizer};
use crate::core::models::graph::Graph;
use crate::core::sequence::FaceSequence;
use crate::core::spiral::build_cage;
use crate::core::symmetry::{MapAutomorphismDetector, PointGroup, SymmetryDetector};
use crate::core::topology::{ValidationReport, check};
use crate::engine::config::BuildConfig;
use crate::engine::error::EngineError;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct BuildResult {
    /// The cage, identified by its face sequence.
    pub graph: Graph,
    pub report: ValidationReport,
    pub point_group: PointGroup,
    pub signature: Signature,
    pub convergence: Option<Convergence>,
    pub enantiomorph: Option<Graph>,
}

/// Winds a single sequence into a cage and analyses it.
///
/// # Errors
///
/// Fails with [`EngineError::Build`] when a face cannot be added and with
/// [`EngineError::InvalidCage`] when the wound surface is not a closed cage.
#[instrument(skip_all, name = "build_workflow", fields(sequence = %sequence))]
pub fn run(sequence: &FaceSequence, config: &BuildConfig) -> Result<BuildResult, EngineError> {
    let mut graph = build_cage(sequence, config.valence)?;
    graph.set_id(&sequence.to_string());

    let report = check(&graph);
    if !report.is_valid() {
        return Err(EngineError::InvalidCage {
            sequence: sequence.to_string(),
            reason: report.summary(),
        });
    }

    let convergence = config
        .regularization
        .enabled
        .then(|| config.regularization.relaxation().regularize(&mut graph));
    let point_group = MapAutomorphismDetector::new().find_symmetry(&graph)?;
    let signature = signature(&graph, config.signature_kind);
    let enantiomorph = if config.generate_enantiomorph {
        enantiomorph::generate(&graph, &point_group)
    } else {
        None
    };

    info!(
        vertices = report.vertices,
        edges = report.edges,
        faces = report.faces,
        group = point_group.symbol(),
        chiral = point_group.is_chiral(),
        "Cage built."
    );
    Ok(BuildResult {
        graph,
        report,
        point_group,
        signature,
        convergence,
        enantiomorph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::RegularizationConfig;

    fn quick() -> BuildConfig {
        BuildConfig {
            regularization: RegularizationConfig {
                max_iterations: 200,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn c24_is_built_checked_and_classified() {
        let result = run(&"65555555555556".parse().unwrap(), &quick()).unwrap();
        assert_eq!(result.graph.id(), "65555555555556");
        assert_eq!(
            (result.report.vertices, result.report.edges, result.report.faces),
            (24, 36, 14)
        );
        assert_eq!(result.point_group.symbol(), "D6d");
        assert!(result.enantiomorph.is_none());
        assert!(result.convergence.is_some());
        assert_eq!(result.signature.len(), 24);
    }

    #[test]
    fn regularization_can_be_skipped() {
        let config = BuildConfig {
            regularization: RegularizationConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = run(&"555555555555".parse().unwrap(), &config).unwrap();
        assert!(result.convergence.is_none());
        assert_eq!(result.point_group.symbol(), "Ih");
    }

    #[test]
    fn premature_closure_is_a_build_error() {
        let result = run(&"5555555555556".parse().unwrap(), &quick());
        assert!(matches!(result, Err(EngineError::Build { .. })));
    }

    #[test]
    fn open_surface_is_an_invalid_cage() {
        let result = run(&"55555".parse().unwrap(), &quick());
        assert!(matches!(result, Err(EngineError::InvalidCage { .. })));
    }
}
