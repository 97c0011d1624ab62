use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use crate::utils::report::{self, CageRow};
use spiralcage::core::sequence::FaceSequence;
use spiralcage::engine::config::{BuildConfig, RegularizationConfig};
use spiralcage::workflows;
use tracing::info;

pub fn run(args: BuildArgs) -> Result<()> {
    let sequence: FaceSequence = args
        .sequence
        .parse()
        .map_err(|e| CliError::Argument(format!("'{}': {}", args.sequence, e)))?;
    let config = BuildConfig {
        valence: args.valence,
        generate_enantiomorph: !args.no_enantiomorph,
        regularization: RegularizationConfig {
            enabled: !args.no_regularize,
            ..Default::default()
        },
        signature_kind: args.signature.into(),
    };

    info!("Invoking the core build workflow...");
    let result = workflows::build::run(&sequence, &config)?;

    println!(
        "Cage {}: {} vertices, {} edges, {} faces, point group {}{}",
        result.graph.id(),
        result.report.vertices,
        result.report.edges,
        result.report.faces,
        result.point_group,
        if result.point_group.is_chiral() { " (chiral)" } else { "" }
    );
    if let Some(c) = &result.convergence {
        println!(
            "  Regularization: {} iteration(s), {}",
            c.iterations,
            if c.converged { "converged" } else { "not converged" }
        );
    }
    if let Some(mirror) = &result.enantiomorph {
        println!("  Mirror image generated: {}", mirror.id());
    }

    if let Some(path) = &args.output {
        report::write_rows_to_path(path, &[CageRow::from(&result)])?;
        println!("✓ Summary written to: {}", path.display());
    }
    Ok(())
}
