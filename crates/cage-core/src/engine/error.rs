use thiserror::Error;

use super::config::ConfigError;
use crate::core::lattice::LatticeError;
use crate::core::sequence::ParseSequenceError;
use crate::core::spiral::CageBuildError;
use crate::core::symmetry::SymmetryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Requested {what} of {requested} exceeds the limit of {limit}")]
    CapacityExceeded {
        what: &'static str,
        requested: u64,
        limit: u64,
    },

    #[error("Invalid face sequence: {source}")]
    Sequence {
        #[from]
        source: ParseSequenceError,
    },

    #[error("Cage construction failed: {source}")]
    Build {
        #[from]
        source: CageBuildError,
    },

    #[error("Sequence {sequence} does not wind into a closed cage: {reason}")]
    InvalidCage { sequence: String, reason: String },

    #[error("Symmetry detection failed: {source}")]
    Symmetry {
        #[from]
        source: SymmetryError,
    },

    #[error("Lattice construction failed: {source}")]
    Lattice {
        #[from]
        source: LatticeError,
    },
}
