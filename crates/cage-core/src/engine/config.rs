use crate::core::canonical::{DEFAULT_SIGNATURE_TOLERANCE, SignatureKind};
use crate::core::geometry::SphericalRelaxation;
use crate::core::models::graph::DEFAULT_VALENCE;
use crate::core::sequence::FaceSequence;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Pattern family of a templated search: how the twelve pentagons split
/// between the tip and the base of the cage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateFamily {
    Cone,
    Lozenge,
    Coffin,
}

impl TemplateFamily {
    /// Returns the pentagon counts of the tip and of the base.
    pub fn pentagon_split(&self) -> (usize, usize) {
        match self {
            TemplateFamily::Cone => (5, 7),
            TemplateFamily::Lozenge => (6, 6),
            TemplateFamily::Coffin => (4, 8),
        }
    }
}

impl fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateFamily::Cone => "cone",
            TemplateFamily::Lozenge => "lozenge",
            TemplateFamily::Coffin => "coffin",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchStrategy {
    /// Every distinct arrangement of a fixed number of pentagons and hexagons.
    Exhaustive {
        pentagons: usize,
        hexagons: usize,
        /// Discard sequences with a longer run of adjacent pentagons.
        max_adjacent_pentagons: Option<usize>,
    },
    /// Tip and base arrangements around a fixed body of hexagons.
    Templated {
        family: TemplateFamily,
        tip_hexagons: usize,
        body_length: usize,
        base_hexagons: usize,
    },
    /// Pentagon placements within one position of a baseline sequence.
    Jiggle { baseline: FaceSequence },
    /// A fixed list of sequences, tried in order.
    Explicit { sequences: Vec<FaceSequence> },
}

impl SearchStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::Exhaustive { .. } => "exhaustive",
            SearchStrategy::Templated { .. } => "templated",
            SearchStrategy::Jiggle { .. } => "jiggle",
            SearchStrategy::Explicit { .. } => "explicit",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegularizationConfig {
    pub enabled: bool,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub step_size: f64,
    pub spring_weight: f64,
}

impl Default for RegularizationConfig {
    fn default() -> Self {
        let relaxation = SphericalRelaxation::default();
        Self {
            enabled: true,
            max_iterations: relaxation.max_iterations,
            tolerance: relaxation.tolerance,
            step_size: relaxation.step_size,
            spring_weight: relaxation.spring_weight,
        }
    }
}

impl RegularizationConfig {
    pub fn relaxation(&self) -> SphericalRelaxation {
        SphericalRelaxation {
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
            step_size: self.step_size,
            spring_weight: self.spring_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureConfig {
    pub kind: SignatureKind,
    pub tolerance: f64,
    /// Initial size of the duplicate table; computed from the search when unset.
    pub table_capacity: Option<usize>,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            kind: SignatureKind::default(),
            tolerance: DEFAULT_SIGNATURE_TOLERANCE,
            table_capacity: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumerationConfig {
    pub strategy: SearchStrategy,
    pub valence: usize,
    /// Stop once this many cages have been accepted.
    pub max_accepted: Option<usize>,
    pub generate_enantiomorphs: bool,
    /// Prefix of the identifiers given to accepted cages.
    pub id_prefix: String,
    pub regularization: RegularizationConfig,
    pub signature: SignatureConfig,
}

#[derive(Default)]
pub struct EnumerationConfigBuilder {
    strategy: Option<SearchStrategy>,
    valence: Option<usize>,
    max_accepted: Option<usize>,
    generate_enantiomorphs: Option<bool>,
    id_prefix: Option<String>,
    regularization: Option<RegularizationConfig>,
    signature: Option<SignatureConfig>,
}

impl EnumerationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn valence(mut self, valence: usize) -> Self {
        self.valence = Some(valence);
        self
    }
    pub fn max_accepted(mut self, limit: usize) -> Self {
        self.max_accepted = Some(limit);
        self
    }
    pub fn generate_enantiomorphs(mut self, enabled: bool) -> Self {
        self.generate_enantiomorphs = Some(enabled);
        self
    }
    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = Some(prefix.into());
        self
    }
    pub fn regularization(mut self, config: RegularizationConfig) -> Self {
        self.regularization = Some(config);
        self
    }
    pub fn signature(mut self, config: SignatureConfig) -> Self {
        self.signature = Some(config);
        self
    }

    pub fn build(self) -> Result<EnumerationConfig, ConfigError> {
        let strategy = self
            .strategy
            .ok_or(ConfigError::MissingParameter("strategy"))?;
        validate_strategy(&strategy)?;

        let valence = self.valence.unwrap_or(DEFAULT_VALENCE);
        if valence < 3 {
            return Err(ConfigError::InvalidParameter {
                name: "valence",
                reason: format!("must be at least 3, got {valence}"),
            });
        }
        if self.max_accepted == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "max_accepted",
                reason: "must be positive".to_string(),
            });
        }

        let signature = self.signature.unwrap_or_default();
        if signature.tolerance.is_nan() || signature.tolerance <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "signature.tolerance",
                reason: format!("must be positive, got {}", signature.tolerance),
            });
        }

        Ok(EnumerationConfig {
            strategy,
            valence,
            max_accepted: self.max_accepted,
            generate_enantiomorphs: self.generate_enantiomorphs.unwrap_or(true),
            id_prefix: self.id_prefix.unwrap_or_else(|| "cage".to_string()),
            regularization: self.regularization.unwrap_or_default(),
            signature,
        })
    }
}

fn validate_strategy(strategy: &SearchStrategy) -> Result<(), ConfigError> {
    match strategy {
        SearchStrategy::Exhaustive {
            pentagons,
            hexagons,
            ..
        } if pentagons + hexagons == 0 => Err(ConfigError::InvalidParameter {
            name: "strategy",
            reason: "exhaustive search needs at least one face".to_string(),
        }),
        SearchStrategy::Jiggle { baseline } if baseline.pentagon_positions().is_empty() => {
            Err(ConfigError::InvalidParameter {
                name: "strategy",
                reason: "jiggle baseline has no pentagons to move".to_string(),
            })
        }
        SearchStrategy::Explicit { sequences } if sequences.is_empty() => {
            Err(ConfigError::InvalidParameter {
                name: "strategy",
                reason: "explicit search needs at least one sequence".to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Settings for building and analysing a single cage.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub valence: usize,
    pub generate_enantiomorph: bool,
    pub regularization: RegularizationConfig,
    pub signature_kind: SignatureKind,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            valence: DEFAULT_VALENCE,
            generate_enantiomorph: true,
            regularization: RegularizationConfig::default(),
            signature_kind: SignatureKind::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exhaustive() -> SearchStrategy {
        SearchStrategy::Exhaustive {
            pentagons: 12,
            hexagons: 2,
            max_adjacent_pentagons: None,
        }
    }

    #[test]
    fn builder_requires_a_strategy() {
        let result = EnumerationConfigBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("strategy")));
    }

    #[test]
    fn builder_fills_defaults() {
        let config = EnumerationConfigBuilder::new()
            .strategy(exhaustive())
            .build()
            .unwrap();
        assert_eq!(config.valence, 3);
        assert_eq!(config.max_accepted, None);
        assert!(config.generate_enantiomorphs);
        assert_eq!(config.id_prefix, "cage");
        assert_eq!(config.signature.kind, SignatureKind::Topological);
        assert_eq!(config.signature.tolerance, 1e-6);
        assert!(config.regularization.enabled);
    }

    #[test]
    fn builder_rejects_invalid_values() {
        let zero_cap = EnumerationConfigBuilder::new()
            .strategy(exhaustive())
            .max_accepted(0)
            .build();
        assert!(matches!(
            zero_cap,
            Err(ConfigError::InvalidParameter { name: "max_accepted", .. })
        ));

        let empty = EnumerationConfigBuilder::new()
            .strategy(SearchStrategy::Explicit { sequences: vec![] })
            .build();
        assert!(matches!(
            empty,
            Err(ConfigError::InvalidParameter { name: "strategy", .. })
        ));

        let flat = EnumerationConfigBuilder::new()
            .strategy(exhaustive())
            .valence(2)
            .build();
        assert!(matches!(
            flat,
            Err(ConfigError::InvalidParameter { name: "valence", .. })
        ));
    }

    #[test]
    fn template_families_split_twelve_pentagons() {
        for family in [TemplateFamily::Cone, TemplateFamily::Lozenge, TemplateFamily::Coffin] {
            let (tip, base) = family.pentagon_split();
            assert_eq!(tip + base, 12, "{family}");
        }
    }
}
