use crate::cli::{EnantiomorphFlags, EnumerateArgs};
use crate::error::{CliError, Result};
use serde::Deserialize;
use spiralcage::core::canonical::SignatureKind;
use spiralcage::core::sequence::FaceSequence;
use spiralcage::engine::config as core_config;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", rename_all_fields = "kebab-case", tag = "type")]
enum PartialStrategy {
    Exhaustive {
        pentagons: usize,
        hexagons: usize,
        max_adjacent_pentagons: Option<usize>,
    },
    Templated {
        family: core_config::TemplateFamily,
        tip_hexagons: usize,
        body_length: usize,
        base_hexagons: usize,
    },
    Jiggle {
        baseline: FaceSequence,
    },
    Explicit {
        sequences: Vec<FaceSequence>,
    },
}

impl From<PartialStrategy> for core_config::SearchStrategy {
    fn from(p: PartialStrategy) -> Self {
        match p {
            PartialStrategy::Exhaustive {
                pentagons,
                hexagons,
                max_adjacent_pentagons,
            } => core_config::SearchStrategy::Exhaustive {
                pentagons,
                hexagons,
                max_adjacent_pentagons,
            },
            PartialStrategy::Templated {
                family,
                tip_hexagons,
                body_length,
                base_hexagons,
            } => core_config::SearchStrategy::Templated {
                family,
                tip_hexagons,
                body_length,
                base_hexagons,
            },
            PartialStrategy::Jiggle { baseline } => core_config::SearchStrategy::Jiggle { baseline },
            PartialStrategy::Explicit { sequences } => {
                core_config::SearchStrategy::Explicit { sequences }
            }
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialRegularizationConfig {
    enabled: Option<bool>,
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
    step_size: Option<f64>,
    spring_weight: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSignatureConfig {
    kind: Option<SignatureKind>,
    tolerance: Option<f64>,
    table_capacity: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialEnumerationConfig {
    strategy: Option<PartialStrategy>,
    valence: Option<usize>,
    max_accepted: Option<usize>,
    generate_enantiomorphs: Option<bool>,
    id_prefix: Option<String>,
    regularization: Option<PartialRegularizationConfig>,
    signature: Option<PartialSignatureConfig>,
}

impl PartialEnumerationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn merge_with_cli(mut self, args: &EnumerateArgs) -> Result<core_config::EnumerationConfig> {
        self.apply_set_values(&args.set_values)?;

        let strategy = if args.sequences.is_empty() {
            self.strategy.take().map(Into::into).ok_or_else(|| {
                CliError::Config(
                    "A `[strategy]` section is required in the config file unless sequences are given with --sequence."
                        .to_string(),
                )
            })?
        } else {
            let sequences = args
                .sequences
                .iter()
                .map(|s| FaceSequence::from_str(s))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| CliError::Argument(e.to_string()))?;
            core_config::SearchStrategy::Explicit { sequences }
        };

        let mut builder = core_config::EnumerationConfigBuilder::new()
            .strategy(strategy)
            .regularization(Self::merge_regularization(
                self.regularization.take(),
                args.no_regularize,
            ))
            .signature(Self::merge_signature(
                self.signature.take(),
                args.signature.map(Into::into),
            ))
            .generate_enantiomorphs(Self::merge_enantiomorphs(
                args.enantiomorphs,
                self.generate_enantiomorphs,
            ));

        if let Some(valence) = args.valence.or(self.valence) {
            builder = builder.valence(valence);
        }
        if let Some(limit) = args.max_accepted.or(self.max_accepted) {
            builder = builder.max_accepted(limit);
        }
        if let Some(prefix) = args.id_prefix.clone().or(self.id_prefix) {
            builder = builder.id_prefix(prefix);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn merge_enantiomorphs(cli_flags: EnantiomorphFlags, file_val: Option<bool>) -> bool {
        if cli_flags.with_enantiomorphs {
            true
        } else if cli_flags.no_enantiomorphs {
            false
        } else {
            file_val.unwrap_or(true)
        }
    }

    fn merge_regularization(
        partial: Option<PartialRegularizationConfig>,
        cli_disabled: bool,
    ) -> core_config::RegularizationConfig {
        let partial = partial.unwrap_or_default();
        let defaults = core_config::RegularizationConfig::default();
        core_config::RegularizationConfig {
            enabled: !cli_disabled && partial.enabled.unwrap_or(defaults.enabled),
            max_iterations: partial.max_iterations.unwrap_or(defaults.max_iterations),
            tolerance: partial.tolerance.unwrap_or(defaults.tolerance),
            step_size: partial.step_size.unwrap_or(defaults.step_size),
            spring_weight: partial.spring_weight.unwrap_or(defaults.spring_weight),
        }
    }

    fn merge_signature(
        partial: Option<PartialSignatureConfig>,
        cli_kind: Option<SignatureKind>,
    ) -> core_config::SignatureConfig {
        let partial = partial.unwrap_or_default();
        let defaults = core_config::SignatureConfig::default();
        core_config::SignatureConfig {
            kind: cli_kind.or(partial.kind).unwrap_or(defaults.kind),
            tolerance: partial.tolerance.unwrap_or(defaults.tolerance),
            table_capacity: partial.table_capacity.or(defaults.table_capacity),
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "valence" => self.valence = Some(parse_value(key, value_str)?),
                "max-accepted" => self.max_accepted = Some(parse_value(key, value_str)?),
                "generate-enantiomorphs" => {
                    self.generate_enantiomorphs = Some(parse_value(key, value_str)?)
                }
                "id-prefix" => self.id_prefix = Some(value_str.to_string()),
                "regularization.enabled" => {
                    self.regularization
                        .get_or_insert_with(Default::default)
                        .enabled = Some(parse_value(key, value_str)?);
                }
                "regularization.max-iterations" => {
                    self.regularization
                        .get_or_insert_with(Default::default)
                        .max_iterations = Some(parse_value(key, value_str)?);
                }
                "regularization.tolerance" => {
                    self.regularization
                        .get_or_insert_with(Default::default)
                        .tolerance = Some(parse_value(key, value_str)?);
                }
                "regularization.step-size" => {
                    self.regularization
                        .get_or_insert_with(Default::default)
                        .step_size = Some(parse_value(key, value_str)?);
                }
                "regularization.spring-weight" => {
                    self.regularization
                        .get_or_insert_with(Default::default)
                        .spring_weight = Some(parse_value(key, value_str)?);
                }
                "signature.kind" => {
                    let kind = match value_str {
                        "geometric" => SignatureKind::Geometric,
                        "topological" => SignatureKind::Topological,
                        _ => {
                            return Err(CliError::Config(format!(
                                "Invalid value for {}: {}. Expected 'geometric' or 'topological'.",
                                key, value_str
                            )));
                        }
                    };
                    self.signature.get_or_insert_with(Default::default).kind = Some(kind);
                }
                "signature.tolerance" => {
                    self.signature
                        .get_or_insert_with(Default::default)
                        .tolerance = Some(parse_value(key, value_str)?);
                }
                "signature.table-capacity" => {
                    self.signature
                        .get_or_insert_with(Default::default)
                        .table_capacity = Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value_str)))
}
