use clap::{Args, Parser, Subcommand, ValueEnum};
use spiralcage::core::canonical::SignatureKind;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "spiralcage - build, check and enumerate trivalent polyhedral cages from face-size sequences with the spiral algorithm.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to prepare candidates.
    /// Only effective when built with the `parallel` feature.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Wind a single face sequence into a cage and report its properties.
    Build(BuildArgs),
    /// Search a space of face sequences for distinct cages.
    Enumerate(EnumerateArgs),
    /// Roll an open tube from the hexagonal lattice.
    Tube(TubeArgs),
}

/// Fingerprint used to tell cages apart.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureArg {
    /// Spectrum of the Euclidean distance matrix of the regularized cage.
    Geometric,
    /// Spectrum of the graph distance matrix.
    Topological,
}

impl From<SignatureArg> for SignatureKind {
    fn from(arg: SignatureArg) -> Self {
        match arg {
            SignatureArg::Geometric => SignatureKind::Geometric,
            SignatureArg::Topological => SignatureKind::Topological,
        }
    }
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Face sizes in winding order, e.g. 65555555555556.
    #[arg(required = true, value_name = "SEQUENCE")]
    pub sequence: String,

    /// Number of links every vertex of the closed cage must have.
    #[arg(long, default_value_t = 3, value_name = "INT")]
    pub valence: usize,

    /// Skip spherical regularization of the vertex positions.
    #[arg(long)]
    pub no_regularize: bool,

    /// Do not generate the mirror image of a chiral cage.
    #[arg(long)]
    pub no_enantiomorph: bool,

    /// Fingerprint computed for the built cage.
    #[arg(long, value_enum, default_value_t = SignatureArg::Topological)]
    pub signature: SignatureArg,

    /// Write a CSV summary of the cage (and its mirror image) to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `enumerate` subcommand.
#[derive(Args, Debug)]
pub struct EnumerateArgs {
    /// Path to the search configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Try these sequences instead of the strategy in the config file.
    /// Can be used multiple times.
    #[arg(short = 's', long = "sequence", value_name = "SEQUENCE")]
    pub sequences: Vec<String>,

    /// Write the CSV summary of accepted cages to this path instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Search Overrides ---
    /// Override the number of accepted cages after which the search stops.
    #[arg(short = 'n', long, value_name = "INT")]
    pub max_accepted: Option<usize>,

    /// Override the vertex valence.
    #[arg(long, value_name = "INT")]
    pub valence: Option<usize>,

    /// Override the prefix of accepted cage identifiers.
    #[arg(long, value_name = "PREFIX")]
    pub id_prefix: Option<String>,

    /// Override `generate-enantiomorphs` from the config file.
    #[command(flatten)]
    pub enantiomorphs: EnantiomorphFlags,

    /// Disable regularization, overriding the config file.
    #[arg(long)]
    pub no_regularize: bool,

    /// Override the signature kind.
    #[arg(long, value_enum)]
    pub signature: Option<SignatureArg>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S signature.tolerance=1e-5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// A group to handle mutually exclusive flags for mirror image generation.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct EnantiomorphFlags {
    /// Force generation of mirror images for chiral cages.
    #[arg(long)]
    pub with_enantiomorphs: bool,
    /// Disable generation of mirror images.
    #[arg(long)]
    pub no_enantiomorphs: bool,
}

/// Arguments for the `tube` subcommand.
#[derive(Args, Debug)]
pub struct TubeArgs {
    /// First component of the chiral vector.
    #[arg(required = true, value_name = "N")]
    pub n: u32,

    /// Second component of the chiral vector.
    #[arg(required = true, value_name = "M")]
    pub m: u32,

    /// Number of translational unit cells along the tube axis.
    #[arg(long, default_value_t = 1, value_name = "INT")]
    pub cells: usize,
}
