//! Command-line arguments of `cbio-convert`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cbio_cli::taxonomy::DEFAULT_TAXONOMY_URL;

#[derive(Parser)]
#[command(
    name = "cbio-convert",
    version,
    about = "Convert cBioPortal-style study folders into typed datasets",
    long_about = "Convert cBioPortal-style study folders into typed, content-addressed datasets.\n\n\
                  Writes a Parquet table, a JSON data dictionary, dataset metadata, a\n\
                  source archive and a manifest record for each study."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert one study folder.
    Convert(ConvertArgs),

    /// Convert every study folder under a root directory.
    Bconvert(BulkArgs),

    /// Convert the omics data/meta pairs of a study folder.
    Omics(OmicsArgs),

    /// Download the disease/organ taxonomy and refresh the local cache.
    Taxonomy(TaxonomyArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Study folder; its name must match `cancer_study_identifier`.
    #[arg(value_name = "STUDY_DIR")]
    pub study_dir: PathBuf,

    /// Output root; files go to <OUTPUT_DIR>/<VERSION>/.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Also convert omics pairs into <OUTPUT_DIR>/<VERSION>/datafiles/.
    #[arg(long = "with-omics")]
    pub with_omics: bool,

    #[command(flatten)]
    pub options: OptionArgs,

    #[command(flatten)]
    pub taxonomy: TaxonomyArgs,
}

#[derive(Parser)]
pub struct BulkArgs {
    /// Directory whose immediate sub-folders are studies.
    #[arg(value_name = "ROOT_DIR")]
    pub root_dir: PathBuf,

    /// Output root; each study goes to <OUTPUT_DIR>/<STUDY>/<VERSION>/.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub options: OptionArgs,

    #[command(flatten)]
    pub taxonomy: TaxonomyArgs,
}

#[derive(Parser)]
pub struct OmicsArgs {
    /// Study folder holding data_*/meta_* pairs.
    #[arg(value_name = "STUDY_DIR")]
    pub study_dir: PathBuf,

    /// Output directory for the per-pair files.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Conversion options; explicit flags override the config file.
#[derive(Args)]
pub struct OptionArgs {
    /// TOML file with conversion options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Organization recorded as the `org:` tag [default: Unassigned].
    #[arg(long = "organization")]
    pub organization: Option<String>,

    /// Dataset version and output sub-folder name [default: v0.0.1].
    #[arg(long = "dataset-version", value_name = "VERSION")]
    pub dataset_version: Option<String>,

    /// Skip work whose outputs already exist.
    #[arg(long = "skip")]
    pub skip: bool,

    /// Literal set treated as missing values [default: baseline].
    #[arg(long = "missing-values", value_enum)]
    pub missing_values: Option<MissingValuesArg>,

    /// Drop allowed values of columns with more distinct values than this.
    #[arg(long = "max-allowed-values", value_name = "N")]
    pub max_allowed_values: Option<usize>,

    /// Uploader recorded in the manifest [default: BioMiner].
    #[arg(long = "uploader")]
    pub uploader: Option<String>,

    /// Object-store prefix of manifest URLs.
    #[arg(long = "url-base", value_name = "URL")]
    pub url_base: Option<String>,

    /// License recorded in dataset.json.
    #[arg(long = "license")]
    pub license: Option<String>,
}

#[derive(Args)]
pub struct TaxonomyArgs {
    /// Tumor-type tree endpoint.
    #[arg(long = "taxonomy-url", value_name = "URL", default_value = DEFAULT_TAXONOMY_URL)]
    pub taxonomy_url: String,

    /// Cache directory [default: $CBIO_TAXONOMY_DIR or ~/.biominer-indexd].
    #[arg(long = "taxonomy-cache", value_name = "DIR")]
    pub taxonomy_cache: Option<PathBuf>,

    /// Skip the taxonomy; no disease or organ tags are produced.
    #[arg(long = "offline")]
    pub offline: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MissingValuesArg {
    Baseline,
    Extended,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
