//! CLI argument definitions for `county-atlas`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "county-atlas",
    version,
    about = "Color county maps from species occurrence records",
    long_about = "Color county maps from species occurrence records.\n\n\
                  Loads a CSV export or workbook with county, family, genus, species and year columns,\n\
                  filters it by taxon and assigns every county a color by record age."
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

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the reference regions.
    Regions(RegionsArgs),

    /// Validate a dataset and print its summary.
    Summary(DataArgs),

    /// List cascading family, genus and species choices.
    Options(OptionsArgs),

    /// Assign every region a color.
    Classify(Box<ClassifyArgs>),

    /// Show the effective settings, or write them to the settings file.
    Settings(SettingsArgs),
}

#[derive(Args)]
pub struct RegionsArgs {
    /// Region names file (CSV with a NAME/county/region column, or one name per line).
    #[arg(long = "regions", value_name = "FILE")]
    pub regions: Option<PathBuf>,
}

#[derive(Args)]
pub struct DataArgs {
    /// Occurrence CSV export or workbook (.xlsx, .xls, .ods).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    #[command(flatten)]
    pub regions: RegionsArgs,
}

#[derive(Args)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Family selection ("All", "Not Specified" or a name).
    #[arg(long = "family")]
    pub family: Option<String>,

    /// Genus selection; requires --family.
    #[arg(long = "genus", requires = "family")]
    pub genus: Option<String>,
}

#[derive(Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Family selection ("All", "Not Specified" or a name).
    #[arg(long = "family")]
    pub family: Option<String>,

    /// Genus selection ("All", "Not Specified" or a name).
    #[arg(long = "genus")]
    pub genus: Option<String>,

    /// Species selection ("All", "Not Specified" or a name).
    #[arg(long = "species")]
    pub species: Option<String>,

    /// Single boundary year: records at or before it take the pre color.
    #[arg(long = "year", value_name = "YEAR", conflicts_with = "years")]
    pub year: Option<String>,

    /// Two boundary years splitting records into three periods.
    #[arg(long = "years", num_args = 2, value_names = ["FIRST", "SECOND"])]
    pub years: Option<Vec<String>>,

    #[command(flatten)]
    pub colors: ColorArgs,

    /// How records without a year take part in year bands.
    #[arg(long = "missing-year", value_enum)]
    pub missing_year: Option<MissingYearArg>,

    /// Write the result to this file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Format of the --output file.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: ExportFormatArg,
}

/// Per-slot color overrides (named color or #RRGGBB).
#[derive(Args)]
pub struct ColorArgs {
    /// Color for records at or before --year.
    #[arg(long = "pre", value_name = "COLOR")]
    pub pre: Option<String>,

    /// Color for records after --year.
    #[arg(long = "post", value_name = "COLOR")]
    pub post: Option<String>,

    /// Color for every record when no year is given.
    #[arg(long = "all", value_name = "COLOR")]
    pub all: Option<String>,

    /// Color for records at or before the first --years value.
    #[arg(long = "first", value_name = "COLOR")]
    pub first: Option<String>,

    /// Color for records between the two --years values.
    #[arg(long = "second", value_name = "COLOR")]
    pub second: Option<String>,

    /// Color for records after the second --years value.
    #[arg(long = "third", value_name = "COLOR")]
    pub third: Option<String>,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// Save the effective settings to the settings file.
    #[arg(long = "write")]
    pub write: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MissingYearArg {
    Exclude,
    AssumeOlder,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
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
