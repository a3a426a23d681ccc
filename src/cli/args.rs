use crate::utils::constants::{DEFAULT_PREVIEW_ROWS, DEFAULT_SECRETS_FILE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "site-quality")]
#[command(about = "Site-level data quality reports for an organization's installations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "SITE_QUALITY_SECRETS",
        default_value = DEFAULT_SECRETS_FILE,
        help = "TOML file with PG_* credentials (overrides the environment)"
    )]
    pub secrets: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List organizations available for reporting
    Organizations {
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Fetch an organization's sites and write the annotated CSV
    Report {
        #[arg(
            long,
            conflicts_with = "organization_id",
            required_unless_present = "organization_id",
            help = "Organization name, as listed by `organizations`"
        )]
        organization: Option<String>,

        #[arg(long, help = "Organization id")]
        organization_id: Option<String>,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: output/data_quality_check_{organization}.csv]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS, help = "Annotated rows to print (0 = none)")]
        preview: usize,
    },

    /// Re-run the quality checks over a previously exported site CSV
    Classify {
        #[arg(short, long, help = "Input site CSV file")]
        input_file: PathBuf,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: output/data_quality_check_{organization}.csv]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS, help = "Annotated rows to print (0 = none)")]
        preview: usize,
    },
}
