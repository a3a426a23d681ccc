use crate::cli::args::{Cli, Commands};
use crate::credentials::DbCredentials;
use crate::error::{QualityError, Result};
use crate::models::{SiteClassification, SiteRecord};
use crate::processors::QualityChecker;
use crate::readers::{SiteCsvReader, SiteRepository};
use crate::utils::filename::{generate_default_report_filename, organization_name};
use crate::utils::progress::ProgressReporter;
use crate::writers::QualityCsvWriter;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Organizations { json } => {
            let credentials = DbCredentials::load(&cli.secrets)?;
            let repository = SiteRepository::connect(&credentials).await?;
            let organizations = repository.organizations().await?.to_vec();
            repository.close().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&organizations)?);
            } else {
                println!("{} organizations:", organizations.len());
                for organization in &organizations {
                    println!("  {}", organization);
                }
            }
        }

        Commands::Report {
            organization,
            organization_id,
            output_file,
            preview,
        } => {
            let credentials = DbCredentials::load(&cli.secrets)?;

            let progress = ProgressReporter::new_spinner("Connecting to database...", false);
            let repository = SiteRepository::connect(&credentials).await?;

            // clap guarantees exactly one of the two is set
            let selected = match organization {
                Some(name) => repository.find_organization(&name).await?,
                None => {
                    let id = organization_id.unwrap_or_default();
                    repository.find_organization_by_id(&id).await?
                }
            };

            progress.set_message(&format!("Loading sites for {}...", selected.name));
            let sites = repository.fetch_sites(&selected.id).await?;
            progress.finish_with_message(&format!(
                "Loaded {} sites for {}",
                sites.len(),
                selected.name
            ));
            repository.close().await;

            if sites.is_empty() {
                warn!(organization = %selected.name, "no syncable sites with inverters");
            }

            let output_file = output_file.unwrap_or_else(|| {
                let name = sites
                    .first()
                    .and_then(|site| site.organization.as_deref())
                    .unwrap_or(&selected.name);
                generate_default_report_filename(name)
            });

            write_annotated(&sites, &output_file, preview)?;
        }

        Commands::Classify {
            input_file,
            output_file,
            preview,
        } => {
            println!("Classifying sites from {}", input_file.display());

            let sites = SiteCsvReader::new().read_sites(&input_file)?;
            if sites.is_empty() {
                warn!(path = %input_file.display(), "input contains no site records");
            }

            let output_file: PathBuf = output_file
                .unwrap_or_else(|| generate_default_report_filename(organization_name(&sites)));

            write_annotated(&sites, &output_file, preview)?;
        }
    }

    Ok(())
}

/// Classify, write the CSV and print the summary and a preview.
fn write_annotated(sites: &[SiteRecord], output_file: &Path, preview: usize) -> Result<()> {
    let checker = QualityChecker::new();
    let (classifications, report) = checker.check(sites);

    QualityCsvWriter::new().write_report(sites, &classifications, output_file)?;
    info!(path = %output_file.display(), rows = sites.len(), "report written");

    println!("\n{}", checker.generate_summary(&report));

    if preview > 0 && !sites.is_empty() {
        println!("Preview (first {} rows):", preview.min(sites.len()));
        print_preview(sites, &classifications, preview);
    }

    println!(
        "\nCSV ready for {} ({} rows): {}",
        organization_name(sites),
        sites.len(),
        output_file.display()
    );
    Ok(())
}

fn print_preview(sites: &[SiteRecord], classifications: &[SiteClassification], limit: usize) {
    for (i, (site, classification)) in sites.iter().zip(classifications).take(limit).enumerate() {
        println!(
            "{}. {} {}: {} | {} | {} | {}",
            i + 1,
            site.site_id,
            site.site_name.as_deref().unwrap_or("-"),
            classification.capacity.label(),
            classification.utility_id.label(),
            classification.verdict(),
            classification.issue_summary()
        );
    }
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_directive = if verbose { "site_quality=info,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| QualityError::Logging(e.to_string()))
}
