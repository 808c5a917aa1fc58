use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use chebi_dataset_manager::catalog::VersionCatalog;
use chebi_dataset_manager::error::ChebiError;
use chebi_dataset_manager::{Dataset, DatasetSettings};

#[derive(Parser)]
#[command(name = "chebi-dm")]
#[command(about = "Build versioned ChEBI dataset releases from the EBI archive")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Download a ChEBI release into the downloads directory")]
    Build(BuildArgs),
    #[command(about = "List the ChEBI releases known to this build")]
    Versions,
}

#[derive(Args)]
struct BuildArgs {
    /// Release to build, or "all" to build every known release.
    #[arg(long = "version", value_name = "RELEASE")]
    release: String,

    /// Download only the manually curated three-star subset.
    #[arg(long)]
    only_three_stars: bool,

    /// Directory downloads land under (default: downloads).
    #[arg(long)]
    downloads_directory: Option<String>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(chebi) = report.downcast_ref::<ChebiError>() {
            return ExitCode::from(map_exit_code(chebi));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &ChebiError) -> u8 {
    match error {
        ChebiError::UnknownVersion { .. } | ChebiError::UnknownCategory { .. } => 2,
        ChebiError::DownloadHttp(_) | ChebiError::DownloadStatus { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Versions => run_versions(),
    }
}

fn run_build(args: BuildArgs) -> miette::Result<()> {
    let releases = if args.release == "all" {
        VersionCatalog::available_versions()
    } else {
        vec![args.release.clone()]
    };

    for release in &releases {
        let mut settings = DatasetSettings::new(release)
            .into_diagnostic()?
            .include_all()
            .set_verbose();
        if args.only_three_stars {
            settings = settings.only_three_stars();
        }
        if let Some(directory) = &args.downloads_directory {
            settings = settings.downloads_directory(directory.as_str());
        }

        let file_count = settings.included().len();
        let dataset = Dataset::build(&settings).into_diagnostic()?;
        println!(
            "built ChEBI {} ({} files) in {}",
            dataset.metadata().version,
            file_count,
            settings.version_directory(),
        );
    }

    Ok(())
}

fn run_versions() -> miette::Result<()> {
    for version in VersionCatalog::available_versions() {
        println!("{version}");
    }
    Ok(())
}
