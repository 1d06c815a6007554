use aaa_curator::config::{self, CuratorConfig};
use aaa_curator::imaging::RustBackend;
use aaa_curator::{output, pipeline};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Shared flags for commands that select.
#[derive(clap::Args, Clone)]
struct SelectArgs {
    /// Print the selection without writing the manifest
    #[arg(long)]
    dry_run: bool,
}

#[derive(Parser)]
#[command(name = "aaa-curator")]
#[command(about = "Curate AAA-quality images into the asset manifest")]
#[command(long_about = "\
Curate AAA-quality images into the asset manifest

Measures every image in the site's image directory, then selects the ones
that pass the quality rules and writes them to the manifest.

Selection rules (either one):
  width >= 1920 and (contrast >= 25 or sharpness >= 50)
  contrast >= 80 and sharpness >= 200

Ranked by contrast + sharpness / 50, highest first.

Files (relative to --root, configurable in aaa-curator.toml):
  site/assets/images/                 # scanned for .png/.jpg/.jpeg
  output/vision-quality-report.csv    # written by 'report', read by 'select'
  site/assets/images/manifest.json    # 'aaa' and 'aaaCount' keys updated

Run 'aaa-curator gen-config' to generate a documented aaa-curator.toml.")]
#[command(version)]
struct Cli {
    /// Project root that configured paths are relative to
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: <root>/aaa-curator.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Measure every image and write the quality report
    Report,
    /// Select AAA images from the report and update the manifest
    Select(SelectArgs),
    /// Run the full pipeline: report → select
    Run(SelectArgs),
    /// Print a stock aaa-curator.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.root, cli.config.as_deref())?;

    match cli.command {
        Command::Report => report(&cli.root, &config)?,
        Command::Select(args) => select(&cli.root, &config, args.dry_run)?,
        Command::Run(args) => {
            println!("==> Stage 1: Measuring {}", config.paths.images);
            report(&cli.root, &config)?;
            println!("==> Stage 2: Selecting");
            select(&cli.root, &config, args.dry_run)?;
        }
        Command::GenConfig => {}
    }

    Ok(())
}

fn report(root: &Path, config: &CuratorConfig) -> Result<(), pipeline::PipelineError> {
    init_thread_pool(&config.processing);
    let outcome = pipeline::run_report(&RustBackend::new(), root, config)?;
    output::print_report_output(&outcome.report, &outcome.report_path);
    Ok(())
}

fn select(root: &Path, config: &CuratorConfig, dry_run: bool) -> Result<(), pipeline::PipelineError> {
    let outcome = pipeline::run_select(root, config, dry_run)?;
    output::print_select_output(
        &outcome.selection,
        outcome.report_len,
        outcome.manifest_path.as_deref(),
    );
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
