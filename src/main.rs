use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod archive;
mod concat;
mod model;
mod profile;
mod render;
mod schema;
mod sizes;

pub type Result<T> = anyhow::Result<T>;

const INPUT_PREFIX: &str = "artifact-sizes-";
const OUTPUT_PREFIX: &str = "metrics-";

#[derive(Parser)]
#[command(name = "build-metrics")]
#[command(about = "Reduce compiler build telemetry to metric rows", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one build's artifact sizes (and profiles) into a metrics file.
    Convert {
        /// Raw artifact sizes, named `artifact-sizes-<build>.csv`.
        #[arg(long)]
        input_metrics: PathBuf,

        /// `.tar.gz` holding one profiling CSV per compilation unit.
        #[arg(long)]
        profile_archive: Option<PathBuf>,

        #[arg(long)]
        output_dir: PathBuf,

        /// Also report peak heap per pass.
        #[arg(long)]
        top_heap: bool,
    },

    /// Concatenate one month of metrics files into `metrics-YYYY-MM.csv`.
    Concat {
        #[arg(long)]
        year: u16,

        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: u8,

        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout only carries the final summary line.
    let filter = match cli.verbose {
        0 => EnvFilter::new("build_metrics=warn"),
        1 => EnvFilter::new("build_metrics=debug"),
        _ => EnvFilter::new("build_metrics=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Commands::Convert {
            input_metrics,
            profile_archive,
            output_dir,
            top_heap,
        } => {
            let out = run_convert(
                &input_metrics,
                profile_archive.as_deref(),
                &output_dir,
                render::EmitOptions { top_heap },
            )?;
            println!(
                "Successfully converted {} -> {}",
                input_metrics.display(),
                out.display()
            );
        }
        Commands::Concat {
            year,
            month,
            data_dir,
        } => {
            let (out, rows) = concat::concat_month(&data_dir, year, month)?;
            println!("Successfully wrote {} rows to {}", rows, out.display());
        }
    }

    Ok(())
}

/// Output path for an input named `artifact-sizes-<build>.csv`.
fn output_path(input: &Path, output_dir: &Path) -> Result<PathBuf> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("input path has no file name: {}", input.display()))?;
    match name.strip_prefix(INPUT_PREFIX) {
        Some(rest) if rest.ends_with(".csv") && rest.len() > ".csv".len() => {
            Ok(output_dir.join(format!("{}{}", OUTPUT_PREFIX, rest)))
        }
        _ => bail!(
            "input file '{}' must be named {}<build>.csv",
            input.display(),
            INPUT_PREFIX
        ),
    }
}

fn run_convert(
    input: &Path,
    profile_archive: Option<&Path>,
    output_dir: &Path,
    opts: render::EmitOptions,
) -> Result<PathBuf> {
    // 1) Validate inputs before touching anything.
    if !input.is_file() {
        bail!("input file '{}' not found", input.display());
    }
    if let Some(archive) = profile_archive.filter(|a| !a.is_file()) {
        bail!("profile archive '{}' not found", archive.display());
    }
    let out = output_path(input, output_dir)?;

    // 2) Artifact sizes; their metadata tags every profile row.
    let sizes::SizeRows { meta, mut rows } = sizes::convert_artifact_file(input)?;
    info!(rows = rows.len(), "sizes.converted");

    // 3) Profiles, one record per unit, folded in discovery order.
    if let Some(archive) = profile_archive {
        let extracted = archive::extract_profiles(archive)?;
        tracing::debug!(root = %extracted.root().display(), "profiles.root");
        let mut records = Vec::with_capacity(extracted.files.len());
        for file in &extracted.files {
            let profile_rows = profile::parse_profile_file(file)?;
            records.push(model::reduce_record(&profile_rows));
        }
        let combined = model::aggregate(records)?;
        rows.extend(render::profile_rows(&combined, &meta, opts));
    }

    // 4) Write.
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;
    render::write_rows_atomic(&out, &rows)?;
    info!(path = %out.display(), rows = rows.len(), "output.written");

    Ok(out)
}
