use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use csv::Writer;
use rayon::prelude::*;
use tracing::*;
use tucan::*;

#[derive(Parser)]
#[command(
    name = "build-index",
    version,
    about = "Canonicalize a collection of molfiles into a CSV index"
)]
struct Cli {
    /// Molfiles, or directories whose .mol files are indexed
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Where to write the `name,tucan` index
    #[arg(short, long, default_value = "index.csv")]
    output: PathBuf,

    /// Exit with a failure status when two inputs share a canonical string
    #[arg(long)]
    fail_on_collision: bool,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Expand directories into the molfiles they contain, sorted by path.
fn collect_molfiles(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)
                .with_context(|| format!("Failed to list {}", input.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.extension().map_or(false, |e| e == "mol"))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn name_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let files = collect_molfiles(&cli.inputs)?;
    info!("Indexing {} molfiles", files.len());

    // sibling refinement stays sequential; the files are the unit of parallelism
    let config = CanonConfig { parallel: false };
    let results: Vec<(String, Result<String, TucanError>)> = files
        .par_iter()
        .map(|path| {
            let canonical = graph_from_file(path)
                .map(|molecule| serialize_molecule(&canonicalize_with(&molecule, &config)));
            (name_of(path), canonical)
        })
        .collect();

    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let mut wtr = Writer::from_writer(file);
    wtr.write_record(["name", "tucan"])?;

    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    let mut collisions = 0;
    let mut skipped = 0;
    for (name, canonical) in results {
        let canonical = match canonical {
            Ok(canonical) => canonical,
            Err(e) => {
                warn!("Skipping {}: {}", name, e);
                skipped += 1;
                continue;
            }
        };
        if let Some(previous) = seen.get(&canonical) {
            warn!(
                "Collision: {} and {} share canonical string {}",
                previous, name, canonical
            );
            collisions += 1;
        } else {
            seen.insert(canonical.clone(), name.clone());
        }
        wtr.write_record([name.as_str(), canonical.as_str()])?;
    }
    wtr.flush()?;
    info!(
        "Index of {} molecules written to {} ({} skipped, {} collisions)",
        seen.len(),
        cli.output.display(),
        skipped,
        collisions
    );

    if collisions > 0 && cli.fail_on_collision {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
