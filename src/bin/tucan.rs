use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::*;
use tucan::*;

#[derive(Parser)]
#[command(name = "tucan", version, about = "Print the canonical string of molecular graphs")]
struct Cli {
    /// Molfiles (.mol) or DIMACS graphs (.col, .dimacs)
    inputs: Vec<PathBuf>,

    /// Canonical strings to read and canonicalize again
    #[arg(short, long = "string", value_name = "TUCAN")]
    strings: Vec<String>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Refine search-tree siblings on the current thread only
    #[arg(long)]
    no_parallel: bool,
}

fn read_molecule(path: &Path) -> Result<Molecule> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let molecule = match extension {
        "col" | "dimacs" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            graph_from_dimacs_text(&text)?
        }
        _ => graph_from_file(path)?,
    };
    Ok(molecule)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let config = CanonConfig {
        parallel: !cli.no_parallel,
    };

    for path in &cli.inputs {
        let molecule = read_molecule(path)
            .with_context(|| format!("Failed to load molecule from {}", path.display()))?;
        debug!("Loaded {} atoms from {}", molecule.atom_count(), path.display());
        let canonical = serialize_molecule(&canonicalize_with(&molecule, &config));
        println!("{}\t{}", path.display(), canonical);
    }

    for text in &cli.strings {
        let molecule =
            parse_tucan(text).with_context(|| format!("Failed to parse canonical string {text}"))?;
        let canonical = serialize_molecule(&canonicalize_with(&molecule, &config));
        if &canonical != text {
            info!("{} is not in canonical form", text);
        }
        println!("{}\t{}", text, canonical);
    }
    Ok(())
}
