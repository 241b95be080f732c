use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use skilldb_core::{Candidate, Database, MemoryCache};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "skilldb")]
#[command(about = "Match candidates to skill sets from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load candidates from a JSON/JSONL file and search them for a skill set
    Search {
        /// Input candidates file (JSON array or JSONL, one candidate per line)
        #[arg(long)]
        candidates: String,
        /// Seed for the tie-break draw (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Skills to match against
        skills: Vec<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { candidates, seed, skills } => search(&candidates, seed, &skills),
    }
}

fn search(path: &str, seed: Option<u64>, skills: &[String]) -> Result<()> {
    let candidates = load_candidates(Path::new(path))?;
    tracing::info!(num_candidates = candidates.len(), "loaded candidates");

    let mut db = match seed {
        Some(seed) => Database::with_cache_and_rng(
            MemoryCache::new(),
            Box::new(StdRng::seed_from_u64(seed)),
        ),
        None => Database::new(),
    };
    db.add(candidates);

    match db.search(skills) {
        Some(candidate) => println!("{}", serde_json::to_string_pretty(candidate)?),
        None => bail!("no candidate matches any of {skills:?}"),
    }
    Ok(())
}

fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let f = File::open(path)?;
    let reader = BufReader::new(f);
    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut candidates = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            candidates.push(serde_json::from_str(&line)?);
        }
        Ok(candidates)
    } else {
        Ok(serde_json::from_reader(reader)?)
    }
}
