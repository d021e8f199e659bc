use anyhow::{Context, Result};
use clap::Parser;
use hashguard::{bridge, HashOptions, HashResult};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Print the SHA-256, SHA-1 and MD5 digests of a file.
#[derive(Parser, Debug)]
#[command(name = "hashguard", version)]
struct Cli {
    /// File to hash
    path: PathBuf,

    /// Read size in KiB
    #[arg(long, env = "HASHGUARD_CHUNK_KIB", default_value_t = 128,
          value_parser = clap::value_parser!(u32).range(64..=1024))]
    chunk_size: u32,

    /// Emit a JSON object instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    path: &'a str,
    #[serde(flatten)]
    result: &'a HashResult,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let options = HashOptions::with_chunk_size(cli.chunk_size as usize * 1024);
    let invocation = bridge::spawn(cli.path.clone(), options);

    let outcome = tokio::select! {
        outcome = invocation.outcome() => outcome,
        _ = tokio::signal::ctrl_c() => {
            // Dropping the invocation cancels it.
            eprintln!("Interrupted");
            return Ok(ExitCode::from(130));
        }
    };

    let result = outcome
        .result
        .with_context(|| format!("could not hash {}", cli.path.display()))?;

    if cli.json {
        let path = cli.path.to_string_lossy();
        let report = JsonReport { path: &path, result: &result };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (algo, hex) in result.iter() {
            println!("{:<8} {}", algo.name(), hex);
        }
    }
    Ok(ExitCode::SUCCESS)
}
