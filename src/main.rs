use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;
use log::info;
use num_bigint::BigInt;
use share_recovery::dealer::{deal, DealParams};
use share_recovery::{recover, Selection, ShareDocument};

/// Recover the constant term of a polynomial from base-N encoded shares.
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// Sets the level of verbosity
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the constant term interpolated from a share file
    Recover {
        /// The share file, or `-` for stdin
        file: PathBuf,
        /// Only use the first `k` shares, with `k` taken from the `keys` record
        #[clap(long, conflicts_with = "first")]
        threshold: bool,
        /// Only use the first K shares
        #[clap(long, value_name = "K")]
        first: Option<usize>,
    },
    /// Split a secret into a share file
    Deal {
        /// The secret, in decimal
        #[clap(long)]
        secret: BigInt,
        /// Number of shares to issue
        #[clap(long, default_value_t = DealParams::default().shares)]
        shares: usize,
        /// Number of shares needed to recover the secret
        #[clap(long, default_value_t = DealParams::default().threshold)]
        threshold: usize,
        /// Bits per random coefficient
        #[clap(long, default_value_t = DealParams::default().coefficient_bits)]
        bits: usize,
        /// Base to render shares in (repeatable); all of 2..=36 by default
        #[clap(long = "base", value_name = "BASE")]
        bases: Vec<i64>,
        /// Where to write the share file; stdout if omitted
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Recover {
            file,
            threshold,
            first,
        } => {
            let document = load(&file)?;
            let constant = recover(&document, selection(threshold, first))
                .with_context(|| format!("Failed to recover the constant from {}", file.display()))?;
            println!("{constant}");
        }
        Command::Deal {
            secret,
            shares,
            threshold,
            bits,
            bases,
            output,
        } => {
            let params = DealParams {
                shares,
                threshold,
                coefficient_bits: bits,
                bases,
            };
            let document =
                deal(&secret, &params, &mut rand::rng()).context("Failed to deal shares")?;
            match output {
                Some(path) => {
                    document.export(&path)?;
                    info!("Wrote {} shares to {}", shares, path.display());
                }
                None => println!("{}", document.to_json()?),
            }
        }
    }
    Ok(())
}

/// `--first K` wins; clap already rejects it together with `--threshold`.
fn selection(threshold: bool, first: Option<usize>) -> Selection {
    match (threshold, first) {
        (_, Some(k)) => Selection::First(k),
        (true, None) => Selection::Metadata,
        (false, None) => Selection::All,
    }
}

fn load(file: &Path) -> Result<ShareDocument> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read shares from stdin")?;
        Ok(ShareDocument::from_json(&text)?)
    } else {
        Ok(ShareDocument::import(file)?)
    }
}
