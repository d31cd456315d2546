//! Kontor Share Recovery CLI
//!
//! This binary reconstructs a Shamir secret from a share document, showing:
//! - The declared `n`/`k` and per-share decode trace
//! - The points selected for interpolation
//! - Polynomial coefficients and the human-readable polynomial
//! - Verification of every share against the polynomial
//! - The recovered secret
//!
//! Run with: cargo run --release -- recover shares.json
//! Built-in example: cargo run --release -- example
//! Write a sample document: cargo run --release -- sample sample.json

use clap::{ArgAction, Parser, Subcommand};
use kontor_shamir::{
    api::{self, Reconstruction},
    config,
    polynomial::format_fixed,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, info_span, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the share recovery tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print the reconstruction report as JSON instead of the text report
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Increase output verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconstruct the secret from a share document
    Recover {
        /// Path to the share document
        path: PathBuf,
    },
    /// Reconstruct the secret from the built-in reference shares
    Example,
    /// Write the reference share document to a file
    Sample {
        /// Destination path
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Recover { path } => {
            let _span = info_span!("recover").entered();
            api::load_document(path).and_then(|text| api::reconstruct_document(&text))
        }
        Command::Example => {
            let _span = info_span!("example").entered();
            api::reconstruct_example()
        }
        Command::Sample { path } => {
            write_sample(path);
            return;
        }
    };

    let reconstruction = match result {
        Ok(r) => r,
        Err(e) => {
            error!("Error: {e}");
            if e.is_malformed_document() {
                error!("Run `sample <path>` to see a well-formed share document.");
            }
            std::process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&reconstruction.summary()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Error: failed to serialize report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        display_report(&reconstruction);
    }

    if !reconstruction.is_consistent() {
        std::process::exit(2);
    }
}

fn write_sample(path: &Path) {
    if let Err(e) = std::fs::write(path, api::sample_document()) {
        error!("Error: failed to write {}: {e}", path.display());
        std::process::exit(1);
    }
    info!("Sample share document '{}' created", path.display());
}

/// Display the reconstruction in the order the pipeline produced it
fn display_report(r: &Reconstruction) {
    info!("");
    info!("[1/4] Share Data");
    info!("  • Total shares (n) = {}", r.declared_total);
    info!("  • Threshold (k) = {}", r.threshold);
    for (i, d) in r.decoded_shares.iter().enumerate() {
        info!(
            "  • Point {}: x={}, value=\"{}\" (base {}) → y={}",
            i + 1,
            d.share.x,
            d.share.encoded_value,
            d.share.base,
            d.point.y
        );
    }
    info!("");

    info!("[2/4] Lagrange Interpolation");
    info!("  Using first {} points:", r.threshold);
    for p in &r.selected_points {
        info!("    ({}, {})", p.x, p.y);
    }
    info!("  Coefficients (P(x) = a0 + a1x + a2x^2 + ...):");
    for (i, c) in r.polynomial.coefficients().iter().enumerate() {
        info!(
            "    a{} = {} ({})",
            i,
            c,
            format_fixed(c, config::COEFFICIENT_DECIMALS)
        );
    }
    info!("  {}", r.polynomial);
    info!("");

    info!("[3/4] Verification");
    for check in &r.report.checks {
        info!(
            "  {} P({}) = {}, expected {}",
            if check.matches { "✓" } else { "✗" },
            check.x,
            format_fixed(&check.evaluated, config::DISPLAY_DECIMALS),
            check.expected
        );
    }
    info!("");

    info!("[4/4] Secret Recovery");
    match r.secret_integer() {
        Some(secret) => info!("  Secret P(0) = {secret}"),
        None => info!(
            "  Secret P(0) = {} (not an integer, nearest {})",
            r.secret(),
            r.secret_rounded()
        ),
    }
    if r.is_consistent() {
        info!("  ✓ All points verified successfully");
    } else {
        warn!("  ✗ Some points don't match the reconstructed polynomial");
        warn!("    This might indicate corrupted shares or an insufficient threshold");
    }
    info!("");
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info,kontor_shamir=info",
        1 => "debug,kontor_shamir=debug",
        _ => "kontor_shamir=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    use tracing_tree::HierarchicalLayer;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            HierarchicalLayer::new(2)
                .with_targets(false)
                .with_bracketed_fields(true),
        )
        .init();
}
