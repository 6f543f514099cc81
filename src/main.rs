//! # slackbook CLI
//!
//! Command-line interface for the slackbook library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use slackbook::ExportError;
use slackbook::cli::Args;
use slackbook::core::{ExportArchive, Exporter};
use slackbook::format::{ReportFormat, write_to_format};

fn main() {
    init_tracing();
    let args = <Args as ClapParser>::parse();

    let Some(export_dir) = args.export_dir.clone() else {
        eprintln!("❌ Error: The export data directory must be specified.");
        process::exit(1);
    };

    if let Err(e) = run(&args, &export_dir) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: `warn`).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

fn run(args: &Args, export_dir: &Path) -> Result<(), ExportError> {
    let total_start = Instant::now();
    let format: ReportFormat = args.format.into();
    let config = args.to_config();
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| format.default_output(export_dir));

    // Print header
    println!("📦 slackbook v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Export:    {}", export_dir.display());
    println!("💾 Output:    {}", output_path.display());
    println!("📄 Format:    {}", format);
    println!("😀 Reactions: {}", config.layout);
    println!();

    // Step 1: Load users and channels
    println!("⏳ Reading export...");
    let archive = ExportArchive::open(export_dir)?;
    println!(
        "   {} users, {} channels",
        archive.directory().len(),
        archive.channels().len()
    );

    // Step 2: Build every sheet in memory
    println!("🧵 Building sheets...");
    let build_start = Instant::now();
    let report = Exporter::new(config).export(&archive)?;
    println!(
        "   {} messages -> {} rows ({:.2}s)",
        report.stats.messages,
        report.stats.rows,
        build_start.elapsed().as_secs_f64()
    );

    // Step 3: Write output in selected format
    println!("💾 Writing {}...", format);
    let write_start = Instant::now();
    write_to_format(&report, &output_path, format)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Channels:  {}", report.stats.channels);
    println!("   Messages:  {}", report.stats.messages);
    println!("   Rows:      {}", report.stats.rows);
    if report.stats.unmatched_replies > 0 {
        println!("   ⚠️  Unmatched replies: {}", report.stats.unmatched_replies);
    }
    println!("   Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
