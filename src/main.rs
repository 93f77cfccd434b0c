//! # smstitch CLI
//!
//! Command-line interface for the smstitch library.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser;

use smstitch::cli::{Args, Command};
use smstitch::core::{reassemble, ReassemblyStats};
use smstitch::io::{read_log, write_rows};
use smstitch::report::{
    aggregate_report, find_patterns_in_log, read_report, write_aggregated_report,
    write_frequency_report, write_top_csv_parts, write_top_markdown,
};
use smstitch::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let total_start = Instant::now();
    let args = Args::parse();

    println!("📱 smstitch v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    match args.command {
        Command::Merge {
            ref input,
            ref output,
            window,
            ref columns,
        } => {
            println!("📂 Input:   {}", input);
            println!("💾 Output:  {}", output);
            println!("⏱️  Window:  {}s", window);
            println!();

            println!("⏳ Reading delivery log...");
            let read_start = Instant::now();
            let log = read_log(Path::new(input), &columns.to_spec())?;
            println!(
                "   Found {} records, skipped {} malformed rows ({:.2}s)",
                log.records.len(),
                log.skipped,
                read_start.elapsed().as_secs_f64()
            );

            println!("🧵 Stitching fragments...");
            let merge_start = Instant::now();
            let config = smstitch::config::ReassemblyConfig::new().with_time_window(window);
            let rows = reassemble(&log.records, &config, log.date_idx, log.msg_idx);
            let stats = ReassemblyStats::new(log.records.len(), rows.len());
            println!(
                "   Compressed to {} rows ({:.1}% reduction, {:.2}s)",
                stats.output_count,
                stats.compression_ratio(),
                merge_start.elapsed().as_secs_f64()
            );

            write_rows(Path::new(output), &log.header, &rows)?;
            println!();
            println!("✅ Done! {} rows written to {}", rows.len(), output);
        }

        Command::Patterns {
            ref input,
            ref output,
            min_len,
            ref columns,
        } => {
            println!("📂 Input:   {}", input);
            println!("💾 Output:  {}", output);
            println!();

            println!("🎭 Generalizing messages...");
            let rows = smstitch::report::frequency::frequency_report_from_log(
                Path::new(input),
                &columns.to_spec(),
                min_len,
            )?;
            write_frequency_report(Path::new(output), &rows)?;
            println!();
            println!("✅ Done! {} patterns written to {}", rows.len(), output);
        }

        Command::Aggregate {
            ref input,
            ref output,
        } => {
            println!("📂 Input:   {}", input);
            println!("💾 Output:  {}", output);
            println!();

            println!("🗜️  Aggregating report...");
            let rows = read_report(Path::new(input))?;
            let aggregated = aggregate_report(&rows);
            write_aggregated_report(Path::new(output), &aggregated)?;
            println!();
            println!(
                "✅ Done! {} rows folded into {} generalized patterns",
                rows.len(),
                aggregated.len()
            );
        }

        Command::Top {
            ref input,
            ref markdown,
            ref csv_prefix,
            top,
            max_rows,
            min_len,
            ref columns,
        } => {
            println!("📂 Input:     {}", input);
            println!("💾 Markdown:  {}", markdown);
            println!("💾 CSV parts: {}_*.csv", csv_prefix);
            println!();

            println!("🏆 Counting cleaned messages...");
            let report = smstitch::report::top::top_report_from_log(
                Path::new(input),
                &columns.to_spec(),
                min_len,
            )?;
            write_top_markdown(Path::new(markdown), &report, top)?;
            let parts = write_top_csv_parts(Path::new(csv_prefix), &report, max_rows)?;
            println!();
            println!("📊 Summary:");
            println!("   Unique cleaned:  {}", report.unique_before_grouping);
            println!("   After grouping:  {}", report.entries.len());
            println!("   CSV parts:       {}", parts.len());
            println!("✅ Done! Top {} written to {}", top, markdown);
        }

        Command::Find {
            ref input,
            ref patterns,
            samples,
            ref columns,
        } => {
            println!("📂 Input: {}", input);
            println!();
            let results =
                find_patterns_in_log(Path::new(input), &columns.to_spec(), patterns, samples)?;
            for result in results {
                println!("Pattern: '{}'", result.pattern);
                println!("Exact matches found: {}", result.count);
                if !result.samples.is_empty() {
                    println!("Sample messages:");
                    for sample in &result.samples {
                        println!(" - {}", sample);
                    }
                }
                println!("{}", "-".repeat(60));
            }
        }

        Command::Count { ref input } => {
            let count = count_rows(Path::new(input))?;
            println!("📦 Total messages: {}", count);
        }
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());
    Ok(())
}

/// Counts data rows (header excluded) in a tab-delimited file.
fn count_rows(path: &Path) -> Result<usize> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(BufReader::new(file));
    let mut count = 0usize;
    for result in reader.records() {
        result?;
        count += 1;
    }
    Ok(count)
}
