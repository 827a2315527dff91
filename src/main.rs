//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::fs;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chatlens::ChatlensError;
use chatlens::cli::Args;
use chatlens::config::AnalysisConfig;
use chatlens::core::analysis::ChatReport;
use chatlens::core::{FilterConfig, OutputConfig, apply_filters};
use chatlens::format::write_to_format;
use chatlens::parser::{ChatLogParser, ParseOutcome, decode};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_directive()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run() -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    let format = args.resolved_format()?;
    let output_path = args.output_path(format);
    let analysis = AnalysisConfig::default();

    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", format);

    let mut filter_config = if args.keep_assistant {
        FilterConfig::new()
    } else {
        FilterConfig::for_analysis(&analysis)
    };

    if let Some(ref after) = args.after {
        filter_config = filter_config.with_date_from(after)?;
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        filter_config = filter_config.with_date_to(before)?;
        println!("📅 Before:  {}", before);
    }
    if let Some(ref from) = args.from {
        filter_config = filter_config.with_author(from.clone());
        println!("👤 From:    {}", from);
    }
    if args.text_only {
        filter_config = filter_config.text_only();
        println!("📝 Text only");
    }
    println!();

    // Step 1: Parse
    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let bytes = fs::read(&args.input)?;
    let text = decode(&bytes, args.input.display().to_string())?;
    let ParseOutcome { records, stats } = ChatLogParser::new().parse_with_stats(text);
    let parsed_count = records.len();
    println!(
        "   Found {} messages ({:.2}s)",
        parsed_count,
        parse_start.elapsed().as_secs_f64()
    );
    if stats.unresolved > 0 {
        warn!(
            unresolved = stats.unresolved,
            "timestamps matched no known format; kept without a date"
        );
        println!("   ⚠️  {} timestamps could not be resolved", stats.unresolved);
    }

    // Step 2: Filter
    println!("🔍 Filtering...");
    let records = apply_filters(records, &filter_config);
    println!("   {} messages kept", records.len());

    // Step 3: Write
    let mut output_config = OutputConfig::new();
    if args.raw_timestamps {
        output_config = output_config.with_raw_timestamps();
    }

    println!("💾 Writing {}...", format);
    let write_start = Instant::now();
    write_to_format(&records, &output_path, format, &output_config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    // Step 4: Analyze
    if args.stats || args.report.is_some() {
        let report = ChatReport::build(&records, &analysis);
        if args.stats {
            print_report(&report);
        }
        if let Some(ref path) = args.report {
            fs::write(path, serde_json::to_string_pretty(&report)?)?;
            println!("📈 Report saved to {}", path.display());
        }
    }

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());
    println!();
    println!("📊 Summary:");
    println!("   Lines:     {}", stats.lines);
    println!("   Parsed:    {} messages", parsed_count);
    println!("   Written:   {} messages", records.len());
    println!("   Dates:     {:.1}% resolved", stats.resolution_rate());
    println!("   Time:      {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn print_report(report: &ChatReport) {
    let summary = &report.summary;

    println!();
    println!("📈 Conversation statistics");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages:      {}", summary.total_messages);
    println!("   Participants:  {}", summary.participants);
    if let (Some(first), Some(last)) = (summary.first, summary.last) {
        println!("   Period:        {} → {}", first.date(), last.date());
    }
    println!("   Per day:       {}", summary.messages_per_day);

    if !report.authors.is_empty() {
        println!();
        println!("👥 Authors:");
        for author in &report.authors {
            println!(
                "   {:<24} {:>6}  {:>5.1}%  {}",
                author.author, author.messages, author.percentage, author.rating
            );
        }
    }

    if let Some(peak) = report.peak {
        println!();
        println!(
            "🔥 Busiest hour:  {} {:02}:00 ({} messages)",
            peak.weekday, peak.hour, peak.messages
        );
    }

    if !report.response_times.is_empty() {
        println!();
        println!("⏱️  Mean response time:");
        for rt in &report.response_times {
            println!("   {:<24} {:>6.1} min", rt.author, rt.mean_minutes);
        }
    }

    if !report.top_interactions.is_empty() {
        println!();
        println!("💬 Top interactions:");
        for interaction in &report.top_interactions {
            println!("   {:<40} {:>6}", interaction.to_string(), interaction.count);
        }
    }

    if !report.conversation_starters.is_empty() {
        println!();
        println!("🚀 Conversation starters:");
        for starter in &report.conversation_starters {
            println!("   {:<24} {:>6}", starter.author, starter.count);
        }
    }

    let media = &report.media;
    if media.total() > 0 {
        println!();
        println!("🖼️  Media:");
        println!(
            "   images {}  videos {}  gifs {}  stickers {}  voice {}  links {}  deleted {}",
            media.images, media.videos, media.gifs, media.stickers, media.voice, media.links, media.deleted
        );
    }
}
