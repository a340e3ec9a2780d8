use anyhow::Context;
use chrono::Duration;
use clap::Parser;
use log::LevelFilter;
use solverscope::discovery::{candidate_logs, DEFAULT_LOG};
use solverscope::estimate::DEFAULT_PUZZLE_WIDTHS;
use solverscope::stats::Statistics;
use solverscope::{AnalyzerConfig, AnalyzerError, ArtifactPaths, LogAnalyzer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solverscope", version, about = "Performance analysis for key-search solver logs")]
struct Cli {
    /// Solver log to analyze; common log names are tried if it is missing
    #[arg(long = "log", default_value = DEFAULT_LOG)]
    log: PathBuf,
    /// Prefix for generated files (<prefix>.json, <prefix>_performance.png, <prefix>_report.html)
    #[arg(long = "output", default_value = "analysis")]
    output: String,
    /// Render the performance chart
    #[arg(long = "graph", default_value_t = false)] graph: bool,
    /// Render the HTML report
    #[arg(long = "report", default_value_t = false)] report: bool,
    /// Puzzle bit-widths to estimate completion time for
    #[arg(long = "widths", value_delimiter = ',', default_values_t = DEFAULT_PUZZLE_WIDTHS.to_vec())]
    widths: Vec<u32>,
    /// Seconds between synthesized sample timestamps (at most one day)
    #[arg(long = "sample-interval", default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=86_400))]
    sample_interval: u32,
    #[arg(long = "verbose", short = 'v', default_value_t = false)] verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn print_statistics(analyzer: &LogAnalyzer, stats: &Statistics) {
    println!("\nGENERAL STATISTICS");
    println!("{}", "=".repeat(50));
    println!("{stats}");

    println!("\nTIME ESTIMATES (at {:.0} keys/s)", stats.mean_speed);
    println!("{}", "=".repeat(50));
    let estimates = analyzer.estimates(stats);
    if estimates.is_empty() {
        println!("mean speed is not positive; nothing to estimate");
    }
    for e in estimates {
        println!("{e}");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AnalyzerConfig {
        sample_interval: Duration::seconds(i64::from(cli.sample_interval)),
        puzzle_widths: cli.widths.clone(),
    };
    let mut analyzer = LogAnalyzer::new(config);

    println!("Key Search Solver - Performance Analyzer");
    println!("{}", "=".repeat(60));

    let candidates = candidate_logs(&cli.log);
    match analyzer.parse_first_available(&candidates) {
        Ok(path) => log::debug!("using log {}", path.display()),
        Err(AnalyzerError::NoLogFound { candidates }) => {
            eprintln!("No log file found. Searched:");
            for c in &candidates {
                eprintln!("   - {}", c.display());
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }

    let stats = analyzer.statistics();
    if let Some(s) = &stats {
        print_statistics(&analyzer, s);
    }

    let paths = ArtifactPaths::from_prefix(&cli.output);
    analyzer
        .export_results(&paths.json)
        .with_context(|| format!("exporting results to {}", paths.json.display()))?;
    let mut generated = vec![paths.json.clone()];

    if cli.graph {
        match analyzer.create_performance_graph(&paths.chart) {
            Ok(true) => generated.push(paths.chart.clone()),
            Ok(false) => {}
            Err(AnalyzerError::ChartingUnavailable) => {
                log::warn!("charting support not built in; chart not generated");
                log::warn!("rebuild with `--features charts` to enable it");
            }
            Err(e) => return Err(e).context("rendering performance chart"),
        }
    }

    if cli.report {
        analyzer
            .generate_report(&paths.report)
            .with_context(|| format!("writing report to {}", paths.report.display()))?;
        generated.push(paths.report.clone());
    }

    println!("\nAnalysis complete!");
    println!("Generated files:");
    for p in &generated {
        println!("   - {}", p.display());
    }
    Ok(())
}
