//! Command-line arguments for the two binaries.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Crawl a page and write a visual-language report.
#[derive(Parser, Debug)]
#[command(name = "site-analyzer", version, about)]
pub struct CrawlArgs {
    /// Absolute http(s) URL of the page to analyze
    pub url: String,

    /// Config file (TOML, or YAML by .yaml/.yml extension)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory for the report files and screenshots
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Debug-level logging (RUST_LOG overrides)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Derive project.json and components.json from a saved report.
#[derive(Parser, Debug)]
#[command(name = "extract-spec", version, about)]
pub struct SpecArgs {
    /// Path to a frontend_report_*.json file
    pub report: PathBuf,

    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Parses `std::env::args`. Usage errors are printed and mapped to exit 1;
/// `--help` and `--version` print and map to exit 0.
pub fn parse_args<T: Parser>() -> Result<T, ExitCode> {
    T::try_parse().map_err(|err| {
        let _ = err.print();
        if err.use_stderr() {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    })
}
