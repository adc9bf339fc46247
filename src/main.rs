use std::process::ExitCode;

use site_analyzer::cli::{parse_args, CrawlArgs};
use site_analyzer::commands::run_crawl;
use site_analyzer::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let args: CrawlArgs = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_tracing(args.verbose);
    run_crawl(args).await
}
