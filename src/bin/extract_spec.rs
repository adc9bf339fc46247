use std::process::ExitCode;

use site_analyzer::cli::{parse_args, SpecArgs};
use site_analyzer::commands::run_extract_spec;
use site_analyzer::logging::init_tracing;

fn main() -> ExitCode {
    let args: SpecArgs = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_tracing(args.verbose);
    run_extract_spec(args)
}
