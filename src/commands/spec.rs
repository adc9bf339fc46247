use std::process::ExitCode;

use tracing::info;

use crate::cli::SpecArgs;
use crate::formatting::render_error;
use crate::spec_extract::{extract_spec, SpecOptions};

/// Run the spec extraction command.
pub fn run_extract_spec(args: SpecArgs) -> ExitCode {
    match extract_spec(&args.report, &SpecOptions::default()) {
        Ok(paths) => {
            info!(
                "Wrote {} and {}",
                paths.project.display(),
                paths.components.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => render_error(err),
    }
}
