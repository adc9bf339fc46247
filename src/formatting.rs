//! Rendering of fatal errors on stderr.

use std::io::IsTerminal;
use std::process::ExitCode;

use crate::error::{AnalyzerError, ErrorPayload};

/// Prints `error: ...` and an optional `hint: ...` line, returning exit 1.
pub fn render_error(err: AnalyzerError) -> ExitCode {
    let colorize = std::io::stderr().is_terminal();
    eprintln!("{}", format_error(&err.to_payload(), colorize));
    ExitCode::from(1)
}

pub fn format_error(payload: &ErrorPayload, colorize: bool) -> String {
    let mut out = format!("{} {}", color("error:", "31", colorize), payload.message);
    if let Some(hint) = &payload.remediation {
        out.push('\n');
        out.push_str(&color("hint:", "33", colorize));
        out.push(' ');
        out.push_str(hint);
    }
    out
}

fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_error_has_message_and_hint() {
        let payload = AnalyzerError::NotFound("out/report.json".into()).to_payload();
        let text = format_error(&payload, false);
        assert_eq!(
            text,
            "error: File not found: out/report.json\nhint: Pass the path of an existing frontend_report_*.json file."
        );
    }

    #[test]
    fn colorized_labels() {
        let payload = AnalyzerError::Unknown("boom".into()).to_payload();
        assert!(format_error(&payload, true).starts_with("\x1b[31merror:\x1b[0m boom"));
    }
}
