use std::path::Path;
use std::process::ExitCode;

use tracing::{info, warn};
use url::Url;

use crate::browser::ChromePage;
use crate::cli::CrawlArgs;
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::formatting::render_error;
use crate::pipeline::analyze;
use crate::report::{file_stamp, write_report, ReportPaths};

/// Run the crawl command.
pub async fn run_crawl(args: CrawlArgs) -> ExitCode {
    match crawl(&args).await {
        Ok(paths) => {
            info!("Saved report: {}", paths.json.display());
            info!("Saved markdown summary: {}", paths.markdown.display());
            ExitCode::SUCCESS
        }
        Err(err) => render_error(err),
    }
}

async fn crawl(args: &CrawlArgs) -> Result<ReportPaths> {
    let url = parse_target(&args.url)?;
    let config = load_config(args.config.as_deref())?;
    std::fs::create_dir_all(&args.out_dir)?;

    info!("Opening {url}");
    let mut page = ChromePage::launch(&config).await?;
    let analyzed = analyze(&mut page, url.as_str(), &config, &args.out_dir).await;
    if let Err(err) = page.close().await {
        warn!("browser did not shut down cleanly: {err}");
    }
    let report = analyzed?;
    write_report(&report, &args.out_dir, &file_stamp())
}

/// Accepts absolute `http`/`https` URLs only.
pub fn parse_target(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AnalyzerError::UnsupportedScheme(other.to_string())),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let cfg = if let Some(p) = path {
        Config::from_file(p).map_err(|e| {
            AnalyzerError::Config(format!("Failed to read config {}: {}", p.display(), e))
        })?
    } else {
        Config::default()
    };

    cfg.validate()
        .map_err(|e| AnalyzerError::Config(format!("Invalid config: {}", e)))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn only_absolute_web_urls_are_accepted() {
        assert!(parse_target("https://example.com/shop").is_ok());
        assert!(parse_target("http://localhost:8080").is_ok());
        assert!(matches!(
            parse_target("example.com"),
            Err(AnalyzerError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_target("file:///etc/hosts"),
            Err(AnalyzerError::UnsupportedScheme(s)) if s == "file"
        ));
    }

    #[test]
    fn config_is_optional_and_validated() {
        assert_eq!(load_config(None).unwrap(), Config::default());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "viewports = []\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(ref m) if m.starts_with("Invalid config")));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(load_config(Some(&missing)), Err(AnalyzerError::Config(_))));
    }
}
