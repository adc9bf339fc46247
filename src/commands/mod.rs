mod crawl;
mod spec;

pub use crawl::{load_config, parse_target, run_crawl};
pub use spec::run_extract_spec;
