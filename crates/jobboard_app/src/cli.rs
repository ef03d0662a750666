use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use engine_logging::LogDestination;
use jobboard_core::DEFAULT_PAGE_SIZE;
use jobboard_engine::{system_clock, ApiSettings, EngineConfig};

/// Browse and filter job listings from the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "jobboard", version)]
pub struct Args {
    /// Base URL of the job service.
    #[arg(
        long,
        env = "JOBBOARD_API_URL",
        default_value = "http://localhost:3000/api"
    )]
    pub api_url: String,

    /// Listings shown per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    pub page_size: usize,

    /// Starting criteria as a query string, e.g. "remote=Remote&easyApply=true".
    /// Overrides the saved session.
    #[arg(long)]
    pub query: Option<String>,

    /// Location sent to the job service when no location filter is set.
    #[arg(long)]
    pub region: Option<String>,

    /// Directory holding the saved session.
    #[arg(long, default_value = ".jobboard")]
    pub state_dir: PathBuf,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[arg(long, default_value = "jobboard.log")]
    pub log_file: PathBuf,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

fn parse_page_size(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(err) => Err(err.to_string()),
    }
}

impl Args {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            api: ApiSettings {
                base_url: self.api_url.clone(),
                request_timeout: Duration::from_secs(self.timeout.max(1)),
                default_region: self.region.clone(),
                ..ApiSettings::default()
            },
            clock: system_clock(),
        }
    }
}
