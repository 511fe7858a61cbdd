use clap::Parser;
use sharkwatch::config::{API_URL_VAR, DEBUG_VAR, LOG_FILE_VAR};
use sharkwatch::domain::FilterMode;

fn parse_filter(value: &str) -> Result<FilterMode, String> {
    FilterMode::parse(value).ok_or_else(|| format!("expected all, hotspots or tags, got {value:?}"))
}

#[derive(Debug, Parser)]
#[command(name = "sharkwatch", version, about = "Shark tracking telemetry dashboard")]
pub struct CliArgs {
    /// Base URL of the map data API
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Log file used while the terminal UI is running
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Initial map filter (all, hotspots or tags)
    #[arg(long, value_name = "MODE", value_parser = parse_filter)]
    pub filter: Option<FilterMode>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Start of the headless date range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// End of the headless date range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Print the detail record of one shark and exit
    #[arg(long, value_name = "ID")]
    pub shark: Option<String>,

    /// Print the latest tag records and exit
    #[arg(long = "latest-tags")]
    pub latest_tags: bool,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var(API_URL_VAR, url);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var(LOG_FILE_VAR, path);
        }
        if self.debug {
            std::env::set_var(DEBUG_VAR, "1");
        }
    }

    /// Modes that print and exit without starting the terminal UI.
    pub const fn is_headless(&self) -> bool {
        self.headless || self.json || self.latest_tags || self.shark.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_flags_imply_headless() {
        assert!(!CliArgs::parse_from(["sharkwatch"]).is_headless());
        assert!(CliArgs::parse_from(["sharkwatch", "--shark", "SFS-001"]).is_headless());
        assert!(CliArgs::parse_from(["sharkwatch", "--latest-tags"]).is_headless());
        assert!(CliArgs::parse_from(["sharkwatch", "--json"]).is_headless());
    }

    #[test]
    fn parses_range_and_url() {
        let args = CliArgs::parse_from([
            "sharkwatch",
            "--api-url",
            "http://tracker.local",
            "--from",
            "2024-06-01",
            "--to",
            "2024-06-30",
        ]);
        assert_eq!(args.api_url.as_deref(), Some("http://tracker.local"));
        assert_eq!(args.from.as_deref(), Some("2024-06-01"));
        assert_eq!(args.to.as_deref(), Some("2024-06-30"));
    }

    #[test]
    fn filter_flag_parses_mode_names() {
        let args = CliArgs::parse_from(["sharkwatch", "--filter", "Hotspots"]);
        assert_eq!(args.filter, Some(FilterMode::Hotspots));
        assert!(CliArgs::try_parse_from(["sharkwatch", "--filter", "sharks"]).is_err());
    }
}
