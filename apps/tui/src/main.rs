mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use sharkwatch::config::init_app_config;
use sharkwatch::logging;
use sharkwatch::service::{DemoSource, MapService};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;
    let today = chrono::Local::now().date_naive();

    // Fall back to headless output when stdout is piped
    if args.is_headless() || !is_terminal() {
        logging::init_stderr(config.debug);
        return event::run_headless(&config, &args, today).await;
    }

    if let Err(e) = logging::init_file(&config.log_file, config.debug) {
        // Not fatal; the UI still runs without a log file
        eprintln!(
            "Could not open log file {}: {e}",
            config.log_file.display()
        );
    }
    info!(api_url = %config.api_url, range_days = config.range_days, "starting sharkwatch");

    let source = Arc::new(MapService::new(config.api_url.clone()));
    let mut app = App::new(&config, today, source, Arc::new(DemoSource));
    if let Some(filter) = args.filter {
        info!(filter = filter.as_str(), "initial filter");
        app.apply_filter(filter);
    }

    let mut terminal = terminal::setup()?;
    app.mount();

    let result = event::run(&mut terminal, &mut app);

    app.teardown();
    terminal::cleanup(true, true);

    if let Err(e) = &result {
        warn!(error = %e, "event loop exited with an error");
    }
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
