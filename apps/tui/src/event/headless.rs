use chrono::NaiveDate;
use color_eyre::Result;
use serde::Serialize;
use sharkwatch::config::AppConfig;
use sharkwatch::domain::{parse_date, DashboardSummary, DateRange, Hotspot, SharkAlert};
use sharkwatch::map::{load_points, PointsOutcome};
use sharkwatch::service::{DemoSource, MapService, TelemetrySource};
use tracing::{info, warn};

use crate::cli::CliArgs;

#[derive(Debug, Serialize)]
struct HeadlessReport {
    api_url: String,
    source: &'static str,
    summary_available: bool,
    from: Option<String>,
    to: Option<String>,
    total_sharks: u32,
    active_tags: u32,
    avg_sea_surface_temperature: f64,
    avg_oxygen_level: f64,
    point_count: usize,
    top_hotspots: Vec<Hotspot>,
    recent_alerts: Vec<SharkAlert>,
}

/// Resolves `--from`/`--to`, defaulting each missing bound to the configured window.
fn headless_range(args: &CliArgs, config: &AppConfig, today: NaiveDate) -> DateRange {
    let default = DateRange::last_days(today, config.range_days);
    DateRange::new(
        args.from.as_deref().map_or(default.from, parse_date),
        args.to.as_deref().map_or(default.to, parse_date),
    )
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(config: &AppConfig, args: &CliArgs, today: NaiveDate) -> Result<()> {
    let service = MapService::new(config.api_url.clone());

    if let Some(shark_id) = args.shark.as_deref() {
        let detail = service.shark_detail(shark_id).await?;
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    if args.latest_tags {
        let tags = service.latest_tags().await?;
        println!("{}", serde_json::to_string_pretty(&tags)?);
        return Ok(());
    }

    let range = headless_range(args, config, today);
    let report = build_report(&service, &DemoSource, service.base_url(), range).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

async fn build_report(
    source: &dyn TelemetrySource,
    fallback: &dyn TelemetrySource,
    api_url: &str,
    range: DateRange,
) -> HeadlessReport {
    let (point_source, point_count) = match load_points(source, fallback, &range).await {
        PointsOutcome::Loaded(points) => ("live", points.len()),
        PointsOutcome::Fallback { points, .. } => ("demo", points.len()),
    };
    info!(source = point_source, point_count, "loaded map points");

    // Only the points request falls back to demo data
    let (summary_available, summary) = match source.summary().await {
        Ok(summary) => (true, summary),
        Err(err) => {
            warn!(error = %err, "dashboard summary unavailable");
            (false, DashboardSummary::default())
        }
    };

    let (from, to) = range.query_bounds();
    HeadlessReport {
        api_url: api_url.to_string(),
        source: point_source,
        summary_available,
        from,
        to,
        total_sharks: summary.total_sharks,
        active_tags: summary.active_tags,
        avg_sea_surface_temperature: summary.avg_sea_surface_temperature,
        avg_oxygen_level: summary.avg_oxygen_level,
        point_count,
        top_hotspots: summary.top_hotspots,
        recent_alerts: summary.recent_alerts,
    }
}

fn print_report(report: &HeadlessReport) {
    let bound = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!("\nShark Watch Summary");
    println!("===================");
    println!("API: {}", report.api_url);
    println!("Data source: {}", report.source);
    println!("Range: {} to {}", bound(&report.from), bound(&report.to));
    println!("Tracked points: {}", report.point_count);

    if !report.summary_available {
        println!("\nSummary unavailable");
        return;
    }

    println!("Total sharks: {}", report.total_sharks);
    println!("Active tags: {}", report.active_tags);
    println!(
        "Avg sea surface temperature: {:.1}°C",
        report.avg_sea_surface_temperature
    );
    println!("Avg oxygen level: {:.1}", report.avg_oxygen_level);

    println!("\nTop Hotspots:");
    for hotspot in &report.top_hotspots {
        println!(
            "- ({:.2}, {:.2}) | {} sharks | intensity {}",
            hotspot.lat, hotspot.lng, hotspot.shark_count, hotspot.intensity
        );
    }

    println!("\nRecent Alerts:");
    for alert in &report.recent_alerts {
        println!(
            "- {} | {} | {}",
            alert.shark_id,
            alert.risk_level.as_str(),
            alert.alert_message
        );
    }
}
