use chrono::NaiveDate;
use sharkwatch::config::AppConfig;
use sharkwatch::domain::{format_date, parse_date, DateRange, FilterMode};
use sharkwatch::map::{DataOrigin, LiveMap, MapController, MarkerIcon};
use sharkwatch::overview::{latest_tags, OverviewMetrics, SharkTag, TagBreakdown};
use sharkwatch::service::TelemetrySource;
use std::sync::Arc;
use std::time::Instant;
use throbber_widgets_tui::ThrobberState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Overview,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Browsing,
    EditingRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    From,
    To,
}

/// Text buffers behind the date range dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEditor {
    pub field: RangeField,
    pub from: String,
    pub to: String,
}

impl RangeEditor {
    pub fn from_range(range: DateRange) -> Self {
        Self {
            field: RangeField::From,
            from: range.from.map(format_date).unwrap_or_default(),
            to: range.to.map(format_date).unwrap_or_default(),
        }
    }

    pub fn active_mut(&mut self) -> &mut String {
        match self.field {
            RangeField::From => &mut self.from,
            RangeField::To => &mut self.to,
        }
    }

    pub fn switch_field(&mut self) {
        self.field = match self.field {
            RangeField::From => RangeField::To,
            RangeField::To => RangeField::From,
        };
    }

    pub fn to_range(&self) -> DateRange {
        DateRange::new(parse_date(&self.from), parse_date(&self.to))
    }
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub input_state: InputState,
    pub range_editor: RangeEditor,
    pub controller: MapController,
    pub metrics: OverviewMetrics,
    pub tag_breakdown: TagBreakdown,
    pub latest_tags: Vec<SharkTag>,
    pub selected_tag_index: usize,
    pub show_help: bool,
    pub status_message: String,
    pub api_url: String,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub throbber_state: ThrobberState,
}

impl App {
    pub fn new(
        config: &AppConfig,
        today: NaiveDate,
        source: Arc<dyn TelemetrySource>,
        fallback: Arc<dyn TelemetrySource>,
    ) -> Self {
        let map = LiveMap::new(today, config.range_days, MarkerIcon::default());
        let range_editor = RangeEditor::from_range(map.date_range());

        Self {
            running: true,
            screen: AppScreen::Overview,
            input_state: InputState::Browsing,
            range_editor,
            controller: MapController::new(map, source, fallback),
            metrics: OverviewMetrics::default(),
            tag_breakdown: TagBreakdown::default(),
            latest_tags: latest_tags(),
            selected_tag_index: 0,
            show_help: false,
            status_message: String::new(),
            api_url: config.api_url.clone(),
            animation_counter: 0.0,
            last_frame: Instant::now(),
            throbber_state: ThrobberState::default(),
        }
    }

    pub const fn map(&self) -> &LiveMap {
        self.controller.map()
    }

    /// Issues the initial fetch cycle. Needs a running tokio runtime.
    pub fn mount(&mut self) {
        self.controller.mount();
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        if self.map().is_loading() {
            self.throbber_state.calc_next();
        }

        let before = self.fetch_status();
        if self.controller.pump() > 0 {
            self.sync_fetch_status(&before);
        }
    }

    fn fetch_status(&self) -> (DataOrigin, Option<String>) {
        let map = self.map();
        (map.origin(), map.last_error().map(str::to_string))
    }

    /// Rewrites the status line only when the data origin or fetch error changed.
    fn sync_fetch_status(&mut self, before: &(DataOrigin, Option<String>)) {
        if self.fetch_status() == *before {
            return;
        }
        self.status_message = match (self.map().origin(), self.map().last_error()) {
            (_, Some(error)) => format!("Showing demo data: {error}"),
            (DataOrigin::Live, None) => "Live data loaded".to_string(),
            _ => String::new(),
        };
    }

    pub fn apply_filter(&mut self, filter: FilterMode) {
        self.controller.map_mut().set_filter(filter);
        self.status_message = format!("Filter: {}", filter.label());
    }

    pub fn refresh(&mut self) {
        self.controller.refresh();
        self.status_message = "Refreshing...".to_string();
    }

    pub fn begin_range_edit(&mut self) {
        self.range_editor = RangeEditor::from_range(self.map().date_range());
        self.input_state = InputState::EditingRange;
    }

    pub fn commit_range_edit(&mut self) {
        let range = self.range_editor.to_range();
        self.input_state = InputState::Browsing;
        if self.controller.set_date_range(range) {
            self.status_message = "Date range applied".to_string();
        } else {
            self.status_message = "Both dates are required (YYYY-MM-DD)".to_string();
        }
    }

    pub fn cancel_range_edit(&mut self) {
        self.input_state = InputState::Browsing;
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            AppScreen::Overview => AppScreen::Map,
            AppScreen::Map => AppScreen::Overview,
        };
    }

    /// Releases the map and aborts outstanding requests.
    pub fn teardown(&mut self) {
        self.controller.teardown();
        self.running = false;
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use sharkwatch::map::PointsOutcome;
    use sharkwatch::service::{DemoSource, ServiceError};
    use sharkwatch::DashboardSummary;

    pub fn test_app() -> App {
        App::new(
            &AppConfig::default(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            Arc::new(DemoSource),
            Arc::new(DemoSource),
        )
    }

    #[test]
    fn range_editor_round_trips_current_range() {
        let app = test_app();
        assert_eq!(app.range_editor.from, "2024-05-31");
        assert_eq!(app.range_editor.to, "2024-06-30");
        assert_eq!(app.range_editor.to_range(), app.map().date_range());
    }

    #[test]
    fn committing_an_incomplete_range_keeps_the_generation() {
        let mut app = test_app();
        app.begin_range_edit();
        app.range_editor.from.clear();
        let before = app.map().generation();
        app.commit_range_edit();

        assert_eq!(app.input_state, InputState::Browsing);
        assert_eq!(app.map().generation(), before);
        assert_eq!(app.map().date_range().from, None);
    }

    #[tokio::test]
    async fn committing_a_complete_range_starts_a_cycle() {
        let mut app = test_app();
        app.begin_range_edit();
        app.range_editor.from = "2024-06-01".to_string();
        let before = app.map().generation();
        app.commit_range_edit();

        assert_eq!(app.map().generation(), before + 1);
        assert!(app.map().is_loading());
        app.teardown();
    }

    #[test]
    fn summary_events_keep_user_feedback() {
        let mut app = test_app();
        let ticket = app.controller.map_mut().begin_fetch().unwrap();
        app.status_message = "Filter: Tags".to_string();

        let before = app.fetch_status();
        let summary = DashboardSummary {
            top_hotspots: DemoSource::demo_hotspots(),
            ..DashboardSummary::default()
        };
        app.controller
            .map_mut()
            .apply_summary(ticket.generation, Ok(summary));
        app.sync_fetch_status(&before);
        assert_eq!(app.status_message, "Filter: Tags");

        let before = app.fetch_status();
        app.controller.map_mut().apply_points(
            ticket.generation,
            PointsOutcome::Fallback {
                error: ServiceError::Unavailable("offline".to_string()),
                points: DemoSource::demo_points(),
                hotspots: DemoSource::demo_hotspots(),
            },
        );
        app.sync_fetch_status(&before);
        assert!(app.status_message.starts_with("Showing demo data"));

        // A second identical failure leaves the message alone
        app.status_message = "Date range applied".to_string();
        let ticket = app.controller.map_mut().begin_fetch().unwrap();
        let before = app.fetch_status();
        app.controller.map_mut().apply_points(
            ticket.generation,
            PointsOutcome::Fallback {
                error: ServiceError::Unavailable("offline".to_string()),
                points: DemoSource::demo_points(),
                hotspots: DemoSource::demo_hotspots(),
            },
        );
        app.sync_fetch_status(&before);
        assert_eq!(app.status_message, "Date range applied");
    }

    #[test]
    fn screen_toggles() {
        let mut app = test_app();
        app.toggle_screen();
        assert_eq!(app.screen, AppScreen::Map);
        app.toggle_screen();
        assert_eq!(app.screen, AppScreen::Overview);
    }
}
