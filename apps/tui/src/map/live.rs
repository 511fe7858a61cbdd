use crate::domain::{DashboardSummary, DateRange, FilterMode, Hotspot, MapPoint};
use crate::map::overlay::{
    hotspot_badge, hotspot_circle, point_circle, MarkerIcon, MarkerOverlay, Overlay, Popup,
};
use crate::map::surface::{LayerGroup, LayerId, MapSurface};
use crate::service::ServiceError;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Identifies one fetch cycle. Responses carry it back so stale ones can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub range: DateRange,
}

/// Result of the points request of a cycle.
#[derive(Debug)]
pub enum PointsOutcome {
    Loaded(Vec<MapPoint>),
    Fallback {
        error: ServiceError,
        points: Vec<MapPoint>,
        hotspots: Vec<Hotspot>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Pending,
    Live,
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    layer: LayerId,
    index: usize,
}

/// Live map state: the surface, both overlay layers and the current filter.
#[derive(Debug)]
pub struct LiveMap {
    surface: MapSurface,
    points: LayerGroup,
    hotspots: LayerGroup,
    filter: FilterMode,
    date_range: DateRange,
    default_icon: MarkerIcon,
    generation: u64,
    loading: bool,
    origin: DataOrigin,
    cycle_hotspots: Option<Vec<Hotspot>>,
    selection: Option<Selection>,
    last_error: Option<String>,
}

impl LiveMap {
    pub fn new(today: NaiveDate, range_days: i64, default_icon: MarkerIcon) -> Self {
        Self {
            surface: MapSurface::new(),
            points: LayerGroup::default(),
            hotspots: LayerGroup::default(),
            filter: FilterMode::All,
            date_range: DateRange::last_days(today, range_days),
            default_icon,
            generation: 0,
            loading: false,
            origin: DataOrigin::Pending,
            cycle_hotspots: None,
            selection: None,
            last_error: None,
        }
    }

    pub const fn surface(&self) -> &MapSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut MapSurface {
        &mut self.surface
    }

    pub const fn layer(&self, layer: LayerId) -> &LayerGroup {
        match layer {
            LayerId::Points => &self.points,
            LayerId::Hotspots => &self.hotspots,
        }
    }

    /// Layers currently attached to the surface, in draw order.
    pub fn visible_layers(&self) -> impl Iterator<Item = (LayerId, &LayerGroup)> {
        [LayerId::Points, LayerId::Hotspots]
            .into_iter()
            .filter(|layer| self.surface.is_attached(*layer))
            .map(|layer| (layer, self.layer(layer)))
    }

    pub const fn filter(&self) -> FilterMode {
        self.filter
    }

    pub const fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn origin(&self) -> DataOrigin {
        self.origin
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Starts a new fetch cycle. Returns `None` once the surface is torn down.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.surface.is_removed() {
            return None;
        }
        self.generation += 1;
        self.loading = true;
        self.cycle_hotspots = None;
        Some(FetchTicket {
            generation: self.generation,
            range: self.date_range,
        })
    }

    pub fn refresh(&mut self) -> Option<FetchTicket> {
        self.begin_fetch()
    }

    /// Stores the range and refetches only if both bounds are present.
    pub fn set_date_range(&mut self, range: DateRange) -> Option<FetchTicket> {
        self.date_range = range;
        if range.is_complete() {
            self.begin_fetch()
        } else {
            None
        }
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
        match filter {
            FilterMode::All => {
                self.surface.attach(LayerId::Points);
                self.surface.attach(LayerId::Hotspots);
            }
            FilterMode::Hotspots => {
                self.surface.detach(LayerId::Points);
                self.surface.attach(LayerId::Hotspots);
            }
            FilterMode::Tags => {
                self.surface.attach(LayerId::Points);
                self.surface.detach(LayerId::Hotspots);
            }
        }
        if self
            .selection
            .is_some_and(|s| !self.surface.is_attached(s.layer))
        {
            self.selection = None;
        }
    }

    const fn is_current(&self, generation: u64) -> bool {
        !self.surface.is_removed() && generation == self.generation
    }

    /// Applies the points response. Returns `false` when it was stale.
    pub fn apply_points(&mut self, generation: u64, outcome: PointsOutcome) -> bool {
        if !self.is_current(generation) {
            debug!(generation, current = self.generation, "dropping stale points response");
            return false;
        }

        self.loading = false;
        self.clear_layers();

        match outcome {
            PointsOutcome::Loaded(points) => {
                self.origin = DataOrigin::Live;
                self.last_error = None;
                self.draw_points(&points);
            }
            PointsOutcome::Fallback {
                error,
                points,
                hotspots,
            } => {
                debug!(generation, "showing demo data");
                self.origin = DataOrigin::Demo;
                self.last_error = Some(error.to_string());
                self.draw_points(&points);
                self.draw_hotspots(&hotspots);
            }
        }

        if let Some(hotspots) = self.cycle_hotspots.take() {
            self.draw_hotspots(&hotspots);
            self.cycle_hotspots = Some(hotspots);
        }

        true
    }

    /// Applies the summary response. Failures draw nothing.
    pub fn apply_summary(
        &mut self,
        generation: u64,
        result: Result<DashboardSummary, ServiceError>,
    ) -> bool {
        if !self.is_current(generation) {
            debug!(generation, current = self.generation, "dropping stale summary response");
            return false;
        }

        match result {
            Ok(summary) => {
                self.draw_hotspots(&summary.top_hotspots);
                self.cycle_hotspots = Some(summary.top_hotspots);
            }
            Err(error) => {
                warn!(%error, "error loading hotspots");
            }
        }
        true
    }

    fn clear_layers(&mut self) {
        self.points.clear();
        self.hotspots.clear();
        self.selection = None;
    }

    fn draw_points(&mut self, points: &[MapPoint]) {
        for point in points {
            self.points.add(Overlay::Circle(point_circle(point)));
        }
    }

    fn draw_hotspots(&mut self, hotspots: &[Hotspot]) {
        for hotspot in hotspots {
            self.hotspots.add(Overlay::Circle(hotspot_circle(hotspot)));
            self.hotspots
                .add(Overlay::Marker(hotspot_badge(hotspot)));
        }
    }

    fn popup_targets(&self) -> Vec<Selection> {
        self.visible_layers()
            .flat_map(|(layer, group)| {
                group
                    .iter()
                    .enumerate()
                    .filter(|(_, overlay)| overlay.popup().is_some())
                    .map(move |(index, _)| Selection { layer, index })
            })
            .collect()
    }

    fn step_selection(&mut self, forward: bool) {
        let targets = self.popup_targets();
        if targets.is_empty() {
            self.selection = None;
            return;
        }
        let position = self
            .selection
            .and_then(|current| targets.iter().position(|t| *t == current));
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => targets.len() - 1,
            (Some(i), true) => (i + 1) % targets.len(),
            (Some(i), false) => (i + targets.len() - 1) % targets.len(),
        };
        self.selection = Some(targets[next]);
    }

    pub fn select_next(&mut self) {
        self.step_selection(true);
    }

    pub fn select_prev(&mut self) {
        self.step_selection(false);
    }

    pub fn close_popup(&mut self) {
        self.selection = None;
    }

    pub fn selected_overlay(&self) -> Option<&Overlay> {
        let selection = self.selection?;
        self.layer(selection.layer).get(selection.index)
    }

    pub fn open_popup(&self) -> Option<&Popup> {
        self.selected_overlay().and_then(Overlay::popup)
    }

    /// Pointer drawn over the selected overlay, using the map's default icon.
    pub fn selection_marker(&self) -> Option<MarkerOverlay> {
        self.selected_overlay()
            .map(|overlay| MarkerOverlay::new(overlay.anchor(), &self.default_icon))
    }

    /// Releases the surface; any response arriving later is ignored.
    pub fn teardown(&mut self) {
        self.clear_layers();
        self.cycle_hotspots = None;
        self.loading = false;
        self.surface.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::overlay::LatLng;
    use crate::service::DemoSource;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn map() -> LiveMap {
        LiveMap::new(today(), 30, MarkerIcon::default())
    }

    fn summary(hotspots: Vec<Hotspot>) -> DashboardSummary {
        DashboardSummary {
            total_sharks: 1,
            active_tags: 1,
            avg_sea_surface_temperature: 25.0,
            avg_oxygen_level: 6.0,
            top_hotspots: hotspots,
            recent_alerts: Vec::new(),
        }
    }

    fn failure() -> ServiceError {
        ServiceError::Unavailable("connection refused".to_string())
    }

    #[test]
    fn starts_with_default_range_and_both_layers() {
        let map = map();
        assert_eq!(map.date_range(), DateRange::default_for(today()));
        assert!(map.surface().is_attached(LayerId::Points));
        assert!(map.surface().is_attached(LayerId::Hotspots));
        assert!(!map.is_loading());
    }

    #[test]
    fn filter_all_twice_attaches_each_layer_once() {
        let mut map = map();
        map.set_filter(FilterMode::All);
        map.set_filter(FilterMode::All);
        assert_eq!(map.surface().attached_count(LayerId::Points), 1);
        assert_eq!(map.surface().attached_count(LayerId::Hotspots), 1);
    }

    #[test]
    fn hotspots_then_tags_leaves_only_tags() {
        let mut map = map();
        map.set_filter(FilterMode::Hotspots);
        assert!(!map.surface().is_attached(LayerId::Points));
        assert!(map.surface().is_attached(LayerId::Hotspots));

        map.set_filter(FilterMode::Tags);
        assert_eq!(map.surface().attached_count(LayerId::Points), 1);
        assert_eq!(map.surface().attached_count(LayerId::Hotspots), 0);
        assert_eq!(map.filter(), FilterMode::Tags);
    }

    #[test]
    fn filter_change_does_not_start_a_cycle() {
        let mut map = map();
        let before = map.generation();
        map.set_filter(FilterMode::Hotspots);
        assert_eq!(map.generation(), before);
        assert!(!map.is_loading());
    }

    #[test]
    fn loaded_points_replace_layers() {
        let mut map = map();
        let ticket = map.begin_fetch().unwrap();
        assert!(map.is_loading());

        let points = DemoSource::demo_points();
        assert!(map.apply_points(ticket.generation, PointsOutcome::Loaded(points[..2].to_vec())));
        assert_eq!(map.layer(LayerId::Points).len(), 2);
        assert_eq!(map.origin(), DataOrigin::Live);
        assert!(!map.is_loading());

        let ticket = map.refresh().unwrap();
        map.apply_points(ticket.generation, PointsOutcome::Loaded(points));
        assert_eq!(map.layer(LayerId::Points).len(), 5);
    }

    #[test]
    fn points_failure_renders_demo_dataset() {
        let mut map = map();
        let ticket = map.begin_fetch().unwrap();
        map.apply_points(
            ticket.generation,
            PointsOutcome::Fallback {
                error: failure(),
                points: DemoSource::demo_points(),
                hotspots: DemoSource::demo_hotspots(),
            },
        );

        assert_eq!(map.layer(LayerId::Points).circle_count(), 5);
        assert_eq!(map.layer(LayerId::Hotspots).circle_count(), 2);
        assert_eq!(map.layer(LayerId::Hotspots).marker_count(), 2);
        assert_eq!(map.origin(), DataOrigin::Demo);
        assert!(map.last_error().is_some());
    }

    #[test]
    fn repeated_failures_do_not_accumulate_demo_data() {
        let mut map = map();
        for _ in 0..3 {
            let ticket = map.refresh().unwrap();
            map.apply_points(
                ticket.generation,
                PointsOutcome::Fallback {
                    error: failure(),
                    points: DemoSource::demo_points(),
                    hotspots: DemoSource::demo_hotspots(),
                },
            );
        }
        assert_eq!(map.layer(LayerId::Points).circle_count(), 5);
        assert_eq!(map.layer(LayerId::Hotspots).circle_count(), 2);
    }

    #[test]
    fn summary_failure_adds_nothing() {
        let mut map = map();
        let ticket = map.begin_fetch().unwrap();
        assert!(map.apply_summary(ticket.generation, Err(failure())));
        assert!(map.layer(LayerId::Hotspots).is_empty());
        assert!(map.layer(LayerId::Points).is_empty());
    }

    #[test]
    fn summary_before_points_survives_the_redraw() {
        let mut map = map();
        let ticket = map.begin_fetch().unwrap();
        map.apply_summary(ticket.generation, Ok(summary(DemoSource::demo_hotspots())));
        assert_eq!(map.layer(LayerId::Hotspots).circle_count(), 2);

        map.apply_points(
            ticket.generation,
            PointsOutcome::Loaded(DemoSource::demo_points()),
        );
        assert_eq!(map.layer(LayerId::Points).len(), 5);
        assert_eq!(map.layer(LayerId::Hotspots).circle_count(), 2);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut map = map();
        let old = map.begin_fetch().unwrap();
        let new = map.refresh().unwrap();
        assert!(new.generation > old.generation);

        assert!(!map.apply_points(
            old.generation,
            PointsOutcome::Loaded(DemoSource::demo_points())
        ));
        assert!(!map.apply_summary(old.generation, Ok(summary(DemoSource::demo_hotspots()))));
        assert!(map.layer(LayerId::Points).is_empty());
        assert!(map.layer(LayerId::Hotspots).is_empty());
        assert!(map.is_loading());

        assert!(map.apply_points(new.generation, PointsOutcome::Loaded(Vec::new())));
        assert!(!map.is_loading());
    }

    #[test]
    fn incomplete_range_does_not_refetch() {
        let mut map = map();
        let before = map.generation();
        let range = DateRange::new(None, Some(today()));
        assert!(map.set_date_range(range).is_none());
        assert_eq!(map.generation(), before);
        assert_eq!(map.date_range(), range);

        let ticket = map
            .set_date_range(DateRange::last_days(today(), 7))
            .unwrap();
        assert_eq!(ticket.generation, before + 1);
        assert_eq!(ticket.range.from, NaiveDate::from_ymd_opt(2024, 6, 23));
    }

    #[test]
    fn popup_navigation_follows_visible_layers() {
        let mut map = map();
        let ticket = map.begin_fetch().unwrap();
        map.apply_points(
            ticket.generation,
            PointsOutcome::Fallback {
                error: failure(),
                points: DemoSource::demo_points(),
                hotspots: DemoSource::demo_hotspots(),
            },
        );

        map.select_next();
        assert_eq!(map.open_popup().map(|p| p.title.as_str()), Some("Jaws"));
        map.select_prev();
        assert_eq!(map.open_popup().map(|p| p.title.as_str()), Some("Hotspot"));

        map.set_filter(FilterMode::Tags);
        assert!(map.open_popup().is_none());
        map.select_prev();
        assert_eq!(map.open_popup().map(|p| p.title.as_str()), Some("Bruce"));

        map.close_popup();
        assert!(map.open_popup().is_none());
    }

    #[test]
    fn selection_marker_uses_the_default_icon() {
        let mut map = map();
        assert!(map.selection_marker().is_none());

        let ticket = map.begin_fetch().unwrap();
        map.apply_points(ticket.generation, PointsOutcome::Loaded(DemoSource::demo_points()));
        map.select_next();

        let marker = map.selection_marker().unwrap();
        assert_eq!(marker.icon, MarkerIcon::default());
        assert_eq!(marker.position, LatLng::new(31.2, 29.9));
    }

    #[test]
    fn teardown_ignores_late_responses() {
        let mut map = map();
        let ticket = map.begin_fetch().unwrap();
        map.teardown();

        assert!(!map.apply_points(
            ticket.generation,
            PointsOutcome::Loaded(DemoSource::demo_points())
        ));
        assert!(map.layer(LayerId::Points).is_empty());
        assert!(map.surface().is_removed());
        assert!(map.begin_fetch().is_none());
    }
}
