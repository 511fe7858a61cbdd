use crate::domain::{DashboardSummary, DateRange};
use crate::map::live::{FetchTicket, LiveMap, PointsOutcome};
use crate::service::{ServiceError, TelemetrySource};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug)]
pub enum FetchEvent {
    Points {
        generation: u64,
        outcome: PointsOutcome,
    },
    Summary {
        generation: u64,
        result: Result<DashboardSummary, ServiceError>,
    },
}

/// Requests the points, substituting the fallback source's data on failure.
pub async fn load_points(
    source: &dyn TelemetrySource,
    fallback: &dyn TelemetrySource,
    range: &DateRange,
) -> PointsOutcome {
    match source.points(range).await {
        Ok(points) => PointsOutcome::Loaded(points),
        Err(err) => {
            error!(error = %err, "error loading map data");
            let points = fallback.points(range).await.unwrap_or_default();
            let hotspots = fallback
                .summary()
                .await
                .map(|summary| summary.top_hotspots)
                .unwrap_or_default();
            PointsOutcome::Fallback {
                error: err,
                points,
                hotspots,
            }
        }
    }
}

/// Handles for the two tasks of one cycle.
#[derive(Debug, Default)]
pub struct FetchCycle {
    handles: Vec<JoinHandle<()>>,
}

impl FetchCycle {
    pub fn abort(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handles.iter().all(JoinHandle::is_finished)
    }
}

/// Spawns the points and summary requests as independent tasks.
pub fn spawn_cycle(
    ticket: FetchTicket,
    source: &Arc<dyn TelemetrySource>,
    fallback: &Arc<dyn TelemetrySource>,
    tx: &UnboundedSender<FetchEvent>,
) -> FetchCycle {
    let generation = ticket.generation;

    let points_task = {
        let source = Arc::clone(source);
        let fallback = Arc::clone(fallback);
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = load_points(source.as_ref(), fallback.as_ref(), &ticket.range).await;
            let _ = tx.send(FetchEvent::Points {
                generation,
                outcome,
            });
        })
    };

    let summary_task = {
        let source = Arc::clone(source);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = source.summary().await;
            let _ = tx.send(FetchEvent::Summary { generation, result });
        })
    };

    FetchCycle {
        handles: vec![points_task, summary_task],
    }
}

/// Owns a [`LiveMap`] and drives its fetch cycles.
///
/// Responses are queued on a channel and only touch the map when [`pump`] runs,
/// so every mutation happens on the caller's thread.
///
/// [`pump`]: MapController::pump
pub struct MapController {
    map: LiveMap,
    source: Arc<dyn TelemetrySource>,
    fallback: Arc<dyn TelemetrySource>,
    tx: UnboundedSender<FetchEvent>,
    rx: UnboundedReceiver<FetchEvent>,
    in_flight: Vec<FetchCycle>,
}

impl std::fmt::Debug for MapController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapController")
            .field("map", &self.map)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl MapController {
    pub fn new(
        map: LiveMap,
        source: Arc<dyn TelemetrySource>,
        fallback: Arc<dyn TelemetrySource>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            map,
            source,
            fallback,
            tx,
            rx,
            in_flight: Vec::new(),
        }
    }

    pub const fn map(&self) -> &LiveMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut LiveMap {
        &mut self.map
    }

    fn launch(&mut self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        info!(
            generation = ticket.generation,
            from = ?ticket.range.from,
            to = ?ticket.range.to,
            "loading map data"
        );
        self.in_flight.retain(|cycle| !cycle.is_finished());
        let cycle = spawn_cycle(ticket, &self.source, &self.fallback, &self.tx);
        self.in_flight.push(cycle);
    }

    /// Initial load after the surface is set up.
    pub fn mount(&mut self) {
        let ticket = self.map.begin_fetch();
        self.launch(ticket);
    }

    pub fn refresh(&mut self) {
        let ticket = self.map.refresh();
        self.launch(ticket);
    }

    pub fn set_date_range(&mut self, range: DateRange) -> bool {
        let ticket = self.map.set_date_range(range);
        let started = ticket.is_some();
        self.launch(ticket);
        started
    }

    fn apply(&mut self, event: FetchEvent) -> bool {
        match event {
            FetchEvent::Points {
                generation,
                outcome,
            } => self.map.apply_points(generation, outcome),
            FetchEvent::Summary { generation, result } => {
                self.map.apply_summary(generation, result)
            }
        }
    }

    /// Applies every queued response. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if self.apply(event) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Waits for the next response and applies it.
    pub async fn next_event(&mut self) -> Option<bool> {
        let event = self.rx.recv().await?;
        Some(self.apply(event))
    }

    pub fn teardown(&mut self) {
        for cycle in self.in_flight.drain(..) {
            cycle.abort();
        }
        self.map.teardown();
    }
}

impl Drop for MapController {
    fn drop(&mut self) {
        if !self.map.surface().is_removed() {
            self.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::overlay::MarkerIcon;
    use crate::map::surface::LayerId;
    use crate::map::DataOrigin;
    use crate::service::DemoSource;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use std::time::Duration;

    struct Offline;

    #[async_trait]
    impl TelemetrySource for Offline {
        async fn points(&self, _range: &DateRange) -> Result<Vec<crate::domain::MapPoint>, ServiceError> {
            Err(ServiceError::Unavailable("offline".to_string()))
        }

        async fn summary(&self) -> Result<DashboardSummary, ServiceError> {
            Err(ServiceError::Unavailable("offline".to_string()))
        }
    }

    /// Serves demo points, fails the summary and records requested ranges.
    #[derive(Default)]
    struct PointsOnly {
        ranges: Mutex<Vec<DateRange>>,
    }

    #[async_trait]
    impl TelemetrySource for PointsOnly {
        async fn points(&self, range: &DateRange) -> Result<Vec<crate::domain::MapPoint>, ServiceError> {
            if let Ok(mut ranges) = self.ranges.lock() {
                ranges.push(*range);
            }
            Ok(DemoSource::demo_points()[..3].to_vec())
        }

        async fn summary(&self) -> Result<DashboardSummary, ServiceError> {
            Err(ServiceError::Status {
                url: "http://test/summary".to_string(),
                status: 500,
            })
        }
    }

    /// Points take a while, so an older cycle can finish after a newer one.
    struct Slow(Duration);

    #[async_trait]
    impl TelemetrySource for Slow {
        async fn points(&self, _range: &DateRange) -> Result<Vec<crate::domain::MapPoint>, ServiceError> {
            tokio::time::sleep(self.0).await;
            Ok(DemoSource::demo_points())
        }

        async fn summary(&self) -> Result<DashboardSummary, ServiceError> {
            DemoSource.summary().await
        }
    }

    fn live_map() -> LiveMap {
        LiveMap::new(
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            30,
            MarkerIcon::default(),
        )
    }

    async fn settle(controller: &mut MapController, events: usize) {
        for _ in 0..events {
            controller.next_event().await;
        }
    }

    #[tokio::test]
    async fn offline_source_falls_back_to_demo_data() {
        let mut controller =
            MapController::new(live_map(), Arc::new(Offline), Arc::new(DemoSource));
        controller.mount();
        settle(&mut controller, 2).await;

        let map = controller.map();
        assert_eq!(map.origin(), DataOrigin::Demo);
        assert_eq!(map.layer(LayerId::Points).circle_count(), 5);
        assert_eq!(map.layer(LayerId::Hotspots).circle_count(), 2);
        assert!(!map.is_loading());
    }

    #[tokio::test]
    async fn summary_failure_leaves_points_untouched() {
        let source = Arc::new(PointsOnly::default());
        let mut controller = MapController::new(
            live_map(),
            Arc::clone(&source) as Arc<dyn TelemetrySource>,
            Arc::new(DemoSource),
        );
        controller.mount();
        settle(&mut controller, 2).await;

        let map = controller.map();
        assert_eq!(map.origin(), DataOrigin::Live);
        assert_eq!(map.layer(LayerId::Points).len(), 3);
        assert!(map.layer(LayerId::Hotspots).is_empty());

        let ranges = source.ranges.lock().unwrap();
        assert_eq!(ranges.as_slice(), &[map.date_range()]);
    }

    #[tokio::test]
    async fn newer_cycle_wins_over_slow_older_one() {
        let mut controller = MapController::new(
            live_map(),
            Arc::new(Slow(Duration::from_millis(50))),
            Arc::new(DemoSource),
        );
        controller.mount();
        controller.refresh();
        let latest = controller.map().generation();

        let mut applied = 0;
        for _ in 0..4 {
            if controller.next_event().await == Some(true) {
                applied += 1;
            }
        }

        assert_eq!(applied, 2);
        assert_eq!(controller.map().generation(), latest);
        assert_eq!(controller.map().layer(LayerId::Points).len(), 5);
        assert_eq!(controller.map().layer(LayerId::Hotspots).circle_count(), 2);
    }

    #[tokio::test]
    async fn incomplete_range_does_not_start_requests() {
        let source = Arc::new(PointsOnly::default());
        let mut controller = MapController::new(
            live_map(),
            Arc::clone(&source) as Arc<dyn TelemetrySource>,
            Arc::new(DemoSource),
        );
        assert!(!controller.set_date_range(DateRange::new(None, None)));
        tokio::task::yield_now().await;
        assert_eq!(controller.pump(), 0);
        assert!(source.ranges.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn teardown_discards_in_flight_responses() {
        let mut controller = MapController::new(
            live_map(),
            Arc::new(Slow(Duration::from_millis(20))),
            Arc::new(DemoSource),
        );
        controller.mount();
        controller.teardown();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(controller.pump(), 0);
        assert!(controller.map().surface().is_removed());
        assert!(controller.map().layer(LayerId::Points).is_empty());
    }
}
