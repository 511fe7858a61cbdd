use crate::domain::{DashboardSummary, DateRange, Hotspot, MapPoint};
use crate::service::client::MapService;
use crate::service::error::ServiceError;
use async_trait::async_trait;

/// Where the live map gets its data from.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    async fn points(&self, range: &DateRange) -> Result<Vec<MapPoint>, ServiceError>;

    async fn summary(&self) -> Result<DashboardSummary, ServiceError>;
}

#[async_trait]
impl TelemetrySource for MapService {
    async fn points(&self, range: &DateRange) -> Result<Vec<MapPoint>, ServiceError> {
        let (from, to) = range.query_bounds();
        self.all_map_data(from.as_deref(), to.as_deref()).await
    }

    async fn summary(&self) -> Result<DashboardSummary, ServiceError> {
        self.dashboard_summary().await
    }
}

/// Fixed demonstration dataset used when the points request fails.
#[derive(Debug, Clone, Default)]
pub struct DemoSource;

impl DemoSource {
    pub fn demo_points() -> Vec<MapPoint> {
        [
            (31.2, 29.9, 8.0, "Jaws", 27.3, 67.0),
            (30.5, 32.1, 5.0, "Chomper", 26.8, 45.0),
            (29.8, 34.5, 12.0, "Deep Blue", 28.1, 89.0),
            (28.3, 33.2, 3.0, "Nemo", 25.5, 34.0),
            (32.1, 31.5, 7.0, "Bruce", 27.9, 56.0),
        ]
        .into_iter()
        .map(|(lat, lng, intensity, name, temperature, depth)| MapPoint {
            lat,
            lng,
            intensity,
            shark_id: None,
            shark_name: Some(name.to_string()),
            temperature: Some(temperature),
            depth: Some(depth),
            timestamp: None,
        })
        .collect()
    }

    pub fn demo_hotspots() -> Vec<Hotspot> {
        vec![
            Hotspot {
                lat: 30.0,
                lng: 32.0,
                intensity: 15.0,
                shark_count: 12,
            },
            Hotspot {
                lat: 29.0,
                lng: 34.0,
                intensity: 10.0,
                shark_count: 8,
            },
        ]
    }
}

#[async_trait]
impl TelemetrySource for DemoSource {
    async fn points(&self, _range: &DateRange) -> Result<Vec<MapPoint>, ServiceError> {
        Ok(Self::demo_points())
    }

    async fn summary(&self) -> Result<DashboardSummary, ServiceError> {
        let points = Self::demo_points();
        let hotspots = Self::demo_hotspots();
        let count = u32::try_from(points.len()).unwrap_or(u32::MAX);
        #[allow(clippy::cast_precision_loss)]
        let avg_temperature =
            points.iter().filter_map(|p| p.temperature).sum::<f64>() / points.len() as f64;

        Ok(DashboardSummary {
            total_sharks: count,
            active_tags: count,
            avg_sea_surface_temperature: avg_temperature,
            avg_oxygen_level: 0.0,
            top_hotspots: hotspots,
            recent_alerts: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_source_serves_five_points_and_two_hotspots() {
        let source = DemoSource;
        let points = source.points(&DateRange::default()).await.unwrap();
        let summary = source.summary().await.unwrap();

        assert_eq!(points.len(), 5);
        assert_eq!(summary.top_hotspots.len(), 2);
        assert_eq!(summary.top_hotspots[0].shark_count, 12);
        assert!(points.iter().all(|p| p.shark_name.is_some()));
    }

    #[tokio::test]
    async fn http_source_sends_range_bounds() -> Result<(), Box<dyn std::error::Error>> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/all-map-data")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("from".into(), "2024-05-01".into()),
                mockito::Matcher::UrlEncoded("to".into(), "2024-05-31".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let range = DateRange::new(
            crate::domain::parse_date("2024-05-01"),
            crate::domain::parse_date("2024-05-31"),
        );
        let source: Box<dyn TelemetrySource> = Box::new(MapService::new(server.url()));
        let points = source.points(&range).await?;

        mock.assert_async().await;
        assert!(points.is_empty());
        Ok(())
    }
}
