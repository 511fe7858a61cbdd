use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single telemetry fix rendered as a circle on the points layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shark_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shark_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Aggregated high-density region of shark activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
    pub shark_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharkAlert {
    pub shark_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
    pub prediction_type: String,
    pub alert_message: String,
    pub risk_level: RiskLevel,
}

/// Response envelope of the `/summary` endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_sharks: u32,
    pub active_tags: u32,
    pub avg_sea_surface_temperature: f64,
    pub avg_oxygen_level: f64,
    #[serde(default)]
    pub top_hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub recent_alerts: Vec<SharkAlert>,
}

/// Which overlay layers are visible on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Hotspots,
    Tags,
}

impl FilterMode {
    pub const ALL: [Self; 3] = [Self::All, Self::Hotspots, Self::Tags];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Hotspots => "hotspots",
            Self::Tags => "tags",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::All),
            1 => Some(Self::Hotspots),
            2 => Some(Self::Tags),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "hotspots" => Some(Self::Hotspots),
            "tags" => Some(Self::Tags),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Hotspots => "Hotspots",
            Self::Tags => "Tags",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Hotspots => 1,
            Self::Tags => 2,
        }
    }
}

pub const DEFAULT_RANGE_DAYS: i64 = 30;

const ISO_DATE: &str = "%Y-%m-%d";

/// Inclusive calendar range sent as `from`/`to` on the points request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// `days` days ending on `today`. Windows reaching past the calendar start at its first day.
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        let from = Duration::try_days(days)
            .and_then(|span| today.checked_sub_signed(span))
            .unwrap_or(NaiveDate::MIN);
        Self {
            from: Some(from),
            to: Some(today),
        }
    }

    pub fn default_for(today: NaiveDate) -> Self {
        Self::last_days(today, DEFAULT_RANGE_DAYS)
    }

    pub const fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    pub fn query_bounds(&self) -> (Option<String>, Option<String>) {
        (self.from.map(format_date), self.to.map(format_date))
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Blank or malformed input is treated as an absent bound.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_range_is_last_thirty_days() {
        let range = DateRange::default_for(date(2024, 3, 15));
        assert_eq!(range.to, Some(date(2024, 3, 15)));
        assert_eq!(range.from, Some(date(2024, 2, 14)));
        assert!(range.is_complete());
    }

    #[test]
    fn oversized_window_clamps_to_calendar_start() {
        let range = DateRange::last_days(date(2024, 3, 15), 100_000_000);
        assert_eq!(range.from, Some(NaiveDate::MIN));
        assert_eq!(range.to, Some(date(2024, 3, 15)));

        let range = DateRange::last_days(date(2024, 3, 15), i64::MAX);
        assert_eq!(range.from, Some(NaiveDate::MIN));
    }

    #[test]
    fn query_bounds_are_iso_dates() {
        let range = DateRange::new(Some(date(2024, 1, 5)), None);
        assert_eq!(range.query_bounds(), (Some("2024-01-05".to_string()), None));
        assert!(!range.is_complete());
    }

    #[test]
    fn parse_date_treats_garbage_as_absent() {
        assert_eq!(parse_date(" 2024-02-29 "), Some(date(2024, 2, 29)));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn summary_deserializes_camel_case_and_missing_lists() {
        let json = r#"{
            "totalSharks": 42,
            "activeTags": 13,
            "avgSeaSurfaceTemperature": 26.4,
            "avgOxygenLevel": 6.1,
            "topHotspots": [{"lat": 30.0, "lng": 32.0, "intensity": 15, "sharkCount": 12}]
        }"#;
        let summary: DashboardSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_sharks, 42);
        assert_eq!(summary.top_hotspots[0].shark_count, 12);
        assert!(summary.recent_alerts.is_empty());
    }

    #[test]
    fn alert_risk_level_is_lowercase() {
        let json = r#"{
            "sharkId": "SFS-001",
            "latitude": 31.2,
            "longitude": 29.9,
            "timestamp": "2024-03-01T10:00:00Z",
            "predictionType": "feeding",
            "alertMessage": "Feeding behaviour near shore",
            "riskLevel": "high"
        }"#;
        let alert: SharkAlert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.risk_level, RiskLevel::High);
        assert_eq!(alert.risk_level.as_str(), "high");
    }

    #[test]
    fn filter_mode_round_trips_through_index_and_name() {
        for mode in FilterMode::ALL {
            assert_eq!(FilterMode::from_index(mode.index()), Some(mode));
            assert_eq!(FilterMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(FilterMode::parse("nope"), None);
    }
}
