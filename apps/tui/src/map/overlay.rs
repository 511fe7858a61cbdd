use crate::domain::{Hotspot, MapPoint};
use crate::service::{circle_color, circle_radius, Tone};
use chrono::{DateTime, Local, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn display(self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<(&'static str, String)>,
}

impl Popup {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub stroke: Tone,
    pub fill: Tone,
    pub fill_opacity: f64,
    pub weight: u8,
    /// `[dash, gap]` in degrees of arc.
    pub dash: Option<[u16; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleOverlay {
    pub center: LatLng,
    pub radius_m: f64,
    pub style: CircleStyle,
    pub popup: Option<Popup>,
}

/// Icon configuration handed to every marker at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    pub glyph: String,
    pub tone: Tone,
    pub class_name: Option<&'static str>,
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            glyph: "▼".to_string(),
            tone: Tone::Accent,
            class_name: None,
        }
    }
}

impl MarkerIcon {
    /// Text badge variant used for hotspot shark counts.
    pub fn badge(label: impl Into<String>) -> Self {
        Self {
            glyph: label.into(),
            tone: Tone::Danger,
            class_name: Some("hotspot-marker"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOverlay {
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub popup: Option<Popup>,
}

impl MarkerOverlay {
    pub fn new(position: LatLng, icon: &MarkerIcon) -> Self {
        Self {
            position,
            icon: icon.clone(),
            popup: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Circle(CircleOverlay),
    Marker(MarkerOverlay),
}

impl Overlay {
    pub const fn popup(&self) -> Option<&Popup> {
        match self {
            Self::Circle(circle) => circle.popup.as_ref(),
            Self::Marker(marker) => marker.popup.as_ref(),
        }
    }

    pub const fn anchor(&self) -> LatLng {
        match self {
            Self::Circle(circle) => circle.center,
            Self::Marker(marker) => marker.position,
        }
    }
}

pub const HOTSPOT_RADIUS_FACTOR: f64 = 1000.0;

pub fn point_circle(point: &MapPoint) -> CircleOverlay {
    let tone = circle_color(point.intensity);
    CircleOverlay {
        center: LatLng::new(point.lat, point.lng),
        radius_m: circle_radius(point.intensity),
        style: CircleStyle {
            stroke: tone,
            fill: tone,
            fill_opacity: 0.3,
            weight: 2,
            dash: None,
        },
        popup: Some(point_popup(point)),
    }
}

pub fn point_popup(point: &MapPoint) -> Popup {
    let mut lines = vec![("Position", LatLng::new(point.lat, point.lng).display())];
    // Zero readings are treated as missing
    if let Some(temperature) = point.temperature.filter(|t| *t != 0.0) {
        lines.push(("Temperature", format!("{temperature}°C")));
    }
    if let Some(depth) = point.depth.filter(|d| *d != 0.0) {
        lines.push(("Depth", format!("{depth}m")));
    }
    if let Some(timestamp) = point.timestamp.as_deref() {
        lines.push(("Time", local_timestamp(timestamp)));
    }
    lines.push(("Intensity", point.intensity.to_string()));

    Popup {
        title: point
            .shark_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Shark".to_string()),
        lines,
    }
}

pub fn hotspot_circle(hotspot: &Hotspot) -> CircleOverlay {
    CircleOverlay {
        center: LatLng::new(hotspot.lat, hotspot.lng),
        radius_m: hotspot.intensity * HOTSPOT_RADIUS_FACTOR,
        style: CircleStyle {
            stroke: Tone::Danger,
            fill: Tone::Danger,
            fill_opacity: 0.2,
            weight: 3,
            dash: Some([10, 10]),
        },
        popup: Some(Popup {
            title: "Hotspot".to_string(),
            lines: vec![
                ("Shark Count", hotspot.shark_count.to_string()),
                ("Intensity", hotspot.intensity.to_string()),
                (
                    "Location",
                    LatLng::new(hotspot.lat, hotspot.lng).display(),
                ),
            ],
        }),
    }
}

pub fn hotspot_badge(hotspot: &Hotspot) -> MarkerOverlay {
    let icon = MarkerIcon::badge(hotspot.shark_count.to_string());
    MarkerOverlay::new(LatLng::new(hotspot.lat, hotspot.lng), &icon)
}

/// Renders a server timestamp in local time; unparseable values pass through.
pub fn local_timestamp(raw: &str) -> String {
    const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(LOCAL_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(LOCAL_FORMAT).to_string();
    }
    raw.to_string()
}
