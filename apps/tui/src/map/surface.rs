use crate::map::overlay::{LatLng, Overlay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerId {
    Points,
    Hotspots,
}

impl LayerId {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Points => "Tags",
            Self::Hotspots => "Hotspots",
        }
    }
}

/// A toggleable group of overlays.
#[derive(Debug, Clone, Default)]
pub struct LayerGroup {
    overlays: Vec<Overlay>,
}

impl LayerGroup {
    pub fn add(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn clear(&mut self) {
        self.overlays.clear();
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Overlay> {
        self.overlays.get(index)
    }

    pub fn circle_count(&self) -> usize {
        self.overlays
            .iter()
            .filter(|o| matches!(o, Overlay::Circle(_)))
            .count()
    }

    pub fn marker_count(&self) -> usize {
        self.overlays
            .iter()
            .filter(|o| matches!(o, Overlay::Marker(_)))
            .count()
    }
}

/// Tile source drawn beneath the overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseLayer {
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
}

impl BaseLayer {
    pub const BLUE_MARBLE: Self = Self {
        name: "BlueMarble_ShadedRelief",
        url: "https://gibs.earthdata.nasa.gov/wms/epsg4326/best/wms.cgi",
        attribution: "NASA Blue Marble",
    };
}

pub const INITIAL_CENTER: LatLng = LatLng {
    lat: 25.0,
    lng: 35.0,
};
pub const INITIAL_ZOOM: u8 = 4;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 12;

/// Map surface: view state plus the set of attached layers.
#[derive(Debug, Clone)]
pub struct MapSurface {
    center: LatLng,
    zoom: u8,
    base_layer: BaseLayer,
    attached: Vec<LayerId>,
    removed: bool,
}

impl Default for MapSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface {
    /// Both overlay layers start attached.
    pub fn new() -> Self {
        Self {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
            base_layer: BaseLayer::BLUE_MARBLE,
            attached: vec![LayerId::Points, LayerId::Hotspots],
            removed: false,
        }
    }

    pub const fn base_layer(&self) -> &BaseLayer {
        &self.base_layer
    }

    pub const fn center(&self) -> LatLng {
        self.center
    }

    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    pub const fn is_removed(&self) -> bool {
        self.removed
    }

    /// Attaching an already attached layer is a no-op.
    pub fn attach(&mut self, layer: LayerId) {
        if self.removed || self.attached.contains(&layer) {
            return;
        }
        self.attached.push(layer);
    }

    /// Detaching a detached layer is a no-op.
    pub fn detach(&mut self, layer: LayerId) {
        self.attached.retain(|l| *l != layer);
    }

    pub fn is_attached(&self, layer: LayerId) -> bool {
        self.attached.contains(&layer)
    }

    pub fn attached_count(&self, layer: LayerId) -> usize {
        self.attached.iter().filter(|l| **l == layer).count()
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    /// Pans by a fraction of the visible span.
    pub fn pan(&mut self, lat_steps: f64, lng_steps: f64) {
        let (lng_span, lat_span) = self.span();
        self.center.lat = lat_steps
            .mul_add(lat_span * 0.1, self.center.lat)
            .clamp(-90.0, 90.0);
        let lng = lng_steps.mul_add(lng_span * 0.1, self.center.lng);
        self.center.lng = (lng + 180.0).rem_euclid(360.0) - 180.0;
    }

    pub fn reset_view(&mut self) {
        self.center = INITIAL_CENTER;
        self.zoom = INITIAL_ZOOM;
    }

    /// Visible `(longitude, latitude)` span in degrees at the current zoom.
    pub fn span(&self) -> (f64, f64) {
        let lng_span = 360.0 / f64::from(1_u32 << u32::from(self.zoom.saturating_sub(2)));
        (lng_span.min(360.0), (lng_span / 2.0).min(180.0))
    }

    /// `(x_bounds, y_bounds)` in degrees; x is longitude, y is latitude.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let (lng_span, lat_span) = self.span();
        (
            [
                self.center.lng - lng_span / 2.0,
                self.center.lng + lng_span / 2.0,
            ],
            [
                self.center.lat - lat_span / 2.0,
                self.center.lat + lat_span / 2.0,
            ],
        )
    }

    /// Releases the surface. Layers are detached and can no longer be attached.
    pub fn remove(&mut self) {
        self.attached.clear();
        self.removed = true;
    }
}
