// Live map component for sharkwatch
// Surface, overlay layers, filter state and fetch cycles

pub mod fetch;
pub mod live;
pub mod overlay;
pub mod surface;

pub use fetch::{load_points, spawn_cycle, FetchCycle, FetchEvent, MapController};
pub use live::{DataOrigin, FetchTicket, LiveMap, PointsOutcome};
pub use overlay::{CircleOverlay, LatLng, MarkerIcon, MarkerOverlay, Overlay, Popup};
pub use surface::{LayerGroup, LayerId, MapSurface};
