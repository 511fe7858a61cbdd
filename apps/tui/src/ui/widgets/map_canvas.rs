use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Map as WorldMap, MapResolution, Painter, Points, Shape};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use sharkwatch::domain::format_date;
use sharkwatch::map::{CircleOverlay, LayerId, LiveMap, Overlay};
use sharkwatch::service::Tone;

const METERS_PER_DEGREE: f64 = 111_320.0;

pub const fn tone_color(tone: Tone) -> Color {
    let (r, g, b) = tone.rgb();
    Color::Rgb(r, g, b)
}

/// Circle measured in meters on the ground, drawn in lon/lat canvas space.
struct GeoCircle {
    x: f64,
    y: f64,
    radius_x: f64,
    radius_y: f64,
    color: Color,
    dash: Option<[u16; 2]>,
}

impl GeoCircle {
    /// `min_radius` keeps sub-cell circles visible at low zoom.
    fn from_overlay(circle: &CircleOverlay, min_radius: f64) -> Self {
        let radius_y = (circle.radius_m / METERS_PER_DEGREE).max(min_radius);
        let lat_scale = circle.center.lat.to_radians().cos().abs().max(0.01);
        let radius_x = (circle.radius_m / (METERS_PER_DEGREE * lat_scale)).max(min_radius);
        Self {
            x: circle.center.lng,
            y: circle.center.lat,
            radius_x,
            radius_y,
            color: tone_color(circle.style.stroke),
            dash: circle.style.dash,
        }
    }
}

impl Shape for GeoCircle {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        for angle in 0..360_u16 {
            if let Some([dash, gap]) = self.dash {
                let period = (dash + gap).max(1);
                if angle % period >= dash {
                    continue;
                }
            }
            let radians = f64::from(angle).to_radians();
            let x = self.radius_x.mul_add(radians.cos(), self.x);
            let y = self.radius_y.mul_add(radians.sin(), self.y);
            if let Some((px, py)) = painter.get_point(x, y) {
                painter.paint(px, py, self.color);
            }
        }
    }
}

fn map_title(map: &LiveMap, loading: Option<TextLine<'static>>) -> TextLine<'static> {
    let range = map.date_range();
    let fmt = |d: Option<chrono::NaiveDate>| d.map_or_else(|| "…".to_string(), format_date);

    let mut spans = vec![
        Span::styled(
            " Live Map ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}] ", map.filter().label()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("{} → {} ", fmt(range.from), fmt(range.to)),
            Style::default().fg(Color::Gray),
        ),
    ];
    if let Some(loading) = loading {
        spans.extend(loading.spans);
        spans.push(Span::raw(" "));
    }
    TextLine::from(spans)
}

/// Draws the base map and every overlay on attached layers.
pub fn render_live_map(
    map: &LiveMap,
    f: &mut Frame<'_>,
    area: Rect,
    loading: Option<TextLine<'static>>,
) {
    let surface = map.surface();
    let block = Block::default()
        .title(map_title(map, loading))
        .title_bottom(TextLine::from(format!(
            " {} · zoom {} ",
            surface.base_layer().attribution,
            surface.zoom()
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if surface.is_removed() {
        f.render_widget(block, area);
        return;
    }

    let (x_bounds, y_bounds) = surface.bounds();
    let inner_width = f64::from(area.width.saturating_sub(2).max(1));
    let degrees_per_cell = (x_bounds[1] - x_bounds[0]) / inner_width;
    let selected = map.selection_marker();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&WorldMap {
                resolution: MapResolution::High,
                color: Color::Rgb(70, 110, 140),
            });
            ctx.layer();

            for (layer, group) in map.visible_layers() {
                let min_radius = match layer {
                    LayerId::Points => degrees_per_cell * 0.5,
                    LayerId::Hotspots => degrees_per_cell * 1.5,
                };
                for overlay in group.iter() {
                    match overlay {
                        Overlay::Circle(circle) => {
                            ctx.draw(&GeoCircle::from_overlay(circle, min_radius));
                            ctx.draw(&Points {
                                coords: &[(circle.center.lng, circle.center.lat)],
                                color: tone_color(circle.style.fill),
                            });
                        }
                        Overlay::Marker(marker) => {
                            ctx.print(
                                marker.position.lng,
                                marker.position.lat,
                                Span::styled(
                                    marker.icon.glyph.clone(),
                                    Style::default()
                                        .fg(tone_color(marker.icon.tone))
                                        .add_modifier(Modifier::BOLD),
                                ),
                            );
                        }
                    }
                }
            }

            if let Some(marker) = &selected {
                ctx.layer();
                ctx.print(
                    marker.position.lng,
                    marker.position.lat,
                    Span::styled(
                        marker.icon.glyph.clone(),
                        Style::default()
                            .fg(tone_color(marker.icon.tone))
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}
