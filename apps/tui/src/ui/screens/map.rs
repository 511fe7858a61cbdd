use crate::app::App;
use crate::ui::loading_line;
use crate::ui::widgets::map_canvas::{render_live_map, tone_color};
use crate::ui::widgets::panels::{render_overlay_popup, render_shortcuts, render_status_line};
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use sharkwatch::map::LayerId;
use sharkwatch::service::Tone;

pub fn render_map_screen(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1), // Legend
            Constraint::Length(1), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area());

    render_live_map(app.map(), f, layout[0], loading_line(app));
    if let Some(popup) = app.map().open_popup() {
        render_overlay_popup(popup, f, layout[0].inner(Margin::new(1, 1)));
    }

    render_legend(app, f, layout[1]);
    render_status_line(app, f, layout[2]);
    render_shortcuts(f, layout[3]);
}

fn render_legend(app: &App, f: &mut Frame<'_>, area: Rect) {
    let map = app.map();
    let surface = map.surface();
    let layer_state = |layer: LayerId| {
        if surface.is_attached(layer) {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let spans = vec![
        Span::styled(" ● ", Style::default().fg(tone_color(Tone::Danger))),
        Span::raw("intensity ≥ 10  "),
        Span::styled("● ", Style::default().fg(tone_color(Tone::Warning))),
        Span::raw("≥ 5  "),
        Span::styled("● ", Style::default().fg(tone_color(Tone::Safe))),
        Span::raw("low    "),
        Span::styled(
            format!("{}: {} ", LayerId::Points.label(), map.layer(LayerId::Points).len()),
            layer_state(LayerId::Points),
        ),
        Span::styled(
            format!(
                "{}: {} ",
                LayerId::Hotspots.label(),
                map.layer(LayerId::Hotspots).marker_count()
            ),
            layer_state(LayerId::Hotspots),
        ),
        Span::styled(
            format!(" center {}", surface.center().display()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}
