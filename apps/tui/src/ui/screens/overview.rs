use crate::app::App;
use crate::ui::loading_line;
use crate::ui::widgets::map_canvas::{render_live_map, tone_color};
use crate::ui::widgets::panels::{render_overlay_popup, render_shortcuts, render_status_line};
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use sharkwatch::map::LayerId;
use sharkwatch::overview::{feeding_activity_class, status_class, ActivityClass, StatusClass};
use sharkwatch::service::Tone;

pub fn render_overview(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(5),  // Metric cards
            Constraint::Min(10),    // Map and breakdown
            Constraint::Length(10), // Tag table
            Constraint::Length(1),  // Status
            Constraint::Length(1),  // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title(app, f, layout[0]);
    render_metric_cards(app, f, layout[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(layout[2]);

    render_live_map(app.map(), f, middle[0], loading_line(app));
    if let Some(popup) = app.map().open_popup() {
        render_overlay_popup(popup, f, middle[0].inner(Margin::new(1, 1)));
    }
    render_tag_breakdown(app, f, middle[1]);

    render_tag_table(app, f, layout[3]);
    render_status_line(app, f, layout[4]);
    render_shortcuts(f, layout[5]);
}

fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Shark ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Watch",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  ·  {} tagged sharks on the map",
                app.map().layer(LayerId::Points).len()
            ),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .block(title_block)
    .alignment(Alignment::Left);

    f.render_widget(title, area);
}

fn metric_card<'a>(title: &'a str, value: String, detail: TextLine<'a>, color: Color) -> Paragraph<'a> {
    Paragraph::new(Text::from(vec![
        TextLine::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        detail,
    ]))
    .block(
        Block::default()
            .title(title)
            .title_style(Style::default().fg(color))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
    .alignment(Alignment::Center)
}

fn render_metric_cards(app: &App, f: &mut Frame<'_>, area: Rect) {
    let metrics = &app.metrics;
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let gray = Style::default().fg(Color::Gray);
    let accent = tone_color(Tone::Accent);

    f.render_widget(
        metric_card(
            " Sharks Tracked ",
            metrics.sharks_target.to_string(),
            TextLine::from(Span::styled("tracking target", gray)),
            accent,
        ),
        cards[0],
    );

    f.render_widget(
        metric_card(
            " Active Tags ",
            metrics.active_tags.to_string(),
            TextLine::from(vec![
                Span::styled(
                    format!("{} warning", metrics.warning_count),
                    Style::default().fg(tone_color(Tone::Warning)),
                ),
                Span::styled(" · ", gray),
                Span::styled(
                    format!("{} danger", metrics.danger_count),
                    Style::default().fg(tone_color(Tone::Danger)),
                ),
            ]),
            tone_color(Tone::Safe),
        ),
        cards[1],
    );

    let change_color = if metrics.depth_change < 0.0 {
        tone_color(Tone::Danger)
    } else {
        tone_color(Tone::Safe)
    };
    f.render_widget(
        metric_card(
            " Average Depth ",
            format!("{:.1}m", metrics.average_depth),
            TextLine::from(Span::styled(
                format!("{:+.1}% this week", metrics.depth_change),
                Style::default().fg(change_color),
            )),
            accent,
        ),
        cards[2],
    );

    f.render_widget(
        metric_card(
            " Pacific Coast ",
            metrics.pacific_coast_sharks.to_string(),
            TextLine::from(Span::styled("sharks near shore", gray)),
            tone_color(Tone::Warning),
        ),
        cards[3],
    );
}

fn render_tag_breakdown(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = [
        tone_color(Tone::Safe),
        tone_color(Tone::Warning),
        tone_color(Tone::Danger),
    ];
    let breakdown = app.tag_breakdown.bars();

    let bars: Vec<Bar<'_>> = breakdown
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            Bar::default()
                .value(*value)
                .label(TextLine::from(*label))
                .style(Style::default().fg(colors[index]))
                .value_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(format!(" Tags ({} total) ", app.tag_breakdown.total))
                .title_style(Style::default().fg(Color::Green))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(app.tag_breakdown.total)
        .bar_gap(2)
        .bar_width(9);

    f.render_widget(chart, area);
}

fn status_color(class: StatusClass) -> Color {
    match class {
        StatusClass::Active => tone_color(Tone::Safe),
        StatusClass::LowBattery => tone_color(Tone::Warning),
        StatusClass::SignalLost => tone_color(Tone::Danger),
    }
}

fn activity_style(class: ActivityClass) -> Style {
    match class {
        ActivityClass::Success => Style::default().fg(tone_color(Tone::Safe)),
        ActivityClass::Warning => Style::default().fg(tone_color(Tone::Warning)),
        ActivityClass::Danger => Style::default().fg(tone_color(Tone::Danger)),
        ActivityClass::Plain => Style::default(),
    }
}

fn render_tag_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Tag ID"),
        Cell::from("Shark"),
        Cell::from("Location"),
        Cell::from("Feeding"),
        Cell::from("Depth"),
        Cell::from("Battery"),
        Cell::from("Time"),
        Cell::from("Status"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = app.latest_tags.len();
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let scroll_offset = scroll_offset(total_rows, max_visible_rows, app.selected_tag_index);

    let rows = app
        .latest_tags
        .iter()
        .skip(scroll_offset)
        .take(max_visible_rows)
        .enumerate()
        .map(|(i, tag)| {
            let is_selected = i + scroll_offset == app.selected_tag_index;
            let style = if is_selected {
                Style::default()
                    .bg(Color::Rgb(0, 60, 90))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(tag.id),
                Cell::from(tag.shark_name),
                Cell::from(tag.location),
                Cell::from(tag.feeding_activity)
                    .style(activity_style(feeding_activity_class(tag.feeding_activity))),
                Cell::from(tag.depth),
                Cell::from(tag.battery),
                Cell::from(tag.time),
                Cell::from(format!("● {}", tag.status))
                    .style(Style::default().fg(status_color(status_class(tag.status)))),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(15),
        Constraint::Length(9),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(11),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Latest Tags ({} of {}) ",
                    (app.selected_tag_index + 1).min(total_rows),
                    total_rows
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(table, area);
}
