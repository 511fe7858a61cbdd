use crate::app::state::{App, RangeField};
use crate::ui::widgets::popup::{centered_box, centered_rect, corner_box, ClearWidget};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use sharkwatch::map::{DataOrigin, Popup};

/// Details for the overlay the user has tabbed to.
pub fn render_overlay_popup(popup: &Popup, f: &mut Frame<'_>, area: Rect) {
    let height = u16::try_from(popup.lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup_area = corner_box(42, height, area);
    f.render_widget(ClearWidget, popup_area);

    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default().fg(Color::White);
    let lines: Vec<TextLine<'_>> = popup
        .lines
        .iter()
        .map(|(label, value)| {
            TextLine::from(vec![
                Span::styled(format!("{label}: "), label_style),
                Span::styled(value.as_str(), value_style),
            ])
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ", popup.title))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), popup_area);
}

pub fn render_range_dialog(app: &App, f: &mut Frame<'_>) {
    let area = centered_box(40, 7, f.area());
    f.render_widget(ClearWidget, area);

    let editor = &app.range_editor;
    let cursor = if app.animation_counter.sin() > 0.0 { "_" } else { " " };
    let field_line = |label: &'static str, value: &str, field: RangeField| {
        let active = editor.field == field;
        let style = if active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        TextLine::from(vec![
            Span::styled(label, Style::default().fg(Color::Gray)),
            Span::styled(value.to_string(), style),
            Span::styled(if active { cursor } else { "" }, style),
        ])
    };

    let lines = vec![
        field_line("From: ", &editor.from, RangeField::From),
        field_line("To:   ", &editor.to, RangeField::To),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Tab switch · Enter apply · Esc cancel",
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::default()
        .title(" Date Range (YYYY-MM-DD) ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn key_line(key: &'static str, description: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key:<12}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(description),
    ])
}

fn help_lines() -> Vec<TextLine<'static>> {
    vec![
        TextLine::from(Span::styled(
            "Shark Watch",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Live telemetry for tagged sharks, with hotspot clusters."),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key_line("a / h / t", "Show all layers, hotspots only, tags only"),
        key_line("f", "Cycle the filter"),
        key_line("r", "Refresh map data"),
        key_line("d", "Edit the date range"),
        key_line("n / p", "Next or previous map popup"),
        key_line("Esc", "Close the open popup"),
        key_line("m", "Toggle full-screen map"),
        key_line("+ / -", "Zoom in or out (map screen)"),
        key_line("Arrows", "Pan (map screen)"),
        key_line("0", "Reset the view (map screen)"),
        key_line("Up / Down", "Scroll the tag table (overview)"),
        key_line("F1", "Toggle this help"),
        key_line("q", "Quit"),
    ]
}

pub fn render_help_popup(f: &mut Frame<'_>) {
    let popup_area = centered_rect(70, 80, f.area());
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(TextLine::from(" Press F1 or Esc to close ").alignment(Alignment::Center))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);
}

pub fn render_status_line(app: &App, f: &mut Frame<'_>, area: Rect) {
    let map = app.map();
    let (origin, origin_color) = match map.origin() {
        DataOrigin::Pending => ("waiting", Color::Gray),
        DataOrigin::Live => ("live", Color::Green),
        DataOrigin::Demo => ("demo", Color::Yellow),
    };

    let mut spans = vec![
        Span::styled(" Source: ", Style::default().fg(Color::Gray)),
        Span::styled(origin, Style::default().fg(origin_color)),
        Span::styled(
            format!(" · {} ", app.api_url),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if !app.status_message.is_empty() {
        let style = if map.last_error().is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        spans.push(Span::styled(app.status_message.clone(), style));
    }

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

pub fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let shortcut = |key: &'static str, label: &'static str| {
        [
            Span::styled(
                key,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(label, Style::default().fg(Color::Gray)),
        ]
    };

    let spans: Vec<Span<'static>> = [
        shortcut("a/h/t", " filter  "),
        shortcut("d", " dates  "),
        shortcut("r", " refresh  "),
        shortcut("n/p", " popups  "),
        shortcut("m", " map  "),
        shortcut("F1", " help  "),
        shortcut("q", " quit"),
    ]
    .into_iter()
    .flatten()
    .collect();

    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center),
        area,
    );
}
