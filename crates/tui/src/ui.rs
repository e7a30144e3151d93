use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus};
use crate::theme;
use huemark_types::PALETTE_SIZE;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let constraints = [
        Constraint::Min(9),    // panels
        Constraint::Length(1), // hints
        Constraint::Length(6), // logs
    ];
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[0]);

    draw_palette(f, app, panels[0]);
    draw_bookmarks(f, app, panels[1]);
    draw_hints(f, chunks[1]);
    draw_logs(f, app, chunks[2]);

    if app.alert.message.is_some() {
        draw_alert_modal(f, app, f.area());
    }
}

fn draw_palette(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled("Palette", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style(app.focus == Focus::Palette));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::with_capacity(PALETTE_SIZE);
    for (i, color) in app.palette.palette.colors().iter().enumerate() {
        let (r, g, b) = color.rgb();
        let swatch = Span::styled("      ", Style::default().bg(Color::Rgb(r, g, b)));
        let marker = if app.focus == Focus::Palette && i == app.palette.selected {
            Span::styled("> ", theme::list_highlight_style())
        } else {
            Span::raw("  ")
        };
        let hex = Span::styled(format!(" {} ", color.as_str()), theme::text_style());
        let ack = match app.palette.copied {
            Some(ack) if ack.slot == i => {
                Span::styled("✓ copied", Style::default().fg(theme::ACCENT))
            }
            _ => Span::styled("⧉", theme::text_muted()),
        };
        lines.push(Line::from(vec![marker, swatch, hex, ack]));
    }

    let rows = Paragraph::new(lines);
    f.render_widget(rows, inner);
}

fn draw_bookmarks(f: &mut Frame, app: &mut App, area: Rect) {
    let splits = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    draw_input(f, "Name", &app.bookmarks.name_input, app.focus == Focus::Name, splits[0]);
    draw_input(f, "URL", &app.bookmarks.url_input, app.focus == Focus::Url, splits[1]);
    draw_bookmark_list(f, app, splits[2]);
}

fn draw_input(f: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let block = Block::default()
        .title(Span::styled(title.to_string(), theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style(focused));
    let inner = block.inner(area);
    let p = Paragraph::new(value).style(theme::text_style()).block(block);
    f.render_widget(p, area);
    if focused {
        let x = inner.x.saturating_add(value.chars().count() as u16);
        let y = inner.y;
        f.set_cursor_position((x, y));
    }
}

fn draw_bookmark_list(f: &mut Frame, app: &mut App, area: Rect) {
    let title = format!("Bookmarks ({})", app.bookmarks.entries.len());
    let block = Block::default()
        .title(Span::styled(title, theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style(app.focus == Focus::List));

    let items: Vec<ListItem> = app
        .bookmarks
        .entries
        .iter()
        .map(|b| {
            let line = Line::from(vec![
                Span::styled(b.name.clone(), theme::text_style()),
                Span::raw("  "),
                Span::styled(b.url.clone(), theme::text_muted()),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::list_highlight_style())
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.bookmarks.list_state);
}

fn draw_hints(f: &mut Frame, area: Rect) {
    let hints = Paragraph::new(Line::from(vec![
        Span::styled("Hints: ", theme::text_muted()),
        Span::styled("Tab", theme::title_style().fg(theme::ACCENT)),
        Span::styled(" focus  ", theme::text_muted()),
        Span::styled("g", theme::title_style().fg(theme::ACCENT)),
        Span::styled(" regenerate  ", theme::text_muted()),
        Span::styled("Enter", theme::title_style().fg(theme::ACCENT)),
        Span::styled(" copy/add  ", theme::text_muted()),
        Span::styled("d", theme::title_style().fg(theme::ACCENT)),
        Span::styled(" remove  ", theme::text_muted()),
        Span::styled("Esc", theme::title_style().fg(theme::ACCENT)),
        Span::styled(" quit", theme::text_muted()),
    ]))
    .style(theme::text_muted());
    f.render_widget(hints, area);
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled("Logs", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style(false));
    let inner_height = area.height.saturating_sub(2) as usize;
    let start = app.logs.entries.len().saturating_sub(inner_height);
    let lines: Vec<Line> = app.logs.entries[start..]
        .iter()
        .map(|entry| Line::from(Span::styled(entry.clone(), theme::text_muted())))
        .collect();
    let p = Paragraph::new(lines).block(block);
    f.render_widget(p, area);
}

fn draw_alert_modal(f: &mut Frame, app: &App, area: Rect) {
    let Some(message) = app.alert.message.as_deref() else {
        return;
    };
    let popup = centered_rect(50, 5, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled("Alert", theme::title_style().fg(theme::WARN)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::WARN));
    let body = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), theme::text_style())),
        Line::raw(""),
        Line::from(Span::styled("Press Enter or Esc to dismiss", theme::text_muted())),
    ])
    .wrap(Wrap { trim: true })
    .block(block);
    f.render_widget(body, popup);
}

/// A rect centered in `area`, `percent_x` wide and `height` rows tall.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(height),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
