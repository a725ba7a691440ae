use chrono::{Datelike, Duration, NaiveDate};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::task::Priority;
use crate::ops::timeline::{Section, TimelineBar, project};
use crate::tui::app::{App, InputMode};
use crate::util::unicode::fit_to_width;

/// Terminal cells per day column.
const DAY_WIDTH: u16 = 3;
/// Width of the label gutter on the left.
const LABEL_WIDTH: u16 = 32;

fn priority_color(p: Priority) -> Color {
    // Same palette as Priority::color()
    match p {
        Priority::Critical => Color::Rgb(230, 57, 70),
        Priority::High => Color::Rgb(255, 122, 89),
        Priority::Medium => Color::Rgb(242, 193, 78),
        Priority::Low => Color::Rgb(122, 166, 255),
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .title("taskline — timeline")
        .borders(Borders::ALL);
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let chart_width = chunks[0].width.saturating_sub(LABEL_WIDTH);
    let days = (chart_width / DAY_WIDTH) as i64;

    render_date_header(frame, chunks[0], app, days);
    render_bars(frame, chunks[1], app, days);
    render_status(frame, chunks[2], app);
}

fn render_date_header(frame: &mut Frame, area: Rect, app: &App, days: i64) {
    let gutter = " ".repeat(LABEL_WIDTH as usize);
    let mut month_spans = vec![Span::raw(gutter.clone())];
    let mut day_spans = vec![Span::raw(gutter)];
    let mut last_month = 0;

    for day in 0..days {
        let date = app.origin + Duration::days(day);
        let day_style = if date == app.today {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        day_spans.push(Span::styled(format!("{:>2} ", date.day()), day_style));

        if date.month() != last_month {
            last_month = date.month();
            month_spans.push(Span::raw(format!("{:<3}", date.format("%b"))));
        } else {
            month_spans.push(Span::raw(" ".repeat(DAY_WIDTH as usize)));
        }
    }

    let lines = vec![Line::from(month_spans), Line::from(day_spans)];
    frame.render_widget(Paragraph::new(lines), area);
}

fn bar_covers(bar: &TimelineBar, date: NaiveDate) -> bool {
    // A bar whose end precedes its start (done long before the plan)
    // still shows its start day
    date == bar.start || (date >= bar.start && date <= bar.end)
}

fn render_bars(frame: &mut Frame, area: Rect, app: &App, days: i64) {
    let bars = project(&app.tasks, &app.filter);
    if bars.is_empty() {
        let msg = Paragraph::new("no tasks to show (check the filters)")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, area);
        return;
    }

    let mut lines = Vec::new();
    for bar in bars.iter().skip(app.scroll).take(area.height as usize) {
        let label = format!("{:<6} | {}", bar.section.label(), bar.label);
        let label_style = match bar.section {
            Section::Active => Style::default(),
            Section::Done => Style::default().fg(Color::DarkGray),
        };
        let mut spans = vec![Span::styled(
            fit_to_width(&label, LABEL_WIDTH as usize),
            label_style,
        )];

        let color = priority_color(bar.priority);
        for day in 0..days {
            let date = app.origin + Duration::days(day);
            if bar_covers(bar, date) {
                spans.push(Span::styled(
                    "█".repeat(DAY_WIDTH as usize),
                    Style::default().fg(color),
                ));
            } else if date == app.today {
                spans.push(Span::styled(
                    " ".repeat(DAY_WIDTH as usize),
                    Style::default().bg(Color::Rgb(40, 40, 40)),
                ));
            } else {
                spans.push(Span::raw(" ".repeat(DAY_WIDTH as usize)));
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Filter => format!("filter> {}_", app.filter_input),
        InputMode::Normal => {
            let pri: String = Priority::ALL
                .iter()
                .map(|p| {
                    let c = p.as_str().chars().next().unwrap_or('?');
                    if app.filter.priorities.contains(p) {
                        c.to_ascii_uppercase()
                    } else {
                        '-'
                    }
                })
                .collect();
            format!(
                " q quit  d done:{}  1-4 pri:{}  / filter:{}  h/l pan  j/k scroll  t today",
                if app.filter.show_done { "on" } else { "off" },
                pri,
                app.filter.name_contains.as_deref().unwrap_or("*"),
            )
        }
    };
    let status =
        Paragraph::new(line).style(Style::default().fg(Color::Black).bg(Color::Rgb(122, 166, 255)));
    frame.render_widget(status, area);
}
