use super::state::TuiState;
use crate::calendar::{display_range, flatten_days, layout_weeks, month_spans, GridDay, GridWeek};
use crate::model::{RepoSpec, Year};
use crate::theme::{Theme, ThemeMode};
use crate::view;
use crate::view::{CalendarView, RenderOptions, RenderPlan, ViewState};
use chrono::{Datelike, Local, NaiveDate};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn draw(
    f: &mut Frame,
    calendar_view: &CalendarView,
    options: &RenderOptions,
    state: &mut TuiState,
) {
    let size = f.size();
    if state.show_help {
        draw_help_overlay(f, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(size);

    draw_title(f, chunks[0], calendar_view, state);

    match calendar_view.state() {
        ViewState::Idle | ViewState::Loading => {
            draw_skeleton(f, chunks[1], calendar_view.year(), state);
        }
        ViewState::Failed(_) => draw_error(f, chunks[1], options, calendar_view.repo()),
        ViewState::Ready(data) => {
            let today = Local::now().date_naive();
            let plan = view::prepare(data, calendar_view.year(), today.year(), options, false);
            draw_calendar(f, chunks[1], &plan, calendar_view.year(), state);
        }
    }
}

fn year_label(year: Year) -> String {
    match year {
        Year::Last => "last 12 months".to_string(),
        Year::Literal(y) => y.to_string(),
    }
}

fn draw_title(f: &mut Frame, area: Rect, calendar_view: &CalendarView, state: &TuiState) {
    let mut spans = vec![
        Span::styled(
            calendar_view.repo().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            year_label(calendar_view.year()),
            Style::default().fg(Color::Yellow),
        ),
    ];
    if let Some((message, _)) = &state.status_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(message.clone(), Style::default().fg(Color::Green)));
    } else {
        spans.push(Span::styled(
            "  Press 'h' for help, 'q' to quit",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("ghmap")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(title, area);
}

fn week_column(weeks: &[GridWeek], date: NaiveDate) -> Option<usize> {
    weeks
        .iter()
        .position(|week| week.iter().flatten().any(|day| day.date == date))
}

/// Horizontal window over the week columns keeping `focus` visible.
fn window(columns: usize, visible: usize, focus: usize) -> (usize, usize) {
    if columns <= visible {
        return (0, columns);
    }
    let start = focus
        .saturating_sub(visible - 1)
        .min(columns - visible);
    (start, start + visible)
}

fn grid_lines(
    weeks: &[GridWeek],
    theme: &Theme,
    mode: ThemeMode,
    selected: Option<NaiveDate>,
    skeleton: bool,
    width: u16,
) -> Vec<Line<'static>> {
    let columns = weeks.len();
    let visible = (usize::from(width.saturating_sub(6)) / 2).max(1);
    let focus = selected
        .and_then(|date| week_column(weeks, date))
        .unwrap_or_else(|| columns.saturating_sub(1));
    let (start, end) = window(columns, visible, focus);
    let weeks = &weeks[start..end];

    let mut header = vec![b' '; weeks.len() * 2];
    for (column, label) in month_spans(weeks) {
        let offset = column * 2;
        for (i, byte) in label.bytes().enumerate() {
            if offset + i < header.len() {
                header[offset + i] = byte;
            }
        }
    }

    let mut lines = Vec::with_capacity(8);
    lines.push(Line::from(vec![
        Span::raw("    "),
        Span::styled(
            String::from_utf8_lossy(&header).into_owned(),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    for slot in 0..7 {
        let gutter = match slot {
            1 => "Mon ",
            3 => "Wed ",
            5 => "Fri ",
            _ => "    ",
        };
        let mut spans = vec![Span::styled(gutter, Style::default().fg(Color::DarkGray))];
        for week in weeks {
            match week[slot] {
                Some(_) if skeleton => {
                    spans.push(Span::styled("░ ", Style::default().fg(Color::DarkGray)));
                }
                Some(day) => {
                    let (r, g, b) = theme.rgb(day.level, mode);
                    let mut style = Style::default().fg(Color::Rgb(r, g, b));
                    if selected == Some(day.date) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    spans.push(Span::styled("■ ", style));
                }
                None => spans.push(Span::raw("  ")),
            }
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn draw_calendar(f: &mut Frame, area: Rect, plan: &RenderPlan, year: Year, state: &mut TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let today = Local::now().date_naive();
    let Ok((since, until)) = display_range(year, today) else {
        return;
    };
    let weeks = layout_weeks(&plan.activities, since, until);
    let days = flatten_days(&weeks);
    if days.is_empty() {
        return;
    }
    state.selected = state.selected.min(days.len() - 1);
    let selected = days[state.selected];

    let inner_width = chunks[0].width.saturating_sub(2);
    let mut lines = grid_lines(
        &weeks,
        &plan.theme,
        state.mode,
        Some(selected.date),
        false,
        inner_width,
    );

    lines.push(Line::from(""));
    if let Some(label) = &plan.total_label {
        lines.push(Line::from(Span::styled(
            label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    let mut legend = vec![Span::styled("Less ", Style::default().fg(Color::DarkGray))];
    for level in 0..=plan.max_level {
        let (r, g, b) = plan.theme.rgb(level, state.mode);
        legend.push(Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))));
    }
    legend.push(Span::styled("More", Style::default().fg(Color::DarkGray)));
    lines.push(Line::from(legend));

    let grid_panel = Paragraph::new(lines).block(
        Block::default()
            .title(format!("Contributions: {since} - {until}"))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(grid_panel, chunks[0]);

    draw_side_panel(f, chunks[1], &selected, &days, plan, state.mode);
}

fn draw_side_panel(
    f: &mut Frame,
    area: Rect,
    day: &GridDay,
    days: &[GridDay],
    plan: &RenderPlan,
    mode: ThemeMode,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let (r, g, b) = plan.theme.rgb(day.level, mode);
    let details = vec![
        Line::from(Span::styled(
            "Day Details",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Date: ", Style::default().fg(Color::White)),
            Span::styled(
                day.date.format("%A, %B %-d, %Y").to_string(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Commits: ", Style::default().fg(Color::White)),
            Span::styled(format!("{}", day.count), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Level: ", Style::default().fg(Color::White)),
            Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))),
            Span::raw(format!("{}/{}", day.level, plan.max_level)),
        ]),
    ];
    let details_panel = Paragraph::new(details).block(
        Block::default()
            .title("Selected Day")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(details_panel, chunks[0]);

    let active = days.iter().filter(|d| d.count > 0).count();
    let busiest = days.iter().max_by_key(|d| d.count);
    let mut summary = vec![
        Line::from(Span::styled(
            "Range",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Days: ", Style::default().fg(Color::White)),
            Span::styled(format!("{}", days.len()), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Active days: ", Style::default().fg(Color::White)),
            Span::styled(format!("{active}"), Style::default().fg(Color::Green)),
        ]),
    ];
    if let Some(busiest) = busiest.filter(|d| d.count > 0) {
        summary.push(Line::from(vec![
            Span::styled("Busiest: ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{} ({} commits)", busiest.date, busiest.count),
                Style::default().fg(Color::Magenta),
            ),
        ]));
    }
    let summary_panel = Paragraph::new(summary).block(
        Block::default()
            .title("Summary")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(summary_panel, chunks[1]);
}

fn draw_skeleton(f: &mut Frame, area: Rect, year: Year, state: &TuiState) {
    let today = Local::now().date_naive();
    let Ok((since, until)) = display_range(year, today) else {
        return;
    };
    let weeks = layout_weeks(&[], since, until);
    let theme = Theme::default();

    let mut lines = grid_lines(
        &weeks,
        &theme,
        state.mode,
        None,
        true,
        area.width.saturating_sub(2),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Loading contribution activity...",
        Style::default().fg(Color::DarkGray),
    )));

    let skeleton = Paragraph::new(lines).block(
        Block::default()
            .title("Contributions")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(skeleton, area);
}

fn draw_error(f: &mut Frame, area: Rect, options: &RenderOptions, repo: &RepoSpec) {
    let lines = vec![
        Line::from(Span::styled(
            view::error_message(options, repo),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'r' to retry, 'q' to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let error_panel = Paragraph::new(lines).block(
        Block::default()
            .title("Error")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(error_panel, area);
}

fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let entry = |key: &str, action: &str| {
        Line::from(vec![
            Span::styled(format!("{key:<12}"), Style::default().fg(Color::Yellow)),
            Span::raw(action.to_string()),
        ])
    };
    let lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        entry("q / Esc", "quit"),
        entry("h / F1", "toggle this help"),
        entry("arrows", "move selection (left/right one week, up/down one day)"),
        entry("j / k", "next / previous day"),
        entry("Home / End", "first / last day"),
        entry("t", "toggle light/dark palette"),
        entry("r", "refresh"),
        entry("p / n", "previous / next year"),
        entry("l", "last 12 months"),
    ];
    let help = Paragraph::new(lines).block(
        Block::default()
            .title("Help | press 'h' to close")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(help, area);
}
