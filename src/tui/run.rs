use super::draw;
use super::state::TuiState;
use crate::calendar::{display_range, fetch_calendar};
use crate::cli::CommonArgs;
use crate::error::{GhmapError, Result};
use crate::github::GithubClient;
use crate::model::{CalendarData, RepoSpec, Year};
use crate::view::{CalendarView, FetchTicket, RenderOptions};
use chrono::{Datelike, Local};
use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

type Completion = (FetchTicket, Result<CalendarData>);

fn spawn_fetch(
    client: &GithubClient,
    repo: &RepoSpec,
    year: Year,
    ticket: FetchTicket,
    tx: &mpsc::Sender<Completion>,
) {
    let client = client.clone();
    let repo = repo.clone();
    let tx = tx.clone();
    thread::spawn(move || {
        let result = fetch_calendar(&client, &repo, year);
        // The receiver is gone once the UI has exited; nothing to deliver then.
        let _ = tx.send((ticket, result));
    });
}

/// Days covered by the current display range, for cursor clamping.
fn range_len(year: Year) -> usize {
    let today = Local::now().date_naive();
    match display_range(year, today) {
        Ok((since, until)) => (until - since).num_days() as usize + 1,
        Err(_) => 0,
    }
}

fn previous_year(year: Year, current: i32) -> Year {
    match year {
        Year::Last => Year::Literal(current - 1),
        Year::Literal(y) => Year::Literal(y - 1),
    }
}

fn next_year(year: Year, current: i32) -> Year {
    match year {
        Year::Last => Year::Last,
        Year::Literal(y) if y + 1 > current => Year::Last,
        Year::Literal(y) => Year::Literal(y + 1),
    }
}

pub fn run(common: CommonArgs) -> Result<()> {
    let repo = RepoSpec::resolve(&common.user, &common.repo)?;
    let token = common.token.clone().ok_or(GhmapError::MissingToken)?;
    let client = GithubClient::new(token, common.endpoint.clone(), common.timeout)?;

    let options = RenderOptions::default();
    let (tx, rx) = mpsc::channel::<Completion>();

    let mut view = CalendarView::new(repo.clone(), common.year);
    let ticket = view.begin_fetch();
    spawn_fetch(&client, view.repo(), view.year(), ticket, &tx);

    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut state = TuiState::default();

    loop {
        while let Ok((ticket, result)) = rx.try_recv() {
            view.complete(ticket, result);
        }

        if let Some((_, shown_at)) = &state.status_message {
            if shown_at.elapsed() > Duration::from_secs(3) {
                state.status_message = None;
            }
        }

        let draw_result = terminal.draw(|f| draw::draw(f, &view, &options, &mut state));
        if let Err(e) = draw_result {
            eprintln!("TUI draw error: {e}");
        }

        if poll(Duration::from_millis(200))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                let days = range_len(view.year());
                let last = days.saturating_sub(1);
                let current_year = Local::now().year();

                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('h') | KeyCode::F(1) => state.show_help = !state.show_help,
                    KeyCode::Char('t') => state.mode = state.mode.toggled(),
                    KeyCode::Char('r') => {
                        let ticket = view.begin_fetch();
                        spawn_fetch(&client, view.repo(), view.year(), ticket, &tx);
                        state.status_message = Some(("Refreshing...".to_string(), Instant::now()));
                    }
                    KeyCode::Char('p') => {
                        let year = previous_year(view.year(), current_year);
                        view.set_inputs(repo.clone(), year);
                        let ticket = view.begin_fetch();
                        spawn_fetch(&client, view.repo(), year, ticket, &tx);
                        state.selected = 0;
                    }
                    KeyCode::Char('n') => {
                        let year = next_year(view.year(), current_year);
                        if year != view.year() {
                            view.set_inputs(repo.clone(), year);
                            let ticket = view.begin_fetch();
                            spawn_fetch(&client, view.repo(), year, ticket, &tx);
                            state.selected = 0;
                        }
                    }
                    KeyCode::Char('l') => {
                        if view.year() != Year::Last {
                            view.set_inputs(repo.clone(), Year::Last);
                            let ticket = view.begin_fetch();
                            spawn_fetch(&client, view.repo(), Year::Last, ticket, &tx);
                            state.selected = 0;
                        }
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        state.selected = (state.selected + 1).min(last);
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        state.selected = state.selected.saturating_sub(1);
                    }
                    KeyCode::Right => {
                        state.selected = (state.selected + 7).min(last);
                    }
                    KeyCode::Left => {
                        state.selected = state.selected.saturating_sub(7);
                    }
                    KeyCode::Home => {
                        state.selected = 0;
                    }
                    KeyCode::End => {
                        state.selected = last;
                    }
                    _ => {}
                }
            }
        }
    }

    terminal.clear()?;
    disable_raw_mode()?;
    Ok(())
}
