use crate::error::{GhmapError, Result};
use crate::model::{Activity, CalendarData, RepoSpec, Year};
use crate::theme::Theme;
use serde::Serialize;

/// Post-fetch hook over the activity sequence, supplied by the caller.
pub type TransformFn = Box<dyn Fn(Vec<Activity>) -> Vec<Activity>>;

/// Renderers never see more than five levels regardless of caller options.
pub const MAX_LEVEL: u8 = 4;

pub const DEFAULT_TOTAL_LABEL_LAST: &str = "{{count}} contributions in the last year";
pub const DEFAULT_TOTAL_LABEL_YEAR: &str = "{{count}} contributions in {{year}}";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pub total_count: Option<String>,
}

/// Caller-supplied display configuration, merged with defaults by `prepare`.
/// Caller labels win on conflict; `MAX_LEVEL` is always forced.
pub struct RenderOptions {
    pub labels: Labels,
    pub theme: Option<Theme>,
    pub loading: bool,
    pub error_message: Option<String>,
    pub propagate_errors: bool,
    pub transform: Option<TransformFn>,
    pub transform_total_count: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            theme: None,
            loading: false,
            error_message: None,
            propagate_errors: false,
            transform: None,
            transform_total_count: true,
        }
    }
}

/// Resolved input for a renderer: transformed activities, interpolated
/// label, effective theme, combined loading flag, and the total (absent
/// when a transform made the computed total meaningless).
#[derive(Debug, Clone, Serialize)]
pub struct RenderPlan {
    pub activities: Vec<Activity>,
    pub total: Option<u64>,
    pub total_label: Option<String>,
    pub theme: Theme,
    pub loading: bool,
    pub max_level: u8,
}

fn default_total_template(year: Year) -> &'static str {
    match year {
        Year::Last => DEFAULT_TOTAL_LABEL_LAST,
        Year::Literal(_) => DEFAULT_TOTAL_LABEL_YEAR,
    }
}

/// Interpolate `{{count}}` and `{{year}}` into a total-count label template.
pub fn render_total_label(template: &str, count: u64, year: Year, current_year: i32) -> String {
    template
        .replace("{{count}}", &count.to_string())
        .replace("{{year}}", &year.total_key(current_year).to_string())
}

/// Merge caller options with defaults and resolve everything a renderer
/// needs for one frame.
pub fn prepare(
    data: &CalendarData,
    year: Year,
    current_year: i32,
    options: &RenderOptions,
    loading: bool,
) -> RenderPlan {
    let activities = match &options.transform {
        Some(transform) => transform(data.contributions.clone()),
        None => data.contributions.clone(),
    };

    let computed = data.total.get(&year.total_key(current_year)).copied();
    // A transform may have changed what the displayed total would mean.
    let total = if options.transform.is_some() && options.transform_total_count {
        None
    } else {
        computed
    };

    let template = options
        .labels
        .total_count
        .clone()
        .unwrap_or_else(|| default_total_template(year).to_string());
    let total_label = total.map(|count| render_total_label(&template, count, year, current_year));

    RenderPlan {
        activities,
        total,
        total_label,
        theme: options.theme.clone().unwrap_or_default(),
        loading: options.loading || loading,
        max_level: MAX_LEVEL,
    }
}

/// The inline message rendered when a fetch fails and errors are not
/// propagated to the caller.
pub fn error_message(options: &RenderOptions, repo: &RepoSpec) -> String {
    options.error_message.clone().unwrap_or_else(|| {
        format!("Error - Fetching GitHub contribution data for \"{repo}\" failed.")
    })
}

#[derive(Debug)]
pub enum ViewState {
    Idle,
    Loading,
    Ready(CalendarData),
    Failed(GhmapError),
}

/// Identifies one fetch. Completions for anything but the latest ticket
/// are discarded, so a slow stale fetch can never overwrite a fresher one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// One calendar instance's exclusive `{inputs, state}` pair and its fetch
/// lifecycle: idle -> loading -> ready | failed, restartable on input change.
pub struct CalendarView {
    repo: RepoSpec,
    year: Year,
    state: ViewState,
    generation: u64,
}

impl CalendarView {
    pub fn new(repo: RepoSpec, year: Year) -> Self {
        Self {
            repo,
            year,
            state: ViewState::Idle,
            generation: 0,
        }
    }

    pub fn repo(&self) -> &RepoSpec {
        &self.repo
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Change the input pair and restart the cycle. Outstanding fetches
    /// become stale; a no-op when the inputs are unchanged.
    pub fn set_inputs(&mut self, repo: RepoSpec, year: Year) {
        if self.repo == repo && self.year == year {
            return;
        }
        self.repo = repo;
        self.year = year;
        self.generation += 1;
        self.state = ViewState::Idle;
    }

    /// Enter `Loading` and issue the ticket the eventual completion must
    /// present.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = ViewState::Loading;
        FetchTicket(self.generation)
    }

    /// Apply a fetch completion. Stale tickets leave the state untouched
    /// and return false.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<CalendarData>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.state = match result {
            Ok(data) => ViewState::Ready(data),
            Err(err) => ViewState::Failed(err),
        };
        true
    }
}
