pub mod aggregate;
pub mod exec;
pub mod fetch;
pub mod grid;
pub mod output;

pub use aggregate::{build_calendar, group_by_day, level};
pub use exec::exec;
pub use fetch::{fetch_calendar, since_day, since_rfc3339};
pub use grid::{display_range, flatten_days, layout_weeks, month_spans, GridDay, GridWeek};
pub use output::{output_grid, output_json, output_ndjson};
