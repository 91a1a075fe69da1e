use super::grid::{layout_weeks, month_spans};
use crate::error::Result;
use crate::model::Activity;
use crate::theme::{ansi256, ThemeMode};
use crate::view::RenderPlan;
use chrono::NaiveDate;
use console::style;

const CELL: &str = "■ ";
const DAY_GUTTER: &str = "    ";

pub fn output_json(plan: &RenderPlan) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(plan)?);
    Ok(())
}

pub fn output_ndjson(activities: &[Activity]) -> Result<()> {
    for activity in activities {
        println!("{}", serde_json::to_string(activity)?);
    }
    Ok(())
}

/// Render the contribution grid: month header, Sunday-first week columns
/// with Mon/Wed/Fri gutter labels, total line, and the level legend.
pub fn output_grid(
    plan: &RenderPlan,
    mode: ThemeMode,
    since: NaiveDate,
    until: NaiveDate,
) -> Result<()> {
    let weeks = layout_weeks(&plan.activities, since, until);
    if weeks.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    let mut header = vec![b' '; weeks.len() * 2];
    for (column, label) in month_spans(&weeks) {
        let start = column * 2;
        for (i, byte) in label.bytes().enumerate() {
            if start + i < header.len() {
                header[start + i] = byte;
            }
        }
    }
    println!("{DAY_GUTTER}{}", String::from_utf8_lossy(&header));

    for slot in 0..7 {
        let gutter = match slot {
            1 => "Mon ",
            3 => "Wed ",
            5 => "Fri ",
            _ => DAY_GUTTER,
        };
        let mut line = String::new();
        for week in &weeks {
            match week[slot] {
                Some(day) => {
                    let color = ansi256(plan.theme.rgb(day.level, mode));
                    line.push_str(&style(CELL).color256(color).to_string());
                }
                None => line.push_str("  "),
            }
        }
        println!("{gutter}{line}");
    }

    if let Some(label) = &plan.total_label {
        println!();
        println!("{}", style(label).bold());
    }

    let mut legend = String::new();
    for level in 0..=plan.max_level {
        let color = ansi256(plan.theme.rgb(level, mode));
        legend.push_str(&style(CELL).color256(color).to_string());
    }
    println!("{} {}{}", style("Less").dim(), legend, style("More").dim());

    Ok(())
}
