use crate::model::Year;
use crate::theme::ThemeMode;
use crate::view::{Labels, RenderOptions};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::str::FromStr;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ghmap")]
#[command(about = "GitHub contribution calendar for the terminal")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "GitHub user whose repository to query")]
    pub user: String,

    #[arg(long, help = "Repository name, or owner/name to query another owner's repository")]
    pub repo: String,

    #[arg(
        long,
        default_value = "last",
        value_parser = parse_year,
        help = "Calendar year to display, or 'last' for the most recent 12 months"
    )]
    pub year: Year,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub API token")]
    pub token: Option<String>,

    #[arg(long, help = "GraphQL endpoint override")]
    pub endpoint: Option<String>,

    #[arg(
        long,
        value_parser = humantime::parse_duration,
        help = "HTTP timeout (e.g. 10s); the transport's defaults apply when unset"
    )]
    pub timeout: Option<Duration>,
}

#[derive(Subcommand)]
pub enum Commands {
    Show {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long = "interactive", alias = "tui", alias = "ui", help = "Enable interactive terminal UI")]
        interactive: bool,

        #[arg(
            long,
            default_value = "light",
            value_parser = parse_theme,
            help = "Palette for the console grid"
        )]
        theme: ThemeMode,

        #[arg(long, help = "Fail on fetch errors instead of rendering an inline message")]
        strict: bool,

        #[arg(long, help = "Inline message shown when the fetch fails")]
        error_message: Option<String>,

        #[arg(
            long,
            help = "Total-count label template; {{count}} and {{year}} are interpolated"
        )]
        total_label: Option<String>,
    },
    Export {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
}

fn parse_year(s: &str) -> std::result::Result<Year, String> {
    Year::from_str(s).map_err(|e| e.to_string())
}

fn parse_theme(s: &str) -> std::result::Result<ThemeMode, String> {
    ThemeMode::from_str(s)
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Show { json, ndjson, interactive, theme, strict, error_message, total_label } => {
                if interactive {
                    Ok(crate::tui::run(self.common)?)
                } else {
                    let options = RenderOptions {
                        labels: Labels { total_count: total_label },
                        error_message,
                        propagate_errors: strict,
                        ..RenderOptions::default()
                    };
                    crate::calendar::exec(self.common, json, ndjson, theme, options)
                }
            }
            Commands::Export { json, ndjson } => {
                crate::export::exec(self.common, json, ndjson)
            }
        }
    }
}
