//! Command-line wrapper around the availgrid tool surface.
//!
//! # Responsibility
//! - Map subcommands onto tool calls over a JSON cell dump.
//! - Print exactly one JSON envelope per invocation on stdout.
//! - Exit non-zero when the envelope reports a failure.

use availgrid_core::{DayGroup, SelectionMode, SelectionResult};
use availgrid_tools::{
    compile_prompt, describe_grid, dry_run_submit, format_selection, init_logging,
    parse_selection, SourceSpec, SubmitRequest, ToolError, ToolResponse,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "availgrid",
    version,
    about = "Inspect a group-scheduling grid and turn shorthand answers into slot timestamps"
)]
struct Cli {
    /// IANA zone for day labels and periods (default: AVAILGRID_TZ or host local time)
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Log level (default: AVAILGRID_LOG_LEVEL or build default)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute log directory (default: AVAILGRID_LOG_DIR; logging off when unset)
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GridArgs {
    /// JSON cell dump produced by a page extractor
    #[arg(long)]
    cells: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized day/slot/block model
    Describe(GridArgs),
    /// Print the selection menu and slot lookup
    Prompt {
        #[command(flatten)]
        grid: GridArgs,
        /// Print only the menu text instead of a JSON envelope
        #[arg(long, default_value_t = false)]
        menu_only: bool,
    },
    /// Parse an answer such as "d0t3 day1 morning2" or "1736154000, 1736154900"
    Select {
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long)]
        answer: String,
    },
    /// Render confirmation lines for comma-separated timestamps
    Format {
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long, value_delimiter = ',')]
        timestamps: Vec<i64>,
    },
    /// Parse an answer and replay the submission without touching the page
    Submit {
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long)]
        answer: String,
        #[arg(long)]
        event_url: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: Option<String>,
        /// Apply the configured settle delays between marks
        #[arg(long, default_value_t = false)]
        paced: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_level.as_deref(), cli.log_dir.as_deref()) {
        return emit(&ToolResponse::<()>::failure(err));
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        availgrid_tools::core_version()
    );

    let zone = cli.tz.as_deref();
    match cli.command {
        Command::Describe(grid) => emit(&describe(&grid, zone)),
        Command::Prompt { grid, menu_only } => {
            let response =
                load_days(&grid, zone).and_then(|days| compile_prompt(&days, zone).into_result());
            match response {
                Ok(prompt) if menu_only => {
                    print!("{}", prompt.menu);
                    ExitCode::SUCCESS
                }
                other => emit(&ToolResponse::from(other)),
            }
        }
        Command::Select { grid, answer } => emit(&ToolResponse::from(
            load_days(&grid, zone).and_then(|days| select(&answer, &days, zone)),
        )),
        Command::Format { grid, timestamps } => {
            let response = load_days(&grid, zone).and_then(|days| {
                let selection = SelectionResult {
                    mode: SelectionMode::RawTimestamps,
                    timestamps,
                    readable: Vec::new(),
                };
                format_selection(&selection, &days, zone).into_result()
            });
            emit(&ToolResponse::from(response))
        }
        Command::Submit {
            grid,
            answer,
            event_url,
            name,
            password,
            paced,
        } => {
            let response = load_days(&grid, zone).and_then(|days| {
                let selection = select(&answer, &days, zone)?;
                let request = SubmitRequest {
                    event_url,
                    name,
                    password,
                    timestamps: selection.timestamps,
                    paced,
                };
                dry_run_submit(&request, &days).into_result()
            });
            emit(&ToolResponse::from(response))
        }
    }
}

fn describe(grid: &GridArgs, zone: Option<&str>) -> ToolResponse<Vec<DayGroup>> {
    describe_grid(
        &SourceSpec::File {
            path: grid.cells.clone(),
        },
        zone,
    )
}

fn load_days(grid: &GridArgs, zone: Option<&str>) -> Result<Vec<DayGroup>, ToolError> {
    describe(grid, zone).into_result()
}

fn select(
    answer: &str,
    days: &[DayGroup],
    zone: Option<&str>,
) -> Result<SelectionResult, ToolError> {
    let prompt = compile_prompt(days, zone).into_result()?;
    parse_selection(answer, days, &prompt.lookup, zone).into_result()
}

fn emit<T: Serialize>(response: &ToolResponse<T>) -> ExitCode {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("failed to encode response: {err}");
            return ExitCode::FAILURE;
        }
    }
    if response.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
