//! Report CLI commands

use chrono::Datelike;
use clap::Subcommand;

use crate::aggregate::MonthLabelFormat;
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::Period;
use crate::reports::{ComparisonReport, DashboardReport, GoalsReport, SavingsReport};

use super::{parse_date, parse_period, CommandContext};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Totals, category breakdowns and recent activity
    Dashboard {
        /// Period: "all", "YYYY" or "YYYY-MM"; defaults to the current month
        #[arg(short, long)]
        period: Option<String>,
        /// Month labels (month_year, month_only)
        #[arg(long)]
        labels: Option<String>,
    },
    /// Monthly savings and a yearly summary
    Savings {
        /// Year to summarize; defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
        /// Month labels (month_year, month_only)
        #[arg(long)]
        labels: Option<String>,
    },
    /// Savings goal progress and budget usage
    Goals {
        /// Date to measure progress at (YYYY-MM-DD); defaults to today
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Compare two periods
    Compare {
        /// Period to report on; defaults to the current month
        current: Option<String>,
        /// Period to compare against; defaults to the one before `current`
        previous: Option<String>,
    },
}

fn label_format(
    ctx: &CommandContext<'_>,
    labels: Option<String>,
) -> FinTrackResult<MonthLabelFormat> {
    match labels {
        None => Ok(ctx.settings.month_labels),
        Some(s) => MonthLabelFormat::parse(&s).ok_or_else(|| {
            FinTrackError::Validation(format!(
                "Invalid month label format: '{}'. Valid formats: month_year, month_only",
                s
            ))
        }),
    }
}

/// Handle a report command
pub fn handle_report_command(ctx: &CommandContext<'_>, cmd: ReportCommands) -> FinTrackResult<()> {
    let symbol = ctx.symbol();

    match cmd {
        ReportCommands::Dashboard { period, labels } => {
            let period = match period {
                Some(p) => parse_period(&p)?,
                None => Period::month_of(ctx.today),
            };
            let report = DashboardReport::generate(
                ctx.storage,
                ctx.user,
                period,
                label_format(ctx, labels)?,
                ctx.settings.recent_limit,
            )?;
            print!("{}", report.format_terminal(symbol));
        }

        ReportCommands::Savings { year, labels } => {
            let report = SavingsReport::generate(
                ctx.storage,
                ctx.user,
                year.unwrap_or_else(|| ctx.today.year()),
                label_format(ctx, labels)?,
            )?;
            print!("{}", report.format_terminal(symbol));
        }

        ReportCommands::Goals { as_of } => {
            let as_of = match as_of {
                Some(d) => parse_date(&d)?,
                None => ctx.today,
            };
            let report = GoalsReport::generate(ctx.storage, ctx.user, as_of)?;
            print!("{}", report.format_terminal(symbol));
        }

        ReportCommands::Compare { current, previous } => {
            let current = match current {
                Some(p) => parse_period(&p)?,
                None => Period::month_of(ctx.today),
            };
            let previous = match previous {
                Some(p) => parse_period(&p)?,
                None => current.prev(),
            };
            let report = ComparisonReport::generate(ctx.storage, ctx.user, current, previous)?;
            print!("{}", report.format_terminal(symbol));
        }
    }

    Ok(())
}
