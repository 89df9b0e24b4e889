//! Goal CLI commands

use clap::Subcommand;

use crate::display::{format_goal_details, format_goal_list};
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{GoalKind, RecordId};
use crate::services::{GoalFields, GoalService, GoalUpdate};

use super::{parse_date, parse_money, CommandContext};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings or budget goal
    Add {
        /// Category (the thing saved for, or the category capped)
        category: String,
        /// Target amount (savings) or spending cap (budget)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: String,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        start: Option<String>,
        /// Goal type (savings, budget)
        #[arg(short = 't', long = "type", default_value = "savings")]
        kind: String,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List goals
    List {
        /// Only this type (savings, budget)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },
    /// Show one goal
    Show {
        /// Goal ID
        id: RecordId,
    },
    /// Change fields of a goal
    Update {
        /// Goal ID
        id: RecordId,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete one or more goals
    Delete {
        /// Goal IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<RecordId>,
    },
    /// Delete goals that ended before the current month
    Purge {
        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },
}

fn parse_kind(input: &str) -> FinTrackResult<GoalKind> {
    GoalKind::parse(input).ok_or_else(|| {
        FinTrackError::Validation(format!(
            "Invalid goal type: '{}'. Valid types: savings, budget",
            input
        ))
    })
}

/// Handle a goal command
pub fn handle_goal_command(ctx: &CommandContext<'_>, cmd: GoalCommands) -> FinTrackResult<()> {
    let service = GoalService::new(ctx.storage);

    match cmd {
        GoalCommands::Add {
            category,
            amount,
            end,
            start,
            kind,
            description,
        } => {
            let start_date = match start {
                Some(s) => parse_date(&s)?,
                None => ctx.today,
            };
            let goal = service.create(
                ctx.user,
                GoalFields {
                    category,
                    kind: parse_kind(&kind)?,
                    amount: parse_money(&amount)?,
                    start_date,
                    end_date: parse_date(&end)?,
                    description,
                },
            )?;

            println!("Created goal #{}", goal.id);
            print!("{}", format_goal_details(&goal, ctx.symbol()));
        }

        GoalCommands::List { kind } => {
            let goals = match kind.as_deref().map(parse_kind).transpose()? {
                Some(GoalKind::Savings) => service.list_savings(ctx.user)?,
                Some(GoalKind::Budget) => service.list_budgets(ctx.user)?,
                None => service.list(ctx.user)?,
            };
            print!("{}", format_goal_list(&goals, ctx.symbol()));
        }

        GoalCommands::Show { id } => {
            let goal = service.get(ctx.user, id)?;
            print!("{}", format_goal_details(&goal, ctx.symbol()));
        }

        GoalCommands::Update {
            id,
            category,
            amount,
            kind,
            start,
            end,
            description,
        } => {
            let update = GoalUpdate {
                category,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                amount: amount.as_deref().map(parse_money).transpose()?,
                start_date: start.as_deref().map(parse_date).transpose()?,
                end_date: end.as_deref().map(parse_date).transpose()?,
                description,
            };
            if update.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let goal = service.update(ctx.user, id, update)?;
            println!("Updated goal #{}", goal.id);
            print!("{}", format_goal_details(&goal, ctx.symbol()));
        }

        GoalCommands::Delete { ids } => {
            let removed = service.delete(ctx.user, &ids)?;
            println!("Deleted {} of {} goals", removed, ids.len());
        }

        GoalCommands::Purge { dry_run } => {
            let goals = if dry_run {
                service.expired(ctx.user, ctx.today)?
            } else {
                service.purge_expired(ctx.user, ctx.today)?
            };

            if goals.is_empty() {
                println!("No expired goals.");
                return Ok(());
            }

            let verb = if dry_run { "Would delete" } else { "Deleted" };
            println!("{} {} expired goal(s):", verb, goals.len());
            print!("{}", format_goal_list(&goals, ctx.symbol()));
        }
    }

    Ok(())
}
