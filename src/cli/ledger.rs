//! Income and expense CLI commands
//!
//! `fintrack income ...` and `fintrack expense ...` share one set of
//! subcommands; the handler is generic over the entry kind.

use clap::Subcommand;

use crate::display::{format_entry_details, format_entry_list, money};
use crate::error::FinTrackResult;
use crate::models::{Record, RecordId};
use crate::services::{EntryFields, EntryService, EntryUpdate, LedgerEntry};

use super::{parse_date, parse_money, parse_period, CommandContext};

/// Income or expense subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record a new entry
    Add {
        /// Category (e.g., "salary", "rent")
        category: String,
        /// Amount (e.g., "1250.50" or "1250")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List entries
    List {
        /// Period: "all", "YYYY" or "YYYY-MM"
        #[arg(short, long, default_value = "all")]
        period: String,
    },
    /// Show one entry
    Show {
        /// Entry ID
        id: RecordId,
    },
    /// Change fields of an entry
    Update {
        /// Entry ID
        id: RecordId,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete one or more entries
    Delete {
        /// Entry IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<RecordId>,
    },
}

/// Handle an income or expense command
pub fn handle_entry_command<T: LedgerEntry>(
    ctx: &CommandContext<'_>,
    cmd: EntryCommands,
) -> FinTrackResult<()> {
    let service = EntryService::<T>::new(ctx.storage);
    let noun = format!("{}s", T::KIND.to_lowercase());

    match cmd {
        EntryCommands::Add {
            category,
            amount,
            date,
            description,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => ctx.today,
            };
            let entry = service.create(
                ctx.user,
                EntryFields {
                    category,
                    amount: parse_money(&amount)?,
                    date,
                    description,
                },
            )?;

            println!(
                "Added {} #{}: {} {} on {}",
                T::KIND.to_lowercase(),
                entry.id(),
                entry.category(),
                money(entry.amount(), ctx.symbol()),
                entry.date().format("%Y-%m-%d")
            );
        }

        EntryCommands::List { period } => {
            let entries = service.list_in_period(ctx.user, parse_period(&period)?)?;
            print!("{}", format_entry_list(&entries, &noun, ctx.symbol()));
        }

        EntryCommands::Show { id } => {
            let entry = service.get(ctx.user, id)?;
            print!("{}", format_entry_details(&entry, ctx.symbol()));
        }

        EntryCommands::Update {
            id,
            category,
            amount,
            date,
            description,
        } => {
            let update = EntryUpdate {
                category,
                amount: amount.as_deref().map(parse_money).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                description,
            };
            if update.is_empty() {
                println!(
                    "No changes specified. Use --category, --amount, --date or --description."
                );
                return Ok(());
            }

            let entry = service.update(ctx.user, id, update)?;
            println!("Updated {} #{}", T::KIND.to_lowercase(), entry.id());
            print!("{}", format_entry_details(&entry, ctx.symbol()));
        }

        EntryCommands::Delete { ids } => {
            let removed = service.delete(ctx.user, &ids)?;
            println!("Deleted {} of {} {}", removed, ids.len(), noun);
        }
    }

    Ok(())
}
