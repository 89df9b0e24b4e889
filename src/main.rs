use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use fintrack::aggregate::MonthLabelFormat;
use fintrack::cli::{
    handle_entry_command, handle_goal_command, handle_report_command, CommandContext,
};
use fintrack::config::{paths::FinTrackPaths, settings::Settings};
use fintrack::logging::{init_logging, parse_level};
use fintrack::models::{Expense, Income, UserId};
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    author = "Kaylee Beyene",
    version,
    about = "Track income, expenses and savings goals from the terminal",
    long_about = "fintrack records incomes, expenses and savings or budget goals, \
                  and summarizes them: totals by category and month, savings \
                  rate, month-over-month changes and goal progress."
)]
struct Cli {
    /// User to act for; defaults to the configured user
    #[arg(short, long, global = true, env = "FINTRACK_USER")]
    user: Option<i64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income management commands
    #[command(subcommand)]
    Income(fintrack::cli::EntryCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(fintrack::cli::EntryCommands),

    /// Savings and budget goal commands
    #[command(subcommand)]
    Goal(fintrack::cli::GoalCommands),

    /// Reports and summaries
    #[command(subcommand)]
    Report(fintrack::cli::ReportCommands),

    /// Initialize the data directory
    Init,

    /// Show or change configuration
    Config {
        /// Default user ID
        #[arg(long)]
        default_user: Option<i64>,
        /// Currency symbol for printed amounts
        #[arg(long)]
        currency: Option<String>,
        /// Month labels (month_year, month_only)
        #[arg(long)]
        month_labels: Option<String>,
        /// Entries shown in recent activity
        #[arg(long)]
        recent_limit: Option<usize>,
        /// Log level (error, warn, info, debug, trace)
        #[arg(long)]
        log_level: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinTrackPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    init_logging(paths.base_dir(), &settings.log_level)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let user = cli.user.map(UserId::new).unwrap_or(settings.user_id);
    let today = chrono::Local::now().date_naive();
    debug!(%user, %today, "starting");

    let ctx = CommandContext {
        storage: &storage,
        settings: &settings,
        user,
        today,
    };

    match cli.command {
        Some(Commands::Income(cmd)) => handle_entry_command::<Income>(&ctx, cmd)?,
        Some(Commands::Expense(cmd)) => handle_entry_command::<Expense>(&ctx, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&ctx, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&ctx, cmd)?,
        Some(Commands::Init) => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'fintrack income add salary 1000' to record your first income.");
        }
        Some(Commands::Config {
            default_user,
            currency,
            month_labels,
            recent_limit,
            log_level,
        }) => {
            let changed = default_user.is_some()
                || currency.is_some()
                || month_labels.is_some()
                || recent_limit.is_some()
                || log_level.is_some();

            if let Some(id) = default_user {
                settings.user_id = UserId::new(id);
            }
            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
            }
            if let Some(labels) = month_labels {
                settings.month_labels = MonthLabelFormat::parse(&labels).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Invalid month label format: '{}'. Valid formats: month_year, month_only",
                        labels
                    )
                })?;
            }
            if let Some(limit) = recent_limit {
                settings.recent_limit = limit;
            }
            if let Some(level) = log_level {
                settings.log_level = parse_level(&level)?;
            }
            if changed {
                settings.save(&paths)?;
                println!("Configuration saved.");
                println!();
            }

            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Log file:        {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Default user:  {}", settings.user_id);
            println!("  Currency:      {}", settings.currency_symbol);
            println!("  Month labels:  {}", settings.month_labels);
            println!("  Recent limit:  {}", settings.recent_limit);
            println!("  Log level:     {}", settings.log_level);
        }
        None => {
            println!("fintrack - personal income, expense and goal tracking");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack report dashboard' for this month's overview.");
        }
    }

    Ok(())
}
