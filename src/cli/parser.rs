use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for sleeplog
/// CLI application to track sleep sessions with SQLite
#[derive(Parser)]
#[command(
    name = "sleeplog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple sleep logging CLI: start and stop nights, rate them, browse the history",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Start tracking tonight
    Start,

    /// Stop tracking the current night
    Stop,

    /// Rate a night's sleep quality (0 = very bad … 5 = excellent)
    Rate {
        /// Quality rating between 0 and 5
        #[arg(allow_hyphen_values = true)]
        quality: i32,

        #[arg(
            long = "night",
            help = "Night id to rate (default: latest stopped night without a rating)"
        )]
        night: Option<i64>,
    },

    /// Show whether a night is currently being tracked
    Status,

    /// List recorded nights, most recent first
    List {
        #[arg(long, short, help = "Show at most N nights (0 = all)")]
        limit: Option<usize>,
    },

    /// Delete every recorded night
    Clear {
        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Export recorded nights
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup without asking")]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
