//! SortBoard - sort pictures into categories from the command line
//!
//! Manages activities, their categories and the placement of picture items,
//! persisting everything to a JSON file in the data directory.

use clap::{Parser, Subcommand};
use sortboard::cli::{
    ActivityArgs, BoardArgs, CategoryArgs, CliContext, CliError, CliResult, ConfigArgs, ExitCode,
    ItemArgs,
};
use sortboard::config::Config;
use sortboard::constants::APP_BINARY_NAME;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// SortBoard - sort pictures into categories
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Directory holding activities and pictures (overrides config)
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (default: platform config directory)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage activities
    Activity(ActivityArgs),
    /// Manage categories in an activity
    Category(CategoryArgs),
    /// Manage and move items
    Item(ItemArgs),
    /// Reset or clear a whole board
    Board(BoardArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

impl Cli {
    fn context(&self) -> CliResult<CliContext> {
        let mut ctx = CliContext {
            config: Config::default(),
            data_dir: PathBuf::new(),
            config_path: self.config.clone(),
        };
        let mut config = ctx.load_config_file()?;

        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        let data_dir = config
            .data_dir()
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        debug!(data_dir = %data_dir.display(), "resolved data directory");

        ctx.config = config;
        ctx.data_dir = data_dir;
        Ok(ctx)
    }

    fn run(&self) -> CliResult<()> {
        let ctx = self.context()?;
        match &self.command {
            Commands::Activity(args) => args.execute(&ctx),
            Commands::Category(args) => args.execute(&ctx),
            Commands::Item(args) => args.execute(&ctx),
            Commands::Board(args) => args.execute(&ctx),
            Commands::Config(args) => args.execute(&ctx),
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so command output stays parseable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.run() {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => {
            eprintln!("Error: {e}");
            e.code.into()
        }
    }
}
