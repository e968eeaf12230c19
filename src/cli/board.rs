//! Whole-board commands for an activity.

use crate::cli::common::{require_activity, CliContext, CliError, CliResult};
use clap::{Args, Subcommand};

/// Operate on an activity's whole board
#[derive(Debug, Clone, Args)]
pub struct BoardArgs {
    /// Board subcommand
    #[command(subcommand)]
    pub command: BoardCommand,
}

/// Board subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum BoardCommand {
    /// Send every item back to the tray
    Reset(ResetArgs),
    /// Delete every item and picture
    Clear(ClearArgs),
    /// Show or hide category header pictures
    Headers(HeadersArgs),
}

/// Send every item back to the tray
#[derive(Debug, Clone, Args)]
pub struct ResetArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,
}

/// Delete every item
#[derive(Debug, Clone, Args)]
pub struct ClearArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Confirm deletion
    #[arg(long)]
    pub yes: bool,
}

/// Toggle header pictures
#[derive(Debug, Clone, Args)]
pub struct HeadersArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Whether headers are shown
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub show: bool,
}

impl BoardArgs {
    /// Execute the board command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            BoardCommand::Reset(args) => args.execute(ctx),
            BoardCommand::Clear(args) => args.execute(ctx),
            BoardCommand::Headers(args) => args.execute(ctx),
        }
    }
}

impl ResetArgs {
    /// Execute the reset command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut repo = ctx.open_repository();
        let count = require_activity(&repo, &self.activity)?.items.len();

        repo.reset_placements(&self.activity)?;
        println!("{count} items returned to the tray.");
        Ok(())
    }
}

impl ClearArgs {
    /// Execute the clear command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        if !self.yes {
            return Err(CliError::validation(
                "Refusing to delete every item without --yes",
            ));
        }
        let mut repo = ctx.open_repository();
        let count = require_activity(&repo, &self.activity)?.items.len();

        repo.clear_all_items(&self.activity)?;
        println!("Deleted {count} items.");
        Ok(())
    }
}

impl HeadersArgs {
    /// Execute the headers command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut repo = ctx.open_repository();
        require_activity(&repo, &self.activity)?;

        repo.set_show_headers(&self.activity, self.show)?;
        println!(
            "Category headers {}.",
            if self.show { "shown" } else { "hidden" }
        );
        Ok(())
    }
}
