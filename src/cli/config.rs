//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display the effective configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display the effective configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Directory for activities and pictures
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Categories that must remain in every activity
    #[arg(long, value_name = "N")]
    min_categories: Option<usize>,

    /// Longest activity title accepted
    #[arg(long, value_name = "N")]
    max_title_len: Option<usize>,
}

#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    data_dir: String,
    min_categories: usize,
    max_title_len: usize,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(ctx),
            ConfigCommand::Set(args) => args.execute(ctx),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let output = ConfigOutput {
            config_file: ctx.config_file()?.display().to_string(),
            data_dir: ctx.data_dir.display().to_string(),
            min_categories: ctx.config.sorting.min_categories,
            max_title_len: ctx.config.sorting.max_title_len,
        };

        if self.json {
            return print_json(&output);
        }

        println!("Config file:    {}", output.config_file);
        println!("Data directory: {}", output.data_dir);
        println!("Min categories: {}", output.min_categories);
        println!("Max title len:  {}", output.max_title_len);
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        if self.storage_dir.is_none() && self.min_categories.is_none() && self.max_title_len.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --storage-dir, --min-categories, or --max-title-len",
            ));
        }

        // Start from the file, not the context, so a --data-dir override is not persisted
        let mut config = ctx.load_config_file()?;

        if let Some(dir) = &self.storage_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        if let Some(min) = self.min_categories {
            config.sorting.min_categories = min;
        }
        if let Some(len) = self.max_title_len {
            config.sorting.max_title_len = len;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        ctx.save_config_file(&config)?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}
