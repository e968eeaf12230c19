//! Activity management commands.
//!
//! Provides commands to list, inspect, create and delete activities.

use crate::cli::common::{
    describe_location, print_json, require_activity, CliContext, CliError, CliResult,
};
use crate::models::{Location, Orientation};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Manage activities
#[derive(Debug, Clone, Args)]
pub struct ActivityArgs {
    /// Activity subcommand
    #[command(subcommand)]
    pub command: ActivityCommand,
}

/// Activity subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ActivityCommand {
    /// List all activities
    List(ListActivitiesArgs),
    /// Show one activity with its board
    Show(ShowActivityArgs),
    /// Create a new activity
    Create(CreateActivityArgs),
    /// Delete an activity and its images
    Delete(DeleteActivityArgs),
    /// Delete every activity and image
    DeleteAll(DeleteAllArgs),
}

/// List all activities
#[derive(Debug, Clone, Args)]
pub struct ListActivitiesArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show one activity
#[derive(Debug, Clone, Args)]
pub struct ShowActivityArgs {
    /// Activity ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output the stored activity as JSON
    #[arg(long)]
    pub json: bool,
}

/// Create a new activity
#[derive(Debug, Clone, Args)]
pub struct CreateActivityArgs {
    /// Activity title
    #[arg(long)]
    pub title: String,

    /// Category title (repeat for each category, in display order)
    #[arg(long = "category", value_name = "TITLE", required = true)]
    pub categories: Vec<String>,

    /// Layout orientation: column or row
    #[arg(long, default_value = "column")]
    pub orientation: Orientation,

    /// Print only the new activity ID
    #[arg(long)]
    pub quiet: bool,
}

/// Delete an activity
#[derive(Debug, Clone, Args)]
pub struct DeleteActivityArgs {
    /// Activity ID
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Delete everything
#[derive(Debug, Clone, Args)]
pub struct DeleteAllArgs {
    /// Confirm deletion
    #[arg(long)]
    pub yes: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivitySummary {
    id: String,
    title: String,
    created_at: String,
    orientation: String,
    categories: usize,
    items: usize,
    unsorted: usize,
}

#[derive(Debug, Serialize)]
struct ListActivitiesResponse {
    activities: Vec<ActivitySummary>,
    count: usize,
}

impl ActivityArgs {
    /// Execute the activity command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            ActivityCommand::List(args) => args.execute(ctx),
            ActivityCommand::Show(args) => args.execute(ctx),
            ActivityCommand::Create(args) => args.execute(ctx),
            ActivityCommand::Delete(args) => args.execute(ctx),
            ActivityCommand::DeleteAll(args) => args.execute(ctx),
        }
    }
}

impl ListActivitiesArgs {
    /// Execute the list command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let repo = ctx.open_repository();

        let activities: Vec<ActivitySummary> = repo
            .activities()
            .iter()
            .map(|a| ActivitySummary {
                id: a.id.clone(),
                title: a.title.clone(),
                created_at: a.created_at.to_rfc3339(),
                orientation: a.orientation.to_string(),
                categories: a.categories.len(),
                items: a.items.len(),
                unsorted: a.count_in(&Location::Unsorted),
            })
            .collect();

        let response = ListActivitiesResponse {
            count: activities.len(),
            activities,
        };

        if self.json {
            print_json(&response)?;
        } else if response.count == 0 {
            println!("No activities.");
        } else {
            println!("Activities ({}):", response.count);
            println!();
            for a in &response.activities {
                println!(
                    "  {:<38} {:<26} {} categories, {} items ({} unsorted)",
                    a.id, a.title, a.categories, a.items, a.unsorted
                );
            }
        }
        Ok(())
    }
}

impl ShowActivityArgs {
    /// Execute the show command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let repo = ctx.open_repository();
        let activity = require_activity(&repo, &self.id)?;

        if self.json {
            return print_json(activity);
        }

        println!("{} ({} layout)", activity.title, activity.orientation);
        println!("Created: {}", activity.created_at.format("%Y-%m-%d %H:%M"));
        println!();
        for category in &activity.categories {
            let location = Location::category(category.id.clone());
            println!(
                "  [{}] {} ({})",
                category.id,
                describe_location(activity, &location),
                category.color()
            );
            for item in activity.items_in(&location) {
                println!("      {:>3}. {}", item.order, item.id);
            }
        }
        println!("  [tray]");
        for item in activity.unsorted_items() {
            println!("      {:>3}. {}", item.order, item.id);
        }
        Ok(())
    }
}

impl CreateActivityArgs {
    /// Execute the create command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CliError::validation("Activity title cannot be empty"));
        }
        let max = ctx.config.sorting.max_title_len;
        if title.chars().count() > max {
            return Err(CliError::validation(format!(
                "Activity title exceeds maximum length of {max} characters"
            )));
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(CliError::validation("Category titles cannot be empty"));
        }

        let mut repo = ctx.open_repository();
        let id = repo.create_activity(title, &self.categories, self.orientation)?;

        if self.quiet {
            println!("{id}");
        } else {
            println!("Activity '{title}' created: {id}");
        }
        Ok(())
    }
}

impl DeleteActivityArgs {
    /// Execute the delete command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut repo = ctx.open_repository();
        require_activity(&repo, &self.id)?;
        repo.delete_activity(&self.id)?;
        println!("Activity '{}' deleted.", self.id);
        Ok(())
    }
}

impl DeleteAllArgs {
    /// Execute the delete-all command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        if !self.yes {
            return Err(CliError::validation(
                "Refusing to delete everything without --yes",
            ));
        }
        let mut repo = ctx.open_repository();
        let count = repo.activities().len();
        repo.delete_all()?;
        println!("Deleted {count} activities.");
        Ok(())
    }
}
