//! Category management commands for activities.
//!
//! Provides commands to list, add, delete, rename and decorate the categories
//! of an activity.

use crate::cli::common::{
    print_json, require_activity, require_category, CliContext, CliError, CliResult,
};
use crate::models::color_palette::category_color_name;
use crate::models::Location;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Manage categories in an activity
#[derive(Debug, Clone, Args)]
pub struct CategoryArgs {
    /// Category subcommand
    #[command(subcommand)]
    pub command: CategoryCommand,
}

/// Category management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum CategoryCommand {
    /// List the categories of an activity
    List(ListCategoriesArgs),
    /// Append a category
    Add(AddCategoryArgs),
    /// Delete a category, returning its items to the tray
    Delete(DeleteCategoryArgs),
    /// Rename a category
    Rename(RenameCategoryArgs),
    /// Set a category's header picture
    Header(HeaderArgs),
}

/// List the categories of an activity
#[derive(Debug, Clone, Args)]
pub struct ListCategoriesArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Append a category
#[derive(Debug, Clone, Args)]
pub struct AddCategoryArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Category title
    #[arg(long)]
    pub title: String,
}

/// Delete a category
#[derive(Debug, Clone, Args)]
pub struct DeleteCategoryArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Category ID to delete
    #[arg(long, value_name = "ID")]
    pub id: String,
}

/// Rename a category
#[derive(Debug, Clone, Args)]
pub struct RenameCategoryArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Category ID
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: String,
}

/// Set a category's header picture
#[derive(Debug, Clone, Args)]
pub struct HeaderArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Category ID
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Picture file to copy into the activity
    #[arg(long, value_name = "FILE")]
    pub image: PathBuf,
}

// JSON response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategorySummary {
    id: String,
    title: String,
    color: String,
    color_name: &'static str,
    header_image: Option<String>,
    items: usize,
}

#[derive(Debug, Serialize)]
struct ListCategoriesResponse {
    categories: Vec<CategorySummary>,
    count: usize,
}

impl CategoryArgs {
    /// Execute the category command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            CategoryCommand::List(args) => args.execute(ctx),
            CategoryCommand::Add(args) => args.execute(ctx),
            CategoryCommand::Delete(args) => args.execute(ctx),
            CategoryCommand::Rename(args) => args.execute(ctx),
            CategoryCommand::Header(args) => args.execute(ctx),
        }
    }
}

fn validate_title(title: &str) -> CliResult<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CliError::validation("Category title cannot be empty"));
    }
    Ok(title)
}

impl ListCategoriesArgs {
    /// Execute the list command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let repo = ctx.open_repository();
        let activity = require_activity(&repo, &self.activity)?;

        let categories: Vec<CategorySummary> = activity
            .categories
            .iter()
            .map(|c| CategorySummary {
                id: c.id.clone(),
                title: c.title.clone(),
                color: c.color().to_hex(),
                color_name: category_color_name(c.color_index),
                header_image: c.header_image.as_ref().map(ToString::to_string),
                items: activity.count_in(&Location::category(c.id.clone())),
            })
            .collect();

        let response = ListCategoriesResponse {
            count: categories.len(),
            categories,
        };

        if self.json {
            print_json(&response)?;
        } else {
            println!("Categories in '{}':", activity.title);
            println!();
            for c in &response.categories {
                println!(
                    "  {:<38} {:<26} {} {:<7} {} items",
                    c.id, c.title, c.color, c.color_name, c.items
                );
            }
            println!();
            println!("Total: {} categories", response.count);
        }
        Ok(())
    }
}

impl AddCategoryArgs {
    /// Execute the add command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let title = validate_title(&self.title)?;
        let mut repo = ctx.open_repository();
        require_activity(&repo, &self.activity)?;

        repo.add_category(&self.activity, title)?;
        println!("Category '{title}' added.");
        Ok(())
    }
}

impl DeleteCategoryArgs {
    /// Execute the delete command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut repo = ctx.open_repository();
        let activity = require_activity(&repo, &self.activity)?;
        require_category(activity, &self.id)?;

        let policy = repo.engine().policy();
        if !policy.can_delete(activity) {
            return Err(CliError::validation(format!(
                "Cannot delete category: an activity needs at least {} {}",
                policy.min_categories,
                if policy.min_categories == 1 {
                    "category"
                } else {
                    "categories"
                }
            )));
        }

        let moved = activity.count_in(&Location::category(self.id.clone()));
        repo.delete_category(&self.activity, &self.id)?;
        println!(
            "Category '{}' deleted; {moved} items returned to the tray.",
            self.id
        );
        Ok(())
    }
}

impl RenameCategoryArgs {
    /// Execute the rename command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let title = validate_title(&self.title)?;
        let mut repo = ctx.open_repository();
        require_category(require_activity(&repo, &self.activity)?, &self.id)?;

        repo.rename_category(&self.activity, &self.id, title)?;
        println!("Category '{}' renamed to '{title}'.", self.id);
        Ok(())
    }
}

impl HeaderArgs {
    /// Execute the header command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        if !self.image.is_file() {
            return Err(CliError::validation(format!(
                "Image file not found: {}",
                self.image.display()
            )));
        }
        let mut repo = ctx.open_repository();
        require_category(require_activity(&repo, &self.activity)?, &self.id)?;

        if repo.set_header_image(&self.activity, &self.id, Some(&self.image))? {
            println!("Header picture set for category '{}'.", self.id);
        } else {
            println!("No header picture selected.");
        }
        Ok(())
    }
}
