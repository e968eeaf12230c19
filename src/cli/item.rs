//! Item commands: adding pictures, moving them between the tray and categories,
//! and simulating a drag-and-drop gesture against a set of drop zones.

use crate::cli::common::{
    describe_location, print_json, require_activity, require_item, CliContext, CliError,
    CliResult,
};
use crate::constants::TRAY_ZONE_ID;
use crate::models::{Activity, Location};
use crate::sorting::{
    DragCoordinator, DropOutcome, DropZoneRegistry, NoopObserver, Point, Rect, ZoneId,
};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Manage items in an activity
#[derive(Debug, Clone, Args)]
pub struct ItemArgs {
    /// Item subcommand
    #[command(subcommand)]
    pub command: ItemCommand,
}

/// Item subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ItemCommand {
    /// List items with their placement
    List(ListItemsArgs),
    /// Add a picture to the end of the tray
    Add(AddItemArgs),
    /// Delete an item and its picture
    Delete(DeleteItemArgs),
    /// Move an item to the tray or a category
    Move(MoveItemArgs),
    /// Drop an item at a point, resolving the target from drop zones
    Drop(DropItemArgs),
}

/// List items with their placement
#[derive(Debug, Clone, Args)]
pub struct ListItemsArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Add a picture to the tray
#[derive(Debug, Clone, Args)]
pub struct AddItemArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Picture file to copy into the activity
    #[arg(long, value_name = "FILE")]
    pub image: PathBuf,

    /// Print only the new item ID
    #[arg(long)]
    pub quiet: bool,
}

/// Delete an item
#[derive(Debug, Clone, Args)]
pub struct DeleteItemArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Item ID
    #[arg(long, value_name = "ID")]
    pub item: String,
}

/// Move an item
#[derive(Debug, Clone, Args)]
pub struct MoveItemArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Item ID
    #[arg(long, value_name = "ID")]
    pub item: String,

    /// Target: `tray`, a category ID, or `category-<id>`
    #[arg(long, value_name = "TARGET")]
    pub to: String,

    /// Zero-based slot in the target (default: end)
    #[arg(long, value_name = "N")]
    pub position: Option<usize>,
}

/// A drop zone given on the command line as `ZONE=x,y,width,height`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSpec {
    /// Zone identifier
    pub zone: ZoneId,
    /// Zone rectangle
    pub rect: Rect,
}

fn parse_zone_spec(s: &str) -> Result<ZoneSpec, String> {
    let (zone, rect) = s
        .split_once('=')
        .ok_or_else(|| format!("zone '{s}' must look like ZONE=x,y,width,height"))?;
    Ok(ZoneSpec {
        zone: zone.trim().parse()?,
        rect: rect.parse()?,
    })
}

/// Drop an item at a point
#[derive(Debug, Clone, Args)]
pub struct DropItemArgs {
    /// Activity ID
    #[arg(short, long, value_name = "ID")]
    pub activity: String,

    /// Item ID
    #[arg(long, value_name = "ID")]
    pub item: String,

    /// Drop zone (repeatable; earlier zones win where they overlap)
    #[arg(long = "zone", value_name = "ZONE=X,Y,W,H", value_parser = parse_zone_spec)]
    pub zones: Vec<ZoneSpec>,

    /// Release X coordinate
    #[arg(long, allow_negative_numbers = true)]
    pub x: f32,

    /// Release Y coordinate
    #[arg(long, allow_negative_numbers = true)]
    pub y: f32,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

// JSON response types
#[derive(Debug, Serialize)]
struct ItemSummary {
    id: String,
    image: String,
    location: String,
    order: usize,
}

#[derive(Debug, Serialize)]
struct ListItemsResponse {
    items: Vec<ItemSummary>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct DropResponse {
    zone: Option<String>,
    location: String,
    order: usize,
}

impl ItemArgs {
    /// Execute the item command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            ItemCommand::List(args) => args.execute(ctx),
            ItemCommand::Add(args) => args.execute(ctx),
            ItemCommand::Delete(args) => args.execute(ctx),
            ItemCommand::Move(args) => args.execute(ctx),
            ItemCommand::Drop(args) => args.execute(ctx),
        }
    }
}

fn location_key(location: &Location) -> String {
    location
        .category_id()
        .map_or_else(|| TRAY_ZONE_ID.to_string(), ToString::to_string)
}

/// Resolves a `--to` argument against the activity's categories.
fn parse_target(activity: &Activity, target: &str) -> CliResult<Location> {
    if target == TRAY_ZONE_ID {
        return Ok(Location::Unsorted);
    }
    let location = if activity.category(target).is_some() {
        Location::category(target)
    } else {
        target
            .parse::<ZoneId>()
            .map(|zone| zone.location())
            .unwrap_or_else(|_| Location::category(target))
    };
    if !activity.location_exists(&location) {
        return Err(CliError::not_found(format!(
            "Category '{target}' not found in activity '{}'",
            activity.id
        )));
    }
    Ok(location)
}

impl ListItemsArgs {
    /// Execute the list command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let repo = ctx.open_repository();
        let activity = require_activity(&repo, &self.activity)?;

        let mut locations = vec![Location::Unsorted];
        locations.extend(
            activity
                .categories
                .iter()
                .map(|c| Location::category(c.id.clone())),
        );

        let items: Vec<ItemSummary> = locations
            .iter()
            .flat_map(|location| activity.items_in(location))
            .map(|item| ItemSummary {
                id: item.id.clone(),
                image: item.image.to_string(),
                location: location_key(&item.location),
                order: item.order,
            })
            .collect();

        let response = ListItemsResponse {
            count: items.len(),
            items,
        };

        if self.json {
            print_json(&response)?;
        } else {
            for location in &locations {
                println!("{}:", describe_location(activity, location));
                for item in activity.items_in(location) {
                    println!("  {:>3}. {}  {}", item.order, item.id, item.image);
                }
            }
        }
        Ok(())
    }
}

impl AddItemArgs {
    /// Execute the add command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        if !self.image.is_file() {
            return Err(CliError::validation(format!(
                "Image file not found: {}",
                self.image.display()
            )));
        }
        let mut repo = ctx.open_repository();
        require_activity(&repo, &self.activity)?;

        match repo.add_item(&self.activity, Some(&self.image))? {
            Some(id) if self.quiet => println!("{id}"),
            Some(id) => println!("Item added to the tray: {id}"),
            None => println!("No picture selected."),
        }
        Ok(())
    }
}

impl DeleteItemArgs {
    /// Execute the delete command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut repo = ctx.open_repository();
        require_item(require_activity(&repo, &self.activity)?, &self.item)?;

        repo.delete_item(&self.activity, &self.item)?;
        println!("Item '{}' deleted.", self.item);
        Ok(())
    }
}

impl MoveItemArgs {
    /// Execute the move command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut repo = ctx.open_repository();
        let activity = require_activity(&repo, &self.activity)?;
        require_item(activity, &self.item)?;
        let target = parse_target(activity, &self.to)?;
        let name = describe_location(activity, &target);

        match self.position {
            Some(position) => {
                repo.move_item_with_order(&self.activity, &self.item, &target, position)?;
            }
            None => repo.move_item(&self.activity, &self.item, &target)?,
        }

        let order = repo
            .activity(&self.activity)
            .and_then(|a| a.item(&self.item))
            .map_or(0, |i| i.order);
        println!("Item '{}' is now at position {order} in {name}.", self.item);
        Ok(())
    }
}

impl DropItemArgs {
    /// Execute the drop command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut repo = ctx.open_repository();
        let activity = require_activity(&repo, &self.activity)?;
        let current = activity
            .item(&self.item)
            .ok_or_else(|| {
                CliError::not_found(format!(
                    "Item '{}' not found in activity '{}'",
                    self.item, activity.id
                ))
            })?
            .location
            .clone();

        let mut registry = DropZoneRegistry::new();
        for spec in &self.zones {
            registry.register_zone(spec.zone.clone(), spec.rect);
        }

        // The gesture starts from the centre of the item's own zone when known.
        let drop_point = Point::new(self.x, self.y);
        let start = registry
            .rect(&ZoneId::from(&current))
            .map_or(drop_point, |r| {
                Point::new(r.x + r.width / 2.0, r.y + r.height / 2.0)
            });

        let mut coordinator = DragCoordinator::new(NoopObserver);
        coordinator.begin(&self.item, start);
        coordinator.update(&self.item, drop_point);
        let outcome = coordinator.end(
            &self.item,
            drop_point,
            activity,
            &registry,
            repo.engine(),
        );

        let zone = match outcome {
            DropOutcome::Dropped { zone, activity } => {
                repo.replace(activity)?;
                Some(zone)
            }
            DropOutcome::Missed | DropOutcome::Ignored => None,
        };

        let (location, order) = repo
            .activity(&self.activity)
            .and_then(|a| a.item(&self.item))
            .map_or((current, 0), |i| (i.location.clone(), i.order));

        if self.json {
            return print_json(&DropResponse {
                zone: zone.as_ref().map(ToString::to_string),
                location: location_key(&location),
                order,
            });
        }

        match zone {
            Some(zone) => println!(
                "Dropped on {zone}; item '{}' is at position {order} in {location}.",
                self.item
            ),
            None => println!(
                "No drop zone at ({}, {}); item '{}' unchanged.",
                self.x, self.y, self.item
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zone_spec() {
        let spec = parse_zone_spec("category-c1=0,0,100,50").unwrap();
        assert_eq!(spec.zone, ZoneId::category("c1"));
        assert_eq!(spec.rect, Rect::new(0.0, 0.0, 100.0, 50.0));

        let tray = parse_zone_spec("tray = 0,600,400,200").unwrap();
        assert_eq!(tray.zone, ZoneId::Tray);

        assert!(parse_zone_spec("tray").is_err());
        assert!(parse_zone_spec("shelf=0,0,1,1").is_err());
        assert!(parse_zone_spec("tray=0,0,1").is_err());
    }

    #[test]
    fn test_location_key() {
        assert_eq!(location_key(&Location::Unsorted), "tray");
        assert_eq!(location_key(&Location::category("c1")), "c1");
    }
}
