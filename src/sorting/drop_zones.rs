//! Drop zone hit-testing.
//!
//! Each droppable region (the tray and every category) registers its current
//! screen rectangle. Lookups scan zones in registration order and the first
//! rectangle containing the point wins, so overlapping zones resolve to the
//! one registered earliest. Re-registering a zone updates its rectangle but
//! keeps its original position in that order.

use crate::constants::{CATEGORY_ZONE_PREFIX, TRAY_ZONE_ID};
use crate::models::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Axis-aligned rectangle in the shared screen coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width (may be zero or negative during layout)
    pub width: f32,
    /// Height (may be zero or negative during layout)
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive on all four edges.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

impl FromStr for Rect {
    type Err = String;

    /// Parses `x,y,width,height`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f32> = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<f32>()
                    .map_err(|_| format!("invalid number '{}' in rectangle '{s}'", p.trim()))
            })
            .collect::<Result<_, _>>()?;

        match parts.as_slice() {
            [x, y, width, height] => Ok(Self::new(*x, *y, *width, *height)),
            _ => Err(format!(
                "rectangle '{s}' must have four components: x,y,width,height"
            )),
        }
    }
}

/// Identifier of a drop zone: `tray` or `category-<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ZoneId {
    /// The unsorted tray
    Tray,
    /// The category with this id
    Category(String),
}

impl ZoneId {
    /// Zone of the category `id`.
    pub fn category(id: impl Into<String>) -> Self {
        Self::Category(id.into())
    }

    /// The placement a drop on this zone targets.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::Tray => Location::Unsorted,
            Self::Category(id) => Location::InCategory(id.clone()),
        }
    }
}

impl From<&Location> for ZoneId {
    fn from(location: &Location) -> Self {
        match location {
            Location::Unsorted => Self::Tray,
            Location::InCategory(id) => Self::Category(id.clone()),
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tray => f.write_str(TRAY_ZONE_ID),
            Self::Category(id) => write!(f, "{CATEGORY_ZONE_PREFIX}{id}"),
        }
    }
}

impl FromStr for ZoneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == TRAY_ZONE_ID {
            return Ok(Self::Tray);
        }
        match s.strip_prefix(CATEGORY_ZONE_PREFIX) {
            Some(id) if !id.is_empty() => Ok(Self::Category(id.to_string())),
            _ => Err(format!(
                "unknown zone '{s}' (expected '{TRAY_ZONE_ID}' or '{CATEGORY_ZONE_PREFIX}<id>')"
            )),
        }
    }
}

/// Registered zones in registration order.
///
/// Lives for one sorting session; never fails.
#[derive(Debug, Clone, Default)]
pub struct DropZoneRegistry {
    zones: Vec<(ZoneId, Rect)>,
}

impl DropZoneRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the rectangle for `id`.
    pub fn register_zone(&mut self, id: ZoneId, rect: Rect) {
        if let Some(entry) = self.zones.iter_mut().find(|(zone, _)| *zone == id) {
            entry.1 = rect;
        } else {
            self.zones.push((id, rect));
        }
    }

    /// Removes `id`; absent ids are ignored.
    pub fn unregister_zone(&mut self, id: &ZoneId) {
        self.zones.retain(|(zone, _)| zone != id);
    }

    /// First registered zone whose rectangle contains the point.
    #[must_use]
    pub fn find_zone_at_point(&self, x: f32, y: f32) -> Option<&ZoneId> {
        self.zones
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(zone, _)| zone)
    }

    /// Current rectangle of a zone.
    #[must_use]
    pub fn rect(&self, id: &ZoneId) -> Option<Rect> {
        self.zones
            .iter()
            .find(|(zone, _)| zone == id)
            .map(|(_, rect)| *rect)
    }

    /// Number of registered zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
