//! A city and its forest of green zones.

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::view::TreeView;
use crate::domain::zone::{find_zone, find_zone_mut, Zone, ZoneIter};

/// A named city owning an ordered forest of root zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub name: String,
    pub green_zones: Vec<Zone>,
}

impl City {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            green_zones: Vec::new(),
        }
    }

    /// Appends a root zone.
    pub fn add_green_zone(&mut self, zone: Zone) {
        self.green_zones.push(zone);
    }

    /// Removes root zones named `name` (shallow); returns how many were removed.
    pub fn remove_green_zone(&mut self, name: &str) -> usize {
        let before = self.green_zones.len();
        self.green_zones.retain(|zone| zone.name != name);
        before - self.green_zones.len()
    }

    /// Attaches a new zone as the last child of the first zone named `parent`
    /// in pre-order, or as a new root when `parent` is `None` or empty.
    #[instrument(level = "debug", skip(self), fields(city = %self.name))]
    pub fn place_zone(&mut self, zone_name: &str, parent: Option<&str>) -> DomainResult<()> {
        match parent.filter(|p| !p.is_empty()) {
            None => {
                debug!("adding root zone");
                self.add_green_zone(Zone::new(zone_name));
            }
            Some(parent_name) => {
                let city = &self.name;
                let parent_zone = find_zone_mut(&mut self.green_zones, parent_name).ok_or_else(
                    || DomainError::ParentNotFound {
                        city: city.clone(),
                        parent: parent_name.to_string(),
                    },
                )?;
                debug!(parent = parent_name, "adding subzone");
                parent_zone.add_subzone(Zone::new(zone_name));
            }
        }
        Ok(())
    }

    /// Renames the first zone named `old_name` in pre-order, keeping its position
    /// and subzones.
    #[instrument(level = "debug", skip(self), fields(city = %self.name))]
    pub fn rename_zone(&mut self, old_name: &str, new_name: &str) -> DomainResult<()> {
        let city = &self.name;
        let zone = find_zone_mut(&mut self.green_zones, old_name).ok_or_else(|| {
            DomainError::ZoneNotFound {
                city: city.clone(),
                zone: old_name.to_string(),
            }
        })?;
        zone.name = new_name.to_string();
        Ok(())
    }

    pub fn find_zone(&self, name: &str) -> Option<&Zone> {
        find_zone(&self.green_zones, name)
    }

    /// All zones of the forest in pre-order.
    pub fn zones(&self) -> ZoneIter<'_> {
        ZoneIter::new(&self.green_zones)
    }

    /// 0 for an empty forest, otherwise the tallest root tree.
    pub fn max_green_zone_height(&self) -> usize {
        self.green_zones
            .iter()
            .map(Zone::max_height)
            .max()
            .unwrap_or(0)
    }

    pub fn total_green_zones(&self) -> usize {
        self.green_zones.iter().map(Zone::total_zones).sum()
    }

    /// `{name: <city>, children: <root zones>}`.
    pub fn to_tree_view(&self) -> TreeView {
        TreeView {
            name: self.name.clone(),
            children: self.green_zones.iter().map(Zone::to_tree_view).collect(),
        }
    }
}
