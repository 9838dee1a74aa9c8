//! Green zone hierarchy: an ordered forest of named, exclusively owned nodes.

use std::fmt;

use tracing::{instrument, trace};

use crate::domain::view::TreeView;

/// A named green zone with its ordered subzones.
///
/// Each zone is owned by exactly one parent (or by its city as a root), so the
/// hierarchy is acyclic by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub name: String,
    pub subzones: Vec<Zone>,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subzones: Vec::new(),
        }
    }

    /// Builder-style variant of [`Zone::add_subzone`].
    pub fn with_subzone(mut self, zone: Zone) -> Self {
        self.add_subzone(zone);
        self
    }

    #[instrument(level = "trace", skip(self, zone), fields(parent = %self.name, child = %zone.name))]
    pub fn add_subzone(&mut self, zone: Zone) {
        self.subzones.push(zone);
    }

    /// Removes every immediate child named `name`, together with its subtree.
    ///
    /// Does not descend: grandchildren with that name are kept.
    /// Returns the number of removed children.
    #[instrument(level = "trace", skip(self), fields(parent = %self.name))]
    pub fn remove_subzone_by_name(&mut self, name: &str) -> usize {
        let before = self.subzones.len();
        self.subzones.retain(|zone| zone.name != name);
        before - self.subzones.len()
    }

    /// Height of the subtree rooted here; a zone without subzones has height 1.
    pub fn max_height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((zone, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(zone.subzones.iter().map(|child| (child, depth + 1)));
        }
        height
    }

    /// Number of zones in the subtree, this one included.
    pub fn total_zones(&self) -> usize {
        self.iter().count()
    }

    pub fn is_leaf(&self) -> bool {
        self.subzones.is_empty()
    }

    pub fn to_tree_view(&self) -> TreeView {
        TreeView {
            name: self.name.clone(),
            children: self.subzones.iter().map(Zone::to_tree_view).collect(),
        }
    }

    /// Pre-order iterator over this zone and all its descendants.
    pub fn iter(&self) -> ZoneIter<'_> {
        ZoneIter::new(std::slice::from_ref(self))
    }
}

/// Pre-order, left-to-right iterator over a forest of zones.
pub struct ZoneIter<'a> {
    stack: Vec<&'a Zone>,
}

impl<'a> ZoneIter<'a> {
    pub fn new(forest: &'a [Zone]) -> Self {
        Self {
            stack: forest.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for ZoneIter<'a> {
    type Item = &'a Zone;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(current.subzones.iter().rev());
        Some(current)
    }
}

/// First zone named `name` in pre-order over the whole forest.
pub fn find_zone<'a>(forest: &'a [Zone], name: &str) -> Option<&'a Zone> {
    ZoneIter::new(forest).find(|zone| zone.name == name)
}

/// Mutable counterpart of [`find_zone`], same traversal order and tie-break.
///
/// The search keeps its own stack; its depth is not bounded by the call stack.
pub fn find_zone_mut<'a>(forest: &'a mut [Zone], name: &str) -> Option<&'a mut Zone> {
    let mut stack: Vec<&'a mut Zone> = forest.iter_mut().rev().collect();
    while let Some(zone) = stack.pop() {
        if zone.name == name {
            return Some(zone);
        }
        stack.extend(zone.subzones.iter_mut().rev());
    }
    trace!(name, "no zone matched");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Zone> {
        vec![
            Zone::new("Park")
                .with_subzone(Zone::new("Pond").with_subzone(Zone::new("Island")))
                .with_subzone(Zone::new("Meadow")),
            Zone::new("Forest").with_subzone(Zone::new("Pond")),
        ]
    }

    #[test]
    fn given_leaf_when_measuring_then_height_is_one() {
        let zone = Zone::new("Park");
        assert_eq!(zone.max_height(), 1);
        assert_eq!(zone.total_zones(), 1);
        assert!(zone.is_leaf());
    }

    #[test]
    fn given_nested_zones_when_measuring_then_counts_whole_subtree() {
        let forest = sample();
        assert_eq!(forest[0].max_height(), 3);
        assert_eq!(forest[0].total_zones(), 4);
        assert_eq!(forest[1].max_height(), 2);
    }

    #[test]
    fn given_long_chain_when_measuring_then_height_equals_length() {
        let mut chain = Zone::new("z199");
        for i in (0..199).rev() {
            chain = Zone::new(format!("z{i}")).with_subzone(chain);
        }
        assert_eq!(chain.max_height(), 200);
        assert_eq!(chain.total_zones(), 200);
    }

    #[test]
    fn given_forest_when_iterating_then_yields_preorder() {
        let forest = sample();
        let names: Vec<&str> = ZoneIter::new(&forest).map(|z| z.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Park", "Pond", "Island", "Meadow", "Forest", "Pond"]
        );
    }

    #[test]
    fn given_zone_when_iterating_then_includes_itself_first() {
        let forest = sample();
        let names: Vec<&str> = forest[0].iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["Park", "Pond", "Island", "Meadow"]);
    }

    #[test]
    fn given_duplicate_names_when_finding_mut_then_first_preorder_match_wins() {
        let mut forest = sample();
        let pond = find_zone_mut(&mut forest, "Pond").unwrap();
        pond.name = "Lake".into();

        assert_eq!(forest[0].subzones[0].name, "Lake");
        assert_eq!(forest[0].subzones[0].subzones[0].name, "Island");
        assert_eq!(forest[1].subzones[0].name, "Pond");
    }

    #[test]
    fn given_missing_name_when_finding_then_none() {
        let mut forest = sample();
        assert!(find_zone(&forest, "Desert").is_none());
        assert!(find_zone_mut(&mut forest, "Desert").is_none());
    }

    #[test]
    fn given_grandchild_with_same_name_when_removing_then_only_direct_children_go() {
        let mut park = Zone::new("Park")
            .with_subzone(Zone::new("Pond"))
            .with_subzone(Zone::new("Meadow").with_subzone(Zone::new("Pond")));

        assert_eq!(park.remove_subzone_by_name("Pond"), 1);
        assert_eq!(park.subzones.len(), 1);
        assert_eq!(park.subzones[0].subzones[0].name, "Pond");
        assert_eq!(park.remove_subzone_by_name("Nothing"), 0);
    }
}
