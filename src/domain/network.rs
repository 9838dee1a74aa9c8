//! Undirected city network with symmetric adjacency.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::city::City;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::view::{GraphLink, GraphNode, GraphView, TreeView};

/// What `add_city` does when the name is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateCityPolicy {
    /// Fail with [`DomainError::DuplicateCity`].
    #[default]
    Reject,
    /// Replace the city in place; its zones and edges are dropped.
    Replace,
}

/// Graph of cities keyed by name.
///
/// Invariants:
/// - `cities` and `adjacency` hold exactly the same names
/// - `b ∈ adjacency[a]` iff `a ∈ adjacency[b]`
#[derive(Debug, Clone, Default)]
pub struct CityNetwork {
    /// Cities in insertion order
    cities: Vec<City>,
    adjacency: BTreeMap<String, BTreeSet<String>>,
    policy: DuplicateCityPolicy,
}

impl CityNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicateCityPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> DuplicateCityPolicy {
        self.policy
    }

    #[instrument(level = "debug", skip(self, city), fields(city = %city.name))]
    pub fn add_city(&mut self, city: City) -> DomainResult<()> {
        match self.position(&city.name) {
            None => {
                debug!("adding city");
                self.adjacency.insert(city.name.clone(), BTreeSet::new());
                self.cities.push(city);
            }
            Some(_) if self.policy == DuplicateCityPolicy::Reject => {
                return Err(DomainError::DuplicateCity(city.name));
            }
            Some(idx) => {
                debug!("replacing existing city");
                self.scrub_edges(&city.name);
                self.adjacency.insert(city.name.clone(), BTreeSet::new());
                self.cities[idx] = city;
            }
        }
        Ok(())
    }

    /// Removes the city and every edge touching it. Unknown names are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_city(&mut self, name: &str) {
        let Some(idx) = self.position(name) else {
            trace!("unknown city, nothing to remove");
            return;
        };
        self.cities.remove(idx);
        self.adjacency.remove(name);
        for neighbors in self.adjacency.values_mut() {
            neighbors.remove(name);
        }
    }

    /// Adds the undirected edge `a`–`b`. Both cities must exist; reconnecting is a no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn connect_cities(&mut self, a: &str, b: &str) -> DomainResult<()> {
        for endpoint in [a, b] {
            if !self.contains(endpoint) {
                return Err(DomainError::EdgeEndpointNotFound {
                    a: a.to_string(),
                    b: b.to_string(),
                    missing: endpoint.to_string(),
                });
            }
        }
        self.link(a, b);
        self.link(b, a);
        Ok(())
    }

    /// Removes the edge `a`–`b` if present; unknown cities and missing edges are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn disconnect_cities(&mut self, a: &str, b: &str) {
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.remove(b);
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            neighbors.remove(a);
        }
    }

    /// Neighbors of `name` in lexical order; empty for unknown or isolated cities.
    pub fn connected_cities(&self, name: &str) -> Vec<String> {
        self.adjacency
            .get(name)
            .map(|neighbors| neighbors.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(b))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|city| city.name == name)
    }

    pub fn city_mut(&mut self, name: &str) -> Option<&mut City> {
        self.cities.iter_mut().find(|city| city.name == name)
    }

    /// Cities in insertion order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Number of undirected edges between distinct cities.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_green_zone(
        &mut self,
        city: &str,
        zone_name: &str,
        parent: Option<&str>,
    ) -> DomainResult<()> {
        self.require_city_mut(city)?.place_zone(zone_name, parent)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn rename_zone(&mut self, city: &str, old_name: &str, new_name: &str) -> DomainResult<()> {
        self.require_city_mut(city)?.rename_zone(old_name, new_name)
    }

    pub fn max_green_zone_height(&self, city: &str) -> DomainResult<usize> {
        Ok(self.require_city(city)?.max_green_zone_height())
    }

    pub fn total_green_zones(&self, city: &str) -> DomainResult<usize> {
        Ok(self.require_city(city)?.total_green_zones())
    }

    pub fn zone_tree_view(&self, city: &str) -> DomainResult<TreeView> {
        Ok(self.require_city(city)?.to_tree_view())
    }

    /// Nodes in insertion order, each edge once with `source < target`.
    #[instrument(level = "debug", skip(self))]
    pub fn to_graph_view(&self) -> GraphView {
        let nodes = self
            .cities
            .iter()
            .map(|city| GraphNode {
                id: city.name.clone(),
                label: city.name.clone(),
            })
            .collect();
        let links = self
            .edges()
            .map(|(source, target)| GraphLink {
                source: source.to_string(),
                target: target.to_string(),
            })
            .collect();
        GraphView { nodes, links }
    }

    /// Each undirected edge once, walking cities in insertion order.
    ///
    /// Self-loops are skipped: they never satisfy `source < target`.
    fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cities.iter().flat_map(move |city| {
            let source = city.name.as_str();
            self.adjacency
                .get(source)
                .into_iter()
                .flatten()
                .map(String::as_str)
                .filter(move |target| source < *target)
                .map(move |target| (source, target))
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.cities.iter().position(|city| city.name == name)
    }

    fn require_city(&self, name: &str) -> DomainResult<&City> {
        self.city(name)
            .ok_or_else(|| DomainError::CityNotFound(name.to_string()))
    }

    fn require_city_mut(&mut self, name: &str) -> DomainResult<&mut City> {
        self.city_mut(name)
            .ok_or_else(|| DomainError::CityNotFound(name.to_string()))
    }

    fn link(&mut self, from: &str, to: &str) {
        if let Some(neighbors) = self.adjacency.get_mut(from) {
            neighbors.insert(to.to_string());
        }
    }

    fn scrub_edges(&mut self, name: &str) {
        for neighbor in self.connected_cities(name) {
            self.disconnect_cities(name, &neighbor);
        }
    }
}
