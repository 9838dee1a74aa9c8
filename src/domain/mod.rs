//! Domain layer: city network, green zone forest and their views
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod city;
pub mod error;
pub mod network;
pub mod view;
pub mod zone;

pub use city::City;
pub use error::{DomainError, DomainResult};
pub use network::{CityNetwork, DuplicateCityPolicy};
pub use view::{GraphLink, GraphNode, GraphView, TreeView, TreeViewConvert};
pub use zone::{find_zone, find_zone_mut, Zone, ZoneIter};
