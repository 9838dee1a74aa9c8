//! City network with hierarchical green zones.
//!
//! - [`domain`]: the network graph, the per-city zone forest and their views
//! - [`application`]: session state and line-oriented action scripts
//! - [`config`]: layered settings
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{Action, NetworkSession};
pub use domain::{City, CityNetwork, DomainError, GraphView, TreeView, Zone};
