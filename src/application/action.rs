//! Mutations a presentation layer can request from a session.

use std::fmt;

/// One user-level operation on the network or on session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddCity(String),
    RemoveCity(String),
    ConnectCities {
        a: String,
        b: String,
    },
    DisconnectCities {
        a: String,
        b: String,
    },
    AddGreenZone {
        city: String,
        zone: String,
        parent: Option<String>,
    },
    RenameZone {
        city: String,
        old_name: String,
        new_name: String,
    },
    SelectCity(Option<String>),
    ClearError,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddCity(name) => write!(f, "add city {name}"),
            Action::RemoveCity(name) => write!(f, "remove city {name}"),
            Action::ConnectCities { a, b } => write!(f, "connect {a} <-> {b}"),
            Action::DisconnectCities { a, b } => write!(f, "disconnect {a} <-> {b}"),
            Action::AddGreenZone {
                city,
                zone,
                parent: Some(parent),
            } => write!(f, "add zone {zone} under {parent} in {city}"),
            Action::AddGreenZone { city, zone, .. } => write!(f, "add zone {zone} in {city}"),
            Action::RenameZone {
                city,
                old_name,
                new_name,
            } => write!(f, "rename zone {old_name} -> {new_name} in {city}"),
            Action::SelectCity(Some(name)) => write!(f, "select {name}"),
            Action::SelectCity(None) => write!(f, "clear selection"),
            Action::ClearError => write!(f, "clear error"),
        }
    }
}
