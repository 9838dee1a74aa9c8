//! Session: an owned network plus the state a presentation layer shows.
//!
//! The session replaces a global store. Callers own it, dispatch [`Action`]s,
//! and read back the latest error and the selected city.

use tracing::{debug, instrument, warn};

use crate::application::action::Action;
use crate::application::ApplicationResult;
use crate::domain::{City, CityNetwork, DomainResult, DuplicateCityPolicy};

#[derive(Debug, Default)]
pub struct NetworkSession {
    network: CityNetwork,
    selected_city: Option<String>,
    last_error: Option<String>,
}

impl NetworkSession {
    pub fn new(policy: DuplicateCityPolicy) -> Self {
        Self {
            network: CityNetwork::with_policy(policy),
            ..Self::default()
        }
    }

    pub fn network(&self) -> &CityNetwork {
        &self.network
    }

    pub fn selected_city(&self) -> Option<&str> {
        self.selected_city.as_deref()
    }

    /// Message of the most recent failed action.
    ///
    /// Cleared by the next successful network action or by [`Action::ClearError`];
    /// selecting a city leaves it in place.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Applies `action`, recording its outcome in `last_error`.
    #[instrument(level = "debug", skip(self, action), fields(action = %action))]
    pub fn apply(&mut self, action: Action) -> ApplicationResult<()> {
        if let Action::SelectCity(name) = action {
            self.selected_city = name;
            return Ok(());
        }
        match self.dispatch(action) {
            Ok(()) => {
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "action failed");
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    fn dispatch(&mut self, action: Action) -> DomainResult<()> {
        match action {
            Action::AddCity(name) => self.network.add_city(City::new(name)),
            Action::RemoveCity(name) => {
                self.network.remove_city(&name);
                if self.selected_city.as_deref() == Some(name.as_str()) {
                    debug!("removed city was selected, clearing selection");
                    self.selected_city = None;
                }
                Ok(())
            }
            Action::ConnectCities { a, b } => self.network.connect_cities(&a, &b),
            Action::DisconnectCities { a, b } => {
                self.network.disconnect_cities(&a, &b);
                Ok(())
            }
            Action::AddGreenZone { city, zone, parent } => {
                self.network
                    .add_green_zone(&city, &zone, parent.as_deref())
            }
            Action::RenameZone {
                city,
                old_name,
                new_name,
            } => self.network.rename_zone(&city, &old_name, &new_name),
            Action::SelectCity(_) | Action::ClearError => Ok(()),
        }
    }
}
