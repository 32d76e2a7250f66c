//! Business logic services

pub mod equipment;
pub mod export;
pub mod home;
pub mod interventions;
pub mod locations;
pub mod lookups;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub equipment: equipment::EquipmentService,
    pub interventions: interventions::InterventionsService,
    pub locations: locations::LocationsService,
    pub lookups: lookups::LookupsService,
    pub home: home::HomeService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            equipment: equipment::EquipmentService::new(repository.clone()),
            interventions: interventions::InterventionsService::new(repository.clone()),
            locations: locations::LocationsService::new(repository.clone()),
            lookups: lookups::LookupsService::new(repository.clone()),
            home: home::HomeService::new(repository),
        }
    }
}
