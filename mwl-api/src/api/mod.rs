//! HTTP API handlers for mwl-api

pub mod health;
pub mod logs;
pub mod sightings;
pub mod species;
pub mod userlogs;
pub mod users;

pub use health::health_routes;
pub use logs::log_routes;
pub use sightings::sighting_routes;
pub use species::species_routes;
pub use userlogs::userlog_routes;
pub use users::user_routes;
