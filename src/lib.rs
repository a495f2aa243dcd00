//! NASA imagery viewer: APOD, EPIC and Mars rover photos with rover date availability
pub mod availability;
pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use availability::compute_availability;
pub use domain::{Manifest, ManifestSol, RoverAvailability, RoverName};
pub use errors::{ApiError, AvailabilityError};
