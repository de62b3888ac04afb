pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::ScenarioConfig;

pub use crate::core::{
    catalog::SpeciesCatalog, service::SelectionService, telemetry::JsonlTelemetry,
    validator::validate_selection,
};
pub use domain::model::{FoodChain, Location, Species, ValidationRequest, Verdict};
pub use utils::error::{EcoError, Result};
