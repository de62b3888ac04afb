pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use crate::core::ConfigProvider;
    use crate::domain::model::Location;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_file_extension, validate_path, validate_required_field, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "reef-chain")]
    #[command(about = "Checks whether eight species can sustain a food chain at a location")]
    pub struct CliConfig {
        /// Species catalog CSV
        #[arg(long, default_value = "data/species.csv")]
        pub catalog: String,

        /// Catalog names of the selected species
        #[arg(long, value_delimiter = ',')]
        pub species: Vec<String>,

        /// JSON request file with full species records and a location
        #[arg(long, conflicts_with = "species")]
        pub request: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        pub depth: Option<i64>,

        #[arg(long, allow_hyphen_values = true)]
        pub temperature: Option<f64>,

        #[arg(long, default_value = "35.0")]
        pub salinity: f64,

        /// Append a validation event to this JSON lines file
        #[arg(long)]
        pub telemetry_log: Option<String>,

        /// Print the catalog and exit
        #[arg(long)]
        pub list: bool,

        /// Emit logs as JSON lines
        #[arg(long)]
        pub json_logs: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        pub fn location(&self) -> Result<Location> {
            Ok(Location {
                depth: *validate_required_field("depth", &self.depth)?,
                temperature: *validate_required_field("temperature", &self.temperature)?,
                salinity: self.salinity,
            })
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(request) = &self.request {
                return validate_path("request", request);
            }

            validate_path("catalog", &self.catalog)?;
            validate_file_extension("catalog", &self.catalog, &["csv"])?;
            if let Some(log) = &self.telemetry_log {
                validate_path("telemetry_log", log)?;
            }
            if !self.list {
                self.location()?;
            }
            Ok(())
        }
    }

    impl ConfigProvider for CliConfig {
        fn catalog_path(&self) -> &str {
            &self.catalog
        }

        fn telemetry_log(&self) -> Option<&str> {
            self.telemetry_log.as_deref()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_species_list() {
            let config = CliConfig::parse_from([
                "reef-chain",
                "--species",
                "Kelp,Urchin,Otter",
                "--depth",
                "5",
                "--temperature",
                "-1.5",
            ]);
            assert_eq!(config.species, vec!["Kelp", "Urchin", "Otter"]);
            assert_eq!(config.location().unwrap().temperature, -1.5);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_missing_location_is_invalid() {
            let config = CliConfig::parse_from(["reef-chain", "--species", "Kelp"]);
            assert!(config.validate().is_err());

            let listing = CliConfig::parse_from(["reef-chain", "--list"]);
            assert!(listing.validate().is_ok());
        }
    }
}
