use crate::core::range::{RangeError, RangeInterval};
use crate::domain::model::{Location, Species};
use thiserror::Error;

/// Why a species cannot live at the chosen location.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HabitatMismatch {
    #[error("depth {depth} is outside {range}")]
    Depth { depth: i64, range: RangeInterval },

    #[error("temperature {temperature} is outside {range}")]
    Temperature {
        temperature: f64,
        range: RangeInterval,
    },

    #[error("unreadable {field}: {source}")]
    Unparseable {
        field: &'static str,
        #[source]
        source: RangeError,
    },
}

pub fn check_environment(species: &Species, location: &Location) -> Result<(), HabitatMismatch> {
    let depth = RangeInterval::parse(&species.depth_range).map_err(|source| {
        HabitatMismatch::Unparseable {
            field: "depth_range",
            source,
        }
    })?;
    if !depth.contains(location.depth as f64) {
        return Err(HabitatMismatch::Depth {
            depth: location.depth,
            range: depth,
        });
    }

    let temperature = RangeInterval::parse(&species.temperature_range).map_err(|source| {
        HabitatMismatch::Unparseable {
            field: "temperature_range",
            source,
        }
    })?;
    if !temperature.contains(location.temperature) {
        return Err(HabitatMismatch::Temperature {
            temperature: location.temperature,
            range: temperature,
        });
    }

    Ok(())
}

/// Returns the first species that cannot survive at `location`.
pub fn first_incompatible<'a>(
    species: &'a [Species],
    location: &Location,
) -> Option<(&'a Species, HabitatMismatch)> {
    species.iter().find_map(|candidate| {
        check_environment(candidate, location)
            .err()
            .map(|mismatch| (candidate, mismatch))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(depth: &str, temperature: &str) -> Species {
        Species {
            name: "Clownfish".to_string(),
            calories_provided: 100,
            calories_needed: 0,
            depth_range: depth.to_string(),
            temperature_range: temperature.to_string(),
            food_sources: vec![],
        }
    }

    fn location(depth: i64, temperature: f64) -> Location {
        Location {
            depth,
            temperature,
            salinity: 35.0,
        }
    }

    #[test]
    fn test_inclusive_depth_boundaries() {
        let s = species("0-10m", "20-30");
        assert!(check_environment(&s, &location(0, 25.0)).is_ok());
        assert!(check_environment(&s, &location(10, 25.0)).is_ok());
        assert!(matches!(
            check_environment(&s, &location(11, 25.0)),
            Err(HabitatMismatch::Depth { depth: 11, .. })
        ));
        assert!(check_environment(&s, &location(-1, 25.0)).is_err());
    }

    #[test]
    fn test_inclusive_temperature_boundaries() {
        let s = species("0-10m", "26.7-28.2");
        assert!(check_environment(&s, &location(5, 26.7)).is_ok());
        assert!(check_environment(&s, &location(5, 28.2)).is_ok());
        assert!(matches!(
            check_environment(&s, &location(5, 26.6)),
            Err(HabitatMismatch::Temperature { .. })
        ));
        assert!(check_environment(&s, &location(5, 28.3)).is_err());
    }

    #[test]
    fn test_single_point_ranges() {
        let s = species("5", "27");
        assert!(check_environment(&s, &location(5, 27.0)).is_ok());
        assert!(check_environment(&s, &location(6, 27.0)).is_err());
        assert!(check_environment(&s, &location(5, 27.5)).is_err());
    }

    #[test]
    fn test_malformed_range_is_a_mismatch() {
        let s = species("deep", "20-30");
        assert!(matches!(
            check_environment(&s, &location(5, 25.0)),
            Err(HabitatMismatch::Unparseable {
                field: "depth_range",
                ..
            })
        ));
    }

    #[test]
    fn test_first_incompatible_reports_in_order() {
        let mut cold = species("0-10m", "5-10");
        cold.name = "Cod".to_string();
        let mut deep = species("50-100m", "5-30");
        deep.name = "Anglerfish".to_string();
        let list = vec![species("0-10m", "20-30"), cold, deep];

        let (failed, _) = first_incompatible(&list, &location(5, 25.0)).unwrap();
        assert_eq!(failed.name, "Cod");
    }
}
