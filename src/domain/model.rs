use serde::{Deserialize, Deserializer, Serialize};

/// A selectable organism with its caloric supply and demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub calories_provided: u64,
    pub calories_needed: u64,
    pub depth_range: String,
    pub temperature_range: String,
    #[serde(default, deserialize_with = "deserialize_food_sources")]
    pub food_sources: Vec<String>,
}

impl Species {
    pub fn eats(&self, prey: &str) -> bool {
        self.food_sources.iter().any(|source| source == prey)
    }
}

/// Splits a `;`-separated food source list, dropping blank entries.
pub fn parse_food_sources(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|source| !source.is_empty())
        .map(str::to_string)
        .collect()
}

fn deserialize_food_sources<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FoodSources {
        Delimited(String),
        List(Vec<String>),
    }

    Ok(match Option::<FoodSources>::deserialize(deserializer)? {
        Some(FoodSources::Delimited(raw)) => parse_food_sources(&raw),
        Some(FoodSources::List(items)) => items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        None => Vec::new(),
    })
}

/// Habitat chosen by the player. Salinity is carried but not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub depth: i64,
    pub temperature: f64,
    pub salinity: f64,
}

/// Request shape: the player's species plus the habitat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub species: Vec<Species>,
    pub location: Location,
}

/// Calories moved from one prey to one predator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFlow {
    pub prey: String,
    pub predator: String,
    pub calories: u64,
}

/// Per-species totals in a food chain witness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesBalance {
    pub name: String,
    pub calories_needed: u64,
    pub calories_received: u64,
    pub calories_provided: u64,
    pub calories_consumed: u64,
}

/// Witness of a sustainable food chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodChain {
    pub success: bool,
    pub flows: Vec<EdgeFlow>,
    pub species: Vec<SpeciesBalance>,
    pub total_calories_needed: u64,
    pub total_calories_transferred: u64,
}

impl FoodChain {
    pub fn balance(&self, name: &str) -> Option<&SpeciesBalance> {
        self.species.iter().find(|balance| balance.name == name)
    }

    pub fn flow(&self, prey: &str, predator: &str) -> u64 {
        self.flows
            .iter()
            .filter(|flow| flow.prey == prey && flow.predator == predator)
            .map(|flow| flow.calories)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_chain: Option<FoodChain>,
}

impl Verdict {
    pub fn sustainable(food_chain: FoodChain) -> Self {
        Self {
            valid: true,
            reason: None,
            food_chain: Some(food_chain),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
            food_chain: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryKind {
    Click,
    MouseMove,
    SpeciesSelect,
    SpeciesRemove,
    LocationChange,
    Validation,
}

/// A client interaction event. `timestamp` is the client clock in ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    #[serde(rename = "type")]
    pub kind: TelemetryKind,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_event_wire_shape() {
        let event: TelemetryEvent =
            serde_json::from_str(r#"{"type":"species_select","timestamp":17,"data":{"name":"Kelp"}}"#)
                .unwrap();
        assert_eq!(event.kind, TelemetryKind::SpeciesSelect);
        assert_eq!(event.data.unwrap()["name"], "Kelp");
    }

    #[test]
    fn test_food_sources_from_delimited_string() {
        let json = r#"{
            "name": "Grouper",
            "calories_provided": 1200,
            "calories_needed": 900,
            "depth_range": "5-60m",
            "temperature_range": "24-29",
            "food_sources": "Parrotfish; Damselfish;;"
        }"#;

        let species: Species = serde_json::from_str(json).unwrap();
        assert_eq!(species.food_sources, vec!["Parrotfish", "Damselfish"]);
        assert!(species.eats("Damselfish"));
        assert!(!species.eats("Grouper"));
    }

    #[test]
    fn test_food_sources_from_list_or_missing() {
        let listed: Species = serde_json::from_str(
            r#"{"name":"A","calories_provided":1,"calories_needed":1,
                "depth_range":"0","temperature_range":"0","food_sources":["B"," C "]}"#,
        )
        .unwrap();
        assert_eq!(listed.food_sources, vec!["B", "C"]);

        let missing: Species = serde_json::from_str(
            r#"{"name":"A","calories_provided":1,"calories_needed":0,
                "depth_range":"0","temperature_range":"0"}"#,
        )
        .unwrap();
        assert!(missing.food_sources.is_empty());
    }

    #[test]
    fn test_verdict_omits_absent_fields() {
        let json = serde_json::to_value(Verdict::rejected("nope")).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["reason"], "nope");
        assert!(json.get("food_chain").is_none());
    }
}
