use crate::domain::model::Species;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("{species} lists itself as a food source")]
    SelfConsumption { species: String },

    #[error("{name} appears more than once in the selection")]
    DuplicateSpecies { name: String },
}

/// Directed "may eat" relation over one selection. Node indices follow
/// the order of the selection slice.
#[derive(Debug, Clone)]
pub struct ConsumptionGraph<'a> {
    species: &'a [Species],
    prey: Vec<Vec<usize>>,
    predators: Vec<Vec<usize>>,
}

impl<'a> ConsumptionGraph<'a> {
    /// Food sources naming species outside the selection are ignored.
    pub fn build(species: &'a [Species]) -> Result<Self, GraphError> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(species.len());
        for (i, s) in species.iter().enumerate() {
            if index.insert(s.name.as_str(), i).is_some() {
                return Err(GraphError::DuplicateSpecies {
                    name: s.name.clone(),
                });
            }
        }

        let mut prey = vec![Vec::new(); species.len()];
        let mut predators = vec![Vec::new(); species.len()];
        for (predator, s) in species.iter().enumerate() {
            if s.eats(&s.name) {
                return Err(GraphError::SelfConsumption {
                    species: s.name.clone(),
                });
            }
            for (candidate, other) in species.iter().enumerate() {
                if candidate != predator && s.eats(&other.name) {
                    prey[predator].push(candidate);
                    predators[candidate].push(predator);
                }
            }
        }

        tracing::debug!(
            nodes = species.len(),
            edges = prey.iter().map(Vec::len).sum::<usize>(),
            "Built consumption graph"
        );

        Ok(Self {
            species,
            prey,
            predators,
        })
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn species(&self) -> &'a [Species] {
        self.species
    }

    pub fn node(&self, index: usize) -> &'a Species {
        &self.species[index]
    }

    /// In-selection species that `predator` may eat.
    pub fn prey_of(&self, predator: usize) -> &[usize] {
        &self.prey[predator]
    }

    /// In-selection species that may eat `prey`.
    pub fn predators_of(&self, prey: usize) -> &[usize] {
        &self.predators[prey]
    }

    /// All `(predator, prey)` pairs, predator-major.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.prey
            .iter()
            .enumerate()
            .flat_map(|(predator, prey)| prey.iter().map(move |&p| (predator, p)))
    }

    pub fn edge_count(&self) -> usize {
        self.prey.iter().map(Vec::len).sum()
    }

    /// Species with nothing to eat inside the selection.
    pub fn producers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&i| self.prey[i].is_empty())
    }

    /// Species nothing in the selection eats.
    pub fn apex_consumers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&i| self.predators[i].is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::parse_food_sources;

    fn species(name: &str, food: &str) -> Species {
        Species {
            name: name.to_string(),
            calories_provided: 100,
            calories_needed: 0,
            depth_range: "0-10m".to_string(),
            temperature_range: "20-30".to_string(),
            food_sources: parse_food_sources(food),
        }
    }

    #[test]
    fn test_edges_restricted_to_selection() {
        let selection = vec![
            species("Kelp", ""),
            species("Urchin", "Kelp;Algae"),
            species("Otter", "Urchin;Crab"),
        ];
        let graph = ConsumptionGraph::build(&selection).unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.prey_of(1), &[0]);
        assert_eq!(graph.prey_of(2), &[1]);
        assert_eq!(graph.predators_of(0), &[1]);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(1, 0), (2, 1)]);
        assert_eq!(graph.producers().collect::<Vec<_>>(), vec![0]);
        assert_eq!(graph.apex_consumers().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_duplicate_food_sources_make_one_edge() {
        let selection = vec![species("Kelp", ""), species("Urchin", "Kelp;Kelp")];
        let graph = ConsumptionGraph::build(&selection).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_consumption_is_rejected() {
        let selection = vec![species("Kelp", ""), species("Squid", "Kelp;Squid")];
        assert_eq!(
            ConsumptionGraph::build(&selection).unwrap_err(),
            GraphError::SelfConsumption {
                species: "Squid".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_species_is_rejected() {
        let selection = vec![species("Kelp", ""), species("Kelp", "")];
        assert!(matches!(
            ConsumptionGraph::build(&selection),
            Err(GraphError::DuplicateSpecies { .. })
        ));
    }

    #[test]
    fn test_cycles_are_kept() {
        let selection = vec![species("A", "B"), species("B", "A")];
        let graph = ConsumptionGraph::build(&selection).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.producers().count(), 0);
    }
}
