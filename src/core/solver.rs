//! Caloric feasibility over a consumption graph.
//!
//! Every species offers a pool of `calories_provided` that may be split
//! among any of its in-selection predators, and must receive at least
//! `calories_needed` from its in-selection prey. What a species provides
//! does not depend on what it eats, so cycles in the graph are allowed.
//!
//! The check is a bipartite max-flow:
//!
//! ```text
//! source --provided--> supply(prey) --unbounded--> demand(predator) --needed--> sink
//! ```
//!
//! and the selection is sustainable iff the max flow saturates every sink
//! edge. Capacities are whole calories, so the max flow found is integral
//! and no fractional assignment could do better.

use crate::core::graph::ConsumptionGraph;
use crate::domain::model::{EdgeFlow, FoodChain, SpeciesBalance};
use crate::utils::error::{EcoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A species whose demand could not be covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetDemand {
    pub name: String,
    pub calories_needed: u64,
    pub calories_received: u64,
    /// False when nothing in the selection is edible for this species.
    pub has_prey: bool,
}

impl UnmetDemand {
    pub fn deficit(&self) -> u64 {
        self.calories_needed.saturating_sub(self.calories_received)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sustainability {
    Sustainable(FoodChain),
    Unsustainable(Vec<UnmetDemand>),
}

impl Sustainability {
    pub fn is_sustainable(&self) -> bool {
        matches!(self, Self::Sustainable(_))
    }
}

pub fn solve(graph: &ConsumptionGraph<'_>) -> Result<Sustainability> {
    let starved: Vec<UnmetDemand> = (0..graph.len())
        .filter(|&i| graph.node(i).calories_needed > 0 && graph.prey_of(i).is_empty())
        .map(|i| UnmetDemand {
            name: graph.node(i).name.clone(),
            calories_needed: graph.node(i).calories_needed,
            calories_received: 0,
            has_prey: false,
        })
        .collect();
    if !starved.is_empty() {
        tracing::debug!(count = starved.len(), "Species with no prey in selection");
        return Ok(Sustainability::Unsustainable(starved));
    }

    let total_needed = graph
        .species()
        .iter()
        .try_fold(0u64, |acc, s| acc.checked_add(s.calories_needed))
        .ok_or_else(|| EcoError::processing("total calories needed overflows u64"))?;

    let n = graph.len();
    let source = 0;
    let supply = |i: usize| 1 + i;
    let demand = |i: usize| 1 + n + i;
    let sink = 1 + 2 * n;

    let mut network = FlowNetwork::new(2 * n + 2);
    for (i, s) in graph.species().iter().enumerate() {
        if s.calories_provided > 0 && !graph.predators_of(i).is_empty() {
            network.add_edge(source, supply(i), s.calories_provided);
        }
    }

    let mut feeding = Vec::with_capacity(graph.edge_count());
    for (predator, prey) in graph.edges() {
        if graph.node(predator).calories_needed == 0 {
            continue;
        }
        let id = network.add_edge(supply(prey), demand(predator), total_needed);
        feeding.push((prey, predator, id));
    }

    let mut intake = Vec::with_capacity(n);
    for (i, s) in graph.species().iter().enumerate() {
        if s.calories_needed > 0 {
            let id = network.add_edge(demand(i), sink, s.calories_needed);
            intake.push((i, id));
        }
    }

    let transferred = network.max_flow(source, sink)?;
    tracing::debug!(transferred, total_needed, "Computed max caloric flow");

    if transferred < total_needed {
        let unmet = intake
            .iter()
            .filter(|&&(_, id)| network.flow(id) < network.capacity(id))
            .map(|&(i, id)| UnmetDemand {
                name: graph.node(i).name.clone(),
                calories_needed: graph.node(i).calories_needed,
                calories_received: network.flow(id),
                has_prey: true,
            })
            .collect();
        return Ok(Sustainability::Unsustainable(unmet));
    }

    let mut received = vec![0u64; n];
    let mut consumed = vec![0u64; n];
    let mut flows = Vec::new();
    for &(prey, predator, id) in &feeding {
        let calories = network.flow(id);
        if calories == 0 {
            continue;
        }
        received[predator] += calories;
        consumed[prey] += calories;
        flows.push(EdgeFlow {
            prey: graph.node(prey).name.clone(),
            predator: graph.node(predator).name.clone(),
            calories,
        });
    }

    let species = graph
        .species()
        .iter()
        .enumerate()
        .map(|(i, s)| SpeciesBalance {
            name: s.name.clone(),
            calories_needed: s.calories_needed,
            calories_received: received[i],
            calories_provided: s.calories_provided,
            calories_consumed: consumed[i],
        })
        .collect();

    Ok(Sustainability::Sustainable(FoodChain {
        success: true,
        flows,
        species,
        total_calories_needed: total_needed,
        total_calories_transferred: transferred,
    }))
}

/// Residual graph with paired forward/backward edges (`id ^ 1`).
struct FlowNetwork {
    adjacency: Vec<Vec<usize>>,
    target: Vec<usize>,
    residual: Vec<u64>,
    capacity: Vec<u64>,
}

impl FlowNetwork {
    fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            target: Vec::new(),
            residual: Vec::new(),
            capacity: Vec::new(),
        }
    }

    fn add_edge(&mut self, from: usize, to: usize, capacity: u64) -> usize {
        let id = self.target.len();
        self.adjacency[from].push(id);
        self.target.push(to);
        self.residual.push(capacity);
        self.capacity.push(capacity);

        self.adjacency[to].push(id + 1);
        self.target.push(from);
        self.residual.push(0);
        self.capacity.push(0);
        id
    }

    fn capacity(&self, id: usize) -> u64 {
        self.capacity[id]
    }

    fn flow(&self, id: usize) -> u64 {
        self.capacity[id] - self.residual[id]
    }

    /// Edmonds-Karp: shortest augmenting paths by BFS.
    fn max_flow(&mut self, source: usize, sink: usize) -> Result<u64> {
        let mut total = 0u64;
        loop {
            let mut via: Vec<Option<usize>> = vec![None; self.adjacency.len()];
            let mut queue = VecDeque::from([source]);
            let mut reached = false;
            while let Some(node) = queue.pop_front() {
                if node == sink {
                    reached = true;
                    break;
                }
                for &id in &self.adjacency[node] {
                    let next = self.target[id];
                    if next != source && via[next].is_none() && self.residual[id] > 0 {
                        via[next] = Some(id);
                        queue.push_back(next);
                    }
                }
            }
            if !reached {
                return Ok(total);
            }

            let mut bottleneck = u64::MAX;
            let mut node = sink;
            while let Some(id) = via[node] {
                bottleneck = bottleneck.min(self.residual[id]);
                node = self.target[id ^ 1];
            }

            let mut node = sink;
            while let Some(id) = via[node] {
                self.residual[id] -= bottleneck;
                self.residual[id ^ 1] += bottleneck;
                node = self.target[id ^ 1];
            }

            total = total
                .checked_add(bottleneck)
                .ok_or_else(|| EcoError::processing("caloric flow overflows u64"))?;
        }
    }
}
