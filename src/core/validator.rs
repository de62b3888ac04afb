use crate::core::environment::first_incompatible;
use crate::core::graph::ConsumptionGraph;
use crate::core::solver::{self, Sustainability, UnmetDemand};
use crate::domain::model::{Location, Species, Verdict};

pub const SELECTION_SIZE: usize = 8;

const NO_CHAIN: &str = "No sustainable food chain found with these species";

/// Decides whether the selection survives at `location`.
///
/// Checks run cheapest first and stop at the first failure: selection size,
/// habitat compatibility of each species, then caloric feasibility. Every
/// outcome, including internal faults, is reported through the verdict.
pub fn validate_selection(species: &[Species], location: &Location) -> Verdict {
    if species.len() != SELECTION_SIZE {
        tracing::info!(count = species.len(), "Rejected selection with wrong size");
        return Verdict::rejected(format!(
            "Must select exactly {} species (currently have {})",
            SELECTION_SIZE,
            species.len()
        ));
    }

    if let Some((failed, mismatch)) = first_incompatible(species, location) {
        tracing::info!(species = %failed.name, %mismatch, "Species incompatible with location");
        return Verdict::rejected(format!(
            "{} is incompatible with the selected location environment ({})",
            failed.name, mismatch
        ));
    }
    tracing::debug!("All species compatible with location");

    let graph = match ConsumptionGraph::build(species) {
        Ok(graph) => graph,
        Err(anomaly) => {
            tracing::info!(%anomaly, "Consumption graph anomaly");
            return Verdict::rejected(NO_CHAIN);
        }
    };

    match solver::solve(&graph) {
        Ok(Sustainability::Sustainable(chain)) => {
            tracing::info!(
                flows = chain.flows.len(),
                calories = chain.total_calories_transferred,
                "Sustainable food chain found"
            );
            Verdict::sustainable(chain)
        }
        Ok(Sustainability::Unsustainable(unmet)) => {
            tracing::info!(unmet = unmet.len(), "No sustainable food chain");
            Verdict::rejected(describe_shortfall(&unmet))
        }
        Err(e) => {
            tracing::error!("Food chain solver failed: {}", e);
            Verdict::rejected(format!("Validation error: {}", e))
        }
    }
}

fn describe_shortfall(unmet: &[UnmetDemand]) -> String {
    if unmet.is_empty() {
        return NO_CHAIN.to_string();
    }

    let details: Vec<String> = unmet
        .iter()
        .map(|u| {
            if u.has_prey {
                format!(
                    "{} receives {} of {} calories needed",
                    u.name, u.calories_received, u.calories_needed
                )
            } else {
                format!("{} has nothing to eat in this selection", u.name)
            }
        })
        .collect();
    format!("{}: {}", NO_CHAIN, details.join("; "))
}
