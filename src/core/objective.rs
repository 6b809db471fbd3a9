use serde::{Deserialize, Serialize};

use crate::core::capability::Compatibility;
use crate::core::model::{Objective, VariableId};
use crate::core::variables::DecisionVariableStore;

/// Weights of the pairing objective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    /// Cost of pairing two people who did not both ask for each other's gender
    pub preference_penalty: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            preference_penalty: 0.1,
        }
    }
}

/// Objective coefficient of one candidate pair
///
/// Scoring formula:
/// score = similarity(a, b) - preference_penalty * (1 - preferred(a, b))
#[inline]
pub fn pair_score<C: Compatibility + ?Sized>(
    capability: &C,
    a: usize,
    b: usize,
    weights: &ObjectiveWeights,
) -> f64 {
    let reward = capability.similarity(a, b);
    // Non-negative because preferred is within [0, 1]
    let penalty = 1.0 - capability.preferred(a, b);

    reward - weights.preference_penalty * penalty
}

/// Builds the "maximize total compatibility" objective
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectiveBuilder {
    weights: ObjectiveWeights,
}

impl ObjectiveBuilder {
    pub fn new(weights: ObjectiveWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ObjectiveWeights {
        &self.weights
    }

    /// One term per candidate pair, in candidate-space order
    pub fn build<C: Compatibility + ?Sized>(
        &self,
        store: &DecisionVariableStore,
        capability: &C,
    ) -> Objective {
        let terms: Vec<(VariableId, f64)> = store
            .pairs_and_participants()
            .map(|(var, a, b)| (var, pair_score(capability, a, b, &self.weights)))
            .collect();

        Objective { terms }
    }
}
