use gridwalk_core::Range;

use crate::cost::StepCosts;
use crate::obstacles::ReferenceMap;

/// Parameters of a search run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Extent of the grid. Positions outside it are never generated.
    pub bounds: Range,
    /// Step costs of the move set.
    pub costs: StepCosts,
    /// Upper bound on the number of finalized nodes. When it is reached
    /// before the goal, the run ends as exhausted.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bounds: ReferenceMap::bounds(),
            costs: StepCosts::REFERENCE,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    /// The 300×200 reference map with reference step costs.
    pub fn reference() -> Self {
        Self::default()
    }

    /// A `width`×`height` grid anchored at the origin.
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            bounds: Range::sized(width, height),
            ..Self::default()
        }
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_costs(mut self, costs: StepCosts) -> Self {
        self.costs = costs;
        self
    }
}
