use std::fmt;

use gridwalk_core::{Point, Range};

/// Which end of the requested route a validation error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Start => "start",
            Endpoint::Goal => "goal",
        })
    }
}

/// Rejected start/goal pair. Raised before any search state exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("{endpoint} {position} is outside the map {bounds}")]
    OutOfBounds {
        endpoint: Endpoint,
        position: Point,
        bounds: Range,
    },
    #[error("{endpoint} {position} is inside an obstacle")]
    InsideObstacle { endpoint: Endpoint, position: Point },
    #[error("start and goal are the same point {0}")]
    SameEndpoints(Point),
}

/// Snapshot of the search state attached to invariant violations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StateContext {
    pub frontier: usize,
    pub closed: usize,
    pub last_finalized: Option<Point>,
}

impl fmt::Display for StateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (frontier, closed) = (self.frontier, self.closed);
        write!(f, "frontier={frontier}, closed={closed}, last finalized=")?;
        match self.last_finalized {
            Some(p) => write!(f, "{p}"),
            None => f.write_str("none"),
        }
    }
}

/// Errors surfaced by the search engine.
///
/// An unreachable goal is *not* an error: it is reported as
/// [`SearchStatus::Exhausted`](crate::SearchStatus::Exhausted). Every variant
/// other than `InvalidInput` means an internal invariant was broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("extract-min called on an empty frontier ({context})")]
    EmptyFrontier { context: StateContext },
    #[error("parent chain from {terminal} does not reach the start ({context})")]
    BrokenChain {
        terminal: Point,
        context: StateContext,
    },
    #[error("{position} is outside the search bounds {bounds}")]
    OutOfBounds { position: Point, bounds: Range },
}

impl SearchError {
    /// Whether the error points at a defect rather than at bad input.
    pub fn is_internal(&self) -> bool {
        !matches!(self, Self::InvalidInput(_))
    }
}
