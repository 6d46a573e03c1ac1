use gridwalk_core::Point;

use crate::error::SearchError;
use crate::state::{NodeId, SearchState};

/// Build the route ending in `goal` from the parent chain of `terminal`.
///
/// `terminal` is the goal's immediate predecessor. The chain is followed up
/// to the parentless start node, reversed, and `goal` is appended. The
/// function only reads `state`, so calling it again yields the same route.
///
/// A chain longer than the number of nodes in the arena can only be a cycle;
/// it is reported as [`SearchError::BrokenChain`].
pub fn reconstruct(
    state: &SearchState,
    terminal: NodeId,
    goal: Point,
) -> Result<Vec<Point>, SearchError> {
    let limit = state.node_count();
    let from = state.node(terminal).position;
    let mut path = Vec::new();
    let mut cur = Some(terminal);
    while let Some(id) = cur {
        if path.len() >= limit {
            let context = state.context();
            log::error!("parent chain of {from} loops ({context})");
            return Err(SearchError::BrokenChain {
                terminal: from,
                context,
            });
        }
        let node = state.node(id);
        path.push(node.position);
        cur = node.parent;
    }
    path.reverse();
    path.push(goal);
    Ok(path)
}
