use gridwalk_core::{Point, Range};

use crate::error::{Endpoint, InvalidInput};
use crate::traits::ObstacleField;

/// Check a start/goal pair before any search is attempted.
///
/// Both points must lie in `bounds`, be free of obstacles and differ.
/// Coordinates are never clamped: anything outside the map is rejected.
pub fn validate_endpoints<O: ObstacleField + ?Sized>(
    bounds: Range,
    obstacles: &O,
    start: Point,
    goal: Point,
) -> Result<(), InvalidInput> {
    for (endpoint, position) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
        if !bounds.contains(position) {
            return Err(InvalidInput::OutOfBounds {
                endpoint,
                position,
                bounds,
            });
        }
    }
    if start == goal {
        return Err(InvalidInput::SameEndpoints(start));
    }
    for (endpoint, position) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
        if obstacles.contains(position) {
            return Err(InvalidInput::InsideObstacle { endpoint, position });
        }
    }
    Ok(())
}
