use gridwalk_core::{Point, Range};

use crate::cost::{Cost, StepCosts};
use crate::traits::ObstacleField;

/// One of the eight moves available to the agent.
///
/// `Up` decreases `y` and `Down` increases it, following the reference map's
/// action table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Right,
    Down,
    Left,
    Up,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Action {
    /// Expansion order. Tie-breaking between equal-cost routes depends on
    /// it, so it must never change.
    pub const ALL: [Action; 8] = [
        Action::Right,
        Action::Down,
        Action::Left,
        Action::Up,
        Action::UpLeft,
        Action::UpRight,
        Action::DownLeft,
        Action::DownRight,
    ];

    pub const fn offset(self) -> Point {
        match self {
            Action::Right => Point::new(1, 0),
            Action::Down => Point::new(0, 1),
            Action::Left => Point::new(-1, 0),
            Action::Up => Point::new(0, -1),
            Action::UpLeft => Point::new(-1, -1),
            Action::UpRight => Point::new(1, -1),
            Action::DownLeft => Point::new(-1, 1),
            Action::DownRight => Point::new(1, 1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Action::UpLeft | Action::UpRight | Action::DownLeft | Action::DownRight
        )
    }
}

/// Enumerates legal moves from a cell.
///
/// A move is legal when its target is inside `bounds` and not covered by the
/// obstacle field. The generator holds no mutable state.
pub struct MoveGenerator<'a, O: ObstacleField + ?Sized> {
    bounds: Range,
    costs: StepCosts,
    obstacles: &'a O,
}

impl<O: ObstacleField + ?Sized> Clone for MoveGenerator<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ObstacleField + ?Sized> Copy for MoveGenerator<'_, O> {}

impl<'a, O: ObstacleField + ?Sized> MoveGenerator<'a, O> {
    pub fn new(bounds: Range, costs: StepCosts, obstacles: &'a O) -> Self {
        Self {
            bounds,
            costs,
            obstacles,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether the agent may stand on `p`.
    #[inline]
    pub fn is_free(&self, p: Point) -> bool {
        self.bounds.contains(p) && !self.obstacles.contains(p)
    }

    #[inline]
    pub fn step_cost(&self, action: Action) -> Cost {
        if action.is_diagonal() {
            self.costs.diagonal
        } else {
            self.costs.orthogonal
        }
    }

    /// Apply `action` at `from`. Returns `None` when the target is out of
    /// bounds or blocked.
    #[inline]
    pub fn apply(&self, action: Action, from: Point) -> Option<(Point, Cost)> {
        let target = from + action.offset();
        self.is_free(target)
            .then(|| (target, self.step_cost(action)))
    }

    /// All legal moves from `from`, in [`Action::ALL`] order.
    pub fn moves(&self, from: Point) -> impl Iterator<Item = (Action, Point, Cost)> + '_ {
        Action::ALL.into_iter().filter_map(move |action| {
            let (target, cost) = self.apply(action, from)?;
            Some((action, target, cost))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacles::{CellSet, NoObstacles, ReferenceMap};

    #[test]
    fn corner_cell_has_three_moves() {
        let mg = MoveGenerator::new(Range::sized(10, 10), StepCosts::REFERENCE, &NoObstacles);
        let moves: Vec<_> = mg.moves(Point::new(0, 0)).collect();
        assert_eq!(
            moves,
            vec![
                (Action::Right, Point::new(1, 0), Cost::from_tenths(10)),
                (Action::Down, Point::new(0, 1), Cost::from_tenths(10)),
                (Action::DownRight, Point::new(1, 1), Cost::from_tenths(14)),
            ]
        );
    }

    #[test]
    fn interior_cell_has_all_moves_in_fixed_order() {
        let mg = MoveGenerator::new(Range::sized(10, 10), StepCosts::REFERENCE, &NoObstacles);
        let actions: Vec<_> = mg.moves(Point::new(4, 4)).map(|(a, _, _)| a).collect();
        assert_eq!(actions, Action::ALL.to_vec());
    }

    #[test]
    fn far_edge_is_exclusive() {
        let mg = MoveGenerator::new(Range::sized(300, 200), StepCosts::REFERENCE, &NoObstacles);
        assert_eq!(mg.apply(Action::Right, Point::new(299, 10)), None);
        assert_eq!(mg.apply(Action::Down, Point::new(10, 199)), None);
        assert_eq!(
            mg.apply(Action::Right, Point::new(298, 10)),
            Some((Point::new(299, 10), Cost::from_tenths(10)))
        );
    }

    #[test]
    fn blocked_targets_are_rejected() {
        let walls: CellSet = [Point::new(2, 1), Point::new(1, 2)].into_iter().collect();
        let mg = MoveGenerator::new(Range::sized(5, 5), StepCosts::REFERENCE, &walls);
        let targets: Vec<_> = mg.moves(Point::new(1, 1)).map(|(_, t, _)| t).collect();
        assert!(!targets.contains(&Point::new(2, 1)));
        assert!(!targets.contains(&Point::new(1, 2)));
        assert_eq!(targets.len(), 6);
    }

    #[test]
    fn moves_never_enter_the_circle() {
        let map = ReferenceMap;
        let mg = MoveGenerator::new(ReferenceMap::bounds(), StepCosts::REFERENCE, &map);
        // (199,150) is one cell left of the circle's leftmost point.
        let targets: Vec<_> = mg.moves(Point::new(199, 150)).map(|(_, t, _)| t).collect();
        assert!(!targets.contains(&Point::new(200, 150)));
        assert!(targets.contains(&Point::new(198, 150)));
    }

    #[test]
    fn custom_costs_are_used() {
        let costs = StepCosts {
            orthogonal: Cost::from_tenths(10),
            diagonal: Cost::from_tenths(15),
        };
        let mg = MoveGenerator::new(Range::sized(3, 3), costs, &NoObstacles);
        assert_eq!(mg.step_cost(Action::UpLeft), Cost::from_tenths(15));
        assert_eq!(mg.step_cost(Action::Left), Cost::from_tenths(10));
    }
}
