//! The Dijkstra driver.
//!
//! [`SearchEngine`] owns one run's [`SearchState`] and advances it one
//! extraction at a time. Callers either pull progress with
//! [`SearchEngine::step`] or hand a [`SearchObserver`] to
//! [`SearchEngine::run_with`]; the engine itself never draws anything.

use gridwalk_core::Point;

use crate::config::SearchConfig;
use crate::cost::Cost;
use crate::error::SearchError;
use crate::moves::MoveGenerator;
use crate::reconstruct::reconstruct;
use crate::state::{Node, NodeId, SearchState};
use crate::traits::ObstacleField;
use crate::validate::validate_endpoints;

/// Where a run stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    Running,
    /// The goal was extracted from the frontier.
    Succeeded,
    /// The frontier ran dry (or the step budget ran out) before the goal
    /// was reached. This is a normal outcome, not an error.
    Exhausted,
}

/// A node leaving the frontier for good.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finalized {
    pub position: Point,
    pub cost: Cost,
    /// 0 for the start, then 1, 2, ... in finalization order.
    pub order: usize,
}

/// Outcome of one [`SearchEngine::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A node was finalized and its neighbours relaxed.
    Finalized(Finalized),
    /// The run is over; further steps keep returning this.
    Done(SearchStatus),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Number of finalized (expanded) nodes.
    pub expansions: usize,
    /// Number of distinct positions ever discovered.
    pub nodes_created: usize,
    /// Open nodes left when the run stopped.
    pub frontier_left: usize,
    /// Whether the run stopped because `max_expansions` was reached.
    pub budget_exhausted: bool,
}

/// Final answer of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub status: SearchStatus,
    /// Start to goal inclusive. Empty unless the run succeeded.
    pub path: Vec<Point>,
    /// Cost of `path`. `None` unless the run succeeded.
    pub final_cost: Option<Cost>,
    pub stats: SearchStats,
}

impl SearchResult {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Succeeded
    }

    #[inline]
    pub fn final_cost_f64(&self) -> Option<f64> {
        self.final_cost.map(Cost::as_f64)
    }
}

// ---------------------------------------------------------------------------
// Observers
// ---------------------------------------------------------------------------

/// Receives every finalize event of a run, in order.
///
/// Observers cannot touch the search state. Any `FnMut(&Finalized)` closure
/// is an observer.
pub trait SearchObserver {
    fn on_finalize(&mut self, event: &Finalized);
}

impl<F> SearchObserver for F
where
    F: FnMut(&Finalized),
{
    #[inline]
    fn on_finalize(&mut self, event: &Finalized) {
        self(event)
    }
}

/// Observer that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    #[inline]
    fn on_finalize(&mut self, _event: &Finalized) {}
}

/// Observer that records the exploration order, for replay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExplorationLog {
    events: Vec<Finalized>,
}

impl ExplorationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Finalized] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl SearchObserver for ExplorationLog {
    fn on_finalize(&mut self, event: &Finalized) {
        self.events.push(*event);
    }
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Running,
    Succeeded(NodeId),
    Exhausted,
}

/// One uniform-cost search from `start` to `goal`.
pub struct SearchEngine<'a, O: ObstacleField + ?Sized> {
    config: SearchConfig,
    moves: MoveGenerator<'a, O>,
    state: SearchState,
    start: Point,
    goal: Point,
    phase: Phase,
    expansions: usize,
    budget_exhausted: bool,
}

impl<'a, O: ObstacleField + ?Sized> SearchEngine<'a, O> {
    /// Validate the endpoints and seed the frontier with the start node.
    ///
    /// Fails with [`SearchError::InvalidInput`] without touching any search
    /// state when the endpoints are unusable.
    pub fn new(
        config: SearchConfig,
        obstacles: &'a O,
        start: Point,
        goal: Point,
    ) -> Result<Self, SearchError> {
        validate_endpoints(config.bounds, obstacles, start, goal)?;
        let mut state = SearchState::new(config.bounds);
        state.insert(Node::start(start))?;
        log::debug!("searching {start} -> {goal} on {}", config.bounds);
        Ok(Self {
            config,
            moves: MoveGenerator::new(config.bounds, config.costs, obstacles),
            state,
            start,
            goal,
            phase: Phase::Running,
            expansions: 0,
            budget_exhausted: false,
        })
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Read-only view of the open and closed sets.
    #[inline]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn status(&self) -> SearchStatus {
        match self.phase {
            Phase::Running => SearchStatus::Running,
            Phase::Succeeded(_) => SearchStatus::Succeeded,
            Phase::Exhausted => SearchStatus::Exhausted,
        }
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            expansions: self.expansions,
            nodes_created: self.state.node_count(),
            frontier_left: self.state.open_len(),
            budget_exhausted: self.budget_exhausted,
        }
    }

    /// Advance the run by one extraction.
    pub fn step(&mut self) -> Result<Step, SearchError> {
        if self.phase != Phase::Running {
            return Ok(Step::Done(self.status()));
        }
        if self.state.is_frontier_empty() {
            self.phase = Phase::Exhausted;
            log::debug!("frontier empty after {} expansions", self.expansions);
            return Ok(Step::Done(SearchStatus::Exhausted));
        }
        if self
            .config
            .max_expansions
            .is_some_and(|max| self.expansions >= max)
        {
            self.phase = Phase::Exhausted;
            self.budget_exhausted = true;
            let (spent, goal) = (self.expansions, self.goal);
            log::warn!("step budget of {spent} expansions reached before {goal}");
            return Ok(Step::Done(SearchStatus::Exhausted));
        }

        let id = self.state.extract_min()?;
        let node = *self.state.node(id);
        if node.position == self.goal {
            self.phase = Phase::Succeeded(id);
            let (goal, cost, spent) = (self.goal, node.cost, self.expansions);
            log::debug!("reached {goal} at cost {cost} after {spent} expansions");
            return Ok(Step::Done(SearchStatus::Succeeded));
        }

        let event = Finalized {
            position: node.position,
            cost: node.cost,
            order: self.expansions,
        };
        self.expansions += 1;
        log::trace!("finalized {} at {}", node.position, node.cost);

        for (_, target, step_cost) in self.moves.moves(node.position) {
            self.state.relax(target, node.cost + step_cost, Some(id))?;
        }
        Ok(Step::Finalized(event))
    }

    /// Run to completion and return the result.
    pub fn run(self) -> Result<SearchResult, SearchError> {
        self.run_with(&mut NoopObserver)
    }

    /// Run to completion, reporting every finalized node to `observer`.
    pub fn run_with<Obs: SearchObserver + ?Sized>(
        mut self,
        observer: &mut Obs,
    ) -> Result<SearchResult, SearchError> {
        loop {
            match self.step()? {
                Step::Finalized(event) => observer.on_finalize(&event),
                Step::Done(_) => break,
            }
        }
        self.result()
    }

    /// Summarize the run so far.
    ///
    /// While the run is still going this reports `Running` with an empty
    /// path.
    pub fn result(&self) -> Result<SearchResult, SearchError> {
        let stats = self.stats();
        match self.phase {
            Phase::Succeeded(goal_node) => {
                let node = self.state.node(goal_node);
                // start != goal, so the goal node always has a predecessor.
                let Some(terminal) = node.parent else {
                    return Err(SearchError::BrokenChain {
                        terminal: node.position,
                        context: self.state.context(),
                    });
                };
                let path = reconstruct(&self.state, terminal, self.goal)?;
                Ok(SearchResult {
                    status: SearchStatus::Succeeded,
                    path,
                    final_cost: Some(node.cost),
                    stats,
                })
            }
            Phase::Running | Phase::Exhausted => Ok(SearchResult {
                status: self.status(),
                path: Vec::new(),
                final_cost: None,
                stats,
            }),
        }
    }
}

/// Search `start` → `goal` over `obstacles` in one call.
pub fn find_path<O: ObstacleField + ?Sized>(
    config: SearchConfig,
    obstacles: &O,
    start: Point,
    goal: Point,
) -> Result<SearchResult, SearchError> {
    SearchEngine::new(config, obstacles, start, goal)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Endpoint, InvalidInput};
    use crate::obstacles::{CellSet, NoObstacles};
    use gridwalk_core::Range;

    fn small() -> SearchConfig {
        SearchConfig::with_size(10, 10)
    }

    #[test]
    fn straight_line_on_empty_grid() {
        let res = find_path(small(), &NoObstacles, Point::new(0, 0), Point::new(9, 0)).unwrap();
        assert_eq!(res.status, SearchStatus::Succeeded);
        assert_eq!(res.final_cost, Some(Cost::from_tenths(90)));
        let expected: Vec<_> = (0..10).map(|x| Point::new(x, 0)).collect();
        assert_eq!(res.path, expected);
    }

    #[test]
    fn pure_diagonal_on_empty_grid() {
        let res = find_path(small(), &NoObstacles, Point::new(0, 0), Point::new(9, 9)).unwrap();
        assert_eq!(res.final_cost_f64(), Some(12.6));
        let expected: Vec<_> = (0..10).map(|i| Point::new(i, i)).collect();
        assert_eq!(res.path, expected);
    }

    #[test]
    fn invalid_input_never_builds_an_engine() {
        let err = SearchEngine::new(small(), &NoObstacles, Point::new(3, 3), Point::new(3, 3))
            .err()
            .unwrap();
        assert_eq!(
            err,
            SearchError::InvalidInput(InvalidInput::SameEndpoints(Point::new(3, 3)))
        );

        let walls: CellSet = [Point::new(4, 4)].into_iter().collect();
        let err = SearchEngine::new(small(), &walls, Point::new(0, 0), Point::new(4, 4))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            SearchError::InvalidInput(InvalidInput::InsideObstacle {
                endpoint: Endpoint::Goal,
                ..
            })
        ));
    }

    #[test]
    fn enclosed_goal_is_exhausted() {
        let mut walls = CellSet::new();
        walls.ring(Point::new(6, 6), 1);
        let res = find_path(small(), &walls, Point::new(0, 0), Point::new(6, 6)).unwrap();
        assert_eq!(res.status, SearchStatus::Exhausted);
        assert!(res.path.is_empty());
        assert_eq!(res.final_cost, None);
        assert!(!res.stats.budget_exhausted);
        // Every free cell outside the ring was finalized.
        assert_eq!(res.stats.expansions, 100 - 9);
    }

    #[test]
    fn step_budget_ends_as_exhausted() {
        let cfg = small().with_max_expansions(3);
        let res = find_path(cfg, &NoObstacles, Point::new(0, 0), Point::new(9, 9)).unwrap();
        assert_eq!(res.status, SearchStatus::Exhausted);
        assert!(res.stats.budget_exhausted);
        assert_eq!(res.stats.expansions, 3);
        assert!(res.path.is_empty());
    }

    #[test]
    fn steps_report_finalize_order_then_done() {
        let cfg = SearchConfig::with_size(3, 1);
        let mut engine =
            SearchEngine::new(cfg, &NoObstacles, Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert_eq!(engine.status(), SearchStatus::Running);
        assert_eq!(
            engine.step().unwrap(),
            Step::Finalized(Finalized {
                position: Point::new(0, 0),
                cost: Cost::ZERO,
                order: 0,
            })
        );
        assert_eq!(
            engine.step().unwrap(),
            Step::Finalized(Finalized {
                position: Point::new(1, 0),
                cost: Cost::from_tenths(10),
                order: 1,
            })
        );
        assert_eq!(engine.step().unwrap(), Step::Done(SearchStatus::Succeeded));
        // Done is sticky.
        assert_eq!(engine.step().unwrap(), Step::Done(SearchStatus::Succeeded));
        let res = engine.result().unwrap();
        let expected: Vec<Point> = (0..3).map(|x| Point::new(x, 0)).collect();
        assert_eq!(res.path, expected);
    }

    #[test]
    fn result_while_running_is_empty() {
        let engine =
            SearchEngine::new(small(), &NoObstacles, Point::new(0, 0), Point::new(5, 5)).unwrap();
        let res = engine.result().unwrap();
        assert_eq!(res.status, SearchStatus::Running);
        assert!(res.path.is_empty());
        assert_eq!(res.stats.frontier_left, 1);
    }

    #[test]
    fn observers_see_every_finalized_node() {
        let engine =
            SearchEngine::new(small(), &NoObstacles, Point::new(0, 0), Point::new(3, 0)).unwrap();
        let mut log = ExplorationLog::new();
        let res = engine.run_with(&mut log).unwrap();
        assert_eq!(log.len(), res.stats.expansions);
        assert_eq!(log.events()[0].position, Point::new(0, 0));
        for (i, e) in log.events().iter().enumerate() {
            assert_eq!(e.order, i);
        }
        let costs: Vec<_> = log.events().iter().map(|e| e.cost).collect();
        let mut sorted = costs.clone();
        sorted.sort();
        assert_eq!(costs, sorted, "finalize order must be by cost");
    }

    #[test]
    fn closures_are_observers() {
        let engine =
            SearchEngine::new(small(), &NoObstacles, Point::new(0, 0), Point::new(2, 2)).unwrap();
        let mut seen = Vec::new();
        let res = engine
            .run_with(&mut |e: &Finalized| seen.push(e.position))
            .unwrap();
        assert_eq!(seen.len(), res.stats.expansions);
    }

    #[test]
    fn goal_is_reached_around_a_wall() {
        // Wall at x = 2 from y = 0..4; the only gap is at y = 4.
        let mut walls = CellSet::new();
        walls.fill(Range::new(2, 0, 3, 4));
        let cfg = SearchConfig::with_size(5, 5);
        let res = find_path(cfg, &walls, Point::new(0, 0), Point::new(4, 0)).unwrap();
        assert!(res.is_success());
        assert!(res.path.iter().all(|p| !walls.contains(*p)));
        assert!(res.path.contains(&Point::new(2, 4)));
        // 0,0 -> 1,1 -> 1,2 -> 1,3 -> 2,4 -> 3,3 -> 3,2 -> 3,1 -> 4,0
        assert_eq!(res.final_cost, Some(Cost::from_tenths(14 * 4 + 10 * 4)));
    }
}
