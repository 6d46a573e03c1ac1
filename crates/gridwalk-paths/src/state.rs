use gridwalk_core::{Point, Range};

use crate::cost::Cost;
use crate::error::{SearchError, StateContext};

/// Handle to a node in the [`SearchState`] arena.
///
/// Handles are handed out in insertion order, so comparing two handles
/// compares when their positions were first discovered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One explored grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub position: Point,
    /// Cheapest known cost from the start.
    pub cost: Cost,
    /// Node this one was reached from; `None` for the start.
    pub parent: Option<NodeId>,
}

impl Node {
    /// The zero-cost, parentless start node.
    pub fn start(position: Point) -> Self {
        Self {
            position,
            cost: Cost::ZERO,
            parent: None,
        }
    }
}

/// What a call to [`SearchState::relax`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Relaxation {
    /// The position was unseen; a new open node was created.
    Inserted(NodeId),
    /// The open node got a cheaper cost and a new parent.
    Decreased(NodeId),
    /// The open node already had an equal or cheaper cost.
    Unchanged(NodeId),
    /// The position is finalized and was left alone.
    Closed(NodeId),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Slot {
    Unseen,
    Open(NodeId),
    Closed(NodeId),
}

const NOT_IN_HEAP: usize = usize::MAX;

/// Open and closed sets of one search run.
///
/// Nodes live in an arena and refer to their parents by [`NodeId`]. The open
/// set is a binary min-heap of handles ordered by `(cost, NodeId)`, with a
/// back-index from handle to heap slot so that a rediscovered position can be
/// decreased in place. A flat per-cell table maps every position of the
/// bounds to its node and tells whether that node is open or closed.
#[derive(Clone, Debug)]
pub struct SearchState {
    bounds: Range,
    nodes: Vec<Node>,
    slots: Vec<Slot>,
    heap: Vec<NodeId>,
    heap_pos: Vec<usize>,
    closed: usize,
    last_finalized: Option<Point>,
}

impl SearchState {
    /// Create an empty state for a grid of the given bounds.
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            nodes: Vec::new(),
            slots: vec![Slot::Unseen; bounds.len()],
            heap: Vec::new(),
            heap_pos: Vec::new(),
            closed: 0,
            last_finalized: None,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of open (frontier) nodes.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.heap.len()
    }

    /// Number of finalized nodes.
    #[inline]
    pub fn closed_len(&self) -> usize {
        self.closed
    }

    /// Number of nodes ever created.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_frontier_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn last_finalized(&self) -> Option<Point> {
        self.last_finalized
    }

    /// Sizes and last finalized position, for diagnostics.
    pub fn context(&self) -> StateContext {
        StateContext {
            frontier: self.open_len(),
            closed: self.closed_len(),
            last_finalized: self.last_finalized,
        }
    }

    /// The node behind a handle.
    ///
    /// # Panics
    ///
    /// If `id` was not produced by this state.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// The open node at `p`, if any.
    pub fn find_open(&self, p: Point) -> Option<NodeId> {
        match self.slot(p)? {
            Slot::Open(id) => Some(id),
            _ => None,
        }
    }

    /// The finalized node at `p`, if any.
    pub fn find_closed(&self, p: Point) -> Option<NodeId> {
        match self.slot(p)? {
            Slot::Closed(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub fn is_closed(&self, p: Point) -> bool {
        self.find_closed(p).is_some()
    }

    /// Finalized cost at `p`. Never changes once it is `Some`.
    pub fn closed_cost(&self, p: Point) -> Option<Cost> {
        self.find_closed(p).map(|id| self.node(id).cost)
    }

    /// Add a node to the open set.
    ///
    /// A position is tracked by at most one node: if `node.position` is
    /// already known, the call is reconciled exactly like [`relax`]
    /// (keeping the cheaper entry).
    ///
    /// [`relax`]: SearchState::relax
    pub fn insert(&mut self, node: Node) -> Result<Relaxation, SearchError> {
        self.relax(node.position, node.cost, node.parent)
    }

    /// Offer a path of cost `cost` to `position` through `parent`.
    ///
    /// - unseen position: a new open node is created;
    /// - open with a higher cost: cost and parent are replaced (decrease-key);
    /// - open with an equal or lower cost: nothing changes;
    /// - closed: nothing changes, finalized nodes are never reopened.
    pub fn relax(
        &mut self,
        position: Point,
        cost: Cost,
        parent: Option<NodeId>,
    ) -> Result<Relaxation, SearchError> {
        let Some(si) = self.bounds.index_of(position) else {
            return Err(SearchError::OutOfBounds {
                position,
                bounds: self.bounds,
            });
        };
        match self.slots[si] {
            Slot::Unseen => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(Node {
                    position,
                    cost,
                    parent,
                });
                self.heap_pos.push(NOT_IN_HEAP);
                self.slots[si] = Slot::Open(id);
                self.push(id);
                Ok(Relaxation::Inserted(id))
            }
            Slot::Open(id) => {
                let node = &mut self.nodes[id.index()];
                if cost >= node.cost {
                    return Ok(Relaxation::Unchanged(id));
                }
                node.cost = cost;
                node.parent = parent;
                self.sift_up(self.heap_pos[id.index()]);
                Ok(Relaxation::Decreased(id))
            }
            Slot::Closed(id) => Ok(Relaxation::Closed(id)),
        }
    }

    /// Remove the cheapest open node and finalize it.
    ///
    /// Ties on cost go to the node inserted first. The returned node's cost
    /// is minimal (all step costs are non-negative), so it moves straight
    /// into the closed set.
    pub fn extract_min(&mut self) -> Result<NodeId, SearchError> {
        let Some(top) = self.heap.first().copied() else {
            log::error!("extract-min on an empty frontier");
            return Err(SearchError::EmptyFrontier {
                context: self.context(),
            });
        };
        let last = self.heap.len() - 1;
        self.swap(0, last);
        self.heap.pop();
        self.heap_pos[top.index()] = NOT_IN_HEAP;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        let position = self.nodes[top.index()].position;
        if let Some(si) = self.bounds.index_of(position) {
            self.slots[si] = Slot::Closed(top);
        }
        self.closed += 1;
        self.last_finalized = Some(position);
        Ok(top)
    }

    // -----------------------------------------------------------------------
    // Heap internals
    // -----------------------------------------------------------------------

    #[inline]
    fn slot(&self, p: Point) -> Option<Slot> {
        self.bounds.index_of(p).map(|i| self.slots[i])
    }

    #[inline]
    fn key(&self, id: NodeId) -> (Cost, NodeId) {
        (self.nodes[id.index()].cost, id)
    }

    #[inline]
    fn less(&self, i: usize, j: usize) -> bool {
        self.key(self.heap[i]) < self.key(self.heap[j])
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.heap_pos[self.heap[i].index()] = i;
        self.heap_pos[self.heap[j].index()] = j;
    }

    fn push(&mut self, id: NodeId) {
        let i = self.heap.len();
        self.heap.push(id);
        self.heap_pos[id.index()] = i;
        self.sift_up(i);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.less(left, smallest) {
                smallest = left;
            }
            if right < n && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenths(t: u32) -> Cost {
        Cost::from_tenths(t)
    }

    fn state() -> SearchState {
        SearchState::new(Range::sized(10, 10))
    }

    #[test]
    fn extract_min_on_empty_frontier_fails() {
        let mut st = state();
        let err = st.extract_min().unwrap_err();
        assert!(matches!(
            err,
            SearchError::EmptyFrontier {
                context: StateContext {
                    frontier: 0,
                    closed: 0,
                    last_finalized: None,
                }
            }
        ));
    }

    #[test]
    fn extract_min_yields_ascending_costs() {
        let mut st = state();
        let costs = [50, 10, 40, 30, 20, 60, 0, 35];
        for (i, c) in costs.iter().enumerate() {
            st.relax(Point::new(i as i32, 0), tenths(*c), None).unwrap();
        }
        let mut out = Vec::new();
        while !st.is_frontier_empty() {
            let id = st.extract_min().unwrap();
            out.push(st.node(id).cost.tenths());
        }
        assert_eq!(out, vec![0, 10, 20, 30, 35, 40, 50, 60]);
        assert_eq!(st.closed_len(), costs.len());
    }

    #[test]
    fn ties_go_to_first_inserted() {
        let mut st = state();
        st.relax(Point::new(3, 3), tenths(10), None).unwrap();
        st.relax(Point::new(1, 1), tenths(10), None).unwrap();
        st.relax(Point::new(2, 2), tenths(10), None).unwrap();
        let order: Vec<_> = (0..3)
            .map(|_| {
                let id = st.extract_min().unwrap();
                st.node(id).position
            })
            .collect();
        assert_eq!(
            order,
            vec![Point::new(3, 3), Point::new(1, 1), Point::new(2, 2)]
        );
    }

    #[test]
    fn decrease_key_replaces_cost_and_parent() {
        let mut st = state();
        let Relaxation::Inserted(a) = st.relax(Point::new(0, 0), tenths(0), None).unwrap() else {
            panic!("expected insert");
        };
        let Relaxation::Inserted(b) = st.relax(Point::new(5, 5), tenths(5), None).unwrap() else {
            panic!("expected insert");
        };
        let target = Point::new(1, 1);
        let Relaxation::Inserted(t) = st.relax(target, tenths(30), Some(b)).unwrap() else {
            panic!("expected insert");
        };

        let dearer = st.relax(target, tenths(40), Some(a)).unwrap();
        assert_eq!(dearer, Relaxation::Unchanged(t));
        let equal = st.relax(target, tenths(30), Some(a)).unwrap();
        assert_eq!(equal, Relaxation::Unchanged(t));
        assert_eq!(st.node(t).parent, Some(b));

        let cheaper = st.relax(target, tenths(14), Some(a)).unwrap();
        assert_eq!(cheaper, Relaxation::Decreased(t));
        assert_eq!(st.node(t).cost, tenths(14));
        assert_eq!(st.node(t).parent, Some(a));
        assert_eq!(st.find_open(target), Some(t));
        assert_eq!(st.open_len(), 3);
    }

    #[test]
    fn decrease_key_reorders_the_heap() {
        let mut st = state();
        st.relax(Point::new(0, 0), tenths(10), None).unwrap();
        st.relax(Point::new(1, 0), tenths(20), None).unwrap();
        st.relax(Point::new(2, 0), tenths(30), None).unwrap();
        st.relax(Point::new(2, 0), tenths(5), None).unwrap();
        let first = st.extract_min().unwrap();
        assert_eq!(st.node(first).position, Point::new(2, 0));
    }

    #[test]
    fn closed_nodes_are_never_reopened() {
        let mut st = state();
        let p = Point::new(4, 4);
        st.insert(Node::start(p)).unwrap();
        let id = st.extract_min().unwrap();
        assert!(st.is_closed(p));
        assert_eq!(st.last_finalized(), Some(p));

        let again = st.relax(p, tenths(0), None).unwrap();
        assert_eq!(again, Relaxation::Closed(id));
        assert_eq!(st.closed_cost(p), Some(Cost::ZERO));
        assert!(st.is_frontier_empty());
    }

    #[test]
    fn duplicate_insert_keeps_the_cheaper_entry() {
        let mut st = state();
        let p = Point::new(7, 2);
        for t in [24, 20, 28] {
            let node = Node {
                cost: tenths(t),
                ..Node::start(p)
            };
            st.insert(node).unwrap();
        }
        assert_eq!(st.open_len(), 1);
        assert_eq!(st.node_count(), 1);
        let id = st.extract_min().unwrap();
        assert_eq!(st.node(id).cost, tenths(20));
    }

    #[test]
    fn out_of_bounds_positions_are_rejected() {
        let mut st = state();
        let err = st.relax(Point::new(10, 0), tenths(10), None).unwrap_err();
        assert!(matches!(err, SearchError::OutOfBounds { .. }));
        assert_eq!(st.node_count(), 0);
    }

    #[test]
    fn context_reports_sizes() {
        let mut st = state();
        st.relax(Point::new(0, 0), tenths(0), None).unwrap();
        st.relax(Point::new(1, 0), tenths(10), None).unwrap();
        st.extract_min().unwrap();
        let ctx = st.context();
        assert_eq!(ctx.frontier, 1);
        assert_eq!(ctx.closed, 1);
        assert_eq!(ctx.last_finalized, Some(Point::new(0, 0)));
    }
}
