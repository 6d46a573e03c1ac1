use gridwalk_core::Point;

/// Membership predicate for the blocked part of a map.
///
/// Implementations must be pure: the same point always yields the same
/// answer, so one instance can be shared read-only by input validation and
/// by every candidate move the engine generates. Any
/// `Fn(Point) -> bool + Sync` closure is an obstacle field.
pub trait ObstacleField: Sync {
    /// Whether `p` lies inside an obstacle.
    fn contains(&self, p: Point) -> bool;
}

impl<F> ObstacleField for F
where
    F: Fn(Point) -> bool + Sync,
{
    #[inline]
    fn contains(&self, p: Point) -> bool {
        self(p)
    }
}
