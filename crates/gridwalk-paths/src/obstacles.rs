//! Obstacle fields: the reference map and synthetic maps.

use std::collections::HashSet;
use std::fmt;

use gridwalk_core::{Point, Range};

use crate::traits::ObstacleField;

// ---------------------------------------------------------------------------
// Reference map
// ---------------------------------------------------------------------------

/// One of the five fixed regions of the reference map.
///
/// Every predicate has its fractions cleared so it is evaluated in exact
/// integer arithmetic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Rotated rectangle with corners (30,76), (100,39), (95,30), (25,68).
    Bar,
    /// Ellipse centred at (150,100), semi-axes 40 and 20.
    Ellipse,
    /// Non-convex hexagon (25,185), (75,185), (100,150), (75,120), (50,150), (20,120).
    Hexagon,
    /// Rhombus (225,40), (250,25), (225,10), (200,25).
    Rhombus,
    /// Circle centred at (225,150), radius 25.
    Circle,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Bar,
        Shape::Ellipse,
        Shape::Hexagon,
        Shape::Rhombus,
        Shape::Circle,
    ];

    /// Whether `p` lies inside this shape (boundary included).
    pub fn contains(self, p: Point) -> bool {
        let x = i64::from(p.x);
        let y = i64::from(p.y);
        match self {
            Shape::Bar => {
                5 * y <= 8 * x + 140
                    && 70 * y <= -37 * x + 6430
                    && 5 * y >= 9 * x - 705
                    && 35 * y >= -19 * x + 2855
            }
            Shape::Ellipse => {
                let dx = x - 150;
                let dy = y - 100;
                dx * dx + 4 * dy * dy <= 1600
            }
            Shape::Hexagon => {
                let hull = y <= 13 * x - 140
                    && y <= 185
                    && 5 * y <= -7 * x + 1450
                    && 5 * y >= 6 * x + 150;
                // The notch under the (50,150) vertex is free space.
                let notch = y <= x + 100 && 5 * y <= -6 * x + 1050;
                hull && !notch
            }
            Shape::Rhombus => {
                5 * y <= 3 * x - 475
                    && 5 * y >= 3 * x - 625
                    && 5 * y <= -3 * x + 875
                    && 5 * y >= -3 * x + 725
            }
            Shape::Circle => {
                let dx = x - 225;
                let dy = y - 150;
                dx * dx + dy * dy <= 625
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Bar => "bar",
            Shape::Ellipse => "ellipse",
            Shape::Hexagon => "hexagon",
            Shape::Rhombus => "rhombus",
            Shape::Circle => "circle",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The 300×200 reference map: the union of the five [`Shape`]s.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceMap;

impl ReferenceMap {
    pub const WIDTH: i32 = 300;
    pub const HEIGHT: i32 = 200;

    /// `[0, 300) × [0, 200)`.
    #[inline]
    pub fn bounds() -> Range {
        Range::sized(Self::WIDTH, Self::HEIGHT)
    }

    /// The first shape covering `p`, if any.
    pub fn shape_at(&self, p: Point) -> Option<Shape> {
        Shape::ALL.into_iter().find(|s| s.contains(p))
    }
}

impl ObstacleField for ReferenceMap {
    #[inline]
    fn contains(&self, p: Point) -> bool {
        Shape::ALL.iter().any(|s| s.contains(p))
    }
}

// ---------------------------------------------------------------------------
// Synthetic maps
// ---------------------------------------------------------------------------

/// A map with no obstacles at all.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoObstacles;

impl ObstacleField for NoObstacles {
    #[inline]
    fn contains(&self, _p: Point) -> bool {
        false
    }
}

/// An explicit set of blocked cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellSet {
    cells: HashSet<Point>,
}

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block `p`. Returns `false` if it was already blocked.
    pub fn insert(&mut self, p: Point) -> bool {
        self.cells.insert(p)
    }

    /// Block every cell of `r`.
    pub fn fill(&mut self, r: Range) {
        self.cells.extend(r.iter());
    }

    /// Block the one-cell-thick square ring at Chebyshev distance `radius`
    /// around `center`.
    pub fn ring(&mut self, center: Point, radius: i32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx.abs() == radius || dy.abs() == radius {
                    self.cells.insert(center.shift(dx, dy));
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<Point> for CellSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl ObstacleField for CellSet {
    #[inline]
    fn contains(&self, p: Point) -> bool {
        self.cells.contains(&p)
    }
}
