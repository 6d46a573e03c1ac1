use std::fmt;
use std::str::FromStr;

use gridwalk_core::{Point, Range};
use gridwalk_paths::{Finalized, ObstacleField};

/// What a character cell shows. Later variants win over earlier ones when
/// several map cells fall into the same character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Glyph {
    #[default]
    Free,
    Obstacle,
    Explored,
    Route,
    Start,
    Goal,
}

impl Glyph {
    /// Plain-text rendering used when colours are unavailable.
    pub fn ch(self) -> char {
        match self {
            Glyph::Free => ' ',
            Glyph::Obstacle => '#',
            Glyph::Explored => '.',
            Glyph::Route => '*',
            Glyph::Start => 'S',
            Glyph::Goal => 'G',
        }
    }
}

/// Number of map cells per character cell, horizontally and vertically.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scale {
    x: i32,
    y: i32,
}

impl Scale {
    /// Zero or negative factors are raised to 1.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: x.max(1),
            y: y.max(1),
        }
    }

    pub fn x(self) -> i32 {
        self.x
    }

    pub fn y(self) -> i32 {
        self.y
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(4, 8)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scale {0:?}: expected WxH with positive integers, e.g. 4x8")]
pub struct ParseScaleError(String);

impl FromStr for Scale {
    type Err = ParseScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseScaleError(s.to_owned());
        let (x, y) = s.split_once(['x', 'X']).ok_or_else(err)?;
        let x: i32 = x.trim().parse().map_err(|_| err())?;
        let y: i32 = y.trim().parse().map_err(|_| err())?;
        if x < 1 || y < 1 {
            return Err(err());
        }
        Ok(Self { x, y })
    }
}

/// Downsampled picture of a map.
///
/// A character cell is drawn as an obstacle when at least half of the map
/// cells it covers are blocked. Marks only ever raise a cell's [`Glyph`].
#[derive(Clone, Debug)]
pub struct Canvas {
    bounds: Range,
    scale: Scale,
    size: Point,
    cells: Vec<Glyph>,
}

impl Canvas {
    pub fn new<O: ObstacleField + ?Sized>(bounds: Range, scale: Scale, obstacles: &O) -> Self {
        let size = Point::new(
            div_ceil(bounds.width(), scale.x),
            div_ceil(bounds.height(), scale.y),
        );
        let len = (size.x * size.y).max(0) as usize;
        let mut blocked = vec![0u32; len];
        let mut total = vec![0u32; len];
        let mut canvas = Self {
            bounds,
            scale,
            size,
            cells: vec![Glyph::Free; len],
        };
        for p in bounds {
            if let Some(i) = canvas.cell_of(p).map(|c| canvas.idx(c)) {
                total[i] += 1;
                if obstacles.contains(p) {
                    blocked[i] += 1;
                }
            }
        }
        for (i, g) in canvas.cells.iter_mut().enumerate() {
            if total[i] > 0 && blocked[i] * 2 >= total[i] {
                *g = Glyph::Obstacle;
            }
        }
        canvas
    }

    pub fn bounds(&self) -> Range {
        self.bounds
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Width and height in character cells.
    pub fn size(&self) -> Point {
        self.size
    }

    /// Screen cell showing map position `p`, or `None` outside the bounds.
    pub fn cell_of(&self, p: Point) -> Option<Point> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) / self.scale.x;
        let y = (self.bounds.max.y - 1 - p.y) / self.scale.y;
        Some(Point::new(x, y))
    }

    /// Glyph at screen cell `cell`. Cells off the canvas read as free.
    pub fn at(&self, cell: Point) -> Glyph {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.size.x || cell.y >= self.size.y {
            return Glyph::Free;
        }
        self.cells[self.idx(cell)]
    }

    /// Raises the glyph showing `p` to `glyph`. Returns the screen cell when
    /// it changed.
    pub fn mark(&mut self, p: Point, glyph: Glyph) -> Option<Point> {
        let cell = self.cell_of(p)?;
        let i = self.idx(cell);
        if self.cells[i] >= glyph {
            return None;
        }
        self.cells[i] = glyph;
        Some(cell)
    }

    pub fn mark_explored(&mut self, events: &[Finalized]) {
        for ev in events {
            self.mark(ev.position, Glyph::Explored);
        }
    }

    pub fn mark_route(&mut self, path: &[Point]) {
        for &p in path {
            self.mark(p, Glyph::Route);
        }
    }

    pub fn mark_endpoints(&mut self, start: Point, goal: Point) {
        self.mark(start, Glyph::Start);
        self.mark(goal, Glyph::Goal);
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> + '_ {
        self.cells.chunks(self.size.x.max(1) as usize)
    }

    /// The picture as plain text, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut s = String::with_capacity(self.cells.len() + self.size.y.max(0) as usize);
        for row in self.rows() {
            s.extend(row.iter().map(|g| g.ch()));
            s.push('\n');
        }
        s
    }

    fn idx(&self, cell: Point) -> usize {
        (cell.y * self.size.x + cell.x) as usize
    }
}

fn div_ceil(a: i32, b: i32) -> i32 {
    (a.max(0) as u32).div_ceil(b.max(1) as u32) as i32
}
