//! Terminal rendering for `gridwalk` searches.
//!
//! The map is downsampled onto a [`Canvas`] of character cells, with larger
//! y drawn higher on screen. [`render_static`] prints the finished picture
//! once; [`replay`] animates the finalize events of a run and then the route.
//!
//! ```
//! use gridwalk_core::Point;
//! use gridwalk_paths::{NoObstacles, SearchConfig};
//! use gridwalk_term::{Canvas, Scale};
//!
//! let cfg = SearchConfig::with_size(16, 16);
//! let mut canvas = Canvas::new(cfg.bounds, Scale::new(4, 8), &NoObstacles);
//! canvas.mark_endpoints(Point::new(0, 0), Point::new(15, 15));
//! assert_eq!(canvas.to_ascii(), "   G\nS   \n");
//! ```

mod canvas;
mod render;

pub use canvas::{Canvas, Glyph, ParseScaleError, Scale};
pub use render::{ReplayOptions, render_static, replay};
