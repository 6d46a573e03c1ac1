//! Uniform-cost path search on a bounded 8-connected grid.
//!
//! This crate finds the cheapest route for a point-sized agent between two
//! cells of a map populated with fixed obstacles:
//!
//! - **Obstacle fields** ([`ObstacleField`], [`ReferenceMap`], [`CellSet`])
//! - **Move generation** over the eight-action set ([`MoveGenerator`])
//! - **Search state** with an indexed min-heap and decrease-key ([`SearchState`])
//! - **Dijkstra driver** with step/observer APIs ([`SearchEngine`])
//! - **Route reconstruction** from the parent chain ([`reconstruct`])
//!
//! # Quick start
//!
//! ```
//! use gridwalk_core::Point;
//! use gridwalk_paths::{find_path, ReferenceMap, SearchConfig, SearchStatus};
//!
//! let result = find_path(
//!     SearchConfig::reference(),
//!     &ReferenceMap,
//!     Point::new(5, 5),
//!     Point::new(20, 5),
//! )
//! .unwrap();
//! assert_eq!(result.status, SearchStatus::Succeeded);
//! assert_eq!(result.path.len(), 16);
//! ```
//!
//! # Costs
//!
//! Step costs are kept in exact tenths ([`Cost`]): an orthogonal move costs
//! 1.0 and a diagonal move 1.4.

mod config;
mod cost;
mod engine;
mod error;
mod moves;
mod obstacles;
mod reconstruct;
mod state;
mod traits;
mod validate;

pub use config::SearchConfig;
pub use cost::{Cost, StepCosts};
pub use engine::{
    ExplorationLog, Finalized, NoopObserver, SearchEngine, SearchObserver, SearchResult,
    SearchStats, SearchStatus, Step, find_path,
};
pub use error::{Endpoint, InvalidInput, SearchError, StateContext};
pub use moves::{Action, MoveGenerator};
pub use obstacles::{CellSet, NoObstacles, ReferenceMap, Shape};
pub use reconstruct::reconstruct;
pub use state::{Node, NodeId, Relaxation, SearchState};
pub use traits::ObstacleField;
pub use validate::validate_endpoints;
