//! The multi-criteria stop-arrival state model.
//!
//! A round-based search expands arrivals and offers each candidate to
//! its stop's Pareto set; this module provides the arrival variants,
//! the per-search arena they live in, the per-stop sets, and the
//! per-search state that ties them together. The round loop itself
//! belongs to the router built on top of this crate.

mod arrival;
mod config;
mod pareto;
mod state;

pub use arrival::{Arrival, ArrivalArena, ArrivalId, Lineage};
pub use config::SearchConfig;
pub use pareto::ParetoSet;
pub use state::SearchState;
