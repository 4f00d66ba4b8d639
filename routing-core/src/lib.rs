//! Routing core for a multi-modal transit trip planner.
//!
//! Finds itineraries that are simultaneously good on several
//! incommensurable criteria (arrival time, transfers, fare) and keeps
//! the non-dominated set. Two tightly coupled pieces do the work: the
//! multi-criteria stop-arrival model in [`search`], which builds and
//! prunes candidate paths round by round, and the GTFS Fares V2 pricing
//! engine in [`fare`], which turns a candidate path's leg sequence into
//! the monetary cost used as a search criterion.
//!
//! The static tables both pieces read live in [`network`]: built once
//! per feed, immutable afterwards, shared by reference across any
//! number of concurrent searches. Everything mutable (the arrival
//! arena, the per-stop Pareto sets, the transfer-rule memo) is owned by
//! a single search and needs no locking.
//!
//! Feed ingestion, the presentation layer and search dispatch live in
//! other components; this crate hands finished itineraries off as
//! plain data.

pub mod fare;
pub mod fare_table;
pub mod itinerary;
pub mod network;
pub mod search;
