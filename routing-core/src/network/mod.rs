//! The static network index.
//!
//! Immutable tables shared by all concurrent searches: patterns, fare
//! network membership, the Fares V2 rule tables and their precomputed
//! membership bitsets. Built once per feed, read-only afterwards.

mod ids;
mod index;
mod rules;

pub use ids::{
    ClockTime, FareNetworkId, LegGroupId, LegRuleIndex, PatternIndex, RouteIndex, StopIndex,
    TransferRuleIndex,
};
pub use index::{NetworkBuilder, NetworkError, Pattern, TransitNetwork};
pub use rules::{FareLegRule, FareTransferRule, TransferType};
