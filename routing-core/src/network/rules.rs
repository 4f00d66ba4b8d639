//! Fare rule tables (GTFS Fares V2).
//!
//! A [`FareLegRule`] prices a single ride; a [`FareTransferRule`] prices
//! the transfer between two consecutive priced rides. Both tables are
//! ordered: when several rules match, the lowest `order` wins, and
//! remaining ties fall back to table position.

use std::fmt;

use super::{FareNetworkId, LegGroupId, StopIndex};

/// A rule pricing one ride.
///
/// A leg rule applies when the ride's fare networks, board stop and
/// alight stop all match. Empty `networks`, `from_stops` or `to_stops`
/// are wildcards matching everything, mirroring blank columns in the
/// source tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareLegRule {
    /// Fare networks this rule applies to (empty = all).
    pub networks: Vec<FareNetworkId>,
    /// Board stops this rule applies to (empty = all).
    pub from_stops: Vec<StopIndex>,
    /// Alight stops this rule applies to (empty = all).
    pub to_stops: Vec<StopIndex>,
    /// Leg group used to match transfer rules to this rule.
    pub leg_group: LegGroupId,
    /// Fare amount in cents.
    pub amount: i32,
    /// Tie-break order; lower wins when several rules match.
    pub order: u32,
}

impl FareLegRule {
    /// A flat-amount rule matching everything, in the blank leg group.
    pub fn flat(amount: i32) -> Self {
        Self {
            networks: Vec::new(),
            from_stops: Vec::new(),
            to_stops: Vec::new(),
            leg_group: LegGroupId::BLANK,
            amount,
            order: 0,
        }
    }
}

/// How a transfer rule combines with the next leg's own fare.
///
/// These are the transfer types the standard defines. Only the first two
/// are implemented by the pricing engine; a path priced through
/// [`MostExpensiveLegPlusAmount`](TransferType::MostExpensiveLegPlusAmount)
/// fails rather than silently mis-pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferType {
    /// Next leg costs its own amount plus the rule's (usually negative) amount.
    TotalCostPlusAmount,
    /// Next leg costs the rule's amount only; its own amount is discarded.
    FirstLegPlusAmount,
    /// Standard-defined, not implemented by this engine.
    MostExpensiveLegPlusAmount,
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransferType::TotalCostPlusAmount => "total-cost-plus-amount",
            TransferType::FirstLegPlusAmount => "first-leg-plus-amount",
            TransferType::MostExpensiveLegPlusAmount => "most-expensive-leg-plus-amount",
        };
        f.write_str(name)
    }
}

/// A rule discounting the transfer between two priced rides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareTransferRule {
    /// Leg group of the prior leg's rule ([`LegGroupId::BLANK`] = any).
    pub from_leg_group: LegGroupId,
    /// Leg group of the next leg's rule ([`LegGroupId::BLANK`] = any).
    pub to_leg_group: LegGroupId,
    /// How the discount combines with the next leg's fare.
    pub transfer_type: TransferType,
    /// Amount in cents, signed (a discount is negative).
    pub amount: i32,
    /// Tie-break order; lower wins when several rules match.
    pub order: u32,
}
