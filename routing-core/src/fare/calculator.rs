//! The fare accumulator.
//!
//! Prices a completed candidate path: walk the arrival lineage to
//! collect its transit rides, splice as-route spans, resolve a leg rule
//! per priced leg, and apply transfer rules between consecutive legs.
//! The resulting [`FareBounds`] is the fare criterion the router feeds
//! into final itinerary comparison.

use tracing::warn;

use crate::network::{
    ClockTime, LegRuleIndex, StopIndex, TransferRuleIndex, TransferType, TransitNetwork,
};
use crate::search::{Arrival, ArrivalArena, ArrivalId};

use super::splice::{RideLeg, splice_as_route};
use super::transfer::{TransferRuleCache, TransferRuleKey, search_transfer_rule};
use super::{FareBounds, FareError, TransferAllowance, lowest_order};

/// Default capacity of the per-search transfer-rule memo.
pub const TRANSFER_RULE_CACHE_CAPACITY: u64 = 1000;

/// Prices candidate paths against a shared network index.
///
/// One calculator is owned by one search: the network reference is
/// shared and read-only, the memo cache is private to the search.
#[derive(Debug)]
pub struct FareCalculator<'a> {
    network: &'a TransitNetwork,
    transfer_cache: TransferRuleCache,
}

impl<'a> FareCalculator<'a> {
    /// Create a calculator with the default cache capacity.
    pub fn new(network: &'a TransitNetwork) -> Self {
        Self::with_cache_capacity(network, TRANSFER_RULE_CACHE_CAPACITY)
    }

    /// Create a calculator with an explicit cache capacity.
    pub fn with_cache_capacity(network: &'a TransitNetwork, capacity: u64) -> Self {
        Self {
            network,
            transfer_cache: TransferRuleCache::new(capacity),
        }
    }

    /// Price the path ending at `path_end`.
    ///
    /// `_max_clock_time` is the search's time budget, threaded through
    /// for parity with the router's other criteria; it does not affect
    /// which legs are priced.
    ///
    /// # Errors
    ///
    /// Fatal for this candidate path only: [`FareError::NoMatchingFareRule`]
    /// if a leg has no covering rule, [`FareError::UnsupportedTransferType`]
    /// if a matched transfer rule uses a type this engine does not
    /// implement. The search drops the path and continues.
    pub fn calculate_fare(
        &self,
        arena: &ArrivalArena,
        path_end: ArrivalId,
        _max_clock_time: ClockTime,
    ) -> Result<FareBounds, FareError> {
        let rides = self.collect_rides(arena, path_end);
        if rides.is_empty() {
            return Ok(FareBounds::zero());
        }

        let priced = splice_as_route(self.network, &rides);

        let mut cumulative = 0i32;
        let mut prev_rule: Option<LegRuleIndex> = None;
        let mut open_as_route = None;

        for leg in &priced {
            let rule_idx = self.resolve_leg_rule(leg.board_stop, leg.alight_stop, leg)?;
            let rule = self.network.leg_rule(rule_idx);

            let transfer = prev_rule.and_then(|prev| self.transfer_rule(prev, rule_idx));
            match transfer {
                // First leg, or no discounted transfer: full fare.
                None => cumulative += rule.amount,
                Some(transfer_idx) => {
                    let transfer_rule = self.network.transfer_rule(transfer_idx);
                    match transfer_rule.transfer_type {
                        TransferType::TotalCostPlusAmount => {
                            if transfer_rule.amount > 0 {
                                warn!(
                                    amount = transfer_rule.amount,
                                    "transfer rule surcharges rather than discounts"
                                );
                            }
                            let increment = rule.amount + transfer_rule.amount;
                            if increment < 0 {
                                warn!(increment, "fare increment is negative");
                            }
                            cumulative += increment;
                        }
                        TransferType::FirstLegPlusAmount => cumulative += transfer_rule.amount,
                        unsupported => {
                            return Err(FareError::UnsupportedTransferType(unsupported));
                        }
                    }
                }
            }

            prev_rule = Some(rule_idx);
            open_as_route = leg.as_route.clone();
        }

        Ok(FareBounds {
            amount: cumulative,
            allowance: TransferAllowance {
                last_leg_rule: prev_rule,
                as_route: open_as_route,
            },
        })
    }

    /// Look up the transfer rule between two resolved leg rules, if
    /// any, memoized by the pair's leg groups.
    pub fn transfer_rule(
        &self,
        from: LegRuleIndex,
        to: LegRuleIndex,
    ) -> Option<TransferRuleIndex> {
        let key = TransferRuleKey {
            from: self.network.leg_rule(from).leg_group,
            to: self.network.leg_rule(to).leg_group,
        };
        self.transfer_cache
            .get_with(key, || search_transfer_rule(self.network, key))
    }

    /// Walk the lineage from `path_end` to the access root, collecting
    /// transit rides in chronological order. On-street arrivals carry
    /// no pattern and are skipped by shape.
    fn collect_rides(&self, arena: &ArrivalArena, path_end: ArrivalId) -> Vec<RideLeg> {
        let mut rides: Vec<RideLeg> = arena
            .lineage(path_end)
            .filter_map(|arrival| match *arrival {
                Arrival::Transit {
                    stop,
                    arrival_time,
                    pattern,
                    board_position,
                    board_time,
                    ..
                } => Some(RideLeg {
                    pattern,
                    board_stop: self.network.stop_at(pattern, board_position),
                    alight_stop: stop,
                    board_time,
                    alight_time: arrival_time,
                }),
                _ => None,
            })
            .collect();
        rides.reverse();
        rides
    }

    /// Resolve the single fare leg rule for a priced leg: the
    /// intersection of the network, board-stop and alight-stop
    /// membership indices. Among multiple matches the lowest tie-break
    /// order wins; a remaining tie is a feed-data quality issue, logged
    /// and resolved by table position.
    fn resolve_leg_rule(
        &self,
        board: StopIndex,
        alight: StopIndex,
        leg: &super::splice::PricedLeg,
    ) -> Result<LegRuleIndex, FareError> {
        let mut candidates = self.network.leg_rules_matching_networks(&leg.fare_networks);
        candidates.intersect_with(self.network.leg_rules_from_stop(board));
        candidates.intersect_with(self.network.leg_rules_to_stop(alight));

        lowest_order(
            candidates.ones(),
            |idx| self.network.leg_rule(LegRuleIndex(idx as u32)).order,
            "fare leg",
        )
        .map(|idx| LegRuleIndex(idx as u32))
        .ok_or(FareError::NoMatchingFareRule { board, alight })
    }
}
