//! The as-route splicer.
//!
//! Consecutive rides that stay on a continuous as-route fare network
//! are priced as one leg, as if the rider never left the vehicle. The
//! merge is greedy: each ride extends the splice as long as the running
//! intersection of as-route networks stays non-empty, which can miss a
//! globally cheaper unbundled pricing. That trade-off is accepted here;
//! finding the optimum would need backtracking over splice boundaries.

use fixedbitset::FixedBitSet;

use crate::network::{ClockTime, PatternIndex, StopIndex, TransitNetwork};

/// One transit ride collected from a path's lineage, pre-splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RideLeg {
    pub pattern: PatternIndex,
    pub board_stop: StopIndex,
    pub alight_stop: StopIndex,
    pub board_time: ClockTime,
    pub alight_time: ClockTime,
}

/// The as-route state of a priced leg: the networks still able to
/// extend the ride, and the stop where the spliced ride began.
///
/// A non-empty network set always comes with its board stop, so a later
/// extension of the path can resume the splice without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsRouteSpan {
    /// Running intersection of as-route fare networks over the span.
    pub networks: FixedBitSet,
    /// Board stop of the first ride in the span.
    pub board_stop: StopIndex,
}

/// A leg ready for rule resolution, possibly spanning several rides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PricedLeg {
    pub board_stop: StopIndex,
    pub alight_stop: StopIndex,
    pub board_time: ClockTime,
    pub alight_time: ClockTime,
    /// Fare networks leg rules should match against: the route's full
    /// membership for a single ride, or the running as-route
    /// intersection for a spliced one.
    pub fare_networks: FixedBitSet,
    /// As-route state carried into the transfer allowance when this is
    /// the path's last leg.
    pub as_route: Option<AsRouteSpan>,
}

/// Merge consecutive as-route rides into priced legs.
pub(crate) fn splice_as_route(network: &TransitNetwork, rides: &[RideLeg]) -> Vec<PricedLeg> {
    let mut priced = Vec::with_capacity(rides.len());

    let mut i = 0;
    while i < rides.len() {
        let ride = &rides[i];
        let mut fare_networks = network.fare_networks_for_pattern(ride.pattern).clone();
        let mut alight_stop = ride.alight_stop;
        let mut alight_time = ride.alight_time;
        let mut as_route = None;

        let mut span_networks = network.as_route_networks_for_pattern(ride.pattern);
        if !span_networks.is_clear() {
            for j in (i + 1)..rides.len() {
                let mut merged = span_networks.clone();
                merged.intersect_with(&network.as_route_networks_for_pattern(rides[j].pattern));
                if merged.is_clear() {
                    break;
                }
                // Extend the ride and restrict pricing to the networks
                // actually continuous over the whole span.
                span_networks = merged;
                alight_stop = rides[j].alight_stop;
                alight_time = rides[j].alight_time;
                fare_networks = span_networks.clone();
                i = j;
            }
            as_route = Some(AsRouteSpan {
                networks: span_networks,
                board_stop: ride.board_stop,
            });
        }

        priced.push(PricedLeg {
            board_stop: ride.board_stop,
            alight_stop,
            board_time: ride.board_time,
            alight_time,
            fare_networks,
            as_route,
        });
        i += 1;
    }

    priced
}
