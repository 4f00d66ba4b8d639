//! The immutable network index.
//!
//! [`TransitNetwork`] holds the static tables a search reads: patterns,
//! fare networks per route, the fare rule tables, and precomputed
//! membership bitsets over rule indices (by fare network, by board stop,
//! by alight stop, by leg group). It is built once per feed by
//! [`NetworkBuilder`] and never mutated afterwards, so any number of
//! concurrent searches can share it by reference without locking.

use std::collections::HashMap;

use fixedbitset::FixedBitSet;

use super::{
    FareLegRule, FareNetworkId, FareTransferRule, LegGroupId, LegRuleIndex, PatternIndex,
    RouteIndex, StopIndex, TransferRuleIndex,
};

/// Errors detected while building the network index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// A pattern or rule references a stop outside the network.
    #[error("stop {stop} is out of range for a network with {count} stops")]
    StopOutOfRange { stop: StopIndex, count: usize },

    /// A route, rule or as-route flag references an unknown fare network.
    #[error("fare network {network} is out of range for a network with {count} fare networks")]
    FareNetworkOutOfRange {
        network: FareNetworkId,
        count: usize,
    },

    /// A pattern references a route that was never added.
    #[error("route {route} is out of range for a network with {count} routes")]
    RouteOutOfRange { route: RouteIndex, count: usize },
}

/// A trip pattern: an ordered stop sequence on one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// The owning route.
    pub route: RouteIndex,
    /// Stops visited, in order.
    pub stops: Vec<StopIndex>,
}

/// The immutable, shared network index.
///
/// All reads take `&self`; the struct contains no interior mutability, so
/// sharing one instance across concurrently running searches is safe.
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    stop_count: usize,
    fare_network_count: usize,
    patterns: Vec<Pattern>,
    /// Fare network membership per route, one bitset over network ids.
    fare_networks_for_route: Vec<FixedBitSet>,
    /// Fare networks whose rides are priced as one continuous journey.
    as_route_networks: FixedBitSet,
    fare_leg_rules: Vec<FareLegRule>,
    fare_transfer_rules: Vec<FareTransferRule>,
    /// Leg rules per fare network id, bitsets over leg-rule indices.
    leg_rules_for_network: Vec<FixedBitSet>,
    /// Leg rules per board stop.
    leg_rules_for_from_stop: Vec<FixedBitSet>,
    /// Leg rules per alight stop.
    leg_rules_for_to_stop: Vec<FixedBitSet>,
    /// Transfer rules per from-side leg group. Exact buckets are OR'ed
    /// with the blank bucket at build time; the blank key holds the pure
    /// wildcard bucket used as a fallback.
    transfer_rules_for_from_group: HashMap<LegGroupId, FixedBitSet>,
    /// Transfer rules per to-side leg group, same layout.
    transfer_rules_for_to_group: HashMap<LegGroupId, FixedBitSet>,
}

impl TransitNetwork {
    /// Number of stops in the network.
    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    /// Number of fare networks.
    pub fn fare_network_count(&self) -> usize {
        self.fare_network_count
    }

    /// Look up a pattern.
    pub fn pattern(&self, pattern: PatternIndex) -> &Pattern {
        &self.patterns[pattern.index()]
    }

    /// The stop at `position` within a pattern (used to derive a board
    /// stop from a recorded boarding position).
    pub fn stop_at(&self, pattern: PatternIndex, position: usize) -> StopIndex {
        self.patterns[pattern.index()].stops[position]
    }

    /// Fare networks the pattern's route belongs to.
    pub fn fare_networks_for_pattern(&self, pattern: PatternIndex) -> &FixedBitSet {
        let route = self.patterns[pattern.index()].route;
        &self.fare_networks_for_route[route.index()]
    }

    /// As-route fare networks the pattern's route belongs to.
    ///
    /// Returns an owned set so the caller may intersect it with later
    /// rides without touching the shared index.
    pub fn as_route_networks_for_pattern(&self, pattern: PatternIndex) -> FixedBitSet {
        let mut networks = self.fare_networks_for_pattern(pattern).clone();
        networks.intersect_with(&self.as_route_networks);
        networks
    }

    /// The set of as-route fare networks.
    pub fn as_route_networks(&self) -> &FixedBitSet {
        &self.as_route_networks
    }

    /// Look up a fare leg rule.
    pub fn leg_rule(&self, rule: LegRuleIndex) -> &FareLegRule {
        &self.fare_leg_rules[rule.index()]
    }

    /// Number of fare leg rules.
    pub fn leg_rule_count(&self) -> usize {
        self.fare_leg_rules.len()
    }

    /// Look up a fare transfer rule.
    pub fn transfer_rule(&self, rule: TransferRuleIndex) -> &FareTransferRule {
        &self.fare_transfer_rules[rule.index()]
    }

    /// Leg rules matching any of the given fare networks (union over the
    /// per-network bitsets). Returns an owned set the caller may
    /// intersect further.
    pub fn leg_rules_matching_networks(&self, networks: &FixedBitSet) -> FixedBitSet {
        let mut matching = FixedBitSet::with_capacity(self.fare_leg_rules.len());
        for network in networks.ones() {
            matching.union_with(&self.leg_rules_for_network[network]);
        }
        matching
    }

    /// Leg rules whose board-stop set contains `stop`.
    pub fn leg_rules_from_stop(&self, stop: StopIndex) -> &FixedBitSet {
        &self.leg_rules_for_from_stop[stop.index()]
    }

    /// Leg rules whose alight-stop set contains `stop`.
    pub fn leg_rules_to_stop(&self, stop: StopIndex) -> &FixedBitSet {
        &self.leg_rules_for_to_stop[stop.index()]
    }

    /// Transfer rules bucketed by from-side leg group, if any rule names
    /// that group (the blank bucket is already merged in).
    pub fn transfer_rules_from(&self, group: LegGroupId) -> Option<&FixedBitSet> {
        self.transfer_rules_for_from_group.get(&group)
    }

    /// Transfer rules bucketed by to-side leg group.
    pub fn transfer_rules_to(&self, group: LegGroupId) -> Option<&FixedBitSet> {
        self.transfer_rules_for_to_group.get(&group)
    }
}

/// Builds a [`TransitNetwork`] from in-memory tables.
///
/// Ingestion from source feeds happens elsewhere; this builder takes the
/// already-parsed tables, validates cross-references, and precomputes
/// the membership bitsets the fare engine intersects at query time.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    stop_count: usize,
    fare_network_count: usize,
    route_networks: Vec<Vec<FareNetworkId>>,
    patterns: Vec<Pattern>,
    as_route: Vec<FareNetworkId>,
    leg_rules: Vec<FareLegRule>,
    transfer_rules: Vec<FareTransferRule>,
}

impl NetworkBuilder {
    /// Start a builder for a network with the given stop and fare
    /// network universes.
    pub fn new(stop_count: usize, fare_network_count: usize) -> Self {
        Self {
            stop_count,
            fare_network_count,
            ..Self::default()
        }
    }

    /// Add a route belonging to the given fare networks.
    pub fn add_route(&mut self, networks: impl Into<Vec<FareNetworkId>>) -> RouteIndex {
        self.route_networks.push(networks.into());
        RouteIndex(self.route_networks.len() as u32 - 1)
    }

    /// Add a pattern on a route with an ordered stop sequence.
    pub fn add_pattern(
        &mut self,
        route: RouteIndex,
        stops: impl Into<Vec<StopIndex>>,
    ) -> PatternIndex {
        self.patterns.push(Pattern {
            route,
            stops: stops.into(),
        });
        PatternIndex(self.patterns.len() as u32 - 1)
    }

    /// Flag a fare network as-route: consecutive rides on it are priced
    /// as one continuous journey.
    pub fn mark_as_route(&mut self, network: FareNetworkId) {
        self.as_route.push(network);
    }

    /// Append a fare leg rule. Table position is the tie-break of last
    /// resort, so insertion order matters.
    pub fn add_leg_rule(&mut self, rule: FareLegRule) -> LegRuleIndex {
        self.leg_rules.push(rule);
        LegRuleIndex(self.leg_rules.len() as u32 - 1)
    }

    /// Append a fare transfer rule.
    pub fn add_transfer_rule(&mut self, rule: FareTransferRule) -> TransferRuleIndex {
        self.transfer_rules.push(rule);
        TransferRuleIndex(self.transfer_rules.len() as u32 - 1)
    }

    /// Validate cross-references and precompute the membership indices.
    pub fn build(self) -> Result<TransitNetwork, NetworkError> {
        self.validate()?;

        let leg_rule_count = self.leg_rules.len();
        let transfer_rule_count = self.transfer_rules.len();

        let fare_networks_for_route = self
            .route_networks
            .iter()
            .map(|networks| {
                let mut set = FixedBitSet::with_capacity(self.fare_network_count);
                for network in networks {
                    set.insert(network.index());
                }
                set
            })
            .collect();

        let mut as_route_networks = FixedBitSet::with_capacity(self.fare_network_count);
        for network in &self.as_route {
            as_route_networks.insert(network.index());
        }

        // Leg-rule membership by fare network, board stop and alight
        // stop. An empty column on the rule is a wildcard, so the rule
        // lands in every bucket of that index.
        let mut leg_rules_for_network =
            vec![FixedBitSet::with_capacity(leg_rule_count); self.fare_network_count];
        let mut leg_rules_for_from_stop =
            vec![FixedBitSet::with_capacity(leg_rule_count); self.stop_count];
        let mut leg_rules_for_to_stop =
            vec![FixedBitSet::with_capacity(leg_rule_count); self.stop_count];
        for (idx, rule) in self.leg_rules.iter().enumerate() {
            if rule.networks.is_empty() {
                for set in &mut leg_rules_for_network {
                    set.insert(idx);
                }
            } else {
                for network in &rule.networks {
                    leg_rules_for_network[network.index()].insert(idx);
                }
            }
            if rule.from_stops.is_empty() {
                for set in &mut leg_rules_for_from_stop {
                    set.insert(idx);
                }
            } else {
                for stop in &rule.from_stops {
                    leg_rules_for_from_stop[stop.index()].insert(idx);
                }
            }
            if rule.to_stops.is_empty() {
                for set in &mut leg_rules_for_to_stop {
                    set.insert(idx);
                }
            } else {
                for stop in &rule.to_stops {
                    leg_rules_for_to_stop[stop.index()].insert(idx);
                }
            }
        }

        let transfer_rules_for_from_group = Self::group_buckets(
            transfer_rule_count,
            self.transfer_rules.iter().map(|r| r.from_leg_group),
        );
        let transfer_rules_for_to_group = Self::group_buckets(
            transfer_rule_count,
            self.transfer_rules.iter().map(|r| r.to_leg_group),
        );

        Ok(TransitNetwork {
            stop_count: self.stop_count,
            fare_network_count: self.fare_network_count,
            patterns: self.patterns,
            fare_networks_for_route,
            as_route_networks,
            fare_leg_rules: self.leg_rules,
            fare_transfer_rules: self.transfer_rules,
            leg_rules_for_network,
            leg_rules_for_from_stop,
            leg_rules_for_to_stop,
            transfer_rules_for_from_group,
            transfer_rules_for_to_group,
        })
    }

    /// Bucket transfer rules by leg group, then merge the blank bucket
    /// into every exact bucket so a single lookup sees both exact and
    /// wildcard matches.
    fn group_buckets(
        rule_count: usize,
        groups: impl Iterator<Item = LegGroupId>,
    ) -> HashMap<LegGroupId, FixedBitSet> {
        let mut buckets: HashMap<LegGroupId, FixedBitSet> = HashMap::new();
        for (idx, group) in groups.enumerate() {
            buckets
                .entry(group)
                .or_insert_with(|| FixedBitSet::with_capacity(rule_count))
                .insert(idx);
        }
        if let Some(blank) = buckets.get(&LegGroupId::BLANK).cloned() {
            for (group, bucket) in buckets.iter_mut() {
                if !group.is_blank() {
                    bucket.union_with(&blank);
                }
            }
        }
        buckets
    }

    fn validate(&self) -> Result<(), NetworkError> {
        let check_stop = |stop: StopIndex| {
            if stop.index() >= self.stop_count {
                Err(NetworkError::StopOutOfRange {
                    stop,
                    count: self.stop_count,
                })
            } else {
                Ok(())
            }
        };
        let check_network = |network: FareNetworkId| {
            if network.index() >= self.fare_network_count {
                Err(NetworkError::FareNetworkOutOfRange {
                    network,
                    count: self.fare_network_count,
                })
            } else {
                Ok(())
            }
        };

        for pattern in &self.patterns {
            if pattern.route.index() >= self.route_networks.len() {
                return Err(NetworkError::RouteOutOfRange {
                    route: pattern.route,
                    count: self.route_networks.len(),
                });
            }
            for &stop in &pattern.stops {
                check_stop(stop)?;
            }
        }
        for networks in &self.route_networks {
            for &network in networks {
                check_network(network)?;
            }
        }
        for &network in &self.as_route {
            check_network(network)?;
        }
        for rule in &self.leg_rules {
            for &network in &rule.networks {
                check_network(network)?;
            }
            for &stop in rule.from_stops.iter().chain(&rule.to_stops) {
                check_stop(stop)?;
            }
        }
        Ok(())
    }
}
