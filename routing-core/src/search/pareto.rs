//! Per-stop Pareto sets of stop arrivals.
//!
//! Each stop keeps the minimal set of mutually non-dominated arrivals
//! under the (arrival time, rounds) partial order. Every candidate the
//! search generates is offered to its stop's set; rejection means the
//! candidate cannot be part of any non-dominated itinerary through that
//! stop.

use crate::network::ClockTime;

use super::{Arrival, ArrivalArena, ArrivalId};

/// The non-dominated arrivals at one stop.
///
/// Transit and Transfer arrivals in the same round never dominate each
/// other through this set alone; keeping a same-round walk from
/// shadowing a same-round ride (and vice versa) is the round loop's
/// responsibility via two-phase processing, because doing it here would
/// cause needless exploration in the following round.
#[derive(Debug, Clone, Default)]
pub struct ParetoSet {
    members: Vec<ArrivalId>,
}

/// The criteria vector an arrival is compared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Label {
    time: ClockTime,
    round: u32,
}

impl Label {
    fn of(arrival: &Arrival) -> Self {
        Self {
            time: arrival.time(),
            round: arrival.round(),
        }
    }

    /// True if `self` dominates `other`: at least as good on both
    /// criteria and strictly better on at least one.
    fn dominates(self, other: Self) -> bool {
        self.time <= other.time
            && self.round <= other.round
            && (self.time < other.time || self.round < other.round)
    }
}

impl ParetoSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate arrival to the set.
    ///
    /// Every existing member the candidate dominates is removed. The
    /// candidate is rejected (returning `false`, set unchanged) if an
    /// existing member dominates it or ties it on both criteria; an
    /// equal vector adds nothing, so reinsertion is idempotent.
    pub fn add(&mut self, arena: &ArrivalArena, candidate: ArrivalId) -> bool {
        let label = Label::of(&arena[candidate]);

        let rejected = self.members.iter().any(|&member| {
            let existing = Label::of(&arena[member]);
            existing.dominates(label) || existing == label
        });
        if rejected {
            return false;
        }

        self.members
            .retain(|&member| !label.dominates(Label::of(&arena[member])));
        self.members.push(candidate);
        true
    }

    /// Iterate over the current members.
    pub fn iter(&self) -> impl Iterator<Item = ArrivalId> + '_ {
        self.members.iter().copied()
    }

    /// Number of non-dominated arrivals at this stop.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if no arrival has been retained.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
