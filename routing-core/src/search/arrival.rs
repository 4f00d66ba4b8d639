//! Stop arrivals and the per-search arena that owns them.
//!
//! An [`Arrival`] is one way to be at a stop at a given time after a
//! given number of rounds. Arrivals link to their parent arrival,
//! forming the path lineage a finished itinerary is reconstructed from.
//! Parents are referenced by [`ArrivalId`] handle into an
//! [`ArrivalArena`] owned by the search, so lineage is an append-only
//! chain of plain indices; no arrival is ever mutated after creation.

use std::ops::Index;

use crate::network::{ClockTime, PatternIndex, StopIndex, TransitNetwork};

/// Handle to an arrival in its search's [`ArrivalArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrivalId(u32);

impl ArrivalId {
    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One way to be at a stop: by access leg, by transit, or by walking.
///
/// Only `Access` has no parent. Walking the parent chain from any
/// arrival always terminates in an `Access` root, and the transit legs
/// met along the way (in reverse) are the itinerary's rides; the
/// on-street variants carry no pattern, so fare processing skips them
/// by shape rather than by sentinel value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arrival {
    /// Reaching the first stop from the origin (round 0).
    Access {
        /// Stop reached by the access leg.
        stop: StopIndex,
        /// Departure time from the origin.
        origin_departure: ClockTime,
        /// Access leg duration in seconds.
        access_duration: u32,
    },
    /// Alighting from a transit ride.
    Transit {
        /// The arrival this ride was boarded from.
        parent: ArrivalId,
        /// Round (number of boardings so far).
        round: u32,
        /// Alight stop.
        stop: StopIndex,
        /// Alight time.
        arrival_time: ClockTime,
        /// Cumulative transfer count.
        transfers: u32,
        /// The boarded pattern.
        pattern: PatternIndex,
        /// Boarding position within the pattern's stop sequence; the
        /// board stop is derived from the pattern, not stored.
        board_position: usize,
        /// Boarding time.
        board_time: ClockTime,
    },
    /// Walking from the parent's stop to a nearby stop.
    Transfer {
        /// The arrival the walk started from.
        parent: ArrivalId,
        /// Round, unchanged from the parent (walking is not a boarding).
        round: u32,
        /// Stop reached by the walk.
        stop: StopIndex,
        /// Arrival time at the end of the walk.
        arrival_time: ClockTime,
        /// Cumulative transfer count, unchanged from the parent.
        transfers: u32,
        /// Walk duration in seconds.
        walk_duration: u32,
    },
}

impl Arrival {
    /// The stop this arrival is at.
    pub fn stop(&self) -> StopIndex {
        match *self {
            Arrival::Access { stop, .. }
            | Arrival::Transit { stop, .. }
            | Arrival::Transfer { stop, .. } => stop,
        }
    }

    /// Arrival time at the stop.
    pub fn time(&self) -> ClockTime {
        match *self {
            Arrival::Access {
                origin_departure,
                access_duration,
                ..
            } => origin_departure.plus_seconds(access_duration),
            Arrival::Transit { arrival_time, .. } | Arrival::Transfer { arrival_time, .. } => {
                arrival_time
            }
        }
    }

    /// Round number (boardings considered so far).
    pub fn round(&self) -> u32 {
        match *self {
            Arrival::Access { .. } => 0,
            Arrival::Transit { round, .. } | Arrival::Transfer { round, .. } => round,
        }
    }

    /// Cumulative transfer count.
    pub fn transfers(&self) -> u32 {
        match *self {
            Arrival::Access { .. } => 0,
            Arrival::Transit { transfers, .. } | Arrival::Transfer { transfers, .. } => transfers,
        }
    }

    /// Parent arrival, absent only for the access root.
    pub fn parent(&self) -> Option<ArrivalId> {
        match *self {
            Arrival::Access { .. } => None,
            Arrival::Transit { parent, .. } | Arrival::Transfer { parent, .. } => Some(parent),
        }
    }

    /// True for arrivals reached on the street rather than by transit.
    pub fn is_on_street(&self) -> bool {
        !matches!(self, Arrival::Transit { .. })
    }

    /// Board stop of a transit arrival, derived from the pattern's stop
    /// sequence. `None` for on-street arrivals.
    pub fn board_stop(&self, network: &TransitNetwork) -> Option<StopIndex> {
        match *self {
            Arrival::Transit {
                pattern,
                board_position,
                ..
            } => Some(network.stop_at(pattern, board_position)),
            _ => None,
        }
    }
}

/// Arena owning every arrival created by one search.
///
/// Arrivals are appended during rounds and referenced by [`ArrivalId`];
/// dominated arrivals simply stop being referenced. Only the most
/// recently pushed arrival can be reclaimed (before anything references
/// it), which is exactly the insertion-rejected case.
#[derive(Debug, Default)]
pub struct ArrivalArena {
    arrivals: Vec<Arrival>,
}

impl ArrivalArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arrival, returning its handle.
    pub fn push(&mut self, arrival: Arrival) -> ArrivalId {
        self.arrivals.push(arrival);
        ArrivalId(self.arrivals.len() as u32 - 1)
    }

    /// Reclaim the most recently pushed arrival if its handle matches.
    ///
    /// Used when a freshly created candidate is rejected by its stop's
    /// Pareto set before anything can reference it.
    pub fn reclaim(&mut self, id: ArrivalId) {
        if id.index() + 1 == self.arrivals.len() {
            self.arrivals.pop();
        }
    }

    /// Number of live arrivals.
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    /// True if no arrival has been created yet.
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    /// Walk the parent chain from `end` back to the access root,
    /// yielding each arrival on the way (end first).
    pub fn lineage(&self, end: ArrivalId) -> Lineage<'_> {
        Lineage {
            arena: self,
            next: Some(end),
        }
    }
}

impl Index<ArrivalId> for ArrivalArena {
    type Output = Arrival;

    fn index(&self, id: ArrivalId) -> &Arrival {
        &self.arrivals[id.index()]
    }
}

/// Iterator over an arrival's ancestry, end first.
#[derive(Debug)]
pub struct Lineage<'a> {
    arena: &'a ArrivalArena,
    next: Option<ArrivalId>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a Arrival;

    fn next(&mut self) -> Option<&'a Arrival> {
        let arrival = &self.arena[self.next?];
        self.next = arrival.parent();
        Some(arrival)
    }
}
