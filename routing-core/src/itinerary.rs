//! Finished itineraries handed off to the presentation layer.
//!
//! Once a candidate path reaches the destination and survives pricing,
//! it becomes an [`Itinerary`]: plain data carrying the three criteria
//! (arrival time, transfers, fare) and a leg summary. The presentation
//! layer serializes these however it likes; no format is defined here.

use serde::{Deserialize, Serialize};

use crate::fare::FareBounds;
use crate::network::{ClockTime, PatternIndex, StopIndex, TransitNetwork};
use crate::search::{Arrival, ArrivalArena, ArrivalId};

/// One leg of a finished itinerary; `pattern` is absent for walks and
/// access legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryLeg {
    /// Where the leg starts.
    pub from_stop: StopIndex,
    /// Where the leg ends.
    pub to_stop: StopIndex,
    /// Departure time of the leg.
    pub start_time: ClockTime,
    /// Arrival time of the leg.
    pub end_time: ClockTime,
    /// The ridden pattern, absent on street legs.
    pub pattern: Option<PatternIndex>,
}

/// A finished, priced itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Arrival time at the destination.
    pub arrival_time: ClockTime,
    /// Number of transfers made.
    pub transfers: u32,
    /// Total fare in cents.
    pub fare: i32,
    /// Legs in travel order (street legs included).
    pub legs: Vec<ItineraryLeg>,
}

impl Itinerary {
    /// Assemble an itinerary from a priced path.
    pub fn from_path(
        network: &TransitNetwork,
        arena: &ArrivalArena,
        path_end: ArrivalId,
        fare: &FareBounds,
    ) -> Self {
        let end = &arena[path_end];
        let mut legs: Vec<ItineraryLeg> = arena
            .lineage(path_end)
            .filter_map(|arrival| match *arrival {
                Arrival::Access { .. } => None,
                Arrival::Transit {
                    stop,
                    arrival_time,
                    pattern,
                    board_position,
                    board_time,
                    ..
                } => Some(ItineraryLeg {
                    from_stop: network.stop_at(pattern, board_position),
                    to_stop: stop,
                    start_time: board_time,
                    end_time: arrival_time,
                    pattern: Some(pattern),
                }),
                Arrival::Transfer {
                    parent,
                    stop,
                    arrival_time,
                    walk_duration,
                    ..
                } => Some(ItineraryLeg {
                    from_stop: arena[parent].stop(),
                    to_stop: stop,
                    start_time: ClockTime::from_seconds(
                        arrival_time.seconds().saturating_sub(walk_duration),
                    ),
                    end_time: arrival_time,
                    pattern: None,
                }),
            })
            .collect();
        legs.reverse();

        Self {
            arrival_time: end.time(),
            transfers: end.transfers(),
            fare: fare.amount,
            legs,
        }
    }

    fn dominates(&self, other: &Self) -> bool {
        self.arrival_time <= other.arrival_time
            && self.transfers <= other.transfers
            && self.fare <= other.fare
            && (self.arrival_time < other.arrival_time
                || self.transfers < other.transfers
                || self.fare < other.fare)
    }
}

/// Remove dominated itineraries.
///
/// An itinerary is dominated if another arrives no later, transfers no
/// more, and costs no more, with at least one strict improvement.
pub fn remove_dominated(itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    if itineraries.len() <= 1 {
        return itineraries;
    }

    let mut result: Vec<Itinerary> = Vec::with_capacity(itineraries.len());
    for itinerary in itineraries {
        if result.iter().any(|existing| existing.dominates(&itinerary)) {
            continue;
        }
        result.retain(|existing| !itinerary.dominates(existing));
        result.push(itinerary);
    }
    result
}

/// Rank itineraries best-first: by arrival time, then fewer transfers,
/// then lower fare.
pub fn rank(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by(|a, b| {
        a.arrival_time
            .cmp(&b.arrival_time)
            .then(a.transfers.cmp(&b.transfers))
            .then(a.fare.cmp(&b.fare))
    });
    itineraries
}
