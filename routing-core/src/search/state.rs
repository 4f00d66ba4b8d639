//! Per-search state: the arrival arena and one Pareto set per stop.
//!
//! One search thread owns one `SearchState` and drives its own rounds
//! against it; nothing here is shared or locked. The round loop itself
//! (expanding patterns, scanning trips) lives with the router; this
//! type is its insertion point for every candidate arrival it
//! generates.

use crate::network::{ClockTime, PatternIndex, StopIndex};

use super::{Arrival, ArrivalArena, ArrivalId, ParetoSet, SearchConfig};

/// State owned by a single running search.
#[derive(Debug)]
pub struct SearchState {
    arena: ArrivalArena,
    stops: Vec<ParetoSet>,
    config: SearchConfig,
}

impl SearchState {
    /// Create state for a network with `stop_count` stops.
    pub fn new(stop_count: usize, config: SearchConfig) -> Self {
        Self {
            arena: ArrivalArena::new(),
            stops: vec![ParetoSet::new(); stop_count],
            config,
        }
    }

    /// Record an access arrival at a stop (round 0).
    ///
    /// Returns the retained arrival's handle, or `None` if the stop's
    /// Pareto set rejected it.
    pub fn add_access(
        &mut self,
        stop: StopIndex,
        origin_departure: ClockTime,
        access_duration: u32,
    ) -> Option<ArrivalId> {
        self.offer(Arrival::Access {
            stop,
            origin_departure,
            access_duration,
        })
    }

    /// Record alighting from a ride boarded at `parent`.
    ///
    /// The round advances by one; `None` if that would exceed the
    /// configured round limit or the Pareto set rejects the arrival.
    pub fn add_transit(
        &mut self,
        parent: ArrivalId,
        stop: StopIndex,
        arrival_time: ClockTime,
        pattern: PatternIndex,
        board_position: usize,
        board_time: ClockTime,
    ) -> Option<ArrivalId> {
        let round = self.arena[parent].round() + 1;
        if round > self.config.max_rounds {
            return None;
        }
        self.offer(Arrival::Transit {
            parent,
            round,
            stop,
            arrival_time,
            transfers: round - 1,
            pattern,
            board_position,
            board_time,
        })
    }

    /// Record a walk from `parent`'s stop. The round does not advance.
    pub fn add_transfer(
        &mut self,
        parent: ArrivalId,
        stop: StopIndex,
        arrival_time: ClockTime,
        walk_duration: u32,
    ) -> Option<ArrivalId> {
        let (round, transfers) = {
            let from = &self.arena[parent];
            (from.round(), from.transfers())
        };
        self.offer(Arrival::Transfer {
            parent,
            round,
            stop,
            arrival_time,
            transfers,
            walk_duration,
        })
    }

    fn offer(&mut self, arrival: Arrival) -> Option<ArrivalId> {
        let stop = arrival.stop();
        let id = self.arena.push(arrival);
        if self.stops[stop.index()].add(&self.arena, id) {
            Some(id)
        } else {
            self.arena.reclaim(id);
            None
        }
    }

    /// The non-dominated arrivals currently at a stop.
    pub fn arrivals_at(&self, stop: StopIndex) -> impl Iterator<Item = ArrivalId> + '_ {
        self.stops[stop.index()].iter()
    }

    /// The arena owning every retained arrival.
    pub fn arena(&self) -> &ArrivalArena {
        &self.arena
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hms(h, m, 0)
    }

    fn state() -> SearchState {
        SearchState::new(10, SearchConfig::default())
    }

    #[test]
    fn rounds_and_transfers_advance_with_boardings_only() {
        let mut state = state();
        let access = state.add_access(StopIndex(0), t(8, 0), 60).unwrap();

        let ride = state
            .add_transit(access, StopIndex(1), t(8, 20), PatternIndex(0), 0, t(8, 5))
            .unwrap();
        assert_eq!(state.arena()[ride].round(), 1);
        assert_eq!(state.arena()[ride].transfers(), 0);

        let walk = state
            .add_transfer(ride, StopIndex(2), t(8, 25), 300)
            .unwrap();
        assert_eq!(state.arena()[walk].round(), 1);
        assert_eq!(state.arena()[walk].transfers(), 0);

        let second_ride = state
            .add_transit(walk, StopIndex(3), t(8, 50), PatternIndex(1), 2, t(8, 30))
            .unwrap();
        assert_eq!(state.arena()[second_ride].round(), 2);
        assert_eq!(state.arena()[second_ride].transfers(), 1);
    }

    #[test]
    fn dominated_candidate_is_rejected_and_reclaimed() {
        let mut state = state();
        state.add_access(StopIndex(0), t(8, 0), 60).unwrap();
        let before = state.arena().len();

        // Same stop, strictly slower access: dominated in round 0.
        assert!(state.add_access(StopIndex(0), t(8, 0), 120).is_none());
        assert_eq!(state.arena().len(), before);
        assert_eq!(state.arrivals_at(StopIndex(0)).count(), 1);
    }

    #[test]
    fn round_limit_is_enforced() {
        let mut state = SearchState::new(
            4,
            SearchConfig {
                max_rounds: 1,
                ..SearchConfig::default()
            },
        );
        let access = state.add_access(StopIndex(0), t(8, 0), 0).unwrap();
        let ride = state
            .add_transit(access, StopIndex(1), t(8, 10), PatternIndex(0), 0, t(8, 1))
            .unwrap();
        assert!(
            state
                .add_transit(ride, StopIndex(2), t(8, 20), PatternIndex(1), 0, t(8, 12))
                .is_none()
        );
    }
}
