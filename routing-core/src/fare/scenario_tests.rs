//! End-to-end pricing scenarios for the fare accumulator.

use crate::network::{
    ClockTime, FareLegRule, FareNetworkId, FareTransferRule, LegGroupId, LegRuleIndex,
    NetworkBuilder, PatternIndex, StopIndex, TransferType, TransitNetwork,
};
use crate::search::{Arrival, ArrivalArena, ArrivalId};

use super::{FareCalculator, FareError};

const NO_BUDGET: ClockTime = ClockTime::from_hms(48, 0, 0);

fn t(h: u32, m: u32) -> ClockTime {
    ClockTime::from_hms(h, m, 0)
}

/// Two routes in separate fare networks: pattern 0 rides stops 0->1 on
/// network 0 (rule group 1, 2.50), pattern 1 rides stops 1->2 on
/// network 1 (rule group 2, 2.00).
fn two_leg_network(transfer_rules: &[FareTransferRule]) -> TransitNetwork {
    let mut builder = NetworkBuilder::new(3, 2);
    let first = builder.add_route(vec![FareNetworkId(0)]);
    builder.add_pattern(first, vec![StopIndex(0), StopIndex(1)]);
    let second = builder.add_route(vec![FareNetworkId(1)]);
    builder.add_pattern(second, vec![StopIndex(1), StopIndex(2)]);

    builder.add_leg_rule(FareLegRule {
        networks: vec![FareNetworkId(0)],
        leg_group: LegGroupId(1),
        ..FareLegRule::flat(250)
    });
    builder.add_leg_rule(FareLegRule {
        networks: vec![FareNetworkId(1)],
        leg_group: LegGroupId(2),
        ..FareLegRule::flat(200)
    });
    for rule in transfer_rules {
        builder.add_transfer_rule(rule.clone());
    }
    builder.build().unwrap()
}

/// Access at stop 0, ride pattern 0 to stop 1, ride pattern 1 to stop 2.
fn two_leg_path(arena: &mut ArrivalArena) -> ArrivalId {
    let access = arena.push(Arrival::Access {
        stop: StopIndex(0),
        origin_departure: t(8, 0),
        access_duration: 0,
    });
    let first = arena.push(Arrival::Transit {
        parent: access,
        round: 1,
        stop: StopIndex(1),
        arrival_time: t(8, 30),
        transfers: 0,
        pattern: PatternIndex(0),
        board_position: 0,
        board_time: t(8, 5),
    });
    arena.push(Arrival::Transit {
        parent: first,
        round: 2,
        stop: StopIndex(2),
        arrival_time: t(9, 0),
        transfers: 1,
        pattern: PatternIndex(1),
        board_position: 0,
        board_time: t(8, 40),
    })
}

fn group_transfer(transfer_type: TransferType, amount: i32) -> FareTransferRule {
    FareTransferRule {
        from_leg_group: LegGroupId(1),
        to_leg_group: LegGroupId(2),
        transfer_type,
        amount,
        order: 0,
    }
}

#[test]
fn two_legs_without_transfer_rule_pay_full_fares() {
    let network = two_leg_network(&[]);
    let mut arena = ArrivalArena::new();
    let end = two_leg_path(&mut arena);

    let calculator = FareCalculator::new(&network);
    let bounds = calculator.calculate_fare(&arena, end, NO_BUDGET).unwrap();
    assert_eq!(bounds.amount, 450);
    assert_eq!(bounds.allowance.last_leg_rule, Some(LegRuleIndex(1)));
    assert!(!bounds.allowance.has_open_as_route());
}

#[test]
fn total_cost_plus_amount_discounts_the_second_leg() {
    let network = two_leg_network(&[group_transfer(TransferType::TotalCostPlusAmount, -100)]);
    let mut arena = ArrivalArena::new();
    let end = two_leg_path(&mut arena);

    let calculator = FareCalculator::new(&network);
    let bounds = calculator.calculate_fare(&arena, end, NO_BUDGET).unwrap();
    // 2.50 + (2.00 - 1.00)
    assert_eq!(bounds.amount, 350);
}

#[test]
fn first_leg_plus_amount_replaces_the_second_fare() {
    let network = two_leg_network(&[group_transfer(TransferType::FirstLegPlusAmount, 300)]);
    let mut arena = ArrivalArena::new();
    let end = two_leg_path(&mut arena);

    let calculator = FareCalculator::new(&network);
    let bounds = calculator.calculate_fare(&arena, end, NO_BUDGET).unwrap();
    // 2.50 + 3.00, the second leg's own 2.00 is discarded.
    assert_eq!(bounds.amount, 550);
}

#[test]
fn negative_increment_is_kept_after_logging() {
    let network = two_leg_network(&[group_transfer(TransferType::TotalCostPlusAmount, -300)]);
    let mut arena = ArrivalArena::new();
    let end = two_leg_path(&mut arena);

    let calculator = FareCalculator::new(&network);
    let bounds = calculator.calculate_fare(&arena, end, NO_BUDGET).unwrap();
    // 2.50 + (2.00 - 3.00): implausible but priced with the raw value.
    assert_eq!(bounds.amount, 150);
}

#[test]
fn unsupported_transfer_type_fails_the_path() {
    let network = two_leg_network(&[group_transfer(
        TransferType::MostExpensiveLegPlusAmount,
        -100,
    )]);
    let mut arena = ArrivalArena::new();
    let end = two_leg_path(&mut arena);

    let calculator = FareCalculator::new(&network);
    let err = calculator
        .calculate_fare(&arena, end, NO_BUDGET)
        .unwrap_err();
    assert_eq!(
        err,
        FareError::UnsupportedTransferType(TransferType::MostExpensiveLegPlusAmount)
    );
}

#[test]
fn uncovered_leg_fails_the_path() {
    // Only network 0 has a rule; the second ride is unpriceable.
    let mut builder = NetworkBuilder::new(3, 2);
    let first = builder.add_route(vec![FareNetworkId(0)]);
    builder.add_pattern(first, vec![StopIndex(0), StopIndex(1)]);
    let second = builder.add_route(vec![FareNetworkId(1)]);
    builder.add_pattern(second, vec![StopIndex(1), StopIndex(2)]);
    builder.add_leg_rule(FareLegRule {
        networks: vec![FareNetworkId(0)],
        ..FareLegRule::flat(250)
    });
    let network = builder.build().unwrap();

    let mut arena = ArrivalArena::new();
    let end = two_leg_path(&mut arena);

    let calculator = FareCalculator::new(&network);
    let err = calculator
        .calculate_fare(&arena, end, NO_BUDGET)
        .unwrap_err();
    assert_eq!(
        err,
        FareError::NoMatchingFareRule {
            board: StopIndex(1),
            alight: StopIndex(2),
        }
    );
}

#[test]
fn transit_free_path_prices_to_zero() {
    let network = two_leg_network(&[]);
    let mut arena = ArrivalArena::new();
    let access = arena.push(Arrival::Access {
        stop: StopIndex(0),
        origin_departure: t(8, 0),
        access_duration: 120,
    });
    let walk = arena.push(Arrival::Transfer {
        parent: access,
        round: 0,
        stop: StopIndex(1),
        arrival_time: t(8, 10),
        transfers: 0,
        walk_duration: 480,
    });

    let calculator = FareCalculator::new(&network);
    let bounds = calculator.calculate_fare(&arena, walk, NO_BUDGET).unwrap();
    assert_eq!(bounds.amount, 0);
    assert!(bounds.allowance.last_leg_rule.is_none());
    assert!(!bounds.allowance.has_open_as_route());
}

#[test]
fn walks_between_rides_are_skipped_when_pricing() {
    let network = two_leg_network(&[]);
    let mut arena = ArrivalArena::new();
    let access = arena.push(Arrival::Access {
        stop: StopIndex(0),
        origin_departure: t(8, 0),
        access_duration: 0,
    });
    let first = arena.push(Arrival::Transit {
        parent: access,
        round: 1,
        stop: StopIndex(1),
        arrival_time: t(8, 30),
        transfers: 0,
        pattern: PatternIndex(0),
        board_position: 0,
        board_time: t(8, 5),
    });
    // An on-street shuffle at the interchange stop.
    let walk = arena.push(Arrival::Transfer {
        parent: first,
        round: 1,
        stop: StopIndex(1),
        arrival_time: t(8, 35),
        transfers: 0,
        walk_duration: 300,
    });
    let second = arena.push(Arrival::Transit {
        parent: walk,
        round: 2,
        stop: StopIndex(2),
        arrival_time: t(9, 0),
        transfers: 1,
        pattern: PatternIndex(1),
        board_position: 0,
        board_time: t(8, 40),
    });

    let calculator = FareCalculator::new(&network);
    let bounds = calculator
        .calculate_fare(&arena, second, NO_BUDGET)
        .unwrap();
    assert_eq!(bounds.amount, 450);
}

/// Three consecutive rides on one as-route network price as a single
/// leg from the first board stop to the last alight stop.
#[test]
fn as_route_rides_price_as_one_leg() {
    let mut builder = NetworkBuilder::new(4, 1);
    for stops in [[0u32, 1], [1, 2], [2, 3]] {
        let route = builder.add_route(vec![FareNetworkId(0)]);
        builder.add_pattern(route, stops.map(StopIndex).to_vec());
    }
    builder.mark_as_route(FareNetworkId(0));
    builder.add_leg_rule(FareLegRule {
        networks: vec![FareNetworkId(0)],
        ..FareLegRule::flat(500)
    });
    let network = builder.build().unwrap();

    let mut arena = ArrivalArena::new();
    let mut parent = arena.push(Arrival::Access {
        stop: StopIndex(0),
        origin_departure: t(8, 0),
        access_duration: 0,
    });
    for (round, pattern) in (1..=3).zip(0u32..) {
        parent = arena.push(Arrival::Transit {
            parent,
            round,
            stop: StopIndex(pattern + 1),
            arrival_time: t(8 + pattern, 30),
            transfers: round - 1,
            pattern: PatternIndex(pattern),
            board_position: 0,
            board_time: t(8 + pattern, 0),
        });
    }

    let calculator = FareCalculator::new(&network);
    let bounds = calculator
        .calculate_fare(&arena, parent, NO_BUDGET)
        .unwrap();
    // One merged leg, one amount.
    assert_eq!(bounds.amount, 500);
    assert_eq!(bounds.allowance.last_leg_rule, Some(LegRuleIndex(0)));

    // The open as-route span is carried forward for path extensions.
    let span = bounds.allowance.as_route.as_ref().unwrap();
    assert_eq!(span.board_stop, StopIndex(0));
    assert_eq!(span.networks.ones().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn repeated_transfer_lookups_are_memoized_per_pair() {
    let network = two_leg_network(&[group_transfer(TransferType::TotalCostPlusAmount, -100)]);
    let calculator = FareCalculator::new(&network);

    let first = calculator.transfer_rule(LegRuleIndex(0), LegRuleIndex(1));
    let again = calculator.transfer_rule(LegRuleIndex(0), LegRuleIndex(1));
    assert_eq!(first, again);
    assert!(first.is_some());
    // The reverse pair is a distinct key with no matching rule.
    assert_eq!(calculator.transfer_rule(LegRuleIndex(1), LegRuleIndex(0)), None);
}
