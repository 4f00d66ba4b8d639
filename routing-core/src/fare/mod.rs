//! The GTFS Fares V2 pricing engine.
//!
//! Converts a candidate path's leg sequence into a monetary cost the
//! search can compare on: leg rules price single rides, as-route spans
//! merge continuous rides, transfer rules discount consecutive rides,
//! and the accumulator walks a completed path to produce its
//! [`FareBounds`].

mod allowance;
mod calculator;
mod error;
mod splice;
mod transfer;

#[cfg(test)]
mod scenario_tests;

pub use allowance::{FareBounds, TransferAllowance};
pub use calculator::{FareCalculator, TRANSFER_RULE_CACHE_CAPACITY};
pub use error::FareError;
pub use splice::AsRouteSpan;
pub use transfer::{TransferRuleCache, TransferRuleKey};

use tracing::warn;

/// Select the candidate with the lowest tie-break order.
///
/// `candidates` iterates in ascending table position, so a remaining
/// tie deterministically resolves to the lowest-positioned rule. Ties
/// are logged: they are a feed-data quality issue, not corrected here.
pub(crate) fn lowest_order(
    candidates: impl IntoIterator<Item = usize>,
    order_of: impl Fn(usize) -> u32,
    table: &str,
) -> Option<usize> {
    let mut best: Option<(u32, usize)> = None;
    let mut tied = false;

    for idx in candidates {
        let order = order_of(idx);
        match best {
            None => best = Some((order, idx)),
            Some((lowest, _)) if order < lowest => {
                best = Some((order, idx));
                tied = false;
            }
            Some((lowest, _)) if order == lowest => tied = true,
            Some(_) => {}
        }
    }

    if tied {
        warn!(
            table,
            "multiple matching rules share the lowest order; falling back to table position, \
             results may not find the lowest fare"
        );
    }
    best.map(|(_, idx)| idx)
}
