//! Transfer-rule matching and its per-search memo cache.
//!
//! Within one search the same pair of adjacent leg rules comes up over
//! and over (a bus rule transferring to the many other rules reachable
//! from it), so resolved lookups are memoized in a bounded cache owned
//! by the search. The underlying rule tables stay shared and read-only.

use moka::sync::Cache;

use crate::network::{LegGroupId, TransferRuleIndex, TransitNetwork};

use super::lowest_order;

/// Cache key: the leg groups of the prior and next leg rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferRuleKey {
    /// Leg group of the prior leg's rule.
    pub from: LegGroupId,
    /// Leg group of the next leg's rule.
    pub to: LegGroupId,
}

/// Bounded memo over [`search_transfer_rule`] results, including the
/// "no discount" outcome.
#[derive(Debug)]
pub struct TransferRuleCache {
    inner: Cache<TransferRuleKey, Option<TransferRuleIndex>>,
}

impl TransferRuleCache {
    /// Create a cache holding at most `capacity` resolved pairs, with
    /// recency-based eviction.
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    /// Return the memoized result for `key`, invoking `search` only on
    /// a miss.
    pub fn get_with(
        &self,
        key: TransferRuleKey,
        search: impl FnOnce() -> Option<TransferRuleIndex>,
    ) -> Option<TransferRuleIndex> {
        self.inner.get_with(key, search)
    }
}

/// Find the transfer rule for a pair of leg groups, if any.
///
/// Each side resolves to a candidate bucket by exact leg-group match,
/// falling back to the wildcard (blank) bucket; a missing bucket on
/// either side means no rule can match. The sides are intersected:
/// empty means no discount (the next leg pays full fare, not an error),
/// one candidate wins outright, and among several the lowest tie-break
/// order wins, logged and resolved by table position if still tied.
pub(crate) fn search_transfer_rule(
    network: &TransitNetwork,
    key: TransferRuleKey,
) -> Option<TransferRuleIndex> {
    let from_match = network
        .transfer_rules_from(key.from)
        .or_else(|| network.transfer_rules_from(LegGroupId::BLANK))?;
    let to_match = network
        .transfer_rules_to(key.to)
        .or_else(|| network.transfer_rules_to(LegGroupId::BLANK))?;

    let mut both = from_match.clone();
    both.intersect_with(to_match);

    lowest_order(
        both.ones(),
        |idx| network.transfer_rule(TransferRuleIndex(idx as u32)).order,
        "fare transfer",
    )
    .map(|idx| TransferRuleIndex(idx as u32))
}
