//! The fare-dimension label attached to a priced path.

use crate::network::LegRuleIndex;

use super::AsRouteSpan;

/// What a priced path carries forward for its possible extensions.
///
/// The allowance saves a later extension from re-deriving fare state
/// from the start of the path: which leg rule was applied last (the
/// from-side of the next transfer lookup) and any still-open as-route
/// span the next ride might extend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransferAllowance {
    /// The rule the path's last leg was priced under, if it had any
    /// transit legs.
    pub last_leg_rule: Option<LegRuleIndex>,
    /// Unresolved as-route state of the last leg: the continuous
    /// networks and the stop where that ride began.
    pub as_route: Option<AsRouteSpan>,
}

impl TransferAllowance {
    /// The allowance of an unpriced or transit-free path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if the last leg left an as-route span open for extension.
    pub fn has_open_as_route(&self) -> bool {
        self.as_route.is_some()
    }
}

/// The fare label fed into final itinerary comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareBounds {
    /// Cumulative fare in cents.
    pub amount: i32,
    /// State carried forward for path extensions.
    pub allowance: TransferAllowance,
}

impl FareBounds {
    /// A zero fare with nothing carried forward.
    pub fn zero() -> Self {
        Self {
            amount: 0,
            allowance: TransferAllowance::empty(),
        }
    }
}
