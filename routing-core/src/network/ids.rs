//! Index newtypes for the network tables.
//!
//! Everything in the network index is referenced by dense integer index
//! (stops, routes, patterns, fare networks, rules). Wrapping each index
//! in its own type keeps a board stop from being confused with a rule
//! index at a call site; all of these are plain `u32`s at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! index_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the index as a `usize` for table lookups.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

index_type!(
    /// A stop in the network, by dense index.
    StopIndex
);
index_type!(
    /// A route in the network, by dense index.
    RouteIndex
);
index_type!(
    /// A trip pattern (ordered stop sequence on one route), by dense index.
    PatternIndex
);
index_type!(
    /// A fare network: a grouping of routes that share pricing rules.
    FareNetworkId
);
index_type!(
    /// A fare leg rule, by position in the network's ordered rule table.
    LegRuleIndex
);
index_type!(
    /// A fare transfer rule, by position in the network's ordered rule table.
    TransferRuleIndex
);

/// A leg group, used to match transfer-discount rules to a leg rule.
///
/// The reserved [`LegGroupId::BLANK`] value is the wildcard bucket: a
/// transfer rule whose from/to group is blank matches any leg group, and
/// a leg rule with a blank group only matches wildcard transfer rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegGroupId(pub u32);

impl LegGroupId {
    /// The wildcard ("blank") leg group.
    pub const BLANK: Self = Self(u32::MAX);

    /// Returns true if this is the wildcard group.
    pub fn is_blank(self) -> bool {
        self == Self::BLANK
    }
}

impl fmt::Display for LegGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            f.write_str("(blank)")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A time of day in seconds since midnight.
///
/// Transit schedule times are plain second counts (possibly past 24:00:00
/// for service that runs overnight), so no calendar type is involved.
///
/// # Examples
///
/// ```
/// use routing_core::network::ClockTime;
///
/// let t = ClockTime::from_hms(8, 35, 0);
/// assert_eq!(t.seconds(), 30_900);
/// assert_eq!(t.to_string(), "08:35:00");
/// assert!(t < t.plus_seconds(60));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Midnight.
    pub const MIDNIGHT: Self = Self(0);

    /// Create a time from a raw second count since midnight.
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Create a time from hours, minutes and seconds.
    pub const fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self(hours * 3600 + minutes * 60 + seconds)
    }

    /// Seconds since midnight.
    pub const fn seconds(self) -> u32 {
        self.0
    }

    /// This time shifted later by `seconds`.
    pub const fn plus_seconds(self, seconds: u32) -> Self {
        Self(self.0 + seconds)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0 / 3600,
            (self.0 / 60) % 60,
            self.0 % 60
        )
    }
}
