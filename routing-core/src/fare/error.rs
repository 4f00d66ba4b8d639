//! Fare engine errors.
//!
//! Both variants are fatal for the single candidate path being priced:
//! the search discards that path as unpriceable and continues with the
//! others. Ambiguous rule matches and implausible amounts are not
//! errors; they are resolved deterministically and logged as feed-data
//! quality signals.

use crate::network::{StopIndex, TransferType};

/// A candidate path could not be priced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FareError {
    /// No fare leg rule covers a ride's board stop, alight stop and
    /// fare networks.
    #[error("no fare leg rule matches the ride from stop {board} to stop {alight}")]
    NoMatchingFareRule {
        /// Board stop of the unpriceable ride.
        board: StopIndex,
        /// Alight stop of the unpriceable ride.
        alight: StopIndex,
    },

    /// A matched transfer rule uses a standard-defined transfer type
    /// this engine does not implement; failing beats mis-pricing.
    #[error("unsupported fare transfer type: {0}")]
    UnsupportedTransferType(TransferType),
}
