//! Legacy flat fare table.
//!
//! A parallel, older pricing path: a static CSV of fixed fares keyed by
//! stop id pair, used by a calculator variant that predates the rules
//! engine. Stop ids are plain strings and only fares from a single feed
//! can be represented.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

/// Fixed fares for one stop pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatFare {
    /// Off-peak fare.
    pub low: f64,
    /// Peak fare.
    pub peak: f64,
    /// Reduced (senior) fare.
    pub senior: f64,
}

/// Error loading a flat fare table.
#[derive(Debug, thiserror::Error)]
pub enum FareTableError {
    /// The CSV could not be read or a record failed to parse.
    #[error("failed to load fare table: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct FareRecord {
    from_stop_id: String,
    to_stop_id: String,
    low_fare: f64,
    peak_fare: f64,
    senior_fare: f64,
}

/// Fixed fares between stop pairs, loaded from CSV.
///
/// Expected columns: `from_stop_id`, `to_stop_id`, `low_fare`,
/// `peak_fare`, `senior_fare`.
#[derive(Debug, Clone, Default)]
pub struct FlatFareTable {
    fares: HashMap<(String, String), FlatFare>,
}

impl FlatFareTable {
    /// Load a table from CSV text.
    pub fn from_reader(reader: impl Read) -> Result<Self, FareTableError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut fares = HashMap::new();
        for record in csv_reader.deserialize() {
            let record: FareRecord = record?;
            fares.insert(
                (record.from_stop_id, record.to_stop_id),
                FlatFare {
                    low: record.low_fare,
                    peak: record.peak_fare,
                    senior: record.senior_fare,
                },
            );
        }
        Ok(Self { fares })
    }

    /// Load a table from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FareTableError> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::from_reader(file)
    }

    /// Look up the fixed fares for a stop pair.
    ///
    /// Returns an owned copy so callers may discount it without
    /// touching the table.
    pub fn lookup(&self, from: &str, to: &str) -> Option<FlatFare> {
        self.fares
            .get(&(from.to_string(), to.to_string()))
            .copied()
    }

    /// Number of stop pairs in the table.
    pub fn len(&self) -> usize {
        self.fares.len()
    }

    /// True if the table holds no fares.
    pub fn is_empty(&self) -> bool {
        self.fares.is_empty()
    }
}
