//! Progress estimation from free-text status messages.
//!
//! The capture server only reports human-readable phase messages. The
//! estimator turns them into a percentage for the progress surface. It is a
//! display aid, not a measurement.

/// Percentage shown before any phase keyword has been recognized.
pub const INITIAL_PERCENT: u8 = 10;

/// Ordered phase table. Matching is a case-sensitive substring search and the
/// first hit wins.
pub const PHASE_TABLE: &[(&str, u8)] = &[
    ("Loading", 20),
    ("Extracting", 30),
    ("Discovering", 40),
    ("Downloading", 70),
    ("Rewriting", 90),
    ("completed", 100),
];

/// Derives a display percentage from the latest status message.
///
/// `previous` is `None` until the first poll result for a job has been applied.
pub trait ProgressEstimator {
    fn estimate(&self, message: &str, previous: Option<u8>) -> u8;
}

/// Keyword-table estimator matching the messages emitted by the capture server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseKeywordEstimator;

impl ProgressEstimator for PhaseKeywordEstimator {
    fn estimate(&self, message: &str, previous: Option<u8>) -> u8 {
        phase_percent(message).unwrap_or_else(|| previous.unwrap_or(INITIAL_PERCENT))
    }
}

/// Returns the floor percentage of the first phase keyword found in `message`.
pub fn phase_percent(message: &str) -> Option<u8> {
    PHASE_TABLE
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|&(_, percent)| percent)
}
