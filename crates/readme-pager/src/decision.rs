//! Review decisions

use std::fmt;

/// Outcome of reviewing a single item
///
/// `Aborted` is a batch-level signal: once produced, callers must stop
/// issuing further reviews and keep the decisions already made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Operator pressed `y`
    Confirmed,
    /// Operator pressed `n`, or paged through the whole body without deciding
    Rejected,
    /// Operator interrupted, or no keystroke could be read
    Aborted,
}

impl Decision {
    /// Should the surrounding batch stop after this decision?
    pub fn stops_batch(&self) -> bool {
        matches!(self, Decision::Aborted)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Decision::Confirmed => "confirmed",
            Decision::Rejected => "not confirmed",
            Decision::Aborted => "aborted",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_abort_stops_batch() {
        assert!(!Decision::Confirmed.stops_batch());
        assert!(!Decision::Rejected.stops_batch());
        assert!(Decision::Aborted.stops_batch());
    }

    #[test]
    fn test_display() {
        assert_eq!(Decision::Rejected.to_string(), "not confirmed");
    }
}
