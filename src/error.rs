//! Error types for the network core.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the core can report. None of them are transient: the
/// offending call is rejected and prior state is left untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// A vector or matrix did not have the size the receiver was built for.
    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A network must always keep at least one layer.
    #[error("cannot remove the only remaining layer")]
    OnlyRemainingLayer,

    /// Forward or update step attempted before any input was set.
    #[error("{0} called before any input was set")]
    InputNotSet(&'static str),

    /// A network was requested with no layers at all.
    #[error("a network needs at least one layer")]
    EmptyNetwork,

    /// Training or evaluation on zero samples.
    #[error("dataset is empty")]
    EmptyDataset,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn mismatch(what: &'static str, expected: usize, actual: usize) -> Error {
        Error::DimensionMismatch { what, expected, actual }
    }

    /// Check if the error reports disagreeing sizes
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Error::DimensionMismatch { .. })
    }

    /// Check if the error comes from misusing the network's structure or
    /// call order rather than from a bad vector
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::OnlyRemainingLayer
                | Error::InputNotSet(_)
                | Error::EmptyNetwork
                | Error::EmptyDataset
        )
    }
}

/// Fails with `DimensionMismatch` unless `actual == expected`.
pub(crate) fn ensure_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::mismatch(what, expected, actual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Error::mismatch("input", 2, 3).is_dimension_mismatch());
        assert!(!Error::mismatch("input", 2, 3).is_structural());
        assert!(Error::OnlyRemainingLayer.is_structural());
        assert!(Error::InputNotSet("forward").is_structural());
        assert!(Error::EmptyDataset.is_structural());
    }

    #[test]
    fn test_message_names_sizes() {
        let msg = Error::mismatch("layer input", 4, 3).to_string();
        assert_eq!(msg, "dimension mismatch in layer input: expected 4, got 3");
    }

    #[test]
    fn test_ensure_len() {
        assert!(ensure_len("target", 2, 2).is_ok());
        assert!(ensure_len("target", 2, 1).unwrap_err().is_dimension_mismatch());
    }
}
