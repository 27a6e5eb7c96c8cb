use thiserror::Error;

/// Errors originating from the halftoning core.
///
/// None of these are recovered internally: a bad parameter or a broken
/// invariant always reaches the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HalftoneError {
    /// A caller-supplied parameter is outside its accepted range.
    #[error("Paramètre invalide `{name}` : {value} (attendu : {expected})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value, rendered for display.
        value: String,
        /// Accepted range or set.
        expected: &'static str,
    },

    /// Array dimensions disagree with the declared height and width.
    #[error("Dimensions incohérentes ({context}) : attendu {expected}, reçu {found}")]
    DimensionMismatch {
        /// Where the mismatch was detected.
        context: &'static str,
        /// Expected shape or length.
        expected: String,
        /// Actual shape or length.
        found: String,
    },

    /// Curve bijection or cluster coverage is broken. Always an engine bug.
    #[error("Invariant interne violé : {0}")]
    InternalInvariantViolation(String),
}

impl HalftoneError {
    /// Shorthand for [`HalftoneError::InvalidParameter`].
    #[must_use]
    pub fn invalid<T: ToString + ?Sized>(name: &'static str, value: &T, expected: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            expected,
        }
    }
}
