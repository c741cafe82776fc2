use thiserror::Error;

/// Errors raised while comparing traces or rendering templates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// One side contains a NUL byte and is not text.
    #[error("{side} is not text")]
    Binary {
        /// `"actual"` or `"expected"`.
        side: &'static str,
    },

    /// A template placeholder is unterminated or empty.
    #[error("malformed template at byte {offset}: {reason}")]
    Malformed {
        /// Byte offset of the offending `{{`.
        offset: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A template refers to a variable that was not supplied.
    #[error("template variable `{0}` is not defined")]
    UnknownVariable(String),
}
