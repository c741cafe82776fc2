//! Checking dry-run traces against expected output.
//!
//! Expected traces are [`Template`]s filled from [`TraceVars`], then compared
//! with [`diff`], which is blind to path separators and trailing whitespace
//! but not to line order.

#![warn(missing_docs)]

mod diff;
mod error;
pub mod golden;
mod template;
mod vars;

pub use diff::diff;
pub use error::DiffError;
pub use template::Template;
pub use vars::TraceVars;
