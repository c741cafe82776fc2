use mobind_exec::ExecError;
use mobind_package::ResolutionError;
use mobind_toolchain::ConfigError;
use thiserror::Error;

/// Errors raised by the bind pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// The target or its SDK could not be set up.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A package specifier did not resolve.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A build step failed.
    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl Error {
    /// Whether the caller should skip the operation rather than fail.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        match self {
            Self::Config(e) => e.is_skip(),
            _ => false,
        }
    }
}

