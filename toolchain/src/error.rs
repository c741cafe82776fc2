use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving a target platform or locating its SDK.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The `-target` value names no supported platform or architecture.
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// The SDK home environment variable is unset or empty.
    #[error("{var} environment variable is not set")]
    SdkHomeNotSet {
        /// Name of the variable that was consulted.
        var: &'static str,
    },

    /// No usable `platforms/android-N` directory exists in the SDK.
    #[error("failed to find android SDK platform (min API level: {min_api}) in {}", dir.display())]
    NoPlatform {
        /// The `platforms` directory that was scanned.
        dir: PathBuf,
        /// Lowest accepted API level.
        min_api: u32,
    },

    /// The NDK root does not exist.
    #[error("android NDK not found at {}", .0.display())]
    NdkNotFound(PathBuf),

    /// Xcode command line tools are missing or did not answer.
    #[error("Xcode toolchain unavailable: {0}")]
    XcodeUnavailable(String),

    /// An IO error occurred while probing the SDK.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Whether this error means an optional environment is missing.
    ///
    /// Callers skip the operation for these instead of failing the run.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::SdkHomeNotSet { .. }
                | Self::NoPlatform { .. }
                | Self::NdkNotFound(_)
                | Self::XcodeUnavailable(_)
        )
    }
}
