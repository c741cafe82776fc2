use std::time::Duration;

use thiserror::Error;

use crate::Trace;

/// A plan step that could not be completed.
///
/// `index` is the zero-based position of the step in the plan; `command` is
/// the step rendered the way it appears in the trace, so it can be replayed
/// by hand.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A tool exited unsuccessfully.
    #[error("step {index} failed ({}): {command}\n{output}", exit_label(*status))]
    Failed {
        /// Step position.
        index: usize,
        /// Rendered command line.
        command: String,
        /// Exit code, `None` when the tool was killed by a signal.
        status: Option<i32>,
        /// Captured standard error followed by captured standard output.
        output: String,
    },

    /// A tool could not be found or started.
    #[error("step {index}: cannot run {program}: {source}")]
    Spawn {
        /// Step position.
        index: usize,
        /// Executable name as written in the plan.
        program: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A tool ran longer than the configured timeout and was killed.
    #[error("step {index} timed out after {}s: {command}", after.as_secs())]
    TimedOut {
        /// Step position.
        index: usize,
        /// Rendered command line.
        command: String,
        /// The timeout that expired.
        after: Duration,
    },

    /// A filesystem step failed.
    #[error("step {index} ({step}): {source}")]
    Io {
        /// Step position.
        index: usize,
        /// Rendered step.
        step: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    /// Position of the failing step.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Failed { index, .. }
            | Self::Spawn { index, .. }
            | Self::TimedOut { index, .. }
            | Self::Io { index, .. } => *index,
        }
    }
}

fn exit_label(status: Option<i32>) -> String {
    status.map_or_else(|| "killed".to_string(), |code| format!("exit status {code}"))
}

/// A real-mode run that stopped at a failing step.
///
/// The trace holds every line rendered up to and including the failing step.
#[derive(Error, Debug)]
#[error("build stopped at step {}", .error.index())]
pub struct ExecError {
    /// Lines rendered before the failure.
    pub trace: Trace,
    /// What went wrong.
    #[source]
    pub error: BuildError,
}
