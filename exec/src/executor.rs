use std::io::Write;
use std::time::Duration;

use mobind_plan::Plan;

use crate::render::{render_header, render_step};
use crate::{ExecError, Substitutions, Trace, run};

/// How steps are carried out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Perform every step.
    #[default]
    Real,
    /// Only render steps; nothing is spawned or touched on disk.
    DryRun,
}

/// Runs plans sequentially, recording a [`Trace`].
#[derive(Debug, Clone, Default)]
pub struct Executor {
    mode: Mode,
    print_commands: bool,
    timeout: Option<Duration>,
    subs: Substitutions,
}

impl Executor {
    /// An executor in `mode` without echo, timeout or substitutions.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Echo each line to the sink in real mode. Dry runs always echo.
    #[must_use]
    pub fn print_commands(mut self, on: bool) -> Self {
        self.print_commands = on;
        self
    }

    /// Kill any tool still running after `limit`.
    #[must_use]
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Path prefixes to hide in rendered lines.
    #[must_use]
    pub fn substitutions(mut self, subs: Substitutions) -> Self {
        self.subs = subs;
        self
    }

    /// The configured mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Execute `plan`, writing echoed lines to `sink`.
    ///
    /// A dry run always succeeds. A real run stops at the first failing step
    /// and returns the lines rendered so far alongside the error. Failures to
    /// write to `sink` are logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError`] when a step fails in [`Mode::Real`].
    pub fn execute<W: Write>(&self, plan: &Plan, sink: &mut W) -> Result<Trace, ExecError> {
        let echo = self.mode == Mode::DryRun || self.print_commands;
        let mut trace = Trace::new();

        for (name, value) in plan.header() {
            let line = render_header(name, value);
            if echo {
                emit(sink, &line);
            }
            trace.push(line);
        }

        for (index, step) in plan.steps().iter().enumerate() {
            let line = render_step(step, &self.subs);
            if echo {
                emit(sink, &line);
            }
            trace.push(line.clone());
            if self.mode == Mode::DryRun {
                continue;
            }

            log::debug!("step {index}: {line}");
            if let Err(error) = run::run_step(index, step, &line, self.timeout) {
                log::warn!("{error}");
                return Err(ExecError { trace, error });
            }
        }

        log::debug!("{} steps done ({:?})", plan.steps().len(), self.mode);
        Ok(trace)
    }
}

fn emit<W: Write>(sink: &mut W, line: &str) {
    if let Err(e) = writeln!(sink, "{line}") {
        log::warn!("trace sink: {e}");
    }
}
