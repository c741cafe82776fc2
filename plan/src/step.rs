//! Build steps and plans.

use std::path::{Path, PathBuf};

use mobind_toolchain::EnvVars;
use serde::Serialize;

/// One external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Executable name or path.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Environment overrides on top of the inherited environment.
    pub env: EnvVars,
    /// Working directory, if not the caller's.
    pub cwd: Option<PathBuf>,
    /// File that receives the tool's standard output.
    pub stdout: Option<PathBuf>,
}

impl Command {
    /// A command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: EnvVars::new(),
            cwd: None,
            stdout: None,
        }
    }

    /// Append an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replace the environment overrides.
    #[must_use]
    pub fn envs(mut self, env: EnvVars) -> Self {
        self.env = env;
        self
    }

    /// Run in `dir`.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Send standard output to `path`.
    #[must_use]
    pub fn stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }
}

/// A single step of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Create a directory and its parents. Repeating it is harmless.
    MakeDir {
        /// Directory to create.
        path: PathBuf,
    },
    /// Remove a directory tree if it exists.
    RemoveAll {
        /// Tree to remove.
        path: PathBuf,
    },
    /// Remove a file if it exists.
    Remove {
        /// File to remove.
        path: PathBuf,
    },
    /// Copy file contents.
    Copy {
        /// Source file.
        src: PathBuf,
        /// Destination file.
        dst: PathBuf,
    },
    /// Create a symbolic link at `link` pointing to `target`.
    Symlink {
        /// Link target, possibly relative to the link's directory.
        target: PathBuf,
        /// Link to create.
        link: PathBuf,
    },
    /// Write fixed contents to a file.
    WriteFile {
        /// File to write.
        path: PathBuf,
        /// New contents.
        contents: String,
    },
    /// Run an external tool.
    Run(Command),
}

impl Step {
    /// The command, for [`Step::Run`].
    #[must_use]
    pub const fn command(&self) -> Option<&Command> {
        match self {
            Self::Run(cmd) => Some(cmd),
            _ => None,
        }
    }
}

/// An ordered list of steps plus the variables announced before them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    header: Vec<(String, String)>,
    steps: Vec<Step>,
}

impl Plan {
    /// An empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `NAME=value` lines printed before any step.
    #[must_use]
    pub fn header(&self) -> &[(String, String)] {
        &self.header
    }

    /// Steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Only the tool invocations, in order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.steps.iter().filter_map(Step::command)
    }

    /// Announce a variable in the header.
    pub fn announce(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.header.push((name.into(), value.into()));
    }

    /// Append a step.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Append [`Step::MakeDir`].
    pub fn mkdir(&mut self, path: impl Into<PathBuf>) {
        self.push(Step::MakeDir { path: path.into() });
    }

    /// Append [`Step::RemoveAll`].
    pub fn remove_all(&mut self, path: impl Into<PathBuf>) {
        self.push(Step::RemoveAll { path: path.into() });
    }

    /// Append [`Step::Remove`].
    pub fn remove(&mut self, path: impl Into<PathBuf>) {
        self.push(Step::Remove { path: path.into() });
    }

    /// Append [`Step::Copy`].
    pub fn copy(&mut self, src: impl Into<PathBuf>, dst: impl Into<PathBuf>) {
        self.push(Step::Copy {
            src: src.into(),
            dst: dst.into(),
        });
    }

    /// Append [`Step::Symlink`].
    pub fn symlink(&mut self, target: impl Into<PathBuf>, link: impl Into<PathBuf>) {
        self.push(Step::Symlink {
            target: target.into(),
            link: link.into(),
        });
    }

    /// Append [`Step::WriteFile`].
    pub fn write(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.push(Step::WriteFile {
            path: path.into(),
            contents: contents.into(),
        });
    }

    /// Append [`Step::Run`].
    pub fn run(&mut self, cmd: Command) {
        self.push(Step::Run(cmd));
    }

    /// Replace any stale file at `link` with a symlink to `target`.
    pub fn relink(&mut self, target: impl Into<PathBuf>, link: &Path) {
        self.remove(link);
        self.symlink(target, link);
    }
}
