//! Textual rendering of plan steps.

use std::path::{Path, PathBuf};

use mobind_plan::{Command, Step};
use mobind_toolchain::PATH_LIST_SEPARATOR;

/// Environment-specific path prefixes replaced by variable names in
/// rendered lines, so traces read the same on every machine.
///
/// Replacements happen in a fixed order regardless of how the set was
/// built: work dir, Android SDK home, gomobile dir, GOROOT, GOPATH, home.
/// Earlier entries win where prefixes nest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    work: Option<String>,
    android_home: Option<String>,
    gomobile: Option<String>,
    goroot: Option<String>,
    gopath: Vec<String>,
    home: Option<String>,
}

impl Substitutions {
    /// No substitutions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scratch directory with `$WORK`.
    #[must_use]
    pub fn work(mut self, dir: impl AsRef<Path>) -> Self {
        self.work = non_empty(dir.as_ref());
        self
    }

    /// Replace the Android SDK home with `$ANDROID_HOME`.
    #[must_use]
    pub fn android_home(mut self, dir: impl AsRef<Path>) -> Self {
        self.android_home = non_empty(dir.as_ref());
        self
    }

    /// Replace the gomobile cache dir with `$GOMOBILE`.
    #[must_use]
    pub fn gomobile(mut self, dir: impl AsRef<Path>) -> Self {
        self.gomobile = non_empty(dir.as_ref());
        self
    }

    /// Replace GOROOT with `$GOROOT`.
    #[must_use]
    pub fn goroot(mut self, dir: impl AsRef<Path>) -> Self {
        self.goroot = non_empty(dir.as_ref());
        self
    }

    /// Replace the GOPATH list, then its first entry, with `$GOPATH`.
    #[must_use]
    pub fn gopath(mut self, entries: &[PathBuf]) -> Self {
        self.gopath.clear();
        let joined = entries
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(&PATH_LIST_SEPARATOR.to_string());
        if !joined.is_empty() && joined != "/" {
            self.gopath.push(joined);
        }
        if entries.len() > 1 {
            self.gopath.extend(entries.first().and_then(|p| non_empty(p)));
        }
        self
    }

    /// Replace the user's home with `$HOME`.
    #[must_use]
    pub fn home(mut self, dir: impl AsRef<Path>) -> Self {
        self.home = non_empty(dir.as_ref());
        self
    }

    /// Apply every substitution to `line`.
    #[must_use]
    pub fn apply(&self, line: &str) -> String {
        let mut out = line.to_string();
        let ordered = self
            .work
            .iter()
            .map(|v| (v, "$WORK"))
            .chain(self.android_home.iter().map(|v| (v, "$ANDROID_HOME")))
            .chain(self.gomobile.iter().map(|v| (v, "$GOMOBILE")))
            .chain(self.goroot.iter().map(|v| (v, "$GOROOT")))
            .chain(self.gopath.iter().map(|v| (v, "$GOPATH")))
            .chain(self.home.iter().map(|v| (v, "$HOME")));
        for (from, to) in ordered {
            if from != to {
                out = out.replace(from.as_str(), to);
            }
        }
        out
    }
}

/// A prefix worth substituting: neither empty nor the filesystem root,
/// which would rewrite every separator.
fn non_empty(path: &Path) -> Option<String> {
    let s = path.display().to_string();
    (!s.is_empty() && s != "/").then_some(s)
}

/// Render a header variable. Header values are never substituted.
#[must_use]
pub fn render_header(name: &str, value: &str) -> String {
    format!("{name}={value}")
}

/// Render one step as a trace line.
#[must_use]
pub fn render_step(step: &Step, subs: &Substitutions) -> String {
    let line = match step {
        Step::MakeDir { path } => format!("mkdir -p {}", path.display()),
        Step::RemoveAll { path } => format!("rm -r -f \"{}\"", path.display()),
        Step::Remove { path } => format!("rm {}", path.display()),
        Step::Copy { src, dst } => format!("cp {} {}", src.display(), dst.display()),
        Step::Symlink { target, link } => {
            format!("ln -s {} {}", target.display(), link.display())
        }
        Step::WriteFile { path, .. } => format!("write {}", path.display()),
        Step::Run(cmd) => render_command(cmd),
    };
    subs.apply(&line)
}

/// `[PWD=dir ][NAME=value ...]program args[ > stdout]`, unsubstituted.
#[must_use]
pub fn render_command(cmd: &Command) -> String {
    let mut parts = Vec::with_capacity(cmd.args.len() + cmd.env.len() + 2);
    if let Some(dir) = &cmd.cwd {
        parts.push(format!("PWD={}", dir.display()));
    }
    parts.extend(cmd.env.iter().map(|(name, value)| format!("{name}={value}")));
    parts.push(cmd.program.clone());
    parts.extend(cmd.args.iter().cloned());
    let mut line = parts.join(" ");
    if let Some(out) = &cmd.stdout {
        line.push_str(&format!(" > {}", out.display()));
    }
    line
}
