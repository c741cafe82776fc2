//! Build-step planning for Go mobile bindings.
//!
//! [`build`] is a pure function: given resolved toolchains and bind options
//! it returns the exact, ordered [`Plan`] of directory operations and tool
//! invocations that produce an Android AAR or an iOS framework. It performs
//! no IO, so the same inputs always give the same plan, which is what makes
//! dry-run traces verifiable.
//!
//! An Android plan runs, in order:
//! 1. scratch directory creation
//! 2. `gobind -lang=java` per package, then for the support layer
//! 3. `gobind -lang=go` per package, then for the support layer
//! 4. `go build -buildmode=c-shared` per ABI, with the cross environment
//! 5. symlinks for the Java runtime classes
//! 6. `javac`
//! 7. `jar`, then AAR assembly
//!
//! The cross environment is attached to `go` commands only.

#![warn(missing_docs)]

pub mod android;
mod go;
pub mod ios;
mod layout;
mod options;
mod step;

pub use go::{GO, GOBIND, gobind, title};
pub use layout::{WorkLayout, java_package_dir};
pub use options::{BindOptions, BindTarget, BuildFlags, BuildPaths};
pub use step::{Command, Plan, Step};

/// Plan a binding for `target`.
#[must_use]
pub fn build(target: &BindTarget, opts: &BindOptions) -> Plan {
    match target {
        BindTarget::Android { targets, platform } => android::plan(targets, platform, opts),
        BindTarget::Ios { targets } => ios::plan(targets, opts),
    }
}

/// The artifact a plan for `target` writes.
#[must_use]
pub fn output_path(target: &BindTarget, opts: &BindOptions) -> std::path::PathBuf {
    opts.output.clone().unwrap_or_else(|| match target {
        BindTarget::Android { .. } => android::default_output(opts),
        BindTarget::Ios { .. } => ios::default_output(opts),
    })
}
