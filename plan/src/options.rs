use std::path::PathBuf;

use mobind_package::PackageInfo;
use mobind_toolchain::TargetDescriptor;

/// Flags forwarded to every `go` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildFlags {
    /// `-a`: rebuild everything.
    pub force_rebuild: bool,
    /// `-v`: print package names as they build.
    pub verbose: bool,
    /// `-x`: print the commands the go tool runs.
    pub print_commands: bool,
    /// `-tags`: extra build tags.
    pub tags: Vec<String>,
}

impl BuildFlags {
    /// The flags as go tool arguments, with `extra_tags` appended to the
    /// user's tags.
    #[must_use]
    pub fn to_args(&self, extra_tags: &[&str]) -> Vec<String> {
        let mut args = Vec::new();
        if self.force_rebuild {
            args.push("-a".to_string());
        }
        if self.verbose {
            args.push("-v".to_string());
        }
        if self.print_commands {
            args.push("-x".to_string());
        }
        let tags: Vec<&str> = self
            .tags
            .iter()
            .map(String::as_str)
            .chain(extra_tags.iter().copied())
            .collect();
        if !tags.is_empty() {
            args.push(format!("-tags={}", tags.join(",")));
        }
        args
    }
}

/// Directories the plan reads from and writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    /// Scratch root; every intermediate file lands below it.
    pub work: PathBuf,
    /// Per-user cache with prebuilt packages, headers and libraries.
    pub gomobile: PathBuf,
    /// GOPATH entries, in order.
    pub gopath: Vec<PathBuf>,
    /// Source directory of the binding support package.
    pub bind_support: PathBuf,
}

/// What to bind and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindOptions {
    /// Packages to bind, in order.
    pub packages: Vec<PackageInfo>,
    /// Java package for generated classes. `None` or empty means default.
    pub java_package: Option<String>,
    /// Objective-C name prefix. `None` or empty means none.
    pub objc_prefix: Option<String>,
    /// Artifact to produce. Defaults to `<name>.aar` or `<Name>.framework`.
    pub output: Option<PathBuf>,
    /// Go tool flags.
    pub flags: BuildFlags,
    /// Directory layout.
    pub paths: BuildPaths,
}

impl BindOptions {
    /// Options with default namespace, prefix, output and flags.
    #[must_use]
    pub const fn new(packages: Vec<PackageInfo>, paths: BuildPaths) -> Self {
        Self {
            packages,
            java_package: None,
            objc_prefix: None,
            output: None,
            flags: BuildFlags {
                force_rebuild: false,
                verbose: false,
                print_commands: false,
                tags: Vec::new(),
            },
            paths,
        }
    }

    /// The Java namespace, if one is set and non-empty.
    #[must_use]
    pub fn java_namespace(&self) -> Option<&str> {
        self.java_package.as_deref().filter(|ns| !ns.is_empty())
    }

    /// The Objective-C prefix, if one is set and non-empty.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.objc_prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Name of the first bound package, used to name artifacts.
    #[must_use]
    pub fn lead_name(&self) -> &str {
        self.packages.first().map_or("gobind", |p| p.name.as_str())
    }
}

/// The platform a plan is built for, with its resolved toolchains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindTarget {
    /// Android: one descriptor per ABI plus the SDK platform directory that
    /// holds `android.jar`.
    Android {
        /// Descriptors, in build order.
        targets: Vec<TargetDescriptor>,
        /// `platforms/android-N` directory.
        platform: PathBuf,
    },
    /// iOS: one descriptor per architecture in the fat framework.
    Ios {
        /// Descriptors, in build order.
        targets: Vec<TargetDescriptor>,
    },
}
