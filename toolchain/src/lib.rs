//! Target descriptors for cross-compiling Go packages to mobile platforms.
//!
//! This crate turns a logical target such as `android/arm` into a concrete
//! [`TargetDescriptor`]: compiler paths, sysroot, flag bundles and the cross
//! environment handed to the native build. It also locates the SDKs those
//! descriptors are built from:
//! - Android: SDK platform (`android.jar`) and NDK root
//! - Apple: Xcode developer dir, `iphoneos`/`iphonesimulator` SDKs, clang
//!
//! Nothing here reads process-global state implicitly. Callers pass the
//! values they got from the environment.
//!
//! # Usage
//!
//! ```
//! use std::path::Path;
//! use mobind_toolchain::{Arch, HostPlatform, Ndk, TargetDescriptor};
//!
//! let host = HostPlatform::new("linux", "x86_64", "");
//! let ndk = Ndk::new("/NDK");
//! let desc = TargetDescriptor::android(&ndk, &host, Arch::Arm, Path::new("/go/pkg/gomobile"));
//! assert_eq!(desc.abi(), "armeabi-v7a");
//! ```

#![warn(missing_docs)]

mod android;
mod apple;
mod descriptor;
mod error;
mod host;

pub use android::{AndroidSdk, MIN_ANDROID_API, Ndk};
pub use apple::{AppleSdk, IOS_MIN_VERSION};
pub use descriptor::{EnvVars, TargetDescriptor};
pub use error::ConfigError;
pub use host::{HostPlatform, PATH_LIST_SEPARATOR};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A mobile operating system a package can be bound for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android, bound to Java.
    Android,
    /// iOS, bound to Objective-C.
    Ios,
}

impl Platform {
    /// The `GOOS` value used when cross-compiling for this platform.
    #[must_use]
    pub const fn goos(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "darwin",
        }
    }

    /// Architectures built when the target names only the platform.
    #[must_use]
    pub const fn default_archs(self) -> &'static [Arch] {
        match self {
            Self::Android => &[Arch::Arm, Arch::Arm64, Arch::X86, Arch::X86_64],
            Self::Ios => &[Arch::Arm, Arch::Arm64, Arch::X86_64],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Android => "android",
            Self::Ios => "ios",
        })
    }
}

/// A CPU architecture, named the way the Go toolchain names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Arch {
    /// 32-bit ARM (`arm`).
    Arm,
    /// 64-bit ARM (`arm64`).
    Arm64,
    /// 32-bit x86 (`386`).
    X86,
    /// 64-bit x86 (`amd64`).
    X86_64,
}

impl Arch {
    /// The `GOARCH` value.
    #[must_use]
    pub const fn goarch(self) -> &'static str {
        match self {
            Self::Arm => "arm",
            Self::Arm64 => "arm64",
            Self::X86 => "386",
            Self::X86_64 => "amd64",
        }
    }

    /// The architecture name clang and `lipo` use.
    #[must_use]
    pub const fn clang_arch(self) -> &'static str {
        match self {
            Self::Arm => "armv7",
            Self::Arm64 => "arm64",
            Self::X86 => "i386",
            Self::X86_64 => "x86_64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.goarch())
    }
}

impl FromStr for Arch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arm" => Ok(Self::Arm),
            "arm64" => Ok(Self::Arm64),
            "386" => Ok(Self::X86),
            "amd64" => Ok(Self::X86_64),
            other => Err(ConfigError::UnknownTarget(format!(
                "unsupported architecture {other:?}"
            ))),
        }
    }
}

/// A parsed `-target` value: one platform and the architectures to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    /// The platform every entry names.
    pub platform: Platform,
    /// Architectures in the order they were given, without duplicates.
    pub archs: Vec<Arch>,
}

impl FromStr for TargetSpec {
    type Err = ConfigError;

    /// Parses `android`, `ios/arm64` or `android/arm,android/386`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut platform = None;
        let mut archs = Vec::new();

        for entry in s.split(',').map(str::trim) {
            let (os, arch) = match entry.split_once('/') {
                Some((os, arch)) => (os, Some(arch)),
                None => (entry, None),
            };
            let this = match os {
                "android" => Platform::Android,
                "ios" => Platform::Ios,
                "" => return Err(ConfigError::UnknownTarget(s.to_string())),
                other => {
                    return Err(ConfigError::UnknownTarget(format!(
                        "unsupported platform {other:?}"
                    )));
                }
            };
            match platform {
                Some(p) if p != this => {
                    return Err(ConfigError::UnknownTarget(format!(
                        "{s:?} mixes {p} and {this}"
                    )));
                }
                _ => platform = Some(this),
            }
            let listed = match arch {
                Some(arch) => vec![arch.parse::<Arch>()?],
                None => this.default_archs().to_vec(),
            };
            for arch in listed {
                if !archs.contains(&arch) {
                    archs.push(arch);
                }
            }
        }

        let platform = platform.ok_or_else(|| ConfigError::UnknownTarget(s.to_string()))?;
        Ok(Self { platform, archs })
    }
}
