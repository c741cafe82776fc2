//! Facts about the machine running the build.

use serde::Serialize;

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        /// Separator between entries of `GOPATH`-style path lists.
        pub const PATH_LIST_SEPARATOR: char = ';';
    } else {
        /// Separator between entries of `GOPATH`-style path lists.
        pub const PATH_LIST_SEPARATOR: char = ':';
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "windows")] {
        const HOST_OS: &str = "windows";
        const HOST_EXE_SUFFIX: &str = ".exe";
    } else if #[cfg(target_os = "macos")] {
        const HOST_OS: &str = "darwin";
        const HOST_EXE_SUFFIX: &str = "";
    } else {
        const HOST_OS: &str = "linux";
        const HOST_EXE_SUFFIX: &str = "";
    }
}

// NDK ships x86 and x86_64 host binaries only.
cfg_if::cfg_if! {
    if #[cfg(target_arch = "x86")] {
        const HOST_NDK_ARCH: &str = "x86";
    } else {
        const HOST_NDK_ARCH: &str = "x86_64";
    }
}

/// The host OS and architecture, named the way NDK prebuilt directories are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostPlatform {
    os: String,
    ndk_arch: String,
    exe_suffix: String,
}

impl HostPlatform {
    /// Create a host description from explicit values.
    pub fn new(
        os: impl Into<String>,
        ndk_arch: impl Into<String>,
        exe_suffix: impl Into<String>,
    ) -> Self {
        Self {
            os: os.into(),
            ndk_arch: ndk_arch.into(),
            exe_suffix: exe_suffix.into(),
        }
    }

    /// Describe the machine this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        Self::new(HOST_OS, HOST_NDK_ARCH, HOST_EXE_SUFFIX)
    }

    /// GOOS-style OS name (`linux`, `darwin`, `windows`).
    #[must_use]
    pub fn os(&self) -> &str {
        &self.os
    }

    /// Architecture label used in NDK `prebuilt/` directory names.
    #[must_use]
    pub fn ndk_arch(&self) -> &str {
        &self.ndk_arch
    }

    /// Suffix of executables on this host (empty or `.exe`).
    #[must_use]
    pub fn exe_suffix(&self) -> &str {
        &self.exe_suffix
    }

    /// The `prebuilt/<tag>` directory name, e.g. `linux-x86_64`.
    #[must_use]
    pub fn prebuilt_tag(&self) -> String {
        format!("{}-{}", self.os, self.ndk_arch)
    }
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prebuilt_tag_joins_os_and_arch() {
        let host = HostPlatform::new("darwin", "x86_64", "");
        assert_eq!(host.prebuilt_tag(), "darwin-x86_64");
    }

    #[test]
    fn current_host_is_known() {
        let host = HostPlatform::current();
        assert!(["linux", "darwin", "windows"].contains(&host.os()));
        assert_eq!(host.exe_suffix() == ".exe", host.os() == "windows");
    }
}
