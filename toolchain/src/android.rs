//! Android SDK/NDK discovery and descriptor construction.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Arch, ConfigError, HostPlatform, Platform, TargetDescriptor};

/// Lowest Android API level bindings are built against.
pub const MIN_ANDROID_API: u32 = 15;

/// Per-architecture NDK naming.
struct NdkArch {
    abi: &'static str,
    clang_target: &'static str,
    gcc_prefix: &'static str,
    platform_arch: &'static str,
    api: u32,
}

const fn ndk_arch(arch: Arch) -> NdkArch {
    match arch {
        Arch::Arm => NdkArch {
            abi: "armeabi-v7a",
            clang_target: "armv7a-none-linux-androideabi",
            gcc_prefix: "arm-linux-androideabi",
            platform_arch: "arch-arm",
            api: 15,
        },
        Arch::Arm64 => NdkArch {
            abi: "arm64-v8a",
            clang_target: "aarch64-none-linux-android",
            gcc_prefix: "aarch64-linux-android",
            platform_arch: "arch-arm64",
            api: 21,
        },
        Arch::X86 => NdkArch {
            abi: "x86",
            clang_target: "i686-none-linux-android",
            gcc_prefix: "x86",
            platform_arch: "arch-x86",
            api: 15,
        },
        Arch::X86_64 => NdkArch {
            abi: "x86_64",
            clang_target: "x86_64-none-linux-android",
            gcc_prefix: "x86_64",
            platform_arch: "arch-x86_64",
            api: 21,
        },
    }
}

/// An Android SDK installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidSdk {
    home: PathBuf,
}

impl AndroidSdk {
    /// Name of the variable that points at the SDK.
    pub const HOME_VAR: &'static str = "ANDROID_HOME";

    /// Build from the value of `ANDROID_HOME`, if any.
    ///
    /// An absent or empty value is [`ConfigError::SdkHomeNotSet`], which
    /// callers treat as "skip".
    pub fn from_home(home: Option<PathBuf>) -> Result<Self, ConfigError> {
        match home {
            Some(home) if !home.as_os_str().is_empty() => Ok(Self { home }),
            _ => Err(ConfigError::SdkHomeNotSet { var: Self::HOME_VAR }),
        }
    }

    /// SDK root.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Find the newest `platforms/android-N` with `N >= 15` that ships an
    /// `android.jar`.
    pub fn platform(&self) -> Result<PathBuf, ConfigError> {
        let dir = self.home.join("platforms");
        let no_platform = || ConfigError::NoPlatform {
            dir: dir.clone(),
            min_api: MIN_ANDROID_API,
        };
        let entries = fs::read_dir(&dir).map_err(|_| no_platform())?;

        let mut best: Option<(u32, PathBuf)> = None;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(level) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_prefix("android-"))
                .and_then(|n| n.parse::<u32>().ok())
            else {
                continue;
            };
            if level < MIN_ANDROID_API || !path.join("android.jar").is_file() {
                continue;
            }
            if best.as_ref().is_none_or(|(current, _)| *current < level) {
                best = Some((level, path));
            }
        }

        let (level, path) = best.ok_or_else(no_platform)?;
        log::debug!("using android platform API {level} at {}", path.display());
        Ok(path)
    }
}

/// An Android NDK installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ndk {
    root: PathBuf,
}

impl Ndk {
    /// Name of the variable that may point at the NDK.
    pub const HOME_VAR: &'static str = "ANDROID_NDK_HOME";

    /// Use `root` without checking it exists.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the NDK: an explicit root wins, then `ANDROID_NDK_HOME`, then
    /// the `ndk-bundle` inside the SDK.
    pub fn locate(
        explicit: Option<PathBuf>,
        ndk_home: Option<PathBuf>,
        sdk: &AndroidSdk,
    ) -> Result<Self, ConfigError> {
        let root = explicit
            .or(ndk_home)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| sdk.home().join("ndk-bundle"));
        if root.is_dir() {
            Ok(Self { root })
        } else {
            Err(ConfigError::NdkNotFound(root))
        }
    }

    /// NDK root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TargetDescriptor {
    /// Describe the NDK toolchain for `arch`.
    ///
    /// `gomobile` is the per-user cache directory holding prebuilt support
    /// headers (`include/`) and libraries (`lib/<goarch>`).
    #[must_use]
    pub fn android(ndk: &Ndk, host: &HostPlatform, arch: Arch, gomobile: &Path) -> Self {
        let info = ndk_arch(arch);
        let prebuilt = host.prebuilt_tag();

        let toolchain_root = ndk.root().join("toolchains/llvm/prebuilt").join(&prebuilt);
        let bin = toolchain_root.join("bin");
        let cc = bin.join(format!("clang{}", host.exe_suffix()));
        let cxx = bin.join(format!("clang++{}", host.exe_suffix()));
        let sysroot = ndk
            .root()
            .join("platforms")
            .join(format!("android-{}", info.api))
            .join(info.platform_arch);
        let gcc_toolchain = ndk
            .root()
            .join("toolchains")
            .join(format!("{}-4.9", info.gcc_prefix))
            .join("prebuilt")
            .join(&prebuilt);

        let compile_flags = vec![
            "-target".to_string(),
            info.clang_target.to_string(),
            "--sysroot".to_string(),
            sysroot.display().to_string(),
            "-gcc-toolchain".to_string(),
            gcc_toolchain.display().to_string(),
        ];
        let include_flags = vec![format!("-I{}", gomobile.join("include").display())];
        let mut linker_flags = compile_flags.clone();
        linker_flags.push(format!("-L{}", sysroot.join("usr/lib").display()));
        linker_flags.push(format!(
            "-L{}",
            gomobile.join("lib").join(arch.goarch()).display()
        ));

        Self {
            platform: Platform::Android,
            arch,
            toolchain_root,
            api_level: info.api,
            sysroot,
            cc,
            cxx,
            compile_flags,
            include_flags,
            linker_flags,
            abi: info.abi.to_string(),
        }
    }
}
