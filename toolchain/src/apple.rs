//! Apple platform toolchain discovery.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Arch, ConfigError, Platform, TargetDescriptor};

/// Minimum iOS major version bindings are built for.
pub const IOS_MIN_VERSION: u32 = 7;

/// Paths reported by Xcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppleSdk {
    /// Xcode developer directory (`xcode-select -p`).
    pub developer_dir: PathBuf,
    /// `iphoneos` SDK path.
    pub iphoneos: PathBuf,
    /// `iphonesimulator` SDK path.
    pub iphonesimulator: PathBuf,
    /// clang driver.
    pub clang: PathBuf,
}

impl AppleSdk {
    /// Ask `xcode-select` and `xcrun` for the SDK locations.
    ///
    /// Any failure is [`ConfigError::XcodeUnavailable`], a skip condition.
    pub fn detect() -> Result<Self, ConfigError> {
        let developer_dir = PathBuf::from(query("xcode-select", &["-p"])?);
        let iphoneos = PathBuf::from(query("xcrun", &["--sdk", "iphoneos", "--show-sdk-path"])?);
        let iphonesimulator = PathBuf::from(query(
            "xcrun",
            &["--sdk", "iphonesimulator", "--show-sdk-path"],
        )?);
        let clang = PathBuf::from(query("xcrun", &["--sdk", "iphoneos", "--find", "clang"])?);
        log::debug!("Xcode developer dir: {}", developer_dir.display());

        Ok(Self {
            developer_dir,
            iphoneos,
            iphonesimulator,
            clang,
        })
    }
}

fn query(program: &str, args: &[&str]) -> Result<String, ConfigError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| ConfigError::XcodeUnavailable(format!("{program}: {e}")))?;
    if !output.status.success() {
        return Err(ConfigError::XcodeUnavailable(format!(
            "{program} {}: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        return Err(ConfigError::XcodeUnavailable(format!(
            "{program} {} printed nothing",
            args.join(" ")
        )));
    }
    Ok(value)
}

impl TargetDescriptor {
    /// Describe the Xcode toolchain for `arch`.
    ///
    /// ARM architectures build against the device SDK, x86 ones against the
    /// simulator SDK.
    #[must_use]
    pub fn ios(sdk: &AppleSdk, arch: Arch) -> Self {
        let (sysroot, min_flag) = match arch {
            Arch::Arm | Arch::Arm64 => (&sdk.iphoneos, "-miphoneos-version-min"),
            Arch::X86 | Arch::X86_64 => (&sdk.iphonesimulator, "-mios-simulator-version-min"),
        };
        let compile_flags = vec![
            "-isysroot".to_string(),
            sysroot.display().to_string(),
            format!("{min_flag}={IOS_MIN_VERSION}.0"),
            "-arch".to_string(),
            arch.clang_arch().to_string(),
        ];

        Self {
            platform: Platform::Ios,
            arch,
            toolchain_root: sdk.developer_dir.clone(),
            api_level: IOS_MIN_VERSION,
            sysroot: sysroot.clone(),
            cc: sdk.clang.clone(),
            cxx: sdk.clang.clone(),
            linker_flags: compile_flags.clone(),
            compile_flags,
            include_flags: Vec::new(),
            abi: arch.clang_arch().to_string(),
        }
    }

    /// Whether this descriptor targets the iOS simulator.
    #[must_use]
    pub fn is_simulator(&self) -> bool {
        self.platform == Platform::Ios && matches!(self.arch, Arch::X86 | Arch::X86_64)
    }

    /// Path of the SDK this descriptor compiles against.
    #[must_use]
    pub fn sdk_path(&self) -> &Path {
        &self.sysroot
    }
}
