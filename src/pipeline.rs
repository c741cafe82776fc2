use std::io::Write;
use std::path::{Path, PathBuf};

use mobind_exec::{Executor, Mode, Trace};
use mobind_package::{BIND_SUPPORT_PACKAGE, PackageSource, Resolver};
use mobind_plan::{BindOptions, BindTarget, BuildFlags, BuildPaths, Plan};
use mobind_toolchain::{
    AndroidSdk, AppleSdk, HostPlatform, Ndk, Platform, TargetDescriptor, TargetSpec,
};

use crate::{Environment, Error};

/// Work directory used by dry runs.
pub const DRY_RUN_WORK: &str = "$WORK";

/// What to bind, for which target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindRequest {
    /// Platform and architectures.
    pub target: TargetSpec,
    /// Package specifiers, in order.
    pub packages: Vec<String>,
    /// Java package for generated classes.
    pub java_package: Option<String>,
    /// Objective-C name prefix.
    pub objc_prefix: Option<String>,
    /// Artifact path; defaults per platform.
    pub output: Option<PathBuf>,
    /// Go tool flags.
    pub flags: BuildFlags,
}

impl BindRequest {
    /// Bind `packages` for `target` with default options.
    pub fn new<I, S>(target: TargetSpec, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target,
            packages: packages.into_iter().map(Into::into).collect(),
            java_package: None,
            objc_prefix: None,
            output: None,
            flags: BuildFlags::default(),
        }
    }
}

/// A planned binding, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    /// Resolved toolchains.
    pub target: BindTarget,
    /// Resolved options.
    pub options: BindOptions,
    /// The steps.
    pub plan: Plan,
    /// The artifact the plan writes.
    pub output: PathBuf,
}

/// Resolves toolchains and packages, then plans and runs a binding.
#[derive(Debug, Clone)]
pub struct Binder<S> {
    env: Environment,
    source: S,
    host: HostPlatform,
    ndk: Option<Ndk>,
    apple: Option<AppleSdk>,
}

impl<S: PackageSource> Binder<S> {
    /// A binder for the current host.
    pub fn new(env: Environment, source: S) -> Self {
        Self {
            env,
            source,
            host: HostPlatform::current(),
            ndk: None,
            apple: None,
        }
    }

    /// Describe a different host.
    #[must_use]
    pub fn host(mut self, host: HostPlatform) -> Self {
        self.host = host;
        self
    }

    /// Use `ndk` as is instead of locating one.
    #[must_use]
    pub fn ndk(mut self, ndk: Ndk) -> Self {
        self.ndk = Some(ndk);
        self
    }

    /// Use `sdk` instead of asking Xcode.
    #[must_use]
    pub fn apple_sdk(mut self, sdk: AppleSdk) -> Self {
        self.apple = Some(sdk);
        self
    }

    /// The captured environment.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    /// Resolve everything `req` needs and plan it with `work` as scratch root.
    ///
    /// Toolchains are resolved before packages, so a missing SDK is reported
    /// as a skip even when the packages would not resolve either.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the SDK or NDK is unavailable,
    /// [`Error::Resolution`] when a package or the support package is
    /// missing.
    pub fn prepare(&self, req: &BindRequest, work: &Path) -> Result<Prepared, Error> {
        let gomobile = self.env.gomobile_dir();
        let target = self.bind_target(&req.target, &gomobile)?;

        let resolver = Resolver::new(&self.source);
        let packages = resolver.resolve(&req.packages)?;
        let support = resolver.resolve_one(BIND_SUPPORT_PACKAGE)?;
        log::info!(
            "binding {} package(s) for {}",
            packages.len(),
            req.target.platform
        );

        let mut options = BindOptions::new(
            packages,
            BuildPaths {
                work: work.to_path_buf(),
                gomobile,
                gopath: self.env.gopath.clone(),
                bind_support: support.source_dir,
            },
        );
        options.java_package.clone_from(&req.java_package);
        options.objc_prefix.clone_from(&req.objc_prefix);
        options.output.clone_from(&req.output);
        options.flags = req.flags.clone();

        let plan = mobind_plan::build(&target, &options);
        let output = mobind_plan::output_path(&target, &options);
        log::debug!("planned {} steps", plan.steps().len());
        Ok(Prepared {
            target,
            options,
            plan,
            output,
        })
    }

    /// Execute a prepared binding.
    ///
    /// # Errors
    ///
    /// [`Error::Exec`] when a step fails.
    pub fn execute<W: Write>(
        &self,
        prepared: &Prepared,
        executor: &Executor,
        sink: &mut W,
    ) -> Result<Trace, Error> {
        let executor = executor
            .clone()
            .substitutions(self.env.substitutions(&prepared.options.paths.work));
        let trace = executor.execute(&prepared.plan, sink)?;
        if executor.mode() == Mode::Real {
            log::info!("wrote {}", prepared.output.display());
        }
        Ok(trace)
    }

    /// Prepare `req` in `work` and execute it.
    ///
    /// # Errors
    ///
    /// Anything [`Binder::prepare`] or [`Binder::execute`] returns.
    pub fn run<W: Write>(
        &self,
        req: &BindRequest,
        executor: &Executor,
        work: &Path,
        sink: &mut W,
    ) -> Result<Trace, Error> {
        let prepared = self.prepare(req, work)?;
        self.execute(&prepared, executor, sink)
    }

    /// Render `req` without executing anything, using [`DRY_RUN_WORK`].
    ///
    /// # Errors
    ///
    /// Anything [`Binder::prepare`] returns.
    pub fn dry_run<W: Write>(&self, req: &BindRequest, sink: &mut W) -> Result<Trace, Error> {
        self.run(
            req,
            &Executor::new(Mode::DryRun),
            Path::new(DRY_RUN_WORK),
            sink,
        )
    }

    fn bind_target(&self, spec: &TargetSpec, gomobile: &Path) -> Result<BindTarget, Error> {
        match spec.platform {
            Platform::Android => {
                let sdk = AndroidSdk::from_home(self.env.android_home.clone())?;
                let platform = sdk.platform()?;
                let ndk = match &self.ndk {
                    Some(ndk) => ndk.clone(),
                    None => Ndk::locate(None, self.env.android_ndk_home.clone(), &sdk)?,
                };
                let targets = spec
                    .archs
                    .iter()
                    .map(|&arch| TargetDescriptor::android(&ndk, &self.host, arch, gomobile))
                    .collect();
                Ok(BindTarget::Android { targets, platform })
            }
            Platform::Ios => {
                let sdk = match &self.apple {
                    Some(sdk) => sdk.clone(),
                    None => AppleSdk::detect()?,
                };
                let targets = spec
                    .archs
                    .iter()
                    .map(|&arch| TargetDescriptor::ios(&sdk, arch))
                    .collect();
                Ok(BindTarget::Ios { targets })
            }
        }
    }
}
