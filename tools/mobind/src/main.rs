mod config;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mobind::exec::{Executor, Mode};
use mobind::plan::BuildFlags;
use mobind::toolchain::{AndroidSdk, HostPlatform, Ndk, TargetSpec};
use mobind::{BindRequest, Binder, DRY_RUN_WORK, Environment, Error};
use owo_colors::OwoColorize;
use tempfile::TempDir;

use crate::config::FileConfig;

const DEFAULT_CONFIG: &str = "mobind.toml";
const DEFAULT_TARGET: &str = "android";

#[derive(Parser)]
#[command(name = "mobind")]
#[command(about = "Build Go packages into Android and iOS libraries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a library for Android (.aar) or iOS (.framework)
    Bind(BindArgs),
    /// Print the build plan as JSON without running it
    Plan(BindArgs),
    /// Show the detected toolchain environment
    Env {
        /// Config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct BindArgs {
    /// Import paths of the packages to bind
    #[arg(required = true)]
    packages: Vec<String>,

    /// Target platform, e.g. `android`, `ios` or `android/arm,android/arm64`
    #[arg(long)]
    target: Option<String>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Java package for generated classes
    #[arg(long)]
    javapkg: Option<String>,

    /// Objective-C name prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Print the commands but do not run them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print the commands as they run
    #[arg(short = 'x')]
    print_commands: bool,

    /// Verbose go builds and logging
    #[arg(short = 'v')]
    verbose: bool,

    /// Force rebuilding of packages
    #[arg(short = 'a')]
    force_rebuild: bool,

    /// Extra build tags, comma separated
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Keep the work directory and print its path
    #[arg(long)]
    work: bool,

    /// Android NDK root
    #[arg(long)]
    ndk: Option<PathBuf>,

    /// Config file (defaults to ./mobind.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bind(args) => {
            init_logging(args.verbose);
            run_bind(&args)
        }
        Commands::Plan(args) => {
            init_logging(args.verbose);
            run_plan(&args)
        }
        Commands::Env { config } => {
            init_logging(false);
            run_env(config.as_deref())
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::load(path, true),
        None => FileConfig::load(Path::new(DEFAULT_CONFIG), false),
    }
}

/// Layer flags over the config file over the process environment.
fn settings(args: &BindArgs) -> Result<(BindRequest, Environment)> {
    let file = load_config(args.config.as_deref())?;

    let mut env = Environment::from_env();
    if let Some(home) = file.android_home.clone() {
        env.android_home = Some(home);
    }
    if !file.gopath.is_empty() {
        env.gopath.clone_from(&file.gopath);
    }
    if let Some(ndk) = args.ndk.clone().or_else(|| file.ndk.clone()) {
        env.android_ndk_home = Some(ndk);
    }

    let target = args
        .target
        .as_deref()
        .or(file.target.as_deref())
        .unwrap_or(DEFAULT_TARGET);
    let target: TargetSpec = target.parse()?;

    let mut request = BindRequest::new(target, args.packages.iter().cloned());
    request.java_package = args.javapkg.clone().or(file.javapkg);
    request.objc_prefix = args.prefix.clone().or(file.prefix);
    request.output = args.output.clone().or(file.output);
    request.flags = BuildFlags {
        force_rebuild: args.force_rebuild,
        verbose: args.verbose,
        print_commands: args.print_commands,
        tags: if args.tags.is_empty() {
            file.tags
        } else {
            args.tags.clone()
        },
    };
    Ok((request, env))
}

fn run_bind(args: &BindArgs) -> Result<()> {
    let (request, env) = match settings(args) {
        Ok(s) => s,
        Err(e) => return skip_or_fail(e),
    };
    log::debug!("GOPATH entries: {}", env.gopath.len());
    let source = env.package_source();
    let binder = Binder::new(env, source);
    let mut sink = io::stderr().lock();

    if args.dry_run {
        return match binder.dry_run(&request, &mut sink) {
            Ok(_) => Ok(()),
            Err(e) => skip_or_fail(e.into()),
        };
    }

    let work = tempfile::Builder::new()
        .prefix("mobind-work-")
        .tempdir()
        .context("Failed to create work directory")?;
    let prepared = match binder.prepare(&request, work.path()) {
        Ok(p) => p,
        Err(e) => return skip_or_fail(e.into()),
    };

    println!(
        "{}",
        format!("🔨 Binding {} for {}...", request.packages.join(" "), request.target.platform)
            .yellow()
            .bold()
    );
    let executor = Executor::new(Mode::Real).print_commands(args.print_commands);
    let result = binder.execute(&prepared, &executor, &mut sink);

    if let Some(kept) = retain_work(work, args.work || result.is_err()) {
        println!("WORK={}", kept.display());
    }
    result.context("Bind failed")?;

    println!(
        "{}",
        format!("✅ Wrote {}", prepared.output.display()).green().bold()
    );
    Ok(())
}

/// Keep the scratch tree when asked to or after a failed build; otherwise
/// drop it.
fn retain_work(work: TempDir, keep: bool) -> Option<PathBuf> {
    keep.then(|| work.keep())
}

fn run_plan(args: &BindArgs) -> Result<()> {
    let (request, env) = match settings(args) {
        Ok(s) => s,
        Err(e) => return skip_or_fail(e),
    };
    let source = env.package_source();
    let prepared = match Binder::new(env, source).prepare(&request, Path::new(DRY_RUN_WORK)) {
        Ok(p) => p,
        Err(e) => return skip_or_fail(e.into()),
    };
    let json = serde_json::to_string_pretty(&prepared.plan).context("Failed to encode plan")?;
    println!("{json}");
    Ok(())
}

/// Report an unavailable SDK as a skip; fail on anything else.
fn skip_or_fail(err: anyhow::Error) -> Result<()> {
    let skip = match err.downcast_ref::<Error>() {
        Some(e) => e.is_skip(),
        None => err
            .downcast_ref::<mobind::toolchain::ConfigError>()
            .is_some_and(mobind::toolchain::ConfigError::is_skip),
    };
    if skip {
        println!("{} {err}", "⚠️ skipping:".yellow());
        return Ok(());
    }
    Err(err)
}

fn run_env(config: Option<&Path>) -> Result<()> {
    let file = load_config(config)?;
    let mut env = Environment::from_env();
    if let Some(home) = file.android_home {
        env.android_home = Some(home);
    }
    if !file.gopath.is_empty() {
        env.gopath = file.gopath;
    }
    if let Some(ndk) = file.ndk {
        env.android_ndk_home = Some(ndk);
    }

    let host = HostPlatform::current();
    println!("{}", "🔍 mobind environment".green().bold());
    println!("host:      {} ({})", host.prebuilt_tag(), host.os());
    println!("GOPATH:    {}", display_list(&env.gopath));
    println!("GOMOBILE:  {}", env.gomobile_dir().display());
    if let Some(root) = &env.goroot {
        println!("GOROOT:    {}", root.display());
    }

    match AndroidSdk::from_home(env.android_home.clone()) {
        Ok(sdk) => {
            println!("SDK:       {}", sdk.home().display());
            match sdk.platform() {
                Ok(platform) => println!("platform:  {}", platform.display()),
                Err(e) => println!("platform:  {}", e.to_string().yellow()),
            }
            match Ndk::locate(None, env.android_ndk_home.clone(), &sdk) {
                Ok(ndk) => println!("NDK:       {}", ndk.root().display()),
                Err(e) => println!("NDK:       {}", e.to_string().yellow()),
            }
        }
        Err(e) => println!("SDK:       {}", e.to_string().yellow()),
    }
    Ok(())
}

fn display_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_build_keeps_work_dir() {
        let work = tempfile::Builder::new()
            .prefix("mobind-work-")
            .tempdir()
            .unwrap();
        std::fs::write(work.path().join("partial.o"), "x").unwrap();

        let kept = retain_work(work, true).unwrap();
        assert!(kept.join("partial.o").is_file());
        std::fs::remove_dir_all(kept).unwrap();
    }

    #[test]
    fn successful_build_drops_work_dir() {
        let work = tempfile::tempdir().unwrap();
        let path = work.path().to_path_buf();
        assert_eq!(retain_work(work, false), None);
        assert!(!path.exists());
    }
}
