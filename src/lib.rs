//! # mobind
//!
//! Build-step orchestration for binding Go packages into mobile libraries:
//! an Android archive (AAR) usable from Java, or an iOS framework usable
//! from Objective-C.
//!
//! A binding runs as a fixed pipeline:
//!
//! 1. [`toolchain`] turns a target like `android/arm` into concrete compiler
//!    paths, flags and a cross-compilation environment.
//! 2. [`package`] cleans and resolves package specifiers.
//! 3. [`plan`] computes the ordered steps. This is pure: equal inputs give
//!    equal plans.
//! 4. [`exec`] runs the steps, or renders them as a trace in dry-run mode.
//!
//! With the `verify` feature, [`verify`] compares dry-run traces against
//! expected templates.
//!
//! ## Example
//!
//! ```no_run
//! use mobind::{BindRequest, Binder, Environment};
//!
//! let env = Environment::from_env();
//! let source = env.package_source();
//! let request = BindRequest::new("android/arm".parse()?, ["golang.org/x/mobile/asset"]);
//!
//! match Binder::new(env, source).dry_run(&request, &mut std::io::stderr()) {
//!     Ok(trace) => println!("{} steps", trace.len()),
//!     Err(e) if e.is_skip() => eprintln!("skipping: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod env;
mod error;
mod pipeline;

pub use env::Environment;
pub use error::Error;
pub use pipeline::{BindRequest, Binder, DRY_RUN_WORK, Prepared};

pub use mobind_exec as exec;
pub use mobind_package as package;
pub use mobind_plan as plan;
pub use mobind_toolchain as toolchain;

#[cfg(feature = "verify")]
pub use mobind_verify as verify;
