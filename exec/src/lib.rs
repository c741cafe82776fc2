//! Plan execution.
//!
//! An [`Executor`] walks a [`Plan`](mobind_plan::Plan) in order. In
//! [`Mode::Real`] it performs each step and stops at the first failure; in
//! [`Mode::DryRun`] it only renders steps. Either way every step becomes a
//! line of the returned [`Trace`]:
//!
//! ```text
//! mkdir -p $WORK/gomobile_bind
//! GOOS=android GOARCH=arm ... go build -buildmode=c-shared ...
//! rm $WORK/android/src/main/java/go/Seq.java
//! ln -s ... $WORK/android/src/main/java/go/Seq.java
//! PWD=$WORK/android/src/main/java javac -d $WORK/javac-output ...
//! ```
//!
//! Echoed lines go to a caller-supplied writer, never to the logger.

#![warn(missing_docs)]

mod error;
mod executor;
mod render;
mod run;
mod trace;

pub use error::{BuildError, ExecError};
pub use executor::{Executor, Mode};
pub use render::{Substitutions, render_command, render_header, render_step};
pub use trace::Trace;
