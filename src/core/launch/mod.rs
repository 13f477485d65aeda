pub mod launcher;
pub mod lines;
pub mod runner;
pub mod task;

pub use launcher::{host_launcher, DirectLauncher, ProcessLauncher, ShellLauncher};
pub use lines::{LineBuffer, MarkerWatch};
pub use runner::{CommandRunner, GradleRunner};
pub use task::{run_process, ProcessOutcome, ProcessSpec, RunMode};
