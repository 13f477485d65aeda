use async_trait::async_trait;

use super::launcher::ProcessLauncher;
use super::task::{run_process, ProcessOutcome, ProcessSpec};
use crate::core::error::ActionResult;

/// Something that can carry out a [`ProcessSpec`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &ProcessSpec) -> ActionResult<ProcessOutcome>;
}

/// Runs specs through the Gradle wrapper using a platform launcher.
pub struct GradleRunner {
    launcher: Box<dyn ProcessLauncher>,
}

impl GradleRunner {
    pub fn new(launcher: Box<dyn ProcessLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl CommandRunner for GradleRunner {
    async fn run(&self, spec: &ProcessSpec) -> ActionResult<ProcessOutcome> {
        run_process(self.launcher.as_ref(), spec).await
    }
}
